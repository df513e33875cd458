use super::*;
use crate::dialect::{FragmentKind, get_dialect};
use crate::error::PpResult;
use crate::exp::{ConflictExpression, ConflictUpdate, Ex, ExOr, InsertClauses, Op, SelectClauses};
use crate::reflect::IntoUpdate;
use crate::{c, case, coalesce, count, func, i, l, lit, range, row_number, star, t, v, w};
use chrono::{TimeZone, Utc};

fn render_in(dialect: &Dialect, prepared: bool, expr: impl Into<Expr>) -> PpResult<(String, Vec<Value>)> {
    let mut b = SqlBuilder::new(prepared);
    SqlGenerator::new(dialect).generate(&mut b, &expr.into());
    b.finish()
}

fn render(dialect: &str, prepared: bool, expr: impl Into<Expr>) -> PpResult<(String, Vec<Value>)> {
    render_in(&get_dialect(dialect), prepared, expr)
}

fn sql(expr: impl Into<Expr>) -> String {
    render("default", false, expr).unwrap().0
}

fn sql_in(dialect: &str, expr: impl Into<Expr>) -> String {
    render(dialect, false, expr).unwrap().0
}

#[test]
fn test_inline_scalars() {
    assert_eq!(sql(Value::Null), "NULL");
    assert_eq!(sql(Value::Bool(true)), "TRUE");
    assert_eq!(sql(Value::Bool(false)), "FALSE");
    assert_eq!(sql(Value::Int(-5)), "-5");
    assert_eq!(sql(Value::UInt(7)), "7");
    assert_eq!(sql(Value::Float(1.5)), "1.5");
    assert_eq!(sql(Value::from("it's")), "'it''s'");
    assert_eq!(
        sql(Value::Uuid(uuid::Uuid::nil())),
        "'00000000-0000-0000-0000-000000000000'"
    );
}

#[test]
fn test_inline_scalars_mysql() {
    assert_eq!(sql_in("mysql", Value::Bool(true)), "1");
    assert_eq!(sql_in("mysql", Value::from("it's")), r"'it\'s'");
    assert_eq!(sql_in("mysql", Value::from("a\nb")), r"'a\nb'");
}

#[test]
fn test_non_finite_float_fails() {
    let err = render("default", false, Value::Float(f64::NAN)).unwrap_err();
    assert_eq!(err, PpError::Encode("NaN".to_string()));
}

#[test]
fn test_bytes_render_as_strings() {
    assert_eq!(sql(Value::Bytes(bytes::Bytes::from_static(b"it's"))), "'it''s'");
    let err = render("default", false, Value::Bytes(bytes::Bytes::from_static(b"a\xffb")))
        .unwrap_err();
    assert!(matches!(err, PpError::Encode(_)));
    assert_eq!(
        render("default", true, Value::Bytes(bytes::Bytes::from_static(b"\xff"))).unwrap(),
        (
            "?".to_string(),
            vec![Value::Bytes(bytes::Bytes::from_static(b"\xff"))]
        )
    );
}

#[test]
fn test_time_uses_dialect_format() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap().fixed_offset();
    assert_eq!(sql(Value::Time(ts)), "'2024-01-02T03:04:05+00:00'");
    assert_eq!(sql_in("mysql", Value::Time(ts)), "'2024-01-02 03:04:05.000000'");
}

#[test]
fn test_placeholders() {
    assert_eq!(
        render("default", true, Value::Int(1)).unwrap(),
        ("?".to_string(), vec![Value::Int(1)])
    );
    assert_eq!(
        render("postgres", true, c("a").eq(1)).unwrap(),
        ("(\"a\" = $1)".to_string(), vec![Value::Int(1)])
    );
    assert_eq!(
        render("sqlserver", true, c("a").between(range(1, 2))).unwrap(),
        (
            "(\"a\" BETWEEN @p1 AND @p2)".to_string(),
            vec![Value::Int(1), Value::Int(2)]
        )
    );
}

#[test]
fn test_identifiers() {
    assert_eq!(sql(i("schema.table.col")), r#""schema"."table"."col""#);
    assert_eq!(sql(i("table.col")), r#""table"."col""#);
    assert_eq!(sql(t("items").all()), r#""items".*"#);
    assert_eq!(sql(c(r#"a"b"#)), r#""a""b""#);
    assert_eq!(sql_in("mysql", i("t.a")), "`t`.`a`");
    assert_eq!(
        render("default", false, IdentifierExpression::default()).unwrap_err(),
        PpError::EmptyIdentifier
    );
}

#[test]
fn test_literals() {
    assert_eq!(sql(l("NOW()")), "NOW()");
    assert_eq!(sql(l("a ? b")), "a ? b");
    assert_eq!(sql(lit("? + ?", (v(1), c("b")))), r#"1 + "b""#);
    assert_eq!(
        render("default", true, lit("? + ?", (v(1), c("b")))).unwrap(),
        (r#"? + "b""#.to_string(), vec![Value::Int(1)])
    );
}

#[test]
fn test_literal_string_args_are_values() {
    assert_eq!(sql(lit("x = ?", "bob")), "x = 'bob'");
    assert_eq!(
        render("postgres", true, lit("x = ? AND y = ?", ("bob", 3))).unwrap(),
        (
            "x = $1 AND y = $2".to_string(),
            vec![Value::from("bob"), Value::Int(3)]
        )
    );
    assert_eq!(sql(lit("? = ?", (c("a"), "a"))), r#""a" = 'a'"#);
    assert_eq!(sql(lit("? IN ?", (c("a"), vec![1, 2]))), r#""a" IN (1, 2)"#);
    assert_eq!(sql(lit("?, ?", vec!["x", "y"])), "'x', 'y'");
}

#[test]
fn test_boolean_operators() {
    assert_eq!(sql(c("a").eq(1)), r#"("a" = 1)"#);
    assert_eq!(sql(c("a").neq("x")), r#"("a" != 'x')"#);
    assert_eq!(sql(c("a").gte(1)), r#"("a" >= 1)"#);
    assert_eq!(sql(c("a").eq(Value::Null)), r#"("a" IS NULL)"#);
    assert_eq!(sql(c("a").neq(Value::Null)), r#"("a" IS NOT NULL)"#);
    assert_eq!(sql(c("a").eq(true)), r#"("a" IS TRUE)"#);
    assert_eq!(sql(c("a").is_not_false()), r#"("a" IS NOT FALSE)"#);
    assert_eq!(sql(c("a").eq(vec![1, 2])), r#"("a" IN (1, 2))"#);
    assert_eq!(sql(c("a").neq(vec![1, 2])), r#"("a" NOT IN (1, 2))"#);
    assert_eq!(sql(c("a").in_(1)), r#"("a" IN (1))"#);
    assert_eq!(sql(c("a").like("a%")), r#"("a" LIKE 'a%')"#);
    assert_eq!(sql(c("a").not_ilike("a%")), r#"("a" NOT ILIKE 'a%')"#);
}

#[test]
fn test_null_and_bool_checks_stay_inline_when_prepared() {
    assert_eq!(
        render("default", true, c("a").is_null()).unwrap(),
        (r#"("a" IS NULL)"#.to_string(), Vec::new())
    );
    assert_eq!(
        render("default", true, c("a").is_true()).unwrap(),
        (r#"("a" IS TRUE)"#.to_string(), Vec::new())
    );
}

#[test]
fn test_is_bool_per_dialect() {
    assert_eq!(sql_in("sqlite3", c("a").is_true()), "(`a` IS 1)");
    assert_eq!(sql_in("sqlserver", c("a").is_true()), r#"("a" = 1)"#);
    assert_eq!(sql_in("sqlserver", c("a").is_not_false()), r#"("a" != 0)"#);
    assert_eq!(sql_in("sqlserver", c("a").is_null()), r#"("a" IS NULL)"#);
}

#[test]
fn test_empty_in() {
    assert_eq!(sql(c("a").in_(Vec::<i64>::new())), r#"("a" IN (NULL))"#);
    assert_eq!(sql(c("a").not_in(Vec::<i64>::new())), r#"("a" NOT IN (NULL))"#);

    let boolean = Dialect::new(
        "empty-in",
        DialectOptions {
            empty_in_style: EmptyInStyle::Boolean,
            ..DialectOptions::default()
        },
    );
    let (sql, _) = render_in(&boolean, false, c("a").in_(Vec::<i64>::new())).unwrap();
    assert_eq!(sql, "(FALSE)");
    let (sql, _) = render_in(&boolean, false, c("a").not_in(Vec::<i64>::new())).unwrap();
    assert_eq!(sql, "(TRUE)");
}

#[test]
fn test_regex_operators() {
    assert_eq!(sql(c("a").like(Expr::regex("^a"))), r#"("a" ~ '^a')"#);
    assert_eq!(sql(c("a").neq(Expr::regex("^a"))), r#"("a" !~ '^a')"#);
    assert_eq!(sql(c("a").ilike(Expr::regex("^a"))), r#"("a" ~* '^a')"#);
    assert_eq!(
        sql_in("mysql", c("a").like(Expr::regex("^a"))),
        "(`a` REGEXP BINARY '^a')"
    );
    assert_eq!(sql_in("mysql", c("a").like("a%")), "(`a` LIKE BINARY 'a%')");
}

#[test]
fn test_missing_operator_fails() {
    assert_eq!(
        render("sqlserver", false, c("a").ilike("a%")).unwrap_err(),
        PpError::UnsupportedBooleanOp("ILike".to_string())
    );
    assert_eq!(
        render("sqlite3", false, c("a").bitwise_xor(1)).unwrap_err(),
        PpError::UnsupportedBitwiseOp("XOR".to_string())
    );
}

#[test]
fn test_bitwise() {
    assert_eq!(sql(c("a").bitwise_and(1)), r#"("a" & 1)"#);
    assert_eq!(sql(c("a").bitwise_left_shift(2)), r#"("a" << 2)"#);
    assert_eq!(sql(c("a").bitwise_inversion()), r#"(~ "a")"#);
    assert_eq!(sql(c("a").bitwise_xor(1)), r#"("a" # 1)"#);
    assert_eq!(sql_in("mysql", c("a").bitwise_xor(1)), "(`a` ^ 1)");
}

#[test]
fn test_ranges() {
    assert_eq!(sql(c("a").between(range(1, 10))), r#"("a" BETWEEN 1 AND 10)"#);
    assert_eq!(
        sql(c("a").not_between(range("a", "z"))),
        r#"("a" NOT BETWEEN 'a' AND 'z')"#
    );
}

#[test]
fn test_functions_and_casts() {
    assert_eq!(sql(count(star())), "COUNT(*)");
    assert_eq!(sql(coalesce((c("a"), v("x")))), r#"COALESCE("a", 'x')"#);
    assert_eq!(sql(c("a").cast("TEXT")), r#"CAST("a" AS TEXT)"#);
    assert_eq!(sql(c("a").distinct()), r#"DISTINCT("a")"#);
    assert_eq!(sql(count(c("a")).as_("n")), r#"COUNT("a") AS "n""#);
}

#[test]
fn test_function_args_are_values() {
    assert_eq!(
        sql(func("COALESCE", (c("a"), "fallback"))),
        r#"COALESCE("a", 'fallback')"#
    );
    assert_eq!(sql(coalesce((c("a"), "x"))), r#"COALESCE("a", 'x')"#);
    assert_eq!(sql(count("a")), "COUNT('a')");
    assert_eq!(sql(func("NOW", ())), "NOW()");
    assert_eq!(
        render("default", true, func("CONCAT", (c("a"), "-", c("b")))).unwrap(),
        (
            r#"CONCAT("a", ?, "b")"#.to_string(),
            vec![Value::from("-")]
        )
    );
}

#[test]
fn test_case() {
    let searched = case().when(c("a").gt(1), "big").else_("small");
    assert_eq!(sql(searched), r#"CASE WHEN ("a" > 1) THEN 'big' ELSE 'small' END"#);

    let valued = case().value(c("a")).when(1, "one");
    assert_eq!(sql(valued), r#"CASE "a" WHEN 1 THEN 'one' END"#);

    assert_eq!(
        render("default", false, case()).unwrap_err(),
        PpError::EmptyCase
    );
}

#[test]
fn test_ordering() {
    assert_eq!(sql(c("a").asc()), r#""a" ASC"#);
    assert_eq!(sql(c("a").desc().nulls_last()), r#""a" DESC NULLS LAST"#);
    assert_eq!(sql(c("a").asc().nulls_first()), r#""a" ASC NULLS FIRST"#);
}

#[test]
fn test_window_functions() {
    let inline = row_number().over(w("").partition_by("a").order_by(c("b").asc()));
    assert_eq!(
        sql(inline),
        r#"ROW_NUMBER() OVER (PARTITION BY "a" ORDER BY "b" ASC)"#
    );
    assert_eq!(sql(row_number().over_name("w")), r#"ROW_NUMBER() OVER "w""#);
    assert_eq!(
        sql(row_number().over(w("").inherit("w").order_by(c("b").desc()))),
        r#"ROW_NUMBER() OVER ("w" ORDER BY "b" DESC)"#
    );
    assert_eq!(
        render("mysql", false, row_number().over_name("w")).unwrap_err(),
        PpError::WindowNotSupported("mysql".to_string())
    );
    assert_eq!(
        render("default", false, row_number().over(w("named"))).unwrap_err(),
        PpError::UnexpectedNamedWindow
    );
}

#[test]
fn test_ex_maps() {
    let ex = Ex::new()
        .with("a", 1)
        .with("b", Op::new().with("gt", 10).with("lt", 20));
    assert_eq!(
        sql(ex),
        r#"(("a" = 1) AND (("b" > 10) OR ("b" < 20)))"#
    );

    let ex = Ex::new()
        .with("c", Value::Null)
        .with("d", vec!["x", "y"])
        .with("e", Op::new().with("between", range(1, 2)));
    assert_eq!(
        sql(ex),
        r#"(("c" IS NULL) AND ("d" IN ('x', 'y')) AND ("e" BETWEEN 1 AND 2))"#
    );

    let ex_or = ExOr::new().with("a", 1).with("b", "x");
    assert_eq!(sql(ex_or), r#"(("a" = 1) OR ("b" = 'x'))"#);
}

#[test]
fn test_ex_single_entry_renders_bare() {
    assert_eq!(sql(Ex::new().with("a", 1)), r#"("a" = 1)"#);
}

#[test]
fn test_ex_unknown_operator_fails() {
    let ex = Ex::new().with("a", Op::new().with("foo", 1));
    assert_eq!(
        render("default", false, ex).unwrap_err(),
        PpError::UnsupportedExOperator("foo".to_string())
    );
}

#[test]
fn test_markers_and_tuples() {
    assert_eq!(sql(Expr::Star), "*");
    assert_eq!(sql(Expr::Default), "DEFAULT");
    assert_eq!(sql(Expr::Tuple(vec![v(1), v("a")])), "(1, 'a')");
}

#[test]
fn test_select_without_from() {
    let clauses = SelectClauses::new().set_select(ColumnListExpression::new(l("1")));
    let d = get_dialect("default");
    let mut b = SqlBuilder::new(false);
    SqlGenerator::new(&d).select_sql(&mut b, &clauses);
    assert_eq!(b.finish().unwrap().0, "SELECT 1");
}

fn insert_with_conflict(conflict: ConflictUpdate) -> PpResult<(String, Vec<Value>)> {
    let clauses = InsertClauses::new()
        .set_into(t("items").into())
        .set_cols(Some(ColumnListExpression::new("a")))
        .set_vals(vec![vec![v(1)]])
        .set_on_conflict(Some(ConflictExpression::from(conflict)));
    let d = get_dialect("postgres");
    let mut b = SqlBuilder::new(false);
    SqlGenerator::new(&d).insert_sql(&mut b, &clauses);
    b.finish()
}

#[test]
fn test_conflict_update_requires_values() {
    assert_eq!(
        insert_with_conflict(ConflictUpdate::new("a", None)).unwrap_err(),
        PpError::ConflictUpdateRequiresValues
    );
    assert_eq!(
        PpError::ConflictUpdateRequiresValues.to_string(),
        "pp: values are required for on conflict update expression"
    );

    let update = ConflictUpdate::new("a", Some(c("a").set(2).into_update()));
    assert_eq!(
        insert_with_conflict(update).unwrap().0,
        r#"INSERT INTO "items" ("a") VALUES (1) ON CONFLICT (a) DO UPDATE SET "a"=2"#
    );
}

#[test]
fn test_unknown_fragment_fails() {
    let d = Dialect::new(
        "odd-order",
        DialectOptions {
            select_sql_order: vec![FragmentKind::Select, FragmentKind::Set],
            ..DialectOptions::default()
        },
    );
    let mut b = SqlBuilder::new(false);
    SqlGenerator::new(&d).select_sql(&mut b, &SelectClauses::new());
    assert_eq!(
        b.finish().unwrap_err(),
        PpError::NotSupportedFragment {
            statement: "SELECT".to_string(),
            fragment: "SetSQLFragment".to_string(),
        }
    );
}

#[test]
fn test_distinct_on_uses_dialect_fragment() {
    let clauses = SelectClauses::new()
        .set_from(ColumnListExpression::new("items"))
        .set_distinct(Some(ColumnListExpression::new("a")));
    let render_with = |d: &Dialect| {
        let mut b = SqlBuilder::new(false);
        SqlGenerator::new(d).select_sql(&mut b, &clauses);
        b.finish().unwrap().0
    };

    assert_eq!(
        render_with(&get_dialect("postgres")),
        r#"SELECT DISTINCT ON ("a") * FROM "items""#
    );
    let d = Dialect::new(
        "distinct-on-lower",
        DialectOptions {
            distinct_fragment: "distinct",
            distinct_on_fragment: " on ",
            ..DialectOptions::default()
        },
    );
    assert_eq!(render_with(&d), r#"SELECT distinct on ("a") * FROM "items""#);
}

#[test]
fn test_custom_fragment_order() {
    let d = Dialect::new(
        "from-first",
        DialectOptions {
            select_sql_order: vec![FragmentKind::From, FragmentKind::Select],
            ..DialectOptions::default()
        },
    );
    let clauses = SelectClauses::new().set_from(ColumnListExpression::new("items"));
    let mut b = SqlBuilder::new(false);
    SqlGenerator::new(&d).select_sql(&mut b, &clauses);
    assert_eq!(b.finish().unwrap().0, r#" FROM "items"SELECT *"#);
}
