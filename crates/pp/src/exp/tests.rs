use super::*;
use crate::error::PpError;
use crate::{c, do_update, i, t};

fn op_of(expr: BooleanExpression) -> BooleanOperation {
    expr.op()
}

#[test]
fn test_eq_normalizes_from_operand() {
    assert_eq!(op_of(c("a").eq(1)), BooleanOperation::Eq);
    assert_eq!(op_of(c("a").eq(Value::Null)), BooleanOperation::Is);
    assert_eq!(op_of(c("a").neq(Value::Null)), BooleanOperation::IsNot);
    assert_eq!(op_of(c("a").eq(false)), BooleanOperation::Is);
    assert_eq!(op_of(c("a").eq(vec![1, 2])), BooleanOperation::In);
    assert_eq!(op_of(c("a").neq(["x"])), BooleanOperation::NotIn);
    assert_eq!(op_of(c("a").eq(None::<i32>)), BooleanOperation::Is);
}

#[test]
fn test_regex_operand_selects_regexp_family() {
    assert_eq!(op_of(c("a").eq(Expr::regex("x"))), BooleanOperation::RegexpLike);
    assert_eq!(op_of(c("a").neq(Expr::regex("x"))), BooleanOperation::RegexpNotLike);
    assert_eq!(op_of(c("a").like(Expr::regex("x"))), BooleanOperation::RegexpLike);
    assert_eq!(op_of(c("a").ilike(Expr::regex("x"))), BooleanOperation::RegexpILike);
    assert_eq!(
        op_of(c("a").not_ilike(Expr::regex("x"))),
        BooleanOperation::RegexpNotILike
    );
}

#[cfg(feature = "regex")]
#[test]
fn test_compiled_regex_operand() {
    let re = regex::Regex::new("^a+$").unwrap();
    let expr = c("a").like(&re);
    assert_eq!(expr.op(), BooleanOperation::RegexpLike);
    assert!(matches!(expr.rhs(), Expr::Regex(p) if p == "^a+$"));
}

#[test]
fn test_comparisons_are_not_normalized() {
    assert_eq!(op_of(c("a").gt(Value::Null)), BooleanOperation::Gt);
    assert_eq!(op_of(c("a").is(true)), BooleanOperation::Is);
}

#[test]
fn test_in_wraps_single_operand() {
    let expr = c("a").in_(1);
    assert!(matches!(expr.rhs(), Expr::Tuple(items) if items.len() == 1));
    let expr = c("a").not_in(vec![1, 2, 3]);
    assert!(matches!(expr.rhs(), Expr::Tuple(items) if items.len() == 3));
}

#[test]
fn test_inverted_is_an_involution() {
    use BooleanOperation::*;
    for op in [
        Eq, Neq, Is, IsNot, Gt, Gte, Lt, Lte, In, NotIn, Like, NotLike, ILike, NotILike,
        RegexpLike, RegexpNotLike, RegexpILike, RegexpNotILike,
    ] {
        assert_ne!(op.inverted(), op);
        assert_eq!(op.inverted().inverted(), op);
    }
    assert_eq!(Gt.inverted(), Lte);
}

#[test]
fn test_operator_names() {
    assert_eq!(BooleanOperation::from_name("notIn"), Some(BooleanOperation::NotIn));
    assert_eq!(BooleanOperation::from_name("iLike"), Some(BooleanOperation::ILike));
    assert_eq!(BooleanOperation::from_name("GTE"), Some(BooleanOperation::Gte));
    assert_eq!(BooleanOperation::from_name("bogus"), None);
    assert_eq!(RangeOperation::from_name("notBetween"), Some(RangeOperation::NotBetween));
}

#[test]
fn test_parse_identifier() {
    let col = parse_identifier("a");
    assert_eq!(col.get_table(), "");
    assert_eq!(col.get_col(), &Column::Name("a".to_string()));

    let qualified = parse_identifier("t.a");
    assert_eq!(qualified.get_table(), "t");
    assert_eq!(qualified.get_col(), &Column::Name("a".to_string()));

    let full = parse_identifier("s.t.a");
    assert_eq!(full.get_schema(), "s");
    assert_eq!(full.get_table(), "t");

    let odd = parse_identifier("a.b.c.d");
    assert_eq!(odd.get_col(), &Column::Name("a.b.c.d".to_string()));

    assert_eq!(parse_identifier("t.*").get_col(), &Column::Star);
}

#[test]
fn test_identifier_shapes() {
    assert!(t("items").is_qualified_table());
    assert!(!c("id").is_qualified_table());
    assert!(IdentifierExpression::default().is_empty());
    assert_eq!(t("items").col("id"), i("items.id"));
    assert_eq!(c("id").table("items").schema("public"), i("public.items.id"));
}

#[test]
fn test_into_exprs_flattens() {
    let exprs = ("a", "t.b", c("c")).into_exprs();
    assert_eq!(exprs.len(), 3);
    assert!(exprs[1] == i("t.b"));

    assert!(().into_exprs().is_empty());
    assert!(None::<&str>.into_exprs().is_empty());
    assert_eq!(vec!["a", "b"].into_exprs().len(), 2);
    assert_eq!(ColumnListExpression::new(("a", "b")).into_exprs().len(), 2);
}

#[test]
fn test_table_likeness() {
    assert!(Expr::from(t("items")).is_table_like());
    assert!(Expr::from(crate::l("generate_series(1, 3)")).is_table_like());
    assert!(!Expr::Value(Value::Int(1)).is_table_like());
    assert!(!Expr::Star.is_table_like());
    assert_eq!(Expr::Value(Value::Int(1)).describe(), "int64");
}

#[test]
fn test_lists_are_copied_on_append() {
    let base = ColumnListExpression::new("a");
    let more = base.append("b");
    assert_eq!(base.len(), 1);
    assert_eq!(more.len(), 2);

    let conds = ExpressionList::and(vec![c("a").eq(1).into()]);
    let both = conds.append(vec![c("b").eq(2).into()]);
    assert_eq!(conds.expressions().len(), 1);
    assert_eq!(both.expressions().len(), 2);
    assert_eq!(both.kind(), ExpressionListType::And);
}

#[test]
fn test_empty_groups_are_dropped() {
    let list = ExpressionList::and(vec![
        Ex::new().into(),
        ExpressionList::or(Vec::new()).into(),
        c("a").eq(1).into(),
    ]);
    assert_eq!(list.expressions().len(), 1);
}

#[test]
fn test_record_keys_are_sorted() {
    let record = Record::new().with("b", 2).with("a", 1).with("c", "x");
    let keys: Vec<&String> = record.keys().collect();
    assert_eq!(keys, ["a", "b", "c"]);
    assert!(matches!(record.get("a"), Some(Expr::Value(Value::Int(1)))));
}

#[test]
fn test_record_from_serialize() {
    #[derive(serde::Serialize)]
    struct Item {
        name: String,
        qty: i64,
        tags: Vec<String>,
    }

    let record = Record::from_serialize(&Item {
        name: "widget".to_string(),
        qty: 3,
        tags: vec!["a".to_string()],
    })
    .unwrap();
    let keys: Vec<&String> = record.keys().collect();
    assert_eq!(keys, ["name", "qty", "tags"]);
    assert!(matches!(record.get("qty"), Some(Expr::Value(Value::Int(3)))));
    assert!(matches!(record.get("tags"), Some(Expr::Value(Value::Json(_)))));

    assert_eq!(
        Record::from_serialize(&1).unwrap_err(),
        PpError::UnsupportedInsertShape("number".to_string())
    );
}

#[test]
fn test_ex_expansion_order() {
    let ex = Ex::new().with("b", 2).with("a", 1);
    let list = ex.to_expressions().unwrap();
    assert_eq!(list.kind(), ExpressionListType::And);
    let Expr::Boolean(first) = &list.expressions()[0] else {
        panic!("expected a boolean expression");
    };
    assert!(*first.lhs() == c("a"));

    let ex_or = ExOr::new().with("a", 1);
    assert_eq!(ex_or.to_expressions().unwrap().kind(), ExpressionListType::Or);
}

#[test]
fn test_ex_range_operator_requires_range() {
    let ex = Ex::new().with("a", Op::new().with("between", 1));
    assert_eq!(
        ex.to_expressions().unwrap_err(),
        PpError::UnsupportedExOperator("between requires a range value got int64".to_string())
    );
}

#[test]
fn test_conflict_where_appends() {
    let update = do_update("id", c("a").set(1))
        .where_(c("b").is_null())
        .where_(c("c").gt(1));
    assert_eq!(update.target_column(), "id");
    assert_eq!(update.where_clause().unwrap().expressions().len(), 2);
}

#[test]
fn test_aliases_and_ordering() {
    let aliased = c("a").as_("b");
    assert_eq!(aliased.alias(), &c("b"));
    let realiased = aliased.as_("c");
    assert_eq!(realiased.alias(), &c("c"));
    assert_eq!(aliased.alias(), &c("b"));

    let ordered = c("a").desc().nulls_first();
    assert!(!ordered.is_asc());
    assert_eq!(ordered.null_sort(), NullSortType::First);
}

#[test]
fn test_join_types() {
    assert!(JoinType::Inner.is_conditioned());
    assert!(!JoinType::Cross.is_conditioned());
    assert!(!JoinType::NaturalLeft.is_conditioned());
    assert_eq!(JoinType::LeftOuter.to_string(), "LEFT OUTER JOIN");
}
