use std::sync::Arc;

use super::*;
use crate::exec::{Driver, Rows};
use crate::exp::WaitOption;
use crate::{
    Record, c, count, default_value, delete, do_nothing, do_update, from, func, i, insert, l,
    lateral, lit, on, row_number, star, truncate, update, using, v, w,
};

fn sql<D: Dataset>(ds: &D) -> String {
    ds.build().unwrap().0
}

fn row(pairs: &[(&str, i64)]) -> Record {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn test_datasets_are_immutable() {
    let base = from("test");
    let filtered = base.where_(c("a").eq(1));
    let limited = filtered.limit(10);

    assert_eq!(sql(&base), r#"SELECT * FROM "test""#);
    assert_eq!(sql(&filtered), r#"SELECT * FROM "test" WHERE ("a" = 1)"#);
    assert_eq!(
        sql(&limited),
        r#"SELECT * FROM "test" WHERE ("a" = 1) LIMIT 10"#
    );
}

#[test]
fn test_select_list() {
    let ds = from("test").select(("a", c("b").as_("c"), count(star())));
    assert_eq!(sql(&ds), r#"SELECT "a", "b" AS "c", COUNT(*) FROM "test""#);
    assert_eq!(
        sql(&ds.select_append("d")),
        r#"SELECT "a", "b" AS "c", COUNT(*), "d" FROM "test""#
    );
    assert_eq!(sql(&ds.select(())), r#"SELECT * FROM "test""#);
    assert_eq!(sql(&ds.clear_select()), r#"SELECT * FROM "test""#);
}

#[test]
fn test_distinct() {
    let ds = from("test");
    assert_eq!(
        sql(&ds.select_distinct("a")),
        r#"SELECT DISTINCT "a" FROM "test""#
    );
    assert_eq!(
        sql(&ds.distinct_on(("a", "b"))),
        r#"SELECT DISTINCT ON ("a", "b") * FROM "test""#
    );
    assert_eq!(sql(&ds.distinct("a").clear_distinct()), r#"SELECT * FROM "test""#);
    assert_eq!(
        ds.with_dialect("mysql").distinct_on("a").build().unwrap_err(),
        PpError::DistinctOnNotSupported("mysql".to_string())
    );
}

#[test]
fn test_where_appends_and_clears() {
    let ds = from("test")
        .where_(c("a").eq(1))
        .where_((c("b").gt(2), c("c").is_not_null()));
    assert_eq!(
        sql(&ds),
        r#"SELECT * FROM "test" WHERE (("a" = 1) AND ("b" > 2) AND ("c" IS NOT NULL))"#
    );
    assert_eq!(sql(&ds.clear_where()), r#"SELECT * FROM "test""#);
}

#[test]
fn test_where_or_groups() {
    let ds = from("test").where_(crate::or((c("a").eq(1), c("b").eq(2))));
    assert_eq!(
        sql(&ds),
        r#"SELECT * FROM "test" WHERE (("a" = 1) OR ("b" = 2))"#
    );
}

#[test]
fn test_where_sub_query() {
    let ds = from("test").where_(c("id").in_(from("other").select("id")));
    assert_eq!(
        sql(&ds),
        r#"SELECT * FROM "test" WHERE ("id" IN (SELECT "id" FROM "other"))"#
    );
}

#[test]
fn test_from_sub_queries_are_aliased() {
    let ds = from(from("test").where_(c("a").eq(1)));
    assert_eq!(
        sql(&ds),
        r#"SELECT * FROM (SELECT * FROM "test" WHERE ("a" = 1)) AS "t1""#
    );

    let ds = from((from("a"), from("b")));
    assert_eq!(
        sql(&ds),
        r#"SELECT * FROM (SELECT * FROM "a") AS "t1", (SELECT * FROM "b") AS "t2""#
    );

    let ds = from(from("a").as_("x"));
    assert_eq!(sql(&ds), r#"SELECT * FROM (SELECT * FROM "a") AS "x""#);
    assert_eq!(
        sql(&from("a").from_self()),
        r#"SELECT * FROM (SELECT * FROM "a") AS "t1""#
    );
}

#[test]
#[should_panic(expected = "unsupported from argument")]
fn test_from_rejects_values() {
    let _ = from(v(1));
}

#[test]
fn test_joins() {
    let ds = from("test").join("test2", on(i("test.fkey").eq(i("test2.id"))));
    assert_eq!(
        sql(&ds),
        r#"SELECT * FROM "test" INNER JOIN "test2" ON ("test"."fkey" = "test2"."id")"#
    );

    let ds = from("test").left_join("test2", using("id"));
    assert_eq!(
        sql(&ds),
        r#"SELECT * FROM "test" LEFT JOIN "test2" USING ("id")"#
    );

    let ds = from("test")
        .natural_join("test2")
        .cross_join("test3")
        .full_outer_join("test4", on((i("test.a").eq(i("test4.a")), i("test4.b").gt(1))));
    assert_eq!(
        sql(&ds),
        concat!(
            r#"SELECT * FROM "test" NATURAL JOIN "test2" CROSS JOIN "test3""#,
            r#" FULL OUTER JOIN "test4" ON (("test"."a" = "test4"."a") AND ("test4"."b" > 1))"#
        )
    );
}

#[test]
fn test_join_without_condition_fails() {
    let ds = from("test").join("test2", on(()));
    assert_eq!(
        ds.build().unwrap_err(),
        PpError::JoinConditionRequired("INNER JOIN".to_string())
    );
}

#[test]
fn test_lateral() {
    let sub = from("b").where_(i("b.x").eq(i("a.x"))).as_("l");
    let ds = from(("a", lateral(sub.clone())));
    assert_eq!(
        sql(&ds),
        r#"SELECT * FROM "a", LATERAL (SELECT * FROM "b" WHERE ("b"."x" = "a"."x")) AS "l""#
    );
    assert_eq!(
        ds.with_dialect("mysql").build().unwrap_err(),
        PpError::LateralNotSupported("mysql".to_string())
    );
}

#[test]
fn test_group_by_having() {
    let ds = from("test")
        .select(("a", count(star())))
        .group_by("a")
        .having(count(star()).gt(1));
    assert_eq!(
        sql(&ds),
        r#"SELECT "a", COUNT(*) FROM "test" GROUP BY "a" HAVING (COUNT(*) > 1)"#
    );
    assert_eq!(
        sql(&ds.group_by_append("b").clear_having()),
        r#"SELECT "a", COUNT(*) FROM "test" GROUP BY "a", "b""#
    );
}

#[test]
fn test_window_clause() {
    let ds = from("test")
        .select(row_number().over_name("w"))
        .window(w("w").partition_by("a"));
    assert_eq!(
        sql(&ds),
        r#"SELECT ROW_NUMBER() OVER "w" FROM "test" WINDOW "w" AS (PARTITION BY "a")"#
    );
    assert_eq!(
        from("test").window(w("")).build().unwrap_err(),
        PpError::NoWindowName
    );
}

#[test]
fn test_order_limit_offset() {
    let ds = from("test")
        .order(c("a").asc())
        .order_append(c("b").desc())
        .limit(10)
        .offset(20);
    assert_eq!(
        sql(&ds),
        r#"SELECT * FROM "test" ORDER BY "a" ASC, "b" DESC LIMIT 10 OFFSET 20"#
    );
    assert_eq!(
        sql(&ds.order_prepend(c("z").asc()).limit(0).clear_offset()),
        r#"SELECT * FROM "test" ORDER BY "z" ASC, "a" ASC, "b" DESC"#
    );
    assert_eq!(
        sql(&ds.clear_order().limit_all().offset(0)),
        r#"SELECT * FROM "test" LIMIT ALL"#
    );
}

#[test]
fn test_prepared_values() {
    let ds = from("test")
        .where_(c("a").eq("x"))
        .limit(10)
        .offset(5)
        .prepared(true);
    assert_eq!(
        ds.build().unwrap(),
        (
            r#"SELECT * FROM "test" WHERE ("a" = ?) LIMIT ? OFFSET ?"#.to_string(),
            vec![Value::from("x"), Value::UInt(10), Value::UInt(5)]
        )
    );
    assert!(ds.is_prepared());
    assert!(!from("test").is_prepared());
}

#[test]
fn test_locks() {
    let ds = from("test");
    assert_eq!(
        sql(&ds.for_update(WaitOption::Wait, ())),
        r#"SELECT * FROM "test" FOR UPDATE"#
    );
    assert_eq!(
        sql(&ds.for_share(WaitOption::NoWait, "test")),
        r#"SELECT * FROM "test" FOR SHARE OF "test" NOWAIT"#
    );
    assert_eq!(
        sql(&ds.for_no_key_update(WaitOption::SkipLocked, ("a", "b"))),
        r#"SELECT * FROM "test" FOR NO KEY UPDATE OF "a", "b" SKIP LOCKED"#
    );
    assert_eq!(
        sql(&ds.for_key_share(WaitOption::Wait, ()).clear_for()),
        r#"SELECT * FROM "test""#
    );
}

#[test]
fn test_compounds() {
    assert_eq!(
        sql(&from("a").union(from("b"))),
        r#"SELECT * FROM "a" UNION (SELECT * FROM "b")"#
    );
    assert_eq!(
        sql(&from("a").intersect_all(from("b"))),
        r#"SELECT * FROM "a" INTERSECT ALL (SELECT * FROM "b")"#
    );
    assert_eq!(
        sql(&from("a").union_all(from("b").order(c("x").asc()))),
        r#"SELECT * FROM "a" UNION ALL (SELECT * FROM (SELECT * FROM "b" ORDER BY "x" ASC) AS "t1")"#
    );
    let sqlite = crate::dialect("sqlite3");
    assert_eq!(
        sql(&sqlite.from("a").union(sqlite.from("b"))),
        "SELECT * FROM `a` UNION SELECT * FROM `b`"
    );
}

#[test]
fn test_common_tables() {
    let ds = from("t").with("t", from("x").where_(c("a").gt(1)));
    assert_eq!(
        sql(&ds),
        r#"WITH t AS (SELECT * FROM "x" WHERE ("a" > 1)) SELECT * FROM "t""#
    );
    assert_eq!(
        ds.with_dialect("mysql").build().unwrap_err(),
        PpError::CteNotSupported("mysql".to_string())
    );
    let recursive = from("t").with_recursive("t(n)", from("x"));
    assert_eq!(
        recursive.with_dialect("sqlserver").build().unwrap_err(),
        PpError::CteNotSupported("sqlserver".to_string())
    );
}

#[test]
fn test_sticky_error_first_wins() {
    let ds = from("test")
        .set_error(PpError::new("first"))
        .set_error(PpError::new("second"))
        .where_(c("a").eq(1));
    assert_eq!(ds.error(), Some(&PpError::new("first")));
    assert_eq!(ds.build().unwrap_err(), PpError::new("first"));
}

#[test]
fn test_sticky_error_flows_through_sub_queries() {
    let inner = from("x").set_error(PpError::new("inner"));
    assert_eq!(from(inner.clone()).build().unwrap_err(), PpError::new("inner"));
    assert_eq!(inner.update().error(), Some(&PpError::new("inner")));
    assert_eq!(inner.delete().build().unwrap_err(), PpError::new("inner"));
}

#[test]
fn test_build_errors_do_not_stick() {
    let ds = from("test").distinct_on("a").with_dialect("mysql");
    assert!(ds.build().is_err());
    assert!(ds.error().is_none());
    assert!(ds.with_dialect("postgres").build().is_ok());
}

#[test]
fn test_select_transitions() {
    let base = from("test")
        .where_(c("a").eq(1))
        .order(c("a").asc())
        .limit(5);
    assert_eq!(
        sql(&base.delete()),
        r#"DELETE FROM "test" WHERE ("a" = 1) ORDER BY "a" ASC LIMIT 5"#
    );
    assert_eq!(
        sql(&base.update().set(Record::new().with("b", 2))),
        r#"UPDATE "test" SET "b"=2 WHERE ("a" = 1) ORDER BY "a" ASC LIMIT 5"#
    );
    assert_eq!(
        sql(&base.with_dialect("postgres").update().set(Record::new().with("b", 2))),
        r#"UPDATE "test" SET "b"=2 WHERE ("a" = 1)"#
    );
    assert_eq!(
        sql(&base.insert().rows(Record::new().with("a", 1))),
        r#"INSERT INTO "test" ("a") VALUES (1)"#
    );
    assert_eq!(sql(&from(("a", "b")).truncate()), r#"TRUNCATE "a", "b""#);
    assert!(base.prepared(true).delete().is_prepared());
    assert_eq!(base.with_dialect("mysql").insert().dialect().name(), "mysql");
}

#[test]
fn test_insert_rows() {
    let ds = insert("items").rows(vec![
        Record::new().with("name", "a").with("qty", 1),
        Record::new().with("name", "b").with("qty", 2),
    ]);
    assert_eq!(
        sql(&ds),
        r#"INSERT INTO "items" ("name", "qty") VALUES ('a', 1), ('b', 2)"#
    );
    assert_eq!(sql(&ds.clear_rows()), r#"INSERT INTO "items" DEFAULT VALUES"#);
}

#[test]
fn test_insert_cols_vals() {
    let ds = insert("items")
        .cols(("address", "name"))
        .vals(vec![vec![v("111"), v("T1")]])
        .vals(vec![vec![v("112"), v("T2")]]);
    assert_eq!(
        sql(&ds),
        r#"INSERT INTO "items" ("address", "name") VALUES ('111', 'T1'), ('112', 'T2')"#
    );

    let ragged = insert("items")
        .cols(("a", "b"))
        .vals(vec![vec![v(1), v(2)], vec![v(3)]]);
    assert_eq!(
        ragged.build().unwrap_err(),
        PpError::RowLengthMismatch {
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn test_insert_row_validation() {
    let mixed = insert("items").rows((
        Record::new().with("a", 1),
        std::collections::BTreeMap::from([("a", 2)]),
    ));
    assert_eq!(
        mixed.build().unwrap_err(),
        PpError::RowTypeMismatch {
            expected: "pp.Record".to_string(),
            got: "map".to_string()
        }
    );

    let keys = insert("items").rows(vec![row(&[("a", 1)]), row(&[("b", 2)])]);
    assert_eq!(
        keys.build().unwrap_err(),
        PpError::RowKeyMismatch {
            expected: r#"["a"]"#.to_string(),
            got: r#"["b"]"#.to_string()
        }
    );

    assert_eq!(
        insert("items").rows(1i32).build().unwrap_err(),
        PpError::UnsupportedInsertShape("int32".to_string())
    );
}

#[test]
fn test_insert_from_query() {
    let ds = insert("items")
        .cols(("a", "b"))
        .from_query(from("other").select(("a", "b")));
    assert_eq!(
        sql(&ds),
        r#"INSERT INTO "items" ("a", "b") SELECT "a", "b" FROM "other""#
    );
}

#[test]
#[should_panic(expected = "incompatible dialects")]
fn test_insert_from_query_rejects_other_dialect() {
    let _ = crate::dialect("mysql")
        .insert("items")
        .from_query(crate::dialect("postgres").from("other"));
}

#[test]
#[should_panic(expected = "unsupported table type")]
fn test_insert_rejects_values() {
    let _ = insert(v(1));
}

#[test]
fn test_insert_returning_and_alias() {
    let ds = insert("items").rows(Record::new().with("a", 1)).returning("id");
    assert_eq!(
        sql(&ds),
        r#"INSERT INTO "items" ("a") VALUES (1) RETURNING "id""#
    );
    assert!(ds.returns_columns());
    assert_eq!(
        ds.with_dialect("mysql").build().unwrap_err(),
        PpError::ReturningNotSupported("mysql".to_string())
    );
    assert_eq!(
        sql(&insert("items").as_("new").rows(Record::new().with("a", 1))),
        r#"INSERT INTO "items" ("a") VALUES (1) AS "new""#
    );
}

#[test]
fn test_insert_on_conflict() {
    let ds = insert("items").rows(Record::new().with("a", 1));
    assert_eq!(
        sql(&ds.on_conflict(do_nothing())),
        r#"INSERT INTO "items" ("a") VALUES (1) ON CONFLICT DO NOTHING"#
    );
    assert_eq!(
        sql(&ds.on_conflict(do_nothing()).with_dialect("mysql")),
        "INSERT IGNORE INTO `items` (`a`) VALUES (1)"
    );
    assert_eq!(
        sql(&ds.on_conflict(do_nothing()).with_dialect("sqlite3")),
        "INSERT OR IGNORE INTO `items` (`a`) VALUES (1)"
    );
    assert_eq!(
        sql(&ds.on_conflict(do_update("ON CONSTRAINT items_pkey", c("a").set(2)))),
        r#"INSERT INTO "items" ("a") VALUES (1) ON CONFLICT ON CONSTRAINT items_pkey DO UPDATE SET "a"=2"#
    );
    assert_eq!(
        sql(&ds.on_conflict(do_update("a", c("a").set(2))).with_dialect("mysql")),
        "INSERT INTO `items` (`a`) VALUES (1) ON DUPLICATE KEY UPDATE `a`=2"
    );
    assert_eq!(
        ds.on_conflict(do_update("a", c("a").set(2)).where_(c("b").eq(1)))
            .with_dialect("mysql")
            .build()
            .unwrap_err(),
        PpError::ConflictWhereNotSupported("mysql".to_string())
    );
    assert_eq!(sql(&ds.on_conflict(do_nothing()).clear_on_conflict()), sql(&ds));
}

#[test]
fn test_update() {
    let ds = update("items")
        .set(Record::new().with("name", "x").with("qty", 2))
        .where_(c("id").eq(1));
    assert_eq!(
        sql(&ds),
        r#"UPDATE "items" SET "name"='x',"qty"=2 WHERE ("id" = 1)"#
    );
    assert_eq!(
        sql(&update("items").set([c("a").set(1), c("b").set(default_value())])),
        r#"UPDATE "items" SET "a"=1,"b"=DEFAULT"#
    );
    assert_eq!(
        sql(&ds.order(c("id").asc()).limit(1).returning("id")),
        r#"UPDATE "items" SET "name"='x',"qty"=2 WHERE ("id" = 1) ORDER BY "id" ASC LIMIT 1 RETURNING "id""#
    );
}

#[test]
fn test_update_from() {
    let ds = update("a")
        .set(Record::new().with("x", 1))
        .from("b")
        .where_(i("a.id").eq(i("b.id")));
    assert_eq!(
        sql(&ds),
        r#"UPDATE "a" SET "x"=1 FROM "b" WHERE ("a"."id" = "b"."id")"#
    );
}

#[test]
fn test_update_errors() {
    assert_eq!(update("items").build().unwrap_err(), PpError::NoSetValues);
    assert_eq!(
        update("items").set(Record::new()).build().unwrap_err(),
        PpError::NoUpdateValues
    );
    assert_eq!(
        update("items").set("x").build().unwrap_err(),
        PpError::UnsupportedUpdateShape("string".to_string())
    );
}

#[test]
#[should_panic(expected = "unsupported table type")]
fn test_update_rejects_values() {
    let _ = update(v(1));
}

#[test]
fn test_delete() {
    let ds = delete("items")
        .where_(c("id").eq(1))
        .order(c("id").desc())
        .limit(1)
        .returning(star());
    assert_eq!(
        sql(&ds),
        r#"DELETE FROM "items" WHERE ("id" = 1) ORDER BY "id" DESC LIMIT 1 RETURNING *"#
    );
    assert_eq!(
        sql(&ds.with_dialect("postgres")),
        r#"DELETE FROM "items" WHERE ("id" = 1) RETURNING *"#
    );
    assert_eq!(
        sql(&ds.clear_where().clear_order().clear_limit().returning(())),
        r#"DELETE FROM "items""#
    );
}

#[test]
#[should_panic(expected = "unsupported table type")]
fn test_delete_rejects_non_identifiers() {
    let _ = delete(l("items"));
}

#[test]
fn test_truncate() {
    let ds = truncate("items");
    assert_eq!(sql(&ds), r#"TRUNCATE "items""#);
    assert_eq!(sql(&ds.cascade()), r#"TRUNCATE "items" CASCADE"#);
    assert_eq!(sql(&ds.restrict()), r#"TRUNCATE "items" RESTRICT"#);
    assert_eq!(sql(&ds.cascade().restrict()), r#"TRUNCATE "items" CASCADE"#);
    assert_eq!(
        sql(&ds.identity("restart").cascade().no_cascade()),
        r#"TRUNCATE "items" RESTART IDENTITY"#
    );
    assert_eq!(
        truncate(()).build().unwrap_err(),
        PpError::NoSourceFor("truncate".to_string())
    );
}

#[test]
fn test_literal_args_bind_as_values() {
    let ds = from("t").where_(lit("x = ?", "bob"));
    assert_eq!(sql(&ds), r#"SELECT * FROM "t" WHERE x = 'bob'"#);
    assert_eq!(
        ds.prepared(true).build().unwrap(),
        (
            r#"SELECT * FROM "t" WHERE x = ?"#.to_string(),
            vec![Value::from("bob")]
        )
    );

    let ds = from("t").select(func("COALESCE", (c("a"), "fallback")));
    assert_eq!(sql(&ds), r#"SELECT COALESCE("a", 'fallback') FROM "t""#);
}

#[test]
fn test_expression_embeds_dataset() {
    let sub = from("other").select(count(star())).as_("n");
    let ds = from("test").select(("a", sub.expression()));
    assert_eq!(
        sql(&ds),
        r#"SELECT "a", (SELECT COUNT(*) FROM "other") AS "n" FROM "test""#
    );
}

struct Recorder;

#[async_trait::async_trait]
impl Driver for Recorder {
    async fn exec_context(&self, _sql: &str, args: &[Value]) -> PpResult<u64> {
        Ok(args.len() as u64)
    }

    async fn query_context(&self, sql: &str, _args: &[Value]) -> PpResult<Rows> {
        Ok(Rows::new(sql.to_string()))
    }
}

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(f)
}

#[test]
fn test_executor_forwards_build_output() {
    let db = crate::dialect("postgres").db(Arc::new(Recorder));
    let ds = db.from("test").where_(c("a").eq(1)).prepared(true);
    let executor = ds.executor();
    assert_eq!(executor.to_sql().unwrap().0, r#"SELECT * FROM "test" WHERE ("a" = $1)"#);
    assert_eq!(block_on(executor.exec()), Ok(1));

    let rows = block_on(db.delete("test").executor().query()).unwrap();
    assert_eq!(rows.downcast::<String>().unwrap(), r#"DELETE FROM "test""#);
}

#[test]
fn test_executor_reports_errors() {
    let unbound = from("test").executor();
    assert_eq!(block_on(unbound.exec()), Err(PpError::ExecutorMissing));

    let broken = from("test")
        .with_driver(DriverHandle::new(Recorder))
        .set_error(PpError::new("broken"));
    assert_eq!(
        block_on(broken.executor().exec()),
        Err(PpError::new("broken"))
    );
}
