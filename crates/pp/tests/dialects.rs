use pp::dialect::{DialectOptions, EmptyInStyle, deregister_dialect, get_dialect, register_dialect};
use pp::{Dataset, PpError, Value, c, do_nothing, do_update, i, l, record};

#[test]
fn postgres_numbers_placeholders() {
    let pg = pp::dialect("postgres");
    let (sql, args) = pg
        .from("items")
        .where_((c("a").eq(1), c("b").in_(vec![2, 3])))
        .limit(5)
        .prepared(true)
        .build()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "items" WHERE (("a" = $1) AND ("b" IN ($2, $3))) LIMIT $4"#
    );
    assert_eq!(
        args,
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::UInt(5)]
    );
}

#[test]
fn postgres_insert_returning() {
    let (sql, args) = pp::dialect("postgres")
        .insert("items")
        .rows(record! { "qty" => 3, "name" => "w" })
        .on_conflict(do_nothing())
        .returning("id")
        .prepared(true)
        .build()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "items" ("name", "qty") VALUES ($1, $2) ON CONFLICT DO NOTHING RETURNING "id""#
    );
    assert_eq!(args, vec![Value::from("w"), Value::Int(3)]);
}

#[test]
fn postgres_update_from_skips_order_and_limit() {
    let (sql, args) = pp::dialect("postgres")
        .update("a")
        .set(record! { "x" => 1 })
        .from("b")
        .where_(i("a.id").eq(i("b.id")))
        .order(c("x").asc())
        .limit(3)
        .prepared(true)
        .build()
        .unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "a" SET "x"=$1 FROM "b" WHERE ("a"."id" = "b"."id")"#
    );
    assert_eq!(args, vec![Value::Int(1)]);
}

#[test]
fn sqlserver_top_and_offset_fetch() {
    let mssql = pp::dialect("sqlserver");
    let ds = mssql.from("items").order(c("id").asc()).limit(10);
    assert_eq!(
        ds.build().unwrap().0,
        r#"SELECT TOP (10) * FROM "items" ORDER BY "id" ASC"#
    );
    assert_eq!(
        ds.offset(20).build().unwrap().0,
        r#"SELECT * FROM "items" ORDER BY "id" ASC OFFSET 20 ROWS FETCH FIRST 10 ROWS ONLY"#
    );

    let (sql, args) = ds
        .where_(c("name").eq("x"))
        .prepared(true)
        .build()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT TOP (@p1) * FROM "items" WHERE ("name" = @p2) ORDER BY "id" ASC"#
    );
    assert_eq!(args, vec![Value::UInt(10), Value::from("x")]);
}

#[test]
fn sqlserver_boolean_comparisons() {
    let (sql, _) = pp::dialect("sqlserver")
        .from("users")
        .where_((c("active").is_true(), c("deleted").is_not_true()))
        .build()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE (("active" = 1) AND ("deleted" != 1))"#
    );
}

#[test]
fn sqlserver_rejects_returning() {
    let err = pp::dialect("sqlserver")
        .delete("items")
        .returning("id")
        .build()
        .unwrap_err();
    assert_eq!(err, PpError::ReturningNotSupported("sqlserver".to_string()));
}

#[test]
fn mysql_quoting_and_escaping() {
    let (sql, _) = pp::dialect("mysql")
        .from("items")
        .where_((c("name").eq("it's"), c("code").like("a%")))
        .build()
        .unwrap();
    assert_eq!(
        sql,
        r"SELECT * FROM `items` WHERE ((`name` = 'it\'s') AND (`code` LIKE BINARY 'a%'))"
    );
}

#[test]
fn mysql_insert_variants() {
    let mysql = pp::dialect("mysql");
    assert_eq!(
        mysql.insert("items").build().unwrap().0,
        "INSERT INTO `items` VALUES ()"
    );
    assert_eq!(
        mysql
            .insert("items")
            .rows(record! { "a" => 1 })
            .on_conflict(do_nothing())
            .build()
            .unwrap()
            .0,
        "INSERT IGNORE INTO `items` (`a`) VALUES (1)"
    );
    assert_eq!(
        mysql
            .insert("items")
            .rows(record! { "a" => 1, "b" => 2 })
            .on_conflict(do_update("a", c("b").set(l("VALUES(`b`)"))))
            .build()
            .unwrap()
            .0,
        "INSERT INTO `items` (`a`, `b`) VALUES (1, 2) ON DUPLICATE KEY UPDATE `b`=VALUES(`b`)"
    );
}

#[test]
fn mysql_update_keeps_order_and_limit() {
    let (sql, _) = pp::dialect("mysql")
        .update("items")
        .set(record! { "a" => true })
        .order(c("id").desc())
        .limit(1)
        .build()
        .unwrap();
    assert_eq!(
        sql,
        "UPDATE `items` SET `a`=1 ORDER BY `id` DESC LIMIT 1"
    );
}

#[test]
fn sqlite3_statements() {
    let sqlite = pp::dialect("sqlite3");
    assert_eq!(
        sqlite
            .insert("items")
            .rows(record! { "a" => 1 })
            .on_conflict(do_nothing())
            .build()
            .unwrap()
            .0,
        "INSERT OR IGNORE INTO `items` (`a`) VALUES (1)"
    );
    assert_eq!(
        sqlite
            .from("items")
            .where_(c("flag").is_false())
            .build()
            .unwrap()
            .0,
        "SELECT * FROM `items` WHERE (`flag` IS 0)"
    );
    assert_eq!(
        sqlite.insert("items").returning("id").build().unwrap_err(),
        PpError::ReturningNotSupported("sqlite3".to_string())
    );
}

#[test]
fn registered_dialect_round_trip() {
    register_dialect(
        "Colon",
        DialectOptions {
            placeholder_fragment: ":",
            include_placeholder_num: true,
            empty_in_style: EmptyInStyle::Boolean,
            ..DialectOptions::default()
        },
    );
    assert_eq!(get_dialect("colon").name(), "colon");

    let (sql, args) = pp::dialect("COLON")
        .from("items")
        .where_((c("a").eq(1), c("b").in_(Vec::<i64>::new())))
        .prepared(true)
        .build()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "items" WHERE (("a" = :1) AND (FALSE))"#);
    assert_eq!(args, vec![Value::Int(1)]);

    deregister_dialect("colon");
    assert_eq!(get_dialect("colon").name(), "default");
}

#[test]
fn unknown_dialect_falls_back_to_default() {
    let ds = pp::from("items").with_dialect("no-such-dialect");
    assert_eq!(ds.dialect().name(), "default");
    assert_eq!(ds.build().unwrap().0, r#"SELECT * FROM "items""#);
}
