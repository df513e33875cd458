use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{FixedOffset, TimeZone, Utc};
use pp::{Dataset, Record, Value, c, config};

static KNOBS: Mutex<()> = Mutex::new(());

/// Serialize tests that touch process-wide knobs and start from defaults.
fn knobs() -> MutexGuard<'static, ()> {
    let guard = KNOBS.lock().unwrap_or_else(PoisonError::into_inner);
    config::reset();
    guard
}

#[allow(non_snake_case)]
#[derive(Clone, Record)]
struct Person {
    #[db(column = "id")]
    person_id: i64,
    FirstName: String,
}

fn person() -> Person {
    Person {
        person_id: 1,
        FirstName: "Ada".to_string(),
    }
}

#[test]
fn default_prepared_applies_to_new_datasets() {
    let _guard = knobs();
    let before = pp::from("items").where_(c("a").eq(1));

    config::set_default_prepared(true);
    let after = pp::from("items").where_(c("a").eq(1));
    config::reset();

    assert_eq!(
        before.build().unwrap(),
        (r#"SELECT * FROM "items" WHERE ("a" = 1)"#.to_string(), vec![])
    );
    assert_eq!(
        after.build().unwrap(),
        (
            r#"SELECT * FROM "items" WHERE ("a" = ?)"#.to_string(),
            vec![Value::Int(1)]
        )
    );
}

#[test]
fn default_column_names_are_lowercased() {
    let _guard = knobs();
    assert_eq!(
        pp::insert("people").rows(person()).build().unwrap().0,
        r#"INSERT INTO "people" ("firstname", "id") VALUES ('Ada', 1)"#
    );
}

#[test]
fn rename_function_applies_to_untagged_fields() {
    let _guard = knobs();
    config::set_column_rename_function(|field: &str| format!("col_{}", field.to_lowercase()));
    let (sql, _) = pp::insert("people").rows(person()).build().unwrap();
    config::reset();

    assert_eq!(
        sql,
        r#"INSERT INTO "people" ("col_firstname", "id") VALUES ('Ada', 1)"#
    );
}

#[test]
fn ignore_untagged_fields_keeps_tagged_columns() {
    let _guard = knobs();
    config::set_ignore_untagged_fields(true);
    let insert = pp::insert("people").rows(person()).build().unwrap().0;
    let update = pp::update("people").set(person()).build().unwrap().0;
    config::reset();

    assert_eq!(insert, r#"INSERT INTO "people" ("id") VALUES (1)"#);
    assert_eq!(update, r#"UPDATE "people" SET "id"=1"#);
}

#[test]
fn time_location_converts_inline_times() {
    let _guard = knobs();
    let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let ds = pp::from("events").where_(c("at").gt(ts));

    assert_eq!(
        ds.build().unwrap().0,
        r#"SELECT * FROM "events" WHERE ("at" > '2024-01-02T03:04:05+00:00')"#
    );

    config::set_time_location(FixedOffset::east_opt(3600).unwrap());
    let shifted = ds.build().unwrap().0;
    let mysql = ds.with_dialect("mysql").build().unwrap().0;
    config::reset();

    assert_eq!(
        shifted,
        r#"SELECT * FROM "events" WHERE ("at" > '2024-01-02T04:04:05+01:00')"#
    );
    assert_eq!(
        mysql,
        "SELECT * FROM `events` WHERE (`at` > '2024-01-02 04:04:05.000000')"
    );
}
