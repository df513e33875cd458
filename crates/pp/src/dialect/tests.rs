use super::*;

#[test]
fn builtins_are_registered() {
    for name in ["default", "mysql", "postgres", "sqlite3", "sqlserver"] {
        assert_eq!(get_dialect(name).name(), name);
    }
}

#[test]
fn lookup_is_case_insensitive() {
    assert_eq!(get_dialect("MySQL").name(), "mysql");
    assert_eq!(get_dialect("Postgres").options().placeholder_fragment, "$");
}

#[test]
fn unknown_names_fall_back_to_default() {
    let d = get_dialect("no-such-dialect");
    assert_eq!(d.name(), "default");
    assert!(d.is_default());
}

#[test]
fn register_and_deregister_round_trip() {
    let opts = DialectOptions {
        quote_rune: '[',
        ..DialectOptions::default()
    };
    register_dialect("Custom-Round-Trip", opts);
    let d = get_dialect("custom-round-trip");
    assert_eq!(d.name(), "custom-round-trip");
    assert_eq!(d.options().quote_rune, '[');

    deregister_dialect("CUSTOM-ROUND-TRIP");
    assert_eq!(get_dialect("custom-round-trip").name(), "default");
}

#[test]
fn dialect_option_differences() {
    let mysql = get_dialect("mysql");
    assert_eq!(mysql.options().quote_rune, '`');
    assert!(!mysql.options().supports_return);
    assert!(!mysql.options().use_from_clause_for_multiple_update_tables);
    assert_eq!(
        mysql.options().boolean_operator_lookup[&BooleanOperation::Like],
        "LIKE BINARY"
    );

    let sqlite = get_dialect("sqlite3");
    assert!(!sqlite.options().supports_multiple_update_tables);
    assert!(!sqlite.options().wrap_compounds_in_parens);
    assert!(
        !sqlite
            .options()
            .bitwise_operator_lookup
            .contains_key(&BitwiseOperation::Xor)
    );

    let sqlserver = get_dialect("sqlserver");
    assert_eq!(sqlserver.options().placeholder_fragment, "@p");
    assert!(sqlserver.options().include_placeholder_num);
    assert!(
        sqlserver
            .options()
            .select_sql_order
            .contains(&FragmentKind::SelectWithLimit)
    );
}

#[test]
fn fragment_kind_display() {
    assert_eq!(FragmentKind::InsertBegin.to_string(), "InsertBeginSQLFragment");
}
