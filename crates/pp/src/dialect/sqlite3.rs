use std::collections::BTreeMap;

use super::{DialectOptions, DialectRegistration};
use crate::exp::{BitwiseOperation, BooleanOperation};

pub fn options() -> DialectOptions {
    use BooleanOperation::*;
    let mut opts = DialectOptions {
        supports_return: false,
        supports_insert_ignore_syntax: true,
        supports_multiple_update_tables: false,
        supports_distinct_on: false,
        supports_window_function: false,
        supports_lateral: false,
        wrap_compounds_in_parens: false,
        use_literal_is_bools: false,

        placeholder_fragment: "?",
        quote_rune: '`',
        true_literal: "1",
        false_literal: "0",
        time_format: "%Y-%m-%d %H:%M:%S%.6f",
        insert_ignore_clause: "INSERT OR IGNORE INTO",
        escaped_runes: BTreeMap::from([('\'', "''")]),
        ..DialectOptions::default()
    };

    opts.boolean_operator_lookup.extend([
        (ILike, "LIKE"),
        (NotILike, "NOT LIKE"),
        (RegexpLike, "REGEXP"),
        (RegexpNotLike, "NOT REGEXP"),
        (RegexpILike, "REGEXP"),
        (RegexpNotILike, "NOT REGEXP"),
    ]);
    opts.bitwise_operator_lookup = BTreeMap::from([
        (BitwiseOperation::Or, "|"),
        (BitwiseOperation::And, "&"),
        (BitwiseOperation::LeftShift, "<<"),
        (BitwiseOperation::RightShift, ">>"),
    ]);
    opts
}

inventory::submit! {
    DialectRegistration {
        name: "sqlite3",
        options,
    }
}
