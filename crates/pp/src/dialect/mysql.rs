use std::collections::BTreeMap;

use super::{DialectOptions, DialectRegistration};
use crate::exp::{BitwiseOperation, BooleanOperation};

pub fn options() -> DialectOptions {
    use BooleanOperation::*;
    let mut opts = DialectOptions {
        supports_return: false,
        supports_conflict_update_where: false,
        supports_insert_ignore_syntax: true,
        supports_conflict_target: false,
        supports_with_cte: false,
        supports_with_cte_recursive: false,
        supports_distinct_on: false,
        supports_window_function: false,
        supports_lateral: false,
        use_from_clause_for_multiple_update_tables: false,

        placeholder_fragment: "?",
        quote_rune: '`',
        default_values_fragment: " VALUES ()",
        true_literal: "1",
        false_literal: "0",
        time_format: "%Y-%m-%d %H:%M:%S%.6f",

        insert_ignore_clause: "INSERT IGNORE INTO",
        conflict_fragment: "",
        conflict_do_update_fragment: " ON DUPLICATE KEY UPDATE ",
        conflict_do_nothing_fragment: "",

        escaped_runes: BTreeMap::from([
            ('\'', "\\'"),
            ('"', "\\\""),
            ('\\', "\\\\"),
            ('\n', "\\n"),
            ('\r', "\\r"),
            ('\0', "\\x00"),
            ('\x1a', "\\x1a"),
        ]),
        ..DialectOptions::default()
    };

    opts.boolean_operator_lookup.extend([
        (Like, "LIKE BINARY"),
        (NotLike, "NOT LIKE BINARY"),
        (ILike, "LIKE"),
        (NotILike, "NOT LIKE"),
        (RegexpLike, "REGEXP BINARY"),
        (RegexpNotLike, "NOT REGEXP BINARY"),
        (RegexpILike, "REGEXP"),
        (RegexpNotILike, "NOT REGEXP"),
    ]);
    opts.bitwise_operator_lookup
        .insert(BitwiseOperation::Xor, "^");
    opts
}

inventory::submit! {
    DialectRegistration {
        name: "mysql",
        options,
    }
}
