use std::collections::BTreeMap;

use super::{DialectOptions, DialectRegistration, FragmentKind};
use crate::exp::{BitwiseOperation, BooleanOperation};

pub fn options() -> DialectOptions {
    use FragmentKind as F;
    DialectOptions {
        use_literal_is_bools: false,
        boolean_data_type_supported: false,
        supports_return: false,
        supports_order_by_on_update: false,
        supports_limit_on_update: false,
        supports_order_by_on_delete: false,
        supports_limit_on_delete: false,
        supports_conflict_update_where: false,
        supports_conflict_target: false,
        supports_with_cte: false,
        supports_with_cte_recursive: false,
        supports_distinct_on: false,
        supports_window_function: false,
        supports_lateral: false,
        surround_limit_with_parentheses: true,

        placeholder_fragment: "@p",
        include_placeholder_num: true,
        true_literal: "1",
        false_literal: "0",
        time_format: "%Y-%m-%d %H:%M:%S%.6f",

        boolean_operator_lookup: BTreeMap::from([
            (BooleanOperation::Eq, "="),
            (BooleanOperation::Neq, "!="),
            (BooleanOperation::Gt, ">"),
            (BooleanOperation::Gte, ">="),
            (BooleanOperation::Lt, "<"),
            (BooleanOperation::Lte, "<="),
            (BooleanOperation::In, "IN"),
            (BooleanOperation::NotIn, "NOT IN"),
            (BooleanOperation::Is, "IS"),
            (BooleanOperation::IsNot, "IS NOT"),
            (BooleanOperation::Like, "LIKE"),
            (BooleanOperation::NotLike, "NOT LIKE"),
        ]),
        bitwise_operator_lookup: BTreeMap::from([
            (BitwiseOperation::Inversion, "~"),
            (BitwiseOperation::Or, "|"),
            (BitwiseOperation::And, "&"),
            (BitwiseOperation::Xor, "^"),
        ]),

        select_sql_order: vec![
            F::CommonTable,
            F::SelectWithLimit,
            F::From,
            F::Join,
            F::Where,
            F::GroupBy,
            F::Having,
            F::Compounds,
            F::OrderWithOffsetFetch,
            F::For,
        ],
        ..DialectOptions::default()
    }
}

inventory::submit! {
    DialectRegistration {
        name: "sqlserver",
        options,
    }
}
