use super::{DialectOptions, DialectRegistration};

pub fn options() -> DialectOptions {
    DialectOptions {
        placeholder_fragment: "$",
        include_placeholder_num: true,
        supports_order_by_on_update: false,
        supports_limit_on_update: false,
        supports_order_by_on_delete: false,
        supports_limit_on_delete: false,
        ..DialectOptions::default()
    }
}

inventory::submit! {
    DialectRegistration {
        name: "postgres",
        options,
    }
}
