//! # pp
//!
//! An immutable, fluent, multi-dialect SQL query builder.
//!
//! ## Features
//!
//! - **Immutable datasets**: every builder call returns a new dataset, so a
//!   base query can be shared and extended freely
//! - **Dialects**: `default`, `mysql`, `postgres`, `sqlite3` and `sqlserver`
//!   ship built in; register your own with [`dialect::register_dialect`]
//! - **Inline or prepared**: render values as SQL literals, or as placeholders
//!   with an argument list
//! - **Struct reflection**: `#[derive(Record)]` turns structs into INSERT rows
//!   and UPDATE payloads
//! - **Sticky errors**: the first error found while building is kept and
//!   returned from `build()`
//!
//! ## Usage
//!
//! ```ignore
//! use pp::{c, i, record};
//!
//! // SELECT
//! let (sql, _) = pp::from("users")
//!     .select(("id", "name"))
//!     .where_(c("active").is_true())
//!     .order(c("created_at").desc())
//!     .limit(10)
//!     .build()?;
//!
//! // INSERT
//! let (sql, args) = pp::dialect("postgres")
//!     .insert("users")
//!     .rows(record! { "name" => "alice", "email" => "alice@example.com" })
//!     .prepared(true)
//!     .build()?;
//!
//! // UPDATE ... FROM
//! let (sql, _) = pp::update("orders")
//!     .set(record! { "status" => "shipped" })
//!     .from("shipments")
//!     .where_(i("orders.id").eq(i("shipments.order_id")))
//!     .build()?;
//!
//! // DELETE
//! let (sql, _) = pp::delete("sessions")
//!     .where_(c("expires_at").lt(pp::l("NOW()")))
//!     .build()?;
//! ```

extern crate self as pp;

pub mod config;
pub mod dataset;
pub mod dialect;
pub mod error;
pub mod exec;
pub mod exp;
pub mod prelude;
pub mod reflect;
pub mod sb;
pub mod sqlgen;
pub mod value;

mod expressions;
mod macros;
mod wrapper;

pub use dataset::{
    Dataset, DeleteDataset, InsertDataset, IntoAppendable, SelectDataset, TruncateDataset,
    UpdateDataset,
};
pub use error::{PpError, PpResult};
pub use exec::{Driver, DriverHandle, QueryExecutor, Rows};
pub use exp::{
    Ex, ExOr, Expr, IntoArgs, IntoExpr, IntoExprs, IntoIdentifier, IntoTable, Op, Record,
    WaitOption,
};
pub use expressions::*;
pub use reflect::{DbStruct, IntoRows, IntoUpdate};
pub use value::Value;
pub use wrapper::DialectWrapper;

#[cfg(feature = "derive")]
pub use pp_derive::Record;

// Re-export inventory for dialect registrations made outside this crate
pub use inventory;

/// Dataset constructors bound to the dialect registered under `name`.
pub fn dialect(name: &str) -> DialectWrapper {
    DialectWrapper::new(name)
}

/// `SELECT * FROM tables` in the default dialect.
pub fn from(tables: impl IntoExprs) -> SelectDataset {
    SelectDataset::default().from(tables)
}

/// `SELECT cols` in the default dialect, without a FROM clause.
pub fn select(cols: impl IntoExprs) -> SelectDataset {
    SelectDataset::default().select(cols)
}

/// `INSERT INTO table` in the default dialect.
pub fn insert(table: impl IntoTable) -> InsertDataset {
    InsertDataset::default().into_(table)
}

/// `UPDATE table` in the default dialect.
pub fn update(table: impl IntoTable) -> UpdateDataset {
    UpdateDataset::default().table(table)
}

/// `DELETE FROM table` in the default dialect.
pub fn delete(table: impl IntoTable) -> DeleteDataset {
    DeleteDataset::default().from(table)
}

/// `TRUNCATE tables` in the default dialect.
pub fn truncate(tables: impl IntoExprs) -> TruncateDataset {
    TruncateDataset::default().table(tables)
}
