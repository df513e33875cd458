//! Dataset façades.
//!
//! A dataset couples one statement's clause container with a dialect, a
//! prepared flag, an optional driver handle and a sticky error slot. Every
//! builder method takes `&self` and returns a modified copy, so a dataset
//! can be shared and extended from several places:
//!
//! ```ignore
//! let base = pp::from("users").where_(pp::c("active").is_true());
//! let admins = base.where_(pp::c("role").eq("admin"));
//! let (sql, args) = admins.build()?;
//! ```
//!
//! Invalid input found while chaining is stored in the sticky slot; the first
//! error wins and every later `build()` returns it.

mod delete;
mod insert;
mod select;
mod truncate;
mod update;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::dialect::Dialect;
use crate::error::{PpError, PpResult};
use crate::exec::{DriverHandle, QueryExecutor};
use crate::exp::{Appendable, AppendableExpression, Expr};
use crate::sb::SqlBuilder;
use crate::sqlgen::SqlGenerator;
use crate::value::Value;

pub use delete::DeleteDataset;
pub use insert::InsertDataset;
pub use select::SelectDataset;
pub use truncate::TruncateDataset;
pub use update::UpdateDataset;

/// Behavior shared by every dataset.
pub trait Dataset: AppendableExpression + Clone + 'static {
    /// Statement keyword used in build logs.
    const STATEMENT: &'static str;

    fn dialect(&self) -> &Dialect;

    fn is_prepared(&self) -> bool;

    /// The sticky error, if one was recorded.
    fn error(&self) -> Option<&PpError>;

    fn driver(&self) -> Option<&DriverHandle>;

    /// Render the statement's fragments without consulting the sticky slot.
    #[doc(hidden)]
    fn generate(&self, generator: &SqlGenerator<'_>, b: &mut SqlBuilder);

    /// Render the statement: `(sql, args)` or the first error.
    fn build(&self) -> PpResult<(String, Vec<Value>)> {
        let mut b = SqlBuilder::new(self.is_prepared());
        self.append_sql(&mut b);
        let built = b.finish();
        #[cfg(feature = "tracing")]
        log_build(Self::STATEMENT, self.dialect(), self.is_prepared(), &built);
        built
    }

    /// Pair the build output with the bound driver.
    fn executor(&self) -> QueryExecutor {
        QueryExecutor::new(self.build(), self.driver().cloned())
    }

    /// This dataset as a sub-query expression.
    fn expression(&self) -> Expr {
        Expr::Query(Arc::new(self.clone()))
    }
}

#[cfg(feature = "tracing")]
fn log_build(
    statement: &'static str,
    dialect: &Dialect,
    prepared: bool,
    built: &PpResult<(String, Vec<Value>)>,
) {
    match built {
        Ok((sql, args)) => tracing::debug!(
            target: "pp.sql",
            statement,
            dialect = dialect.name(),
            prepared,
            args = ?args,
            sql = %sql,
            "built statement",
        ),
        Err(err) => tracing::debug!(
            target: "pp.sql",
            statement,
            dialect = dialect.name(),
            prepared,
            error = %err,
            "statement build failed",
        ),
    }
}

/// Shared `append_sql` body: replay the sticky error or render.
fn append_dataset<D: Dataset>(dataset: &D, b: &mut SqlBuilder) {
    if let Some(err) = dataset.error() {
        b.set_error(err.clone());
        return;
    }
    dataset.generate(&SqlGenerator::new(dataset.dialect()), b);
}

/// Conversion into a sub-query handle (CTE bodies, LATERAL, compounds).
pub trait IntoAppendable {
    fn into_appendable(self) -> Appendable;
}

impl IntoAppendable for Appendable {
    fn into_appendable(self) -> Appendable {
        self
    }
}

/// Builder methods every dataset carries, generated per dataset type.
macro_rules! dataset_common {
    ($ds:ty, $keyword:literal) => {
        impl $ds {
            /// Copy bound to the dialect registered under `name`.
            pub fn with_dialect(&self, name: &str) -> Self {
                self.set_dialect($crate::dialect::get_dialect(name))
            }

            pub fn set_dialect(&self, dialect: $crate::dialect::Dialect) -> Self {
                let mut next = self.clone();
                next.dialect = dialect;
                next
            }

            /// Copy rendering values as placeholders (`true`) or inline literals.
            pub fn prepared(&self, prepared: bool) -> Self {
                let mut next = self.clone();
                next.prepared = prepared;
                next
            }

            /// Copy bound to a driver for [`Dataset::executor`].
            pub fn with_driver(&self, driver: impl Into<$crate::exec::DriverHandle>) -> Self {
                let mut next = self.clone();
                next.driver = Some(driver.into());
                next
            }

            /// Copy with `err` in the sticky slot unless one is already there.
            pub fn set_error(&self, err: $crate::error::PpError) -> Self {
                let mut next = self.clone();
                next.err.get_or_insert(err);
                next
            }
        }

        impl $crate::dataset::Dataset for $ds {
            const STATEMENT: &'static str = $keyword;

            fn dialect(&self) -> &$crate::dialect::Dialect {
                &self.dialect
            }

            fn is_prepared(&self) -> bool {
                self.prepared
            }

            fn error(&self) -> Option<&$crate::error::PpError> {
                self.err.as_ref()
            }

            fn driver(&self) -> Option<&$crate::exec::DriverHandle> {
                self.driver.as_ref()
            }

            fn generate(
                &self,
                generator: &$crate::sqlgen::SqlGenerator<'_>,
                b: &mut $crate::sb::SqlBuilder,
            ) {
                self.render(generator, b)
            }
        }

        impl $crate::exp::AppendableExpression for $ds {
            fn append_sql(&self, b: &mut $crate::sb::SqlBuilder) {
                $crate::dataset::append_dataset(self, b)
            }

            fn alias(&self) -> Option<&$crate::exp::IdentifierExpression> {
                self.alias_ident()
            }

            fn returns_columns(&self) -> bool {
                self.has_result_columns()
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        impl $crate::dataset::IntoAppendable for $ds {
            fn into_appendable(self) -> $crate::exp::Appendable {
                std::sync::Arc::new(self)
            }
        }

        impl $crate::dataset::IntoAppendable for &$ds {
            fn into_appendable(self) -> $crate::exp::Appendable {
                std::sync::Arc::new(self.clone())
            }
        }

        impl $crate::exp::IntoExpr for $ds {
            fn into_expr(self) -> $crate::exp::Expr {
                $crate::exp::Expr::Query(std::sync::Arc::new(self))
            }
        }

        impl $crate::exp::IntoExpr for &$ds {
            fn into_expr(self) -> $crate::exp::Expr {
                $crate::exp::Expr::Query(std::sync::Arc::new(self.clone()))
            }
        }

        impl $crate::exp::IntoExprs for $ds {
            fn into_exprs(self) -> Vec<$crate::exp::Expr> {
                vec![$crate::exp::IntoExpr::into_expr(self)]
            }
        }

        impl $crate::exp::IntoExprs for &$ds {
            fn into_exprs(self) -> Vec<$crate::exp::Expr> {
                vec![$crate::exp::IntoExpr::into_expr(self)]
            }
        }

        impl $crate::exp::IntoTable for $ds {
            fn into_table(self) -> $crate::exp::Expr {
                $crate::exp::IntoExpr::into_expr(self)
            }
        }

        impl $crate::exp::IntoTable for &$ds {
            fn into_table(self) -> $crate::exp::Expr {
                $crate::exp::IntoExpr::into_expr(self)
            }
        }
    };
}

pub(crate) use dataset_common;

/// Panic with a programming error's message.
#[track_caller]
fn programming_error(err: PpError) -> ! {
    panic!("{err}")
}
