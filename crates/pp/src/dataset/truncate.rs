use super::dataset_common;
use crate::config;
use crate::dialect::Dialect;
use crate::error::PpError;
use crate::exec::DriverHandle;
use crate::exp::{
    ColumnListExpression, IdentifierExpression, IntoExprs, TruncateClauses, TruncateOptions,
};
use crate::sb::SqlBuilder;
use crate::sqlgen::SqlGenerator;

/// A TRUNCATE statement.
#[derive(Debug, Clone)]
pub struct TruncateDataset {
    dialect: Dialect,
    clauses: TruncateClauses,
    prepared: bool,
    driver: Option<DriverHandle>,
    err: Option<PpError>,
}

dataset_common!(TruncateDataset, "TRUNCATE");

impl Default for TruncateDataset {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl TruncateDataset {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: TruncateClauses::new(),
            prepared: config::default_prepared(),
            driver: None,
            err: None,
        }
    }

    fn copy(&self, clauses: TruncateClauses) -> Self {
        Self {
            clauses,
            ..self.clone()
        }
    }

    fn copy_options(&self, f: impl FnOnce(&mut TruncateOptions)) -> Self {
        let mut options = self.clauses.options().clone();
        f(&mut options);
        self.copy(self.clauses.set_options(options))
    }

    pub(crate) fn carry(&self, driver: Option<DriverHandle>, err: Option<PpError>) -> Self {
        Self {
            driver,
            err,
            ..self.clone()
        }
    }

    pub fn get_clauses(&self) -> &TruncateClauses {
        &self.clauses
    }

    fn render(&self, generator: &SqlGenerator<'_>, b: &mut SqlBuilder) {
        generator.truncate_sql(b, &self.clauses);
    }

    fn alias_ident(&self) -> Option<&IdentifierExpression> {
        None
    }

    fn has_result_columns(&self) -> bool {
        false
    }

    /// Replace the tables to truncate.
    pub fn table(&self, tables: impl IntoExprs) -> Self {
        self.copy(self.clauses.set_table(ColumnListExpression::new(tables)))
    }

    pub fn cascade(&self) -> Self {
        self.copy_options(|o| o.cascade = true)
    }

    pub fn no_cascade(&self) -> Self {
        self.copy_options(|o| o.cascade = false)
    }

    /// `RESTRICT`; ignored while CASCADE is set.
    pub fn restrict(&self) -> Self {
        self.copy_options(|o| o.restrict = true)
    }

    pub fn no_restrict(&self) -> Self {
        self.copy_options(|o| o.restrict = false)
    }

    /// `RESTART IDENTITY` or `CONTINUE IDENTITY`; an empty string clears it.
    pub fn identity(&self, identity: &str) -> Self {
        self.copy_options(|o| o.identity = identity.to_string())
    }
}
