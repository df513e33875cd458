use std::sync::Arc;

use super::{IntoAppendable, SelectDataset, dataset_common, programming_error};
use crate::config;
use crate::dialect::Dialect;
use crate::error::PpError;
use crate::exec::DriverHandle;
use crate::exp::{
    ColumnListExpression, CommonTableExpression, ConflictExpression, Expr, IdentifierExpression,
    InsertClauses, IntoExprs, IntoIdentifier, IntoTable,
};
use crate::reflect::IntoRows;
use crate::sb::SqlBuilder;
use crate::sqlgen::SqlGenerator;

/// An INSERT statement.
///
/// The body comes from the first of these that is set: `rows`, `cols` with
/// `vals`, `from_query`. With none of them the statement inserts
/// `DEFAULT VALUES`.
#[derive(Debug, Clone)]
pub struct InsertDataset {
    dialect: Dialect,
    clauses: InsertClauses,
    prepared: bool,
    driver: Option<DriverHandle>,
    err: Option<PpError>,
}

dataset_common!(InsertDataset, "INSERT");

impl Default for InsertDataset {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl InsertDataset {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: InsertClauses::new(),
            prepared: config::default_prepared(),
            driver: None,
            err: None,
        }
    }

    fn copy(&self, clauses: InsertClauses) -> Self {
        Self {
            clauses,
            ..self.clone()
        }
    }

    pub(crate) fn carry(&self, driver: Option<DriverHandle>, err: Option<PpError>) -> Self {
        Self {
            driver,
            err,
            ..self.clone()
        }
    }

    pub(crate) fn carry_common_tables(&self, common_tables: &[CommonTableExpression]) -> Self {
        self.copy(self.clauses.set_common_tables(common_tables.to_vec()))
    }

    pub fn get_clauses(&self) -> &InsertClauses {
        &self.clauses
    }

    fn render(&self, generator: &SqlGenerator<'_>, b: &mut SqlBuilder) {
        generator.insert_sql(b, &self.clauses);
    }

    fn alias_ident(&self) -> Option<&IdentifierExpression> {
        None
    }

    fn has_result_columns(&self) -> bool {
        self.clauses.has_returning()
    }

    /// Set the target table.
    ///
    /// # Panics
    ///
    /// Panics with [`PpError::UnsupportedIntoType`] for values that cannot
    /// name a table.
    pub fn into_(&self, table: impl IntoTable) -> Self {
        let table = table.into_table();
        if !table.is_table_like() {
            programming_error(PpError::UnsupportedIntoType);
        }
        self.copy(self.clauses.set_into(table))
    }

    /// Replace the column list.
    pub fn cols(&self, cols: impl IntoExprs) -> Self {
        let cols = cols.into_exprs();
        let cols = (!cols.is_empty()).then(|| ColumnListExpression::new(cols));
        self.copy(self.clauses.set_cols(cols))
    }

    pub fn cols_append(&self, cols: impl IntoExprs) -> Self {
        self.copy(self.clauses.cols_append(cols.into_exprs()))
    }

    pub fn clear_cols(&self) -> Self {
        self.copy(self.clauses.set_cols(None))
    }

    /// Append value rows; each row pairs positionally with [`Self::cols`].
    ///
    /// See [`crate::vals!`] for converting plain Rust values.
    pub fn vals(&self, rows: Vec<Vec<Expr>>) -> Self {
        self.copy(self.clauses.vals_append(rows))
    }

    pub fn clear_vals(&self) -> Self {
        self.copy(self.clauses.set_vals(Vec::new()))
    }

    /// Replace the rows with records, maps or derived structs. Columns are
    /// taken from the rows, sorted by name.
    pub fn rows(&self, rows: impl IntoRows) -> Self {
        self.copy(self.clauses.set_rows(rows.into_rows()))
    }

    pub fn clear_rows(&self) -> Self {
        self.copy(self.clauses.set_rows(Vec::new()))
    }

    /// `INSERT INTO t [(cols)] SELECT ...`
    ///
    /// # Panics
    ///
    /// Panics with [`PpError::IncompatibleDialects`] when both datasets carry
    /// different non-default dialects.
    pub fn from_query(&self, query: SelectDataset) -> Self {
        let select_dialect = super::Dataset::dialect(&query);
        if !self.dialect.is_default()
            && !select_dialect.is_default()
            && self.dialect.name() != select_dialect.name()
        {
            programming_error(PpError::IncompatibleDialects {
                insert: self.dialect.name().to_string(),
                select: select_dialect.name().to_string(),
            });
        }
        self.copy(self.clauses.set_from(Some(Arc::new(query))))
    }

    /// `ON CONFLICT DO NOTHING` or `... DO UPDATE SET ...`.
    pub fn on_conflict(&self, conflict: impl Into<ConflictExpression>) -> Self {
        self.copy(self.clauses.set_on_conflict(Some(conflict.into())))
    }

    pub fn clear_on_conflict(&self) -> Self {
        self.copy(self.clauses.set_on_conflict(None))
    }

    /// `INSERT INTO t ... AS alias`
    pub fn as_(&self, alias: impl IntoIdentifier) -> Self {
        self.copy(self.clauses.set_alias(Some(alias.into_identifier())))
    }

    pub fn returning(&self, cols: impl IntoExprs) -> Self {
        self.copy(self.clauses.set_returning(ColumnListExpression::new(cols)))
    }

    pub fn with(&self, name: &str, sub_query: impl IntoAppendable) -> Self {
        let cte = CommonTableExpression::new(false, name, sub_query.into_appendable());
        self.copy(self.clauses.common_tables_append(cte))
    }

    pub fn with_recursive(&self, name: &str, sub_query: impl IntoAppendable) -> Self {
        let cte = CommonTableExpression::new(true, name, sub_query.into_appendable());
        self.copy(self.clauses.common_tables_append(cte))
    }
}
