use super::{IntoAppendable, dataset_common, programming_error};
use crate::config;
use crate::dialect::Dialect;
use crate::error::PpError;
use crate::exec::DriverHandle;
use crate::exp::{
    ColumnListExpression, CommonTableExpression, Expr, ExpressionList, IdentifierExpression,
    IntoExpr, IntoExprs, IntoTable, OrderedExpression, UpdateClauses,
};
use crate::reflect::IntoUpdate;
use crate::sb::SqlBuilder;
use crate::sqlgen::{self, SqlGenerator};
use crate::value::Value;

/// An UPDATE statement.
#[derive(Debug, Clone)]
pub struct UpdateDataset {
    dialect: Dialect,
    clauses: UpdateClauses,
    prepared: bool,
    driver: Option<DriverHandle>,
    err: Option<PpError>,
}

dataset_common!(UpdateDataset, "UPDATE");

impl Default for UpdateDataset {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl UpdateDataset {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: UpdateClauses::new(),
            prepared: config::default_prepared(),
            driver: None,
            err: None,
        }
    }

    fn copy(&self, clauses: UpdateClauses) -> Self {
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

    pub(crate) fn carry_clauses(
        &self,
        common_tables: &[CommonTableExpression],
        where_clause: Option<&ExpressionList>,
        order: Option<&ColumnListExpression>,
        limit: Option<&Expr>,
    ) -> Self {
        self.copy(
            self.clauses
                .set_common_tables(common_tables.to_vec())
                .set_where(where_clause.cloned())
                .set_order_list(order.cloned())
                .set_limit(limit.cloned()),
        )
    }

    pub fn get_clauses(&self) -> &UpdateClauses {
        &self.clauses
    }

    fn render(&self, generator: &SqlGenerator<'_>, b: &mut SqlBuilder) {
        generator.update_sql(b, &self.clauses);
    }

    fn alias_ident(&self) -> Option<&IdentifierExpression> {
        None
    }

    fn has_result_columns(&self) -> bool {
        self.clauses.has_returning()
    }

    /// Set the table to update.
    ///
    /// # Panics
    ///
    /// Panics with [`PpError::UnsupportedUpdateTableType`] for values that
    /// cannot name a table.
    pub fn table(&self, table: impl IntoTable) -> Self {
        let table = table.into_table();
        if !table.is_table_like() {
            programming_error(PpError::UnsupportedUpdateTableType);
        }
        self.copy(self.clauses.set_table(table))
    }

    /// The SET payload: a record, a map, a derived struct or explicit
    /// `col.set(value)` assignments.
    pub fn set(&self, values: impl IntoUpdate) -> Self {
        self.copy(self.clauses.set_set_values(values.into_update()))
    }

    /// Extra tables joined into the UPDATE, rendered as `FROM` or as a comma
    /// list after the target depending on the dialect.
    pub fn from(&self, tables: impl IntoExprs) -> Self {
        self.copy(self.clauses.set_from(ColumnListExpression::new(tables)))
    }

    pub fn where_(&self, exprs: impl IntoExprs) -> Self {
        self.copy(self.clauses.where_append(exprs.into_exprs()))
    }

    pub fn clear_where(&self) -> Self {
        self.copy(self.clauses.clear_where())
    }

    pub fn order(&self, order: impl IntoIterator<Item = OrderedExpression>) -> Self {
        self.copy(self.clauses.set_order(order.into_iter().collect()))
    }

    pub fn order_append(&self, order: impl IntoIterator<Item = OrderedExpression>) -> Self {
        self.copy(self.clauses.order_append(order.into_iter().collect()))
    }

    pub fn order_prepend(&self, order: impl IntoIterator<Item = OrderedExpression>) -> Self {
        self.copy(self.clauses.order_prepend(order.into_iter().collect()))
    }

    pub fn clear_order(&self) -> Self {
        self.copy(self.clauses.clear_order())
    }

    /// `LIMIT n`; zero clears the limit.
    pub fn limit(&self, limit: u64) -> Self {
        let limit = (limit > 0).then(|| Value::UInt(limit).into_expr());
        self.copy(self.clauses.set_limit(limit))
    }

    pub fn limit_all(&self) -> Self {
        self.copy(self.clauses.set_limit(Some(sqlgen::limit_all())))
    }

    pub fn clear_limit(&self) -> Self {
        self.copy(self.clauses.set_limit(None))
    }

    /// `RETURNING cols`
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
