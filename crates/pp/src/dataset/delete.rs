use super::{IntoAppendable, dataset_common, programming_error};
use crate::config;
use crate::dialect::Dialect;
use crate::error::PpError;
use crate::exec::DriverHandle;
use crate::exp::{
    ColumnListExpression, CommonTableExpression, DeleteClauses, Expr, ExpressionList,
    IdentifierExpression, IntoExpr, IntoExprs, IntoTable, OrderedExpression,
};
use crate::sb::SqlBuilder;
use crate::sqlgen::{self, SqlGenerator};
use crate::value::Value;

/// A DELETE statement.
#[derive(Debug, Clone)]
pub struct DeleteDataset {
    dialect: Dialect,
    clauses: DeleteClauses,
    prepared: bool,
    driver: Option<DriverHandle>,
    err: Option<PpError>,
}

dataset_common!(DeleteDataset, "DELETE");

impl Default for DeleteDataset {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl DeleteDataset {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: DeleteClauses::new(),
            prepared: config::default_prepared(),
            driver: None,
            err: None,
        }
    }

    fn copy(&self, clauses: DeleteClauses) -> Self {
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

    pub fn get_clauses(&self) -> &DeleteClauses {
        &self.clauses
    }

    fn render(&self, generator: &SqlGenerator<'_>, b: &mut SqlBuilder) {
        generator.delete_sql(b, &self.clauses);
    }

    fn alias_ident(&self) -> Option<&IdentifierExpression> {
        None
    }

    fn has_result_columns(&self) -> bool {
        self.clauses.has_returning()
    }

    /// Set the table to delete from.
    ///
    /// # Panics
    ///
    /// Panics with [`PpError::UnsupportedIntoType`] unless `table` is a plain
    /// identifier.
    pub fn from(&self, table: impl IntoTable) -> Self {
        match table.into_table() {
            Expr::Ident(ident) => self.copy(self.clauses.set_from(ident)),
            _ => programming_error(PpError::UnsupportedIntoType),
        }
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
