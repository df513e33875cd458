use std::sync::Arc;

use super::{
    DeleteDataset, InsertDataset, IntoAppendable, TruncateDataset, UpdateDataset, dataset_common,
    programming_error,
};
use crate::config;
use crate::dialect::Dialect;
use crate::error::PpError;
use crate::exec::DriverHandle;
use crate::exp::{
    ColumnListExpression, CommonTableExpression, CompoundExpression, CompoundType, Expr,
    IdentifierExpression, IntoExpr, IntoExprs, IntoIdentifier, IntoTable, JoinCondition,
    JoinExpression, JoinType, Lock, LockStrength, OrderedExpression, SelectClauses, WaitOption,
    WindowExpression,
};
use crate::sb::SqlBuilder;
use crate::sqlgen::{self, SqlGenerator};
use crate::value::Value;

/// A SELECT statement.
#[derive(Debug, Clone)]
pub struct SelectDataset {
    dialect: Dialect,
    clauses: SelectClauses,
    prepared: bool,
    driver: Option<DriverHandle>,
    err: Option<PpError>,
}

dataset_common!(SelectDataset, "SELECT");

impl Default for SelectDataset {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl SelectDataset {
    /// An empty `SELECT *` bound to `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: SelectClauses::new(),
            prepared: config::default_prepared(),
            driver: None,
            err: None,
        }
    }

    fn copy(&self, clauses: SelectClauses) -> Self {
        Self {
            clauses,
            ..self.clone()
        }
    }

    /// A fresh dataset sharing this one's dialect, prepared flag and driver.
    fn sibling(&self) -> Self {
        Self {
            dialect: self.dialect.clone(),
            clauses: SelectClauses::new(),
            prepared: self.prepared,
            driver: self.driver.clone(),
            err: None,
        }
    }

    pub fn get_clauses(&self) -> &SelectClauses {
        &self.clauses
    }

    fn render(&self, generator: &SqlGenerator<'_>, b: &mut SqlBuilder) {
        generator.select_sql(b, &self.clauses);
    }

    fn alias_ident(&self) -> Option<&IdentifierExpression> {
        self.clauses.alias()
    }

    fn has_result_columns(&self) -> bool {
        true
    }

    /// Replace the FROM list.
    ///
    /// Strings name tables (`"schema.table"` is split on the dot). Select
    /// datasets without an alias are aliased `t1`, `t2`, ... in order.
    ///
    /// # Panics
    ///
    /// Panics with [`PpError::BadFromArgument`] when an entry is a plain value
    /// rather than a table, identifier or sub-query.
    pub fn from(&self, tables: impl IntoExprs) -> Self {
        let mut alias_count = 0;
        let mut sources = Vec::new();
        for table in tables.into_exprs() {
            let source = match table {
                Expr::Query(query) if query.alias().is_none() => {
                    let select = query.as_any().downcast_ref::<SelectDataset>().cloned();
                    match select {
                        Some(select) => {
                            alias_count += 1;
                            select.as_(format!("t{alias_count}")).into_expr()
                        }
                        None => Expr::Query(query),
                    }
                }
                other if other.is_table_like() => other,
                other => programming_error(PpError::BadFromArgument(other.describe())),
            };
            sources.push(source);
        }
        self.copy(self.clauses.set_from(ColumnListExpression::new(sources)))
    }

    /// `SELECT * FROM (<self>) AS "t1"`
    pub fn from_self(&self) -> Self {
        self.sibling().from(self.clone())
    }

    /// [`Self::from_self`] when ORDER BY or LIMIT is set, otherwise a plain copy.
    pub fn compound_from_self(&self) -> Self {
        if self.clauses.has_order() || self.clauses.has_limit() {
            self.from_self()
        } else {
            self.clone()
        }
    }

    /// Replace the select list; no columns resets it to `*`.
    pub fn select(&self, cols: impl IntoExprs) -> Self {
        let cols = cols.into_exprs();
        if cols.is_empty() {
            return self.clear_select();
        }
        self.copy(self.clauses.set_select(ColumnListExpression::new(cols)))
    }

    pub fn select_append(&self, cols: impl IntoExprs) -> Self {
        self.copy(self.clauses.select_append(cols.into_exprs()))
    }

    /// `SELECT DISTINCT cols`
    pub fn select_distinct(&self, cols: impl IntoExprs) -> Self {
        let cols = cols.into_exprs();
        if cols.is_empty() {
            return self.clear_select();
        }
        self.copy(
            self.clauses
                .set_select(ColumnListExpression::new(cols))
                .set_distinct(Some(ColumnListExpression::default())),
        )
    }

    /// `DISTINCT` with no columns, `DISTINCT ON (on)` otherwise.
    pub fn distinct(&self, on: impl IntoExprs) -> Self {
        self.copy(self.clauses.set_distinct(Some(ColumnListExpression::new(on))))
    }

    /// `DISTINCT ON (cols)`
    pub fn distinct_on(&self, cols: impl IntoExprs) -> Self {
        self.distinct(cols)
    }

    pub fn clear_distinct(&self) -> Self {
        self.copy(self.clauses.set_distinct(None))
    }

    /// Reset to `SELECT *` and drop DISTINCT.
    pub fn clear_select(&self) -> Self {
        self.copy(
            self.clauses
                .set_select(ColumnListExpression::new(Expr::Star))
                .set_distinct(None),
        )
    }

    /// AND the conditions onto the WHERE clause.
    pub fn where_(&self, exprs: impl IntoExprs) -> Self {
        self.copy(self.clauses.where_append(exprs.into_exprs()))
    }

    pub fn clear_where(&self) -> Self {
        self.copy(self.clauses.clear_where())
    }

    pub fn group_by(&self, cols: impl IntoExprs) -> Self {
        let cols = cols.into_exprs();
        let group_by = (!cols.is_empty()).then(|| ColumnListExpression::new(cols));
        self.copy(self.clauses.set_group_by(group_by))
    }

    pub fn group_by_append(&self, cols: impl IntoExprs) -> Self {
        self.copy(self.clauses.group_by_append(cols.into_exprs()))
    }

    /// AND the conditions onto the HAVING clause.
    pub fn having(&self, exprs: impl IntoExprs) -> Self {
        self.copy(self.clauses.having_append(exprs.into_exprs()))
    }

    pub fn clear_having(&self) -> Self {
        self.copy(self.clauses.clear_having())
    }

    /// Replace the WINDOW clause. Each window needs a name.
    pub fn window(&self, windows: impl IntoIterator<Item = WindowExpression>) -> Self {
        self.copy(self.clauses.set_windows(windows.into_iter().collect()))
    }

    pub fn window_append(&self, windows: impl IntoIterator<Item = WindowExpression>) -> Self {
        self.copy(self.clauses.windows_append(windows.into_iter().collect()))
    }

    pub fn clear_window(&self) -> Self {
        self.copy(self.clauses.set_windows(Vec::new()))
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

    /// `LIMIT ALL`
    pub fn limit_all(&self) -> Self {
        self.copy(self.clauses.set_limit(Some(sqlgen::limit_all())))
    }

    pub fn clear_limit(&self) -> Self {
        self.copy(self.clauses.set_limit(None))
    }

    /// `OFFSET n`; zero clears the offset.
    pub fn offset(&self, offset: u64) -> Self {
        self.copy(self.clauses.set_offset(offset))
    }

    pub fn clear_offset(&self) -> Self {
        self.copy(self.clauses.set_offset(0))
    }

    fn join_with(&self, join_type: JoinType, table: Expr, condition: Option<JoinCondition>) -> Self {
        self.copy(
            self.clauses
                .joins_append(JoinExpression::new(join_type, table, condition)),
        )
    }

    /// Alias for [`Self::inner_join`].
    pub fn join(&self, table: impl IntoTable, condition: JoinCondition) -> Self {
        self.inner_join(table, condition)
    }

    pub fn inner_join(&self, table: impl IntoTable, condition: JoinCondition) -> Self {
        self.join_with(JoinType::Inner, table.into_table(), Some(condition))
    }

    pub fn left_join(&self, table: impl IntoTable, condition: JoinCondition) -> Self {
        self.join_with(JoinType::Left, table.into_table(), Some(condition))
    }

    pub fn left_outer_join(&self, table: impl IntoTable, condition: JoinCondition) -> Self {
        self.join_with(JoinType::LeftOuter, table.into_table(), Some(condition))
    }

    pub fn right_join(&self, table: impl IntoTable, condition: JoinCondition) -> Self {
        self.join_with(JoinType::Right, table.into_table(), Some(condition))
    }

    pub fn right_outer_join(&self, table: impl IntoTable, condition: JoinCondition) -> Self {
        self.join_with(JoinType::RightOuter, table.into_table(), Some(condition))
    }

    pub fn full_join(&self, table: impl IntoTable, condition: JoinCondition) -> Self {
        self.join_with(JoinType::Full, table.into_table(), Some(condition))
    }

    pub fn full_outer_join(&self, table: impl IntoTable, condition: JoinCondition) -> Self {
        self.join_with(JoinType::FullOuter, table.into_table(), Some(condition))
    }

    pub fn natural_join(&self, table: impl IntoTable) -> Self {
        self.join_with(JoinType::Natural, table.into_table(), None)
    }

    pub fn natural_left_join(&self, table: impl IntoTable) -> Self {
        self.join_with(JoinType::NaturalLeft, table.into_table(), None)
    }

    pub fn natural_right_join(&self, table: impl IntoTable) -> Self {
        self.join_with(JoinType::NaturalRight, table.into_table(), None)
    }

    pub fn natural_full_join(&self, table: impl IntoTable) -> Self {
        self.join_with(JoinType::NaturalFull, table.into_table(), None)
    }

    pub fn cross_join(&self, table: impl IntoTable) -> Self {
        self.join_with(JoinType::Cross, table.into_table(), None)
    }

    fn compound(&self, kind: CompoundType, other: SelectDataset) -> Self {
        let left = self.compound_from_self();
        let right = other.compound_from_self();
        left.copy(
            left.clauses
                .compounds_append(CompoundExpression::new(kind, Arc::new(right))),
        )
    }

    /// `<self> UNION (<other>)`
    ///
    /// Either side carrying ORDER BY or LIMIT is first wrapped as a derived
    /// table so the set operation sees the intended rows.
    pub fn union(&self, other: SelectDataset) -> Self {
        self.compound(CompoundType::Union, other)
    }

    pub fn union_all(&self, other: SelectDataset) -> Self {
        self.compound(CompoundType::UnionAll, other)
    }

    pub fn intersect(&self, other: SelectDataset) -> Self {
        self.compound(CompoundType::Intersect, other)
    }

    pub fn intersect_all(&self, other: SelectDataset) -> Self {
        self.compound(CompoundType::IntersectAll, other)
    }

    /// Alias used when this dataset appears as a sub-query.
    pub fn as_(&self, alias: impl IntoIdentifier) -> Self {
        self.copy(self.clauses.set_alias(alias.into_identifier()))
    }

    /// `WITH name AS (<sub_query>)`
    pub fn with(&self, name: &str, sub_query: impl IntoAppendable) -> Self {
        let cte = CommonTableExpression::new(false, name, sub_query.into_appendable());
        self.copy(self.clauses.common_tables_append(cte))
    }

    /// `WITH RECURSIVE name AS (<sub_query>)`
    pub fn with_recursive(&self, name: &str, sub_query: impl IntoAppendable) -> Self {
        let cte = CommonTableExpression::new(true, name, sub_query.into_appendable());
        self.copy(self.clauses.common_tables_append(cte))
    }

    fn lock(&self, strength: LockStrength, wait: WaitOption, of: impl IntoExprs) -> Self {
        let tables = of
            .into_exprs()
            .into_iter()
            .filter_map(|table| match table {
                Expr::Ident(ident) => Some(ident),
                _ => None,
            })
            .collect();
        self.copy(self.clauses.set_lock(Some(Lock::new(strength, wait, tables))))
    }

    /// `FOR UPDATE [OF tables] [NOWAIT | SKIP LOCKED]`
    pub fn for_update(&self, wait: WaitOption, of: impl IntoExprs) -> Self {
        self.lock(LockStrength::ForUpdate, wait, of)
    }

    pub fn for_no_key_update(&self, wait: WaitOption, of: impl IntoExprs) -> Self {
        self.lock(LockStrength::ForNoKeyUpdate, wait, of)
    }

    pub fn for_share(&self, wait: WaitOption, of: impl IntoExprs) -> Self {
        self.lock(LockStrength::ForShare, wait, of)
    }

    pub fn for_key_share(&self, wait: WaitOption, of: impl IntoExprs) -> Self {
        self.lock(LockStrength::ForKeyShare, wait, of)
    }

    pub fn clear_for(&self) -> Self {
        self.copy(self.clauses.set_lock(None))
    }

    fn first_source(&self) -> Option<&Expr> {
        self.clauses.from().columns().first()
    }

    /// An UPDATE of the first FROM table keeping WITH, WHERE, ORDER BY and LIMIT.
    pub fn update(&self) -> UpdateDataset {
        let mut ds = UpdateDataset::new(self.dialect.clone())
            .prepared(self.prepared)
            .carry(self.driver.clone(), self.err.clone());
        if let Some(table) = self.first_source() {
            ds = ds.table(table.clone());
        }
        ds.carry_clauses(
            self.clauses.common_tables(),
            self.clauses.where_clause(),
            self.clauses.order(),
            self.clauses.limit(),
        )
    }

    /// An INSERT into the first FROM table keeping WITH.
    pub fn insert(&self) -> InsertDataset {
        let mut ds = InsertDataset::new(self.dialect.clone())
            .prepared(self.prepared)
            .carry(self.driver.clone(), self.err.clone());
        if let Some(table) = self.first_source() {
            ds = ds.into_(table.clone());
        }
        ds.carry_common_tables(self.clauses.common_tables())
    }

    /// A DELETE from the first FROM table keeping WITH, WHERE, ORDER BY and LIMIT.
    pub fn delete(&self) -> DeleteDataset {
        let mut ds = DeleteDataset::new(self.dialect.clone())
            .prepared(self.prepared)
            .carry(self.driver.clone(), self.err.clone());
        if let Some(table) = self.first_source() {
            ds = ds.from(table.clone());
        }
        ds.carry_clauses(
            self.clauses.common_tables(),
            self.clauses.where_clause(),
            self.clauses.order(),
            self.clauses.limit(),
        )
    }

    /// A TRUNCATE of every FROM table.
    pub fn truncate(&self) -> TruncateDataset {
        TruncateDataset::new(self.dialect.clone())
            .prepared(self.prepared)
            .carry(self.driver.clone(), self.err.clone())
            .table(self.clauses.from().clone())
    }
}
