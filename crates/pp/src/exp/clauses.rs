//! Per-statement clause containers.
//!
//! Every mutator returns a modified copy; a container is never changed in
//! place once handed out.

use super::ident::IdentifierExpression;
use super::join::{
    CommonTableExpression, CompoundExpression, ConflictExpression, JoinExpression, Lock,
};
use super::list::{ColumnListExpression, ExpressionList, OrderedExpression};
use super::func::WindowExpression;
use super::{Appendable, Expr};
use crate::reflect::{RowInput, UpdateSource};

fn append_where(list: &Option<ExpressionList>, exprs: Vec<Expr>) -> Option<ExpressionList> {
    match list {
        Some(list) => Some(list.append(exprs)),
        None => Some(ExpressionList::and(exprs)),
    }
}

fn append_order(order: &Option<ColumnListExpression>, exprs: Vec<Expr>) -> ColumnListExpression {
    match order {
        Some(order) => order.append(exprs),
        None => ColumnListExpression::new(exprs),
    }
}

fn prepend_order(order: &Option<ColumnListExpression>, exprs: Vec<Expr>) -> ColumnListExpression {
    let mut next = exprs;
    if let Some(order) = order {
        next.extend(order.columns().iter().cloned());
    }
    ColumnListExpression::new(next)
}

fn ordered(exprs: Vec<OrderedExpression>) -> Vec<Expr> {
    exprs.into_iter().map(Expr::from).collect()
}

macro_rules! copy_with {
    ($self:ident, |$c:ident| $body:expr) => {{
        let mut $c = $self.clone();
        $body;
        $c
    }};
}

/// Clauses of a SELECT statement.
#[derive(Debug, Clone)]
pub struct SelectClauses {
    common_tables: Vec<CommonTableExpression>,
    select: ColumnListExpression,
    distinct: Option<ColumnListExpression>,
    from: ColumnListExpression,
    joins: Vec<JoinExpression>,
    where_clause: Option<ExpressionList>,
    alias: Option<IdentifierExpression>,
    group_by: Option<ColumnListExpression>,
    having: Option<ExpressionList>,
    windows: Vec<WindowExpression>,
    order: Option<ColumnListExpression>,
    limit: Option<Expr>,
    offset: u64,
    compounds: Vec<CompoundExpression>,
    lock: Option<Lock>,
}

impl Default for SelectClauses {
    fn default() -> Self {
        Self {
            common_tables: Vec::new(),
            select: ColumnListExpression::new(Expr::Star),
            distinct: None,
            from: ColumnListExpression::default(),
            joins: Vec::new(),
            where_clause: None,
            alias: None,
            group_by: None,
            having: None,
            windows: Vec::new(),
            order: None,
            limit: None,
            offset: 0,
            compounds: Vec::new(),
            lock: None,
        }
    }
}

impl SelectClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_sources(&self) -> bool {
        !self.from.is_empty()
    }

    /// `true` while the select list is the default `*`.
    pub fn is_default_select(&self) -> bool {
        self.select.is_star()
    }

    pub fn select(&self) -> &ColumnListExpression {
        &self.select
    }

    pub fn set_select(&self, select: ColumnListExpression) -> Self {
        copy_with!(self, |c| c.select = select)
    }

    pub fn select_append(&self, exprs: Vec<Expr>) -> Self {
        copy_with!(self, |c| c.select = self.select.append(exprs))
    }

    pub fn distinct(&self) -> Option<&ColumnListExpression> {
        self.distinct.as_ref()
    }

    pub fn set_distinct(&self, distinct: Option<ColumnListExpression>) -> Self {
        copy_with!(self, |c| c.distinct = distinct)
    }

    pub fn from(&self) -> &ColumnListExpression {
        &self.from
    }

    pub fn set_from(&self, from: ColumnListExpression) -> Self {
        copy_with!(self, |c| c.from = from)
    }

    pub fn alias(&self) -> Option<&IdentifierExpression> {
        self.alias.as_ref()
    }

    pub fn has_alias(&self) -> bool {
        self.alias.is_some()
    }

    pub fn set_alias(&self, alias: IdentifierExpression) -> Self {
        copy_with!(self, |c| c.alias = Some(alias))
    }

    pub fn joins(&self) -> &[JoinExpression] {
        &self.joins
    }

    pub fn joins_append(&self, join: JoinExpression) -> Self {
        copy_with!(self, |c| c.joins.push(join))
    }

    pub fn where_clause(&self) -> Option<&ExpressionList> {
        self.where_clause.as_ref()
    }

    pub fn where_append(&self, exprs: Vec<Expr>) -> Self {
        if exprs.is_empty() {
            return self.clone();
        }
        copy_with!(self, |c| c.where_clause = append_where(&self.where_clause, exprs))
    }

    pub fn clear_where(&self) -> Self {
        copy_with!(self, |c| c.where_clause = None)
    }

    pub fn group_by(&self) -> Option<&ColumnListExpression> {
        self.group_by.as_ref()
    }

    pub fn set_group_by(&self, group_by: Option<ColumnListExpression>) -> Self {
        copy_with!(self, |c| c.group_by = group_by)
    }

    pub fn group_by_append(&self, exprs: Vec<Expr>) -> Self {
        copy_with!(self, |c| c.group_by = Some(append_order(&self.group_by, exprs)))
    }

    pub fn having(&self) -> Option<&ExpressionList> {
        self.having.as_ref()
    }

    pub fn having_append(&self, exprs: Vec<Expr>) -> Self {
        if exprs.is_empty() {
            return self.clone();
        }
        copy_with!(self, |c| c.having = append_where(&self.having, exprs))
    }

    pub fn clear_having(&self) -> Self {
        copy_with!(self, |c| c.having = None)
    }

    pub fn windows(&self) -> &[WindowExpression] {
        &self.windows
    }

    pub fn set_windows(&self, windows: Vec<WindowExpression>) -> Self {
        copy_with!(self, |c| c.windows = windows)
    }

    pub fn windows_append(&self, windows: Vec<WindowExpression>) -> Self {
        copy_with!(self, |c| c.windows.extend(windows))
    }

    pub fn order(&self) -> Option<&ColumnListExpression> {
        self.order.as_ref()
    }

    pub fn has_order(&self) -> bool {
        self.order.as_ref().is_some_and(|o| !o.is_empty())
    }

    pub fn set_order(&self, order: Vec<OrderedExpression>) -> Self {
        copy_with!(self, |c| c.order = Some(ColumnListExpression::new(ordered(order))))
    }

    pub fn order_append(&self, order: Vec<OrderedExpression>) -> Self {
        copy_with!(self, |c| c.order = Some(append_order(&self.order, ordered(order))))
    }

    pub fn order_prepend(&self, order: Vec<OrderedExpression>) -> Self {
        copy_with!(self, |c| c.order = Some(prepend_order(&self.order, ordered(order))))
    }

    pub fn clear_order(&self) -> Self {
        copy_with!(self, |c| c.order = None)
    }

    pub fn limit(&self) -> Option<&Expr> {
        self.limit.as_ref()
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    pub fn set_limit(&self, limit: Option<Expr>) -> Self {
        copy_with!(self, |c| c.limit = limit)
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn set_offset(&self, offset: u64) -> Self {
        copy_with!(self, |c| c.offset = offset)
    }

    pub fn compounds(&self) -> &[CompoundExpression] {
        &self.compounds
    }

    pub fn compounds_append(&self, compound: CompoundExpression) -> Self {
        copy_with!(self, |c| c.compounds.push(compound))
    }

    pub fn lock(&self) -> Option<&Lock> {
        self.lock.as_ref()
    }

    pub fn set_lock(&self, lock: Option<Lock>) -> Self {
        copy_with!(self, |c| c.lock = lock)
    }

    pub fn common_tables(&self) -> &[CommonTableExpression] {
        &self.common_tables
    }

    pub fn common_tables_append(&self, cte: CommonTableExpression) -> Self {
        copy_with!(self, |c| c.common_tables.push(cte))
    }
}

/// Clauses of an INSERT statement.
///
/// At most one of rows, cols+vals, cols+from or from drives the body; with
/// none of them the statement inserts DEFAULT VALUES.
#[derive(Debug, Clone, Default)]
pub struct InsertClauses {
    common_tables: Vec<CommonTableExpression>,
    into: Option<Expr>,
    alias: Option<IdentifierExpression>,
    cols: Option<ColumnListExpression>,
    vals: Vec<Vec<Expr>>,
    rows: Vec<RowInput>,
    from: Option<Appendable>,
    returning: Option<ColumnListExpression>,
    on_conflict: Option<ConflictExpression>,
}

impl InsertClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_table(&self) -> Option<&Expr> {
        self.into.as_ref()
    }

    pub fn has_into(&self) -> bool {
        self.into.is_some()
    }

    pub fn set_into(&self, into: Expr) -> Self {
        copy_with!(self, |c| c.into = Some(into))
    }

    pub fn alias(&self) -> Option<&IdentifierExpression> {
        self.alias.as_ref()
    }

    pub fn set_alias(&self, alias: Option<IdentifierExpression>) -> Self {
        copy_with!(self, |c| c.alias = alias)
    }

    pub fn cols(&self) -> Option<&ColumnListExpression> {
        self.cols.as_ref()
    }

    pub fn has_cols(&self) -> bool {
        self.cols.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn set_cols(&self, cols: Option<ColumnListExpression>) -> Self {
        copy_with!(self, |c| c.cols = cols)
    }

    pub fn cols_append(&self, cols: Vec<Expr>) -> Self {
        copy_with!(self, |c| {
            c.cols = Some(match &self.cols {
                Some(existing) => existing.append(cols),
                None => ColumnListExpression::new(cols),
            })
        })
    }

    pub fn vals(&self) -> &[Vec<Expr>] {
        &self.vals
    }

    pub fn has_vals(&self) -> bool {
        !self.vals.is_empty()
    }

    pub fn set_vals(&self, vals: Vec<Vec<Expr>>) -> Self {
        copy_with!(self, |c| c.vals = vals)
    }

    pub fn vals_append(&self, vals: Vec<Vec<Expr>>) -> Self {
        copy_with!(self, |c| c.vals.extend(vals))
    }

    pub fn rows(&self) -> &[RowInput] {
        &self.rows
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn set_rows(&self, rows: Vec<RowInput>) -> Self {
        copy_with!(self, |c| c.rows = rows)
    }

    pub fn from(&self) -> Option<&Appendable> {
        self.from.as_ref()
    }

    pub fn has_from(&self) -> bool {
        self.from.is_some()
    }

    pub fn set_from(&self, from: Option<Appendable>) -> Self {
        copy_with!(self, |c| c.from = from)
    }

    pub fn returning(&self) -> Option<&ColumnListExpression> {
        self.returning.as_ref()
    }

    pub fn has_returning(&self) -> bool {
        self.returning.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn set_returning(&self, returning: ColumnListExpression) -> Self {
        copy_with!(self, |c| c.returning = Some(returning))
    }

    pub fn on_conflict(&self) -> Option<&ConflictExpression> {
        self.on_conflict.as_ref()
    }

    pub fn set_on_conflict(&self, conflict: Option<ConflictExpression>) -> Self {
        copy_with!(self, |c| c.on_conflict = conflict)
    }

    pub fn common_tables(&self) -> &[CommonTableExpression] {
        &self.common_tables
    }

    pub fn common_tables_append(&self, cte: CommonTableExpression) -> Self {
        copy_with!(self, |c| c.common_tables.push(cte))
    }

    pub(crate) fn set_common_tables(&self, common_tables: Vec<CommonTableExpression>) -> Self {
        copy_with!(self, |c| c.common_tables = common_tables)
    }
}

/// Clauses of an UPDATE statement.
#[derive(Debug, Clone, Default)]
pub struct UpdateClauses {
    common_tables: Vec<CommonTableExpression>,
    table: Option<Expr>,
    set_values: Option<UpdateSource>,
    from: ColumnListExpression,
    where_clause: Option<ExpressionList>,
    order: Option<ColumnListExpression>,
    limit: Option<Expr>,
    returning: Option<ColumnListExpression>,
}

impl UpdateClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> Option<&Expr> {
        self.table.as_ref()
    }

    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    pub fn set_table(&self, table: Expr) -> Self {
        copy_with!(self, |c| c.table = Some(table))
    }

    pub fn set_values(&self) -> Option<&UpdateSource> {
        self.set_values.as_ref()
    }

    pub fn has_set_values(&self) -> bool {
        self.set_values.is_some()
    }

    pub fn set_set_values(&self, values: UpdateSource) -> Self {
        copy_with!(self, |c| c.set_values = Some(values))
    }

    pub fn from(&self) -> &ColumnListExpression {
        &self.from
    }

    pub fn has_from(&self) -> bool {
        !self.from.is_empty()
    }

    pub fn set_from(&self, from: ColumnListExpression) -> Self {
        copy_with!(self, |c| c.from = from)
    }

    pub fn where_clause(&self) -> Option<&ExpressionList> {
        self.where_clause.as_ref()
    }

    pub fn where_append(&self, exprs: Vec<Expr>) -> Self {
        if exprs.is_empty() {
            return self.clone();
        }
        copy_with!(self, |c| c.where_clause = append_where(&self.where_clause, exprs))
    }

    pub fn clear_where(&self) -> Self {
        copy_with!(self, |c| c.where_clause = None)
    }

    pub(crate) fn set_where(&self, where_clause: Option<ExpressionList>) -> Self {
        copy_with!(self, |c| c.where_clause = where_clause)
    }

    pub fn order(&self) -> Option<&ColumnListExpression> {
        self.order.as_ref()
    }

    pub fn has_order(&self) -> bool {
        self.order.as_ref().is_some_and(|o| !o.is_empty())
    }

    pub fn set_order(&self, order: Vec<OrderedExpression>) -> Self {
        copy_with!(self, |c| c.order = Some(ColumnListExpression::new(ordered(order))))
    }

    pub fn order_append(&self, order: Vec<OrderedExpression>) -> Self {
        copy_with!(self, |c| c.order = Some(append_order(&self.order, ordered(order))))
    }

    pub fn order_prepend(&self, order: Vec<OrderedExpression>) -> Self {
        copy_with!(self, |c| c.order = Some(prepend_order(&self.order, ordered(order))))
    }

    pub fn clear_order(&self) -> Self {
        copy_with!(self, |c| c.order = None)
    }

    /// Copy with an ORDER BY list carried over from another statement.
    pub(crate) fn set_order_list(&self, order: Option<ColumnListExpression>) -> Self {
        copy_with!(self, |c| c.order = order)
    }

    pub fn limit(&self) -> Option<&Expr> {
        self.limit.as_ref()
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    pub fn set_limit(&self, limit: Option<Expr>) -> Self {
        copy_with!(self, |c| c.limit = limit)
    }

    pub fn returning(&self) -> Option<&ColumnListExpression> {
        self.returning.as_ref()
    }

    pub fn has_returning(&self) -> bool {
        self.returning.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn set_returning(&self, returning: ColumnListExpression) -> Self {
        copy_with!(self, |c| c.returning = Some(returning))
    }

    pub fn common_tables(&self) -> &[CommonTableExpression] {
        &self.common_tables
    }

    pub fn common_tables_append(&self, cte: CommonTableExpression) -> Self {
        copy_with!(self, |c| c.common_tables.push(cte))
    }

    pub(crate) fn set_common_tables(&self, common_tables: Vec<CommonTableExpression>) -> Self {
        copy_with!(self, |c| c.common_tables = common_tables)
    }
}

/// Clauses of a DELETE statement.
#[derive(Debug, Clone, Default)]
pub struct DeleteClauses {
    common_tables: Vec<CommonTableExpression>,
    from: Option<IdentifierExpression>,
    where_clause: Option<ExpressionList>,
    order: Option<ColumnListExpression>,
    limit: Option<Expr>,
    returning: Option<ColumnListExpression>,
}

impl DeleteClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(&self) -> Option<&IdentifierExpression> {
        self.from.as_ref()
    }

    pub fn has_from(&self) -> bool {
        self.from.is_some()
    }

    pub fn set_from(&self, from: IdentifierExpression) -> Self {
        copy_with!(self, |c| c.from = Some(from))
    }

    pub fn where_clause(&self) -> Option<&ExpressionList> {
        self.where_clause.as_ref()
    }

    pub fn where_append(&self, exprs: Vec<Expr>) -> Self {
        if exprs.is_empty() {
            return self.clone();
        }
        copy_with!(self, |c| c.where_clause = append_where(&self.where_clause, exprs))
    }

    pub fn clear_where(&self) -> Self {
        copy_with!(self, |c| c.where_clause = None)
    }

    pub(crate) fn set_where(&self, where_clause: Option<ExpressionList>) -> Self {
        copy_with!(self, |c| c.where_clause = where_clause)
    }

    pub fn order(&self) -> Option<&ColumnListExpression> {
        self.order.as_ref()
    }

    pub fn has_order(&self) -> bool {
        self.order.as_ref().is_some_and(|o| !o.is_empty())
    }

    pub fn set_order(&self, order: Vec<OrderedExpression>) -> Self {
        copy_with!(self, |c| c.order = Some(ColumnListExpression::new(ordered(order))))
    }

    pub fn order_append(&self, order: Vec<OrderedExpression>) -> Self {
        copy_with!(self, |c| c.order = Some(append_order(&self.order, ordered(order))))
    }

    pub fn order_prepend(&self, order: Vec<OrderedExpression>) -> Self {
        copy_with!(self, |c| c.order = Some(prepend_order(&self.order, ordered(order))))
    }

    pub fn clear_order(&self) -> Self {
        copy_with!(self, |c| c.order = None)
    }

    /// Copy with an ORDER BY list carried over from another statement.
    pub(crate) fn set_order_list(&self, order: Option<ColumnListExpression>) -> Self {
        copy_with!(self, |c| c.order = order)
    }

    pub fn limit(&self) -> Option<&Expr> {
        self.limit.as_ref()
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    pub fn set_limit(&self, limit: Option<Expr>) -> Self {
        copy_with!(self, |c| c.limit = limit)
    }

    pub fn returning(&self) -> Option<&ColumnListExpression> {
        self.returning.as_ref()
    }

    pub fn has_returning(&self) -> bool {
        self.returning.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn set_returning(&self, returning: ColumnListExpression) -> Self {
        copy_with!(self, |c| c.returning = Some(returning))
    }

    pub fn common_tables(&self) -> &[CommonTableExpression] {
        &self.common_tables
    }

    pub fn common_tables_append(&self, cte: CommonTableExpression) -> Self {
        copy_with!(self, |c| c.common_tables.push(cte))
    }

    pub(crate) fn set_common_tables(&self, common_tables: Vec<CommonTableExpression>) -> Self {
        copy_with!(self, |c| c.common_tables = common_tables)
    }
}

/// TRUNCATE options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruncateOptions {
    pub cascade: bool,
    pub restrict: bool,
    /// `"RESTART"`, `"CONTINUE"` or empty.
    pub identity: String,
}

/// Clauses of a TRUNCATE statement.
#[derive(Debug, Clone, Default)]
pub struct TruncateClauses {
    table: ColumnListExpression,
    options: TruncateOptions,
}

impl TruncateClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &ColumnListExpression {
        &self.table
    }

    pub fn has_table(&self) -> bool {
        !self.table.is_empty()
    }

    pub fn set_table(&self, table: ColumnListExpression) -> Self {
        copy_with!(self, |c| c.table = table)
    }

    pub fn options(&self) -> &TruncateOptions {
        &self.options
    }

    pub fn set_options(&self, options: TruncateOptions) -> Self {
        copy_with!(self, |c| c.options = options)
    }
}
