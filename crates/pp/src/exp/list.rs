//! Column lists, AND/OR groups, ORDER BY terms and SET assignments.

use super::ident::IdentifierExpression;
use super::{Expr, IntoExprs};

/// A comma separated list of columns or expressions.
#[derive(Debug, Clone, Default)]
pub struct ColumnListExpression {
    columns: Vec<Expr>,
}

impl ColumnListExpression {
    pub fn new(columns: impl IntoExprs) -> Self {
        Self {
            columns: columns.into_exprs(),
        }
    }

    pub fn columns(&self) -> &[Expr] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Expr> {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Copy with more columns at the end.
    pub fn append(&self, columns: impl IntoExprs) -> Self {
        let mut next = self.columns.clone();
        next.extend(columns.into_exprs());
        Self { columns: next }
    }

    /// `true` when the list is exactly the `*` marker.
    pub fn is_star(&self) -> bool {
        matches!(self.columns.as_slice(), [Expr::Star])
    }
}

/// How the members of an [`ExpressionList`] are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionListType {
    And,
    Or,
}

/// Operands joined with AND or OR.
///
/// Empty nested lists and empty `Ex`/`ExOr` maps are dropped on construction,
/// so a group of nothing renders as nothing and its clause is skipped.
#[derive(Debug, Clone)]
pub struct ExpressionList {
    kind: ExpressionListType,
    exprs: Vec<Expr>,
}

impl ExpressionList {
    pub fn new(kind: ExpressionListType, exprs: impl IntoIterator<Item = Expr>) -> Self {
        let exprs = exprs.into_iter().filter(|e| !is_empty_group(e)).collect();
        Self { kind, exprs }
    }

    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Self::new(ExpressionListType::And, exprs)
    }

    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Self::new(ExpressionListType::Or, exprs)
    }

    pub fn kind(&self) -> ExpressionListType {
        self.kind
    }

    pub fn expressions(&self) -> &[Expr] {
        &self.exprs
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Copy with more operands.
    pub fn append(&self, exprs: impl IntoIterator<Item = Expr>) -> Self {
        let mut next = self.exprs.clone();
        next.extend(exprs.into_iter().filter(|e| !is_empty_group(e)));
        Self {
            kind: self.kind,
            exprs: next,
        }
    }
}

fn is_empty_group(e: &Expr) -> bool {
    match e {
        Expr::List(list) => list.is_empty(),
        Expr::Ex(ex) => ex.is_empty(),
        Expr::ExOr(ex) => ex.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullSortType {
    #[default]
    None,
    First,
    Last,
}

/// An ORDER BY term.
#[derive(Debug, Clone)]
pub struct OrderedExpression {
    expr: Expr,
    direction: SortDirection,
    nulls: NullSortType,
}

impl OrderedExpression {
    pub fn new(expr: Expr, direction: SortDirection) -> Self {
        Self {
            expr,
            direction,
            nulls: NullSortType::None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullSortType::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullSortType::Last;
        self
    }

    pub fn sort_expression(&self) -> &Expr {
        &self.expr
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_asc(&self) -> bool {
        self.direction == SortDirection::Asc
    }

    pub fn null_sort(&self) -> NullSortType {
        self.nulls
    }
}

impl IntoIterator for OrderedExpression {
    type Item = OrderedExpression;
    type IntoIter = std::iter::Once<OrderedExpression>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

/// `col=value` inside SET.
#[derive(Debug, Clone)]
pub struct UpdateExpression {
    col: IdentifierExpression,
    value: Expr,
}

impl UpdateExpression {
    pub fn new(col: IdentifierExpression, value: Expr) -> Self {
        Self { col, value }
    }

    pub fn col(&self) -> &IdentifierExpression {
        &self.col
    }

    pub fn value(&self) -> &Expr {
        &self.value
    }
}
