//! Joins, compounds, CTEs, LATERAL, row locks and ON CONFLICT.

use std::fmt;

use super::ident::IdentifierExpression;
use super::list::{ColumnListExpression, ExpressionList};
use super::literal::LiteralExpression;
use super::{Appendable, Expr, IntoExprs};
use crate::reflect::UpdateSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    FullOuter,
    RightOuter,
    LeftOuter,
    Full,
    Right,
    Left,
    Natural,
    NaturalLeft,
    NaturalRight,
    NaturalFull,
    Cross,
}

impl JoinType {
    /// Whether the join requires an ON or USING condition.
    pub fn is_conditioned(self) -> bool {
        !matches!(
            self,
            JoinType::Natural
                | JoinType::NaturalLeft
                | JoinType::NaturalRight
                | JoinType::NaturalFull
                | JoinType::Cross
        )
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::FullOuter => "FULL OUTER JOIN",
            JoinType::RightOuter => "RIGHT OUTER JOIN",
            JoinType::LeftOuter => "LEFT OUTER JOIN",
            JoinType::Full => "FULL JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Natural => "NATURAL JOIN",
            JoinType::NaturalLeft => "NATURAL LEFT JOIN",
            JoinType::NaturalRight => "NATURAL RIGHT JOIN",
            JoinType::NaturalFull => "NATURAL FULL JOIN",
            JoinType::Cross => "CROSS JOIN",
        };
        f.write_str(name)
    }
}

/// The condition of a conditioned join.
#[derive(Debug, Clone)]
pub enum JoinCondition {
    /// `ON (cond AND ...)`
    On(ExpressionList),
    /// `USING ("col", ...)`
    Using(ColumnListExpression),
}

impl JoinCondition {
    pub fn is_empty(&self) -> bool {
        match self {
            JoinCondition::On(list) => list.is_empty(),
            JoinCondition::Using(cols) => cols.is_empty(),
        }
    }
}

/// `<type> <table> [condition]`
#[derive(Debug, Clone)]
pub struct JoinExpression {
    join_type: JoinType,
    table: Expr,
    condition: Option<JoinCondition>,
}

impl JoinExpression {
    pub fn new(join_type: JoinType, table: Expr, condition: Option<JoinCondition>) -> Self {
        Self {
            join_type,
            table,
            condition,
        }
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn table(&self) -> &Expr {
        &self.table
    }

    pub fn condition(&self) -> Option<&JoinCondition> {
        self.condition.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundType {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
}

/// `UNION (<rhs>)` and friends.
#[derive(Debug, Clone)]
pub struct CompoundExpression {
    kind: CompoundType,
    rhs: Appendable,
}

impl CompoundExpression {
    pub fn new(kind: CompoundType, rhs: Appendable) -> Self {
        Self { kind, rhs }
    }

    pub fn kind(&self) -> CompoundType {
        self.kind
    }

    pub fn rhs(&self) -> &Appendable {
        &self.rhs
    }
}

/// `name AS (<sub-query>)` inside WITH.
#[derive(Debug, Clone)]
pub struct CommonTableExpression {
    recursive: bool,
    name: LiteralExpression,
    sub_query: Appendable,
}

impl CommonTableExpression {
    /// `name` is written verbatim, so it may carry a column header: `nums(x)`.
    pub fn new(recursive: bool, name: &str, sub_query: Appendable) -> Self {
        Self {
            recursive,
            name: LiteralExpression::new(name, Vec::new()),
            sub_query,
        }
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn name(&self) -> &LiteralExpression {
        &self.name
    }

    pub fn sub_query(&self) -> &Appendable {
        &self.sub_query
    }
}

/// `LATERAL (<sub-query>) AS alias`, valid in FROM and JOIN.
#[derive(Debug, Clone)]
pub struct LateralExpression {
    table: Appendable,
}

impl LateralExpression {
    pub fn new(table: Appendable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Appendable {
        &self.table
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockStrength {
    #[default]
    None,
    ForUpdate,
    ForNoKeyUpdate,
    ForShare,
    ForKeyShare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitOption {
    #[default]
    Wait,
    NoWait,
    SkipLocked,
}

/// A row-locking clause: `FOR UPDATE [OF ...] [NOWAIT | SKIP LOCKED]`.
#[derive(Debug, Clone, Default)]
pub struct Lock {
    strength: LockStrength,
    wait: WaitOption,
    of: Vec<IdentifierExpression>,
}

impl Lock {
    pub fn new(strength: LockStrength, wait: WaitOption, of: Vec<IdentifierExpression>) -> Self {
        Self { strength, wait, of }
    }

    pub fn strength(&self) -> LockStrength {
        self.strength
    }

    pub fn wait_option(&self) -> WaitOption {
        self.wait
    }

    pub fn of(&self) -> &[IdentifierExpression] {
        &self.of
    }
}

/// `ON CONFLICT ... DO UPDATE SET ... [WHERE ...]`
#[derive(Debug, Clone)]
pub struct ConflictUpdate {
    target: String,
    update: Option<UpdateSource>,
    where_clause: Option<ExpressionList>,
}

impl ConflictUpdate {
    pub fn new(target: impl Into<String>, update: Option<UpdateSource>) -> Self {
        Self {
            target: target.into(),
            update,
            where_clause: None,
        }
    }

    /// Copy with conditions appended to the DO UPDATE filter.
    pub fn where_(mut self, exprs: impl IntoExprs) -> Self {
        let exprs = exprs.into_exprs();
        self.where_clause = Some(match self.where_clause.take() {
            Some(list) => list.append(exprs),
            None => ExpressionList::and(exprs),
        });
        self
    }

    /// Conflict target: column text, or an `ON CONSTRAINT name` phrase.
    pub fn target_column(&self) -> &str {
        &self.target
    }

    pub fn update(&self) -> Option<&UpdateSource> {
        self.update.as_ref()
    }

    pub fn where_clause(&self) -> Option<&ExpressionList> {
        self.where_clause.as_ref()
    }
}

/// What to do when an INSERT hits a conflict.
#[derive(Debug, Clone)]
pub enum ConflictExpression {
    DoNothing,
    DoUpdate(ConflictUpdate),
}

impl From<ConflictUpdate> for ConflictExpression {
    fn from(update: ConflictUpdate) -> Self {
        ConflictExpression::DoUpdate(update)
    }
}
