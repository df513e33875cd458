//! Boolean, bitwise and range operations.

use std::fmt;

use super::ident::IntoIdentifier;
use super::literal::AliasedExpression;
use super::{Expr, IntoExpr};
use crate::value::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BooleanOperation {
    Eq,
    Neq,
    Is,
    IsNot,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
    NotLike,
    ILike,
    NotILike,
    RegexpLike,
    RegexpNotLike,
    RegexpILike,
    RegexpNotILike,
}

impl BooleanOperation {
    /// The operator with the opposite meaning.
    pub fn inverted(self) -> Self {
        use BooleanOperation::*;
        match self {
            Eq => Neq,
            Neq => Eq,
            Is => IsNot,
            IsNot => Is,
            Gt => Lte,
            Gte => Lt,
            Lt => Gte,
            Lte => Gt,
            In => NotIn,
            NotIn => In,
            Like => NotLike,
            NotLike => Like,
            ILike => NotILike,
            NotILike => ILike,
            RegexpLike => RegexpNotLike,
            RegexpNotLike => RegexpLike,
            RegexpILike => RegexpNotILike,
            RegexpNotILike => RegexpILike,
        }
    }

    /// Look up an operator by its `Op` map name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        use BooleanOperation::*;
        let op = match name.to_ascii_lowercase().as_str() {
            "eq" => Eq,
            "neq" => Neq,
            "is" => Is,
            "isnot" => IsNot,
            "gt" => Gt,
            "gte" => Gte,
            "lt" => Lt,
            "lte" => Lte,
            "in" => In,
            "notin" => NotIn,
            "like" => Like,
            "notlike" => NotLike,
            "ilike" => ILike,
            "notilike" => NotILike,
            "regexplike" => RegexpLike,
            "regexpnotlike" => RegexpNotLike,
            "regexpilike" => RegexpILike,
            "regexpnotilike" => RegexpNotILike,
            _ => return None,
        };
        Some(op)
    }

    fn to_regexp(self) -> Self {
        use BooleanOperation::*;
        match self {
            Eq | Like => RegexpLike,
            Neq | NotLike => RegexpNotLike,
            ILike => RegexpILike,
            NotILike => RegexpNotILike,
            other => other,
        }
    }
}

impl fmt::Display for BooleanOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// `(lhs OP rhs)`
#[derive(Debug, Clone)]
pub struct BooleanExpression {
    op: BooleanOperation,
    lhs: Expr,
    rhs: Expr,
}

impl BooleanExpression {
    /// Build the expression exactly as given.
    pub fn new(op: BooleanOperation, lhs: Expr, rhs: Expr) -> Self {
        Self { op, lhs, rhs }
    }

    /// Build the expression, rewriting the operator from the right operand.
    ///
    /// For `Eq`/`Neq`: NULL and booleans select `IS`/`IS NOT`, tuples and
    /// sub-queries select `IN`/`NOT IN`. For `Eq`/`Neq` and the LIKE family, a
    /// regex pattern selects the matching REGEXP operator.
    pub fn normalized(op: BooleanOperation, lhs: Expr, rhs: Expr) -> Self {
        use BooleanOperation::*;
        let op = match (&rhs, op) {
            (Expr::Regex(_), _) => op.to_regexp(),
            (Expr::Value(Value::Null | Value::Bool(_)), Eq) => Is,
            (Expr::Value(Value::Null | Value::Bool(_)), Neq) => IsNot,
            (Expr::Tuple(_), Eq) => In,
            (Expr::Tuple(_), Neq) => NotIn,
            _ => op,
        };
        Self { op, lhs, rhs }
    }

    /// Wrap a single IN operand into a one-element list.
    ///
    /// Tuples and sub-queries are already parenthesized and pass through.
    pub fn in_list(vals: Expr) -> Expr {
        match vals {
            Expr::Tuple(_) | Expr::Query(_) => vals,
            other => Expr::Tuple(vec![other]),
        }
    }

    pub fn op(&self) -> BooleanOperation {
        self.op
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    /// `(lhs OP rhs) AS alias`
    pub fn as_(self, alias: impl IntoIdentifier) -> AliasedExpression {
        AliasedExpression::new(self, alias.into_identifier())
    }
}

/// Bitwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitwiseOperation {
    Inversion,
    Or,
    And,
    Xor,
    LeftShift,
    RightShift,
}

impl fmt::Display for BitwiseOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BitwiseOperation::Inversion => "Inversion",
            BitwiseOperation::Or => "OR",
            BitwiseOperation::And => "AND",
            BitwiseOperation::Xor => "XOR",
            BitwiseOperation::LeftShift => "Left Shift",
            BitwiseOperation::RightShift => "Right Shift",
        };
        f.write_str(name)
    }
}

/// `(lhs OP rhs)`, or `(OP rhs)` for inversion.
#[derive(Debug, Clone)]
pub struct BitwiseExpression {
    op: BitwiseOperation,
    lhs: Option<Expr>,
    rhs: Expr,
}

impl BitwiseExpression {
    pub fn new(op: BitwiseOperation, lhs: Option<Expr>, rhs: Expr) -> Self {
        Self { op, lhs, rhs }
    }

    pub fn op(&self) -> BitwiseOperation {
        self.op
    }

    pub fn lhs(&self) -> Option<&Expr> {
        self.lhs.as_ref()
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }
}

/// BETWEEN operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RangeOperation {
    Between,
    NotBetween,
}

impl RangeOperation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "between" => Some(RangeOperation::Between),
            "notbetween" => Some(RangeOperation::NotBetween),
            _ => None,
        }
    }
}

impl fmt::Display for RangeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The bounds of a BETWEEN.
#[derive(Debug, Clone)]
pub struct RangeVal {
    start: Expr,
    end: Expr,
}

impl RangeVal {
    pub fn new(start: impl IntoExpr, end: impl IntoExpr) -> Self {
        Self {
            start: start.into_expr(),
            end: end.into_expr(),
        }
    }

    pub fn start(&self) -> &Expr {
        &self.start
    }

    pub fn end(&self) -> &Expr {
        &self.end
    }
}

/// `(lhs BETWEEN start AND end)`
#[derive(Debug, Clone)]
pub struct RangeExpression {
    op: RangeOperation,
    lhs: Expr,
    rhs: RangeVal,
}

impl RangeExpression {
    pub fn new(op: RangeOperation, lhs: Expr, rhs: RangeVal) -> Self {
        Self { op, lhs, rhs }
    }

    pub fn op(&self) -> RangeOperation {
        self.op
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &RangeVal {
        &self.rhs
    }

    pub fn as_(self, alias: impl IntoIdentifier) -> AliasedExpression {
        AliasedExpression::new(self, alias.into_identifier())
    }
}
