//! Raw SQL literals, aliases and casts.

use super::ident::IdentifierExpression;
use super::{Expr, IntoExpr};

/// Raw SQL with `?` interpolation points.
///
/// Each `?` consumes the next argument, which is rendered recursively (so
/// values become placeholders in prepared mode). A literal with no arguments
/// is written verbatim, question marks included.
#[derive(Debug, Clone)]
pub struct LiteralExpression {
    sql: String,
    args: Vec<Expr>,
}

impl LiteralExpression {
    pub fn new(sql: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    /// Copy with an extra interpolation argument.
    pub fn arg(mut self, arg: impl IntoExpr) -> Self {
        self.args.push(arg.into_expr());
        self
    }
}

/// `expr AS alias`
#[derive(Debug, Clone)]
pub struct AliasedExpression {
    aliased: Expr,
    alias: IdentifierExpression,
}

impl AliasedExpression {
    pub fn new(aliased: impl Into<Expr>, alias: IdentifierExpression) -> Self {
        Self {
            aliased: aliased.into(),
            alias,
        }
    }

    pub fn aliased(&self) -> &Expr {
        &self.aliased
    }

    pub fn alias(&self) -> &IdentifierExpression {
        &self.alias
    }

    /// A fresh wrapper around the same expression with another alias.
    pub fn as_(&self, alias: impl super::IntoIdentifier) -> Self {
        Self {
            aliased: self.aliased.clone(),
            alias: alias.into_identifier(),
        }
    }
}

/// `CAST(expr AS type)`
#[derive(Debug, Clone)]
pub struct CastExpression {
    casted: Expr,
    ty: LiteralExpression,
}

impl CastExpression {
    pub fn new(casted: Expr, ty: &str) -> Self {
        Self {
            casted,
            ty: LiteralExpression::new(ty, Vec::new()),
        }
    }

    pub fn casted(&self) -> &Expr {
        &self.casted
    }

    pub fn ty(&self) -> &LiteralExpression {
        &self.ty
    }
}
