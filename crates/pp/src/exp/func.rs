//! Function calls, window specifications and CASE.

use super::ident::{IdentifierExpression, IntoIdentifier};
use super::list::ColumnListExpression;
use super::{Expr, IntoExpr, IntoExprs};

/// `NAME(arg1, arg2, ...)`
#[derive(Debug, Clone)]
pub struct SqlFunctionExpression {
    name: String,
    args: Vec<Expr>,
}

impl SqlFunctionExpression {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    /// `NAME(...) OVER (window)`
    pub fn over(self, window: WindowExpression) -> SqlWindowFunctionExpression {
        SqlWindowFunctionExpression {
            func: self,
            window: Some(window),
            window_name: None,
        }
    }

    /// `NAME(...) OVER "name"` referencing a window from the WINDOW clause.
    pub fn over_name(self, name: impl IntoIdentifier) -> SqlWindowFunctionExpression {
        SqlWindowFunctionExpression {
            func: self,
            window: None,
            window_name: Some(name.into_identifier()),
        }
    }
}

/// A function call with an OVER clause.
#[derive(Debug, Clone)]
pub struct SqlWindowFunctionExpression {
    func: SqlFunctionExpression,
    window: Option<WindowExpression>,
    window_name: Option<IdentifierExpression>,
}

impl SqlWindowFunctionExpression {
    pub fn func(&self) -> &SqlFunctionExpression {
        &self.func
    }

    pub fn window(&self) -> Option<&WindowExpression> {
        self.window.as_ref()
    }

    pub fn window_name(&self) -> Option<&IdentifierExpression> {
        self.window_name.as_ref()
    }
}

/// A window specification, inline or named in the WINDOW clause.
#[derive(Debug, Clone, Default)]
pub struct WindowExpression {
    name: Option<IdentifierExpression>,
    parent: Option<IdentifierExpression>,
    partition_cols: ColumnListExpression,
    order_cols: ColumnListExpression,
}

impl WindowExpression {
    /// An empty window named `name`.
    pub fn new(name: Option<IdentifierExpression>) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Copy inheriting from a named parent window.
    pub fn inherit(mut self, parent: impl IntoIdentifier) -> Self {
        self.parent = Some(parent.into_identifier());
        self
    }

    pub fn partition_by(mut self, cols: impl IntoExprs) -> Self {
        self.partition_cols = ColumnListExpression::new(cols);
        self
    }

    pub fn order_by(mut self, cols: impl IntoExprs) -> Self {
        self.order_cols = ColumnListExpression::new(cols);
        self
    }

    pub fn name(&self) -> Option<&IdentifierExpression> {
        self.name.as_ref()
    }

    pub fn parent(&self) -> Option<&IdentifierExpression> {
        self.parent.as_ref()
    }

    pub fn partition_cols(&self) -> &ColumnListExpression {
        &self.partition_cols
    }

    pub fn order_cols(&self) -> &ColumnListExpression {
        &self.order_cols
    }

    pub fn has_partition_by(&self) -> bool {
        !self.partition_cols.is_empty()
    }

    pub fn has_order(&self) -> bool {
        !self.order_cols.is_empty()
    }
}

impl IntoIterator for WindowExpression {
    type Item = WindowExpression;
    type IntoIter = std::iter::Once<WindowExpression>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

/// One `WHEN condition THEN result` branch.
#[derive(Debug, Clone)]
pub struct CaseWhen {
    condition: Expr,
    result: Expr,
}

impl CaseWhen {
    pub fn condition(&self) -> &Expr {
        &self.condition
    }

    pub fn result(&self) -> &Expr {
        &self.result
    }
}

/// `CASE [value] WHEN ... THEN ... [ELSE ...] END`
#[derive(Debug, Clone, Default)]
pub struct CaseExpression {
    value: Option<Expr>,
    whens: Vec<CaseWhen>,
    else_result: Option<Expr>,
}

impl CaseExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy turned into a value CASE comparing `value` against each WHEN.
    pub fn value(mut self, value: impl IntoExpr) -> Self {
        self.value = Some(value.into_expr());
        self
    }

    pub fn when(mut self, condition: impl IntoExpr, result: impl IntoExpr) -> Self {
        self.whens.push(CaseWhen {
            condition: condition.into_expr(),
            result: result.into_expr(),
        });
        self
    }

    pub fn else_(mut self, result: impl IntoExpr) -> Self {
        self.else_result = Some(result.into_expr());
        self
    }

    pub fn get_value(&self) -> Option<&Expr> {
        self.value.as_ref()
    }

    pub fn get_whens(&self) -> &[CaseWhen] {
        &self.whens
    }

    pub fn get_else(&self) -> Option<&Expr> {
        self.else_result.as_ref()
    }
}
