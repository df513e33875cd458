//! Free functions that build expression nodes.
//!
//! ```ignore
//! use pp::{c, i, l, count};
//!
//! let ds = pp::from("items")
//!     .select((c("name"), count(star()).as_("n")))
//!     .where_(c("price").gt(10))
//!     .group_by("name");
//! ```

use crate::dataset::IntoAppendable;
use crate::exp::{
    CaseExpression, CastExpression, ColumnListExpression, ConflictExpression, ConflictUpdate,
    Expr, ExpressionList, IdentifierExpression, IntoArgs, IntoExpr, IntoExprs, IntoIdentifier,
    JoinCondition, LateralExpression, LiteralExpression, RangeVal, SqlFunctionExpression,
    WindowExpression, parse_identifier,
};
use crate::reflect::IntoUpdate;

/// A column identifier: `"col"`. `"*"` selects every column.
pub fn c(col: &str) -> IdentifierExpression {
    IdentifierExpression::new("", "", col)
}

/// A dotted identifier: `"schema"."table"."col"`, `"table"."col"` or `"col"`.
pub fn i(ident: &str) -> IdentifierExpression {
    parse_identifier(ident)
}

/// A table identifier.
pub fn t(table: &str) -> IdentifierExpression {
    IdentifierExpression::new("", table, "")
}

/// A schema identifier.
pub fn s(schema: &str) -> IdentifierExpression {
    IdentifierExpression::new(schema, "", "")
}

/// Raw SQL without interpolation.
pub fn l(sql: &str) -> LiteralExpression {
    LiteralExpression::new(sql, Vec::new())
}

/// Raw SQL whose `?` markers are replaced by `args`, in order. Arguments
/// are values, so strings bind as strings; use [`c`] for columns.
///
/// ```ignore
/// pp::lit("? + ?", (pp::c("a"), 1))
/// ```
pub fn lit(sql: &str, args: impl IntoArgs) -> LiteralExpression {
    LiteralExpression::new(sql, args.into_args())
}

/// A value in expression position, e.g. for the left side of a comparison.
pub fn v(value: impl IntoExpr) -> Expr {
    value.into_expr()
}

/// Conditions joined with AND.
pub fn and(exprs: impl IntoExprs) -> ExpressionList {
    ExpressionList::and(exprs.into_exprs())
}

/// Conditions joined with OR.
pub fn or(exprs: impl IntoExprs) -> ExpressionList {
    ExpressionList::or(exprs.into_exprs())
}

/// `NAME(args...)`
pub fn func(name: &str, args: impl IntoArgs) -> SqlFunctionExpression {
    SqlFunctionExpression::new(name, args.into_args())
}

/// `CAST(expr AS ty)`
pub fn cast(expr: impl IntoExpr, ty: &str) -> CastExpression {
    CastExpression::new(expr.into_expr(), ty)
}

/// An empty CASE; add branches with `when` and `else_`.
pub fn case() -> CaseExpression {
    CaseExpression::new()
}

/// A window specification; an empty name gives an inline window.
pub fn w(name: &str) -> WindowExpression {
    let name = (!name.is_empty()).then(|| name.into_identifier());
    WindowExpression::new(name)
}

/// `ON (conditions)` for a join.
pub fn on(conditions: impl IntoExprs) -> JoinCondition {
    JoinCondition::On(ExpressionList::and(conditions.into_exprs()))
}

/// `USING (cols)` for a join.
pub fn using(cols: impl IntoExprs) -> JoinCondition {
    JoinCondition::Using(ColumnListExpression::new(cols))
}

/// The unquoted `*`.
pub fn star() -> Expr {
    Expr::Star
}

/// The `DEFAULT` keyword.
pub fn default_value() -> Expr {
    Expr::Default
}

/// `LATERAL (sub_query)` for FROM lists and joins.
pub fn lateral(sub_query: impl IntoAppendable) -> LateralExpression {
    LateralExpression::new(sub_query.into_appendable())
}

/// `ANY(value)`
pub fn any(value: impl IntoExpr) -> SqlFunctionExpression {
    SqlFunctionExpression::new("ANY", vec![value.into_expr()])
}

/// `ALL(value)`
pub fn all(value: impl IntoExpr) -> SqlFunctionExpression {
    SqlFunctionExpression::new("ALL", vec![value.into_expr()])
}

/// `ON CONFLICT DO NOTHING`, or `INSERT IGNORE` where the dialect has it.
pub fn do_nothing() -> ConflictExpression {
    ConflictExpression::DoNothing
}

/// `ON CONFLICT (target) DO UPDATE SET ...`
///
/// `target` is raw SQL: a column list, or `ON CONSTRAINT name`.
pub fn do_update(target: &str, update: impl IntoUpdate) -> ConflictUpdate {
    ConflictUpdate::new(target, Some(update.into_update()))
}

/// The `start AND end` pair for `between`.
pub fn range(start: impl IntoExpr, end: impl IntoExpr) -> RangeVal {
    RangeVal::new(start, end)
}

macro_rules! unary_functions {
    ($($(#[$meta:meta])* $name:ident => $sql:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(expr: impl IntoExpr) -> SqlFunctionExpression {
                SqlFunctionExpression::new($sql, vec![expr.into_expr()])
            }
        )*
    };
}

unary_functions!(
    /// `COUNT(expr)`; pass [`star()`] for `COUNT(*)`.
    count => "COUNT",
    sum => "SUM",
    avg => "AVG",
    min => "MIN",
    max => "MAX",
    first => "FIRST",
    last => "LAST",
    /// `DISTINCT(expr)`
    distinct => "DISTINCT",
    first_value => "FIRST_VALUE",
    last_value => "LAST_VALUE",
);

/// `COALESCE(args...)`
pub fn coalesce(args: impl IntoArgs) -> SqlFunctionExpression {
    SqlFunctionExpression::new("COALESCE", args.into_args())
}

macro_rules! nullary_functions {
    ($($name:ident => $sql:literal),* $(,)?) => {
        $(
            pub fn $name() -> SqlFunctionExpression {
                SqlFunctionExpression::new($sql, Vec::new())
            }
        )*
    };
}

nullary_functions!(
    row_number => "ROW_NUMBER",
    rank => "RANK",
    dense_rank => "DENSE_RANK",
    percent_rank => "PERCENT_RANK",
    cume_dist => "CUME_DIST",
);

/// `NTILE(n)`
pub fn ntile(n: i64) -> SqlFunctionExpression {
    SqlFunctionExpression::new("NTILE", vec![n.into_expr()])
}

/// `NTH_VALUE(expr, n)`
pub fn nth_value(expr: impl IntoExpr, n: i64) -> SqlFunctionExpression {
    SqlFunctionExpression::new("NTH_VALUE", vec![expr.into_expr(), n.into_expr()])
}
