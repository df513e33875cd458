//! The expression tree.
//!
//! [`Expr`] is the closed set of nodes the SQL generator knows how to render.
//! Concrete node types (identifiers, literals, boolean operations, ...) live in
//! the submodules and convert into `Expr` with `From`/[`IntoExpr`].
//!
//! Most node types carry the same operator surface (`eq`, `like`, `in_`,
//! `between`, `asc`, `cast`, bitwise operators, ...), generated by
//! `impl_expr_ops!` so that `c("a").gt(10)` and `l("NOW()").lt(t)` read the
//! same.

mod boolean;
mod clauses;
mod ex;
mod func;
mod ident;
mod join;
mod list;
mod literal;

#[cfg(test)]
mod tests;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::sb::SqlBuilder;
use crate::value::Value;

pub use boolean::{
    BitwiseExpression, BitwiseOperation, BooleanExpression, BooleanOperation, RangeExpression,
    RangeOperation, RangeVal,
};
pub use clauses::{
    DeleteClauses, InsertClauses, SelectClauses, TruncateClauses, TruncateOptions, UpdateClauses,
};
pub use ex::{Ex, ExOr, ExValue, IntoExValue, Op, Record};
pub use func::{
    CaseExpression, CaseWhen, SqlFunctionExpression, SqlWindowFunctionExpression,
    WindowExpression,
};
pub use ident::{Column, IdentifierExpression, IntoIdentifier, parse_identifier};
pub use join::{
    CommonTableExpression, CompoundExpression, CompoundType, ConflictExpression, ConflictUpdate,
    JoinCondition, JoinExpression, JoinType, LateralExpression, Lock, LockStrength, WaitOption,
};
pub use list::{
    ColumnListExpression, ExpressionList, ExpressionListType, NullSortType, OrderedExpression,
    SortDirection, UpdateExpression,
};
pub use literal::{AliasedExpression, CastExpression, LiteralExpression};

/// A statement that can embed itself as a parenthesized sub-query.
///
/// Implemented by every dataset. The generator renders it as
/// `(<statement>)` followed by ` AS <alias>` when an alias is set.
pub trait AppendableExpression: fmt::Debug + Send + Sync {
    /// Write this statement into `b` without surrounding parentheses.
    fn append_sql(&self, b: &mut SqlBuilder);

    /// Alias used when the statement appears as a derived table.
    fn alias(&self) -> Option<&IdentifierExpression>;

    /// Whether the statement produces a result set.
    fn returns_columns(&self) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a sub-query.
pub type Appendable = Arc<dyn AppendableExpression>;

/// Every node the SQL generator can render.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A scalar rendered inline or as a placeholder.
    Value(Value),
    Ident(IdentifierExpression),
    Literal(LiteralExpression),
    Aliased(Box<AliasedExpression>),
    Boolean(Box<BooleanExpression>),
    Bitwise(Box<BitwiseExpression>),
    Range(Box<RangeExpression>),
    /// The `start AND end` pair of a BETWEEN.
    RangeVal(Box<RangeVal>),
    Func(SqlFunctionExpression),
    WindowFunc(Box<SqlWindowFunctionExpression>),
    Window(Box<WindowExpression>),
    Case(Box<CaseExpression>),
    Ordered(Box<OrderedExpression>),
    UpdateSet(Box<UpdateExpression>),
    ColumnList(ColumnListExpression),
    List(ExpressionList),
    /// A parenthesized value list, e.g. the right side of IN.
    Tuple(Vec<Expr>),
    Cast(Box<CastExpression>),
    Lateral(LateralExpression),
    CommonTable(Box<CommonTableExpression>),
    Compound(Box<CompoundExpression>),
    Query(Appendable),
    /// A regular-expression pattern; selects the REGEXP operator family.
    Regex(String),
    Ex(Ex),
    ExOr(ExOr),
    /// The `DEFAULT` keyword.
    Default,
    /// The unquoted `*` marker.
    Star,
}

impl Expr {
    /// A regular-expression pattern from its source text.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Expr::Regex(pattern.into())
    }

    /// `true` for the SQL NULL value.
    pub fn is_null_value(&self) -> bool {
        matches!(self, Expr::Value(Value::Null))
    }

    /// The identifier inside this expression, if it is one.
    pub fn as_identifier(&self) -> Option<&IdentifierExpression> {
        match self {
            Expr::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// The sub-query inside this expression, if it is one.
    pub fn as_query(&self) -> Option<&Appendable> {
        match self {
            Expr::Query(q) => Some(q),
            _ => None,
        }
    }

    /// Whether this expression names a table or sub-query rather than a plain value.
    pub(crate) fn is_table_like(&self) -> bool {
        !matches!(
            self,
            Expr::Value(_)
                | Expr::Tuple(_)
                | Expr::Regex(_)
                | Expr::Default
                | Expr::Star
                | Expr::RangeVal(_)
        )
    }

    /// Short description used in panic and error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Expr::Value(v) => v.type_name().to_string(),
            Expr::Tuple(_) => "tuple".to_string(),
            Expr::Regex(_) => "regex".to_string(),
            Expr::Default => "default".to_string(),
            Expr::Star => "star".to_string(),
            Expr::RangeVal(_) => "range".to_string(),
            other => format!("{other:?}"),
        }
    }
}

/// Conversion into an [`Expr`] in value position.
///
/// Strings convert to string values; use [`crate::c`] or [`crate::i`] for
/// identifiers. Vectors and arrays convert to a parenthesized tuple.
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for &Expr {
    fn into_expr(self) -> Expr {
        self.clone()
    }
}

impl IntoExpr for Value {
    fn into_expr(self) -> Expr {
        Expr::Value(self)
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Value(v)
    }
}

macro_rules! impl_into_expr_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoExpr for $t {
                fn into_expr(self) -> Expr {
                    Expr::Value(Value::from(self))
                }
            }

            impl IntoArgs for $t {
                fn into_args(self) -> Vec<Expr> {
                    vec![self.into_expr()]
                }
            }
        )*
    };
}

impl_into_expr_value!(
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    char,
    &str,
    String,
    &String,
    bytes::Bytes,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::DateTime<chrono::Utc>,
    chrono::NaiveDateTime,
    chrono::NaiveDate,
    uuid::Uuid,
    serde_json::Value,
);

impl<T: IntoExpr> IntoExpr for Option<T> {
    fn into_expr(self) -> Expr {
        match self {
            Some(v) => v.into_expr(),
            None => Expr::Value(Value::Null),
        }
    }
}

impl<T: IntoExpr> IntoExpr for Vec<T> {
    fn into_expr(self) -> Expr {
        Expr::Tuple(self.into_iter().map(IntoExpr::into_expr).collect())
    }
}

impl<T: IntoExpr, const N: usize> IntoExpr for [T; N] {
    fn into_expr(self) -> Expr {
        Expr::Tuple(self.into_iter().map(IntoExpr::into_expr).collect())
    }
}

impl<T: IntoExpr + Clone> IntoExpr for &[T] {
    fn into_expr(self) -> Expr {
        Expr::Tuple(self.iter().cloned().map(IntoExpr::into_expr).collect())
    }
}

#[cfg(feature = "regex")]
impl IntoExpr for regex::Regex {
    fn into_expr(self) -> Expr {
        Expr::Regex(self.as_str().to_string())
    }
}

#[cfg(feature = "regex")]
impl IntoExpr for &regex::Regex {
    fn into_expr(self) -> Expr {
        Expr::Regex(self.as_str().to_string())
    }
}

impl IntoExpr for Appendable {
    fn into_expr(self) -> Expr {
        Expr::Query(self)
    }
}

/// Implements `From<$node> for Expr` and `IntoExpr` for node types.
macro_rules! impl_node_into_expr {
    ($wrap:path: $($node:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Expr {
                fn from(node: $node) -> Self {
                    Expr::$variant($wrap(node))
                }
            }

            impl IntoExpr for $node {
                fn into_expr(self) -> Expr {
                    Expr::from(self)
                }
            }

            impl IntoArgs for $node {
                fn into_args(self) -> Vec<Expr> {
                    vec![Expr::from(self)]
                }
            }
        )*
    };
}

fn unboxed<T>(node: T) -> T {
    node
}

impl_node_into_expr!(unboxed:
    IdentifierExpression => Ident,
    LiteralExpression => Literal,
    SqlFunctionExpression => Func,
    ColumnListExpression => ColumnList,
    ExpressionList => List,
    LateralExpression => Lateral,
    Ex => Ex,
    ExOr => ExOr,
);

impl_node_into_expr!(Box::new:
    AliasedExpression => Aliased,
    BooleanExpression => Boolean,
    BitwiseExpression => Bitwise,
    RangeExpression => Range,
    RangeVal => RangeVal,
    SqlWindowFunctionExpression => WindowFunc,
    WindowExpression => Window,
    CaseExpression => Case,
    OrderedExpression => Ordered,
    UpdateExpression => UpdateSet,
    CastExpression => Cast,
    CommonTableExpression => CommonTable,
    CompoundExpression => Compound,
);

/// Conversion into an argument list in value position, used by literal
/// interpolation and function calls.
///
/// A single value is one argument; tuples, vectors and arrays spread into
/// one argument per element. Strings are values here, so use [`crate::c`]
/// for columns and wrap a list in a one-element tuple to pass it as a
/// single parenthesized argument.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Expr>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Expr> {
        Vec::new()
    }
}

macro_rules! impl_single_into_args {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoArgs for $t {
                fn into_args(self) -> Vec<Expr> {
                    vec![self.into_expr()]
                }
            }
        )*
    };
}

impl_single_into_args!(Expr, &Expr, Value, Appendable);

#[cfg(feature = "regex")]
impl_single_into_args!(regex::Regex, &regex::Regex);

impl<T: IntoExpr> IntoArgs for Option<T> {
    fn into_args(self) -> Vec<Expr> {
        vec![self.into_expr()]
    }
}

impl<T: IntoExpr> IntoArgs for Vec<T> {
    fn into_args(self) -> Vec<Expr> {
        self.into_iter().map(IntoExpr::into_expr).collect()
    }
}

impl<T: IntoExpr, const N: usize> IntoArgs for [T; N] {
    fn into_args(self) -> Vec<Expr> {
        self.into_iter().map(IntoExpr::into_expr).collect()
    }
}

impl<T: IntoExpr + Clone> IntoArgs for &[T] {
    fn into_args(self) -> Vec<Expr> {
        self.iter().cloned().map(IntoExpr::into_expr).collect()
    }
}

macro_rules! impl_tuple_into_args {
    ($($name:ident),+) => {
        impl<$($name: IntoExpr),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Expr> {
                let ($($name,)+) = self;
                vec![$($name.into_expr()),+]
            }
        }
    };
}

impl_tuple_into_args!(A);
impl_tuple_into_args!(A, B);
impl_tuple_into_args!(A, B, C);
impl_tuple_into_args!(A, B, C, D);
impl_tuple_into_args!(A, B, C, D, E);
impl_tuple_into_args!(A, B, C, D, E, F);
impl_tuple_into_args!(A, B, C, D, E, F, G);
impl_tuple_into_args!(A, B, C, D, E, F, G, H);

/// Conversion into a list of expressions in column position.
///
/// Strings are parsed as (possibly dotted) identifiers, so
/// `select(("a", "t.b"))` selects two columns. Tuples, arrays and vectors
/// flatten; `()` and `None` contribute nothing.
pub trait IntoExprs {
    fn into_exprs(self) -> Vec<Expr>;
}

impl IntoExprs for () {
    fn into_exprs(self) -> Vec<Expr> {
        Vec::new()
    }
}

impl IntoExprs for &str {
    fn into_exprs(self) -> Vec<Expr> {
        vec![Expr::Ident(parse_identifier(self))]
    }
}

impl IntoExprs for String {
    fn into_exprs(self) -> Vec<Expr> {
        self.as_str().into_exprs()
    }
}

impl IntoExprs for &String {
    fn into_exprs(self) -> Vec<Expr> {
        self.as_str().into_exprs()
    }
}

impl IntoExprs for Expr {
    fn into_exprs(self) -> Vec<Expr> {
        match self {
            Expr::ColumnList(list) => list.into_columns(),
            other => vec![other],
        }
    }
}

impl IntoExprs for Appendable {
    fn into_exprs(self) -> Vec<Expr> {
        vec![Expr::Query(self)]
    }
}

macro_rules! impl_node_into_exprs {
    ($($node:ty),* $(,)?) => {
        $(
            impl IntoExprs for $node {
                fn into_exprs(self) -> Vec<Expr> {
                    Expr::from(self).into_exprs()
                }
            }
        )*
    };
}

impl_node_into_exprs!(
    IdentifierExpression,
    LiteralExpression,
    AliasedExpression,
    BooleanExpression,
    BitwiseExpression,
    RangeExpression,
    SqlFunctionExpression,
    SqlWindowFunctionExpression,
    WindowExpression,
    CaseExpression,
    OrderedExpression,
    UpdateExpression,
    ColumnListExpression,
    ExpressionList,
    CastExpression,
    LateralExpression,
    Ex,
    ExOr,
);

impl<T: IntoExprs> IntoExprs for Option<T> {
    fn into_exprs(self) -> Vec<Expr> {
        self.map(IntoExprs::into_exprs).unwrap_or_default()
    }
}

impl<T: IntoExprs> IntoExprs for Vec<T> {
    fn into_exprs(self) -> Vec<Expr> {
        self.into_iter().flat_map(IntoExprs::into_exprs).collect()
    }
}

impl<T: IntoExprs, const N: usize> IntoExprs for [T; N] {
    fn into_exprs(self) -> Vec<Expr> {
        self.into_iter().flat_map(IntoExprs::into_exprs).collect()
    }
}

impl<T: IntoExprs + Clone> IntoExprs for &[T] {
    fn into_exprs(self) -> Vec<Expr> {
        self.iter().cloned().flat_map(IntoExprs::into_exprs).collect()
    }
}

macro_rules! impl_tuple_into_exprs {
    ($($name:ident),+) => {
        impl<$($name: IntoExprs),+> IntoExprs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_exprs(self) -> Vec<Expr> {
                let ($($name,)+) = self;
                let mut out = Vec::new();
                $(out.extend($name.into_exprs());)+
                out
            }
        }
    };
}

impl_tuple_into_exprs!(A);
impl_tuple_into_exprs!(A, B);
impl_tuple_into_exprs!(A, B, C);
impl_tuple_into_exprs!(A, B, C, D);
impl_tuple_into_exprs!(A, B, C, D, E);
impl_tuple_into_exprs!(A, B, C, D, E, F);
impl_tuple_into_exprs!(A, B, C, D, E, F, G);
impl_tuple_into_exprs!(A, B, C, D, E, F, G, H);
impl_tuple_into_exprs!(A, B, C, D, E, F, G, H, I);
impl_tuple_into_exprs!(A, B, C, D, E, F, G, H, I, J);
impl_tuple_into_exprs!(A, B, C, D, E, F, G, H, I, J, K);
impl_tuple_into_exprs!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Conversion into a table reference (INSERT INTO, UPDATE, DELETE FROM).
///
/// Strings are parsed as identifiers; expressions pass through and are
/// validated by the dataset receiving them.
pub trait IntoTable {
    fn into_table(self) -> Expr;
}

impl IntoTable for &str {
    fn into_table(self) -> Expr {
        Expr::Ident(parse_identifier(self))
    }
}

impl IntoTable for String {
    fn into_table(self) -> Expr {
        Expr::Ident(parse_identifier(&self))
    }
}

impl IntoTable for &String {
    fn into_table(self) -> Expr {
        Expr::Ident(parse_identifier(self))
    }
}

impl IntoTable for Expr {
    fn into_table(self) -> Expr {
        self
    }
}

impl IntoTable for IdentifierExpression {
    fn into_table(self) -> Expr {
        Expr::Ident(self)
    }
}

impl IntoTable for LiteralExpression {
    fn into_table(self) -> Expr {
        Expr::Literal(self)
    }
}

impl IntoTable for AliasedExpression {
    fn into_table(self) -> Expr {
        Expr::from(self)
    }
}

impl IntoTable for LateralExpression {
    fn into_table(self) -> Expr {
        Expr::Lateral(self)
    }
}

/// Generates the shared operator surface for an expression node type.
macro_rules! impl_expr_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            #[allow(clippy::should_implement_trait, clippy::wrong_self_convention)]
            impl $ty {
                /// `self AS alias`
                pub fn as_(self, alias: impl $crate::exp::IntoIdentifier) -> $crate::exp::AliasedExpression {
                    $crate::exp::AliasedExpression::new(self, alias.into_identifier())
                }

                /// `self = v`; NULL, booleans, tuples and regexes select IS, IN and REGEXP forms.
                pub fn eq(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::normalized($crate::exp::BooleanOperation::Eq, self.into(), v.into_expr())
                }

                /// `self != v`, normalized like [`Self::eq`].
                pub fn neq(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::normalized($crate::exp::BooleanOperation::Neq, self.into(), v.into_expr())
                }

                pub fn gt(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::new($crate::exp::BooleanOperation::Gt, self.into(), v.into_expr())
                }

                pub fn gte(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::new($crate::exp::BooleanOperation::Gte, self.into(), v.into_expr())
                }

                pub fn lt(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::new($crate::exp::BooleanOperation::Lt, self.into(), v.into_expr())
                }

                pub fn lte(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::new($crate::exp::BooleanOperation::Lte, self.into(), v.into_expr())
                }

                /// `self IS v`
                pub fn is(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::new($crate::exp::BooleanOperation::Is, self.into(), v.into_expr())
                }

                /// `self IS NOT v`
                pub fn is_not(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::new($crate::exp::BooleanOperation::IsNot, self.into(), v.into_expr())
                }

                pub fn is_null(self) -> $crate::exp::BooleanExpression {
                    self.is($crate::value::Value::Null)
                }

                pub fn is_not_null(self) -> $crate::exp::BooleanExpression {
                    self.is_not($crate::value::Value::Null)
                }

                pub fn is_true(self) -> $crate::exp::BooleanExpression {
                    self.is(true)
                }

                pub fn is_not_true(self) -> $crate::exp::BooleanExpression {
                    self.is_not(true)
                }

                pub fn is_false(self) -> $crate::exp::BooleanExpression {
                    self.is(false)
                }

                pub fn is_not_false(self) -> $crate::exp::BooleanExpression {
                    self.is_not(false)
                }

                /// `self LIKE pattern`; a regex pattern selects the REGEXP operator.
                pub fn like(self, pattern: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::normalized($crate::exp::BooleanOperation::Like, self.into(), pattern.into_expr())
                }

                pub fn not_like(self, pattern: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::normalized($crate::exp::BooleanOperation::NotLike, self.into(), pattern.into_expr())
                }

                pub fn ilike(self, pattern: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::normalized($crate::exp::BooleanOperation::ILike, self.into(), pattern.into_expr())
                }

                pub fn not_ilike(self, pattern: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::normalized($crate::exp::BooleanOperation::NotILike, self.into(), pattern.into_expr())
                }

                /// `self IN (...)`; a single scalar becomes a one-element list.
                pub fn in_(self, vals: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::new($crate::exp::BooleanOperation::In, self.into(), $crate::exp::BooleanExpression::in_list(vals.into_expr()))
                }

                pub fn not_in(self, vals: impl $crate::exp::IntoExpr) -> $crate::exp::BooleanExpression {
                    $crate::exp::BooleanExpression::new($crate::exp::BooleanOperation::NotIn, self.into(), $crate::exp::BooleanExpression::in_list(vals.into_expr()))
                }

                /// `self BETWEEN start AND end`
                pub fn between(self, range: $crate::exp::RangeVal) -> $crate::exp::RangeExpression {
                    $crate::exp::RangeExpression::new($crate::exp::RangeOperation::Between, self.into(), range)
                }

                pub fn not_between(self, range: $crate::exp::RangeVal) -> $crate::exp::RangeExpression {
                    $crate::exp::RangeExpression::new($crate::exp::RangeOperation::NotBetween, self.into(), range)
                }

                pub fn asc(self) -> $crate::exp::OrderedExpression {
                    $crate::exp::OrderedExpression::new(self.into(), $crate::exp::SortDirection::Asc)
                }

                pub fn desc(self) -> $crate::exp::OrderedExpression {
                    $crate::exp::OrderedExpression::new(self.into(), $crate::exp::SortDirection::Desc)
                }

                /// `CAST(self AS ty)`
                pub fn cast(self, ty: &str) -> $crate::exp::CastExpression {
                    $crate::exp::CastExpression::new(self.into(), ty)
                }

                /// `DISTINCT(self)`
                pub fn distinct(self) -> $crate::exp::SqlFunctionExpression {
                    $crate::exp::SqlFunctionExpression::new("DISTINCT", vec![self.into()])
                }

                /// `(~ self)`
                pub fn bitwise_inversion(self) -> $crate::exp::BitwiseExpression {
                    $crate::exp::BitwiseExpression::new($crate::exp::BitwiseOperation::Inversion, None, self.into())
                }

                pub fn bitwise_and(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BitwiseExpression {
                    $crate::exp::BitwiseExpression::new($crate::exp::BitwiseOperation::And, Some(self.into()), v.into_expr())
                }

                pub fn bitwise_or(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BitwiseExpression {
                    $crate::exp::BitwiseExpression::new($crate::exp::BitwiseOperation::Or, Some(self.into()), v.into_expr())
                }

                pub fn bitwise_xor(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BitwiseExpression {
                    $crate::exp::BitwiseExpression::new($crate::exp::BitwiseOperation::Xor, Some(self.into()), v.into_expr())
                }

                pub fn bitwise_left_shift(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BitwiseExpression {
                    $crate::exp::BitwiseExpression::new($crate::exp::BitwiseOperation::LeftShift, Some(self.into()), v.into_expr())
                }

                pub fn bitwise_right_shift(self, v: impl $crate::exp::IntoExpr) -> $crate::exp::BitwiseExpression {
                    $crate::exp::BitwiseExpression::new($crate::exp::BitwiseOperation::RightShift, Some(self.into()), v.into_expr())
                }
            }
        )*
    };
}

impl_expr_ops!(
    Expr,
    IdentifierExpression,
    LiteralExpression,
    SqlFunctionExpression,
    SqlWindowFunctionExpression,
    CaseExpression,
    CastExpression,
    BitwiseExpression,
);
