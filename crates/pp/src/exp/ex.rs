//! Map-style condition and row inputs: `Ex`, `ExOr`, `Op` and `Record`.

use std::collections::{BTreeMap, HashMap};

use super::boolean::{BooleanExpression, BooleanOperation, RangeExpression, RangeOperation};
use super::ident::parse_identifier;
use super::list::ExpressionList;
use super::{Expr, IntoExpr};
use crate::error::{PpError, PpResult};

/// Operator map for one `Ex` key: `{"gt": 1, "lt": 10}`.
///
/// Several operators on the same key are OR'ed together.
#[derive(Debug, Clone, Default)]
pub struct Op(BTreeMap<String, Expr>);

impl Op {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with another `operator => operand` entry.
    pub fn with(mut self, operator: impl Into<String>, operand: impl IntoExpr) -> Self {
        self.0.insert(operator.into(), operand.into_expr());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Expr)> {
        self.0.iter()
    }
}

/// The value side of an `Ex` entry.
#[derive(Debug, Clone)]
pub enum ExValue {
    Value(Expr),
    Op(Op),
}

/// Conversion into an `Ex` entry value.
pub trait IntoExValue {
    fn into_ex_value(self) -> ExValue;
}

impl<T: IntoExpr> IntoExValue for T {
    fn into_ex_value(self) -> ExValue {
        ExValue::Value(self.into_expr())
    }
}

impl IntoExValue for Op {
    fn into_ex_value(self) -> ExValue {
        ExValue::Op(self)
    }
}

macro_rules! ex_map {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name(BTreeMap<String, ExValue>);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Copy with another `column => value` entry.
            pub fn with(mut self, column: impl Into<String>, value: impl IntoExValue) -> Self {
                self.0.insert(column.into(), value.into_ex_value());
                self
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Expand into boolean expressions, keys in sorted order.
            pub fn to_expressions(&self) -> PpResult<ExpressionList> {
                to_expression_list(|exprs| ExpressionList::$kind(exprs), &self.0)
            }
        }
    };
}

ex_map!(
    /// Column conditions joined with AND.
    ///
    /// Plain values compare with `=` (normalized to IS / IN where needed),
    /// `Op` values apply each named operator.
    Ex,
    and
);

ex_map!(
    /// Column conditions joined with OR.
    ExOr,
    or
);

fn to_expression_list(
    combine: fn(Vec<Expr>) -> ExpressionList,
    entries: &BTreeMap<String, ExValue>,
) -> PpResult<ExpressionList> {
    let mut out = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let lhs = Expr::Ident(parse_identifier(key));
        match value {
            ExValue::Value(rhs) => out.push(
                BooleanExpression::normalized(BooleanOperation::Eq, lhs, rhs.clone()).into(),
            ),
            ExValue::Op(op) => {
                let mut ors = Vec::new();
                for (name, operand) in op.iter() {
                    ors.push(op_expression(name, lhs.clone(), operand.clone())?);
                }
                match ors.len() {
                    0 => {}
                    1 => out.extend(ors),
                    _ => out.push(ExpressionList::or(ors).into()),
                }
            }
        }
    }
    Ok(combine(out))
}

fn op_expression(name: &str, lhs: Expr, operand: Expr) -> PpResult<Expr> {
    if let Some(op) = BooleanOperation::from_name(name) {
        let rhs = match op {
            BooleanOperation::In | BooleanOperation::NotIn => BooleanExpression::in_list(operand),
            _ => operand,
        };
        return Ok(BooleanExpression::normalized(op, lhs, rhs).into());
    }
    if let Some(op) = RangeOperation::from_name(name) {
        return match operand {
            Expr::RangeVal(range) => Ok(RangeExpression::new(op, lhs, *range).into()),
            other => Err(PpError::UnsupportedExOperator(format!(
                "{name} requires a range value got {}",
                other.describe()
            ))),
        };
    }
    Err(PpError::UnsupportedExOperator(name.to_string()))
}

/// One row keyed by column name.
///
/// Keys are kept in sorted byte order, which is the order columns are
/// emitted in INSERT column lists and UPDATE SET lists.
#[derive(Debug, Clone, Default)]
pub struct Record(BTreeMap<String, Expr>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with another `column => value` entry.
    pub fn with(mut self, column: impl Into<String>, value: impl IntoExpr) -> Self {
        self.0.insert(column.into(), value.into_expr());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl IntoExpr) -> Option<Expr> {
        self.0.insert(column.into(), value.into_expr())
    }

    pub fn get(&self, column: &str) -> Option<&Expr> {
        self.0.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Expr)> {
        self.0.iter()
    }

    /// Build a record from any serializable struct or map.
    ///
    /// Top-level object keys become columns; nested objects and arrays are
    /// stored as JSON values.
    pub fn from_serialize<T: serde::Serialize + ?Sized>(value: &T) -> PpResult<Self> {
        let json = serde_json::to_value(value).map_err(|e| PpError::encode(e.to_string()))?;
        match json {
            serde_json::Value::Object(map) => Ok(Self(
                map.into_iter().map(|(k, v)| (k, json_to_expr(v))).collect(),
            )),
            other => Err(PpError::UnsupportedInsertShape(json_type_name(&other).to_string())),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn json_to_expr(value: serde_json::Value) -> Expr {
    match value {
        serde_json::Value::Null => crate::value::Value::Null.into_expr(),
        serde_json::Value::Bool(b) => b.into_expr(),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into_expr()
            } else if let Some(u) = n.as_u64() {
                u.into_expr()
            } else {
                n.as_f64().unwrap_or(f64::NAN).into_expr()
            }
        }
        serde_json::Value::String(s) => s.into_expr(),
        other => other.into_expr(),
    }
}

impl<K: Into<String>, V: IntoExpr> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into_expr()))
                .collect(),
        )
    }
}

impl<V: IntoExpr> From<HashMap<String, V>> for Record {
    fn from(map: HashMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<V: IntoExpr> From<BTreeMap<String, V>> for Record {
    fn from(map: BTreeMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

impl IntoIterator for Record {
    type Item = (String, Expr);
    type IntoIter = std::collections::btree_map::IntoIter<String, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
