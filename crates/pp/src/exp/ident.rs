//! Schema/table/column identifiers.

use super::literal::LiteralExpression;
use super::list::UpdateExpression;
use super::{Expr, IntoExpr};

/// The column part of an identifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Column {
    /// No column: the identifier names a table or schema.
    #[default]
    Empty,
    Name(String),
    /// The unquoted `*` marker.
    Star,
    /// A raw column fragment, rendered without quoting.
    Literal(String),
}

impl Column {
    fn is_empty(&self) -> bool {
        match self {
            Column::Empty => true,
            Column::Name(name) => name.is_empty(),
            Column::Star | Column::Literal(_) => false,
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        match name {
            "" => Column::Empty,
            "*" => Column::Star,
            other => Column::Name(other.to_string()),
        }
    }
}

/// A possibly qualified identifier: `"schema"."table"."column"`.
///
/// Parts that are empty are skipped when rendering; an identifier with every
/// part empty fails the build with [`crate::PpError::EmptyIdentifier`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IdentifierExpression {
    schema: String,
    table: String,
    col: Column,
}

impl IdentifierExpression {
    pub fn new(schema: impl Into<String>, table: impl Into<String>, col: impl Into<Column>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            col: col.into(),
        }
    }

    /// Copy with a different schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Copy with a different table.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Copy with a different column. `"*"` selects the star marker.
    pub fn col(mut self, col: &str) -> Self {
        self.col = Column::from(col);
        self
    }

    /// Copy with the column replaced by a raw, unquoted fragment.
    pub fn col_literal(mut self, col: LiteralExpression) -> Self {
        self.col = Column::Literal(col.sql().to_string());
        self
    }

    /// Copy selecting every column: `"table".*`.
    pub fn all(mut self) -> Self {
        self.col = Column::Star;
        self
    }

    pub fn get_schema(&self) -> &str {
        &self.schema
    }

    pub fn get_table(&self) -> &str {
        &self.table
    }

    pub fn get_col(&self) -> &Column {
        &self.col
    }

    /// `true` when schema, table and column are all empty.
    pub fn is_empty(&self) -> bool {
        self.schema.is_empty() && self.table.is_empty() && self.col.is_empty()
    }

    /// `true` when the identifier has a table part and no column.
    pub fn is_qualified_table(&self) -> bool {
        !self.table.is_empty() && self.col.is_empty()
    }

    /// `col = value` for UPDATE SET and ON CONFLICT DO UPDATE.
    pub fn set(self, value: impl IntoExpr) -> UpdateExpression {
        UpdateExpression::new(self, value.into_expr())
    }
}

impl From<&str> for IdentifierExpression {
    fn from(s: &str) -> Self {
        parse_identifier(s)
    }
}

/// Parse a dotted identifier.
///
/// `"col"` → column, `"table.col"` → table + column, `"schema.table.col"` →
/// all three. Any other number of segments is kept verbatim as the column.
pub fn parse_identifier(ident: &str) -> IdentifierExpression {
    let parts: Vec<&str> = ident.split('.').collect();
    match parts.as_slice() {
        [table, col] => IdentifierExpression::new("", *table, *col),
        [schema, table, col] => IdentifierExpression::new(*schema, *table, *col),
        _ => IdentifierExpression::new("", "", ident),
    }
}

/// Conversion into an identifier (aliases, window names, conflict targets).
pub trait IntoIdentifier {
    fn into_identifier(self) -> IdentifierExpression;
}

impl IntoIdentifier for &str {
    fn into_identifier(self) -> IdentifierExpression {
        parse_identifier(self)
    }
}

impl IntoIdentifier for String {
    fn into_identifier(self) -> IdentifierExpression {
        parse_identifier(&self)
    }
}

impl IntoIdentifier for &String {
    fn into_identifier(self) -> IdentifierExpression {
        parse_identifier(self)
    }
}

impl IntoIdentifier for IdentifierExpression {
    fn into_identifier(self) -> IdentifierExpression {
        self
    }
}

impl PartialEq<IdentifierExpression> for Expr {
    fn eq(&self, other: &IdentifierExpression) -> bool {
        matches!(self, Expr::Ident(ident) if ident == other)
    }
}
