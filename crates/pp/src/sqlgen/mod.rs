//! SQL generation.
//!
//! [`SqlGenerator`] walks expression trees and clause containers and writes
//! dialect specific SQL into a [`SqlBuilder`]. Statement generators iterate
//! the dialect's fragment order; every step is skipped once the builder holds
//! an error.

mod delete;
mod insert;
mod select;
mod truncate;
mod update;

#[cfg(test)]
mod tests;

use std::fmt::Write as _;

use crate::dialect::{Dialect, DialectOptions, EmptyInStyle};
use crate::error::PpError;
use crate::exp::{
    Appendable, BitwiseExpression, BooleanExpression, BooleanOperation, CaseExpression,
    CastExpression, Column, ColumnListExpression, CommonTableExpression, CompoundExpression,
    CompoundType, Expr, ExpressionList, ExpressionListType, IdentifierExpression,
    LateralExpression, LiteralExpression, NullSortType, OrderedExpression, RangeExpression,
    SqlFunctionExpression, SqlWindowFunctionExpression, UpdateExpression, WindowExpression,
};
use crate::sb::SqlBuilder;
use crate::value::Value;

/// Renders expressions and statements for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct SqlGenerator<'a> {
    dialect: &'a Dialect,
}

impl<'a> SqlGenerator<'a> {
    pub fn new(dialect: &'a Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect_name(&self) -> &str {
        self.dialect.name()
    }

    fn opts(&self) -> &'a DialectOptions {
        self.dialect.options()
    }

    fn dialect_error(&self, make: fn(String) -> PpError) -> PpError {
        make(self.dialect.name().to_string())
    }

    /// Render one expression.
    pub fn generate(&self, b: &mut SqlBuilder, expr: &Expr) {
        if b.error().is_some() {
            return;
        }
        match expr {
            Expr::Value(v) => self.value(b, v),
            Expr::Ident(ident) => self.identifier(b, ident),
            Expr::Literal(lit) => self.literal(b, lit),
            Expr::Aliased(aliased) => {
                self.generate(b, aliased.aliased());
                b.push(self.opts().as_fragment);
                self.identifier(b, aliased.alias());
            }
            Expr::Boolean(be) => self.boolean(b, be),
            Expr::Bitwise(be) => self.bitwise(b, be),
            Expr::Range(range) => self.range(b, range),
            Expr::RangeVal(range) => {
                self.generate(b, range.start());
                b.push(self.opts().and_fragment);
                self.generate(b, range.end());
            }
            Expr::Func(func) => self.function(b, func),
            Expr::WindowFunc(func) => self.window_function(b, func),
            Expr::Window(window) => self.window(b, window, false),
            Expr::Case(case) => self.case(b, case),
            Expr::Ordered(ordered) => self.ordered(b, ordered),
            Expr::UpdateSet(update) => self.update_set(b, update),
            Expr::ColumnList(list) => self.column_list(b, list),
            Expr::List(list) => self.expression_list(b, list),
            Expr::Tuple(items) => self.tuple(b, items),
            Expr::Cast(cast) => self.cast(b, cast),
            Expr::Lateral(lateral) => self.lateral(b, lateral),
            Expr::CommonTable(cte) => self.common_table(b, cte),
            Expr::Compound(compound) => self.compound(b, compound),
            Expr::Query(query) => self.appendable(b, query),
            Expr::Regex(pattern) => self.value(b, &Value::String(pattern.clone())),
            Expr::Ex(ex) => match ex.to_expressions() {
                Ok(list) => self.expression_list(b, &list),
                Err(err) => {
                    b.set_error(err);
                }
            },
            Expr::ExOr(ex) => match ex.to_expressions() {
                Ok(list) => self.expression_list(b, &list),
                Err(err) => {
                    b.set_error(err);
                }
            },
            Expr::Default => {
                b.push(self.opts().default_literal);
            }
            Expr::Star => {
                b.push_char(self.opts().star_rune);
            }
        }
    }

    fn placeholder(&self, b: &mut SqlBuilder, value: Value) {
        b.push(self.opts().placeholder_fragment);
        if self.opts().include_placeholder_num {
            let pos = b.current_arg_position();
            b.push(&pos.to_string());
        }
        b.push_arg(value);
    }

    /// A scalar: a placeholder in prepared mode, an inline literal otherwise.
    pub fn value(&self, b: &mut SqlBuilder, value: &Value) {
        if b.is_prepared() {
            self.placeholder(b, value.clone());
            return;
        }
        let opts = self.opts();
        match value {
            Value::Null => {
                b.push(opts.null);
            }
            Value::Bool(true) => {
                b.push(opts.true_literal);
            }
            Value::Bool(false) => {
                b.push(opts.false_literal);
            }
            Value::Int(i) => {
                b.push(&i.to_string());
            }
            Value::UInt(u) => {
                b.push(&u.to_string());
            }
            Value::Float(f) => {
                if f.is_finite() {
                    b.push(&f.to_string());
                } else {
                    b.set_error(PpError::encode(f.to_string()));
                }
            }
            Value::String(s) => self.string(b, s),
            Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => self.string(b, s),
                Err(_) => {
                    b.set_error(PpError::encode(format!("{bytes:?}")));
                }
            },
            Value::Time(t) => {
                let location = opts
                    .time_location
                    .unwrap_or_else(crate::config::time_location);
                let mut out = String::new();
                match write!(out, "{}", t.with_timezone(&location).format(opts.time_format)) {
                    Ok(()) => self.string(b, &out),
                    Err(_) => {
                        b.set_error(PpError::encode(format!(
                            "time {t} with format {:?}",
                            opts.time_format
                        )));
                    }
                }
            }
            Value::Uuid(u) => self.string(b, &u.hyphenated().to_string()),
            Value::Json(json) => self.string(b, &json.to_string()),
        }
    }

    fn string(&self, b: &mut SqlBuilder, s: &str) {
        let opts = self.opts();
        b.push_char(opts.string_quote);
        for c in s.chars() {
            match opts.escaped_runes.get(&c) {
                Some(replacement) => {
                    b.push(replacement);
                }
                None if opts.escaped_runes.is_empty() && c == opts.string_quote => {
                    b.push_chars(&[c, c]);
                }
                None => {
                    b.push_char(c);
                }
            }
        }
        b.push_char(opts.string_quote);
    }

    fn quote(&self, b: &mut SqlBuilder, name: &str) {
        let q = self.opts().quote_rune;
        b.push_char(q);
        for c in name.chars() {
            if c == q {
                b.push_chars(&[q, q]);
            } else {
                b.push_char(c);
            }
        }
        b.push_char(q);
    }

    pub fn identifier(&self, b: &mut SqlBuilder, ident: &IdentifierExpression) {
        if ident.is_empty() {
            b.set_error(PpError::EmptyIdentifier);
            return;
        }
        let period = self.opts().period_rune;
        let mut written = false;
        for part in [ident.get_schema(), ident.get_table()] {
            if part.is_empty() {
                continue;
            }
            if written {
                b.push_char(period);
            }
            self.quote(b, part);
            written = true;
        }
        let col = match ident.get_col() {
            Column::Empty => return,
            Column::Name(name) if name.is_empty() => return,
            col => col,
        };
        if written {
            b.push_char(period);
        }
        match col {
            Column::Name(name) => self.quote(b, name),
            Column::Star => {
                b.push_char(self.opts().star_rune);
            }
            Column::Literal(sql) => {
                b.push(sql);
            }
            Column::Empty => {}
        }
    }

    fn literal(&self, b: &mut SqlBuilder, lit: &LiteralExpression) {
        if lit.args().is_empty() {
            b.push(lit.sql());
            return;
        }
        let mut args = lit.args().iter();
        for c in lit.sql().chars() {
            if c == '?' {
                if let Some(arg) = args.next() {
                    self.generate(b, arg);
                    continue;
                }
            }
            b.push_char(c);
        }
    }

    fn boolean(&self, b: &mut SqlBuilder, be: &BooleanExpression) {
        use BooleanOperation::*;
        let opts = self.opts();
        let mut op = be.op();
        let rhs = be.rhs();
        let empty_in = matches!(op, In | NotIn) && matches!(rhs, Expr::Tuple(items) if items.is_empty());

        if empty_in && opts.empty_in_style == EmptyInStyle::Boolean {
            b.push_char(opts.left_paren_rune);
            b.push(if op == In {
                opts.false_literal
            } else {
                opts.true_literal
            });
            b.push_char(opts.right_paren_rune);
            return;
        }

        let bool_rhs = matches!(rhs, Expr::Value(Value::Bool(_)));
        if bool_rhs && !opts.boolean_data_type_supported {
            op = match op {
                Is => Eq,
                IsNot => Neq,
                other => other,
            };
        }
        let Some(operator) = opts.boolean_operator_lookup.get(&op) else {
            b.set_error(PpError::UnsupportedBooleanOp(op.to_string()));
            return;
        };

        b.push_char(opts.left_paren_rune);
        self.generate(b, be.lhs());
        b.push_char(opts.space_rune);
        b.push(operator);
        b.push_char(opts.space_rune);
        match (op, rhs) {
            (Is | IsNot, Expr::Value(Value::Null)) => {
                b.push(opts.null);
            }
            (Is | IsNot, Expr::Value(Value::Bool(v))) if opts.use_literal_is_bools => {
                b.push(if *v { "TRUE" } else { "FALSE" });
            }
            _ if empty_in => {
                b.push_char(opts.left_paren_rune);
                b.push(opts.null);
                b.push_char(opts.right_paren_rune);
            }
            _ => self.generate(b, rhs),
        }
        b.push_char(opts.right_paren_rune);
    }

    fn bitwise(&self, b: &mut SqlBuilder, be: &BitwiseExpression) {
        let opts = self.opts();
        let Some(operator) = opts.bitwise_operator_lookup.get(&be.op()) else {
            b.set_error(PpError::UnsupportedBitwiseOp(be.op().to_string()));
            return;
        };
        b.push_char(opts.left_paren_rune);
        if let Some(lhs) = be.lhs() {
            self.generate(b, lhs);
            b.push_char(opts.space_rune);
        }
        b.push(operator);
        b.push_char(opts.space_rune);
        self.generate(b, be.rhs());
        b.push_char(opts.right_paren_rune);
    }

    fn range(&self, b: &mut SqlBuilder, range: &RangeExpression) {
        let opts = self.opts();
        let Some(operator) = opts.range_operator_lookup.get(&range.op()) else {
            b.set_error(PpError::UnsupportedRangeOp(range.op().to_string()));
            return;
        };
        b.push_char(opts.left_paren_rune);
        self.generate(b, range.lhs());
        b.push_char(opts.space_rune);
        b.push(operator);
        b.push_char(opts.space_rune);
        self.generate(b, range.rhs().start());
        b.push(opts.and_fragment);
        self.generate(b, range.rhs().end());
        b.push_char(opts.right_paren_rune);
    }

    fn function(&self, b: &mut SqlBuilder, func: &SqlFunctionExpression) {
        b.push(func.name());
        self.tuple(b, func.args());
    }

    fn window_function(&self, b: &mut SqlBuilder, func: &SqlWindowFunctionExpression) {
        if !self.opts().supports_window_function {
            b.set_error(self.dialect_error(PpError::WindowNotSupported));
            return;
        }
        self.function(b, func.func());
        b.push(self.opts().window_over_fragment);
        match (func.window_name(), func.window()) {
            (Some(name), _) => self.identifier(b, name),
            (None, Some(window)) => self.window(b, window, false),
            (None, None) => {
                b.push_chars(&[self.opts().left_paren_rune, self.opts().right_paren_rune]);
            }
        }
    }

    /// A window specification; `definition` renders `"name" AS (...)` for
    /// the WINDOW clause.
    pub(crate) fn window(&self, b: &mut SqlBuilder, window: &WindowExpression, definition: bool) {
        let opts = self.opts();
        if !opts.supports_window_function {
            b.set_error(self.dialect_error(PpError::WindowNotSupported));
            return;
        }
        match (definition, window.name()) {
            (true, Some(name)) => {
                self.identifier(b, name);
                b.push(opts.as_fragment);
            }
            (true, None) => {
                b.set_error(PpError::NoWindowName);
                return;
            }
            (false, Some(_)) => {
                b.set_error(PpError::UnexpectedNamedWindow);
                return;
            }
            (false, None) => {}
        }

        b.push_char(opts.left_paren_rune);
        let mut needs_space = false;
        if let Some(parent) = window.parent() {
            self.identifier(b, parent);
            needs_space = true;
        }
        if window.has_partition_by() {
            if needs_space {
                b.push_char(opts.space_rune);
            }
            b.push(opts.window_partition_by_fragment);
            self.column_list(b, window.partition_cols());
            needs_space = true;
        }
        if window.has_order() {
            if needs_space {
                b.push_char(opts.space_rune);
            }
            b.push(opts.window_order_by_fragment);
            self.column_list(b, window.order_cols());
        }
        b.push_char(opts.right_paren_rune);
    }

    fn case(&self, b: &mut SqlBuilder, case: &CaseExpression) {
        let opts = self.opts();
        if case.get_whens().is_empty() {
            b.set_error(PpError::EmptyCase);
            return;
        }
        b.push(opts.case_fragment);
        if let Some(value) = case.get_value() {
            b.push_char(opts.space_rune);
            self.generate(b, value);
        }
        for when in case.get_whens() {
            b.push(opts.when_fragment);
            self.generate(b, when.condition());
            b.push(opts.then_fragment);
            self.generate(b, when.result());
        }
        if let Some(else_result) = case.get_else() {
            b.push(opts.else_fragment);
            self.generate(b, else_result);
        }
        b.push(opts.end_fragment);
    }

    fn ordered(&self, b: &mut SqlBuilder, ordered: &OrderedExpression) {
        let opts = self.opts();
        self.generate(b, ordered.sort_expression());
        b.push(if ordered.is_asc() {
            opts.asc_fragment
        } else {
            opts.desc_fragment
        });
        match ordered.null_sort() {
            NullSortType::First => {
                b.push(opts.nulls_first_fragment);
            }
            NullSortType::Last => {
                b.push(opts.nulls_last_fragment);
            }
            NullSortType::None => {}
        }
    }

    pub(crate) fn update_set(&self, b: &mut SqlBuilder, update: &UpdateExpression) {
        self.identifier(b, update.col());
        b.push_char(self.opts().set_operator_rune);
        self.generate(b, update.value());
    }

    /// `a=1,b=2`
    pub(crate) fn update_set_list(&self, b: &mut SqlBuilder, updates: &[UpdateExpression]) {
        for (i, update) in updates.iter().enumerate() {
            if i > 0 {
                b.push_char(self.opts().comma_rune);
            }
            self.update_set(b, update);
        }
    }

    /// Items separated by `", "`.
    pub(crate) fn comma_list(&self, b: &mut SqlBuilder, items: &[Expr]) {
        let opts = self.opts();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                b.push_chars(&[opts.comma_rune, opts.space_rune]);
            }
            self.generate(b, item);
        }
    }

    pub fn column_list(&self, b: &mut SqlBuilder, list: &ColumnListExpression) {
        self.comma_list(b, list.columns());
    }

    /// A single operand renders bare; several are wrapped and joined.
    pub fn expression_list(&self, b: &mut SqlBuilder, list: &ExpressionList) {
        let opts = self.opts();
        match list.expressions() {
            [] => {}
            [only] => self.generate(b, only),
            exprs => {
                let joiner = match list.kind() {
                    ExpressionListType::And => opts.and_fragment,
                    ExpressionListType::Or => opts.or_fragment,
                };
                b.push_char(opts.left_paren_rune);
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        b.push(joiner);
                    }
                    self.generate(b, expr);
                }
                b.push_char(opts.right_paren_rune);
            }
        }
    }

    fn tuple(&self, b: &mut SqlBuilder, items: &[Expr]) {
        b.push_char(self.opts().left_paren_rune);
        self.comma_list(b, items);
        b.push_char(self.opts().right_paren_rune);
    }

    fn cast(&self, b: &mut SqlBuilder, cast: &CastExpression) {
        let opts = self.opts();
        b.push(opts.cast_fragment);
        b.push_char(opts.left_paren_rune);
        self.generate(b, cast.casted());
        b.push(opts.as_fragment);
        self.literal(b, cast.ty());
        b.push_char(opts.right_paren_rune);
    }

    fn lateral(&self, b: &mut SqlBuilder, lateral: &LateralExpression) {
        if !self.opts().supports_lateral {
            b.set_error(self.dialect_error(PpError::LateralNotSupported));
            return;
        }
        b.push(self.opts().lateral_fragment);
        self.appendable(b, lateral.table());
    }

    fn common_table(&self, b: &mut SqlBuilder, cte: &CommonTableExpression) {
        let opts = self.opts();
        self.literal(b, cte.name());
        b.push(opts.as_fragment);
        b.push_char(opts.left_paren_rune);
        cte.sub_query().append_sql(b);
        b.push_char(opts.right_paren_rune);
    }

    fn compound(&self, b: &mut SqlBuilder, compound: &CompoundExpression) {
        let opts = self.opts();
        b.push(match compound.kind() {
            CompoundType::Union => opts.union_fragment,
            CompoundType::UnionAll => opts.union_all_fragment,
            CompoundType::Intersect => opts.intersect_fragment,
            CompoundType::IntersectAll => opts.intersect_all_fragment,
        });
        if opts.wrap_compounds_in_parens {
            b.push_char(opts.left_paren_rune);
            compound.rhs().append_sql(b);
            b.push_char(opts.right_paren_rune);
        } else {
            compound.rhs().append_sql(b);
        }
    }

    /// `(<statement>)` plus ` AS alias` when the statement carries one.
    fn appendable(&self, b: &mut SqlBuilder, query: &Appendable) {
        let opts = self.opts();
        b.push_char(opts.left_paren_rune);
        query.append_sql(b);
        b.push_char(opts.right_paren_rune);
        if let Some(alias) = query.alias() {
            b.push(opts.as_fragment);
            self.identifier(b, alias);
        }
    }

    // Fragments shared by several statements.

    pub(crate) fn common_tables_sql(&self, b: &mut SqlBuilder, ctes: &[CommonTableExpression]) {
        if ctes.is_empty() {
            return;
        }
        let opts = self.opts();
        if !opts.supports_with_cte {
            b.set_error(self.dialect_error(PpError::CteNotSupported));
            return;
        }
        let recursive = ctes.iter().any(CommonTableExpression::is_recursive);
        if recursive && !opts.supports_with_cte_recursive {
            b.set_error(self.dialect_error(PpError::RecursiveCteNotSupported));
            return;
        }
        b.push(opts.with_fragment);
        if recursive {
            b.push(opts.recursive_fragment);
        }
        for (i, cte) in ctes.iter().enumerate() {
            if i > 0 {
                b.push_chars(&[opts.comma_rune, opts.space_rune]);
            }
            self.common_table(b, cte);
        }
        b.push_char(opts.space_rune);
    }

    pub(crate) fn where_sql(&self, b: &mut SqlBuilder, list: Option<&ExpressionList>) {
        if let Some(list) = list.filter(|l| !l.is_empty()) {
            b.push(self.opts().where_fragment);
            self.expression_list(b, list);
        }
    }

    pub(crate) fn order_sql(&self, b: &mut SqlBuilder, order: Option<&ColumnListExpression>) {
        if let Some(order) = order.filter(|o| !o.is_empty()) {
            b.push(self.opts().order_by_fragment);
            self.column_list(b, order);
        }
    }

    fn limit_value(&self, b: &mut SqlBuilder, limit: &Expr) {
        let opts = self.opts();
        if is_limit_all(limit) {
            b.push(opts.all_literal);
        } else if opts.surround_limit_with_parentheses {
            b.push_char(opts.left_paren_rune);
            self.generate(b, limit);
            b.push_char(opts.right_paren_rune);
        } else {
            self.generate(b, limit);
        }
    }

    pub(crate) fn limit_sql(&self, b: &mut SqlBuilder, limit: Option<&Expr>) {
        if let Some(limit) = limit {
            b.push(self.opts().limit_fragment);
            self.limit_value(b, limit);
        }
    }

    pub(crate) fn returning_sql(&self, b: &mut SqlBuilder, returning: Option<&ColumnListExpression>) {
        let Some(returning) = returning.filter(|r| !r.is_empty()) else {
            return;
        };
        if !self.opts().supports_return {
            b.set_error(self.dialect_error(PpError::ReturningNotSupported));
            return;
        }
        b.push(self.opts().returning_fragment);
        self.column_list(b, returning);
    }
}

const LIMIT_ALL: &str = "ALL";

/// The marker stored as a limit by `limit_all`, rendered with the dialect's
/// ALL literal.
pub(crate) fn limit_all() -> Expr {
    Expr::Literal(LiteralExpression::new(LIMIT_ALL, Vec::new()))
}

fn is_limit_all(limit: &Expr) -> bool {
    matches!(limit, Expr::Literal(lit) if lit.sql() == LIMIT_ALL && lit.args().is_empty())
}
