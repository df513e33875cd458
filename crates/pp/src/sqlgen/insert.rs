use super::SqlGenerator;
use crate::dialect::FragmentKind;
use crate::error::PpError;
use crate::exp::{ColumnListExpression, ConflictExpression, ConflictUpdate, Expr, InsertClauses};
use crate::reflect;
use crate::sb::SqlBuilder;

impl SqlGenerator<'_> {
    /// Render an INSERT statement in the dialect's fragment order.
    pub fn insert_sql(&self, b: &mut SqlBuilder, clauses: &InsertClauses) {
        for kind in &self.opts().insert_sql_order {
            if b.error().is_some() {
                return;
            }
            match kind {
                FragmentKind::CommonTable => self.common_tables_sql(b, clauses.common_tables()),
                FragmentKind::InsertBegin => self.insert_begin_sql(b, clauses.on_conflict()),
                FragmentKind::Into => match clauses.into_table() {
                    Some(table) => {
                        b.push_char(self.opts().space_rune);
                        self.generate(b, table);
                    }
                    None => {
                        b.set_error(PpError::NoSourceFor("insert".to_string()));
                    }
                },
                FragmentKind::Insert => self.insert_body_sql(b, clauses),
                FragmentKind::Returning => self.returning_sql(b, clauses.returning()),
                other => {
                    b.set_error(PpError::not_supported_fragment("INSERT", other));
                }
            }
        }
    }

    fn uses_insert_ignore(&self, conflict: Option<&ConflictExpression>) -> bool {
        matches!(conflict, Some(ConflictExpression::DoNothing))
            && self.opts().supports_insert_ignore_syntax
    }

    fn insert_begin_sql(&self, b: &mut SqlBuilder, conflict: Option<&ConflictExpression>) {
        if self.uses_insert_ignore(conflict) {
            b.push(self.opts().insert_ignore_clause);
        } else {
            b.push(self.opts().insert_clause);
        }
    }

    fn insert_body_sql(&self, b: &mut SqlBuilder, clauses: &InsertClauses) {
        if clauses.has_rows() {
            match reflect::insert_rows(clauses.rows()) {
                Ok((cols, vals)) => self.columns_and_values_sql(b, &cols, &vals),
                Err(err) => {
                    b.set_error(err);
                }
            }
        } else if let (Some(cols), true) = (clauses.cols(), clauses.has_vals()) {
            self.columns_and_values_sql(b, cols, clauses.vals());
        } else if let Some(from) = clauses.from() {
            if let Some(cols) = clauses.cols().filter(|c| !c.is_empty()) {
                self.insert_columns_sql(b, cols);
            }
            b.push_char(self.opts().space_rune);
            from.append_sql(b);
        } else {
            b.push(self.opts().default_values_fragment);
        }

        if let Some(alias) = clauses.alias() {
            b.push(self.opts().as_fragment);
            self.identifier(b, alias);
        }
        self.on_conflict_sql(b, clauses.on_conflict());
    }

    fn insert_columns_sql(&self, b: &mut SqlBuilder, cols: &ColumnListExpression) {
        let opts = self.opts();
        b.push_char(opts.space_rune);
        b.push_char(opts.left_paren_rune);
        self.column_list(b, cols);
        b.push_char(opts.right_paren_rune);
    }

    fn columns_and_values_sql(
        &self,
        b: &mut SqlBuilder,
        cols: &ColumnListExpression,
        rows: &[Vec<Expr>],
    ) {
        if cols.is_empty() {
            b.push(self.opts().default_values_fragment);
            return;
        }
        self.insert_columns_sql(b, cols);
        b.push(self.opts().values_fragment);
        let expected = rows.first().map(Vec::len).unwrap_or_default();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                b.set_error(PpError::RowLengthMismatch {
                    expected,
                    got: row.len(),
                });
                return;
            }
            if i > 0 {
                b.push_chars(&[self.opts().comma_rune, self.opts().space_rune]);
            }
            self.generate(b, &Expr::Tuple(row.clone()));
        }
    }

    fn on_conflict_sql(&self, b: &mut SqlBuilder, conflict: Option<&ConflictExpression>) {
        let opts = self.opts();
        match conflict {
            None => {}
            Some(ConflictExpression::DoNothing) => {
                if !opts.supports_insert_ignore_syntax {
                    b.push(opts.conflict_fragment);
                    b.push(opts.conflict_do_nothing_fragment);
                }
            }
            Some(ConflictExpression::DoUpdate(update)) => self.do_update_sql(b, update),
        }
    }

    fn do_update_sql(&self, b: &mut SqlBuilder, update: &ConflictUpdate) {
        let opts = self.opts();
        b.push(opts.conflict_fragment);
        let target = update.target_column();
        if opts.supports_conflict_target && !target.is_empty() {
            b.push_char(opts.space_rune);
            if target.to_ascii_lowercase().starts_with("on constraint") {
                b.push(target);
            } else {
                b.push_char(opts.left_paren_rune);
                b.push(target);
                b.push_char(opts.right_paren_rune);
            }
        }

        let Some(source) = update.update() else {
            b.set_error(PpError::ConflictUpdateRequiresValues);
            return;
        };
        let sets = match reflect::update_expressions(source) {
            Ok(sets) => sets,
            Err(err) => {
                b.set_error(err);
                return;
            }
        };
        b.push(opts.conflict_do_update_fragment);
        self.update_set_list(b, &sets);

        if let Some(where_clause) = update.where_clause().filter(|w| !w.is_empty()) {
            if !opts.supports_conflict_update_where {
                b.set_error(self.dialect_error(PpError::ConflictWhereNotSupported));
                return;
            }
            b.push(opts.where_fragment);
            self.expression_list(b, where_clause);
        }
    }
}
