use super::SqlGenerator;
use crate::dialect::FragmentKind;
use crate::error::PpError;
use crate::exp::UpdateClauses;
use crate::reflect;
use crate::sb::SqlBuilder;

impl SqlGenerator<'_> {
    /// Render an UPDATE statement in the dialect's fragment order.
    ///
    /// ORDER BY and LIMIT are dropped for dialects that do not support them
    /// on UPDATE.
    pub fn update_sql(&self, b: &mut SqlBuilder, clauses: &UpdateClauses) {
        let opts = self.opts();
        for kind in &opts.update_sql_order {
            if b.error().is_some() {
                return;
            }
            match kind {
                FragmentKind::CommonTable => self.common_tables_sql(b, clauses.common_tables()),
                FragmentKind::UpdateBegin => {
                    b.push(opts.update_clause);
                }
                FragmentKind::Sources => self.update_sources_sql(b, clauses),
                FragmentKind::Set => self.update_set_sql(b, clauses),
                FragmentKind::UpdateFrom => self.update_from_sql(b, clauses),
                FragmentKind::Where => self.where_sql(b, clauses.where_clause()),
                FragmentKind::Order => {
                    if opts.supports_order_by_on_update {
                        self.order_sql(b, clauses.order());
                    }
                }
                FragmentKind::Limit => {
                    if opts.supports_limit_on_update {
                        self.limit_sql(b, clauses.limit());
                    }
                }
                FragmentKind::Returning => self.returning_sql(b, clauses.returning()),
                other => {
                    b.set_error(PpError::not_supported_fragment("UPDATE", other));
                }
            }
        }
    }

    fn update_sources_sql(&self, b: &mut SqlBuilder, clauses: &UpdateClauses) {
        let opts = self.opts();
        let Some(table) = clauses.table() else {
            b.set_error(PpError::NoSourceFor("update".to_string()));
            return;
        };
        b.push_char(opts.space_rune);
        self.generate(b, table);
        if clauses.has_from() && !opts.use_from_clause_for_multiple_update_tables {
            if !opts.supports_multiple_update_tables {
                b.set_error(self.dialect_error(PpError::MultipleUpdateTablesUnsupported));
                return;
            }
            for from in clauses.from().columns() {
                b.push_char(opts.comma_rune);
                self.generate(b, from);
            }
        }
    }

    fn update_set_sql(&self, b: &mut SqlBuilder, clauses: &UpdateClauses) {
        let Some(source) = clauses.set_values() else {
            b.set_error(PpError::NoSetValues);
            return;
        };
        match reflect::update_expressions(source) {
            Ok(sets) => {
                b.push(self.opts().set_fragment);
                self.update_set_list(b, &sets);
            }
            Err(err) => {
                b.set_error(err);
            }
        }
    }

    fn update_from_sql(&self, b: &mut SqlBuilder, clauses: &UpdateClauses) {
        let opts = self.opts();
        if !clauses.has_from() || !opts.use_from_clause_for_multiple_update_tables {
            return;
        }
        if !opts.supports_multiple_update_tables {
            b.set_error(self.dialect_error(PpError::MultipleUpdateTablesUnsupported));
            return;
        }
        b.push(opts.from_fragment);
        b.push_char(opts.space_rune);
        self.column_list(b, clauses.from());
    }
}
