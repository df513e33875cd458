use super::SqlGenerator;
use crate::dialect::FragmentKind;
use crate::error::PpError;
use crate::exp::DeleteClauses;
use crate::sb::SqlBuilder;

impl SqlGenerator<'_> {
    /// Render a DELETE statement in the dialect's fragment order.
    pub fn delete_sql(&self, b: &mut SqlBuilder, clauses: &DeleteClauses) {
        let opts = self.opts();
        for kind in &opts.delete_sql_order {
            if b.error().is_some() {
                return;
            }
            match kind {
                FragmentKind::CommonTable => self.common_tables_sql(b, clauses.common_tables()),
                FragmentKind::DeleteBegin => {
                    b.push(opts.delete_clause);
                }
                FragmentKind::From => match clauses.from() {
                    Some(table) => {
                        b.push(opts.from_fragment);
                        b.push_char(opts.space_rune);
                        self.identifier(b, table);
                    }
                    None => {
                        b.set_error(PpError::NoSourceFor("delete".to_string()));
                    }
                },
                FragmentKind::Where => self.where_sql(b, clauses.where_clause()),
                FragmentKind::Order => {
                    if opts.supports_order_by_on_delete {
                        self.order_sql(b, clauses.order());
                    }
                }
                FragmentKind::Limit => {
                    if opts.supports_limit_on_delete {
                        self.limit_sql(b, clauses.limit());
                    }
                }
                FragmentKind::Returning => self.returning_sql(b, clauses.returning()),
                other => {
                    b.set_error(PpError::not_supported_fragment("DELETE", other));
                }
            }
        }
    }
}
