use super::SqlGenerator;
use crate::dialect::FragmentKind;
use crate::error::PpError;
use crate::exp::TruncateClauses;
use crate::sb::SqlBuilder;

impl SqlGenerator<'_> {
    /// Render a TRUNCATE statement.
    pub fn truncate_sql(&self, b: &mut SqlBuilder, clauses: &TruncateClauses) {
        let opts = self.opts();
        for kind in &opts.truncate_sql_order {
            if b.error().is_some() {
                return;
            }
            match kind {
                FragmentKind::Truncate => {
                    if !clauses.has_table() {
                        b.set_error(PpError::NoSourceFor("truncate".to_string()));
                        return;
                    }
                    b.push(opts.truncate_clause);
                    b.push_char(opts.space_rune);
                    self.column_list(b, clauses.table());

                    let options = clauses.options();
                    if !options.identity.is_empty() {
                        b.push_char(opts.space_rune);
                        b.push(&options.identity.to_uppercase());
                        b.push(opts.identity_fragment);
                    }
                    if options.cascade {
                        b.push(opts.cascade_fragment);
                    } else if options.restrict {
                        b.push(opts.restrict_fragment);
                    }
                }
                other => {
                    b.set_error(PpError::not_supported_fragment("TRUNCATE", other));
                }
            }
        }
    }
}
