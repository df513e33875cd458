use super::SqlGenerator;
use crate::dialect::FragmentKind;
use crate::error::PpError;
use crate::exp::{
    ColumnListExpression, ExpressionList, JoinCondition, JoinExpression, Lock, LockStrength,
    SelectClauses, WaitOption, WindowExpression,
};
use crate::sb::SqlBuilder;
use crate::value::Value;

impl SqlGenerator<'_> {
    /// Render a SELECT statement in the dialect's fragment order.
    pub fn select_sql(&self, b: &mut SqlBuilder, clauses: &SelectClauses) {
        for kind in &self.opts().select_sql_order {
            if b.error().is_some() {
                return;
            }
            match kind {
                FragmentKind::CommonTable => self.common_tables_sql(b, clauses.common_tables()),
                FragmentKind::Select => self.select_list_sql(b, clauses, false),
                FragmentKind::SelectWithLimit => self.select_list_sql(b, clauses, true),
                FragmentKind::From => self.from_sql(b, clauses.from()),
                FragmentKind::Join => self.joins_sql(b, clauses.joins()),
                FragmentKind::Where => self.where_sql(b, clauses.where_clause()),
                FragmentKind::GroupBy => self.group_by_sql(b, clauses.group_by()),
                FragmentKind::Having => self.having_sql(b, clauses.having()),
                FragmentKind::Window => self.windows_sql(b, clauses.windows()),
                FragmentKind::Compounds => {
                    for compound in clauses.compounds() {
                        self.compound(b, compound);
                    }
                }
                FragmentKind::Order => self.order_sql(b, clauses.order()),
                FragmentKind::OrderWithOffsetFetch => self.order_with_offset_fetch_sql(b, clauses),
                FragmentKind::Limit => self.limit_sql(b, clauses.limit()),
                FragmentKind::Offset => self.offset_sql(b, clauses.offset()),
                FragmentKind::For => self.lock_sql(b, clauses.lock()),
                other => {
                    b.set_error(PpError::not_supported_fragment("SELECT", other));
                }
            }
        }
    }

    fn select_list_sql(&self, b: &mut SqlBuilder, clauses: &SelectClauses, with_limit: bool) {
        let opts = self.opts();
        b.push(opts.select_clause);
        if with_limit && clauses.offset() == 0 {
            if let Some(limit) = clauses.limit() {
                b.push(opts.top_fragment);
                self.limit_value(b, limit);
            }
        }
        b.push_char(opts.space_rune);
        if let Some(distinct) = clauses.distinct() {
            b.push(opts.distinct_fragment);
            if distinct.is_empty() {
                b.push_char(opts.space_rune);
            } else {
                if !opts.supports_distinct_on {
                    b.set_error(self.dialect_error(PpError::DistinctOnNotSupported));
                    return;
                }
                b.push(opts.distinct_on_fragment);
                b.push_char(opts.left_paren_rune);
                self.column_list(b, distinct);
                b.push_char(opts.right_paren_rune);
                b.push_char(opts.space_rune);
            }
        }
        self.column_list(b, clauses.select());
    }

    fn from_sql(&self, b: &mut SqlBuilder, from: &ColumnListExpression) {
        if from.is_empty() {
            return;
        }
        b.push(self.opts().from_fragment);
        b.push_char(self.opts().space_rune);
        self.column_list(b, from);
    }

    fn joins_sql(&self, b: &mut SqlBuilder, joins: &[JoinExpression]) {
        let opts = self.opts();
        for join in joins {
            let Some(keyword) = opts.join_type_lookup.get(&join.join_type()) else {
                b.set_error(PpError::UnsupportedJoinType(join.join_type().to_string()));
                return;
            };
            b.push(keyword);
            self.generate(b, join.table());
            if !join.join_type().is_conditioned() {
                continue;
            }
            match join.condition().filter(|c| !c.is_empty()) {
                Some(JoinCondition::On(list)) => {
                    b.push(opts.on_fragment);
                    self.expression_list(b, list);
                }
                Some(JoinCondition::Using(cols)) => {
                    b.push(opts.using_fragment);
                    b.push_char(opts.left_paren_rune);
                    self.column_list(b, cols);
                    b.push_char(opts.right_paren_rune);
                }
                None => {
                    b.set_error(PpError::JoinConditionRequired(
                        join.join_type().to_string(),
                    ));
                    return;
                }
            }
        }
    }

    fn group_by_sql(&self, b: &mut SqlBuilder, group_by: Option<&ColumnListExpression>) {
        if let Some(group_by) = group_by.filter(|g| !g.is_empty()) {
            b.push(self.opts().group_by_fragment);
            self.column_list(b, group_by);
        }
    }

    fn having_sql(&self, b: &mut SqlBuilder, having: Option<&ExpressionList>) {
        if let Some(having) = having.filter(|h| !h.is_empty()) {
            b.push(self.opts().having_fragment);
            self.expression_list(b, having);
        }
    }

    fn windows_sql(&self, b: &mut SqlBuilder, windows: &[WindowExpression]) {
        if windows.is_empty() {
            return;
        }
        let opts = self.opts();
        if !opts.supports_window_function {
            b.set_error(self.dialect_error(PpError::WindowNotSupported));
            return;
        }
        b.push(opts.window_fragment);
        for (i, window) in windows.iter().enumerate() {
            if i > 0 {
                b.push_chars(&[opts.comma_rune, opts.space_rune]);
            }
            self.window(b, window, true);
        }
    }

    fn order_with_offset_fetch_sql(&self, b: &mut SqlBuilder, clauses: &SelectClauses) {
        let Some(order) = clauses.order().filter(|o| !o.is_empty()) else {
            return;
        };
        self.order_sql(b, Some(order));
        let offset = clauses.offset();
        if offset == 0 {
            return;
        }
        let opts = self.opts();
        b.push(opts.offset_fragment);
        self.generate(b, &Value::UInt(offset).into());
        b.push(" ROWS");
        if let Some(limit) = clauses.limit() {
            b.push(opts.fetch_fragment);
            self.generate(b, limit);
            b.push(" ROWS ONLY");
        }
    }

    fn offset_sql(&self, b: &mut SqlBuilder, offset: u64) {
        if offset > 0 {
            b.push(self.opts().offset_fragment);
            self.generate(b, &Value::UInt(offset).into());
        }
    }

    fn lock_sql(&self, b: &mut SqlBuilder, lock: Option<&Lock>) {
        let Some(lock) = lock else {
            return;
        };
        let opts = self.opts();
        let fragment = match lock.strength() {
            LockStrength::None => return,
            LockStrength::ForUpdate => opts.for_update_fragment,
            LockStrength::ForNoKeyUpdate => opts.for_no_key_update_fragment,
            LockStrength::ForShare => opts.for_share_fragment,
            LockStrength::ForKeyShare => opts.for_key_share_fragment,
        };
        b.push(fragment);
        if !lock.of().is_empty() {
            b.push(opts.of_fragment);
            for (i, table) in lock.of().iter().enumerate() {
                if i > 0 {
                    b.push_chars(&[opts.comma_rune, opts.space_rune]);
                }
                self.identifier(b, table);
            }
        }
        match lock.wait_option() {
            WaitOption::Wait => {}
            WaitOption::NoWait => {
                b.push(opts.nowait_fragment);
            }
            WaitOption::SkipLocked => {
                b.push(opts.skip_locked_fragment);
            }
        }
    }
}
