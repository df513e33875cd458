//! SQL dialects: keyword fragments, punctuation, operator tables, capability
//! flags and per-statement fragment order.
//!
//! Dialects live in a process-wide registry keyed by lowercase name. The
//! built-in ones (`default`, `mysql`, `postgres`, `sqlite3`, `sqlserver`)
//! register themselves through `inventory` and are loaded on first lookup.

mod mysql;
mod postgres;
mod sqlite3;
mod sqlserver;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use chrono::FixedOffset;

use crate::exp::{BitwiseOperation, BooleanOperation, JoinType, RangeOperation};

/// A named section of a statement, used to order generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    CommonTable,
    Select,
    /// `SELECT TOP (n)` for dialects that page with TOP.
    SelectWithLimit,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    Window,
    Compounds,
    Order,
    /// `ORDER BY ... OFFSET n ROWS FETCH FIRST m ROWS ONLY`
    OrderWithOffsetFetch,
    Limit,
    Offset,
    For,
    UpdateBegin,
    /// The UPDATE target, plus extra tables for comma-list dialects.
    Sources,
    Set,
    UpdateFrom,
    Returning,
    InsertBegin,
    Into,
    Insert,
    DeleteBegin,
    Truncate,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}SQLFragment")
    }
}

/// How `col IN ()` with an empty list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyInStyle {
    /// `("col" IN (NULL))`
    #[default]
    Null,
    /// `(FALSE)` for IN, `(TRUE)` for NOT IN.
    Boolean,
}

/// Everything a dialect can tune.
///
/// Start from [`DialectOptions::default`] and override fields, the way the
/// built-in dialects do.
#[derive(Debug, Clone)]
pub struct DialectOptions {
    // Capabilities.
    pub supports_order_by_on_update: bool,
    pub supports_limit_on_update: bool,
    pub supports_order_by_on_delete: bool,
    pub supports_limit_on_delete: bool,
    pub supports_return: bool,
    pub supports_conflict_update_where: bool,
    pub supports_insert_ignore_syntax: bool,
    pub supports_conflict_target: bool,
    pub supports_with_cte: bool,
    pub supports_with_cte_recursive: bool,
    pub supports_distinct_on: bool,
    pub supports_window_function: bool,
    pub supports_lateral: bool,
    pub supports_multiple_update_tables: bool,
    pub use_from_clause_for_multiple_update_tables: bool,
    pub surround_limit_with_parentheses: bool,
    pub wrap_compounds_in_parens: bool,
    /// Render `IS TRUE`/`IS FALSE` with keyword literals instead of values.
    pub use_literal_is_bools: bool,
    /// When false, `IS TRUE` becomes `= <true>` and `IS NOT TRUE` `!= <true>`.
    pub boolean_data_type_supported: bool,
    pub empty_in_style: EmptyInStyle,

    // Statement keywords.
    pub select_clause: &'static str,
    pub update_clause: &'static str,
    pub insert_clause: &'static str,
    pub insert_ignore_clause: &'static str,
    pub delete_clause: &'static str,
    pub truncate_clause: &'static str,
    pub with_fragment: &'static str,
    pub recursive_fragment: &'static str,
    pub cascade_fragment: &'static str,
    pub restrict_fragment: &'static str,
    pub default_values_fragment: &'static str,
    pub values_fragment: &'static str,
    pub identity_fragment: &'static str,
    pub set_fragment: &'static str,
    pub distinct_fragment: &'static str,
    pub distinct_on_fragment: &'static str,
    pub returning_fragment: &'static str,
    pub from_fragment: &'static str,
    pub using_fragment: &'static str,
    pub on_fragment: &'static str,
    pub where_fragment: &'static str,
    pub group_by_fragment: &'static str,
    pub having_fragment: &'static str,
    pub window_fragment: &'static str,
    pub window_partition_by_fragment: &'static str,
    pub window_order_by_fragment: &'static str,
    pub window_over_fragment: &'static str,
    pub order_by_fragment: &'static str,
    pub limit_fragment: &'static str,
    pub offset_fragment: &'static str,
    pub fetch_fragment: &'static str,
    pub top_fragment: &'static str,
    pub for_update_fragment: &'static str,
    pub for_no_key_update_fragment: &'static str,
    pub for_share_fragment: &'static str,
    pub for_key_share_fragment: &'static str,
    pub of_fragment: &'static str,
    pub nowait_fragment: &'static str,
    pub skip_locked_fragment: &'static str,
    pub lateral_fragment: &'static str,
    pub as_fragment: &'static str,
    pub asc_fragment: &'static str,
    pub desc_fragment: &'static str,
    pub nulls_first_fragment: &'static str,
    pub nulls_last_fragment: &'static str,
    pub and_fragment: &'static str,
    pub or_fragment: &'static str,
    pub union_fragment: &'static str,
    pub union_all_fragment: &'static str,
    pub intersect_fragment: &'static str,
    pub intersect_all_fragment: &'static str,
    pub conflict_fragment: &'static str,
    pub conflict_do_update_fragment: &'static str,
    pub conflict_do_nothing_fragment: &'static str,
    pub cast_fragment: &'static str,
    pub case_fragment: &'static str,
    pub when_fragment: &'static str,
    pub then_fragment: &'static str,
    pub else_fragment: &'static str,
    pub end_fragment: &'static str,
    pub null: &'static str,
    pub true_literal: &'static str,
    pub false_literal: &'static str,
    pub all_literal: &'static str,
    pub default_literal: &'static str,

    // Punctuation.
    pub placeholder_fragment: &'static str,
    pub include_placeholder_num: bool,
    pub quote_rune: char,
    pub string_quote: char,
    pub set_operator_rune: char,
    pub comma_rune: char,
    pub space_rune: char,
    pub left_paren_rune: char,
    pub right_paren_rune: char,
    pub star_rune: char,
    pub period_rune: char,

    // Operator tables. A missing entry fails the build.
    pub boolean_operator_lookup: BTreeMap<BooleanOperation, &'static str>,
    pub bitwise_operator_lookup: BTreeMap<BitwiseOperation, &'static str>,
    pub range_operator_lookup: BTreeMap<RangeOperation, &'static str>,
    pub join_type_lookup: HashMap<JoinType, &'static str>,

    /// Replacements applied to string literals; unmapped runes pass through.
    pub escaped_runes: BTreeMap<char, &'static str>,

    /// `chrono` format string for inline time literals.
    pub time_format: &'static str,
    /// Location inline times are converted to; falls back to the
    /// process-wide knob when unset.
    pub time_location: Option<FixedOffset>,

    pub select_sql_order: Vec<FragmentKind>,
    pub insert_sql_order: Vec<FragmentKind>,
    pub update_sql_order: Vec<FragmentKind>,
    pub delete_sql_order: Vec<FragmentKind>,
    pub truncate_sql_order: Vec<FragmentKind>,
}

/// RFC 3339 with nanoseconds, trailing zeros trimmed.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

fn default_boolean_operators() -> BTreeMap<BooleanOperation, &'static str> {
    use BooleanOperation::*;
    BTreeMap::from([
        (Eq, "="),
        (Neq, "!="),
        (Gt, ">"),
        (Gte, ">="),
        (Lt, "<"),
        (Lte, "<="),
        (In, "IN"),
        (NotIn, "NOT IN"),
        (Is, "IS"),
        (IsNot, "IS NOT"),
        (Like, "LIKE"),
        (NotLike, "NOT LIKE"),
        (ILike, "ILIKE"),
        (NotILike, "NOT ILIKE"),
        (RegexpLike, "~"),
        (RegexpNotLike, "!~"),
        (RegexpILike, "~*"),
        (RegexpNotILike, "!~*"),
    ])
}

fn default_bitwise_operators() -> BTreeMap<BitwiseOperation, &'static str> {
    use BitwiseOperation::*;
    BTreeMap::from([
        (Inversion, "~"),
        (Or, "|"),
        (And, "&"),
        (Xor, "#"),
        (LeftShift, "<<"),
        (RightShift, ">>"),
    ])
}

fn default_range_operators() -> BTreeMap<RangeOperation, &'static str> {
    BTreeMap::from([
        (RangeOperation::Between, "BETWEEN"),
        (RangeOperation::NotBetween, "NOT BETWEEN"),
    ])
}

fn default_join_types() -> HashMap<JoinType, &'static str> {
    use JoinType::*;
    HashMap::from([
        (Inner, " INNER JOIN "),
        (FullOuter, " FULL OUTER JOIN "),
        (RightOuter, " RIGHT OUTER JOIN "),
        (LeftOuter, " LEFT OUTER JOIN "),
        (Full, " FULL JOIN "),
        (Right, " RIGHT JOIN "),
        (Left, " LEFT JOIN "),
        (Natural, " NATURAL JOIN "),
        (NaturalLeft, " NATURAL LEFT JOIN "),
        (NaturalRight, " NATURAL RIGHT JOIN "),
        (NaturalFull, " NATURAL FULL JOIN "),
        (Cross, " CROSS JOIN "),
    ])
}

fn default_escaped_runes() -> BTreeMap<char, &'static str> {
    BTreeMap::from([('\'', "''")])
}

impl Default for DialectOptions {
    fn default() -> Self {
        use FragmentKind::*;
        Self {
            supports_order_by_on_update: true,
            supports_limit_on_update: true,
            supports_order_by_on_delete: true,
            supports_limit_on_delete: true,
            supports_return: true,
            supports_conflict_update_where: true,
            supports_insert_ignore_syntax: false,
            supports_conflict_target: true,
            supports_with_cte: true,
            supports_with_cte_recursive: true,
            supports_distinct_on: true,
            supports_window_function: true,
            supports_lateral: true,
            supports_multiple_update_tables: true,
            use_from_clause_for_multiple_update_tables: true,
            surround_limit_with_parentheses: false,
            wrap_compounds_in_parens: true,
            use_literal_is_bools: true,
            boolean_data_type_supported: true,
            empty_in_style: EmptyInStyle::Null,

            select_clause: "SELECT",
            update_clause: "UPDATE",
            insert_clause: "INSERT INTO",
            insert_ignore_clause: "INSERT IGNORE INTO",
            delete_clause: "DELETE",
            truncate_clause: "TRUNCATE",
            with_fragment: "WITH ",
            recursive_fragment: "RECURSIVE ",
            cascade_fragment: " CASCADE",
            restrict_fragment: " RESTRICT",
            default_values_fragment: " DEFAULT VALUES",
            values_fragment: " VALUES ",
            identity_fragment: " IDENTITY",
            set_fragment: " SET ",
            distinct_fragment: "DISTINCT",
            distinct_on_fragment: " ON ",
            returning_fragment: " RETURNING ",
            from_fragment: " FROM",
            using_fragment: " USING ",
            on_fragment: " ON ",
            where_fragment: " WHERE ",
            group_by_fragment: " GROUP BY ",
            having_fragment: " HAVING ",
            window_fragment: " WINDOW ",
            window_partition_by_fragment: "PARTITION BY ",
            window_order_by_fragment: "ORDER BY ",
            window_over_fragment: " OVER ",
            order_by_fragment: " ORDER BY ",
            limit_fragment: " LIMIT ",
            offset_fragment: " OFFSET ",
            fetch_fragment: " FETCH FIRST ",
            top_fragment: " TOP ",
            for_update_fragment: " FOR UPDATE",
            for_no_key_update_fragment: " FOR NO KEY UPDATE",
            for_share_fragment: " FOR SHARE",
            for_key_share_fragment: " FOR KEY SHARE",
            of_fragment: " OF ",
            nowait_fragment: " NOWAIT",
            skip_locked_fragment: " SKIP LOCKED",
            lateral_fragment: "LATERAL ",
            as_fragment: " AS ",
            asc_fragment: " ASC",
            desc_fragment: " DESC",
            nulls_first_fragment: " NULLS FIRST",
            nulls_last_fragment: " NULLS LAST",
            and_fragment: " AND ",
            or_fragment: " OR ",
            union_fragment: " UNION ",
            union_all_fragment: " UNION ALL ",
            intersect_fragment: " INTERSECT ",
            intersect_all_fragment: " INTERSECT ALL ",
            conflict_fragment: " ON CONFLICT",
            conflict_do_update_fragment: " DO UPDATE SET ",
            conflict_do_nothing_fragment: " DO NOTHING",
            cast_fragment: "CAST",
            case_fragment: "CASE",
            when_fragment: " WHEN ",
            then_fragment: " THEN ",
            else_fragment: " ELSE ",
            end_fragment: " END",
            null: "NULL",
            true_literal: "TRUE",
            false_literal: "FALSE",
            all_literal: "ALL",
            default_literal: "DEFAULT",

            placeholder_fragment: "?",
            include_placeholder_num: false,
            quote_rune: '"',
            string_quote: '\'',
            set_operator_rune: '=',
            comma_rune: ',',
            space_rune: ' ',
            left_paren_rune: '(',
            right_paren_rune: ')',
            star_rune: '*',
            period_rune: '.',

            boolean_operator_lookup: default_boolean_operators(),
            bitwise_operator_lookup: default_bitwise_operators(),
            range_operator_lookup: default_range_operators(),
            join_type_lookup: default_join_types(),

            escaped_runes: default_escaped_runes(),

            time_format: DEFAULT_TIME_FORMAT,
            time_location: None,

            select_sql_order: vec![
                CommonTable, Select, From, Join, Where, GroupBy, Having, Window, Compounds, Order,
                Limit, Offset, For,
            ],
            insert_sql_order: vec![CommonTable, InsertBegin, Into, Insert, Returning],
            update_sql_order: vec![
                CommonTable, UpdateBegin, Sources, Set, UpdateFrom, Where, Order, Limit, Returning,
            ],
            delete_sql_order: vec![CommonTable, DeleteBegin, From, Where, Order, Limit, Returning],
            truncate_sql_order: vec![Truncate],
        }
    }
}

/// A registered dialect: its name plus shared options.
#[derive(Debug, Clone)]
pub struct Dialect {
    name: String,
    options: Arc<DialectOptions>,
}

impl Dialect {
    pub fn new(name: impl Into<String>, options: DialectOptions) -> Self {
        Self {
            name: name.into(),
            options: Arc::new(options),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &DialectOptions {
        &self.options
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_DIALECT
    }
}

impl Default for Dialect {
    fn default() -> Self {
        get_dialect(DEFAULT_DIALECT)
    }
}

impl PartialEq for Dialect {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.options, &other.options)
    }
}

pub const DEFAULT_DIALECT: &str = "default";

/// A built-in dialect submitted with `inventory::submit!`.
pub struct DialectRegistration {
    pub name: &'static str,
    pub options: fn() -> DialectOptions,
}

inventory::collect!(DialectRegistration);

inventory::submit! {
    DialectRegistration {
        name: DEFAULT_DIALECT,
        options: DialectOptions::default,
    }
}

static REGISTRY: LazyLock<RwLock<HashMap<String, Dialect>>> = LazyLock::new(|| {
    let mut dialects = HashMap::new();
    for reg in inventory::iter::<DialectRegistration> {
        let name = reg.name.to_lowercase();
        dialects.insert(name.clone(), Dialect::new(name, (reg.options)()));
    }
    RwLock::new(dialects)
});

static FALLBACK: LazyLock<Dialect> =
    LazyLock::new(|| Dialect::new(DEFAULT_DIALECT, DialectOptions::default()));

/// Register (or replace) a dialect under `name` (case-insensitive).
pub fn register_dialect(name: &str, options: DialectOptions) {
    let name = name.to_lowercase();
    #[cfg(feature = "tracing")]
    tracing::debug!(target: "pp.dialect", dialect = %name, "register dialect");
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.clone(), Dialect::new(name, options));
}

/// Look up a dialect by name; unknown names resolve to `default`.
pub fn get_dialect(name: &str) -> Dialect {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    registry
        .get(&name.to_lowercase())
        .or_else(|| registry.get(DEFAULT_DIALECT))
        .cloned()
        .unwrap_or_else(|| FALLBACK.clone())
}

/// Remove a dialect; later lookups of `name` resolve to `default`.
pub fn deregister_dialect(name: &str) {
    let name = name.to_lowercase();
    #[cfg(feature = "tracing")]
    tracing::debug!(target: "pp.dialect", dialect = %name, "deregister dialect");
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&name);
}
