//! Error types for pp

use thiserror::Error;

/// Result type alias for pp operations
pub type PpResult<T> = Result<T, PpError>;

/// Errors raised while building or rendering a statement.
///
/// Errors are cloneable so a dataset can keep the first one in its sticky
/// slot and hand it back from every later build.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PpError {
    /// Unsupported argument passed to FROM
    #[error("pp: unsupported from argument, a string, identifier or dataset is required got: {0}")]
    BadFromArgument(String),

    /// INSERT target is not a string or identifier-like expression
    #[error("pp: unsupported table type, a string or identifier expression is required")]
    UnsupportedIntoType,

    /// UPDATE table is not a string or identifier-like expression
    #[error("pp: unsupported table type, a string or identifier expression is required")]
    UnsupportedUpdateTableType,

    /// Rows input is none of map, record, struct or a slice of those
    #[error("pp: unsupported insert must be map, pp.Record, or struct type got: {0}")]
    UnsupportedInsertShape(String),

    /// Set values are none of map, record, struct or update expressions
    #[error("pp: unsupported update interface type {0}")]
    UnsupportedUpdateShape(String),

    /// Heterogeneous row types in one INSERT
    #[error("pp: rows must be all the same type expected {expected} got {got}")]
    RowTypeMismatch { expected: String, got: String },

    /// Rows disagree on their column set
    #[error("pp: rows with different keys expected {expected} got {got}")]
    RowKeyMismatch { expected: String, got: String },

    /// Rows disagree on their number of values
    #[error("pp: rows with different value length expected {expected} got {got}")]
    RowLengthMismatch { expected: usize, got: usize },

    /// Identifier with schema, table and column all empty
    #[error(r#"pp: a empty identifier was encountered, please specify a "schema", "table" or "column""#)]
    EmptyIdentifier,

    /// Bitwise operator missing from the dialect lookup table
    #[error("pp: bitwise operator '{0}' not supported")]
    UnsupportedBitwiseOp(String),

    /// Boolean operator missing from the dialect lookup table
    #[error("pp: boolean operator '{0}' not supported")]
    UnsupportedBooleanOp(String),

    /// Range operator missing from the dialect lookup table
    #[error("pp: range operator '{0}' not supported")]
    UnsupportedRangeOp(String),

    /// Operator name in an `Op` map that has no boolean or range counterpart
    #[error("pp: unsupported expression type {0}")]
    UnsupportedExOperator(String),

    /// Fragment kind in a fragment order that the generator cannot render
    #[error("pp: unsupported {statement} SQL fragment {fragment}")]
    NotSupportedFragment { statement: String, fragment: String },

    /// DO UPDATE conflict action without an update payload
    #[error("pp: values are required for on conflict update expression")]
    ConflictUpdateRequiresValues,

    /// DO UPDATE ... WHERE in a dialect that refuses it
    #[error("pp: dialect does not support upsert with where clause [dialect={0}]")]
    ConflictWhereNotSupported(String),

    /// UPDATE with extra FROM tables in a dialect that refuses it
    #[error("pp: {0} dialect does not support multiple tables in UPDATE")]
    MultipleUpdateTablesUnsupported(String),

    /// RETURNING in a dialect that refuses it
    #[error("pp: dialect does not support RETURNING clause [dialect={0}]")]
    ReturningNotSupported(String),

    /// WITH in a dialect that refuses it
    #[error("pp: dialect does not support CTE WITH clause [dialect={0}]")]
    CteNotSupported(String),

    /// WITH RECURSIVE in a dialect that refuses it
    #[error("pp: dialect does not support CTE WITH RECURSIVE clause [dialect={0}]")]
    RecursiveCteNotSupported(String),

    /// DISTINCT ON in a dialect that refuses it
    #[error("pp: dialect does not support DISTINCT ON clause [dialect={0}]")]
    DistinctOnNotSupported(String),

    /// Window functions or WINDOW clause in a dialect that refuses them
    #[error("pp: dialect does not support window functions, OVER clause [dialect={0}]")]
    WindowNotSupported(String),

    /// LATERAL in a dialect that refuses it
    #[error("pp: dialect does not support lateral expressions [dialect={0}]")]
    LateralNotSupported(String),

    /// Statement built without its required table
    #[error("pp: no source found when generating {0} sql")]
    NoSourceFor(String),

    /// UPDATE built without set values
    #[error("pp: no set values found when generating UPDATE sql")]
    NoSetValues,

    /// Set values reflected to an empty column set
    #[error("pp: no update values provided")]
    NoUpdateValues,

    /// CASE without any WHEN branch
    #[error("pp: when conditions not found for case statement")]
    EmptyCase,

    /// Conditioned join without ON or USING
    #[error("pp: join condition required for conditioned join {0}")]
    JoinConditionRequired(String),

    /// Join type missing from the dialect lookup table
    #[error("pp: dialect does not support {0}")]
    UnsupportedJoinType(String),

    /// Window in the WINDOW clause without a name
    #[error("pp: window expression must have a name")]
    NoWindowName,

    /// Named window passed where an inline window is expected
    #[error("pp: unexpected named window function")]
    UnexpectedNamedWindow,

    /// Scan/exec on a dataset that has no driver handle
    #[error("pp: unable to execute query, no driver was bound to the dataset")]
    ExecutorMissing,

    /// Insert.from_query with two different non-default dialects
    #[error("pp: incompatible dialects for INSERT ({insert:?}) and SELECT ({select:?})")]
    IncompatibleDialects { insert: String, select: String },

    /// Value could not be rendered as SQL text
    #[error("pp: unable to encode value {0}")]
    Encode(String),

    /// Error reported by a driver handle
    #[error("pp: driver error: {0}")]
    Driver(String),

    /// Other errors
    #[error("pp: {0}")]
    Other(String),
}

impl PpError {
    /// Create an error with a free-form message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Create an encode error for a value description
    pub fn encode(value: impl Into<String>) -> Self {
        Self::Encode(value.into())
    }

    /// Create an unsupported-fragment error.
    pub fn not_supported_fragment(statement: &str, fragment: impl std::fmt::Display) -> Self {
        Self::NotSupportedFragment {
            statement: statement.to_string(),
            fragment: fragment.to_string(),
        }
    }

    /// Check if this error came from a dialect capability gate
    pub fn is_capability_error(&self) -> bool {
        matches!(
            self,
            Self::ConflictWhereNotSupported(_)
                | Self::MultipleUpdateTablesUnsupported(_)
                | Self::ReturningNotSupported(_)
                | Self::CteNotSupported(_)
                | Self::RecursiveCteNotSupported(_)
                | Self::DistinctOnNotSupported(_)
                | Self::WindowNotSupported(_)
                | Self::LateralNotSupported(_)
        )
    }

    /// Check if this is a missing executor error
    pub fn is_executor_missing(&self) -> bool {
        matches!(self, Self::ExecutorMissing)
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for PpError {
    fn from(err: tokio_postgres::Error) -> Self {
        Self::Driver(err.to_string())
    }
}
