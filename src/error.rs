use thiserror::Error;

/// Convenience result type for example construction and ingestion.
pub type ExampleResult<T> = Result<T, ExampleError>;

/// Error type returned by [`crate::example::Example`] constructors and ingestion functions.
///
/// Every error is fatal to the call that produced it: constructors never return a partially
/// populated example.
#[derive(Debug, Error)]
pub enum ExampleError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding error, passed through unchanged.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A mapping-form fields table references a key that is not present in the input data.
    #[error("Specified key {key} was not found in the input data")]
    MissingKey { key: String },

    /// A fields table was used with a constructor that does not accept its shape.
    #[error("contract violation: {message}")]
    Contract { message: String },

    /// A `field_to_index` entry points past the end of the row.
    #[error("index out of bounds: key '{key}' maps to index {index} but the row has {len} values")]
    IndexOutOfBounds { key: String, index: usize, len: usize },

    /// Bracketed tree notation could not be parsed.
    #[error("tree parse error at byte {position}: {message}")]
    TreeParse { position: usize, message: String },

    /// Tree parsing was requested but no tree parser is available in this build.
    #[error("tree parser unavailable: {hint}")]
    TreeParserUnavailable { hint: String },

    /// A typed processor could not coerce a raw value into the requested type.
    #[error("failed to parse value for column '{column}': {message} (raw='{raw}')")]
    ParseError {
        column: String,
        raw: String,
        message: String,
    },

    /// The input does not have the shape ingestion expects (missing header columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}
