//! Error type for query-string decoding and dynamic value conversion.

use thiserror::Error;

/// Failure returned by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A key or value contained a broken `%XX` sequence or decoded to invalid UTF-8.
    #[error("malformed percent-encoding in {input:?}: {reason}")]
    MalformedEncoding { input: String, reason: String },

    /// A dynamic value was neither a scalar nor a sequence of scalars.
    #[error("unsupported value type for key {key:?}: {found}")]
    UnsupportedValueType { key: String, found: &'static str },
}

impl QueryError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        QueryError::MalformedEncoding {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
