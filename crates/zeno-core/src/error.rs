use thiserror::Error as ThisError;

///
/// MalformedFilterError
///
/// Raised once when a stored filter text cannot be parsed into an
/// expression tree. Evaluation itself never fails; undefined
/// comparisons degrade to non-matches instead.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("malformed filter at offset {offset}: {message}")]
pub struct MalformedFilterError {
    /// Byte offset into the stored filter text.
    pub offset: usize,
    pub message: String,
}

impl MalformedFilterError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}
