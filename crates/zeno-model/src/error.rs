use thiserror::Error as ThisError;
use zeno_core::error::MalformedFilterError;

///
/// SliceLoadError
///
/// Raised once when a stored slice filter cannot be loaded, in either
/// of its stored forms. Surfaced to the UI as "could not parse slice
/// filter"; the slice renders with an error badge instead of crashing
/// the page.
///

#[derive(Debug, ThisError)]
pub enum SliceLoadError {
    #[error("could not parse slice filter: {0}")]
    FilterText(#[from] MalformedFilterError),

    #[error("could not parse slice filter: {0}")]
    FilterJson(#[from] serde_json::Error),
}
