//! Error types for ATL core.

use thiserror::Error;

/// Core error type for request catalog operations.
///
/// Every variant is a contract violation: the caller handed over a tag that
/// does not exist in the closed request catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown request category: {0}")]
    UnknownCategory(u32),

    #[error("Unknown request kind {kind:#x} for category {category}")]
    UnknownKind { category: u32, kind: u32 },

    #[error("Request category None carries no request kind")]
    EmptyCategory,
}

/// Result type alias for ATL core operations.
pub type Result<T> = std::result::Result<T, Error>;
