//! Dispatch error types.

use thiserror::Error;

use atl_core::{ControlId, ObjectId};

/// Dispatcher error type.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Dispatcher channel closed")]
    ChannelClosed,

    #[error("Blocking request was dropped before completion")]
    ReplyDropped,
}

/// Result type for dispatcher operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Why a backend could not complete a request.
///
/// Callers only ever see `RequestStatus::Failure`; the reason is logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Invalid audio object id: {0}")]
    InvalidObjectId(ObjectId),

    #[error("Invalid control id: {0}")]
    InvalidControlId(ControlId),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Backend failure: {0}")]
    Failed(String),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
