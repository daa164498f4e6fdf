//! ATL Dispatch - Request queue and dispatcher task.
//!
//! This crate moves request envelopes from callers to an audio backend and
//! reports completions back through event listeners.

pub mod backend;
pub mod dispatcher;
pub mod error;
pub mod queue;

pub use backend::{AudioBackend, NullBackend};
pub use dispatcher::{Dispatcher, DispatcherConfig, DispatcherHandle, SyncCompletions};
pub use error::{BackendError, BackendResult, DispatchError, DispatchResult};
pub use queue::{Completed, RequestQueue};
