//! ATL Core - Audio request catalog, envelope, and listener filtering.
//!
//! This crate holds the data model shared by the dispatcher and its callers:
//! request descriptions, their conversion into internal payloads, the
//! envelope that carries a payload through the queue, and event listeners.

pub mod bounded;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod info;
pub mod kind;
pub mod listener;
pub mod payload;
pub mod request;
pub mod types;

pub use bounded::{BoundedString, FileName, FilePath, ObjectName};
pub use envelope::{InternalInfoFlags, RequestEnvelope, RequestFlags, RequestStatus};
pub use error::{Error, Result};
pub use ids::{
    ControlId, EnvironmentId, EventId, FileId, Handle, ObjectId, PreloadRequestId, SourceId,
    SwitchStateId,
};
pub use info::{RequestInfo, RequestResult};
pub use kind::{RequestCategory, RequestKind, RequestTypeFilter, decode_raw_tag};
pub use listener::{EventListener, EventListenerRegistry, ListenerCallback};
pub use payload::{RequestPayload, convert};
pub use request::{
    AudioRequest, CallbackManagerRequest, ListenerRequest, ManagerRequest, ObjectRequest, Request,
};
pub use types::{EventOutcome, ObjectIdSlot};
