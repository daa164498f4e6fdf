//! The audio implementation seam.

use tracing::debug;

use atl_core::payload::{ManagerPayload, RequestPayload};
use atl_core::{ObjectId, RequestEnvelope};

use crate::error::BackendResult;

/// Executes requests against an audio implementation.
///
/// The dispatcher calls `process` once per envelope, on the dispatcher task.
/// Returning an error completes the envelope as `Failure`.
#[cfg_attr(test, mockall::automock)]
pub trait AudioBackend: Send {
    /// Perform the request carried by `envelope`.
    ///
    /// # Errors
    /// Returns a `BackendError` describing why the request could not be done.
    fn process(&mut self, envelope: &RequestEnvelope) -> BackendResult<()>;
}

/// Backend that accepts every request and only hands out object ids.
#[derive(Debug)]
pub struct NullBackend {
    next_object_id: u64,
}

impl NullBackend {
    #[must_use]
    pub fn new() -> Self {
        Self { next_object_id: ObjectId::GLOBAL.raw() + 1 }
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for NullBackend {
    fn process(&mut self, envelope: &RequestEnvelope) -> BackendResult<()> {
        if let Some(RequestPayload::Manager(ManagerPayload::ReserveObjectId(data))) =
            envelope.payload()
        {
            let id = ObjectId::new(self.next_object_id);
            self.next_object_id += 1;
            data.object_id.set(id);
            debug!(object_id = %id, "Reserved audio object id");
        }

        debug!(
            kind = ?envelope.kind(),
            target = %envelope.target_object_id(),
            "Null backend processed request"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atl_core::{ManagerRequest, ObjectIdSlot, Request};

    #[test]
    fn test_reserved_ids_start_after_global() {
        let mut backend = NullBackend::new();
        let first = ObjectIdSlot::new();
        let second = ObjectIdSlot::new();

        for slot in [&first, &second] {
            let envelope =
                RequestEnvelope::from(Request::new(ManagerRequest::reserve_object_id(slot, "obj")));
            backend.process(&envelope).unwrap();
        }

        assert_eq!(first.get(), ObjectId::new(2));
        assert_eq!(second.get(), ObjectId::new(3));
    }

    #[test]
    fn test_other_requests_are_accepted() {
        let mut backend = NullBackend::default();
        let envelope = RequestEnvelope::from(Request::new(ManagerRequest::StopAllSounds));
        assert!(backend.process(&envelope).is_ok());
    }
}
