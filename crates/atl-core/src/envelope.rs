//! The request envelope that flows through the dispatch queue.

use std::sync::Arc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::ids::{Handle, ObjectId};
use crate::kind::{RequestCategory, RequestKind, decode_raw_tag};
use crate::payload::RequestPayload;
use crate::request::{AudioRequest, Request};

bitflags! {
    /// Execution hints set by the caller.
    ///
    /// An empty set means no hints.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RequestFlags: u32 {
        const PRIORITY_NORMAL = 1 << 0;
        const PRIORITY_HIGH = 1 << 1;
        const EXECUTE_BLOCKING = 1 << 2;
        const SYNC_CALLBACK = 1 << 3;
        const SYNC_FINISHED_CALLBACK = 1 << 4;
        const THREAD_SAFE_PUSH = 1 << 5;
    }
}

bitflags! {
    /// Bookkeeping private to the dispatch layer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InternalInfoFlags: u32 {
        const WAITING_FOR_REMOVAL = 1 << 0;
    }
}

/// Processing status of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Constructed, not yet queued
    #[default]
    None,
    /// Queued, awaiting the backend
    Pending,
    Success,
    Failure,
}

impl RequestStatus {
    /// `Success` and `Failure` are final.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

/// One unit of work for the audio backend.
///
/// Routing metadata is fixed at construction. The payload is shared so the
/// queue and completion bookkeeping can hold it at the same time. Only the
/// dispatch layer moves `status` forward and sets internal flags.
#[derive(Debug, Clone, Default)]
pub struct RequestEnvelope {
    flags: RequestFlags,
    target_object_id: ObjectId,
    owner: Handle,
    user_data: Handle,
    user_data_owner: Handle,
    status: RequestStatus,
    internal_info: InternalInfoFlags,
    payload: Option<Arc<RequestPayload>>,
}

impl RequestEnvelope {
    /// Build an envelope, converting `data` into its payload.
    #[must_use]
    pub fn new(
        flags: RequestFlags,
        target_object_id: ObjectId,
        owner: Handle,
        user_data: Handle,
        user_data_owner: Handle,
        data: AudioRequest,
    ) -> Self {
        Self {
            flags,
            target_object_id,
            owner,
            user_data,
            user_data_owner,
            status: RequestStatus::None,
            internal_info: InternalInfoFlags::empty(),
            payload: Some(Arc::new(RequestPayload::from(data))),
        }
    }

    /// An envelope with no payload. Dispatch treats it as nothing to do.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an envelope for `request` as announced by a raw tag pair.
    ///
    /// A tag outside the catalog, or one naming a different kind than
    /// `request`, is logged and yields an empty envelope.
    #[must_use]
    pub fn from_raw_tag(category: u32, kind: u32, request: Request) -> Self {
        match decode_raw_tag(category, kind) {
            Some(tagged) if tagged == request.data.kind() => Self::from(request),
            Some(tagged) => {
                let actual = request.data.kind();
                error!(?tagged, ?actual, "Request tag does not match its data");
                Self::empty()
            }
            None => Self::empty(),
        }
    }

    #[must_use]
    pub fn flags(&self) -> RequestFlags {
        self.flags
    }

    #[must_use]
    pub fn target_object_id(&self) -> ObjectId {
        self.target_object_id
    }

    #[must_use]
    pub fn owner(&self) -> Handle {
        self.owner
    }

    #[must_use]
    pub fn user_data(&self) -> Handle {
        self.user_data
    }

    #[must_use]
    pub fn user_data_owner(&self) -> Handle {
        self.user_data_owner
    }

    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    #[must_use]
    pub fn internal_info(&self) -> InternalInfoFlags {
        self.internal_info
    }

    /// The converted payload, `None` for an empty envelope.
    #[must_use]
    pub fn payload(&self) -> Option<&RequestPayload> {
        self.payload.as_deref()
    }

    /// Another shared reference to the payload.
    #[must_use]
    pub fn shared_payload(&self) -> Option<Arc<RequestPayload>> {
        self.payload.clone()
    }

    /// Payload category, `RequestCategory::None` when empty.
    #[must_use]
    pub fn category(&self) -> RequestCategory {
        self.payload.as_deref().map_or(RequestCategory::None, RequestPayload::category)
    }

    #[must_use]
    pub fn kind(&self) -> Option<RequestKind> {
        self.payload.as_deref().map(RequestPayload::kind)
    }

    /// True once the status is `Success` or `Failure`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move the status forward.
    ///
    /// Allowed: `None -> Pending`, and any non-terminal status to a terminal
    /// one. Everything else leaves the status untouched and returns `false`.
    pub fn set_status(&mut self, status: RequestStatus) -> bool {
        let allowed = match (self.status, status) {
            (current, _) if current.is_terminal() => false,
            (RequestStatus::None, RequestStatus::Pending) => true,
            (_, next) => next.is_terminal(),
        };
        if allowed {
            self.status = status;
        }
        allowed
    }

    pub fn mark_waiting_for_removal(&mut self) {
        self.internal_info.insert(InternalInfoFlags::WAITING_FOR_REMOVAL);
    }

    #[must_use]
    pub fn is_waiting_for_removal(&self) -> bool {
        self.internal_info.contains(InternalInfoFlags::WAITING_FOR_REMOVAL)
    }
}

impl From<Request> for RequestEnvelope {
    fn from(request: Request) -> Self {
        Self::new(
            request.flags,
            request.target_object_id,
            request.owner,
            request.user_data,
            request.user_data_owner,
            request.data,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ControlId;
    use crate::kind::ObjectRequestKind;
    use crate::request::{ManagerRequest, ObjectRequest};
    use proptest::prelude::*;

    fn trigger_envelope(flags: RequestFlags) -> RequestEnvelope {
        RequestEnvelope::new(
            flags,
            ObjectId::default(),
            Handle::NONE,
            Handle::NONE,
            Handle::NONE,
            ObjectRequest::execute_trigger(ControlId::new(42)).into(),
        )
    }

    #[test]
    fn test_blocking_envelope_completes_only_on_success() {
        let mut envelope =
            trigger_envelope(RequestFlags::PRIORITY_HIGH | RequestFlags::EXECUTE_BLOCKING);

        assert_eq!(envelope.target_object_id(), ObjectId::INVALID);
        assert!(!envelope.is_complete());

        assert!(envelope.set_status(RequestStatus::Success));
        assert!(envelope.is_complete());
    }

    #[test]
    fn test_pending_is_not_complete() {
        let mut envelope = trigger_envelope(RequestFlags::empty());
        assert!(envelope.set_status(RequestStatus::Pending));
        assert!(!envelope.is_complete());
    }

    #[test]
    fn test_status_never_moves_backward() {
        let mut envelope = trigger_envelope(RequestFlags::empty());
        assert!(envelope.set_status(RequestStatus::Pending));
        assert!(!envelope.set_status(RequestStatus::None));
        assert!(!envelope.set_status(RequestStatus::Pending));
        assert_eq!(envelope.status(), RequestStatus::Pending);

        assert!(envelope.set_status(RequestStatus::Failure));
        assert!(!envelope.set_status(RequestStatus::Success));
        assert_eq!(envelope.status(), RequestStatus::Failure);
    }

    #[test]
    fn test_empty_envelope() {
        let envelope = RequestEnvelope::empty();
        assert_eq!(envelope.category(), RequestCategory::None);
        assert!(envelope.payload().is_none());
        assert!(envelope.kind().is_none());
        assert!(!envelope.is_complete());
    }

    #[test]
    fn test_payload_is_shared_not_copied() {
        let envelope = trigger_envelope(RequestFlags::empty());
        let queued = envelope.shared_payload().unwrap();
        let bookkeeping = envelope.clone();

        assert!(Arc::ptr_eq(&queued, &bookkeeping.shared_payload().unwrap()));
        assert_eq!(Arc::strong_count(&queued), 3);
    }

    #[test]
    fn test_waiting_for_removal() {
        let mut envelope = trigger_envelope(RequestFlags::SYNC_CALLBACK);
        assert!(!envelope.is_waiting_for_removal());
        envelope.mark_waiting_for_removal();
        assert!(envelope.is_waiting_for_removal());
        assert_eq!(envelope.internal_info(), InternalInfoFlags::WAITING_FOR_REMOVAL);
    }

    #[test]
    fn test_from_request_keeps_routing() {
        let request = Request::new(ManagerRequest::StopAllSounds)
            .with_flags(RequestFlags::THREAD_SAFE_PUSH)
            .with_target(ObjectId::GLOBAL)
            .with_owner(Handle(7))
            .with_user_data(Handle(8), Handle(9));

        let envelope = RequestEnvelope::from(request);
        assert_eq!(envelope.flags(), RequestFlags::THREAD_SAFE_PUSH);
        assert_eq!(envelope.target_object_id(), ObjectId::GLOBAL);
        assert_eq!(envelope.owner(), Handle(7));
        assert_eq!(envelope.user_data(), Handle(8));
        assert_eq!(envelope.user_data_owner(), Handle(9));
        assert_eq!(envelope.category(), RequestCategory::Manager);
    }

    #[test]
    fn test_from_raw_tag_builds_matching_request() {
        let request = Request::new(ObjectRequest::execute_trigger(ControlId::new(42)))
            .with_target(ObjectId::new(3));
        let object = RequestCategory::Object.raw();
        let envelope =
            RequestEnvelope::from_raw_tag(object, ObjectRequestKind::ExecuteTrigger.bit(), request);

        assert_eq!(envelope.category(), RequestCategory::Object);
        assert_eq!(envelope.kind(), Some(RequestKind::Object(ObjectRequestKind::ExecuteTrigger)));
        assert_eq!(envelope.target_object_id(), ObjectId::new(3));
    }

    #[test]
    fn test_from_raw_tag_rejects_unknown_or_mismatched_tags() {
        let request = || Request::new(ManagerRequest::MuteAll).with_owner(Handle(4));

        let object = RequestCategory::Object.raw();
        let trigger = ObjectRequestKind::ExecuteTrigger.bit();

        for (category, kind) in [(77, 1), (1, 1 << 31), (0, 0), (object, trigger)] {
            let envelope = RequestEnvelope::from_raw_tag(category, kind, request());
            assert_eq!(envelope.category(), RequestCategory::None);
            assert!(envelope.payload().is_none());
            assert_eq!(envelope.owner(), Handle::NONE);
        }
    }

    #[test]
    fn test_flags_serialize_by_name() {
        let flags = RequestFlags::PRIORITY_HIGH | RequestFlags::SYNC_CALLBACK;
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, "\"PRIORITY_HIGH | SYNC_CALLBACK\"");
        assert_eq!(serde_json::from_str::<RequestFlags>(&json).unwrap(), flags);
    }

    fn any_status() -> impl Strategy<Value = RequestStatus> {
        prop_oneof![
            Just(RequestStatus::None),
            Just(RequestStatus::Pending),
            Just(RequestStatus::Success),
            Just(RequestStatus::Failure),
        ]
    }

    proptest! {
        #[test]
        fn test_terminal_status_is_sticky(steps in prop::collection::vec(any_status(), 0..16)) {
            let mut envelope = trigger_envelope(RequestFlags::empty());
            let mut terminal = None;
            for step in steps {
                envelope.set_status(step);
                if let Some(first) = terminal {
                    prop_assert_eq!(envelope.status(), first);
                } else if envelope.is_complete() {
                    terminal = Some(envelope.status());
                }
            }
        }

        #[test]
        fn test_is_complete_is_a_pure_read(status in any_status(), reads in 1usize..8) {
            let mut envelope = trigger_envelope(RequestFlags::empty());
            envelope.set_status(status);
            let first = envelope.is_complete();
            for _ in 0..reads {
                prop_assert_eq!(envelope.is_complete(), first);
            }
        }
    }
}
