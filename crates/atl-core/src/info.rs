//! Completion reports handed to event listeners.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::envelope::{RequestEnvelope, RequestStatus};
use crate::ids::{ControlId, EventId, Handle, ObjectId};
use crate::kind::{RequestCategory, RequestKind};
use crate::payload::{CallbackManagerPayload, ObjectPayload, RequestPayload};

/// Outcome reported to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestResult {
    Success,
    Failure,
}

impl RequestResult {
    /// Map an envelope status to a listener result.
    ///
    /// Only `Success` maps to success. A non-terminal status here means the
    /// caller reported an unfinished request.
    #[must_use]
    pub fn from_status(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Success => Self::Success,
            RequestStatus::Failure => Self::Failure,
            RequestStatus::None | RequestStatus::Pending => {
                error!(?status, "Reporting a request that has not completed");
                Self::Failure
            }
        }
    }
}

/// What a listener learns about a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    pub result: RequestResult,
    pub owner: Handle,
    pub user_data: Handle,
    pub user_data_owner: Handle,
    pub category: RequestCategory,
    /// Kind bit within `category`, 0 for an empty envelope
    pub kind_bit: u32,
    /// Trigger involved, for trigger execution and finished-instance reports
    pub control_id: ControlId,
    pub object_id: ObjectId,
    /// Event involved, for started-event reports
    pub event_id: EventId,
}

impl RequestInfo {
    #[must_use]
    pub fn from_envelope(envelope: &RequestEnvelope) -> Self {
        let payload = envelope.payload();

        let control_id = match payload {
            Some(RequestPayload::Object(ObjectPayload::ExecuteTrigger(data))) => data.trigger_id,
            Some(RequestPayload::CallbackManager(
                CallbackManagerPayload::ReportFinishedTriggerInstance(data),
            )) => data.trigger_id,
            _ => ControlId::INVALID,
        };

        let event_id = match payload {
            Some(RequestPayload::CallbackManager(
                CallbackManagerPayload::ReportStartedEvent(data),
            )) => data.event_id,
            _ => EventId::INVALID,
        };

        Self {
            result: RequestResult::from_status(envelope.status()),
            owner: envelope.owner(),
            user_data: envelope.user_data(),
            user_data_owner: envelope.user_data_owner(),
            category: envelope.category(),
            kind_bit: envelope.kind().map_or(0, RequestKind::bit),
            control_id,
            object_id: envelope.target_object_id(),
            event_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::RequestFlags;
    use crate::kind::{CallbackManagerRequestKind, ObjectRequestKind};
    use crate::request::{CallbackManagerRequest, ManagerRequest, ObjectRequest, Request};

    fn completed(request: Request, status: RequestStatus) -> RequestEnvelope {
        let mut envelope = RequestEnvelope::from(request);
        envelope.set_status(status);
        envelope
    }

    #[test]
    fn test_result_from_status() {
        assert_eq!(RequestResult::from_status(RequestStatus::Success), RequestResult::Success);
        assert_eq!(RequestResult::from_status(RequestStatus::Failure), RequestResult::Failure);
        assert_eq!(RequestResult::from_status(RequestStatus::Pending), RequestResult::Failure);
        assert_eq!(RequestResult::from_status(RequestStatus::None), RequestResult::Failure);
    }

    #[test]
    fn test_execute_trigger_reports_trigger_and_object() {
        let request = Request::new(ObjectRequest::execute_trigger(ControlId::new(42)))
            .with_flags(RequestFlags::PRIORITY_NORMAL)
            .with_target(ObjectId::new(17))
            .with_owner(Handle(1))
            .with_user_data(Handle(2), Handle(3));

        let info = RequestInfo::from_envelope(&completed(request, RequestStatus::Success));
        assert_eq!(info.result, RequestResult::Success);
        assert_eq!(info.category, RequestCategory::Object);
        assert_eq!(info.kind_bit, ObjectRequestKind::ExecuteTrigger.bit());
        assert_eq!(info.control_id, ControlId::new(42));
        assert_eq!(info.object_id, ObjectId::new(17));
        assert_eq!(info.owner, Handle(1));
        assert_eq!(info.user_data, Handle(2));
        assert_eq!(info.user_data_owner, Handle(3));
        assert_eq!(info.event_id, EventId::INVALID);
    }

    #[test]
    fn test_finished_trigger_instance_reports_trigger() {
        let request = Request::new(CallbackManagerRequest::ReportFinishedTriggerInstance {
            trigger_id: ControlId::new(5),
        });

        let info = RequestInfo::from_envelope(&completed(request, RequestStatus::Success));
        assert_eq!(
            info.kind_bit,
            CallbackManagerRequestKind::ReportFinishedTriggerInstance.bit()
        );
        assert_eq!(info.control_id, ControlId::new(5));
    }

    #[test]
    fn test_started_event_reports_event() {
        let request =
            Request::new(CallbackManagerRequest::ReportStartedEvent { event_id: EventId::new(9) });

        let info = RequestInfo::from_envelope(&completed(request, RequestStatus::Failure));
        assert_eq!(info.result, RequestResult::Failure);
        assert_eq!(info.event_id, EventId::new(9));
        assert_eq!(info.control_id, ControlId::INVALID);
    }

    #[test]
    fn test_other_requests_carry_no_ids() {
        let request = Request::new(ManagerRequest::MuteAll);
        let info = RequestInfo::from_envelope(&completed(request, RequestStatus::Success));
        assert_eq!(info.control_id, ControlId::INVALID);
        assert_eq!(info.event_id, EventId::INVALID);
        assert_eq!(info.object_id, ObjectId::INVALID);
    }

    #[test]
    fn test_empty_envelope_info() {
        let info = RequestInfo::from_envelope(&RequestEnvelope::empty());
        assert_eq!(info.category, RequestCategory::None);
        assert_eq!(info.kind_bit, 0);
        assert_eq!(info.result, RequestResult::Failure);
    }
}
