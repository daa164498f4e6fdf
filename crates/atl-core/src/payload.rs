//! Internal request payloads.
//!
//! Each `(category, kind)` pair has exactly one payload shape. Payloads are
//! built from a request description by an exhaustive match and never change
//! afterwards; the envelope shares them behind an `Arc`.

use crate::bounded::{FileName, FilePath};
#[cfg(feature = "diagnostics")]
use crate::bounded::ObjectName;
use crate::ids::{
    ControlId, EnvironmentId, EventId, ObjectId, PreloadRequestId, SourceId, SwitchStateId,
};
use crate::kind::{
    CallbackManagerRequestKind, ListenerRequestKind, ManagerRequestKind, ObjectRequestKind,
    RequestCategory, RequestKind,
};
use crate::request::{
    AudioRequest, CallbackManagerRequest, ListenerRequest, ManagerRequest, ObjectRequest,
};
use crate::types::{
    AudioInputConfig, DataScope, EventOutcome, LipSyncMethod, MultiPositionParams, ObjectIdSlot,
    PanningMode, SourceInfo, WorldPosition,
};

/// Object id reservation. `object_id` is the caller's slot, not a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveObjectIdData {
    pub object_id: ObjectIdSlot,
    #[cfg(feature = "diagnostics")]
    pub object_name: ObjectName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSourceData {
    pub config: AudioInputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroySourceData {
    pub source_id: SourceId,
}

/// Parse controls or preloads from a folder.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseDataData {
    pub controls_path: FilePath,
    pub scope: DataScope,
}

/// Clear or unload everything within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeData {
    pub scope: DataScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadSingleRequestData {
    pub preload_request_id: PreloadRequestId,
    pub auto_load_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnloadSingleRequestData {
    pub preload_request_id: PreloadRequestId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshAudioSystemData {
    pub controls_path: FilePath,
    pub level_name: FileName,
    pub level_preload_id: PreloadRequestId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetAudioPanningModeData {
    pub mode: PanningMode,
}

/// Payloads of manager requests.
#[derive(Debug, Clone, PartialEq)]
pub enum ManagerPayload {
    InitImplementation,
    ReleaseImplementation,
    ReserveObjectId(ReserveObjectIdData),
    CreateSource(CreateSourceData),
    DestroySource(DestroySourceData),
    ParseControlsData(ParseDataData),
    ParsePreloadsData(ParseDataData),
    ClearControlsData(ScopeData),
    ClearPreloadsData(ScopeData),
    PreloadSingleRequest(PreloadSingleRequestData),
    UnloadSingleRequest(UnloadSingleRequestData),
    UnloadDataByScope(ScopeData),
    RefreshAudioSystem(RefreshAudioSystemData),
    ChangeLanguage,
    LoseFocus,
    GetFocus,
    MuteAll,
    UnmuteAll,
    StopAllSounds,
    DrawDebugInfo,
    SetAudioPanningMode(SetAudioPanningModeData),
}

impl ManagerPayload {
    #[must_use]
    pub fn kind(&self) -> ManagerRequestKind {
        match self {
            Self::InitImplementation => ManagerRequestKind::InitImplementation,
            Self::ReleaseImplementation => ManagerRequestKind::ReleaseImplementation,
            Self::ReserveObjectId(_) => ManagerRequestKind::ReserveObjectId,
            Self::CreateSource(_) => ManagerRequestKind::CreateSource,
            Self::DestroySource(_) => ManagerRequestKind::DestroySource,
            Self::ParseControlsData(_) => ManagerRequestKind::ParseControlsData,
            Self::ParsePreloadsData(_) => ManagerRequestKind::ParsePreloadsData,
            Self::ClearControlsData(_) => ManagerRequestKind::ClearControlsData,
            Self::ClearPreloadsData(_) => ManagerRequestKind::ClearPreloadsData,
            Self::PreloadSingleRequest(_) => ManagerRequestKind::PreloadSingleRequest,
            Self::UnloadSingleRequest(_) => ManagerRequestKind::UnloadSingleRequest,
            Self::UnloadDataByScope(_) => ManagerRequestKind::UnloadDataByScope,
            Self::RefreshAudioSystem(_) => ManagerRequestKind::RefreshAudioSystem,
            Self::ChangeLanguage => ManagerRequestKind::ChangeLanguage,
            Self::LoseFocus => ManagerRequestKind::LoseFocus,
            Self::GetFocus => ManagerRequestKind::GetFocus,
            Self::MuteAll => ManagerRequestKind::MuteAll,
            Self::UnmuteAll => ManagerRequestKind::UnmuteAll,
            Self::StopAllSounds => ManagerRequestKind::StopAllSounds,
            Self::DrawDebugInfo => ManagerRequestKind::DrawDebugInfo,
            Self::SetAudioPanningMode(_) => ManagerRequestKind::SetAudioPanningMode,
        }
    }
}

impl From<ManagerRequest> for ManagerPayload {
    fn from(request: ManagerRequest) -> Self {
        match request {
            ManagerRequest::InitImplementation => Self::InitImplementation,
            ManagerRequest::ReleaseImplementation => Self::ReleaseImplementation,
            ManagerRequest::ReserveObjectId { object_id, object_name } => {
                #[cfg(not(feature = "diagnostics"))]
                let _ = object_name;
                Self::ReserveObjectId(ReserveObjectIdData {
                    object_id,
                    #[cfg(feature = "diagnostics")]
                    object_name: ObjectName::new(object_name),
                })
            }
            ManagerRequest::CreateSource { config } => {
                Self::CreateSource(CreateSourceData { config })
            }
            ManagerRequest::DestroySource { source_id } => {
                Self::DestroySource(DestroySourceData { source_id })
            }
            ManagerRequest::ParseControlsData { controls_path, scope } => {
                Self::ParseControlsData(ParseDataData {
                    controls_path: controls_path.into(),
                    scope,
                })
            }
            ManagerRequest::ParsePreloadsData { controls_path, scope } => {
                Self::ParsePreloadsData(ParseDataData {
                    controls_path: controls_path.into(),
                    scope,
                })
            }
            ManagerRequest::ClearControlsData { scope } => {
                Self::ClearControlsData(ScopeData { scope })
            }
            ManagerRequest::ClearPreloadsData { scope } => {
                Self::ClearPreloadsData(ScopeData { scope })
            }
            ManagerRequest::PreloadSingleRequest { preload_request_id, auto_load_only } => {
                Self::PreloadSingleRequest(PreloadSingleRequestData {
                    preload_request_id,
                    auto_load_only,
                })
            }
            ManagerRequest::UnloadSingleRequest { preload_request_id } => {
                Self::UnloadSingleRequest(UnloadSingleRequestData { preload_request_id })
            }
            ManagerRequest::UnloadDataByScope { scope } => {
                Self::UnloadDataByScope(ScopeData { scope })
            }
            ManagerRequest::RefreshAudioSystem { controls_path, level_name, level_preload_id } => {
                Self::RefreshAudioSystem(RefreshAudioSystemData {
                    controls_path: controls_path.into(),
                    level_name: level_name.into(),
                    level_preload_id,
                })
            }
            ManagerRequest::ChangeLanguage => Self::ChangeLanguage,
            ManagerRequest::LoseFocus => Self::LoseFocus,
            ManagerRequest::GetFocus => Self::GetFocus,
            ManagerRequest::MuteAll => Self::MuteAll,
            ManagerRequest::UnmuteAll => Self::UnmuteAll,
            ManagerRequest::StopAllSounds => Self::StopAllSounds,
            ManagerRequest::DrawDebugInfo => Self::DrawDebugInfo,
            ManagerRequest::SetAudioPanningMode { mode } => {
                Self::SetAudioPanningMode(SetAudioPanningModeData { mode })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStartedEventData {
    pub event_id: EventId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFinishedEventData {
    pub event_id: EventId,
    pub success: bool,
}

impl ReportFinishedEventData {
    #[must_use]
    pub fn outcome(&self) -> EventOutcome {
        EventOutcome::from(self.success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFinishedTriggerInstanceData {
    pub trigger_id: ControlId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportProcessedObstructionRayData {
    pub object_id: ObjectId,
    pub ray_id: usize,
}

/// Payloads of callback manager requests.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackManagerPayload {
    ReportStartedEvent(ReportStartedEventData),
    ReportFinishedEvent(ReportFinishedEventData),
    ReportFinishedTriggerInstance(ReportFinishedTriggerInstanceData),
    ReportProcessedObstructionRay(ReportProcessedObstructionRayData),
}

impl CallbackManagerPayload {
    #[must_use]
    pub fn kind(&self) -> CallbackManagerRequestKind {
        match self {
            Self::ReportStartedEvent(_) => CallbackManagerRequestKind::ReportStartedEvent,
            Self::ReportFinishedEvent(_) => CallbackManagerRequestKind::ReportFinishedEvent,
            Self::ReportFinishedTriggerInstance(_) => {
                CallbackManagerRequestKind::ReportFinishedTriggerInstance
            }
            Self::ReportProcessedObstructionRay(_) => {
                CallbackManagerRequestKind::ReportProcessedObstructionRay
            }
        }
    }
}

impl From<CallbackManagerRequest> for CallbackManagerPayload {
    fn from(request: CallbackManagerRequest) -> Self {
        match request {
            CallbackManagerRequest::ReportStartedEvent { event_id } => {
                Self::ReportStartedEvent(ReportStartedEventData { event_id })
            }
            CallbackManagerRequest::ReportFinishedEvent { event_id, success } => {
                Self::ReportFinishedEvent(ReportFinishedEventData { event_id, success })
            }
            CallbackManagerRequest::ReportFinishedTriggerInstance { trigger_id } => {
                Self::ReportFinishedTriggerInstance(ReportFinishedTriggerInstanceData {
                    trigger_id,
                })
            }
            CallbackManagerRequest::ReportProcessedObstructionRay { object_id, ray_id } => {
                Self::ReportProcessedObstructionRay(ReportProcessedObstructionRayData {
                    object_id,
                    ray_id,
                })
            }
        }
    }
}

/// Prepare, unprepare or stop a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerData {
    pub trigger_id: ControlId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecuteTriggerData {
    pub trigger_id: ControlId,
    pub time_until_removal_ms: f32,
    pub lip_sync_method: LipSyncMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAllTriggersData {
    /// Stop only the triggers started by the envelope's owner
    pub filter_by_owner: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetPositionData {
    pub position: WorldPosition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetRtpcValueData {
    pub control_id: ControlId,
    pub value: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSwitchStateData {
    pub switch_id: ControlId,
    pub state_id: SwitchStateId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetVolumeData {
    pub volume: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetEnvironmentAmountData {
    pub environment_id: EnvironmentId,
    pub amount: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteSourceTriggerData {
    pub trigger_id: ControlId,
    pub source_info: SourceInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetMultiPositionsData {
    pub params: MultiPositionParams,
}

/// Payloads of object requests.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPayload {
    PrepareTrigger(TriggerData),
    UnprepareTrigger(TriggerData),
    ExecuteTrigger(ExecuteTriggerData),
    StopTrigger(TriggerData),
    StopAllTriggers(StopAllTriggersData),
    SetPosition(SetPositionData),
    SetRtpcValue(SetRtpcValueData),
    SetSwitchState(SetSwitchStateData),
    SetVolume(SetVolumeData),
    SetEnvironmentAmount(SetEnvironmentAmountData),
    ResetEnvironments,
    ResetRtpcs,
    ReleaseObject,
    ExecuteSourceTrigger(ExecuteSourceTriggerData),
    SetMultiPositions(SetMultiPositionsData),
}

impl ObjectPayload {
    #[must_use]
    pub fn kind(&self) -> ObjectRequestKind {
        match self {
            Self::PrepareTrigger(_) => ObjectRequestKind::PrepareTrigger,
            Self::UnprepareTrigger(_) => ObjectRequestKind::UnprepareTrigger,
            Self::ExecuteTrigger(_) => ObjectRequestKind::ExecuteTrigger,
            Self::StopTrigger(_) => ObjectRequestKind::StopTrigger,
            Self::StopAllTriggers(_) => ObjectRequestKind::StopAllTriggers,
            Self::SetPosition(_) => ObjectRequestKind::SetPosition,
            Self::SetRtpcValue(_) => ObjectRequestKind::SetRtpcValue,
            Self::SetSwitchState(_) => ObjectRequestKind::SetSwitchState,
            Self::SetVolume(_) => ObjectRequestKind::SetVolume,
            Self::SetEnvironmentAmount(_) => ObjectRequestKind::SetEnvironmentAmount,
            Self::ResetEnvironments => ObjectRequestKind::ResetEnvironments,
            Self::ResetRtpcs => ObjectRequestKind::ResetRtpcs,
            Self::ReleaseObject => ObjectRequestKind::ReleaseObject,
            Self::ExecuteSourceTrigger(_) => ObjectRequestKind::ExecuteSourceTrigger,
            Self::SetMultiPositions(_) => ObjectRequestKind::SetMultiPositions,
        }
    }
}

impl From<ObjectRequest> for ObjectPayload {
    fn from(request: ObjectRequest) -> Self {
        match request {
            ObjectRequest::PrepareTrigger { trigger_id } => {
                Self::PrepareTrigger(TriggerData { trigger_id })
            }
            ObjectRequest::UnprepareTrigger { trigger_id } => {
                Self::UnprepareTrigger(TriggerData { trigger_id })
            }
            ObjectRequest::ExecuteTrigger {
                trigger_id,
                time_until_removal_ms,
                lip_sync_method,
            } => Self::ExecuteTrigger(ExecuteTriggerData {
                trigger_id,
                time_until_removal_ms,
                lip_sync_method,
            }),
            ObjectRequest::StopTrigger { trigger_id } => {
                Self::StopTrigger(TriggerData { trigger_id })
            }
            ObjectRequest::StopAllTriggers { filter_by_owner } => {
                Self::StopAllTriggers(StopAllTriggersData { filter_by_owner })
            }
            ObjectRequest::SetPosition { position } => {
                Self::SetPosition(SetPositionData { position })
            }
            ObjectRequest::SetRtpcValue { control_id, value } => {
                Self::SetRtpcValue(SetRtpcValueData { control_id, value })
            }
            ObjectRequest::SetSwitchState { switch_id, state_id } => {
                Self::SetSwitchState(SetSwitchStateData { switch_id, state_id })
            }
            ObjectRequest::SetVolume { volume } => Self::SetVolume(SetVolumeData { volume }),
            ObjectRequest::SetEnvironmentAmount { environment_id, amount } => {
                Self::SetEnvironmentAmount(SetEnvironmentAmountData { environment_id, amount })
            }
            ObjectRequest::ResetEnvironments => Self::ResetEnvironments,
            ObjectRequest::ResetRtpcs => Self::ResetRtpcs,
            ObjectRequest::ReleaseObject => Self::ReleaseObject,
            ObjectRequest::ExecuteSourceTrigger { trigger_id, source_info } => {
                Self::ExecuteSourceTrigger(ExecuteSourceTriggerData { trigger_id, source_info })
            }
            ObjectRequest::SetMultiPositions { params } => {
                Self::SetMultiPositions(SetMultiPositionsData { params })
            }
        }
    }
}

/// Payloads of listener requests.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenerPayload {
    SetPosition(SetPositionData),
}

impl ListenerPayload {
    #[must_use]
    pub fn kind(&self) -> ListenerRequestKind {
        match self {
            Self::SetPosition(_) => ListenerRequestKind::SetPosition,
        }
    }
}

impl From<ListenerRequest> for ListenerPayload {
    fn from(request: ListenerRequest) -> Self {
        match request {
            ListenerRequest::SetPosition { position } => {
                Self::SetPosition(SetPositionData { position })
            }
        }
    }
}

/// A converted request, tagged by category.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPayload {
    Manager(ManagerPayload),
    CallbackManager(CallbackManagerPayload),
    Object(ObjectPayload),
    Listener(ListenerPayload),
}

impl RequestPayload {
    /// The tagged kind of this payload.
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Manager(payload) => RequestKind::Manager(payload.kind()),
            Self::CallbackManager(payload) => RequestKind::CallbackManager(payload.kind()),
            Self::Object(payload) => RequestKind::Object(payload.kind()),
            Self::Listener(payload) => RequestKind::Listener(payload.kind()),
        }
    }

    /// The category of this payload.
    #[must_use]
    pub fn category(&self) -> RequestCategory {
        self.kind().category()
    }
}

impl From<AudioRequest> for RequestPayload {
    fn from(request: AudioRequest) -> Self {
        match request {
            AudioRequest::Manager(request) => Self::Manager(request.into()),
            AudioRequest::CallbackManager(request) => Self::CallbackManager(request.into()),
            AudioRequest::Object(request) => Self::Object(request.into()),
            AudioRequest::Listener(request) => Self::Listener(request.into()),
        }
    }
}

/// Convert a request description into its internal payload.
#[must_use]
pub fn convert(request: AudioRequest) -> RequestPayload {
    request.into()
}
