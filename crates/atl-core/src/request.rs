//! Public request descriptions.
//!
//! These are what callers build and what scripts describe in JSON. Strings
//! are unbounded here; they are narrowed when converted into a payload.

use serde::{Deserialize, Serialize};

use crate::envelope::RequestFlags;
use crate::ids::{
    ControlId, EnvironmentId, EventId, Handle, ObjectId, PreloadRequestId, SourceId,
    SwitchStateId,
};
use crate::kind::{
    CallbackManagerRequestKind, ListenerRequestKind, ManagerRequestKind, ObjectRequestKind,
    RequestCategory, RequestKind,
};
use crate::types::{
    AudioInputConfig, DataScope, LipSyncMethod, MultiPositionParams, ObjectIdSlot, PanningMode,
    SourceInfo, WorldPosition,
};

/// Requests handled by the audio system itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManagerRequest {
    InitImplementation,
    ReleaseImplementation,
    /// Reserve a new object id and write it into `object_id`
    ReserveObjectId {
        #[serde(skip)]
        object_id: ObjectIdSlot,
        #[serde(default)]
        object_name: String,
    },
    CreateSource { config: AudioInputConfig },
    DestroySource { source_id: SourceId },
    ParseControlsData { controls_path: String, scope: DataScope },
    ParsePreloadsData { controls_path: String, scope: DataScope },
    ClearControlsData { scope: DataScope },
    ClearPreloadsData { scope: DataScope },
    PreloadSingleRequest {
        preload_request_id: PreloadRequestId,
        #[serde(default)]
        auto_load_only: bool,
    },
    UnloadSingleRequest { preload_request_id: PreloadRequestId },
    UnloadDataByScope { scope: DataScope },
    RefreshAudioSystem {
        controls_path: String,
        level_name: String,
        #[serde(default)]
        level_preload_id: PreloadRequestId,
    },
    ChangeLanguage,
    LoseFocus,
    GetFocus,
    MuteAll,
    UnmuteAll,
    StopAllSounds,
    DrawDebugInfo,
    SetAudioPanningMode { mode: PanningMode },
}

impl ManagerRequest {
    /// Reserve an object id into `slot`.
    #[must_use]
    pub fn reserve_object_id(slot: &ObjectIdSlot, name: impl Into<String>) -> Self {
        Self::ReserveObjectId { object_id: slot.clone(), object_name: name.into() }
    }

    /// Refresh the audio system without a level preload.
    #[must_use]
    pub fn refresh_audio_system(
        controls_path: impl Into<String>,
        level_name: impl Into<String>,
    ) -> Self {
        Self::RefreshAudioSystem {
            controls_path: controls_path.into(),
            level_name: level_name.into(),
            level_preload_id: PreloadRequestId::INVALID,
        }
    }

    /// The kind of this request.
    #[must_use]
    pub fn kind(&self) -> ManagerRequestKind {
        match self {
            Self::InitImplementation => ManagerRequestKind::InitImplementation,
            Self::ReleaseImplementation => ManagerRequestKind::ReleaseImplementation,
            Self::ReserveObjectId { .. } => ManagerRequestKind::ReserveObjectId,
            Self::CreateSource { .. } => ManagerRequestKind::CreateSource,
            Self::DestroySource { .. } => ManagerRequestKind::DestroySource,
            Self::ParseControlsData { .. } => ManagerRequestKind::ParseControlsData,
            Self::ParsePreloadsData { .. } => ManagerRequestKind::ParsePreloadsData,
            Self::ClearControlsData { .. } => ManagerRequestKind::ClearControlsData,
            Self::ClearPreloadsData { .. } => ManagerRequestKind::ClearPreloadsData,
            Self::PreloadSingleRequest { .. } => ManagerRequestKind::PreloadSingleRequest,
            Self::UnloadSingleRequest { .. } => ManagerRequestKind::UnloadSingleRequest,
            Self::UnloadDataByScope { .. } => ManagerRequestKind::UnloadDataByScope,
            Self::RefreshAudioSystem { .. } => ManagerRequestKind::RefreshAudioSystem,
            Self::ChangeLanguage => ManagerRequestKind::ChangeLanguage,
            Self::LoseFocus => ManagerRequestKind::LoseFocus,
            Self::GetFocus => ManagerRequestKind::GetFocus,
            Self::MuteAll => ManagerRequestKind::MuteAll,
            Self::UnmuteAll => ManagerRequestKind::UnmuteAll,
            Self::StopAllSounds => ManagerRequestKind::StopAllSounds,
            Self::DrawDebugInfo => ManagerRequestKind::DrawDebugInfo,
            Self::SetAudioPanningMode { .. } => ManagerRequestKind::SetAudioPanningMode,
        }
    }
}

/// Notifications reported back from the audio implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallbackManagerRequest {
    ReportStartedEvent { event_id: EventId },
    ReportFinishedEvent { event_id: EventId, success: bool },
    ReportFinishedTriggerInstance { trigger_id: ControlId },
    ReportProcessedObstructionRay { object_id: ObjectId, ray_id: usize },
}

impl CallbackManagerRequest {
    /// The kind of this request.
    #[must_use]
    pub fn kind(&self) -> CallbackManagerRequestKind {
        match self {
            Self::ReportStartedEvent { .. } => CallbackManagerRequestKind::ReportStartedEvent,
            Self::ReportFinishedEvent { .. } => CallbackManagerRequestKind::ReportFinishedEvent,
            Self::ReportFinishedTriggerInstance { .. } => {
                CallbackManagerRequestKind::ReportFinishedTriggerInstance
            }
            Self::ReportProcessedObstructionRay { .. } => {
                CallbackManagerRequestKind::ReportProcessedObstructionRay
            }
        }
    }
}

/// Requests addressed to one audio object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectRequest {
    PrepareTrigger { trigger_id: ControlId },
    UnprepareTrigger { trigger_id: ControlId },
    ExecuteTrigger {
        trigger_id: ControlId,
        #[serde(default)]
        time_until_removal_ms: f32,
        #[serde(default)]
        lip_sync_method: LipSyncMethod,
    },
    StopTrigger { trigger_id: ControlId },
    StopAllTriggers {
        #[serde(default)]
        filter_by_owner: bool,
    },
    SetPosition { position: WorldPosition },
    SetRtpcValue { control_id: ControlId, value: f32 },
    SetSwitchState { switch_id: ControlId, state_id: SwitchStateId },
    SetVolume { volume: f32 },
    SetEnvironmentAmount { environment_id: EnvironmentId, amount: f32 },
    ResetEnvironments,
    ResetRtpcs,
    ReleaseObject,
    ExecuteSourceTrigger { trigger_id: ControlId, source_info: SourceInfo },
    SetMultiPositions { params: MultiPositionParams },
}

impl ObjectRequest {
    /// Execute a trigger with no removal timeout and no lip sync.
    #[must_use]
    pub fn execute_trigger(trigger_id: ControlId) -> Self {
        Self::ExecuteTrigger {
            trigger_id,
            time_until_removal_ms: 0.0,
            lip_sync_method: LipSyncMethod::None,
        }
    }

    /// The kind of this request.
    #[must_use]
    pub fn kind(&self) -> ObjectRequestKind {
        match self {
            Self::PrepareTrigger { .. } => ObjectRequestKind::PrepareTrigger,
            Self::UnprepareTrigger { .. } => ObjectRequestKind::UnprepareTrigger,
            Self::ExecuteTrigger { .. } => ObjectRequestKind::ExecuteTrigger,
            Self::StopTrigger { .. } => ObjectRequestKind::StopTrigger,
            Self::StopAllTriggers { .. } => ObjectRequestKind::StopAllTriggers,
            Self::SetPosition { .. } => ObjectRequestKind::SetPosition,
            Self::SetRtpcValue { .. } => ObjectRequestKind::SetRtpcValue,
            Self::SetSwitchState { .. } => ObjectRequestKind::SetSwitchState,
            Self::SetVolume { .. } => ObjectRequestKind::SetVolume,
            Self::SetEnvironmentAmount { .. } => ObjectRequestKind::SetEnvironmentAmount,
            Self::ResetEnvironments => ObjectRequestKind::ResetEnvironments,
            Self::ResetRtpcs => ObjectRequestKind::ResetRtpcs,
            Self::ReleaseObject => ObjectRequestKind::ReleaseObject,
            Self::ExecuteSourceTrigger { .. } => ObjectRequestKind::ExecuteSourceTrigger,
            Self::SetMultiPositions { .. } => ObjectRequestKind::SetMultiPositions,
        }
    }
}

/// Requests addressed to a listener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListenerRequest {
    SetPosition { position: WorldPosition },
}

impl ListenerRequest {
    /// The kind of this request.
    #[must_use]
    pub fn kind(&self) -> ListenerRequestKind {
        match self {
            Self::SetPosition { .. } => ListenerRequestKind::SetPosition,
        }
    }
}

/// A request description: one case per `(category, kind)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "request", rename_all = "snake_case")]
pub enum AudioRequest {
    Manager(ManagerRequest),
    CallbackManager(CallbackManagerRequest),
    Object(ObjectRequest),
    Listener(ListenerRequest),
}

impl AudioRequest {
    /// The tagged kind of this request.
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Manager(request) => RequestKind::Manager(request.kind()),
            Self::CallbackManager(request) => RequestKind::CallbackManager(request.kind()),
            Self::Object(request) => RequestKind::Object(request.kind()),
            Self::Listener(request) => RequestKind::Listener(request.kind()),
        }
    }

    /// The category of this request.
    #[must_use]
    pub fn category(&self) -> RequestCategory {
        self.kind().category()
    }
}

impl From<ManagerRequest> for AudioRequest {
    fn from(request: ManagerRequest) -> Self {
        Self::Manager(request)
    }
}

impl From<CallbackManagerRequest> for AudioRequest {
    fn from(request: CallbackManagerRequest) -> Self {
        Self::CallbackManager(request)
    }
}

impl From<ObjectRequest> for AudioRequest {
    fn from(request: ObjectRequest) -> Self {
        Self::Object(request)
    }
}

impl From<ListenerRequest> for AudioRequest {
    fn from(request: ListenerRequest) -> Self {
        Self::Listener(request)
    }
}

/// A request description plus its routing metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Execution hints
    #[serde(default)]
    pub flags: RequestFlags,
    /// Object the request applies to, `INVALID` when not object-scoped
    #[serde(default)]
    pub target_object_id: ObjectId,
    /// Caller identity, returned on completion
    #[serde(default)]
    pub owner: Handle,
    /// Caller data, returned on completion
    #[serde(default)]
    pub user_data: Handle,
    /// Owner of `user_data`, returned on completion
    #[serde(default)]
    pub user_data_owner: Handle,
    /// The request itself
    pub data: AudioRequest,
}

impl Request {
    /// Create a request with no flags and no target object.
    #[must_use]
    pub fn new(data: impl Into<AudioRequest>) -> Self {
        Self {
            flags: RequestFlags::empty(),
            target_object_id: ObjectId::INVALID,
            owner: Handle::NONE,
            user_data: Handle::NONE,
            user_data_owner: Handle::NONE,
            data: data.into(),
        }
    }

    /// Set the execution flags.
    #[must_use]
    pub fn with_flags(mut self, flags: RequestFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the target object.
    #[must_use]
    pub fn with_target(mut self, object_id: ObjectId) -> Self {
        self.target_object_id = object_id;
        self
    }

    /// Set the owner.
    #[must_use]
    pub fn with_owner(mut self, owner: Handle) -> Self {
        self.owner = owner;
        self
    }

    /// Set the user data and its owner.
    #[must_use]
    pub fn with_user_data(mut self, user_data: Handle, user_data_owner: Handle) -> Self {
        self.user_data = user_data;
        self.user_data_owner = user_data_owner;
        self
    }
}
