//! Human-readable labels for requests. Logging only.

use crate::envelope::{RequestEnvelope, RequestFlags};
use crate::kind::{
    CallbackManagerRequestKind, ListenerRequestKind, ManagerRequestKind, ObjectRequestKind,
    RequestCategory, RequestKind,
};

#[must_use]
pub fn category_name(category: RequestCategory) -> &'static str {
    match category {
        RequestCategory::None => "None",
        RequestCategory::Manager => "Manager",
        RequestCategory::CallbackManager => "CallbackManager",
        RequestCategory::Object => "Object",
        RequestCategory::Listener => "Listener",
    }
}

#[must_use]
pub fn kind_name(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Manager(kind) => match kind {
            ManagerRequestKind::InitImplementation => "INIT_IMPLEMENTATION",
            ManagerRequestKind::ReleaseImplementation => "RELEASE_IMPLEMENTATION",
            ManagerRequestKind::ReserveObjectId => "RESERVE_AUDIO_OBJECT_ID",
            ManagerRequestKind::CreateSource => "CREATE_SOURCE",
            ManagerRequestKind::DestroySource => "DESTROY_SOURCE",
            ManagerRequestKind::ParseControlsData => "PARSE_CONTROLS_DATA",
            ManagerRequestKind::ParsePreloadsData => "PARSE_PRELOADS_DATA",
            ManagerRequestKind::ClearControlsData => "CLEAR_CONTROLS_DATA",
            ManagerRequestKind::ClearPreloadsData => "CLEAR_PRELOADS_DATA",
            ManagerRequestKind::PreloadSingleRequest => "PRELOAD_SINGLE_REQUEST",
            ManagerRequestKind::UnloadSingleRequest => "UNLOAD_SINGLE_REQUEST",
            ManagerRequestKind::UnloadDataByScope => "UNLOAD_AFCM_DATA_BY_SCOPE",
            ManagerRequestKind::RefreshAudioSystem => "REFRESH_AUDIO_SYSTEM",
            ManagerRequestKind::ChangeLanguage => "CHANGE_LANGUAGE",
            ManagerRequestKind::LoseFocus => "LOSE_FOCUS",
            ManagerRequestKind::GetFocus => "GET_FOCUS",
            ManagerRequestKind::MuteAll => "MUTE_ALL",
            ManagerRequestKind::UnmuteAll => "UNMUTE_ALL",
            ManagerRequestKind::StopAllSounds => "STOP_ALL_SOUNDS",
            ManagerRequestKind::DrawDebugInfo => "DRAW_DEBUG_INFO",
            ManagerRequestKind::SetAudioPanningMode => "SET_AUDIO_PANNING_MODE",
        },
        RequestKind::CallbackManager(kind) => match kind {
            CallbackManagerRequestKind::ReportStartedEvent => "REPORT_STARTED_EVENT",
            CallbackManagerRequestKind::ReportFinishedEvent => "REPORT_FINISHED_EVENT",
            CallbackManagerRequestKind::ReportFinishedTriggerInstance => {
                "REPORT_FINISHED_TRIGGER_INSTANCE"
            }
            CallbackManagerRequestKind::ReportProcessedObstructionRay => {
                "REPORT_PROCESSED_OBSTRUCTION_RAY"
            }
        },
        RequestKind::Object(kind) => match kind {
            ObjectRequestKind::PrepareTrigger => "PREPARE_TRIGGER",
            ObjectRequestKind::UnprepareTrigger => "UNPREPARE_TRIGGER",
            ObjectRequestKind::ExecuteTrigger => "EXECUTE_TRIGGER",
            ObjectRequestKind::StopTrigger => "STOP_TRIGGER",
            ObjectRequestKind::StopAllTriggers => "STOP_ALL_TRIGGERS",
            ObjectRequestKind::SetPosition => "SET_POSITION",
            ObjectRequestKind::SetRtpcValue => "SET_RTPC_VALUE",
            ObjectRequestKind::SetSwitchState => "SET_SWITCH_STATE",
            ObjectRequestKind::SetVolume => "SET_VOLUME",
            ObjectRequestKind::SetEnvironmentAmount => "SET_ENVIRONMENT_AMOUNT",
            ObjectRequestKind::ResetEnvironments => "RESET_ENVIRONMENTS",
            ObjectRequestKind::ResetRtpcs => "RESET_RTPCS",
            ObjectRequestKind::ReleaseObject => "RELEASE_OBJECT",
            ObjectRequestKind::ExecuteSourceTrigger => "EXECUTE_SOURCE_TRIGGER",
            ObjectRequestKind::SetMultiPositions => "SET_MULTI_POSITIONS",
        },
        RequestKind::Listener(kind) => match kind {
            ListenerRequestKind::SetPosition => "SET_POSITION",
        },
    }
}

/// Names of the set flags, or `NONE`.
#[must_use]
pub fn flag_names(flags: RequestFlags) -> String {
    if flags.is_empty() {
        return "NONE".to_string();
    }
    flags.iter_names().map(|(name, _)| name).collect::<Vec<_>>().join("|")
}

/// One-line summary: category, kind and flags.
#[must_use]
pub fn describe(envelope: &RequestEnvelope) -> String {
    let kind = envelope.kind().map_or("NONE", kind_name);
    format!(
        "{}::{} flags={} target={}",
        category_name(envelope.category()),
        kind,
        flag_names(envelope.flags()),
        envelope.target_object_id(),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::ids::{ControlId, Handle, ObjectId};
    use crate::request::ObjectRequest;

    #[test]
    fn test_kind_names_are_unique_within_category() {
        let mut seen = HashSet::new();
        for kind in RequestKind::all() {
            assert!(seen.insert((kind.category(), kind_name(kind))), "{kind:?}");
        }
    }

    #[test]
    fn test_flag_names() {
        assert_eq!(flag_names(RequestFlags::empty()), "NONE");
        assert_eq!(
            flag_names(RequestFlags::PRIORITY_HIGH | RequestFlags::EXECUTE_BLOCKING),
            "PRIORITY_HIGH|EXECUTE_BLOCKING"
        );
    }

    #[test]
    fn test_describe() {
        let envelope = RequestEnvelope::new(
            RequestFlags::PRIORITY_NORMAL,
            ObjectId::new(3),
            Handle::NONE,
            Handle::NONE,
            Handle::NONE,
            ObjectRequest::execute_trigger(ControlId::new(1)).into(),
        );
        assert_eq!(describe(&envelope), "Object::EXECUTE_TRIGGER flags=PRIORITY_NORMAL target=3");
        assert_eq!(describe(&RequestEnvelope::empty()), "None::NONE flags=NONE target=0");
    }
}
