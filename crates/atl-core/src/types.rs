//! Value types carried inside request payloads.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::ids::{FileId, ObjectId, SourceId};

/// Which part of the loaded audio data a request applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataScope {
    #[default]
    None,
    /// Data that stays loaded for the whole session
    Global,
    /// Data owned by the currently loaded level
    LevelSpecific,
    /// Everything
    All,
}

/// How lip-sync animation follows a triggered sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LipSyncMethod {
    #[default]
    None,
    Default,
    MatchAnimationToSoundName,
}

/// Output panning mode of the audio implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanningMode {
    #[default]
    Speakers,
    Headphones,
}

/// Position and orientation of an object or listener in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub position: [f32; 3],
    pub forward: [f32; 3],
    pub up: [f32; 3],
}

impl WorldPosition {
    /// A position at `position` with the default orientation.
    #[must_use]
    pub fn at(position: [f32; 3]) -> Self {
        Self { position, ..Self::default() }
    }
}

impl Default for WorldPosition {
    fn default() -> Self {
        Self { position: [0.0; 3], forward: [0.0, 1.0, 0.0], up: [0.0, 0.0, 1.0] }
    }
}

/// How an object with several emitter positions is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiPositionBehavior {
    /// Every position is an independent emitter
    #[default]
    Separate,
    /// Positions are blended into one emitter
    Blended,
}

/// Emitter positions for a multi-position object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiPositionParams {
    pub positions: Vec<[f32; 3]>,
    #[serde(default)]
    pub behavior: MultiPositionBehavior,
}

/// Kind of input an audio source reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioInputSourceType {
    #[default]
    Unsupported,
    PcmFile,
    WavFile,
    OggFile,
    OpusFile,
    Microphone,
    ExternalStream,
    Synthesis,
}

/// Sample encoding of an audio source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioInputSampleType {
    #[default]
    Unknown,
    Int16,
    Int24,
    Int32,
    Float32,
}

/// Configuration for creating an audio input source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioInputConfig {
    #[serde(default)]
    pub source_id: SourceId,
    pub sample_rate: u32,
    pub num_channels: u32,
    pub bits_per_sample: u32,
    #[serde(default)]
    pub source_type: AudioInputSourceType,
    #[serde(default)]
    pub sample_type: AudioInputSampleType,
    #[serde(default)]
    pub source_file_name: String,
    #[serde(default)]
    pub auto_unload_file: bool,
}

/// Codec of an externally supplied source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecType {
    #[default]
    Invalid,
    Pcm,
    Adpcm,
    Vorbis,
    Opus,
}

/// Source bound to a trigger by `ExecuteSourceTrigger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceInfo {
    pub source_id: SourceId,
    #[serde(default)]
    pub file_id: FileId,
    #[serde(default)]
    pub language_id: u64,
    #[serde(default)]
    pub codec: CodecType,
}

/// Result of starting or running an audio event, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    #[default]
    None,
    Success,
    Failed,
    StillLoading,
}

impl From<bool> for EventOutcome {
    fn from(success: bool) -> Self {
        if success { Self::Success } else { Self::Failed }
    }
}

/// Caller-owned output slot filled in when an object id is reserved.
///
/// Clones share storage: the backend writes through its clone and the caller
/// observes the value through the original.
#[derive(Debug, Clone, Default)]
pub struct ObjectIdSlot(Arc<AtomicU64>);

impl ObjectIdSlot {
    /// Create an empty slot holding `ObjectId::INVALID`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the current value.
    #[must_use]
    pub fn get(&self) -> ObjectId {
        ObjectId::new(self.0.load(Ordering::Acquire))
    }

    /// Store a reserved id.
    pub fn set(&self, id: ObjectId) {
        self.0.store(id.raw(), Ordering::Release);
    }

    /// Whether both handles point at the same storage.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectIdSlot {
    fn eq(&self, other: &Self) -> bool {
        self.same_slot(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_clone_shares_storage() {
        let slot = ObjectIdSlot::new();
        let backend_side = slot.clone();

        assert_eq!(slot.get(), ObjectId::INVALID);
        backend_side.set(ObjectId::new(12));
        assert_eq!(slot.get(), ObjectId::new(12));
        assert!(slot.same_slot(&backend_side));
    }

    #[test]
    fn test_distinct_slots_are_not_equal() {
        assert_ne!(ObjectIdSlot::new(), ObjectIdSlot::new());
    }

    #[test]
    fn test_slot_written_from_other_thread() {
        let slot = ObjectIdSlot::new();
        let writer = slot.clone();
        std::thread::spawn(move || writer.set(ObjectId::new(99)))
            .join()
            .unwrap();
        assert_eq!(slot.get().raw(), 99);
    }

    #[test]
    fn test_event_outcome_from_finished_flag() {
        assert_eq!(EventOutcome::from(true), EventOutcome::Success);
        assert_eq!(EventOutcome::from(false), EventOutcome::Failed);
        assert_eq!(EventOutcome::default(), EventOutcome::None);
    }

    #[test]
    fn test_world_position_at_keeps_orientation() {
        let pos = WorldPosition::at([1.0, 2.0, 3.0]);
        assert_eq!(pos.position, [1.0, 2.0, 3.0]);
        assert_eq!(pos.up, WorldPosition::default().up);
    }
}
