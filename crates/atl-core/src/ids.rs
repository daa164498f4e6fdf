//! Strongly typed audio identifiers.
//!
//! Every id family is its own newtype so a trigger id can never be passed
//! where an object id is expected. Raw value `0` is the invalid sentinel for
//! all of them, and `Default` yields that sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! audio_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Sentinel meaning "no id".
            pub const INVALID: Self = Self(0);

            /// Wrap a raw id value.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw id value.
            #[must_use]
            pub const fn raw(self) -> u64 {
                self.0
            }

            /// Whether this id is anything other than the invalid sentinel.
            #[must_use]
            pub const fn is_valid(self) -> bool {
                self.0 != Self::INVALID.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

audio_id!(
    /// Audio object id.
    ObjectId
);
audio_id!(
    /// Trigger, RTPC or switch id.
    ControlId
);
audio_id!(
    /// State id within a switch.
    SwitchStateId
);
audio_id!(
    /// Environment (e.g. reverb bus) id.
    EnvironmentId
);
audio_id!(
    /// Preload request id.
    PreloadRequestId
);
audio_id!(
    /// Id of a running audio event.
    EventId
);
audio_id!(
    /// Audio input source id.
    SourceId
);
audio_id!(
    /// External file id for source triggers.
    FileId
);

impl ObjectId {
    /// The global audio object, which exists for the lifetime of the system.
    pub const GLOBAL: Self = Self(1);
}

/// Opaque caller token (owner, user data, user data owner).
///
/// The audio system only stores and compares these; it never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(pub u64);

impl Handle {
    /// No handle.
    pub const NONE: Self = Self(0);

    /// Whether this is the empty handle.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_invalid() {
        assert_eq!(ObjectId::default(), ObjectId::INVALID);
        assert_eq!(PreloadRequestId::default(), PreloadRequestId::INVALID);
        assert!(!ControlId::default().is_valid());
    }

    #[test]
    fn test_global_object_is_valid() {
        assert!(ObjectId::GLOBAL.is_valid());
        assert_ne!(ObjectId::GLOBAL, ObjectId::INVALID);
    }

    #[test]
    fn test_ids_serialize_as_integers() {
        let json = serde_json::to_string(&ControlId::new(42)).unwrap();
        assert_eq!(json, "42");

        let id: EventId = serde_json::from_str("7").unwrap();
        assert_eq!(id.raw(), 7);
    }

    #[test]
    fn test_handle_none() {
        assert!(Handle::NONE.is_none());
        assert!(!Handle(3).is_none());
    }
}
