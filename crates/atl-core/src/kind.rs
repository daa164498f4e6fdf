//! Request categories and the closed set of request kinds within each.
//!
//! Every kind owns one bit of a 32-bit mask so event listeners can subscribe
//! to any subset of kinds within a category.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{Error, Result};

/// Top-level request group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestCategory {
    /// Empty envelope, nothing to do
    #[default]
    None,
    Manager,
    CallbackManager,
    Object,
    Listener,
}

impl RequestCategory {
    /// Stable raw tag value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Manager => 1,
            Self::CallbackManager => 2,
            Self::Object => 3,
            Self::Listener => 4,
        }
    }

    /// Decode a raw tag value.
    ///
    /// # Errors
    /// Returns `Error::UnknownCategory` for values outside `0..=4`.
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::Manager),
            2 => Ok(Self::CallbackManager),
            3 => Ok(Self::Object),
            4 => Ok(Self::Listener),
            other => Err(Error::UnknownCategory(other)),
        }
    }
}

/// Defines a kind enum whose discriminants are single bits, along with the
/// full variant list and bit decoding.
macro_rules! request_kinds {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $bit:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every kind in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Mask with every kind bit set.
            pub const MASK: u32 = $(1 << $bit)|+;

            /// The bit identifying this kind.
            #[must_use]
            pub const fn bit(self) -> u32 {
                match self {
                    $(Self::$variant => 1 << $bit,)+
                }
            }

            /// Decode a single kind bit.
            #[must_use]
            pub fn from_bit(bit: u32) -> Option<Self> {
                match bit {
                    $(b if b == 1 << $bit => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

request_kinds!(
    /// Requests handled by the audio system itself.
    ManagerRequestKind {
        InitImplementation = 0,
        ReleaseImplementation = 1,
        ReserveObjectId = 2,
        CreateSource = 3,
        DestroySource = 4,
        ParseControlsData = 5,
        ParsePreloadsData = 6,
        ClearControlsData = 7,
        ClearPreloadsData = 8,
        PreloadSingleRequest = 9,
        UnloadSingleRequest = 10,
        UnloadDataByScope = 11,
        RefreshAudioSystem = 12,
        ChangeLanguage = 13,
        LoseFocus = 14,
        GetFocus = 15,
        MuteAll = 16,
        UnmuteAll = 17,
        StopAllSounds = 18,
        DrawDebugInfo = 19,
        SetAudioPanningMode = 20,
    }
);

request_kinds!(
    /// Notifications reported back from the audio implementation.
    CallbackManagerRequestKind {
        ReportStartedEvent = 0,
        ReportFinishedEvent = 1,
        ReportFinishedTriggerInstance = 2,
        ReportProcessedObstructionRay = 3,
    }
);

request_kinds!(
    /// Requests addressed to one audio object.
    ObjectRequestKind {
        PrepareTrigger = 0,
        UnprepareTrigger = 1,
        ExecuteTrigger = 2,
        StopTrigger = 3,
        StopAllTriggers = 4,
        SetPosition = 5,
        SetRtpcValue = 6,
        SetSwitchState = 7,
        SetVolume = 8,
        SetEnvironmentAmount = 9,
        ResetEnvironments = 10,
        ResetRtpcs = 11,
        ReleaseObject = 12,
        ExecuteSourceTrigger = 13,
        SetMultiPositions = 14,
    }
);

request_kinds!(
    /// Requests addressed to a listener.
    ListenerRequestKind {
        SetPosition = 0,
    }
);

/// A request kind tagged with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "category", content = "kind")]
pub enum RequestKind {
    Manager(ManagerRequestKind),
    CallbackManager(CallbackManagerRequestKind),
    Object(ObjectRequestKind),
    Listener(ListenerRequestKind),
}

impl RequestKind {
    /// The category this kind belongs to.
    #[must_use]
    pub const fn category(self) -> RequestCategory {
        match self {
            Self::Manager(_) => RequestCategory::Manager,
            Self::CallbackManager(_) => RequestCategory::CallbackManager,
            Self::Object(_) => RequestCategory::Object,
            Self::Listener(_) => RequestCategory::Listener,
        }
    }

    /// The kind bit within its category.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::Manager(kind) => kind.bit(),
            Self::CallbackManager(kind) => kind.bit(),
            Self::Object(kind) => kind.bit(),
            Self::Listener(kind) => kind.bit(),
        }
    }

    /// Every known `(category, kind)` pair.
    pub fn all() -> impl Iterator<Item = Self> {
        let manager = ManagerRequestKind::ALL.iter().copied().map(Self::Manager);
        let callback = CallbackManagerRequestKind::ALL.iter().copied().map(Self::CallbackManager);
        let object = ObjectRequestKind::ALL.iter().copied().map(Self::Object);
        let listener = ListenerRequestKind::ALL.iter().copied().map(Self::Listener);
        manager.chain(callback).chain(object).chain(listener)
    }

    /// Decode a raw `(category, kind bit)` tag pair.
    ///
    /// Only pairs from the closed catalog decode; anything else is a contract
    /// violation by whoever produced the tag.
    ///
    /// # Errors
    /// Returns `Error::UnknownCategory`, `Error::EmptyCategory` or
    /// `Error::UnknownKind` when the pair is not in the catalog.
    pub fn from_raw(category: u32, kind: u32) -> Result<Self> {
        let decoded = match RequestCategory::from_raw(category)? {
            RequestCategory::None => return Err(Error::EmptyCategory),
            RequestCategory::Manager => ManagerRequestKind::from_bit(kind).map(Self::Manager),
            RequestCategory::CallbackManager => {
                CallbackManagerRequestKind::from_bit(kind).map(Self::CallbackManager)
            }
            RequestCategory::Object => ObjectRequestKind::from_bit(kind).map(Self::Object),
            RequestCategory::Listener => ListenerRequestKind::from_bit(kind).map(Self::Listener),
        };
        decoded.ok_or(Error::UnknownKind { category, kind })
    }
}

/// Decode a raw tag pair, logging contract violations.
///
/// Callers treat `None` as "build an empty envelope".
#[must_use]
pub fn decode_raw_tag(category: u32, kind: u32) -> Option<RequestKind> {
    match RequestKind::from_raw(category, kind) {
        Ok(kind) => Some(kind),
        Err(e) => {
            error!(category, kind, error = %e, "Rejected request tag outside the catalog");
            None
        }
    }
}

/// Which request categories a listener wants to hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestTypeFilter {
    #[default]
    All,
    Category(RequestCategory),
}

impl RequestTypeFilter {
    /// Whether requests of `category` pass this filter.
    #[must_use]
    pub fn accepts(self, category: RequestCategory) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => wanted == category,
        }
    }
}
