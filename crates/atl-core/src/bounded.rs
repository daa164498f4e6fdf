//! Fixed-capacity strings for names and paths carried in request payloads.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum length of an audio object name, in bytes.
pub const MAX_OBJECT_NAME_LENGTH: usize = 256;
/// Maximum length of a file path, in bytes.
pub const MAX_FILE_PATH_LENGTH: usize = 256;
/// Maximum length of a file or level name, in bytes.
pub const MAX_FILE_NAME_LENGTH: usize = 128;

/// A string holding at most `N` bytes of UTF-8.
///
/// Longer input is cut to the longest prefix that fits and ends on a char
/// boundary, so the stored value is always a prefix of what was supplied.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BoundedString<const N: usize> {
    value: String,
    truncated: bool,
}

/// Object name (diagnostics only).
pub type ObjectName = BoundedString<MAX_OBJECT_NAME_LENGTH>;
/// Controls or preloads folder path.
pub type FilePath = BoundedString<MAX_FILE_PATH_LENGTH>;
/// Level or file name.
pub type FileName = BoundedString<MAX_FILE_NAME_LENGTH>;

impl<const N: usize> BoundedString<N> {
    /// Capacity in bytes.
    pub const CAPACITY: usize = N;

    /// Create a bounded string, truncating if needed.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let mut value = value.into();
        let truncated = value.len() > N;
        if truncated {
            let mut end = N;
            while !value.is_char_boundary(end) {
                end -= 1;
            }
            value.truncate(end);
        }
        Self { value, truncated }
    }

    /// Borrow the stored value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether the input did not fit and was cut.
    #[must_use]
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

impl<const N: usize> Deref for BoundedString<N> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.value
    }
}

impl<const N: usize> From<&str> for BoundedString<N> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> From<String> for BoundedString<N> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<const N: usize> fmt::Debug for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl<const N: usize> Serialize for BoundedString<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, const N: usize> Deserialize<'de> for BoundedString<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_string_is_kept() {
        let name = FileName::new("level_forest");
        assert_eq!(name.as_str(), "level_forest");
        assert!(!name.was_truncated());
    }

    #[test]
    fn test_exact_capacity_is_kept() {
        let s = "a".repeat(8);
        let bounded = BoundedString::<8>::new(s.clone());
        assert_eq!(bounded.as_str(), s);
        assert!(!bounded.was_truncated());
    }

    #[test]
    fn test_long_string_is_truncated() {
        let bounded = BoundedString::<4>::new("abcdefgh");
        assert_eq!(&*bounded, "abcd");
        assert!(bounded.was_truncated());
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        // 'é' is two bytes, so the cut at byte 3 must step back to 2.
        let bounded = BoundedString::<3>::new("aéé");
        assert_eq!(bounded.as_str(), "aé");
        assert!(bounded.was_truncated());
    }

    #[test]
    fn test_deserialize_truncates() {
        let bounded: BoundedString<2> = serde_json::from_str("\"xyz\"").unwrap();
        assert_eq!(bounded.as_str(), "xy");
    }

    proptest! {
        #[test]
        fn test_truncation_is_bounded_prefix(input in ".{0,64}") {
            let bounded = BoundedString::<16>::new(input.clone());
            prop_assert!(bounded.len() <= 16);
            prop_assert!(input.starts_with(bounded.as_str()));
            prop_assert_eq!(bounded.was_truncated(), input.len() > 16);
        }

        #[test]
        fn test_truncation_is_deterministic(input in ".{17,80}") {
            let first = BoundedString::<16>::new(input.clone());
            let second = BoundedString::<16>::new(input);
            prop_assert_eq!(first, second);
        }
    }
}
