//! Redacting wrapper for credentials.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Placeholder printed wherever a secret would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

/// A password or token that never appears in `Debug`, `Display` or serialized output.
///
/// The inner value is zeroed on drop. Call [`Secret::expose`] to read it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret {
    inner: String,
}

impl Secret {
    /// Wraps a sensitive string.
    #[must_use]
    pub fn new(inner: impl Into<String>) -> Self {
        Self { inner: inner.into() }
    }

    /// Returns the wrapped value. Call sites opt in to seeing it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Returns `true` when no value is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&REDACTED).finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_are_redacted() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "Secret(\"[REDACTED]\")");
        assert_eq!(secret.to_string(), REDACTED);
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn serializes_redacted_and_deserializes_plain() {
        let secret: Secret = serde_yaml::from_str("hunter2").unwrap();
        assert_eq!(secret.expose(), "hunter2");
        let yaml = serde_yaml::to_string(&secret).unwrap();
        assert!(!yaml.contains("hunter2"));
        assert!(yaml.contains(REDACTED));
    }
}
