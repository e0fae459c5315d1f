//! Validated key types shared across the SPR workspace.
//!
//! Both catalogs and the media store agree on one normalized key form:
//! lowercase, with runs of whitespace collapsed to single underscores. These
//! newtypes make that normalization happen exactly once, at the boundary
//! where a raw string enters the system.

/// Errors that can occur when creating validated key types.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The input contained no usable characters after normalization
    #[error("key cannot be empty")]
    Empty,
}

fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Identifier for a condition (symptom/disease category).
///
/// Normalized form: lowercase words joined by `_`, e.g. `back_pain`. The
/// underscore-separated words are what the phrase matcher slides across the
/// token stream, so [`ConditionKey::words`] is part of the matching contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConditionKey(String);

impl ConditionKey {
    /// Creates a new `ConditionKey`, normalizing the input.
    ///
    /// Accepts either the already-normalized form (`back_pain`) or a display
    /// form with spaces (`Back Pain`); both produce the same key.
    pub fn new(input: impl AsRef<str>) -> Result<Self, KeyError> {
        let normalized = normalize(input.as_ref());
        if normalized.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self(normalized))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The constituent words of this identifier.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split('_')
    }

    /// Whether this identifier is made of two or more words.
    pub fn is_multi_word(&self) -> bool {
        self.0.contains('_')
    }
}

/// Identifier for a pose (physical exercise).
///
/// Derived from a pose's display name: lowercase, spaces replaced by `_`,
/// e.g. `Bridge Pose` → `bridge_pose`. The normalized key doubles as the
/// media subdirectory name for that pose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoseKey(String);

impl PoseKey {
    /// Creates a `PoseKey` from a display name or an already-normalized key.
    pub fn new(input: impl AsRef<str>) -> Result<Self, KeyError> {
        let normalized = normalize(input.as_ref());
        if normalized.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self(normalized))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_key_traits {
    ($ty:ident) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $ty::new(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_key_traits!(ConditionKey);
impl_key_traits!(PoseKey);
