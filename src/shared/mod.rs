//! Shared newtypes used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the API sends, so they can be used directly in wire types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── ResourceId ──────────────────────────────────────────────────────────────

/// Composite identifier of a class or object: `{issuer_id}.{suffix}`.
///
/// The issuer ID is numeric and never contains a `.`, so the first dot always
/// separates the two halves. The suffix may contain further dots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Join an issuer ID and a caller-supplied suffix.
    pub fn new(issuer_id: &str, suffix: &str) -> Self {
        Self(format!("{}.{}", issuer_id, suffix))
    }

    /// A fresh ID with a random UUIDv4 suffix.
    pub fn random(issuer_id: &str) -> Self {
        let suffix = sanitize_suffix(&uuid::Uuid::new_v4().to_string());
        Self::new(issuer_id, &suffix)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The issuer half of the ID.
    pub fn issuer_id(&self) -> &str {
        self.0.split_once('.').map(|(issuer, _)| issuer).unwrap_or(&self.0)
    }

    /// The caller-supplied half of the ID.
    pub fn suffix(&self) -> &str {
        self.0.split_once('.').map(|(_, suffix)| suffix).unwrap_or("")
    }
}

/// Format a composite ID without allocating a [`ResourceId`].
pub fn format_id(issuer_id: &str, suffix: &str) -> String {
    format!("{}.{}", issuer_id, suffix)
}

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_suffix(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for ResourceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ResourceId(s.to_string()))
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ResourceId(s))
    }
}
