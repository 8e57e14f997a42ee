//! Save-to-wallet links: claims payload, signing, verification.
//!
//! A link embeds an RS256-signed JWT whose claims either define new classes
//! and objects (created when the user saves the pass) or reference objects
//! that already exist. Issuing a link never touches the network.

#[cfg(feature = "http")]
pub mod client;
mod issuer;

pub use issuer::{save_url, verify_save_token, SaveLinkIssuer};

use crate::domain::{PassKind, ResourceLevel, WalletResource};
use crate::shared::ResourceId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fixed audience of save-to-wallet tokens.
pub const SAVE_AUDIENCE: &str = "google";

/// Fixed token type of save-to-wallet tokens.
pub const SAVE_TYPE: &str = "savetowallet";

// ─── ObjectReference ─────────────────────────────────────────────────────────

/// Reference to an object that already exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<ResourceId>,
}

impl ObjectReference {
    pub fn new(id: ResourceId) -> Self {
        Self { id, class_id: None }
    }

    pub fn with_class(id: ResourceId, class_id: ResourceId) -> Self {
        Self {
            id,
            class_id: Some(class_id),
        }
    }
}

// ─── SavePayload ─────────────────────────────────────────────────────────────

/// The `payload` claim: plural resource names → resources or references.
///
/// Keys follow [`PassKind::classes_key`] / [`PassKind::objects_key`], e.g.
/// `transitClasses`, `transitObjects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavePayload(BTreeMap<String, Vec<Value>>);

impl SavePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a full resource definition under its kind's key.
    pub fn with_resource<R: WalletResource>(mut self, resource: &R) -> Result<Self, serde_json::Error> {
        let key = match R::LEVEL {
            ResourceLevel::Class => R::KIND.classes_key(),
            ResourceLevel::Object => R::KIND.objects_key(),
        };
        let value = serde_json::to_value(resource)?;
        self.0.entry(key).or_default().push(value);
        Ok(self)
    }

    /// Add a reference to an existing object of `kind`.
    pub fn with_reference(
        mut self,
        kind: PassKind,
        reference: ObjectReference,
    ) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(&reference)?;
        self.0.entry(kind.objects_key()).or_default().push(value);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Entries stored under `key`.
    pub fn entries(&self, key: &str) -> &[Value] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ─── SaveClaims ──────────────────────────────────────────────────────────────

/// Claims of a save-to-wallet token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveClaims {
    /// Service-account email.
    pub iss: String,
    pub aud: String,
    /// Domains allowed to render the save button.
    pub origins: Vec<String>,
    pub typ: String,
    pub payload: SavePayload,
}

impl SaveClaims {
    pub fn new(issuer: impl Into<String>, origins: Vec<String>, payload: SavePayload) -> Self {
        Self {
            iss: issuer.into(),
            aud: SAVE_AUDIENCE.to_string(),
            origins,
            typ: SAVE_TYPE.to_string(),
            payload,
        }
    }
}
