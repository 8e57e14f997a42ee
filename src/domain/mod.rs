//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Typed records for the resource (serde, camelCase wire names)
//! - `client.rs`: Sub-client with the HTTP operations for that resource

pub mod common;
pub mod save_link;
pub mod transit_class;
pub mod transit_object;

use crate::shared::ResourceId;
use serde::de::DeserializeOwned;
use serde::Serialize;

// ─── PassKind ────────────────────────────────────────────────────────────────

/// The pass verticals the API knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PassKind {
    EventTicket,
    Flight,
    Generic,
    GiftCard,
    Loyalty,
    Offer,
    Transit,
}

impl PassKind {
    pub const ALL: [PassKind; 7] = [
        PassKind::EventTicket,
        PassKind::Flight,
        PassKind::Generic,
        PassKind::GiftCard,
        PassKind::Loyalty,
        PassKind::Offer,
        PassKind::Transit,
    ];

    /// Camel-case stem used in collection paths and payload keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            PassKind::EventTicket => "eventTicket",
            PassKind::Flight => "flight",
            PassKind::Generic => "generic",
            PassKind::GiftCard => "giftCard",
            PassKind::Loyalty => "loyalty",
            PassKind::Offer => "offer",
            PassKind::Transit => "transit",
        }
    }

    /// REST collection of class resources, e.g. `transitClass`.
    pub fn class_collection(&self) -> String {
        format!("{}Class", self.as_str())
    }

    /// REST collection of object resources, e.g. `transitObject`.
    pub fn object_collection(&self) -> String {
        format!("{}Object", self.as_str())
    }

    /// Save-link payload key for classes, e.g. `transitClasses`.
    pub fn classes_key(&self) -> String {
        format!("{}Classes", self.as_str())
    }

    /// Save-link payload key for objects, e.g. `transitObjects`.
    pub fn objects_key(&self) -> String {
        format!("{}Objects", self.as_str())
    }
}

impl std::fmt::Display for PassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── WalletResource ──────────────────────────────────────────────────────────

/// Whether a resource is a class (template) or an object (issued pass).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceLevel {
    Class,
    Object,
}

/// A record stored in one of the API's resource collections.
pub trait WalletResource: Serialize + DeserializeOwned + Clone + Send + Sync {
    const KIND: PassKind;
    const LEVEL: ResourceLevel;

    fn resource_id(&self) -> &ResourceId;

    /// Collection path segment, e.g. `transitObject`.
    fn collection() -> String {
        match Self::LEVEL {
            ResourceLevel::Class => Self::KIND.class_collection(),
            ResourceLevel::Object => Self::KIND.object_collection(),
        }
    }
}

// ─── CreateOutcome ───────────────────────────────────────────────────────────

/// Result of a get-or-create.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome<T> {
    /// The resource did not exist and was inserted.
    Created(T),
    /// A resource with the same ID already existed; nothing was sent.
    Existing(T),
}

impl<T: WalletResource> CreateOutcome<T> {
    pub fn id(&self) -> &ResourceId {
        self.resource().resource_id()
    }

    pub fn resource(&self) -> &T {
        match self {
            CreateOutcome::Created(r) | CreateOutcome::Existing(r) => r,
        }
    }

    pub fn into_resource(self) -> T {
        match self {
            CreateOutcome::Created(r) | CreateOutcome::Existing(r) => r,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_and_payload_names() {
        assert_eq!(PassKind::Transit.class_collection(), "transitClass");
        assert_eq!(PassKind::Transit.object_collection(), "transitObject");
        assert_eq!(PassKind::GiftCard.objects_key(), "giftCardObjects");
        assert_eq!(PassKind::EventTicket.classes_key(), "eventTicketClasses");
    }
}
