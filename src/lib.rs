//! # Wallet Pass SDK
//!
//! A Rust SDK for issuing wallet passes: transit classes and objects over the
//! wallet objects REST API, batched inserts, and signed save-to-wallet links.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: IDs, pass records, save-link claims and signing, credentials (always available, offline)
//! 2. **HTTP API**: `WalletHttp` with batch framing and OAuth token exchange
//! 3. **High-Level Client**: `WalletClient` with nested sub-clients and existence-checked operations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wallet_pass_sdk::prelude::*;
//!
//! let client = WalletClient::builder()
//!     .service_account(ServiceAccountKey::from_env()?)
//!     .origins(vec!["www.example.com".into()])
//!     .build()?;
//!
//! let class_id = ResourceId::new("3388000000022125581", "bus");
//! client.classes().create(TransitClass::sample(class_id.clone())).await?;
//! let object = TransitObject::sample(ResourceId::random("3388000000022125581"), class_id);
//! let url = client.links().new_objects(&client.classes().get(&object.class_id).await?, &object)?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): pass records, save links.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Environment-driven configuration.
pub mod config;

/// Service-account credentials and access tokens.
pub mod auth;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with batch support.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `WalletClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::ResourceId;

    // Domain types
    pub use crate::domain::common::{
        Barcode, BarcodeType, Image, LinksModuleData, LocalizedString, Message, ReviewStatus,
        TextModuleData, Uri,
    };
    pub use crate::domain::save_link::{
        save_url, verify_save_token, ObjectReference, SaveClaims, SaveLinkIssuer, SavePayload,
    };
    pub use crate::domain::transit_class::{TransitClass, TransitClassPatch, TransitType};
    pub use crate::domain::transit_object::{
        ObjectState, PassengerType, TicketLeg, TransitObject, TransitObjectPatch, TripType,
    };
    pub use crate::domain::{CreateOutcome, PassKind, WalletResource};

    // Errors
    pub use crate::error::{ApiErrorBody, AuthError, HttpError, SdkError};

    // Network + config
    pub use crate::config::WalletConfig;
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_BATCH_URL, SAVE_URL_PREFIX};

    // Credentials
    pub use crate::auth::ServiceAccountKey;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        ClassesClient, LinksClient, ObjectsClient, WalletClient, WalletClientBuilder,
    };
    #[cfg(feature = "http")]
    pub use crate::http::batch::BatchItemResult;
}
