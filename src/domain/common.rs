//! Nested records shared by classes and objects.
//!
//! All fields are optional on the wire. Every record keeps the fields it does
//! not model in `extra`, and every enum keeps values it does not list in
//! `Unlisted`, so a fetched resource serializes back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A string in one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedString {
    pub language: String,
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TranslatedString {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }
}

/// A localizable string with a default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedString {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<TranslatedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translated_values: Vec<TranslatedString>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocalizedString {
    /// A string with only a default value.
    pub fn new(language: &str, value: &str) -> Self {
        Self {
            default_value: Some(TranslatedString::new(language, value)),
            ..Default::default()
        }
    }

    /// Shorthand for an `en-US` default value.
    pub fn en_us(value: &str) -> Self {
        Self::new("en-US", value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUri {
    pub uri: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image reference with accessibility text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub source_uri: ImageUri,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_description: Option<LocalizedString>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Image {
    pub fn new(uri: impl Into<String>, description: &str) -> Self {
        Self {
            source_uri: ImageUri {
                uri: uri.into(),
                extra: Map::new(),
            },
            content_description: Some(LocalizedString::en_us(description)),
            extra: Map::new(),
        }
    }
}

/// A link shown on the pass (web, `tel:`, `mailto:`, …).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Uri {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Uri {
    pub fn new(uri: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Links module of a pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinksModuleData {
    #[serde(default)]
    pub uris: Vec<Uri>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LinksModuleData {
    /// Append `uri` to `existing`, starting from an empty module only when
    /// there is none yet.
    pub fn appended(existing: Option<LinksModuleData>, uri: Uri) -> LinksModuleData {
        let mut links = existing.unwrap_or_default();
        links.uris.push(uri);
        links
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextModuleData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageModuleData {
    pub main_image: Image,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarcodeType {
    #[default]
    #[serde(alias = "barcodeTypeUnspecified")]
    BarcodeTypeUnspecified,
    #[serde(alias = "aztec")]
    Aztec,
    #[serde(alias = "code39")]
    Code39,
    #[serde(alias = "code128")]
    Code128,
    #[serde(alias = "codabar")]
    Codabar,
    #[serde(alias = "dataMatrix")]
    DataMatrix,
    #[serde(rename = "EAN_8", alias = "ean8")]
    Ean8,
    #[serde(rename = "EAN_13", alias = "ean13")]
    Ean13,
    #[serde(rename = "ITF_14", alias = "itf14")]
    Itf14,
    #[serde(alias = "pdf417")]
    Pdf417,
    #[serde(alias = "qrCode")]
    QrCode,
    #[serde(rename = "UPC_A", alias = "upcA")]
    UpcA,
    #[serde(alias = "textOnly")]
    TextOnly,
    /// A type this SDK does not list, kept verbatim.
    #[serde(untagged)]
    Unlisted(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    #[serde(rename = "type")]
    pub barcode_type: BarcodeType,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLongPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A message attached to a class or object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub header: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
            ..Default::default()
        }
    }
}

/// Request body of the `addMessage` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMessageRequest {
    pub message: Message,
}

/// Response of the `addMessage` action: the updated resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMessageResponse<T> {
    pub resource: T,
}

/// Review status of a class. Updates and patches require `UnderReview` or `Draft`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    #[serde(alias = "reviewStatusUnspecified")]
    ReviewStatusUnspecified,
    #[serde(alias = "underReview")]
    UnderReview,
    #[serde(alias = "approved")]
    Approved,
    #[serde(alias = "rejected")]
    Rejected,
    #[serde(alias = "draft")]
    Draft,
    #[serde(untagged)]
    Unlisted(String),
}
