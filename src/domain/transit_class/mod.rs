//! Transit class domain: the template shared by transit pass objects.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::common::{Image, Message, ReviewStatus, Uri};
use crate::domain::{PassKind, ResourceLevel, WalletResource};
use crate::shared::ResourceId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of transit the class describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitType {
    #[serde(alias = "transitTypeUnspecified")]
    TransitTypeUnspecified,
    #[serde(alias = "bus")]
    Bus,
    #[serde(alias = "rail")]
    Rail,
    #[serde(alias = "tram")]
    Tram,
    #[serde(alias = "ferry")]
    Ferry,
    #[serde(alias = "other")]
    Other,
    /// A type this SDK does not list, kept verbatim.
    #[serde(untagged)]
    Unlisted(String),
}

/// A transit pass class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitClass {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<ReviewStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_type: Option<TransitType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_uri: Option<Uri>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    /// Fields this SDK does not model, kept for full-replace updates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransitClass {
    /// A minimal class under review.
    pub fn new(id: ResourceId, issuer_name: impl Into<String>, transit_type: TransitType) -> Self {
        Self {
            id,
            issuer_name: Some(issuer_name.into()),
            review_status: Some(ReviewStatus::UnderReview),
            logo: None,
            transit_type: Some(transit_type),
            homepage_uri: None,
            messages: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_logo(mut self, logo: Image) -> Self {
        self.logo = Some(logo);
        self
    }

    /// The sample bus class used by the demo flows.
    pub fn sample(id: ResourceId) -> Self {
        TransitClass::new(id, "Issuer name", TransitType::Bus).with_logo(Image::new(
            "https://live.staticflickr.com/65535/48690277162_cd05f03f4d_o.png",
            "Logo description",
        ))
    }
}

impl WalletResource for TransitClass {
    const KIND: PassKind = PassKind::Transit;
    const LEVEL: ResourceLevel = ResourceLevel::Class;

    fn resource_id(&self) -> &ResourceId {
        &self.id
    }
}

/// Partial body for `PATCH transitClass/{id}`. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitClassPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<ReviewStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_uri: Option<Uri>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_class_wire_shape() {
        let class = TransitClass::sample(ResourceId::new("3388000000022125581", "bus"));
        let json = serde_json::to_value(&class).unwrap();
        assert_eq!(json["id"], "3388000000022125581.bus");
        assert_eq!(json["issuerName"], "Issuer name");
        assert_eq!(json["reviewStatus"], "UNDER_REVIEW");
        assert_eq!(json["transitType"], "BUS");
        assert!(json.get("homepageUri").is_none());
        assert!(json.get("messages").is_none());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let json = r#"{
            "id": "1.bus",
            "issuerName": "Issuer name",
            "reviewStatus": "APPROVED",
            "transitType": "BUS",
            "version": "3",
            "countryCode": "US"
        }"#;
        let class: TransitClass = serde_json::from_str(json).unwrap();
        assert_eq!(class.review_status, Some(ReviewStatus::Approved));
        let back = serde_json::to_value(&class).unwrap();
        assert_eq!(back["version"], "3");
        assert_eq!(back["countryCode"], "US");
    }

    #[test]
    fn test_patch_only_sends_set_fields() {
        let patch = TransitClassPatch {
            homepage_uri: Some(Uri::new("https://developers.google.com/wallet", "Homepage description")),
            review_status: Some(ReviewStatus::UnderReview),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 2);
        assert_eq!(json["reviewStatus"], "UNDER_REVIEW");
    }

    #[test]
    fn test_unlisted_enum_values_survive_round_trip() {
        let json = serde_json::json!({
            "id": "1.bus",
            "reviewStatus": "PENDING_APPEAL",
            "transitType": "CABLE_CAR"
        });
        let class: TransitClass = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(class.transit_type, Some(TransitType::Unlisted("CABLE_CAR".to_string())));
        assert_eq!(serde_json::to_value(&class).unwrap(), json);
    }
}
