//! Transit object domain: an issued transit pass.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::common::{
    Barcode, BarcodeType, Image, ImageModuleData, LatLongPoint, LinksModuleData,
    LocalizedString, Message, TextModuleData, Uri,
};
use crate::domain::{PassKind, ResourceLevel, WalletResource};
use crate::shared::ResourceId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Lifecycle state of a pass object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectState {
    #[serde(alias = "stateUnspecified")]
    StateUnspecified,
    #[serde(alias = "active")]
    Active,
    #[serde(alias = "completed")]
    Completed,
    #[serde(alias = "expired")]
    Expired,
    #[serde(alias = "inactive")]
    Inactive,
    /// A state this SDK does not list, kept verbatim.
    #[serde(untagged)]
    Unlisted(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassengerType {
    #[serde(alias = "passengerTypeUnspecified")]
    PassengerTypeUnspecified,
    #[serde(alias = "singlePassenger")]
    SinglePassenger,
    #[serde(alias = "multiplePassengers")]
    MultiplePassengers,
    #[serde(untagged)]
    Unlisted(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripType {
    #[serde(alias = "tripTypeUnspecified")]
    TripTypeUnspecified,
    #[serde(alias = "roundTrip")]
    RoundTrip,
    #[serde(alias = "oneWay")]
    OneWay,
    #[serde(untagged)]
    Unlisted(String),
}

// ─── TicketLeg ───────────────────────────────────────────────────────────────

/// One leg of the trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_station_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_name: Option<LocalizedString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_station_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<LocalizedString>,
    /// ISO 8601 local or offset date-time, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fare_name: Option<LocalizedString>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ─── TransitObject ───────────────────────────────────────────────────────────

/// A transit pass object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitObject {
    pub id: ResourceId,
    pub class_id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ObjectState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<Image>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_modules_data: Vec<TextModuleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links_module_data: Option<LinksModuleData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_modules_data: Vec<ImageModuleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<Barcode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<LatLongPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_type: Option<PassengerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_names: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_type: Option<TripType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_leg: Option<TicketLeg>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    /// Fields this SDK does not model, kept for full-replace updates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransitObject {
    /// A bare active object of `class_id`.
    pub fn new(id: ResourceId, class_id: ResourceId) -> Self {
        Self {
            id,
            class_id,
            state: Some(ObjectState::Active),
            hero_image: None,
            text_modules_data: Vec::new(),
            links_module_data: None,
            image_modules_data: Vec::new(),
            barcode: None,
            locations: Vec::new(),
            passenger_type: None,
            passenger_names: None,
            trip_type: None,
            ticket_leg: None,
            messages: Vec::new(),
            extra: Map::new(),
        }
    }

    /// The sample one-way bus ticket used by the demo flows.
    pub fn sample(id: ResourceId, class_id: ResourceId) -> Self {
        Self {
            hero_image: Some(Image::new(
                "https://farm4.staticflickr.com/3723/11177041115_6e6a3b6f49_o.jpg",
                "Hero image description",
            )),
            text_modules_data: vec![TextModuleData {
                header: Some("Text module header".to_string()),
                body: Some("Text module body".to_string()),
                id: Some("TEXT_MODULE_ID".to_string()),
                extra: Map::new(),
            }],
            links_module_data: Some(LinksModuleData {
                uris: vec![
                    Uri::new("http://maps.google.com/", "Link module URI description")
                        .with_id("LINK_MODULE_URI_ID"),
                    Uri::new("tel:6505555555", "Link module tel description")
                        .with_id("LINK_MODULE_TEL_ID"),
                ],
                extra: Map::new(),
            }),
            image_modules_data: vec![ImageModuleData {
                main_image: Image::new(
                    "http://farm4.staticflickr.com/3738/12440799783_3dc3c20606_b.jpg",
                    "Image module description",
                ),
                id: Some("IMAGE_MODULE_ID".to_string()),
                extra: Map::new(),
            }],
            barcode: Some(Barcode {
                barcode_type: BarcodeType::QrCode,
                value: "QR code".to_string(),
                alternate_text: None,
                extra: Map::new(),
            }),
            locations: vec![LatLongPoint {
                latitude: 37.424015499999996,
                longitude: -122.09259560000001,
                extra: Map::new(),
            }],
            passenger_type: Some(PassengerType::SinglePassenger),
            passenger_names: Some("Passenger names".to_string()),
            trip_type: Some(TripType::OneWay),
            ticket_leg: Some(TicketLeg {
                origin_station_code: Some("LA".to_string()),
                origin_name: Some(LocalizedString::en_us("Origin name")),
                destination_station_code: Some("SFO".to_string()),
                destination_name: Some(LocalizedString::en_us("Destination name")),
                departure_date_time: Some("2020-04-12T16:20:50.52Z".to_string()),
                arrival_date_time: Some("2020-04-12T20:20:50.52Z".to_string()),
                fare_name: Some(LocalizedString::en_us("Fare name")),
                extra: Map::new(),
            }),
            ..Self::new(id, class_id)
        }
    }
}

impl WalletResource for TransitObject {
    const KIND: PassKind = PassKind::Transit;
    const LEVEL: ResourceLevel = ResourceLevel::Object;

    fn resource_id(&self) -> &ResourceId {
        &self.id
    }
}

/// Partial body for `PATCH transitObject/{id}`. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitObjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ObjectState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links_module_data: Option<LinksModuleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<Barcode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_names: Option<String>,
}

impl TransitObjectPatch {
    /// `{"state": "EXPIRED"}`
    pub fn expire() -> Self {
        Self {
            state: Some(ObjectState::Expired),
            ..Default::default()
        }
    }

    /// The existing links of `object` plus `uri`.
    pub fn append_link(object: &TransitObject, uri: Uri) -> Self {
        Self {
            links_module_data: Some(LinksModuleData::appended(
                object.links_module_data.clone(),
                uri,
            )),
            ..Default::default()
        }
    }
}
