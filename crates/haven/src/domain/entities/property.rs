//! Property and rental listing entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::value_objects::RentCycle;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Land,
    Bungalow,
    Duplex,
    Terrace,
    Flat,
    SelfContain,
    CommercialBuilding,
    OfficeSpace,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::Bungalow => "bungalow",
            Self::Duplex => "duplex",
            Self::Terrace => "terrace",
            Self::Flat => "flat",
            Self::SelfContain => "self_contain",
            Self::CommercialBuilding => "commercial_building",
            Self::OfficeSpace => "office_space",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "land" => Self::Land,
            "bungalow" => Self::Bungalow,
            "duplex" => Self::Duplex,
            "terrace" => Self::Terrace,
            "self_contain" => Self::SelfContain,
            "commercial_building" => Self::CommercialBuilding,
            "office_space" => Self::OfficeSpace,
            _ => Self::Flat,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub address: String,
    pub state: String,
    pub lga: String,
    pub property_type: PropertyType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn new(
        owner_id: Uuid,
        address: String,
        state: String,
        lga: String,
        property_type: PropertyType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            address,
            state,
            lga,
            property_type,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An uploaded photo of a property.
///
/// `content_hash` is filled in by a background job after upload; duplicate
/// hashes within a property are dropped along with their stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyImage {
    pub id: Uuid,
    pub property_id: Uuid,
    pub uploaded_by: Uuid,
    pub url: String,
    pub storage_public_id: String,
    pub content_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PropertyImage {
    pub fn new(property_id: Uuid, uploaded_by: Uuid, url: String, storage_public_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            uploaded_by,
            url,
            storage_public_id,
            content_hash: None,
            created_at: Utc::now(),
        }
    }
}

/// A property advertised for rent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalListing {
    pub id: Uuid,
    pub property_id: Uuid,
    pub landlord_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub rent_amount_kobo: i64,
    pub rent_cycle: RentCycle,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RentalListing {
    pub fn new(
        property_id: Uuid,
        landlord_id: Uuid,
        title: String,
        rent_amount_kobo: i64,
        rent_cycle: RentCycle,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property_id,
            landlord_id,
            title,
            description: None,
            rent_amount_kobo,
            rent_cycle,
            published: false,
            created_at: now,
            updated_at: now,
        }
    }
}
