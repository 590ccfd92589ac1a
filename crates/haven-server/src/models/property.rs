//! Property and rental listing DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use haven::domain::{Property, PropertyImage, PropertyType, RentCycle, RentalListing};

/// Create property request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePropertyRequest {
    pub owner_id: Uuid,
    pub address: String,
    pub state: String,
    pub lga: String,
    pub property_type: PropertyType,
}

/// Property response
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub address: String,
    pub state: String,
    pub lga: String,
    pub property_type: PropertyType,
    pub created_at: DateTime<Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            owner_id: property.owner_id,
            address: property.address,
            state: property.state,
            lga: property.lga,
            property_type: property.property_type,
            created_at: property.created_at,
        }
    }
}

/// Register an uploaded property image
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddImageRequest {
    pub uploaded_by: Uuid,
    pub url: String,
    pub storage_public_id: String,
}

/// Property image response
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyImageResponse {
    pub id: Uuid,
    pub property_id: Uuid,
    pub url: String,
    pub content_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PropertyImage> for PropertyImageResponse {
    fn from(image: PropertyImage) -> Self {
        Self {
            id: image.id,
            property_id: image.property_id,
            url: image.url,
            content_hash: image.content_hash,
            created_at: image.created_at,
        }
    }
}

/// Create rental listing request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateListingRequest {
    pub landlord_id: Uuid,
    pub title: String,
    pub rent_amount_kobo: i64,
    pub rent_cycle: RentCycle,
}

/// Publish or unpublish a listing
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishListingRequest {
    pub landlord_id: Uuid,
    pub published: bool,
}

/// Rental listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct ListingResponse {
    pub id: Uuid,
    pub property_id: Uuid,
    pub landlord_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub rent_amount_kobo: i64,
    pub rent_cycle: RentCycle,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RentalListing> for ListingResponse {
    fn from(listing: RentalListing) -> Self {
        Self {
            id: listing.id,
            property_id: listing.property_id,
            landlord_id: listing.landlord_id,
            title: listing.title,
            description: listing.description,
            rent_amount_kobo: listing.rent_amount_kobo,
            rent_cycle: listing.rent_cycle,
            published: listing.published,
            created_at: listing.created_at,
        }
    }
}
