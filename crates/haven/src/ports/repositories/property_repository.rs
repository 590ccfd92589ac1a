//! Property Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Property, PropertyImage, RentalListing};
use crate::domain::errors::DomainError;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_by_id(&self, property_id: Uuid) -> Result<Option<Property>, DomainError>;

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, DomainError>;

    async fn save(&self, property: &Property) -> Result<Property, DomainError>;

    async fn delete(&self, property_id: Uuid) -> Result<bool, DomainError>;

    // --- Images ---

    async fn find_image(&self, image_id: Uuid) -> Result<Option<PropertyImage>, DomainError>;

    async fn save_image(&self, image: &PropertyImage) -> Result<PropertyImage, DomainError>;

    /// Another image of the same property already carrying this content
    /// hash, if any.
    async fn find_image_by_hash(
        &self,
        property_id: Uuid,
        content_hash: &str,
        exclude_image_id: Uuid,
    ) -> Result<Option<PropertyImage>, DomainError>;

    async fn set_image_hash(&self, image_id: Uuid, content_hash: &str)
        -> Result<(), DomainError>;

    async fn delete_image(&self, image_id: Uuid) -> Result<bool, DomainError>;

    // --- Listings ---

    async fn find_listing(&self, listing_id: Uuid) -> Result<Option<RentalListing>, DomainError>;

    async fn list_published_listings(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RentalListing>, DomainError>;

    async fn save_listing(&self, listing: &RentalListing) -> Result<RentalListing, DomainError>;
}
