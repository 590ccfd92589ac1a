//! Property Application Service
//!
//! Property and listing CRUD plus the image pipeline. Uploaded images are
//! hashed out-of-band; a duplicate within the same property is deleted
//! from storage along with its row.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use haven::domain::{DomainError, Property, PropertyImage, PropertyType, RentalListing};
use haven::ports::{DocumentStore, JobRepository, PropertyRepository};

use crate::jobs::JobQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageHashOutcome {
    /// Image row disappeared before the job ran.
    Gone,
    /// Same bytes already present on this property; upload removed.
    DuplicateRemoved,
    Hashed,
}

pub struct PropertyService<P, J>
where
    P: PropertyRepository,
    J: JobRepository,
{
    properties: Arc<P>,
    queue: Arc<JobQueue<J>>,
    store: Arc<dyn DocumentStore>,
}

impl<P, J> PropertyService<P, J>
where
    P: PropertyRepository,
    J: JobRepository,
{
    pub fn new(properties: Arc<P>, queue: Arc<JobQueue<J>>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            properties,
            queue,
            store,
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        address: String,
        state: String,
        lga: String,
        property_type: PropertyType,
    ) -> Result<Property, DomainError> {
        if address.trim().is_empty() {
            return Err(DomainError::Validation("address is required".into()));
        }
        self.properties
            .save(&Property::new(owner_id, address, state, lga, property_type))
            .await
    }

    pub async fn get(&self, property_id: Uuid) -> Result<Property, DomainError> {
        self.properties
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", property_id))
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, DomainError> {
        self.properties.list_by_owner(owner_id).await
    }

    pub async fn delete(&self, property_id: Uuid, actor_id: Uuid) -> Result<(), DomainError> {
        let property = self.get(property_id).await?;
        if property.owner_id != actor_id {
            return Err(DomainError::Unauthorized(
                "only the owner can delete a property".into(),
            ));
        }
        self.properties.delete(property_id).await?;
        Ok(())
    }

    /// Record an uploaded image and queue content hashing.
    pub async fn add_image(
        &self,
        property_id: Uuid,
        uploaded_by: Uuid,
        url: String,
        storage_public_id: String,
    ) -> Result<PropertyImage, DomainError> {
        let property = self.get(property_id).await?;
        if property.owner_id != uploaded_by {
            return Err(DomainError::Unauthorized(
                "only the owner can add images".into(),
            ));
        }

        let image = self
            .properties
            .save_image(&PropertyImage::new(
                property_id,
                uploaded_by,
                url,
                storage_public_id,
            ))
            .await?;
        self.queue.hash_property_image(image.id).await?;
        Ok(image)
    }

    /// Job handler for `image.hash`.
    pub async fn hash_image(&self, image_id: Uuid) -> Result<ImageHashOutcome, DomainError> {
        let Some(image) = self.properties.find_image(image_id).await? else {
            return Ok(ImageHashOutcome::Gone);
        };
        if image.content_hash.is_some() {
            return Ok(ImageHashOutcome::Hashed);
        }

        let bytes = self.store.fetch(&image.url).await?;
        let hash = hex::encode(Sha256::digest(&bytes));

        let duplicate = self
            .properties
            .find_image_by_hash(image.property_id, &hash, image.id)
            .await?;
        if duplicate.is_some() {
            self.store.delete(&image.storage_public_id).await?;
            self.properties.delete_image(image.id).await?;
            tracing::info!(image_id = %image.id, "Removed duplicate property image");
            return Ok(ImageHashOutcome::DuplicateRemoved);
        }

        self.properties.set_image_hash(image.id, &hash).await?;
        Ok(ImageHashOutcome::Hashed)
    }

    pub async fn create_listing(
        &self,
        property_id: Uuid,
        landlord_id: Uuid,
        title: String,
        rent_amount_kobo: i64,
        rent_cycle: haven::domain::RentCycle,
    ) -> Result<RentalListing, DomainError> {
        let property = self.get(property_id).await?;
        if property.owner_id != landlord_id {
            return Err(DomainError::Unauthorized(
                "only the owner can list a property".into(),
            ));
        }
        if rent_amount_kobo <= 0 {
            return Err(DomainError::Validation(
                "rent amount must be positive".into(),
            ));
        }

        self.properties
            .save_listing(&RentalListing::new(
                property_id,
                landlord_id,
                title,
                rent_amount_kobo,
                rent_cycle,
            ))
            .await
    }

    pub async fn set_listing_published(
        &self,
        listing_id: Uuid,
        landlord_id: Uuid,
        published: bool,
    ) -> Result<RentalListing, DomainError> {
        let mut listing = self
            .properties
            .find_listing(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("RentalListing", listing_id))?;
        if listing.landlord_id != landlord_id {
            return Err(DomainError::Unauthorized(
                "only the landlord can publish a listing".into(),
            ));
        }
        listing.published = published;
        self.properties.save_listing(&listing).await
    }

    pub async fn list_published(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RentalListing>, DomainError> {
        self.properties.list_published_listings(limit, offset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::*;

    struct Fixture {
        properties: Arc<FakePropertyRepository>,
        store: Arc<FakeDocumentStore>,
        service: PropertyService<FakePropertyRepository, FakeJobRepository>,
        owner_id: Uuid,
        property_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let properties = Arc::new(FakePropertyRepository::default());
        let jobs = Arc::new(FakeJobRepository::default());
        let store = Arc::new(FakeDocumentStore::default());
        let service = PropertyService::new(
            properties.clone(),
            Arc::new(JobQueue::new(jobs)),
            store.clone(),
        );

        let owner_id = Uuid::new_v4();
        let property = service
            .create(
                owner_id,
                "12 Marina Road".into(),
                "Lagos".into(),
                "Eti-Osa".into(),
                PropertyType::Flat,
            )
            .await
            .unwrap();

        Fixture {
            properties,
            store,
            service,
            owner_id,
            property_id: property.id,
        }
    }

    async fn upload(f: &Fixture, name: &str, bytes: &[u8]) -> PropertyImage {
        let url = format!("https://media.example.com/{name}");
        f.store.set_fetchable(&url, bytes.to_vec());
        f.service
            .add_image(f.property_id, f.owner_id, url, format!("images/{name}"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn unique_images_are_hashed_and_kept() {
        let f = fixture().await;
        let a = upload(&f, "a.jpg", b"front view").await;
        let b = upload(&f, "b.jpg", b"back view").await;

        assert_eq!(f.service.hash_image(a.id).await.unwrap(), ImageHashOutcome::Hashed);
        assert_eq!(f.service.hash_image(b.id).await.unwrap(), ImageHashOutcome::Hashed);

        let a_after = f.properties.find_image(a.id).await.unwrap().unwrap();
        assert!(a_after.content_hash.is_some());
        assert!(f.store.deleted_ids().is_empty());
    }

    #[tokio::test]
    async fn duplicate_image_is_dropped_with_its_blob() {
        let f = fixture().await;
        let original = upload(&f, "a.jpg", b"same bytes").await;
        let duplicate = upload(&f, "b.jpg", b"same bytes").await;

        f.service.hash_image(original.id).await.unwrap();
        let outcome = f.service.hash_image(duplicate.id).await.unwrap();

        assert_eq!(outcome, ImageHashOutcome::DuplicateRemoved);
        assert!(f
            .properties
            .find_image(duplicate.id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(f.store.deleted_ids(), vec!["images/b.jpg".to_string()]);
        assert!(f
            .properties
            .find_image(original.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn hash_job_for_deleted_image_is_a_noop() {
        let f = fixture().await;
        let outcome = f.service.hash_image(Uuid::new_v4()).await.unwrap();
        assert_eq!(outcome, ImageHashOutcome::Gone);
    }

    #[tokio::test]
    async fn only_the_owner_manages_images_and_listings() {
        let f = fixture().await;
        let stranger = Uuid::new_v4();

        let err = f
            .service
            .add_image(
                f.property_id,
                stranger,
                "https://media.example.com/x.jpg".into(),
                "images/x.jpg".into(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let err = f
            .service
            .create_listing(
                f.property_id,
                stranger,
                "Not mine".into(),
                10_000_00,
                haven::domain::RentCycle::Yearly,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}
