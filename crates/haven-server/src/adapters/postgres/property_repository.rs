//! PostgreSQL implementation of PropertyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use haven::domain::{DomainError, Property, PropertyImage, PropertyType, RentCycle, RentalListing};
use haven::ports::PropertyRepository;

pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PropertyRow {
    id: Uuid,
    owner_id: Uuid,
    address: String,
    state: String,
    lga: String,
    property_type: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            address: row.address,
            state: row.state,
            lga: row.lga,
            property_type: PropertyType::parse(&row.property_type),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: Uuid,
    property_id: Uuid,
    uploaded_by: Uuid,
    url: String,
    storage_public_id: String,
    content_hash: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ImageRow> for PropertyImage {
    fn from(row: ImageRow) -> Self {
        Self {
            id: row.id,
            property_id: row.property_id,
            uploaded_by: row.uploaded_by,
            url: row.url,
            storage_public_id: row.storage_public_id,
            content_hash: row.content_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    id: Uuid,
    property_id: Uuid,
    landlord_id: Uuid,
    title: String,
    description: Option<String>,
    rent_amount_kobo: i64,
    rent_cycle: String,
    published: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ListingRow> for RentalListing {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.id,
            property_id: row.property_id,
            landlord_id: row.landlord_id,
            title: row.title,
            description: row.description,
            rent_amount_kobo: row.rent_amount_kobo,
            rent_cycle: RentCycle::parse(&row.rent_cycle),
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn find_by_id(&self, property_id: Uuid) -> Result<Option<Property>, DomainError> {
        let row = sqlx::query_as::<_, PropertyRow>("SELECT * FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, DomainError> {
        let rows = sqlx::query_as::<_, PropertyRow>(
            "SELECT * FROM properties WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save(&self, property: &Property) -> Result<Property, DomainError> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"
            INSERT INTO properties (id, owner_id, address, state, lga, property_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                address = EXCLUDED.address,
                state = EXCLUDED.state,
                lga = EXCLUDED.lga,
                property_type = EXCLUDED.property_type,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(property.id)
        .bind(property.owner_id)
        .bind(&property.address)
        .bind(&property.state)
        .bind(&property.lga)
        .bind(property.property_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn delete(&self, property_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(property_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_image(&self, image_id: Uuid) -> Result<Option<PropertyImage>, DomainError> {
        let row = sqlx::query_as::<_, ImageRow>("SELECT * FROM property_images WHERE id = $1")
            .bind(image_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn save_image(&self, image: &PropertyImage) -> Result<PropertyImage, DomainError> {
        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            INSERT INTO property_images (id, property_id, uploaded_by, url, storage_public_id, content_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(image.id)
        .bind(image.property_id)
        .bind(image.uploaded_by)
        .bind(&image.url)
        .bind(&image.storage_public_id)
        .bind(&image.content_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_image_by_hash(
        &self,
        property_id: Uuid,
        content_hash: &str,
        exclude_image_id: Uuid,
    ) -> Result<Option<PropertyImage>, DomainError> {
        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT * FROM property_images
            WHERE property_id = $1 AND content_hash = $2 AND id <> $3
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(property_id)
        .bind(content_hash)
        .bind(exclude_image_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn set_image_hash(
        &self,
        image_id: Uuid,
        content_hash: &str,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE property_images SET content_hash = $2 WHERE id = $1")
            .bind(image_id)
            .bind(content_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn delete_image(&self, image_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM property_images WHERE id = $1")
            .bind(image_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_listing(&self, listing_id: Uuid) -> Result<Option<RentalListing>, DomainError> {
        let row = sqlx::query_as::<_, ListingRow>("SELECT * FROM rental_listings WHERE id = $1")
            .bind(listing_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_published_listings(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RentalListing>, DomainError> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT * FROM rental_listings
            WHERE published = TRUE
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save_listing(&self, listing: &RentalListing) -> Result<RentalListing, DomainError> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            INSERT INTO rental_listings (
                id, property_id, landlord_id, title, description,
                rent_amount_kobo, rent_cycle, published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                rent_amount_kobo = EXCLUDED.rent_amount_kobo,
                rent_cycle = EXCLUDED.rent_cycle,
                published = EXCLUDED.published,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(listing.id)
        .bind(listing.property_id)
        .bind(listing.landlord_id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.rent_amount_kobo)
        .bind(listing.rent_cycle.as_str())
        .bind(listing.published)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }
}
