//! Idempotency Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::IdempotencyRecord;
use crate::domain::errors::DomainError;

#[async_trait]
pub trait IdempotencyRepository: Send + Sync {
    /// Insert the record, relying on the (key, user) unique constraint to
    /// resolve concurrent duplicates. Returns the winning record and
    /// whether this call created it.
    async fn create_or_get(
        &self,
        record: &IdempotencyRecord,
    ) -> Result<(IdempotencyRecord, bool), DomainError>;

    async fn find(&self, key: &str, user_id: Uuid)
        -> Result<Option<IdempotencyRecord>, DomainError>;

    async fn store_response(
        &self,
        key: &str,
        user_id: Uuid,
        response: &serde_json::Value,
    ) -> Result<(), DomainError>;

    /// Remove a key whose operation failed before producing a response,
    /// so a client retry with the same key can execute.
    async fn delete(&self, key: &str, user_id: Uuid) -> Result<(), DomainError>;
}
