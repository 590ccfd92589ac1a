//! Bank Directory Repository Port

use async_trait::async_trait;

use crate::domain::entities::Bank;
use crate::domain::errors::DomainError;

#[async_trait]
pub trait BankRepository: Send + Sync {
    /// Insert or update on the canonical-name unique key.
    async fn upsert(&self, bank: &Bank) -> Result<Bank, DomainError>;

    async fn find_by_canonical(&self, canonical_name: &str)
        -> Result<Option<Bank>, DomainError>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Bank>, DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;
}
