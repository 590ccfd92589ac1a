//! Document Store Port
//!
//! Blob storage for receipt PDFs and property images.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub public_id: String,
    pub url: String,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn upload_pdf(
        &self,
        bytes: &[u8],
        public_id: &str,
    ) -> Result<StoredDocument, DomainError>;

    /// Best-effort delete; callers treat a missing object as success.
    async fn delete(&self, public_id: &str) -> Result<(), DomainError>;

    /// Fetch stored content, used for hashing uploads.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError>;
}
