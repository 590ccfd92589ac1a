//! Media store client.
//!
//! Thin HTTP client for the blob store holding receipt PDFs and property
//! images. Objects are addressed by public id; deletes are idempotent on
//! the server side.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use haven::domain::DomainError;
use haven::ports::services::document_store::{DocumentStore, StoredDocument};

pub struct MediaStore {
    client: Client,
    base_url: String,
    api_token: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    public_id: String,
    url: String,
}

impl MediaStore {
    pub fn new(base_url: String, api_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url,
            api_token,
        }
    }
}

#[async_trait]
impl DocumentStore for MediaStore {
    async fn upload_pdf(
        &self,
        bytes: &[u8],
        public_id: &str,
    ) -> Result<StoredDocument, DomainError> {
        let response = self
            .client
            .put(format!("{}/objects/{}", self.base_url, public_id))
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/pdf")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("media store: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::provider_unreachable(format!(
                "media store upload failed: {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("media store: {e}")))?;

        Ok(StoredDocument {
            public_id: body.public_id,
            url: body.url,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(format!("{}/objects/{}", self.base_url, public_id))
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("media store: {e}")))?;

        // 404 counts as deleted.
        if response.status().is_success() || response.status().as_u16() == 404 {
            Ok(())
        } else {
            Err(DomainError::provider_unreachable(format!(
                "media store delete failed: {}",
                response.status()
            )))
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("media store: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::provider_unreachable(format!(
                "media fetch failed: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("media store: {e}")))?;
        Ok(bytes.to_vec())
    }
}
