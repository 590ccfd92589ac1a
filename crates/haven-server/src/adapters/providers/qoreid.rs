//! QoreID KYC client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use haven::domain::{DomainError, IdentityProvider};
use haven::ports::services::identity_verifier::{IdentityVerifier, VerifiedIdentity};

const BASE_URL: &str = "https://api.qoreid.com";

pub struct QoreIdClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QoreIdResponse {
    verification_status: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl QoreIdClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            api_key,
            base_url,
        }
    }

    async fn verify(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<VerifiedIdentity, DomainError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("qoreid: {e}")))?;

        let body: QoreIdResponse = response
            .json()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("qoreid: {e}")))?;

        if body.verification_status.as_deref() != Some("verified") {
            return Ok(VerifiedIdentity {
                verified: false,
                first_name: String::new(),
                last_name: String::new(),
            });
        }

        Ok(VerifiedIdentity {
            verified: true,
            first_name: body.first_name.unwrap_or_default(),
            last_name: body.last_name.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl IdentityVerifier for QoreIdClient {
    fn provider(&self) -> IdentityProvider {
        IdentityProvider::QoreId
    }

    async fn verify_bvn(&self, bvn: &str) -> Result<VerifiedIdentity, DomainError> {
        self.verify("/v1/identity/bvn", json!({ "bvn": bvn })).await
    }

    async fn verify_nin(&self, nin: &str) -> Result<VerifiedIdentity, DomainError> {
        self.verify("/v1/identity/nin", json!({ "nin": nin })).await
    }
}
