//! YouVerify KYC client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use haven::domain::{DomainError, IdentityProvider};
use haven::ports::services::identity_verifier::{IdentityVerifier, VerifiedIdentity};

const BASE_URL: &str = "https://api.youverify.co";

pub struct YouVerifyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct YouVerifyResponse {
    data: Option<YouVerifyRecord>,
}

#[derive(Deserialize)]
struct YouVerifyRecord {
    valid: Option<bool>,
    #[serde(alias = "first_name")]
    firstname: Option<String>,
    #[serde(alias = "last_name")]
    surname: Option<String>,
}

impl YouVerifyClient {
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
        id_value: &str,
    ) -> Result<VerifiedIdentity, DomainError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(&json!({ "id": id_value, "isSubjectConsent": true }))
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("youverify: {e}")))?;

        let body: YouVerifyResponse = response
            .json()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("youverify: {e}")))?;

        let Some(record) = body.data.filter(|d| d.valid == Some(true)) else {
            return Ok(VerifiedIdentity {
                verified: false,
                first_name: String::new(),
                last_name: String::new(),
            });
        };

        Ok(VerifiedIdentity {
            verified: true,
            first_name: record.firstname.unwrap_or_default(),
            last_name: record.surname.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl IdentityVerifier for YouVerifyClient {
    fn provider(&self) -> IdentityProvider {
        IdentityProvider::YouVerify
    }

    async fn verify_bvn(&self, bvn: &str) -> Result<VerifiedIdentity, DomainError> {
        self.verify("/v2/identity/ng/bvn", bvn).await
    }

    async fn verify_nin(&self, nin: &str) -> Result<VerifiedIdentity, DomainError> {
        self.verify("/v2/identity/ng/nin", nin).await
    }
}
