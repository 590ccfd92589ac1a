//! Prembly KYC client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use haven::domain::{DomainError, IdentityProvider};
use haven::ports::services::identity_verifier::{IdentityVerifier, VerifiedIdentity};

const BASE_URL: &str = "https://api.prembly.com";

pub struct PremblyClient {
    client: Client,
    app_id: String,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct PremblyResponse {
    status: bool,
    #[serde(default)]
    nin_data: Option<PremblyRecord>,
    #[serde(default)]
    data: Option<PremblyRecord>,
}

#[derive(Deserialize)]
struct PremblyRecord {
    #[serde(alias = "first_name")]
    firstname: Option<String>,
    #[serde(alias = "last_name")]
    surname: Option<String>,
}

impl PremblyClient {
    pub fn new(app_id: String, api_key: String) -> Self {
        Self::with_base_url(app_id, api_key, BASE_URL.to_string())
    }

    pub fn with_base_url(app_id: String, api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            app_id,
            api_key,
            base_url,
        }
    }

    async fn verify(&self, path: &str, payload: serde_json::Value)
        -> Result<VerifiedIdentity, DomainError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("app-id", &self.app_id)
            .header("x-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("prembly: {e}")))?;

        let body: PremblyResponse = response
            .json()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("prembly: {e}")))?;

        let record = body.nin_data.or(body.data);
        let Some(record) = record.filter(|_| body.status) else {
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
impl IdentityVerifier for PremblyClient {
    fn provider(&self) -> IdentityProvider {
        IdentityProvider::Prembly
    }

    async fn verify_bvn(&self, bvn: &str) -> Result<VerifiedIdentity, DomainError> {
        self.verify("/verification/bvn", json!({ "number": bvn })).await
    }

    async fn verify_nin(&self, nin: &str) -> Result<VerifiedIdentity, DomainError> {
        self.verify("/verification/vnin-basic", json!({ "number_nin": nin }))
            .await
    }
}
