//! Paystack gateway client.
//!
//! All endpoints share the `{ status, message, data }` envelope;
//! `status: false` is a definitive rejection, transport failures are
//! retryable.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use haven::domain::{DomainError, PaymentProvider};
use haven::ports::services::payment_gateway::{
    GatewayBank, InitializedPayment, PaymentGateway, PaymentVerification, PayoutDestination,
    ResolvedAccount, TransferReceipt,
};

const BASE_URL: &str = "https://api.paystack.co";

pub struct PaystackClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    status: bool,
    message: Option<String>,
    data: Option<T>,
}

#[derive(Deserialize)]
struct InitData {
    authorization_url: String,
    reference: String,
}

#[derive(Deserialize)]
struct VerifyData {
    status: String,
    reference: String,
    amount: i64,
    currency: String,
}

#[derive(Deserialize)]
struct ResolveData {
    account_number: String,
    account_name: String,
}

#[derive(Deserialize)]
struct RecipientData {
    recipient_code: String,
}

#[derive(Deserialize)]
struct TransferData {
    reference: String,
    status: String,
}

#[derive(Deserialize)]
struct BankData {
    name: String,
    code: String,
}

impl PaystackClient {
    pub fn new(secret_key: String) -> Self {
        Self::with_base_url(secret_key, BASE_URL.to_string())
    }

    pub fn with_base_url(secret_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            secret_key,
            base_url,
        }
    }

    async fn unwrap_envelope<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, DomainError> {
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("paystack: {e}")))?;

        if !envelope.status {
            return Err(DomainError::provider_rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "paystack request rejected".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| DomainError::provider_rejected("paystack: empty data"))
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, DomainError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("paystack: {e}")))?;
        self.unwrap_envelope(response).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("paystack: {e}")))?;
        self.unwrap_envelope(response).await
    }
}

#[async_trait]
impl PaymentGateway for PaystackClient {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Paystack
    }

    async fn initialize_payment(
        &self,
        email: &str,
        amount_kobo: i64,
        reference: &str,
    ) -> Result<InitializedPayment, DomainError> {
        let data: InitData = self
            .post(
                "/transaction/initialize",
                json!({
                    "email": email,
                    "amount": amount_kobo,
                    "reference": reference,
                }),
            )
            .await?;

        Ok(InitializedPayment {
            authorization_url: data.authorization_url,
            reference: data.reference,
        })
    }

    async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification, DomainError> {
        let data: VerifyData = match self.get(&format!("/transaction/verify/{reference}")).await {
            Ok(data) => data,
            // A rejected verify is "not paid", not an outage.
            Err(DomainError::ExternalService {
                retryable: false, ..
            }) => return Ok(PaymentVerification::failed()),
            Err(e) => return Err(e),
        };

        if data.status != "success" {
            return Ok(PaymentVerification::failed());
        }

        Ok(PaymentVerification {
            success: true,
            amount_kobo: data.amount,
            currency: data.currency,
            provider_reference: Some(data.reference),
        })
    }

    async fn resolve_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<ResolvedAccount, DomainError> {
        let data: ResolveData = self
            .get(&format!(
                "/bank/resolve?account_number={account_number}&bank_code={bank_code}"
            ))
            .await?;

        Ok(ResolvedAccount {
            account_number: data.account_number,
            account_name: data.account_name,
        })
    }

    async fn create_transfer_recipient(
        &self,
        name: &str,
        account_number: &str,
        bank_code: &str,
    ) -> Result<String, DomainError> {
        let data: RecipientData = self
            .post(
                "/transferrecipient",
                json!({
                    "type": "nuban",
                    "name": name,
                    "account_number": account_number,
                    "bank_code": bank_code,
                    "currency": "NGN",
                }),
            )
            .await?;

        Ok(data.recipient_code)
    }

    async fn transfer(
        &self,
        amount_kobo: i64,
        destination: &PayoutDestination,
        reference: &str,
        reason: &str,
    ) -> Result<TransferReceipt, DomainError> {
        let PayoutDestination::Recipient(recipient_code) = destination else {
            return Err(DomainError::Validation(
                "paystack transfers require a recipient code".into(),
            ));
        };

        let data: TransferData = self
            .post(
                "/transfer",
                json!({
                    "source": "balance",
                    "amount": amount_kobo,
                    "recipient": recipient_code,
                    "reference": reference,
                    "reason": reason,
                }),
            )
            .await?;

        Ok(TransferReceipt {
            reference: data.reference,
            status: data.status,
        })
    }

    async fn list_banks(&self) -> Result<Vec<GatewayBank>, DomainError> {
        let data: Vec<BankData> = self.get("/bank").await?;
        Ok(data
            .into_iter()
            .map(|b| GatewayBank {
                name: b.name,
                code: b.code,
            })
            .collect())
    }
}
