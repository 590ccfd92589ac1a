//! Flutterwave gateway client.
//!
//! Envelope is `{ status: "success" | "error", message, data }`; amounts
//! on this gateway are major units (naira), so kobo values are converted
//! at the boundary.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

use haven::domain::{DomainError, PaymentProvider};
use haven::ports::services::payment_gateway::{
    GatewayBank, InitializedPayment, PaymentGateway, PaymentVerification, PayoutDestination,
    ResolvedAccount, TransferReceipt,
};

const BASE_URL: &str = "https://api.flutterwave.com/v3";

pub struct FlutterwaveClient {
    client: Client,
    secret_key: String,
    redirect_url: String,
    base_url: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    status: String,
    message: Option<String>,
    data: Option<T>,
}

#[derive(Deserialize)]
struct InitData {
    link: String,
}

#[derive(Deserialize)]
struct VerifyData {
    status: String,
    flw_ref: String,
    amount: f64,
    currency: String,
}

#[derive(Deserialize)]
struct TransferData {
    reference: String,
    status: String,
}

#[derive(Deserialize)]
struct ResolveData {
    account_number: String,
    account_name: String,
}

#[derive(Deserialize)]
struct BankData {
    name: String,
    code: String,
}

impl FlutterwaveClient {
    pub fn new(secret_key: String, redirect_url: String) -> Self {
        Self::with_base_url(secret_key, redirect_url, BASE_URL.to_string())
    }

    pub fn with_base_url(secret_key: String, redirect_url: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            secret_key,
            redirect_url,
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
            .map_err(|e| DomainError::provider_unreachable(format!("flutterwave: {e}")))?;

        if envelope.status != "success" {
            return Err(DomainError::provider_rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "flutterwave request rejected".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| DomainError::provider_rejected("flutterwave: empty data"))
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
            .map_err(|e| DomainError::provider_unreachable(format!("flutterwave: {e}")))?;
        self.unwrap_envelope(response).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("flutterwave: {e}")))?;
        self.unwrap_envelope(response).await
    }
}

fn naira(amount_kobo: i64) -> f64 {
    amount_kobo as f64 / 100.0
}

#[async_trait]
impl PaymentGateway for FlutterwaveClient {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Flutterwave
    }

    async fn initialize_payment(
        &self,
        email: &str,
        amount_kobo: i64,
        _reference: &str,
    ) -> Result<InitializedPayment, DomainError> {
        // Flutterwave requires its own tx_ref format; it supersedes the
        // caller's reference and is stored on the payment instead.
        let tx_ref = format!("FLW-{}", &Uuid::new_v4().simple().to_string()[..12]);

        let data: InitData = self
            .post(
                "/payments",
                json!({
                    "tx_ref": tx_ref,
                    "amount": naira(amount_kobo),
                    "currency": "NGN",
                    "redirect_url": self.redirect_url,
                    "customer": { "email": email },
                    "payment_options": "card",
                    "customizations": {
                        "title": "Rent Payment",
                        "description": "House rent payment",
                    },
                }),
            )
            .await?;

        Ok(InitializedPayment {
            authorization_url: data.link,
            reference: tx_ref,
        })
    }

    async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification, DomainError> {
        let data: VerifyData = match self
            .get(&format!("/transactions/verify_by_reference?tx_ref={reference}"))
            .await
        {
            Ok(data) => data,
            Err(DomainError::ExternalService {
                retryable: false, ..
            }) => return Ok(PaymentVerification::failed()),
            Err(e) => return Err(e),
        };

        if data.status != "successful" {
            return Ok(PaymentVerification::failed());
        }

        Ok(PaymentVerification {
            success: true,
            amount_kobo: (data.amount * 100.0).round() as i64,
            currency: data.currency,
            provider_reference: Some(data.flw_ref),
        })
    }

    async fn resolve_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<ResolvedAccount, DomainError> {
        let data: ResolveData = self
            .post(
                "/accounts/resolve",
                json!({
                    "account_number": account_number,
                    "account_bank": bank_code,
                }),
            )
            .await?;

        Ok(ResolvedAccount {
            account_number: data.account_number,
            account_name: data.account_name,
        })
    }

    async fn create_transfer_recipient(
        &self,
        _name: &str,
        _account_number: &str,
        _bank_code: &str,
    ) -> Result<String, DomainError> {
        // Flutterwave transfers address the account directly.
        Err(DomainError::Validation(
            "flutterwave does not use transfer recipients".into(),
        ))
    }

    async fn transfer(
        &self,
        amount_kobo: i64,
        destination: &PayoutDestination,
        reference: &str,
        reason: &str,
    ) -> Result<TransferReceipt, DomainError> {
        let PayoutDestination::BankAccount {
            account_number,
            bank_code,
        } = destination
        else {
            return Err(DomainError::Validation(
                "flutterwave transfers require a bank account".into(),
            ));
        };

        let data: TransferData = self
            .post(
                "/transfers",
                json!({
                    "account_bank": bank_code,
                    "account_number": account_number,
                    "amount": naira(amount_kobo),
                    "currency": "NGN",
                    "debit_currency": "NGN",
                    "narration": reason,
                    "reference": reference,
                }),
            )
            .await?;

        Ok(TransferReceipt {
            reference: data.reference,
            status: data.status,
        })
    }

    async fn list_banks(&self) -> Result<Vec<GatewayBank>, DomainError> {
        let data: Vec<BankData> = self.get("/banks/NG").await?;
        Ok(data
            .into_iter()
            .map(|b| GatewayBank {
                name: b.name,
                code: b.code,
            })
            .collect())
    }
}
