//! Email/SMS notification adapter.
//!
//! SMS goes through a Termii-style HTTP API, email through a transactional
//! mail API. Failures are logged and reported as retryable; the job layer
//! owns the retry budget.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use haven::domain::DomainError;
use haven::ports::services::notifier::{Notifier, RentPaidNotice};

pub struct HttpNotifier {
    client: Client,
    sms_base_url: String,
    sms_api_key: String,
    sms_sender_id: String,
    email_base_url: String,
    email_api_key: String,
    email_from: String,
}

impl HttpNotifier {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sms_base_url: String,
        sms_api_key: String,
        sms_sender_id: String,
        email_base_url: String,
        email_api_key: String,
        email_from: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            sms_base_url,
            sms_api_key,
            sms_sender_id,
            email_base_url,
            email_api_key,
            email_from,
        }
    }

    async fn send_sms(&self, to: &str, body: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .post(format!("{}/api/sms/send", self.sms_base_url))
            .json(&json!({
                "api_key": self.sms_api_key,
                "to": to,
                "from": self.sms_sender_id,
                "sms": body,
                "type": "plain",
                "channel": "generic",
            }))
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("sms: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::provider_unreachable(format!(
                "sms send failed: {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .post(format!("{}/v1/mail/send", self.email_base_url))
            .bearer_auth(&self.email_api_key)
            .json(&json!({
                "from": self.email_from,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await
            .map_err(|e| DomainError::provider_unreachable(format!("email: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::provider_unreachable(format!(
                "email send failed: {}",
                response.status()
            )));
        }
        Ok(())
    }
}

fn format_amount(amount_kobo: i64, currency: &str) -> String {
    format!("{} {}.{:02}", currency, amount_kobo / 100, amount_kobo % 100)
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn rent_paid(&self, notice: &RentPaidNotice) -> Result<(), DomainError> {
        let amount = format_amount(notice.amount_kobo, &notice.currency);

        if let Some(phone) = &notice.tenant_phone {
            self.send_sms(
                phone,
                &format!(
                    "Hi {}, your rent payment of {} was received. Your receipt is on the way.",
                    notice.tenant_name, amount
                ),
            )
            .await?;
        }

        if let Some(phone) = &notice.landlord_phone {
            self.send_sms(
                phone,
                &format!(
                    "Hi {}, {} paid rent of {}.",
                    notice.landlord_name, notice.tenant_name, amount
                ),
            )
            .await?;
        }

        self.send_email(
            &notice.landlord_email,
            "Rent payment received",
            &format!(
                "Hello {},\n\n{} has paid rent of {}. The payout to your account is being processed.\n",
                notice.landlord_name, notice.tenant_name, amount
            ),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_formatting() {
        assert_eq!(format_amount(1_500_000_00, "NGN"), "NGN 1500000.00");
        assert_eq!(format_amount(2_50, "NGN"), "NGN 2.50");
        assert_eq!(format_amount(5, "NGN"), "NGN 0.05");
    }
}
