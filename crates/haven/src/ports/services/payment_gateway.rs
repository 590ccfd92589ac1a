//! Payment Gateway Port
//!
//! One trait over both fintech gateways (Paystack, Flutterwave). Amounts
//! are minor units (kobo) throughout, which is what the wire formats carry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::PaymentProvider;

/// Result of initializing a charge: where to send the payer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializedPayment {
    pub authorization_url: String,
    pub reference: String,
}

/// Outcome of a server-side verify call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub success: bool,
    pub amount_kobo: i64,
    pub currency: String,
    /// The gateway's own reference, when it differs from ours
    /// (Flutterwave returns a flw_ref alongside the tx_ref).
    pub provider_reference: Option<String>,
}

impl PaymentVerification {
    pub fn failed() -> Self {
        Self {
            success: false,
            amount_kobo: 0,
            currency: String::new(),
            provider_reference: None,
        }
    }
}

/// Where a payout lands. Paystack transfers address a pre-created
/// recipient; Flutterwave addresses the bank account directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PayoutDestination {
    Recipient(String),
    BankAccount {
        account_number: String,
        bank_code: String,
    },
}

/// Result of a transfer (payout) call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub reference: String,
    pub status: String,
}

/// Bank account resolved to its holder's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAccount {
    pub account_number: String,
    pub account_name: String,
}

/// A bank as listed by a gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayBank {
    pub name: String,
    pub code: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn provider(&self) -> PaymentProvider;

    async fn initialize_payment(
        &self,
        email: &str,
        amount_kobo: i64,
        reference: &str,
    ) -> Result<InitializedPayment, DomainError>;

    async fn verify_payment(&self, reference: &str)
        -> Result<PaymentVerification, DomainError>;

    async fn resolve_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<ResolvedAccount, DomainError>;

    async fn create_transfer_recipient(
        &self,
        name: &str,
        account_number: &str,
        bank_code: &str,
    ) -> Result<String, DomainError>;

    async fn transfer(
        &self,
        amount_kobo: i64,
        destination: &PayoutDestination,
        reference: &str,
        reason: &str,
    ) -> Result<TransferReceipt, DomainError>;

    async fn list_banks(&self) -> Result<Vec<GatewayBank>, DomainError>;
}
