//! Notifier Port
//!
//! Email/SMS fan-out for payment events. Fired from jobs so a slow
//! notification provider never holds a webhook response open.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Everything the rent-paid templates need, denormalized off the payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentPaidNotice {
    pub tenant_name: String,
    pub tenant_phone: Option<String>,
    pub landlord_name: String,
    pub landlord_phone: Option<String>,
    pub landlord_email: String,
    pub amount_kobo: i64,
    pub currency: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn rent_paid(&self, notice: &RentPaidNotice) -> Result<(), DomainError>;
}
