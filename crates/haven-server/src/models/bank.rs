//! Bank directory DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use haven::domain::Bank;

/// Pagination for the bank directory
#[derive(Debug, Deserialize, ToSchema)]
pub struct BankListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Bank directory row
#[derive(Debug, Serialize, ToSchema)]
pub struct BankResponse {
    pub id: Uuid,
    pub name: String,
    pub paystack_code: Option<String>,
    pub flutterwave_code: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bank> for BankResponse {
    fn from(bank: Bank) -> Self {
        Self {
            id: bank.id,
            name: bank.name,
            paystack_code: bank.paystack_code,
            flutterwave_code: bank.flutterwave_code,
            updated_at: bank.updated_at,
        }
    }
}
