//! Rent receipt DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use haven::domain::{PdfStatus, RentReceipt};

/// Rent receipt response
#[derive(Debug, Serialize, ToSchema)]
pub struct ReceiptResponse {
    pub id: Uuid,
    pub payment_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub amount_kobo: i64,
    pub currency: String,
    pub pdf_status: PdfStatus,
    pub barcode_reference: Option<String>,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RentReceipt> for ReceiptResponse {
    fn from(receipt: RentReceipt) -> Self {
        Self {
            id: receipt.id,
            payment_id: receipt.payment_id,
            tenant_id: receipt.tenant_id,
            landlord_id: receipt.landlord_id,
            amount_kobo: receipt.amount_kobo,
            currency: receipt.currency,
            pdf_status: receipt.pdf_status,
            barcode_reference: receipt.barcode_reference,
            pdf_url: receipt.pdf_url,
            created_at: receipt.created_at,
        }
    }
}
