//! Rent receipt entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::PdfStatus;

/// A receipt issued for a verified rent payment.
///
/// `pdf_status` is the guard that keeps retried generation jobs from
/// producing two artifacts: Ready short-circuits, Generating marks the
/// attempt in flight, Failed records a rolled-back attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentReceipt {
    pub id: Uuid,
    pub payment_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub amount_kobo: i64,
    pub currency: String,
    pub pdf_status: PdfStatus,
    /// HMAC-SHA256 of `"{id}:{amount}"` under the app secret; printed as
    /// the receipt's verification barcode.
    pub barcode_reference: Option<String>,
    pub storage_public_id: Option<String>,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RentReceipt {
    pub fn new(
        payment_id: Uuid,
        tenant_id: Uuid,
        landlord_id: Uuid,
        amount_kobo: i64,
        currency: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            payment_id,
            tenant_id,
            landlord_id,
            amount_kobo,
            currency,
            pdf_status: PdfStatus::Pending,
            barcode_reference: None,
            storage_public_id: Some(format!("receipts/{}", Uuid::new_v4().simple())),
            pdf_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
