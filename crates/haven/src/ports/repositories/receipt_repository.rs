//! Rent Receipt Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::RentReceipt;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::PdfStatus;

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    async fn find_by_id(&self, receipt_id: Uuid) -> Result<Option<RentReceipt>, DomainError>;

    async fn find_by_payment(&self, payment_id: Uuid)
        -> Result<Option<RentReceipt>, DomainError>;

    async fn list_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<RentReceipt>, DomainError>;

    /// Insert the unique receipt row for a payment, or return the existing
    /// one on a duplicate attempt.
    async fn create_or_get(&self, receipt: &RentReceipt) -> Result<RentReceipt, DomainError>;

    async fn set_pdf_status(&self, receipt_id: Uuid, status: PdfStatus)
        -> Result<(), DomainError>;

    async fn set_barcode_reference(
        &self,
        receipt_id: Uuid,
        barcode_reference: &str,
    ) -> Result<(), DomainError>;

    /// Record the uploaded artifact and flip the status in one statement.
    async fn store_artifact(
        &self,
        receipt_id: Uuid,
        storage_public_id: &str,
        pdf_url: &str,
    ) -> Result<(), DomainError>;
}
