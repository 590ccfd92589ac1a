//! Receipt Application Service
//!
//! Generates the rent receipt PDF for a paid-out payment. The pdf_status
//! flag is the idempotency guard: Ready short-circuits a redelivered job,
//! and a failed attempt rolls back to Failed with the partial artifact
//! removed so the retry starts clean.

use std::sync::Arc;
use uuid::Uuid;

use haven::domain::{DomainError, PdfStatus, RentReceipt};
use haven::ports::{DocumentStore, ReceiptRepository};

use crate::adapters::pdf;
use crate::adapters::signature;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptOutcome {
    /// Artifact already generated by a previous attempt.
    AlreadyReady,
    Generated,
}

pub struct ReceiptService<Rec: ReceiptRepository> {
    receipts: Arc<Rec>,
    store: Arc<dyn DocumentStore>,
    signing_key: String,
}

impl<Rec: ReceiptRepository> ReceiptService<Rec> {
    pub fn new(receipts: Arc<Rec>, store: Arc<dyn DocumentStore>, signing_key: String) -> Self {
        Self {
            receipts,
            store,
            signing_key,
        }
    }

    /// Job handler for `receipt.generate`.
    pub async fn generate(&self, payment_id: Uuid) -> Result<ReceiptOutcome, DomainError> {
        let mut receipt = self
            .receipts
            .find_by_payment(payment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("RentReceipt", payment_id))?;

        if receipt.pdf_status == PdfStatus::Ready {
            tracing::info!(receipt_id = %receipt.id, "Receipt already generated");
            return Ok(ReceiptOutcome::AlreadyReady);
        }

        self.receipts
            .set_pdf_status(receipt.id, PdfStatus::Generating)
            .await?;

        if receipt.barcode_reference.is_none() {
            let barcode = signature::sign_sha256(
                &self.signing_key,
                &format!("{}:{}", receipt.id, receipt.amount_kobo),
            );
            self.receipts
                .set_barcode_reference(receipt.id, &barcode)
                .await?;
            receipt.barcode_reference = Some(barcode);
        }

        let public_id = receipt
            .storage_public_id
            .clone()
            .unwrap_or_else(|| format!("receipts/{}", receipt.id.simple()));
        let bytes = pdf::render_receipt(&receipt);

        match self.store.upload_pdf(&bytes, &public_id).await {
            Ok(stored) => {
                self.receipts
                    .store_artifact(receipt.id, &stored.public_id, &stored.url)
                    .await?;
                tracing::info!(receipt_id = %receipt.id, url = stored.url, "Receipt generated");
                Ok(ReceiptOutcome::Generated)
            }
            Err(e) => {
                self.receipts
                    .set_pdf_status(receipt.id, PdfStatus::Failed)
                    .await?;
                // Remove any partial artifact so the retry uploads fresh.
                if let Err(delete_err) = self.store.delete(&public_id).await {
                    tracing::warn!(
                        receipt_id = %receipt.id,
                        error = %delete_err,
                        "Could not remove partial receipt artifact"
                    );
                }
                tracing::error!(receipt_id = %receipt.id, error = %e, "Receipt generation failed");
                Err(e)
            }
        }
    }

    pub async fn get(&self, receipt_id: Uuid) -> Result<RentReceipt, DomainError> {
        self.receipts
            .find_by_id(receipt_id)
            .await?
            .ok_or_else(|| DomainError::not_found("RentReceipt", receipt_id))
    }

    pub async fn list_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<RentReceipt>, DomainError> {
        self.receipts.list_for_tenant(tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::*;

    struct Fixture {
        receipts: Arc<FakeReceiptRepository>,
        store: Arc<FakeDocumentStore>,
        service: ReceiptService<FakeReceiptRepository>,
    }

    fn fixture() -> Fixture {
        let receipts = Arc::new(FakeReceiptRepository::default());
        let store = Arc::new(FakeDocumentStore::default());
        let service = ReceiptService::new(receipts.clone(), store.clone(), "secret".into());
        Fixture {
            receipts,
            store,
            service,
        }
    }

    async fn seed_receipt(f: &Fixture) -> RentReceipt {
        f.receipts
            .create_or_get(&RentReceipt::new(
                Uuid::new_v4(),
                Uuid::new_v4(),
                Uuid::new_v4(),
                80_000_00,
                "NGN".into(),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn generates_and_uploads_once() {
        let f = fixture();
        let receipt = seed_receipt(&f).await;

        let outcome = f.service.generate(receipt.payment_id).await.unwrap();
        assert_eq!(outcome, ReceiptOutcome::Generated);

        let saved = f.service.get(receipt.id).await.unwrap();
        assert_eq!(saved.pdf_status, PdfStatus::Ready);
        assert!(saved.pdf_url.is_some());
        assert!(saved.barcode_reference.is_some());
        assert_eq!(f.store.upload_count(), 1);
    }

    #[tokio::test]
    async fn redelivered_job_does_not_upload_again() {
        let f = fixture();
        let receipt = seed_receipt(&f).await;

        f.service.generate(receipt.payment_id).await.unwrap();
        let second = f.service.generate(receipt.payment_id).await.unwrap();

        assert_eq!(second, ReceiptOutcome::AlreadyReady);
        assert_eq!(f.store.upload_count(), 1);
    }

    #[tokio::test]
    async fn upload_failure_rolls_back_and_cleans_up() {
        let f = fixture();
        let receipt = seed_receipt(&f).await;
        f.store.set_upload_fails(true);

        let err = f.service.generate(receipt.payment_id).await.unwrap_err();
        assert!(err.is_transient());

        let saved = f.service.get(receipt.id).await.unwrap();
        assert_eq!(saved.pdf_status, PdfStatus::Failed);
        assert_eq!(f.store.deleted_ids().len(), 1);

        // Retry succeeds and keeps the same barcode.
        let barcode = saved.barcode_reference.clone();
        f.store.set_upload_fails(false);
        let outcome = f.service.generate(receipt.payment_id).await.unwrap();
        assert_eq!(outcome, ReceiptOutcome::Generated);
        let after = f.service.get(receipt.id).await.unwrap();
        assert_eq!(after.barcode_reference, barcode);
    }
}
