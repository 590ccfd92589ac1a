//! Payout Application Service
//!
//! Moves collected rent to the landlord once a payment verifies, and keeps
//! the Paystack transfer recipient in place. Both entry points run as
//! background jobs and are written to survive redelivery: the unique
//! payout row and the status guards make a retried job pick up where the
//! last attempt stopped instead of paying twice.

use std::sync::Arc;
use uuid::Uuid;

use haven::domain::{
    DomainError, LandlordPayout, LedgerEvent, PaymentStatus, PayoutStatus, RentLedgerEntry,
    RentReceipt,
};
use haven::ports::{
    JobRepository, PaymentGateway, PaymentRepository, PayoutDestination, ProfileRepository,
    ReceiptRepository, TenantRepository,
};

use crate::jobs::JobQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutOutcome {
    /// Payment not Verified; nothing to pay out.
    SkippedUnverified,
    /// A previous attempt already completed the transfer.
    AlreadyCompleted,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientOutcome {
    /// Preconditions not met (code exists, account unverified or
    /// incomplete); skipping is the correct terminal state.
    Skipped,
    Created,
}

pub struct PayoutService<Pay, Prof, Ten, Rec, J>
where
    Pay: PaymentRepository,
    Prof: ProfileRepository,
    Ten: TenantRepository,
    Rec: ReceiptRepository,
    J: JobRepository,
{
    payments: Arc<Pay>,
    profiles: Arc<Prof>,
    tenants: Arc<Ten>,
    receipts: Arc<Rec>,
    queue: Arc<JobQueue<J>>,
    paystack: Arc<dyn PaymentGateway>,
}

impl<Pay, Prof, Ten, Rec, J> PayoutService<Pay, Prof, Ten, Rec, J>
where
    Pay: PaymentRepository,
    Prof: ProfileRepository,
    Ten: TenantRepository,
    Rec: ReceiptRepository,
    J: JobRepository,
{
    pub fn new(
        payments: Arc<Pay>,
        profiles: Arc<Prof>,
        tenants: Arc<Ten>,
        receipts: Arc<Rec>,
        queue: Arc<JobQueue<J>>,
        paystack: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            payments,
            profiles,
            tenants,
            receipts,
            queue,
            paystack,
        }
    }

    /// Job handler for `payout.landlord`.
    pub async fn run_payout(&self, payment_id: Uuid) -> Result<PayoutOutcome, DomainError> {
        let payment = self
            .payments
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("PaymentTransaction", payment_id))?;

        if payment.status != PaymentStatus::Verified {
            tracing::warn!(payment_id = %payment.id, "Payout requested for unverified payment");
            return Ok(PayoutOutcome::SkippedUnverified);
        }

        let profile = self
            .profiles
            .find_profile_by_user(payment.landlord_id)
            .await?
            .ok_or_else(|| DomainError::not_found("UserProfile", payment.landlord_id))?;

        if !profile.account_verified() {
            return Err(DomainError::Validation(
                "landlord payout account is not verified".into(),
            ));
        }

        let Some(recipient_code) = profile.paystack_recipient_code.clone() else {
            // Kick off recipient creation and let the retry pick it up.
            self.queue.ensure_recipient_code(profile.id).await?;
            return Err(DomainError::ExternalService {
                message: "landlord transfer recipient not ready".into(),
                retryable: true,
            });
        };

        let payout = self
            .payments
            .create_or_get_payout(&LandlordPayout::new(
                payment.id,
                payment.landlord_id,
                payment.amount_kobo,
            ))
            .await?;

        if payout.status == PayoutStatus::Completed {
            tracing::info!(payout_id = %payout.id, "Payout already completed");
            return Ok(PayoutOutcome::AlreadyCompleted);
        }

        self.payments
            .update_payout_status(payout.id, PayoutStatus::Processing)
            .await?;

        let reference = format!("PAYOUT-{}", payout.id.simple());
        let transfer = self
            .paystack
            .transfer(
                payout.amount_kobo,
                &PayoutDestination::Recipient(recipient_code),
                &reference,
                "Rent payout",
            )
            .await;

        let receipt = match transfer {
            Ok(receipt) => receipt,
            Err(e) => {
                self.payments
                    .update_payout_status(payout.id, PayoutStatus::Failed)
                    .await?;
                tracing::error!(payout_id = %payout.id, error = %e, "Transfer failed");
                return Err(e);
            }
        };

        self.payments
            .set_payout_reference(payout.id, &receipt.reference)
            .await?;
        self.payments
            .update_payout_status(payout.id, PayoutStatus::Completed)
            .await?;

        self.settle_tenancy(&payment).await?;

        self.receipts
            .create_or_get(&RentReceipt::new(
                payment.id,
                payment.tenant_id,
                payment.landlord_id,
                payment.amount_kobo,
                payment.currency.clone(),
            ))
            .await?;
        self.queue.generate_receipt(payment.id).await?;

        tracing::info!(payout_id = %payout.id, payment_id = %payment.id, "Payout completed");
        Ok(PayoutOutcome::Completed)
    }

    /// Roll the tenancy forward one cycle and record it.
    async fn settle_tenancy(
        &self,
        payment: &haven::domain::PaymentTransaction,
    ) -> Result<(), DomainError> {
        let Some(mut tenant) = self.tenants.find_by_id(payment.tenant_id).await? else {
            tracing::warn!(tenant_id = %payment.tenant_id, "Tenancy missing during payout");
            return Ok(());
        };

        let old_start = tenant.rent_start_date;
        let (old_expiry, new_expiry) = tenant.renew();
        tenant.is_active = true;
        self.tenants.save(&tenant).await?;

        self.tenants
            .append_ledger(&RentLedgerEntry::new(
                tenant.id,
                LedgerEvent::RentRenewed,
                serde_json::json!({ "start": old_start, "expiry": old_expiry }),
                serde_json::json!({ "start": old_expiry, "expiry": new_expiry }),
            ))
            .await?;

        Ok(())
    }

    /// Job handler for `recipient.ensure`.
    pub async fn ensure_recipient(
        &self,
        profile_id: Uuid,
    ) -> Result<RecipientOutcome, DomainError> {
        let profile = self
            .profiles
            .find_profile(profile_id)
            .await?
            .ok_or_else(|| DomainError::not_found("UserProfile", profile_id))?;

        if !profile.needs_recipient_code() {
            tracing::debug!(profile_id = %profile.id, "Recipient code not needed");
            return Ok(RecipientOutcome::Skipped);
        }

        // needs_recipient_code guarantees these are present.
        let name = profile.paystack_account_name.clone().unwrap_or_default();
        let account_number = profile.account_number.clone().unwrap_or_default();
        let bank_code = profile.paystack_bank_code.clone().unwrap_or_default();

        let code = self
            .paystack
            .create_transfer_recipient(&name, &account_number, &bank_code)
            .await?;
        self.profiles.set_recipient_code(profile.id, code).await?;

        tracing::info!(profile_id = %profile.id, "Transfer recipient created");
        Ok(RecipientOutcome::Created)
    }
}
