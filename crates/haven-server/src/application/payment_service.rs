//! Payment Application Service
//!
//! Initiates rent payments against a gateway and settles webhook events.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use haven::domain::{
    DomainError, IdempotencyRecord, PaymentProvider, PaymentStatus, PaymentTransaction,
};
use haven::ports::{
    IdempotencyRepository, JobRepository, PaymentGateway, PaymentRepository, ProfileRepository,
    TenantRepository,
};

use crate::jobs::JobQueue;

/// What the client gets back from initiation: where to send the payer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentInitiation {
    pub payment_id: Uuid,
    pub reference: String,
    pub authorization_url: String,
}

/// How a webhook event was settled. Surfaced for logging and tests; the
/// route answers 200 for every handled outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Reference matched no payment of ours.
    UnknownReference,
    /// Payment already Verified; duplicate delivery, nothing done.
    AlreadyVerified,
    Verified,
    Failed,
}

pub struct PaymentService<Pay, Prof, Ten, Idem, J>
where
    Pay: PaymentRepository,
    Prof: ProfileRepository,
    Ten: TenantRepository,
    Idem: IdempotencyRepository,
    J: JobRepository,
{
    payments: Arc<Pay>,
    profiles: Arc<Prof>,
    tenants: Arc<Ten>,
    idempotency: Arc<Idem>,
    queue: Arc<JobQueue<J>>,
    paystack: Arc<dyn PaymentGateway>,
    flutterwave: Arc<dyn PaymentGateway>,
}

impl<Pay, Prof, Ten, Idem, J> PaymentService<Pay, Prof, Ten, Idem, J>
where
    Pay: PaymentRepository,
    Prof: ProfileRepository,
    Ten: TenantRepository,
    Idem: IdempotencyRepository,
    J: JobRepository,
{
    pub fn new(
        payments: Arc<Pay>,
        profiles: Arc<Prof>,
        tenants: Arc<Ten>,
        idempotency: Arc<Idem>,
        queue: Arc<JobQueue<J>>,
        paystack: Arc<dyn PaymentGateway>,
        flutterwave: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            payments,
            profiles,
            tenants,
            idempotency,
            queue,
            paystack,
            flutterwave,
        }
    }

    fn gateway(&self, provider: PaymentProvider) -> Result<&dyn PaymentGateway, DomainError> {
        match provider {
            PaymentProvider::Paystack => Ok(self.paystack.as_ref()),
            PaymentProvider::Flutterwave => Ok(self.flutterwave.as_ref()),
            PaymentProvider::NoneYet => Err(DomainError::Validation(
                "a payment provider must be chosen".into(),
            )),
        }
    }

    /// Start a rent payment for the tenancy claimed by `user_id`.
    ///
    /// When an idempotency key is supplied, a repeated call with the same
    /// key replays the first call's response instead of charging twice; a
    /// concurrent duplicate still in flight gets a Conflict. A failed
    /// initiation releases the key so the client can retry with it.
    pub async fn initiate_rent_payment(
        &self,
        user_id: Uuid,
        provider: PaymentProvider,
        idempotency_key: Option<String>,
    ) -> Result<PaymentInitiation, DomainError> {
        let Some(key) = idempotency_key else {
            return self.execute_initiation(user_id, provider).await;
        };

        let record = IdempotencyRecord::new(key.clone(), user_id, "payments.initiate".into());
        let (existing, created) = self.idempotency.create_or_get(&record).await?;
        if !created {
            return match existing.response {
                Some(value) => serde_json::from_value(value)
                    .map_err(|e| DomainError::Repository(e.to_string())),
                None => Err(DomainError::Conflict(
                    "a payment with this idempotency key is already in flight".into(),
                )),
            };
        }

        match self.execute_initiation(user_id, provider).await {
            Ok(initiation) => {
                let value = serde_json::to_value(&initiation)
                    .map_err(|e| DomainError::Repository(e.to_string()))?;
                self.idempotency.store_response(&key, user_id, &value).await?;
                Ok(initiation)
            }
            Err(e) => {
                // Nothing was charged, so the key must not stay burned.
                if let Err(del) = self.idempotency.delete(&key, user_id).await {
                    tracing::error!(key = %key, error = %del, "Could not release idempotency key");
                }
                Err(e)
            }
        }
    }

    async fn execute_initiation(
        &self,
        user_id: Uuid,
        provider: PaymentProvider,
    ) -> Result<PaymentInitiation, DomainError> {
        let tenant = self
            .tenants
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Tenant", user_id))?;
        let tenant_user = self
            .profiles
            .find_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        let landlord = self
            .profiles
            .find_user(tenant.landlord_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", tenant.landlord_id))?;

        // Refuse to collect rent the landlord cannot be paid out of.
        let landlord_profile = self
            .profiles
            .find_profile_by_user(tenant.landlord_id)
            .await?
            .ok_or_else(|| {
                DomainError::Validation("landlord has no payout profile on record".into())
            })?;
        match provider {
            PaymentProvider::Paystack if landlord_profile.paystack_recipient_code.is_none() => {
                return Err(DomainError::Validation(
                    "landlord has no Paystack transfer recipient yet".into(),
                ));
            }
            PaymentProvider::Flutterwave
                if landlord_profile.flutterwave_bank_code.is_none()
                    || landlord_profile.account_number.is_none() =>
            {
                return Err(DomainError::Validation(
                    "landlord has no Flutterwave bank account on record".into(),
                ));
            }
            _ => {}
        }

        let mut payment = PaymentTransaction::new(
            tenant.id,
            tenant.landlord_id,
            tenant.property_id,
            tenant.rent_amount_kobo,
            "NGN".into(),
            tenant_user.email.clone(),
            tenant_user.full_name(),
            landlord.email.clone(),
            landlord.full_name(),
        );
        payment.tenant_phone = tenant_user.phone_number.clone();
        payment.landlord_phone = landlord.phone_number.clone();
        payment.provider = provider;

        let reference = payment.new_reference();
        let gateway = self.gateway(provider)?;
        let initialized = gateway
            .initialize_payment(&payment.tenant_email, payment.amount_kobo, &reference)
            .await?;

        // The gateway's reference wins; Flutterwave issues its own tx_ref.
        payment.provider_reference = Some(initialized.reference.clone());
        let saved = self.payments.save(&payment).await?;

        tracing::info!(
            payment_id = %saved.id,
            provider = provider.as_str(),
            amount_kobo = saved.amount_kobo,
            "Initiated rent payment"
        );

        Ok(PaymentInitiation {
            payment_id: saved.id,
            reference: initialized.reference,
            authorization_url: initialized.authorization_url,
        })
    }

    /// Settle a gateway webhook for a charge event. The route has already
    /// checked the signature and filtered to success events.
    pub async fn process_webhook(
        &self,
        provider: PaymentProvider,
        reference: &str,
    ) -> Result<WebhookOutcome, DomainError> {
        let Some(payment) = self.payments.find_by_reference(reference).await? else {
            tracing::warn!(reference, "Webhook for unknown payment reference");
            return Ok(WebhookOutcome::UnknownReference);
        };

        if payment.status == PaymentStatus::Verified {
            tracing::info!(payment_id = %payment.id, "Duplicate webhook, already verified");
            return Ok(WebhookOutcome::AlreadyVerified);
        }

        let gateway = self.gateway(provider)?;
        let verification = gateway.verify_payment(reference).await?;

        if !verification.success || verification.amount_kobo != payment.amount_kobo {
            self.payments
                .update_status_provider(payment.id, PaymentStatus::Failed, provider)
                .await?;
            tracing::warn!(
                payment_id = %payment.id,
                expected = payment.amount_kobo,
                got = verification.amount_kobo,
                "Payment verification failed"
            );
            return Ok(WebhookOutcome::Failed);
        }

        self.payments
            .update_status_provider(payment.id, PaymentStatus::Verified, provider)
            .await?;

        self.queue.notify_rent_paid(payment.id).await?;
        self.queue.payout_landlord(payment.id).await?;

        tracing::info!(payment_id = %payment.id, "Payment verified");
        Ok(WebhookOutcome::Verified)
    }

    pub async fn get(&self, payment_id: Uuid) -> Result<PaymentTransaction, DomainError> {
        self.payments
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("PaymentTransaction", payment_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::*;
    use haven::domain::{RentCycle, Tenant, User, UserProfile, UserRole, VerificationStatus};

    struct Fixture {
        payments: Arc<FakePaymentRepository>,
        profiles: Arc<FakeProfileRepository>,
        tenants: Arc<FakeTenantRepository>,
        jobs: Arc<FakeJobRepository>,
        gateway: Arc<FakeGateway>,
        service: PaymentService<
            FakePaymentRepository,
            FakeProfileRepository,
            FakeTenantRepository,
            FakeIdempotencyRepository,
            FakeJobRepository,
        >,
        user_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let payments = Arc::new(FakePaymentRepository::default());
        let profiles = Arc::new(FakeProfileRepository::default());
        let tenants = Arc::new(FakeTenantRepository::default());
        let idempotency = Arc::new(FakeIdempotencyRepository::default());
        let jobs = Arc::new(FakeJobRepository::default());
        let gateway = Arc::new(FakeGateway::default());

        let tenant_user = User::new(
            "ada@example.com".into(),
            "Ada".into(),
            "Obi".into(),
            UserRole::Tenant,
        );
        let landlord = User::new(
            "bayo@example.com".into(),
            "Bayo".into(),
            "Ade".into(),
            UserRole::Landlord,
        );
        let user_id = tenant_user.id;

        // Landlord is ready for Paystack payouts but has no Flutterwave
        // bank code yet.
        let mut landlord_profile = UserProfile::new(landlord.id);
        landlord_profile.account_number = Some("0123456789".into());
        landlord_profile.paystack_bank_code = Some("058".into());
        landlord_profile.paystack_account_name = Some("BAYO ADE".into());
        landlord_profile.paystack_account_status = VerificationStatus::Verified;
        landlord_profile.paystack_recipient_code = Some("RCP_1".into());

        let mut tenancy = Tenant::new(
            Uuid::new_v4(),
            landlord.id,
            50_000_00,
            RentCycle::Yearly,
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        tenancy.matched_user_id = Some(user_id);

        profiles.insert_user(tenant_user);
        profiles.insert_user(landlord);
        profiles.insert_profile(landlord_profile);
        tenants.save(&tenancy).await.unwrap();

        let service = PaymentService::new(
            payments.clone(),
            profiles.clone(),
            tenants.clone(),
            idempotency,
            Arc::new(JobQueue::new(jobs.clone())),
            gateway.clone(),
            gateway.clone(),
        );

        Fixture {
            payments,
            profiles,
            tenants,
            jobs,
            gateway,
            service,
            user_id,
        }
    }

    #[tokio::test]
    async fn initiation_is_idempotent_per_key() {
        let f = fixture().await;

        let first = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, Some("k1".into()))
            .await
            .unwrap();
        let second = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, Some("k1".into()))
            .await
            .unwrap();

        assert_eq!(first.payment_id, second.payment_id);
        assert_eq!(first.reference, second.reference);
        assert_eq!(f.gateway.initialize_calls(), 1, "gateway charged once");
    }

    #[tokio::test]
    async fn different_keys_charge_separately() {
        let f = fixture().await;

        let first = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, Some("k1".into()))
            .await
            .unwrap();
        let second = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, Some("k2".into()))
            .await
            .unwrap();

        assert_ne!(first.payment_id, second.payment_id);
        assert_eq!(f.gateway.initialize_calls(), 2);
    }

    #[tokio::test]
    async fn initiation_requires_landlord_payout_profile() {
        let f = fixture().await;

        let other_tenant = User::new(
            "ngozi@example.com".into(),
            "Ngozi".into(),
            "Eze".into(),
            UserRole::Tenant,
        );
        let bare_landlord = User::new(
            "chike@example.com".into(),
            "Chike".into(),
            "Okafor".into(),
            UserRole::Landlord,
        );
        let mut tenancy = Tenant::new(
            Uuid::new_v4(),
            bare_landlord.id,
            30_000_00,
            RentCycle::Yearly,
            chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        tenancy.matched_user_id = Some(other_tenant.id);
        let other_user_id = other_tenant.id;
        f.profiles.insert_user(other_tenant);
        f.profiles.insert_user(bare_landlord);
        f.tenants.save(&tenancy).await.unwrap();

        let err = f
            .service
            .initiate_rent_payment(other_user_id, PaymentProvider::Paystack, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(f.gateway.initialize_calls(), 0, "tenant never charged");
    }

    #[tokio::test]
    async fn flutterwave_initiation_requires_bank_code() {
        let f = fixture().await;

        // Fixture landlord is Paystack-ready only.
        let err = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Flutterwave, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        f.service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_initiation_releases_the_key() {
        let f = fixture().await;
        f.gateway.set_initialize_failure(true);

        let err = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, Some("k1".into()))
            .await
            .unwrap_err();
        assert!(err.is_transient());

        f.gateway.set_initialize_failure(false);
        let retried = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, Some("k1".into()))
            .await
            .unwrap();
        assert_eq!(f.gateway.initialize_calls(), 2, "retry re-executed");

        // And the successful response is what later replays return.
        let replayed = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, Some("k1".into()))
            .await
            .unwrap();
        assert_eq!(replayed.payment_id, retried.payment_id);
        assert_eq!(f.gateway.initialize_calls(), 2);
    }

    #[tokio::test]
    async fn webhook_verifies_and_enqueues_followups() {
        let f = fixture().await;
        let init = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, None)
            .await
            .unwrap();
        f.gateway.set_verify_success(50_000_00);

        let outcome = f
            .service
            .process_webhook(PaymentProvider::Paystack, &init.reference)
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::Verified);

        let payment = f.service.get(init.payment_id).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Verified);
        assert_eq!(f.jobs.queued_kinds().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_webhook_is_a_noop() {
        let f = fixture().await;
        let init = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, None)
            .await
            .unwrap();
        f.gateway.set_verify_success(50_000_00);

        f.service
            .process_webhook(PaymentProvider::Paystack, &init.reference)
            .await
            .unwrap();
        let second = f
            .service
            .process_webhook(PaymentProvider::Paystack, &init.reference)
            .await
            .unwrap();

        assert_eq!(second, WebhookOutcome::AlreadyVerified);
        assert_eq!(f.gateway.verify_calls(), 1, "no second provider verify");
        assert_eq!(f.jobs.queued_kinds().len(), 2, "no duplicate jobs");
    }

    #[tokio::test]
    async fn amount_mismatch_marks_failed() {
        let f = fixture().await;
        let init = f
            .service
            .initiate_rent_payment(f.user_id, PaymentProvider::Paystack, None)
            .await
            .unwrap();
        f.gateway.set_verify_success(1_00);

        let outcome = f
            .service
            .process_webhook(PaymentProvider::Paystack, &init.reference)
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::Failed);

        let payment = f.payments.find_by_id(init.payment_id).await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn unknown_reference_is_ignored() {
        let f = fixture().await;
        let outcome = f
            .service
            .process_webhook(PaymentProvider::Paystack, "PMT-nope")
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::UnknownReference);
    }
}
