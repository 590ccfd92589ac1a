//! Typed enqueue helpers over the job repository.
//!
//! Dedup keys keep one live job per subject: re-enqueueing a payout for a
//! payment that already has one queued or running is a silent no-op.

use std::sync::Arc;
use uuid::Uuid;

use haven::domain::{DomainError, IdentityProvider, Job, JobKind};
use haven::ports::JobRepository;

pub struct JobQueue<J: JobRepository> {
    repo: Arc<J>,
}

impl<J: JobRepository> JobQueue<J> {
    pub fn new(repo: Arc<J>) -> Self {
        Self { repo }
    }

    async fn push(&self, job: Job) -> Result<bool, DomainError> {
        let enqueued = self.repo.enqueue(&job).await?;
        if enqueued {
            tracing::info!(kind = job.kind.as_str(), job_id = %job.id, "Enqueued job");
        } else {
            tracing::debug!(
                kind = job.kind.as_str(),
                dedup_key = job.dedup_key.as_deref(),
                "Skipped enqueue, live job exists"
            );
        }
        Ok(enqueued)
    }

    pub async fn payout_landlord(&self, payment_id: Uuid) -> Result<bool, DomainError> {
        self.push(
            Job::new(
                JobKind::PayoutLandlord,
                serde_json::json!({ "payment_id": payment_id }),
            )
            .with_dedup_key(format!("payout:{payment_id}")),
        )
        .await
    }

    pub async fn generate_receipt(&self, payment_id: Uuid) -> Result<bool, DomainError> {
        self.push(
            Job::new(
                JobKind::GenerateReceipt,
                serde_json::json!({ "payment_id": payment_id }),
            )
            .with_dedup_key(format!("receipt:{payment_id}")),
        )
        .await
    }

    pub async fn ensure_recipient_code(&self, profile_id: Uuid) -> Result<bool, DomainError> {
        self.push(
            Job::new(
                JobKind::EnsureRecipientCode,
                serde_json::json!({ "profile_id": profile_id }),
            )
            .with_dedup_key(format!("recipient:{profile_id}")),
        )
        .await
    }

    pub async fn verify_bvn(
        &self,
        profile_id: Uuid,
        bvn: &str,
        provider: Option<IdentityProvider>,
    ) -> Result<bool, DomainError> {
        self.push(
            Job::new(
                JobKind::VerifyBvn,
                identity_args(profile_id, bvn, provider),
            )
            .with_dedup_key(format!("bvn:{profile_id}")),
        )
        .await
    }

    pub async fn verify_nin(
        &self,
        profile_id: Uuid,
        nin: &str,
        provider: Option<IdentityProvider>,
    ) -> Result<bool, DomainError> {
        self.push(
            Job::new(
                JobKind::VerifyNin,
                identity_args(profile_id, nin, provider),
            )
            .with_dedup_key(format!("nin:{profile_id}")),
        )
        .await
    }

    pub async fn hash_property_image(&self, image_id: Uuid) -> Result<bool, DomainError> {
        self.push(
            Job::new(
                JobKind::HashPropertyImage,
                serde_json::json!({ "image_id": image_id }),
            )
            .with_dedup_key(format!("image:{image_id}")),
        )
        .await
    }

    pub async fn sync_banks(&self) -> Result<bool, DomainError> {
        self.push(
            Job::new(JobKind::SyncBanks, serde_json::json!({}))
                .with_dedup_key("banks:sync".to_string()),
        )
        .await
    }

    pub async fn notify_rent_paid(&self, payment_id: Uuid) -> Result<bool, DomainError> {
        self.push(
            Job::new(
                JobKind::NotifyRentPaid,
                serde_json::json!({ "payment_id": payment_id }),
            )
            .with_dedup_key(format!("notify:{payment_id}")),
        )
        .await
    }
}

fn identity_args(
    profile_id: Uuid,
    number: &str,
    provider: Option<IdentityProvider>,
) -> serde_json::Value {
    match provider {
        Some(p) => serde_json::json!({
            "profile_id": profile_id,
            "number": number,
            "provider": p.as_str(),
        }),
        None => serde_json::json!({ "profile_id": profile_id, "number": number }),
    }
}
