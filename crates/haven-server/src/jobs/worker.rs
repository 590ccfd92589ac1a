//! Background job worker.
//!
//! Polls the queue, dispatches by job kind, and settles each attempt:
//! success marks the row Succeeded, a transient error reschedules with
//! exponential backoff until the attempt budget runs out, and everything
//! else goes to Dead for manual attention.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use uuid::Uuid;

use haven::domain::{DomainError, IdentityProvider, Job, JobKind, RetryPolicy};
use haven::ports::{
    BankRepository, JobRepository, PaymentRepository, ProfileRepository, PropertyRepository,
    ReceiptRepository, TenantRepository,
};

use crate::application::{
    BankService, IdentityKind, NotificationService, PayoutService, PropertyService,
    ReceiptService, VerificationService,
};

/// Worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub poll_interval: Duration,
    pub batch_size: i64,
    pub retry: RetryPolicy,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            batch_size: 10,
            retry: RetryPolicy::default(),
        }
    }
}

pub struct JobWorker<Pay, Prof, Ten, Rec, B, P, J>
where
    Pay: PaymentRepository,
    Prof: ProfileRepository,
    Ten: TenantRepository,
    Rec: ReceiptRepository,
    B: BankRepository,
    P: PropertyRepository,
    J: JobRepository,
{
    jobs: Arc<J>,
    payouts: Arc<PayoutService<Pay, Prof, Ten, Rec, J>>,
    receipts: Arc<ReceiptService<Rec>>,
    verification: Arc<VerificationService<Prof, J>>,
    properties: Arc<PropertyService<P, J>>,
    banks: Arc<BankService<B, Prof, J>>,
    notifications: Arc<NotificationService<Pay>>,
    config: WorkerConfig,
}

#[allow(clippy::too_many_arguments)]
impl<Pay, Prof, Ten, Rec, B, P, J> JobWorker<Pay, Prof, Ten, Rec, B, P, J>
where
    Pay: PaymentRepository + 'static,
    Prof: ProfileRepository + 'static,
    Ten: TenantRepository + 'static,
    Rec: ReceiptRepository + 'static,
    B: BankRepository + 'static,
    P: PropertyRepository + 'static,
    J: JobRepository + 'static,
{
    pub fn new(
        jobs: Arc<J>,
        payouts: Arc<PayoutService<Pay, Prof, Ten, Rec, J>>,
        receipts: Arc<ReceiptService<Rec>>,
        verification: Arc<VerificationService<Prof, J>>,
        properties: Arc<PropertyService<P, J>>,
        banks: Arc<BankService<B, Prof, J>>,
        notifications: Arc<NotificationService<Pay>>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            jobs,
            payouts,
            receipts,
            verification,
            properties,
            banks,
            notifications,
            config,
        }
    }

    /// Start the worker loop in the background.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                "⚙️  Job worker started (poll: {:?}, batch: {})",
                self.config.poll_interval,
                self.config.batch_size
            );
            let mut ticker = interval(self.config.poll_interval);
            loop {
                ticker.tick().await;
                if let Err(e) = self.poll_once().await {
                    tracing::error!(error = %e, "Job poll failed");
                }
            }
        })
    }

    /// Claim and run one batch of due jobs.
    pub async fn poll_once(&self) -> Result<usize, DomainError> {
        let claimed = self.jobs.claim_due(self.config.batch_size).await?;
        let count = claimed.len();
        for job in claimed {
            self.handle(job).await;
        }
        Ok(count)
    }

    async fn handle(&self, job: Job) {
        let kind = job.kind.as_str();
        match self.dispatch(&job).await {
            Ok(()) => {
                if let Err(e) = self.jobs.mark_succeeded(job.id).await {
                    tracing::error!(job_id = %job.id, error = %e, "Could not mark job succeeded");
                }
                tracing::debug!(job_id = %job.id, kind, "Job succeeded");
            }
            Err(e) if e.is_transient() && job.can_retry() => {
                let run_at = Utc::now() + self.config.retry.delay_for(job.attempts);
                tracing::warn!(
                    job_id = %job.id,
                    kind,
                    attempt = job.attempts,
                    error = %e,
                    "Job failed, rescheduling"
                );
                if let Err(e) = self.jobs.reschedule(job.id, run_at, &e.to_string()).await {
                    tracing::error!(job_id = %job.id, error = %e, "Could not reschedule job");
                }
            }
            Err(e) => {
                tracing::error!(job_id = %job.id, kind, error = %e, "Job dead");
                if let Err(e) = self.jobs.mark_dead(job.id, &e.to_string()).await {
                    tracing::error!(job_id = %job.id, error = %e, "Could not mark job dead");
                }
            }
        }
    }

    async fn dispatch(&self, job: &Job) -> Result<(), DomainError> {
        match job.kind {
            JobKind::PayoutLandlord => {
                self.payouts
                    .run_payout(uuid_arg(job, "payment_id")?)
                    .await?;
            }
            JobKind::GenerateReceipt => {
                self.receipts
                    .generate(uuid_arg(job, "payment_id")?)
                    .await?;
            }
            JobKind::EnsureRecipientCode => {
                self.payouts
                    .ensure_recipient(uuid_arg(job, "profile_id")?)
                    .await?;
            }
            JobKind::VerifyBvn => {
                self.verification
                    .run_verification(
                        uuid_arg(job, "profile_id")?,
                        IdentityKind::Bvn,
                        str_arg(job, "number")?,
                        provider_arg(job),
                    )
                    .await?;
            }
            JobKind::VerifyNin => {
                self.verification
                    .run_verification(
                        uuid_arg(job, "profile_id")?,
                        IdentityKind::Nin,
                        str_arg(job, "number")?,
                        provider_arg(job),
                    )
                    .await?;
            }
            JobKind::HashPropertyImage => {
                self.properties
                    .hash_image(uuid_arg(job, "image_id")?)
                    .await?;
            }
            JobKind::SyncBanks => {
                self.banks.sync().await?;
            }
            JobKind::NotifyRentPaid => {
                self.notifications
                    .rent_paid(uuid_arg(job, "payment_id")?)
                    .await?;
            }
        }
        Ok(())
    }
}

fn uuid_arg(job: &Job, key: &str) -> Result<Uuid, DomainError> {
    job.args
        .get(key)
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| {
            DomainError::Validation(format!("job {} missing uuid arg {key}", job.kind.as_str()))
        })
}

fn str_arg<'a>(job: &'a Job, key: &str) -> Result<&'a str, DomainError> {
    job.args.get(key).and_then(|v| v.as_str()).ok_or_else(|| {
        DomainError::Validation(format!("job {} missing arg {key}", job.kind.as_str()))
    })
}

fn provider_arg(job: &Job) -> Option<IdentityProvider> {
    job.args
        .get("provider")
        .and_then(|v| v.as_str())
        .map(IdentityProvider::parse)
        .filter(|p| *p != IdentityProvider::NoneYet)
}
