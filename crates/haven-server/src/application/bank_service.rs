//! Bank Directory Application Service
//!
//! Maintains the gateway-joined bank directory and resolves payout
//! accounts. Both gateways list the same banks under slightly different
//! names; rows are joined on the canonical name so one directory entry
//! carries both codes.

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use haven::domain::{canonical_bank_name, Bank, DomainError, UserProfile, VerificationStatus};
use haven::domain::PaymentProvider;
use haven::ports::{
    BankRepository, JobRepository, PaymentGateway, ProfileRepository, ResolvedAccount,
};

use crate::jobs::JobQueue;

pub struct BankService<B, Prof, J>
where
    B: BankRepository,
    Prof: ProfileRepository,
    J: JobRepository,
{
    banks: Arc<B>,
    profiles: Arc<Prof>,
    queue: Arc<JobQueue<J>>,
    paystack: Arc<dyn PaymentGateway>,
    flutterwave: Arc<dyn PaymentGateway>,
}

impl<B, Prof, J> BankService<B, Prof, J>
where
    B: BankRepository,
    Prof: ProfileRepository,
    J: JobRepository,
{
    pub fn new(
        banks: Arc<B>,
        profiles: Arc<Prof>,
        queue: Arc<JobQueue<J>>,
        paystack: Arc<dyn PaymentGateway>,
        flutterwave: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            banks,
            profiles,
            queue,
            paystack,
            flutterwave,
        }
    }

    /// Job handler for `banks.sync`. Returns the number of rows upserted.
    pub async fn sync(&self) -> Result<usize, DomainError> {
        let paystack_banks = self.paystack.list_banks().await?;
        let flutterwave_banks = self.flutterwave.list_banks().await?;

        let mut joined: HashMap<String, Bank> = HashMap::new();
        for listed in paystack_banks {
            let bank = Bank::new(listed.name, Some(listed.code), None);
            joined.insert(bank.canonical_name.clone(), bank);
        }
        for listed in flutterwave_banks {
            let canonical = canonical_bank_name(&listed.name);
            match joined.get_mut(&canonical) {
                Some(bank) => bank.flutterwave_code = Some(listed.code),
                None => {
                    let bank = Bank::new(listed.name, None, Some(listed.code));
                    joined.insert(bank.canonical_name.clone(), bank);
                }
            }
        }

        let count = joined.len();
        for bank in joined.values() {
            self.banks.upsert(bank).await?;
        }

        tracing::info!(count, "Bank directory synced");
        Ok(count)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Bank>, DomainError> {
        self.banks.list(limit, offset).await
    }

    /// Resolve a payout account against Paystack and record the outcome
    /// on the user's profile. A successful resolution queues recipient
    /// creation so payouts are ready before the first payment lands.
    pub async fn resolve_account(
        &self,
        user_id: Uuid,
        account_number: &str,
        bank_code: &str,
    ) -> Result<ResolvedAccount, DomainError> {
        let mut profile = match self.profiles.find_profile_by_user(user_id).await? {
            Some(profile) => profile,
            None => UserProfile::new(user_id),
        };
        profile.account_number = Some(account_number.to_string());
        profile.paystack_bank_code = Some(bank_code.to_string());
        let profile = self.profiles.save_profile(&profile).await?;

        let resolved = match self.paystack.resolve_account(account_number, bank_code).await {
            Ok(resolved) => resolved,
            Err(e) => {
                if !e.is_transient() {
                    self.profiles
                        .set_account_resolution(
                            profile.id,
                            PaymentProvider::Paystack,
                            None,
                            VerificationStatus::Failed,
                        )
                        .await?;
                }
                return Err(e);
            }
        };

        self.profiles
            .set_account_resolution(
                profile.id,
                PaymentProvider::Paystack,
                Some(resolved.account_name.clone()),
                VerificationStatus::Verified,
            )
            .await?;
        self.queue.ensure_recipient_code(profile.id).await?;

        tracing::info!(profile_id = %profile.id, "Payout account resolved");
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::*;
    use haven::domain::JobKind;
    use haven::ports::GatewayBank;

    struct Fixture {
        banks: Arc<FakeBankRepository>,
        profiles: Arc<FakeProfileRepository>,
        jobs: Arc<FakeJobRepository>,
        paystack: Arc<FakeGateway>,
        flutterwave: Arc<FakeGateway>,
        service: BankService<FakeBankRepository, FakeProfileRepository, FakeJobRepository>,
    }

    fn fixture() -> Fixture {
        let banks = Arc::new(FakeBankRepository::default());
        let profiles = Arc::new(FakeProfileRepository::default());
        let jobs = Arc::new(FakeJobRepository::default());
        let paystack = Arc::new(FakeGateway::default());
        let flutterwave = Arc::new(FakeGateway::default());

        let service = BankService::new(
            banks.clone(),
            profiles.clone(),
            Arc::new(JobQueue::new(jobs.clone())),
            paystack.clone(),
            flutterwave.clone(),
        );

        Fixture {
            banks,
            profiles,
            jobs,
            paystack,
            flutterwave,
            service,
        }
    }

    #[tokio::test]
    async fn sync_joins_gateways_on_canonical_name() {
        let f = fixture();
        f.paystack.set_banks(vec![
            GatewayBank {
                name: "Zenith Bank Plc".into(),
                code: "057".into(),
            },
            GatewayBank {
                name: "Guaranty Trust Bank".into(),
                code: "058".into(),
            },
        ]);
        f.flutterwave.set_banks(vec![
            GatewayBank {
                name: "ZENITH BANK".into(),
                code: "044".into(),
            },
            GatewayBank {
                name: "Access Bank".into(),
                code: "063".into(),
            },
        ]);

        let count = f.service.sync().await.unwrap();
        assert_eq!(count, 3);

        let zenith = f
            .banks
            .find_by_canonical(&canonical_bank_name("Zenith Bank"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(zenith.paystack_code.as_deref(), Some("057"));
        assert_eq!(zenith.flutterwave_code.as_deref(), Some("044"));

        let access = f
            .banks
            .find_by_canonical(&canonical_bank_name("Access Bank"))
            .await
            .unwrap()
            .unwrap();
        assert!(access.paystack_code.is_none());
    }

    #[tokio::test]
    async fn resync_preserves_codes_learned_earlier() {
        let f = fixture();
        f.paystack.set_banks(vec![GatewayBank {
            name: "Zenith Bank".into(),
            code: "057".into(),
        }]);
        f.flutterwave.set_banks(vec![GatewayBank {
            name: "Zenith Bank Plc".into(),
            code: "044".into(),
        }]);
        f.service.sync().await.unwrap();

        // Next pass only sees the bank on one gateway.
        f.flutterwave.set_banks(vec![]);
        f.service.sync().await.unwrap();

        let zenith = f
            .banks
            .find_by_canonical(&canonical_bank_name("Zenith Bank"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(zenith.flutterwave_code.as_deref(), Some("044"));
    }

    #[tokio::test]
    async fn resolution_stores_name_and_queues_recipient() {
        let f = fixture();
        f.paystack.set_resolve_name("ADA OBI");
        let user_id = Uuid::new_v4();

        let resolved = f
            .service
            .resolve_account(user_id, "0123456789", "058")
            .await
            .unwrap();
        assert_eq!(resolved.account_name, "ADA OBI");

        let profile = f
            .profiles
            .find_profile_by_user(user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            profile.paystack_account_status,
            VerificationStatus::Verified
        );
        assert_eq!(profile.paystack_account_name.as_deref(), Some("ADA OBI"));
        assert!(f.jobs.queued_kinds().contains(&JobKind::EnsureRecipientCode));
    }

    #[tokio::test]
    async fn rejected_resolution_marks_failed() {
        let f = fixture();
        let user_id = Uuid::new_v4();

        let err = f
            .service
            .resolve_account(user_id, "0000000000", "058")
            .await
            .unwrap_err();
        assert!(!err.is_transient());

        let profile = f
            .profiles
            .find_profile_by_user(user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.paystack_account_status, VerificationStatus::Failed);
        assert!(f.jobs.queued_kinds().is_empty());
    }
}
