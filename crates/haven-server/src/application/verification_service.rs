//! Identity Verification Application Service
//!
//! BVN/NIN checks against the KYC providers. Lookups run as background
//! jobs; providers are tried in order and a provider outage falls through
//! to the next one. A definitive negative answer or a name mismatch is
//! terminal, never retried.

use std::sync::Arc;
use uuid::Uuid;

use haven::domain::{DomainError, IdentityProvider, VerificationStatus};
use haven::ports::{IdentityVerifier, JobRepository, ProfileRepository};

use crate::jobs::JobQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    Bvn,
    Nin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    AlreadyVerified,
    Verified,
    Rejected,
}

pub struct VerificationService<Prof, J>
where
    Prof: ProfileRepository,
    J: JobRepository,
{
    profiles: Arc<Prof>,
    queue: Arc<JobQueue<J>>,
    verifiers: Vec<Arc<dyn IdentityVerifier>>,
}

impl<Prof, J> VerificationService<Prof, J>
where
    Prof: ProfileRepository,
    J: JobRepository,
{
    pub fn new(
        profiles: Arc<Prof>,
        queue: Arc<JobQueue<J>>,
        verifiers: Vec<Arc<dyn IdentityVerifier>>,
    ) -> Self {
        Self {
            profiles,
            queue,
            verifiers,
        }
    }

    /// Validate the number and enqueue the lookup. An already-verified
    /// identity is a Conflict, not a re-check. A chosen provider rides
    /// along in the job args and is tried first.
    pub async fn request(
        &self,
        user_id: Uuid,
        kind: IdentityKind,
        number: &str,
        provider: Option<IdentityProvider>,
    ) -> Result<(), DomainError> {
        if number.len() != 11 || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(
                "identity number must be exactly 11 digits".into(),
            ));
        }

        let profile = self
            .profiles
            .find_profile_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("UserProfile", user_id))?;

        let current = match kind {
            IdentityKind::Bvn => profile.bvn_status,
            IdentityKind::Nin => profile.nin_status,
        };
        if current == VerificationStatus::Verified {
            return Err(DomainError::Conflict(match kind {
                IdentityKind::Bvn => "BVN is already verified".into(),
                IdentityKind::Nin => "NIN is already verified".into(),
            }));
        }

        let provider = provider.filter(|p| *p != IdentityProvider::NoneYet);
        match kind {
            IdentityKind::Bvn => self.queue.verify_bvn(profile.id, number, provider).await?,
            IdentityKind::Nin => self.queue.verify_nin(profile.id, number, provider).await?,
        };
        Ok(())
    }

    /// Job handler for `identity.verify_bvn` / `identity.verify_nin`.
    /// A preferred provider jumps the queue; the rest stay as fallback.
    pub async fn run_verification(
        &self,
        profile_id: Uuid,
        kind: IdentityKind,
        number: &str,
        preferred: Option<IdentityProvider>,
    ) -> Result<VerificationOutcome, DomainError> {
        let profile = self
            .profiles
            .find_profile(profile_id)
            .await?
            .ok_or_else(|| DomainError::not_found("UserProfile", profile_id))?;

        let current = match kind {
            IdentityKind::Bvn => profile.bvn_status,
            IdentityKind::Nin => profile.nin_status,
        };
        if current == VerificationStatus::Verified {
            tracing::info!(profile_id = %profile.id, "Identity already verified");
            return Ok(VerificationOutcome::AlreadyVerified);
        }

        let user = self
            .profiles
            .find_user(profile.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", profile.user_id))?;

        let mut ordered: Vec<&Arc<dyn IdentityVerifier>> = self.verifiers.iter().collect();
        if let Some(p) = preferred {
            ordered.sort_by_key(|v| v.provider() != p);
        }

        let mut last_outage: Option<DomainError> = None;
        for verifier in ordered {
            let provider = verifier.provider();
            let result = match kind {
                IdentityKind::Bvn => verifier.verify_bvn(number).await,
                IdentityKind::Nin => verifier.verify_nin(number).await,
            };

            let identity = match result {
                Ok(identity) => identity,
                Err(e) if e.is_transient() => {
                    tracing::warn!(
                        provider = provider.as_str(),
                        error = %e,
                        "KYC provider unavailable, trying next"
                    );
                    last_outage = Some(e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !identity.verified {
                self.mark_failed(profile.id, kind, "identity number not verified")
                    .await?;
                return Ok(VerificationOutcome::Rejected);
            }

            if !user.names_match(&identity.first_name, &identity.last_name) {
                self.mark_failed(
                    profile.id,
                    kind,
                    "registered name does not match identity record",
                )
                .await?;
                return Ok(VerificationOutcome::Rejected);
            }

            match kind {
                IdentityKind::Bvn => {
                    self.profiles.mark_bvn_verified(profile.id, provider).await?
                }
                IdentityKind::Nin => {
                    self.profiles.mark_nin_verified(profile.id, provider).await?
                }
            }
            tracing::info!(
                profile_id = %profile.id,
                provider = provider.as_str(),
                "Identity verified"
            );
            return Ok(VerificationOutcome::Verified);
        }

        // Every provider was down; let the job retry later.
        Err(last_outage.unwrap_or_else(|| {
            DomainError::provider_unreachable("no identity provider configured")
        }))
    }

    async fn mark_failed(
        &self,
        profile_id: Uuid,
        kind: IdentityKind,
        reason: &str,
    ) -> Result<(), DomainError> {
        match kind {
            IdentityKind::Bvn => {
                self.profiles
                    .mark_bvn_failed(profile_id, reason.to_string())
                    .await
            }
            IdentityKind::Nin => {
                self.profiles
                    .mark_nin_failed(profile_id, reason.to_string())
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::*;
    use haven::domain::{IdentityProvider, User, UserProfile, UserRole};

    struct Fixture {
        profiles: Arc<FakeProfileRepository>,
        jobs: Arc<FakeJobRepository>,
        profile_id: Uuid,
        user_id: Uuid,
    }

    fn fixture() -> Fixture {
        let profiles = Arc::new(FakeProfileRepository::default());
        let jobs = Arc::new(FakeJobRepository::default());

        let user = User::new(
            "ada@example.com".into(),
            "Ada".into(),
            "Obi".into(),
            UserRole::Landlord,
        );
        let user_id = user.id;
        let profile = UserProfile::new(user_id);
        let profile_id = profile.id;
        profiles.insert_user(user);
        profiles.insert_profile(profile);

        Fixture {
            profiles,
            jobs,
            profile_id,
            user_id,
        }
    }

    fn service(
        f: &Fixture,
        verifiers: Vec<Arc<dyn IdentityVerifier>>,
    ) -> VerificationService<FakeProfileRepository, FakeJobRepository> {
        VerificationService::new(
            f.profiles.clone(),
            Arc::new(JobQueue::new(f.jobs.clone())),
            verifiers,
        )
    }

    #[tokio::test]
    async fn request_rejects_malformed_numbers() {
        let f = fixture();
        let svc = service(&f, vec![]);

        for bad in ["123", "123456789012", "1234567890a"] {
            let err = svc
                .request(f.user_id, IdentityKind::Bvn, bad, None)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{bad}");
        }
        assert!(f.jobs.queued_kinds().is_empty());

        svc.request(f.user_id, IdentityKind::Bvn, "12345678901", None)
            .await
            .unwrap();
        assert_eq!(f.jobs.queued_kinds().len(), 1);
    }

    #[tokio::test]
    async fn request_conflicts_when_already_verified() {
        let f = fixture();
        let svc = service(&f, vec![]);
        f.profiles
            .mark_bvn_verified(f.profile_id, IdentityProvider::Prembly)
            .await
            .unwrap();

        let err = svc
            .request(f.user_id, IdentityKind::Bvn, "12345678901", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(f.jobs.queued_kinds().is_empty(), "nothing queued");

        // NIN is still unverified, so that request goes through.
        svc.request(f.user_id, IdentityKind::Nin, "12345678901", None)
            .await
            .unwrap();
        assert_eq!(f.jobs.queued_kinds().len(), 1);
    }

    #[tokio::test]
    async fn chosen_provider_is_tried_first() {
        let f = fixture();
        let prembly = Arc::new(FakeVerifier::verified(
            IdentityProvider::Prembly,
            "Ada",
            "Obi",
        ));
        let qoreid = Arc::new(FakeVerifier::verified(
            IdentityProvider::QoreId,
            "Ada",
            "Obi",
        ));
        let svc = service(&f, vec![prembly.clone(), qoreid.clone()]);

        let outcome = svc
            .run_verification(
                f.profile_id,
                IdentityKind::Bvn,
                "12345678901",
                Some(IdentityProvider::QoreId),
            )
            .await
            .unwrap();
        assert_eq!(outcome, VerificationOutcome::Verified);
        assert_eq!(qoreid.calls(), 1);
        assert_eq!(prembly.calls(), 0, "chosen provider answered first");

        let profile = f
            .profiles
            .find_profile(f.profile_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.bvn_provider, IdentityProvider::QoreId);
    }

    #[tokio::test]
    async fn outage_falls_through_to_next_provider() {
        let f = fixture();
        let down = Arc::new(FakeVerifier::unreachable(IdentityProvider::Prembly));
        let up = Arc::new(FakeVerifier::verified(
            IdentityProvider::QoreId,
            "Ada",
            "Obi",
        ));
        let svc = service(&f, vec![down.clone(), up.clone()]);

        let outcome = svc
            .run_verification(f.profile_id, IdentityKind::Bvn, "12345678901", None)
            .await
            .unwrap();
        assert_eq!(outcome, VerificationOutcome::Verified);
        assert_eq!(down.calls(), 1);
        assert_eq!(up.calls(), 1);

        let profile = f
            .profiles
            .find_profile(f.profile_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.bvn_status, VerificationStatus::Verified);
        assert_eq!(profile.bvn_provider, IdentityProvider::QoreId);
    }

    #[tokio::test]
    async fn name_mismatch_is_terminal() {
        let f = fixture();
        let svc = service(
            &f,
            vec![Arc::new(FakeVerifier::verified(
                IdentityProvider::Prembly,
                "Ngozi",
                "Eze",
            ))],
        );

        let outcome = svc
            .run_verification(f.profile_id, IdentityKind::Bvn, "12345678901", None)
            .await
            .unwrap();
        assert_eq!(outcome, VerificationOutcome::Rejected);

        let profile = f
            .profiles
            .find_profile(f.profile_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.bvn_status, VerificationStatus::Failed);
        assert!(profile.bvn_error.unwrap().contains("name"));
    }

    #[tokio::test]
    async fn provider_rejection_is_terminal() {
        let f = fixture();
        let svc = service(
            &f,
            vec![Arc::new(FakeVerifier::rejecting(IdentityProvider::Prembly))],
        );

        let outcome = svc
            .run_verification(f.profile_id, IdentityKind::Nin, "12345678901", None)
            .await
            .unwrap();
        assert_eq!(outcome, VerificationOutcome::Rejected);

        let profile = f
            .profiles
            .find_profile(f.profile_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.nin_status, VerificationStatus::Failed);
    }

    #[tokio::test]
    async fn all_providers_down_is_transient() {
        let f = fixture();
        let svc = service(
            &f,
            vec![
                Arc::new(FakeVerifier::unreachable(IdentityProvider::Prembly)),
                Arc::new(FakeVerifier::unreachable(IdentityProvider::YouVerify)),
            ],
        );

        let err = svc
            .run_verification(f.profile_id, IdentityKind::Bvn, "12345678901", None)
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn verified_profile_short_circuits() {
        let f = fixture();
        let checker = Arc::new(FakeVerifier::verified(
            IdentityProvider::Prembly,
            "Ada",
            "Obi",
        ));
        let svc = service(&f, vec![checker.clone()]);

        svc.run_verification(f.profile_id, IdentityKind::Bvn, "12345678901", None)
            .await
            .unwrap();
        let second = svc
            .run_verification(f.profile_id, IdentityKind::Bvn, "12345678901", None)
            .await
            .unwrap();

        assert_eq!(second, VerificationOutcome::AlreadyVerified);
        assert_eq!(checker.calls(), 1);
    }
}
