//! Identity Verifier Port
//!
//! KYC lookups against BVN/NIN providers (Prembly, QoreID, YouVerify).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::IdentityProvider;

/// What a provider returned for an identity number.
///
/// `verified: false` is a definitive negative answer, not an error; callers
/// mark the profile Failed without retrying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub verified: bool,
    pub first_name: String,
    pub last_name: String,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    fn provider(&self) -> IdentityProvider;

    async fn verify_bvn(&self, bvn: &str) -> Result<VerifiedIdentity, DomainError>;

    async fn verify_nin(&self, nin: &str) -> Result<VerifiedIdentity, DomainError>;
}
