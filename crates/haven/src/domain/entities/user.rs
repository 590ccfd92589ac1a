//! User and UserProfile entities.
//!
//! The profile carries everything the payout and KYC flows hang off:
//! bank account details per provider, the Paystack transfer recipient
//! code, and BVN/NIN verification state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{IdentityProvider, UserRole, VerificationStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub phone_number: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, first_name: String, last_name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            phone_number: None,
            first_name,
            middle_name: None,
            last_name,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Compare the registered name against names returned by a KYC
    /// provider. Order-insensitive on first/last, case-insensitive,
    /// whitespace-trimmed.
    pub fn names_match(&self, first_name: &str, last_name: &str) -> bool {
        let ours = (normalize(&self.first_name), normalize(&self.last_name));
        let theirs = (normalize(first_name), normalize(last_name));
        ours == theirs || (ours.0 == theirs.1 && ours.1 == theirs.0)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,

    pub account_number: Option<String>,
    pub paystack_bank_code: Option<String>,
    pub flutterwave_bank_code: Option<String>,
    pub paystack_account_name: Option<String>,
    pub flutterwave_account_name: Option<String>,
    pub paystack_account_status: VerificationStatus,
    pub flutterwave_account_status: VerificationStatus,
    /// Paystack transfer recipient. Generated once; the ensure job
    /// never overwrites an existing code.
    pub paystack_recipient_code: Option<String>,

    pub bvn_status: VerificationStatus,
    pub bvn_provider: IdentityProvider,
    pub bvn_error: Option<String>,
    pub nin_status: VerificationStatus,
    pub nin_provider: IdentityProvider,
    pub nin_error: Option<String>,

    pub photo_url: Option<String>,
    pub photo_public_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            account_number: None,
            paystack_bank_code: None,
            flutterwave_bank_code: None,
            paystack_account_name: None,
            flutterwave_account_name: None,
            paystack_account_status: VerificationStatus::Pending,
            flutterwave_account_status: VerificationStatus::Pending,
            paystack_recipient_code: None,
            bvn_status: VerificationStatus::Pending,
            bvn_provider: IdentityProvider::NoneYet,
            bvn_error: None,
            nin_status: VerificationStatus::Pending,
            nin_provider: IdentityProvider::NoneYet,
            nin_error: None,
            photo_url: None,
            photo_public_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether any gateway has verified the payout account.
    pub fn account_verified(&self) -> bool {
        self.paystack_account_status == VerificationStatus::Verified
            || self.flutterwave_account_status == VerificationStatus::Verified
    }

    /// Preconditions for generating a Paystack transfer recipient.
    /// Returns false (skip, not error) when the code already exists,
    /// verification failed, or account details are incomplete.
    pub fn needs_recipient_code(&self) -> bool {
        if self.paystack_recipient_code.is_some() {
            return false;
        }
        if self.paystack_account_status != VerificationStatus::Verified {
            return false;
        }
        self.paystack_account_name.is_some()
            && self.account_number.is_some()
            && self.paystack_bank_code.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            "ada@example.com".into(),
            "Ada".into(),
            "Obi".into(),
            UserRole::Landlord,
        )
    }

    #[test]
    fn names_match_ignores_case_and_order() {
        let u = user();
        assert!(u.names_match("ADA", "obi"));
        assert!(u.names_match("Obi", "Ada"));
        assert!(!u.names_match("Ada", "Eze"));
    }

    #[test]
    fn recipient_code_preconditions() {
        let mut p = UserProfile::new(Uuid::new_v4());
        assert!(!p.needs_recipient_code());

        p.account_number = Some("0123456789".into());
        p.paystack_bank_code = Some("058".into());
        p.paystack_account_name = Some("ADA OBI".into());
        assert!(!p.needs_recipient_code(), "account not yet verified");

        p.paystack_account_status = VerificationStatus::Verified;
        assert!(p.needs_recipient_code());

        p.paystack_recipient_code = Some("RCP_abc".into());
        assert!(!p.needs_recipient_code(), "code already generated");
    }
}
