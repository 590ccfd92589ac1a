//! User profile, KYC, and bank account DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use haven::domain::{IdentityProvider, User, UserProfile, UserRole, VerificationStatus};

/// Which identity number to verify
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdentityNumberKind {
    Bvn,
    Nin,
}

/// Request asynchronous BVN/NIN verification
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyIdentityRequest {
    pub kind: IdentityNumberKind,
    pub number: String,
    /// KYC provider to try first; omit to use the default order.
    pub provider: Option<IdentityProvider>,
}

/// Resolve a bank account to its holder's name
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveAccountRequest {
    pub account_number: String,
    pub bank_code: String,
}

/// Resolved account response
#[derive(Debug, Serialize, ToSchema)]
pub struct ResolvedAccountResponse {
    pub account_number: String,
    pub account_name: String,
}

/// Swap the profile photo
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePhotoRequest {
    pub url: String,
    pub storage_public_id: String,
}

/// User with profile response
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub email: String,
    pub phone_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub account_number: Option<String>,
    pub paystack_account_name: Option<String>,
    pub paystack_account_status: VerificationStatus,
    pub flutterwave_account_status: VerificationStatus,
    pub bvn_status: VerificationStatus,
    pub bvn_provider: IdentityProvider,
    pub bvn_error: Option<String>,
    pub nin_status: VerificationStatus,
    pub nin_provider: IdentityProvider,
    pub nin_error: Option<String>,
    pub photo_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<(User, UserProfile)> for ProfileResponse {
    fn from((user, profile): (User, UserProfile)) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            phone_number: user.phone_number,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            account_number: profile.account_number,
            paystack_account_name: profile.paystack_account_name,
            paystack_account_status: profile.paystack_account_status,
            flutterwave_account_status: profile.flutterwave_account_status,
            bvn_status: profile.bvn_status,
            bvn_provider: profile.bvn_provider,
            bvn_error: profile.bvn_error,
            nin_status: profile.nin_status,
            nin_provider: profile.nin_provider,
            nin_error: profile.nin_error,
            photo_url: profile.photo_url,
            updated_at: profile.updated_at,
        }
    }
}
