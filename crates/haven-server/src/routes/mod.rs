//! Haven API Routes
//!
//! - /payments - Rent payment initiation and lookup
//! - /webhooks - Gateway webhook intake (HMAC-guarded, no bearer auth)
//! - /banks - Bank directory and sync
//! - /profiles - User profile, KYC, payout account
//! - /properties - Properties, images, rental listings
//! - /tenants - Tenancies and the rent ledger
//! - /conversations - Tenant/landlord threads and viewing requests
//! - /receipts - Rent receipt lookup

pub mod banks;
pub mod conversations;
pub mod payments;
pub mod profiles;
pub mod properties;
pub mod receipts;
pub mod swagger;
pub mod tenants;
pub mod webhooks;

use axum::http::StatusCode;
use haven::domain::DomainError;

/// Map a domain error onto an HTTP status and message.
pub(crate) fn error_response(e: DomainError) -> (StatusCode, String) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::ExternalService { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_http_statuses() {
        let cases = [
            (
                DomainError::not_found("Payment", uuid::Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                DomainError::Unauthorized("not yours".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Repository("db".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::provider_unreachable("down"),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(error_response(err).0, expected);
        }
    }
}
