//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("External service error: {message}")]
    ExternalService { message: String, retryable: bool },
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn not_found_str<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    /// Provider rejected the call with a definitive answer. Retrying will
    /// not change the outcome.
    pub fn provider_rejected<T: Into<String>>(message: T) -> Self {
        Self::ExternalService {
            message: message.into(),
            retryable: false,
        }
    }

    /// Network/timeout class failure against a provider. Safe to retry.
    pub fn provider_unreachable<T: Into<String>>(message: T) -> Self {
        Self::ExternalService {
            message: message.into(),
            retryable: true,
        }
    }

    /// Whether a background job failing with this error should be retried.
    ///
    /// Repository errors are treated as transient (connection drops,
    /// serialization failures); everything else is a terminal outcome.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Repository(_) => true,
            Self::ExternalService { retryable, .. } => *retryable,
            _ => false,
        }
    }
}
