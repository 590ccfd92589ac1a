//! PostgreSQL persistence adapters.

pub mod bank_repository;
pub mod conversation_repository;
pub mod idempotency_repository;
pub mod job_repository;
pub mod payment_repository;
pub mod profile_repository;
pub mod property_repository;
pub mod receipt_repository;
pub mod tenant_repository;

pub use bank_repository::PgBankRepository;
pub use conversation_repository::PgConversationRepository;
pub use idempotency_repository::PgIdempotencyRepository;
pub use job_repository::PgJobRepository;
pub use payment_repository::PgPaymentRepository;
pub use profile_repository::PgProfileRepository;
pub use property_repository::PgPropertyRepository;
pub use receipt_repository::PgReceiptRepository;
pub use tenant_repository::PgTenantRepository;
