//! Repository Ports
//!
//! Abstract persistence interfaces implemented by the server's Postgres
//! adapters.

pub mod bank_repository;
pub mod conversation_repository;
pub mod idempotency_repository;
pub mod job_repository;
pub mod payment_repository;
pub mod profile_repository;
pub mod property_repository;
pub mod receipt_repository;
pub mod tenant_repository;

pub use bank_repository::BankRepository;
pub use conversation_repository::ConversationRepository;
pub use idempotency_repository::IdempotencyRepository;
pub use job_repository::JobRepository;
pub use payment_repository::PaymentRepository;
pub use profile_repository::ProfileRepository;
pub use property_repository::PropertyRepository;
pub use receipt_repository::ReceiptRepository;
pub use tenant_repository::TenantRepository;
