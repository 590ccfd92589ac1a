//! Request/Response DTOs
//!
//! Thin serde/utoipa types between the HTTP surface and the domain.

pub mod bank;
pub mod conversation;
pub mod payment;
pub mod profile;
pub mod property;
pub mod receipt;
pub mod tenant;

pub use bank::{BankListQuery, BankResponse};
pub use conversation::{
    ConversationResponse, MessageResponse, PostMessageRequest, SetViewingRequest,
    StartConversationRequest,
};
pub use payment::{InitiatePaymentRequest, PaymentResponse, PayoutResponse};
pub use profile::{
    IdentityNumberKind, ProfileResponse, ResolveAccountRequest, ResolvedAccountResponse,
    UpdatePhotoRequest, VerifyIdentityRequest,
};
pub use property::{
    AddImageRequest, CreateListingRequest, CreatePropertyRequest, ListingResponse,
    PropertyImageResponse, PropertyResponse, PublishListingRequest,
};
pub use receipt::ReceiptResponse;
pub use tenant::{
    ChangeRentRequest, ClaimTenancyRequest, CreateTenancyRequest, LedgerEntryResponse,
    TenantResponse,
};
