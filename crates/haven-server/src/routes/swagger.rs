//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use haven::domain::{
    IdentityProvider, LedgerEvent, PaymentProvider, PaymentStatus, PayoutStatus, PdfStatus,
    PropertyType, RentCycle, UserRole, VerificationStatus, ViewingStatus,
};

use crate::application::PaymentInitiation;
use crate::models::{
    AddImageRequest,
    BankResponse,
    ChangeRentRequest,
    ClaimTenancyRequest,
    ConversationResponse,
    CreateListingRequest,
    CreatePropertyRequest,
    CreateTenancyRequest,
    IdentityNumberKind,
    // Payment models
    InitiatePaymentRequest,
    LedgerEntryResponse,
    ListingResponse,
    MessageResponse,
    PaymentResponse,
    PayoutResponse,
    PostMessageRequest,
    // Profile models
    ProfileResponse,
    PropertyImageResponse,
    // Property models
    PropertyResponse,
    PublishListingRequest,
    ReceiptResponse,
    ResolveAccountRequest,
    ResolvedAccountResponse,
    SetViewingRequest,
    // Conversation models
    StartConversationRequest,
    // Tenant models
    TenantResponse,
    UpdatePhotoRequest,
    VerifyIdentityRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Payment endpoints
        super::payments::initiate_payment,
        super::payments::get_payment,
        super::payments::get_payout,
        // Webhook endpoints
        super::webhooks::paystack_webhook,
        super::webhooks::flutterwave_webhook,
        // Bank endpoints
        super::banks::list_banks,
        super::banks::sync_banks,
        // Profile endpoints
        super::profiles::get_profile,
        super::profiles::verify_identity,
        super::profiles::resolve_account,
        super::profiles::update_photo,
        // Property endpoints
        super::properties::create_property,
        super::properties::list_properties,
        super::properties::get_property,
        super::properties::delete_property,
        super::properties::add_image,
        super::properties::create_listing,
        super::properties::publish_listing,
        super::properties::list_published,
        // Tenant endpoints
        super::tenants::create_tenancy,
        super::tenants::list_tenancies,
        super::tenants::get_tenancy,
        super::tenants::claim_tenancy,
        super::tenants::change_rent,
        super::tenants::get_ledger,
        // Conversation endpoints
        super::conversations::start_conversation,
        super::conversations::list_conversations,
        super::conversations::post_message,
        super::conversations::list_messages,
        super::conversations::set_viewing,
        // Receipt endpoints
        super::receipts::get_receipt,
        super::receipts::list_receipts,
    ),
    info(
        title = "Haven API",
        version = "0.1.0",
        description = "Rental platform backend: rent payments, landlord payouts, receipts, KYC, and tenant/landlord conversations.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Payments", description = "Rent payment initiation and lookup"),
        (name = "Webhooks", description = "Gateway webhook intake"),
        (name = "Banks", description = "Bank directory across gateways"),
        (name = "Profiles", description = "Profiles, KYC, payout accounts"),
        (name = "Properties", description = "Properties and images"),
        (name = "Listings", description = "Rental listings"),
        (name = "Tenants", description = "Tenancies and the rent ledger"),
        (name = "Conversations", description = "Tenant/landlord threads and viewings"),
        (name = "Receipts", description = "Rent receipt lookup"),
    ),
    components(
        schemas(
            // Value objects
            PaymentProvider,
            IdentityProvider,
            PaymentStatus,
            PayoutStatus,
            PdfStatus,
            VerificationStatus,
            ViewingStatus,
            RentCycle,
            UserRole,
            LedgerEvent,
            PropertyType,
            // Payments
            InitiatePaymentRequest,
            PaymentInitiation,
            PaymentResponse,
            PayoutResponse,
            // Banks
            BankResponse,
            // Profiles
            ProfileResponse,
            IdentityNumberKind,
            VerifyIdentityRequest,
            ResolveAccountRequest,
            ResolvedAccountResponse,
            UpdatePhotoRequest,
            // Properties
            CreatePropertyRequest,
            PropertyResponse,
            AddImageRequest,
            PropertyImageResponse,
            CreateListingRequest,
            PublishListingRequest,
            ListingResponse,
            // Tenants
            CreateTenancyRequest,
            ClaimTenancyRequest,
            ChangeRentRequest,
            TenantResponse,
            LedgerEntryResponse,
            // Conversations
            StartConversationRequest,
            PostMessageRequest,
            SetViewingRequest,
            ConversationResponse,
            MessageResponse,
            // Receipts
            ReceiptResponse,
        )
    ),
)]
pub struct ApiDoc;
