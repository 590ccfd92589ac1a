use axum::{extract::FromRef, middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod jobs;
mod models;
mod routes;

use adapters::postgres::{
    PgBankRepository, PgConversationRepository, PgIdempotencyRepository, PgJobRepository,
    PgPaymentRepository, PgProfileRepository, PgPropertyRepository, PgReceiptRepository,
    PgTenantRepository,
};
use adapters::providers::{
    FlutterwaveClient, PaystackClient, PremblyClient, QoreIdClient, YouVerifyClient,
};
use adapters::{HttpNotifier, MediaStore};
use application::{
    BankService, ConversationService, NotificationService, PaymentService, PayoutService,
    ProfileService, PropertyService, ReceiptService, RentService, VerificationService,
};
use haven::ports::{DocumentStore, IdentityVerifier, Notifier, PaymentGateway};
use jobs::{JobQueue, JobWorker, SweepConfig, SweepScheduler, WorkerConfig};

/// Type aliases for application services with concrete repository implementations
pub type AppPaymentService = PaymentService<
    PgPaymentRepository,
    PgProfileRepository,
    PgTenantRepository,
    PgIdempotencyRepository,
    PgJobRepository,
>;
pub type AppPayoutService = PayoutService<
    PgPaymentRepository,
    PgProfileRepository,
    PgTenantRepository,
    PgReceiptRepository,
    PgJobRepository,
>;
pub type AppReceiptService = ReceiptService<PgReceiptRepository>;
pub type AppVerificationService = VerificationService<PgProfileRepository, PgJobRepository>;
pub type AppPropertyService = PropertyService<PgPropertyRepository, PgJobRepository>;
pub type AppBankService = BankService<PgBankRepository, PgProfileRepository, PgJobRepository>;
pub type AppConversationService =
    ConversationService<PgConversationRepository, PgPropertyRepository>;
pub type AppRentService = RentService<PgTenantRepository>;
pub type AppProfileService = ProfileService<PgProfileRepository>;
pub type AppJobWorker = JobWorker<
    PgPaymentRepository,
    PgProfileRepository,
    PgTenantRepository,
    PgReceiptRepository,
    PgBankRepository,
    PgPropertyRepository,
    PgJobRepository,
>;

/// HMAC secrets for webhook intake
#[derive(Clone)]
pub struct WebhookSecrets {
    pub paystack: String,
    pub flutterwave: String,
}

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub payment_service: Arc<AppPaymentService>,
    pub payment_repo: Arc<PgPaymentRepository>,
    pub receipt_service: Arc<AppReceiptService>,
    pub verification_service: Arc<AppVerificationService>,
    pub property_service: Arc<AppPropertyService>,
    pub bank_service: Arc<AppBankService>,
    pub conversation_service: Arc<AppConversationService>,
    pub rent_service: Arc<AppRentService>,
    pub profile_service: Arc<AppProfileService>,
    pub webhook_secrets: WebhookSecrets,
}

// Allow extracting PgPool directly from AppState
impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> PgPool {
        state.pool.clone()
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Haven API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🏠 Haven API initializing...");

    // Initialize API key from secrets
    if let Some(api_key) = secrets.get("HAVEN_API_KEY") {
        auth::init_api_key(api_key);
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No HAVEN_API_KEY set - authentication disabled");
    }

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("✅ Database migrations completed");

    // Payment gateways
    let paystack_secret = secrets.get("PAYSTACK_SECRET_KEY").unwrap_or_default();
    let flutterwave_secret = secrets.get("FLUTTERWAVE_SECRET_KEY").unwrap_or_default();
    if paystack_secret.is_empty() || flutterwave_secret.is_empty() {
        tracing::warn!("⚠️  Gateway secret keys missing - payments will fail");
    }
    let paystack: Arc<dyn PaymentGateway> = Arc::new(PaystackClient::new(paystack_secret.clone()));
    let flutterwave: Arc<dyn PaymentGateway> = Arc::new(FlutterwaveClient::new(
        flutterwave_secret.clone(),
        secrets
            .get("FLUTTERWAVE_REDIRECT_URL")
            .unwrap_or_else(|| "https://haven.example.com/payments/return".to_string()),
    ));

    let webhook_secrets = WebhookSecrets {
        paystack: paystack_secret,
        flutterwave: secrets
            .get("FLUTTERWAVE_WEBHOOK_HASH")
            .unwrap_or(flutterwave_secret),
    };

    // Identity verifiers, in fallback order
    let mut verifiers: Vec<Arc<dyn IdentityVerifier>> = Vec::new();
    if let (Some(app_id), Some(api_key)) =
        (secrets.get("PREMBLY_APP_ID"), secrets.get("PREMBLY_API_KEY"))
    {
        verifiers.push(Arc::new(PremblyClient::new(app_id, api_key)));
    }
    if let Some(api_key) = secrets.get("QOREID_API_KEY") {
        verifiers.push(Arc::new(QoreIdClient::new(api_key)));
    }
    if let Some(api_key) = secrets.get("YOUVERIFY_API_KEY") {
        verifiers.push(Arc::new(YouVerifyClient::new(api_key)));
    }
    if verifiers.is_empty() {
        tracing::warn!("⚠️  No KYC providers configured - identity verification disabled");
    } else {
        tracing::info!("🪪  {} KYC provider(s) configured", verifiers.len());
    }

    // Media storage and notifications
    let store: Arc<dyn DocumentStore> = Arc::new(MediaStore::new(
        secrets.get("MEDIA_BASE_URL").unwrap_or_default(),
        secrets.get("MEDIA_API_TOKEN").unwrap_or_default(),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(HttpNotifier::new(
        secrets.get("SMS_BASE_URL").unwrap_or_default(),
        secrets.get("SMS_API_KEY").unwrap_or_default(),
        secrets.get("SMS_SENDER_ID").unwrap_or_default(),
        secrets.get("EMAIL_BASE_URL").unwrap_or_default(),
        secrets.get("EMAIL_API_KEY").unwrap_or_default(),
        secrets.get("EMAIL_FROM").unwrap_or_default(),
    ));

    // Repositories
    let payment_repo = Arc::new(PgPaymentRepository::new(pool.clone()));
    let profile_repo = Arc::new(PgProfileRepository::new(pool.clone()));
    let tenant_repo = Arc::new(PgTenantRepository::new(pool.clone()));
    let receipt_repo = Arc::new(PgReceiptRepository::new(pool.clone()));
    let property_repo = Arc::new(PgPropertyRepository::new(pool.clone()));
    let conversation_repo = Arc::new(PgConversationRepository::new(pool.clone()));
    let bank_repo = Arc::new(PgBankRepository::new(pool.clone()));
    let idempotency_repo = Arc::new(PgIdempotencyRepository::new(pool.clone()));
    let job_repo = Arc::new(PgJobRepository::new(pool.clone()));
    let queue = Arc::new(JobQueue::new(job_repo.clone()));

    // Application services
    let payment_service = Arc::new(PaymentService::new(
        payment_repo.clone(),
        profile_repo.clone(),
        tenant_repo.clone(),
        idempotency_repo,
        queue.clone(),
        paystack.clone(),
        flutterwave.clone(),
    ));
    let payout_service = Arc::new(PayoutService::new(
        payment_repo.clone(),
        profile_repo.clone(),
        tenant_repo.clone(),
        receipt_repo.clone(),
        queue.clone(),
        paystack.clone(),
    ));
    let receipt_service = Arc::new(ReceiptService::new(
        receipt_repo,
        store.clone(),
        secrets.get("RECEIPT_SIGNING_KEY").unwrap_or_default(),
    ));
    let verification_service = Arc::new(VerificationService::new(
        profile_repo.clone(),
        queue.clone(),
        verifiers,
    ));
    let property_service = Arc::new(PropertyService::new(
        property_repo.clone(),
        queue.clone(),
        store.clone(),
    ));
    let bank_service = Arc::new(BankService::new(
        bank_repo,
        profile_repo.clone(),
        queue.clone(),
        paystack,
        flutterwave,
    ));
    let conversation_service = Arc::new(ConversationService::new(
        conversation_repo,
        property_repo,
    ));
    let rent_service = Arc::new(RentService::new(tenant_repo));
    let profile_service = Arc::new(ProfileService::new(profile_repo, store));
    let notification_service = Arc::new(NotificationService::new(payment_repo.clone(), notifier));

    // Background worker
    let worker_config = WorkerConfig {
        poll_interval: Duration::from_secs(
            secrets
                .get("WORKER_POLL_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        ),
        ..WorkerConfig::default()
    };
    let worker: Arc<AppJobWorker> = Arc::new(JobWorker::new(
        job_repo,
        payout_service,
        receipt_service.clone(),
        verification_service.clone(),
        property_service.clone(),
        bank_service.clone(),
        notification_service,
        worker_config,
    ));
    worker.start();

    // Stale-conversation sweep and periodic bank sync
    let sweep_config = SweepConfig {
        interval: Duration::from_secs(
            secrets
                .get("SWEEP_INTERVAL_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
        ),
        max_idle: chrono::Duration::days(
            secrets
                .get("SWEEP_MAX_IDLE_DAYS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(7),
        ),
        ..SweepConfig::default()
    };
    SweepScheduler::new(conversation_service.clone(), queue, sweep_config).start();
    tracing::info!("📅 Sweep scheduler started");

    // Create application state
    let state = AppState {
        pool: pool.clone(),
        payment_service,
        payment_repo,
        receipt_service,
        verification_service,
        property_service,
        bank_service,
        conversation_service,
        rent_service,
        profile_service,
        webhook_secrets,
    };

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::payments::router())
        .merge(routes::banks::router())
        .merge(routes::profiles::router())
        .merge(routes::properties::router())
        .merge(routes::tenants::router())
        .merge(routes::conversations::router())
        .merge(routes::receipts::router())
        .layer(middleware::from_fn(auth::auth_middleware));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state; webhooks stay outside the auth
    // layer, their HMAC check is the authentication.
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::webhooks::router())
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Haven API ready");

    Ok(router.into())
}
