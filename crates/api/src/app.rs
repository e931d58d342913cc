use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::NotificationService;

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, security_headers_middleware,
    trace_id, RateLimiterState,
};
use crate::routes::{claims, health, items, lists, purchases, unlock_requests};
use crate::services::build_notifier;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub notifier: Arc<dyn NotificationService>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let notifier = build_notifier(&config.push);

    // Rate limiting is enabled when rate_limit_per_minute > 0
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        notifier,
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // API routes, rate limited per client IP
    let api_routes = Router::new()
        // List management
        .route("/api/v1/lists", post(lists::create_list))
        .route("/api/v1/lists/:list_id", get(lists::get_list))
        .route("/api/v1/lists/:list_id", patch(lists::update_list))
        .route("/api/v1/lists/:list_id", delete(lists::delete_list))
        // Shared list access by slug
        .route("/api/v1/shared/:slug/open", post(lists::open_shared_list))
        .route(
            "/api/v1/shared/:slug/unlock-requests",
            post(unlock_requests::create_unlock_request),
        )
        // Item management
        .route("/api/v1/lists/:list_id/items", post(items::create_item))
        .route("/api/v1/lists/:list_id/items", get(items::list_items))
        .route("/api/v1/items/:item_id", get(items::get_item))
        .route("/api/v1/items/:item_id", patch(items::update_item))
        .route("/api/v1/items/:item_id", delete(items::delete_item))
        // Claim ledger
        .route("/api/v1/items/:item_id/claim", post(claims::set_claim))
        .route("/api/v1/items/:item_id/claim/add", post(claims::add_claim))
        .route(
            "/api/v1/lists/:list_id/items/:item_id/purchase",
            post(purchases::purchase),
        )
        .route(
            "/api/v1/items/:item_id/purchases",
            get(purchases::list_purchases),
        )
        // Unlock request management
        .route(
            "/api/v1/lists/:list_id/unlock-requests",
            get(unlock_requests::list_unlock_requests),
        )
        .route(
            "/api/v1/unlock-requests/:request_id",
            get(unlock_requests::get_unlock_request),
        )
        .route(
            "/api/v1/unlock-requests/:request_id/respond",
            post(unlock_requests::respond_to_unlock_request),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Public routes (no rate limiting)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
