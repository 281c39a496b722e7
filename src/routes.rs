//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: database, visit queue (public)
//! - `POST /api/track`   - Visit tracking (public)
//! - `/api/*`            - REST API (Bearer token required)
//! - `/dashboard/*`      - Web UI (cookie session required, except login)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token (API) or cookie session (web)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
/// - `max_upload_bytes` - workbook size accepted by the import routes
pub fn app_router(
    state: AppState,
    behind_proxy: bool,
    max_upload_bytes: usize,
) -> NormalizePath<Router> {
    let api_protected = api::routes::protected_routes(max_upload_bytes)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer(behind_proxy));

    let api_public = api::routes::public_routes().layer(rate_limit::layer(behind_proxy));

    let api_router = Router::new().merge(api_protected).merge(api_public);

    let web_protected = web::routes::protected_routes(max_upload_bytes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::layer,
        ))
        .layer(rate_limit::secure_layer(behind_proxy));

    let web_public = web::routes::public_routes().layer(rate_limit::layer(behind_proxy));

    let web_router = Router::new().merge(web_protected).merge(web_public);

    let router = Router::new()
        .route(
            "/health",
            get(health_handler).layer(rate_limit::layer(behind_proxy)),
        )
        .nest("/api", api_router)
        .nest("/dashboard", web_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
