//! Web dashboard route configuration.

use crate::api::handlers::import::MULTIPART_OVERHEAD;
use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, import_page_handler, import_submit_handler, login_handler,
    login_submit_handler, logout_handler, template_download_handler,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// Protected dashboard routes, guarded by [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET  /`                - Overview with client and visit counts
/// - `GET  /import`          - Upload form
/// - `POST /import`          - Run an import and show the result
/// - `GET  /import/template` - Download the import template
/// - `POST /logout`          - End the session
pub fn protected_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route(
            "/import",
            get(import_page_handler)
                .post(import_submit_handler)
                .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD)),
        )
        .route("/import/template", get(template_download_handler))
        .route("/logout", post(logout_handler))
}

/// Public dashboard routes without authentication.
///
/// - `GET  /login` - Login form
/// - `POST /login` - Token submission
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_handler).post(login_submit_handler))
}
