//! API route configuration.

use crate::api::handlers::import::MULTIPART_OVERHEAD;
use crate::api::handlers::{
    client_list_handler, delete_client_handler, delete_visitor_handler, get_client_handler,
    import_clients_handler, import_template_handler, track_handler, visitor_list_handler,
    visitor_summary_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// API routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /clients/import`          - Bulk import from a workbook (multipart `file`)
/// - `GET    /clients/import/template` - Download the import template
/// - `GET    /clients`                 - List clients (paginated, searchable)
/// - `GET    /clients/{id}`            - Full client
/// - `DELETE /clients/{id}`            - Delete a client
/// - `GET    /visitors`                - Recorded visits (paginated)
/// - `GET    /visitors/summary`        - Visit totals and top pages
/// - `DELETE /visitors/{id}`           - Delete a visit
pub fn protected_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/clients/import",
            post(import_clients_handler)
                .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD)),
        )
        .route("/clients/import/template", get(import_template_handler))
        .route("/clients", get(client_list_handler))
        .route(
            "/clients/{id}",
            get(get_client_handler).delete(delete_client_handler),
        )
        .route("/visitors", get(visitor_list_handler))
        .route("/visitors/summary", get(visitor_summary_handler))
        .route(
            "/visitors/{id}",
            axum::routing::delete(delete_visitor_handler),
        )
}

/// Unauthenticated API routes.
///
/// - `POST /track` - Visit tracking from the public site
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/track", post(track_handler))
}
