//! Handlers for client listing, lookup and removal.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::client::{ClientListQuery, ClientListResponse, ClientResponse};
use crate::api::dto::pagination::PaginationMeta;
use crate::error::AppError;
use crate::state::AppState;

/// Lists clients, ordered by name.
///
/// # Endpoint
///
/// `GET /api/clients`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 100)
/// - `search` (optional): Substring of the client name, code or domain
pub async fn client_list_handler(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> Result<Json<ClientListResponse>, AppError> {
    let (page, page_size) = query.pagination.resolve()?;

    let (items, total) = state
        .client_service
        .list(page as i64, page_size as i64, query.search)
        .await?;

    Ok(Json(ClientListResponse {
        pagination: PaginationMeta::new(page, page_size, total),
        items: items.into_iter().map(Into::into).collect(),
    }))
}

/// `GET /api/clients/{id}` - full client with workspace, mailboxes and services.
pub async fn get_client_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClientResponse>, AppError> {
    let client = state.client_service.get(id).await?;
    Ok(Json(client.into()))
}

/// `DELETE /api/clients/{id}` - removes a client and its nested records.
pub async fn delete_client_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.client_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
