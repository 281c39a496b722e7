//! Handlers for recorded visitor data.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::dto::visit::{VisitListResponse, VisitSummaryResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists recorded visits, newest first.
///
/// # Endpoint
///
/// `GET /api/visitors?page&page_size`
pub async fn visitor_list_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<VisitListResponse>, AppError> {
    let (page, page_size) = params.resolve()?;

    let (items, total) = state
        .visit_service
        .list(page as i64, page_size as i64)
        .await?;

    Ok(Json(VisitListResponse {
        pagination: PaginationMeta::new(page, page_size, total),
        items: items.into_iter().map(Into::into).collect(),
    }))
}

/// Total visits, unique sessions and the ten most visited paths.
///
/// # Endpoint
///
/// `GET /api/visitors/summary`
pub async fn visitor_summary_handler(
    State(state): State<AppState>,
) -> Result<Json<VisitSummaryResponse>, AppError> {
    let summary = state.visit_service.summary().await?;
    Ok(Json(summary.into()))
}

/// `DELETE /api/visitors/{id}`
pub async fn delete_visitor_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.visit_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
