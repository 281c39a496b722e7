//! Handler for the public visit tracking endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::api::dto::visit::{TrackRequest, TrackResponse};
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::ClientIp;

const MAX_USER_AGENT_LEN: usize = 512;

/// Accepts one page view from the tracking snippet.
///
/// # Endpoint
///
/// `POST /api/track` (public, rate limited)
///
/// The event is queued for the background visit worker and the handler
/// answers `202 Accepted` straight away. When the queue is full the event is
/// dropped and `queued` is `false`.
///
/// # Errors
///
/// Returns 400 Bad Request if the body fails validation.
pub async fn track_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
    Json(payload): Json<TrackRequest>,
) -> Result<(StatusCode, Json<TrackResponse>), AppError> {
    payload.validate()?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|ua| ua.chars().take(MAX_USER_AGENT_LEN).collect::<String>());

    let event = VisitEvent {
        session_id: payload.session_id,
        page_url: payload.page_url,
        referrer: payload.referrer,
        user_agent,
        ip: ip.map(|ip| ip.to_string()),
        language: payload.language,
        screen: payload.screen,
        timezone: payload.timezone,
        storage: payload.storage.unwrap_or_else(|| json!({})),
        received_at: Utc::now(),
    };

    let queued = state.visit_service.enqueue(event);

    Ok((StatusCode::ACCEPTED, Json(TrackResponse { queued })))
}
