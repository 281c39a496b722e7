//! DTOs for visitor tracking and reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::api::dto::pagination::PaginationMeta;
use crate::domain::entities::{PageCount, Visit, VisitSummary};

/// Payload posted by the site's tracking snippet.
///
/// ```json
/// {
///   "session_id": "b2f1c3",
///   "page_url": "https://agency.example/services?ref=ad",
///   "referrer": "https://google.com/",
///   "language": "en-US",
///   "screen": "1920x1080",
///   "timezone": "Europe/Berlin",
///   "storage": { "theme": "dark" }
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct TrackRequest {
    #[validate(length(min = 1, max = 128))]
    pub session_id: String,

    #[validate(url, length(max = 2048))]
    pub page_url: String,

    #[validate(length(max = 2048))]
    pub referrer: Option<String>,

    #[validate(length(max = 35))]
    pub language: Option<String>,

    #[validate(length(max = 32))]
    pub screen: Option<String>,

    #[validate(length(max = 64))]
    pub timezone: Option<String>,

    pub storage: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    /// `false` when the event was dropped because the queue was full.
    pub queued: bool,
}

#[derive(Debug, Serialize)]
pub struct VisitItem {
    pub id: i64,
    pub session_id: String,
    pub page_url: String,
    pub page_path: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    pub language: Option<String>,
    pub screen: Option<String>,
    pub timezone: Option<String>,
    pub storage: Value,
    pub visited_at: DateTime<Utc>,
}

impl From<Visit> for VisitItem {
    fn from(v: Visit) -> Self {
        Self {
            id: v.id,
            session_id: v.session_id,
            page_url: v.page_url,
            page_path: v.page_path,
            referrer: v.referrer,
            user_agent: v.user_agent,
            ip: v.ip,
            language: v.language,
            screen: v.screen,
            timezone: v.timezone,
            storage: v.storage,
            visited_at: v.visited_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VisitListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<VisitItem>,
}

#[derive(Debug, Serialize)]
pub struct PageCountItem {
    pub page_path: String,
    pub visits: i64,
}

#[derive(Debug, Serialize)]
pub struct VisitSummaryResponse {
    pub total_visits: i64,
    pub unique_sessions: i64,
    pub top_pages: Vec<PageCountItem>,
}

impl From<VisitSummary> for VisitSummaryResponse {
    fn from(s: VisitSummary) -> Self {
        Self {
            total_visits: s.total_visits,
            unique_sessions: s.unique_sessions,
            top_pages: s
                .top_pages
                .into_iter()
                .map(|PageCount { page_path, visits }| PageCountItem { page_path, visits })
                .collect(),
        }
    }
}
