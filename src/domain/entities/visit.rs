//! Visit entity captured by the site's tracking snippet.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A recorded page visit.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
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
    /// Browser storage snapshot sent by the collector, stored as-is.
    pub storage: Value,
    pub visited_at: DateTime<Utc>,
}

/// Input data for recording a visit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVisit {
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

/// Visit count for a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCount {
    pub page_path: String,
    pub visits: i64,
}

/// Aggregate view over all recorded visits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisitSummary {
    pub total_visits: i64,
    pub unique_sessions: i64,
    pub top_pages: Vec<PageCount>,
}
