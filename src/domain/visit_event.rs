//! Visit event model for asynchronous visitor tracking.

use chrono::{DateTime, Utc};
use serde_json::Value;
use url::Url;

use crate::domain::entities::NewVisit;

/// An in-memory visit passed from the tracking handler to the background worker.
///
/// The handler answers immediately; persistence happens in
/// [`crate::domain::visit_worker::run_visit_worker`].
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub session_id: String,
    pub page_url: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    pub language: Option<String>,
    pub screen: Option<String>,
    pub timezone: Option<String>,
    pub storage: Value,
    pub received_at: DateTime<Utc>,
}

impl VisitEvent {
    /// Converts the event into a persistable visit.
    ///
    /// The page path is taken from the URL; unparseable URLs keep the raw value.
    pub fn into_new_visit(self) -> NewVisit {
        let page_path = page_path(&self.page_url);

        NewVisit {
            session_id: self.session_id,
            page_url: self.page_url,
            page_path,
            referrer: self.referrer.filter(|r| !r.is_empty()),
            user_agent: self.user_agent,
            ip: self.ip,
            language: self.language,
            screen: self.screen,
            timezone: self.timezone,
            storage: self.storage,
            visited_at: self.received_at,
        }
    }
}

fn page_path(page_url: &str) -> String {
    match Url::parse(page_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => page_url.to_string(),
    }
}
