//! Dashboard home page handler.

use askama::Template;
use askama_web::WebTemplate;

use crate::domain::entities::PageCount;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::State;

/// Overview of stored clients and recorded traffic.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub client_count: i64,
    pub total_visits: i64,
    pub unique_sessions: i64,
    pub top_pages: Vec<PageCount>,
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /dashboard`
pub async fn dashboard_handler(
    State(state): State<AppState>,
) -> Result<DashboardTemplate, AppError> {
    let (client_count, summary) = tokio::try_join!(
        state.client_service.count(),
        state.visit_service.summary()
    )?;

    Ok(DashboardTemplate {
        client_count,
        total_visits: summary.total_visits,
        unique_sessions: summary.unique_sessions,
        top_pages: summary.top_pages,
    })
}
