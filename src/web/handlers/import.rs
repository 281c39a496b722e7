//! Client import pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};

use crate::api::handlers::import::{read_upload, template_response};
use crate::domain::import_summary::{ERROR_PREVIEW_LIMIT, ImportSummary};
use crate::error::AppError;
use crate::state::AppState;

/// Outcome block shown under the upload form.
pub struct ImportOutcome {
    pub message: String,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub error_preview: Vec<String>,
}

impl From<&ImportSummary> for ImportOutcome {
    fn from(summary: &ImportSummary) -> Self {
        Self {
            message: summary.message(),
            total: summary.total,
            successful: summary.successful,
            failed: summary.failed,
            skipped: summary.skipped,
            error_preview: summary.error_preview(ERROR_PREVIEW_LIMIT),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "import.html")]
pub struct ImportTemplate {
    pub max_upload_mib: String,
    pub outcome: Option<ImportOutcome>,
    pub error: Option<String>,
}

fn max_upload_mib(state: &AppState) -> String {
    format!(
        "{:.1}",
        state.import_service.max_upload_bytes() as f64 / (1024.0 * 1024.0)
    )
}

/// `GET /dashboard/import` - upload form.
pub async fn import_page_handler(State(state): State<AppState>) -> ImportTemplate {
    ImportTemplate {
        max_upload_mib: max_upload_mib(&state),
        outcome: None,
        error: None,
    }
}

/// Runs an import from the dashboard form and renders the result.
///
/// # Endpoint
///
/// `POST /dashboard/import`
///
/// Request-level failures re-render the form with the error message and the
/// matching status code.
pub async fn import_submit_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let result = match read_upload(&mut multipart).await {
        Ok(upload) => {
            state
                .import_service
                .import_file(&upload.file_name, upload.bytes)
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) => ImportTemplate {
            max_upload_mib: max_upload_mib(&state),
            outcome: Some(ImportOutcome::from(&summary)),
            error: None,
        }
        .into_response(),
        Err(e) => {
            let status = e.status();
            (
                status,
                ImportTemplate {
                    max_upload_mib: max_upload_mib(&state),
                    outcome: None,
                    error: Some(e.to_string()),
                },
            )
                .into_response()
        }
    }
}

/// `GET /dashboard/import/template`
pub async fn template_download_handler() -> Result<Response, AppError> {
    template_response()
}
