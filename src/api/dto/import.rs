//! DTOs for the client bulk import endpoint.

use serde::Serialize;

use crate::domain::import_summary::ImportSummary;

/// Body of a completed import, returned with `200 OK` even when every row failed.
///
/// ```json
/// {
///   "message": "Import completed: 1 successful, 1 failed",
///   "details": {
///     "total": 3, "successful": 1, "failed": 1, "skipped": 1,
///     "errors": [{ "row": 4, "message": "Domain Name is required" }]
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub details: ImportSummary,
}

impl From<ImportSummary> for ImportResponse {
    fn from(details: ImportSummary) -> Self {
        Self {
            message: details.message(),
            details,
        }
    }
}
