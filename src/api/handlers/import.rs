//! Handlers for client bulk import and the import template.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::import::ImportResponse;
use crate::error::AppError;
use crate::infrastructure::spreadsheet::{TEMPLATE_CONTENT_TYPE, TEMPLATE_FILE_NAME, build_template};
use crate::state::AppState;

/// Multipart field carrying the workbook.
pub const UPLOAD_FIELD: &str = "file";

/// Room for multipart boundaries and part headers on top of the file itself.
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// A workbook pulled out of a multipart body.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Reads the `file` field of a multipart body, ignoring any other field.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the field is absent or the body is
/// malformed, and [`AppError::PayloadTooLarge`] if the body exceeds the
/// route's limit.
pub async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::bad_request(
        "No file uploaded",
        json!({ "field": UPLOAD_FIELD }),
    ))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("File is too large", json!({}))
    } else {
        AppError::bad_request("Invalid multipart body", json!({ "reason": e.body_text() }))
    }
}

/// Imports clients from an uploaded workbook.
///
/// # Endpoint
///
/// `POST /api/clients/import` (multipart, field `file`)
///
/// # Response
///
/// `200 OK` with the import summary, even when some or all rows failed.
///
/// # Errors
///
/// - 400 if no file was sent, the extension is not a spreadsheet, or the
///   `Client Information` sheet is missing
/// - 413 if the file exceeds `IMPORT_MAX_UPLOAD_BYTES`
pub async fn import_clients_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;

    let summary = state
        .import_service
        .import_file(&upload.file_name, upload.bytes)
        .await?;

    Ok(Json(summary.into()))
}

/// Builds the template download response.
pub fn template_response() -> Result<Response, AppError> {
    let bytes = build_template()?;

    Ok((
        [
            (header::CONTENT_TYPE, TEMPLATE_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{TEMPLATE_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Downloads the import template.
///
/// # Endpoint
///
/// `GET /api/clients/import/template`
pub async fn import_template_handler() -> Result<Response, AppError> {
    template_response()
}
