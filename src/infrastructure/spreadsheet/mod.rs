//! Spreadsheet decoding and template generation.
//!
//! - [`reader`] - Decodes an uploaded workbook into a [`crate::domain::sheet::ClientWorkbook`]
//! - [`template`] - Builds the downloadable import template

pub mod reader;
pub mod template;

pub use reader::read_client_workbook;
pub use template::{TEMPLATE_CONTENT_TYPE, TEMPLATE_FILE_NAME, build_template};

use thiserror::Error;

/// Failures while decoding or producing a workbook.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// A mandatory sheet is absent from the upload.
    #[error("Missing required sheet: {0}")]
    MissingSheet(String),

    /// The bytes are not a workbook calamine can open.
    #[error("Could not read spreadsheet: {0}")]
    Unreadable(String),

    /// The template workbook could not be serialized.
    #[error("Could not build workbook: {0}")]
    Build(String),
}

impl From<rust_xlsxwriter::XlsxError> for SpreadsheetError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        SpreadsheetError::Build(e.to_string())
    }
}
