//! Client bulk import: validation, assembly and persistence of workbook rows.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{
    AdditionalService, ClientDomain, ClientRecord, EmailAccount, GoogleWorkspace, Website,
};
use crate::domain::import_summary::{ImportSummary, RowError};
use crate::domain::repositories::ClientRepository;
use crate::domain::sheet::{
    ClientWorkbook, SheetRow, client_cols, email_cols, service_cols, workspace_cols,
};
use crate::domain::sheet_join::{JoinedRows, join_client};
use crate::error::AppError;
use crate::infrastructure::spreadsheet::read_client_workbook;
use crate::utils::cell_normalizer::{normalize_amount, normalize_date, normalize_flag};

/// File extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Service turning an uploaded workbook into persisted clients.
///
/// Rows are processed one after the other. Each accepted row is written in
/// its own transaction by the repository, so a failed row never rolls back
/// the rows before it.
pub struct ImportService<R: ClientRepository + ?Sized> {
    repository: Arc<R>,
    max_upload_bytes: usize,
}

impl<R: ClientRepository + ?Sized> ImportService<R> {
    /// Creates a new import service.
    pub fn new(repository: Arc<R>, max_upload_bytes: usize) -> Self {
        Self {
            repository,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Checks, decodes and imports an uploaded file.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - the extension is not a spreadsheet format
    /// - the file is empty or unreadable
    /// - the `Client Information` sheet is missing
    ///
    /// Returns [`AppError::PayloadTooLarge`] if the file exceeds the upload ceiling.
    ///
    /// Row-level problems never fail the call; they are reported in the summary.
    pub async fn import_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ImportSummary, AppError> {
        check_extension(file_name)?;

        if bytes.len() > self.max_upload_bytes {
            return Err(AppError::payload_too_large(
                "File is too large",
                json!({ "size": bytes.len(), "max_bytes": self.max_upload_bytes }),
            ));
        }

        if bytes.is_empty() {
            return Err(AppError::bad_request(
                "Uploaded file is empty",
                json!({ "file_name": file_name }),
            ));
        }

        let workbook = tokio::task::spawn_blocking(move || read_client_workbook(&bytes))
            .await
            .map_err(|e| {
                tracing::error!("Workbook decoding task failed: {}", e);
                AppError::internal("Could not read spreadsheet", json!({}))
            })??;

        let summary = self.import_workbook(&workbook).await;

        info!(
            file_name,
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            skipped = summary.skipped,
            "Client import finished"
        );

        Ok(summary)
    }

    /// Imports every row of the `Client Information` sheet.
    ///
    /// Rows without a client name are skipped. Rows failing validation or
    /// persistence are recorded as errors with their sheet row number.
    pub async fn import_workbook(&self, workbook: &ClientWorkbook) -> ImportSummary {
        let mut summary = ImportSummary {
            total: workbook.clients.len(),
            ..Default::default()
        };

        for row in &workbook.clients {
            if row.is_blank(client_cols::CLIENT_NAME) {
                summary.record_skip();
                metrics::counter!("client_import_rows_total", "outcome" => "skipped").increment(1);
                continue;
            }

            let client_name = row.text(client_cols::CLIENT_NAME);
            let joined = join_client(&client_name, workbook);

            let outcome = match assemble_client(row, &joined) {
                Ok(record) => self.repository.create(record).await.map_err(|e| {
                    RowError::new(row.row_number, format!("Failed to save client: {e}"))
                }),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(client) => {
                    summary.record_success();
                    metrics::counter!("client_import_rows_total", "outcome" => "success")
                        .increment(1);
                    tracing::debug!(client_id = client.id, row = row.row_number, "Client imported");
                }
                Err(error) => {
                    warn!(row = error.row, client_name = %client_name, reason = %error.message, "Client row rejected");
                    metrics::counter!("client_import_rows_total", "outcome" => "failed")
                        .increment(1);
                    summary.record_failure(error);
                }
            }
        }

        summary
    }
}

fn check_extension(file_name: &str) -> Result<(), AppError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(AppError::bad_request(
            "Unsupported file type",
            json!({ "file_name": file_name, "allowed": ALLOWED_EXTENSIONS }),
        )),
    }
}

/// Validates one `Client Information` row and builds its record.
///
/// Requires a non-blank client name and domain name. Text values are kept
/// verbatim; dates, fees and flags go through the cell normalizer and fall
/// back to absent or `false`.
///
/// # Errors
///
/// Returns a [`RowError`] carrying the sheet row number when a required
/// value is blank.
pub fn assemble_client(row: &SheetRow, joined: &JoinedRows<'_>) -> Result<ClientRecord, RowError> {
    if row.is_blank(client_cols::CLIENT_NAME) {
        return Err(RowError::new(row.row_number, "Client Name is required"));
    }
    if row.is_blank(client_cols::DOMAIN_NAME) {
        return Err(RowError::new(row.row_number, "Domain Name is required"));
    }

    let email_accounts: Vec<EmailAccount> = joined
        .email_accounts
        .iter()
        .map(|r| EmailAccount {
            email: r.text(email_cols::EMAIL_ADDRESS),
            password: r.text(email_cols::PASSWORD),
            login_url: r.text(email_cols::LOGIN_URL),
            notes: r.text(email_cols::NOTES),
        })
        .collect();

    let google_workspace = match (joined.workspace, email_accounts.is_empty()) {
        (Some(ws), _) => Some(GoogleWorkspace {
            admin_email: ws.text(workspace_cols::ADMIN_EMAIL),
            admin_password: ws.text(workspace_cols::ADMIN_PASSWORD),
            subscription_type: ws.text(workspace_cols::SUBSCRIPTION_TYPE),
            monthly_fee: normalize_amount(ws.get(workspace_cols::MONTHLY_FEE)),
            renewal_date: normalize_date(ws.get(workspace_cols::RENEWAL_DATE)),
            notes: ws.text(workspace_cols::NOTES),
            email_accounts,
        }),
        (None, false) => Some(GoogleWorkspace {
            email_accounts,
            ..Default::default()
        }),
        (None, true) => None,
    };

    let additional_services = joined
        .additional_services
        .iter()
        .map(|r| AdditionalService {
            service_name: r.text(service_cols::SERVICE_NAME),
            service_type: r.text(service_cols::SERVICE_TYPE),
            username: r.text(service_cols::USERNAME),
            password: r.text(service_cols::PASSWORD),
            login_url: r.text(service_cols::LOGIN_URL),
            expiry_date: normalize_date(r.get(service_cols::EXPIRY_DATE)),
            notes: r.text(service_cols::NOTES),
        })
        .collect();

    Ok(ClientRecord {
        client_name: row.text(client_cols::CLIENT_NAME),
        client_code: row.text(client_cols::CLIENT_CODE),
        contact_person: row.text(client_cols::CONTACT_PERSON),
        contact_email: row.text(client_cols::CONTACT_EMAIL),
        contact_phone: row.text(client_cols::CONTACT_PHONE),
        notes: row.text(client_cols::NOTES),
        domain: ClientDomain {
            name: row.text(client_cols::DOMAIN_NAME),
            platform: row.text(client_cols::DOMAIN_PLATFORM),
            username: row.text(client_cols::DOMAIN_USERNAME),
            password: row.text(client_cols::DOMAIN_PASSWORD),
            expiry_date: normalize_date(row.get(client_cols::DOMAIN_EXPIRY_DATE)),
            auto_renewal: normalize_flag(row.get(client_cols::DOMAIN_AUTO_RENEWAL)),
            notes: row.text(client_cols::DOMAIN_NOTES),
        },
        google_workspace,
        website: Website {
            url: row.text(client_cols::WEBSITE_URL),
            platform: row.text(client_cols::WEBSITE_PLATFORM),
            username: row.text(client_cols::WEBSITE_USERNAME),
            password: row.text(client_cols::WEBSITE_PASSWORD),
            hosting_provider: row.text(client_cols::HOSTING_PROVIDER),
            notes: row.text(client_cols::WEBSITE_NOTES),
        },
        additional_services,
    })
}
