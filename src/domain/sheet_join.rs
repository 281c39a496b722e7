//! Cross-sheet join of auxiliary rows onto a primary client row.
//!
//! Sheets are related only through the denormalized `Client Name*` text. The
//! comparison is plain string equality: case, inner and trailing whitespace all
//! matter, so `"Acme Inc"` and `"Acme Inc "` are different clients.

use crate::domain::sheet::{ClientWorkbook, SheetRow, email_cols, service_cols, workspace_cols};

/// Auxiliary rows belonging to one client.
#[derive(Debug, Default)]
pub struct JoinedRows<'a> {
    /// First matching `Google Workspace` row; later duplicates are ignored.
    pub workspace: Option<&'a SheetRow>,
    /// Matching `Email Accounts` rows that carry an address, in sheet order.
    pub email_accounts: Vec<&'a SheetRow>,
    /// Matching `Additional Services` rows that carry a service name, in sheet order.
    pub additional_services: Vec<&'a SheetRow>,
}

/// Collects the auxiliary rows whose client-name key equals `client_name`.
pub fn join_client<'a>(client_name: &str, workbook: &'a ClientWorkbook) -> JoinedRows<'a> {
    let workspace = workbook
        .workspaces
        .iter()
        .find(|row| row.text(workspace_cols::CLIENT_NAME) == client_name);

    let email_accounts = workbook
        .email_accounts
        .iter()
        .filter(|row| row.text(email_cols::CLIENT_NAME) == client_name)
        .filter(|row| !row.is_blank(email_cols::EMAIL_ADDRESS))
        .collect();

    let additional_services = workbook
        .additional_services
        .iter()
        .filter(|row| row.text(service_cols::CLIENT_NAME) == client_name)
        .filter(|row| !row.is_blank(service_cols::SERVICE_NAME))
        .collect();

    JoinedRows {
        workspace,
        email_accounts,
        additional_services,
    }
}
