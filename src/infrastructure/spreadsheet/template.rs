//! Downloadable client import template.

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::domain::sheet::{
    client_cols, email_cols, service_cols, sheet_names, workspace_cols,
};

use super::SpreadsheetError;

pub const TEMPLATE_FILE_NAME: &str = "client-import-template.xlsx";
pub const TEMPLATE_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Example row of the `Client Information` sheet, in [`client_cols::ALL`] order.
pub const CLIENT_EXAMPLE: &[&str] = &[
    "Acme Corporation",
    "ACME001",
    "Jane Doe",
    "jane@acme.example",
    "+1 555 0100",
    "Key account",
    "acme.example",
    "GoDaddy",
    "acme-admin",
    "domain-pass-123",
    "2026-12-31",
    "Yes",
    "Renews annually",
    "https://acme.example",
    "WordPress",
    "wp-admin",
    "wp-pass-123",
    "SiteGround",
    "Managed hosting",
];

/// Example row of the `Google Workspace` sheet, in [`workspace_cols::ALL`] order.
pub const WORKSPACE_EXAMPLE: &[&str] = &[
    "Acme Corporation",
    "admin@acme.example",
    "ws-pass-123",
    "Business Starter",
    "6",
    "2026-06-30",
    "Billed monthly",
];

/// Example row of the `Email Accounts` sheet, in [`email_cols::ALL`] order.
pub const EMAIL_EXAMPLE: &[&str] = &[
    "Acme Corporation",
    "info@acme.example",
    "mail-pass-123",
    "https://mail.google.com",
    "Shared inbox",
];

/// Example row of the `Additional Services` sheet, in [`service_cols::ALL`] order.
pub const SERVICE_EXAMPLE: &[&str] = &[
    "Acme Corporation",
    "Cloudflare",
    "CDN",
    "cf-admin",
    "cf-pass-123",
    "https://dash.cloudflare.com",
    "2026-09-30",
    "Pro plan",
];

const INSTRUCTIONS: &[&str] = &[
    "Client bulk import",
    "",
    "1. Fill one row per client in 'Client Information'. Columns marked * are required.",
    "2. 'Google Workspace', 'Email Accounts' and 'Additional Services' are optional.",
    "3. Rows on those sheets are linked to a client by 'Client Name*', which must match exactly",
    "   (same capitalisation, no extra spaces).",
    "4. Dates: use YYYY-MM-DD or a date-formatted cell.",
    "5. Monthly Fee: a plain number, currency symbols are ignored.",
    "6. Domain Auto Renewal: Yes or No.",
    "7. Email accounts without an address and services without a name are ignored.",
    "8. Rows without a client name are skipped; rows without a domain name are rejected.",
    "",
    "Delete the example rows before uploading your own data.",
];

const COLUMN_WIDTH: f64 = 24.0;

/// Builds the import template workbook.
///
/// Four data sheets carry bold, frozen headers and one example row each, so the
/// untouched template imports as exactly one client. An `Instructions` sheet
/// explains the layout.
///
/// # Errors
///
/// Returns [`SpreadsheetError::Build`] if the workbook cannot be serialized.
pub fn build_template() -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    write_data_sheet(
        workbook.add_worksheet(),
        sheet_names::CLIENT_INFORMATION,
        client_cols::ALL,
        CLIENT_EXAMPLE,
        &header_format,
    )?;
    write_data_sheet(
        workbook.add_worksheet(),
        sheet_names::GOOGLE_WORKSPACE,
        workspace_cols::ALL,
        WORKSPACE_EXAMPLE,
        &header_format,
    )?;
    write_data_sheet(
        workbook.add_worksheet(),
        sheet_names::EMAIL_ACCOUNTS,
        email_cols::ALL,
        EMAIL_EXAMPLE,
        &header_format,
    )?;
    write_data_sheet(
        workbook.add_worksheet(),
        sheet_names::ADDITIONAL_SERVICES,
        service_cols::ALL,
        SERVICE_EXAMPLE,
        &header_format,
    )?;

    let instructions = workbook.add_worksheet();
    instructions.set_name(sheet_names::INSTRUCTIONS)?;
    instructions.set_column_width(0, 100.0)?;
    for (row, line) in INSTRUCTIONS.iter().enumerate() {
        if row == 0 {
            instructions.write_string_with_format(0, 0, *line, &header_format)?;
        } else {
            instructions.write_string(row as u32, 0, *line)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_data_sheet(
    ws: &mut Worksheet,
    name: &str,
    headers: &[&str],
    example: &[&str],
    header_format: &Format,
) -> Result<(), SpreadsheetError> {
    ws.set_name(name)?;
    ws.set_freeze_panes(1, 0)?;

    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        ws.set_column_width(col, COLUMN_WIDTH)?;
        ws.write_string_with_format(0, col, *header, header_format)?;
    }

    for (col, (header, value)) in headers.iter().zip(example).enumerate() {
        let col = col as u16;
        // fees go in as numbers so the sheet sums them
        if *header == workspace_cols::MONTHLY_FEE
            && let Ok(amount) = value.parse::<f64>()
        {
            ws.write_number(1, col, amount)?;
        } else {
            ws.write_string(1, col, *value)?;
        }
    }

    Ok(())
}
