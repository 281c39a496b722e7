//! Row-oriented view of the client import workbook.
//!
//! The spreadsheet reader turns every sheet into a list of [`SheetRow`]s keyed by
//! header text. Sheet and column names live here so that the reader, the
//! template writer and the import service agree on one layout.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::utils::cell_normalizer::cell_text;

/// Sheet names of the client import workbook.
pub mod sheet_names {
    pub const CLIENT_INFORMATION: &str = "Client Information";
    pub const GOOGLE_WORKSPACE: &str = "Google Workspace";
    pub const EMAIL_ACCOUNTS: &str = "Email Accounts";
    pub const ADDITIONAL_SERVICES: &str = "Additional Services";
    pub const INSTRUCTIONS: &str = "Instructions";
}

/// Column headers of the `Client Information` sheet.
pub mod client_cols {
    pub const CLIENT_NAME: &str = "Client Name*";
    pub const CLIENT_CODE: &str = "Client Code";
    pub const CONTACT_PERSON: &str = "Contact Person";
    pub const CONTACT_EMAIL: &str = "Contact Email";
    pub const CONTACT_PHONE: &str = "Contact Phone";
    pub const NOTES: &str = "Notes";
    pub const DOMAIN_NAME: &str = "Domain Name*";
    pub const DOMAIN_PLATFORM: &str = "Domain Platform";
    pub const DOMAIN_USERNAME: &str = "Domain Username";
    pub const DOMAIN_PASSWORD: &str = "Domain Password";
    pub const DOMAIN_EXPIRY_DATE: &str = "Domain Expiry Date";
    pub const DOMAIN_AUTO_RENEWAL: &str = "Domain Auto Renewal";
    pub const DOMAIN_NOTES: &str = "Domain Notes";
    pub const WEBSITE_URL: &str = "Website URL";
    pub const WEBSITE_PLATFORM: &str = "Website Platform";
    pub const WEBSITE_USERNAME: &str = "Website Username";
    pub const WEBSITE_PASSWORD: &str = "Website Password";
    pub const HOSTING_PROVIDER: &str = "Hosting Provider";
    pub const WEBSITE_NOTES: &str = "Website Notes";

    pub const ALL: &[&str] = &[
        CLIENT_NAME,
        CLIENT_CODE,
        CONTACT_PERSON,
        CONTACT_EMAIL,
        CONTACT_PHONE,
        NOTES,
        DOMAIN_NAME,
        DOMAIN_PLATFORM,
        DOMAIN_USERNAME,
        DOMAIN_PASSWORD,
        DOMAIN_EXPIRY_DATE,
        DOMAIN_AUTO_RENEWAL,
        DOMAIN_NOTES,
        WEBSITE_URL,
        WEBSITE_PLATFORM,
        WEBSITE_USERNAME,
        WEBSITE_PASSWORD,
        HOSTING_PROVIDER,
        WEBSITE_NOTES,
    ];
}

/// Column headers of the `Google Workspace` sheet.
pub mod workspace_cols {
    pub const CLIENT_NAME: &str = "Client Name*";
    pub const ADMIN_EMAIL: &str = "Admin Email";
    pub const ADMIN_PASSWORD: &str = "Admin Password";
    pub const SUBSCRIPTION_TYPE: &str = "Subscription Type";
    pub const MONTHLY_FEE: &str = "Monthly Fee";
    pub const RENEWAL_DATE: &str = "Renewal Date";
    pub const NOTES: &str = "Workspace Notes";

    pub const ALL: &[&str] = &[
        CLIENT_NAME,
        ADMIN_EMAIL,
        ADMIN_PASSWORD,
        SUBSCRIPTION_TYPE,
        MONTHLY_FEE,
        RENEWAL_DATE,
        NOTES,
    ];
}

/// Column headers of the `Email Accounts` sheet.
pub mod email_cols {
    pub const CLIENT_NAME: &str = "Client Name*";
    pub const EMAIL_ADDRESS: &str = "Email Address*";
    pub const PASSWORD: &str = "Password";
    pub const LOGIN_URL: &str = "Login URL";
    pub const NOTES: &str = "Notes";

    pub const ALL: &[&str] = &[CLIENT_NAME, EMAIL_ADDRESS, PASSWORD, LOGIN_URL, NOTES];
}

/// Column headers of the `Additional Services` sheet.
pub mod service_cols {
    pub const CLIENT_NAME: &str = "Client Name*";
    pub const SERVICE_NAME: &str = "Service Name*";
    pub const SERVICE_TYPE: &str = "Service Type";
    pub const USERNAME: &str = "Username";
    pub const PASSWORD: &str = "Password";
    pub const LOGIN_URL: &str = "Login URL";
    pub const EXPIRY_DATE: &str = "Expiry Date";
    pub const NOTES: &str = "Notes";

    pub const ALL: &[&str] = &[
        CLIENT_NAME,
        SERVICE_NAME,
        SERVICE_TYPE,
        USERNAME,
        PASSWORD,
        LOGIN_URL,
        EXPIRY_DATE,
        NOTES,
    ];
}

/// A single spreadsheet cell, independent of the workbook library.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Date cell already resolved against the workbook's date system.
    Date(NaiveDate),
    /// Date cell in the 1900 leap-bug range; holds the raw serial number.
    DateSerial(f64),
}

impl CellValue {
    /// True for empty cells and text made only of whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// One data row of a sheet, keyed by header text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    /// 1-based row number inside the sheet (the header is row 1).
    pub row_number: u32,
    pub cells: HashMap<String, CellValue>,
}

impl SheetRow {
    pub fn new(row_number: u32) -> Self {
        Self {
            row_number,
            cells: HashMap::new(),
        }
    }

    /// Builder used by tests and the template round trip.
    pub fn with(mut self, column: &str, value: CellValue) -> Self {
        self.cells.insert(column.to_string(), value);
        self
    }

    /// Returns the cell under `column`, or [`CellValue::Empty`] when absent.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }

    /// Cell text exactly as entered, empty string when absent.
    pub fn text(&self, column: &str) -> String {
        cell_text(self.get(column))
    }

    /// True when the cell under `column` is blank.
    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).is_blank()
    }
}

/// All sheets of an uploaded client workbook.
///
/// Auxiliary sheets missing from the upload are empty vectors.
#[derive(Debug, Clone, Default)]
pub struct ClientWorkbook {
    pub clients: Vec<SheetRow>,
    pub workspaces: Vec<SheetRow>,
    pub email_accounts: Vec<SheetRow>,
    pub additional_services: Vec<SheetRow>,
}
