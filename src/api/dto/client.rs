//! DTOs for client listing and lookup.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::domain::entities::{Client, ClientRecord, ClientSummary};

/// Query parameters of `GET /api/clients`.
#[derive(Debug, Deserialize)]
pub struct ClientListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Case-insensitive substring of the client name, code or domain.
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClientListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<ClientSummaryItem>,
}

#[derive(Debug, Serialize)]
pub struct ClientSummaryItem {
    pub id: i64,
    pub client_name: String,
    pub client_code: String,
    pub domain_name: String,
    pub domain_expiry_date: Option<NaiveDate>,
    pub has_workspace: bool,
    pub email_account_count: i64,
    pub additional_service_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ClientSummary> for ClientSummaryItem {
    fn from(s: ClientSummary) -> Self {
        Self {
            id: s.id,
            client_name: s.client_name,
            client_code: s.client_code,
            domain_name: s.domain_name,
            domain_expiry_date: s.domain_expiry_date,
            has_workspace: s.has_workspace,
            email_account_count: s.email_account_count,
            additional_service_count: s.additional_service_count,
            created_at: s.created_at,
        }
    }
}

/// Full client with every nested record.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub id: i64,
    #[serde(flatten)]
    pub record: ClientRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            record: c.record,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
