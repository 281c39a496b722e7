//! Client record with its nested credential sub-records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Registered domain of a client.
///
/// `name` must be non-empty for the owning record to be accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientDomain {
    pub name: String,
    pub platform: String,
    pub username: String,
    pub password: String,
    pub expiry_date: Option<NaiveDate>,
    pub auto_renewal: bool,
    pub notes: String,
}

/// Mailbox hosted under a client's Google Workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmailAccount {
    pub email: String,
    pub password: String,
    pub login_url: String,
    pub notes: String,
}

/// Google Workspace subscription of a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoogleWorkspace {
    pub admin_email: String,
    pub admin_password: String,
    pub subscription_type: String,
    pub monthly_fee: Option<Decimal>,
    pub renewal_date: Option<NaiveDate>,
    pub notes: String,
    pub email_accounts: Vec<EmailAccount>,
}

/// Website hosting and CMS access of a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Website {
    pub url: String,
    pub platform: String,
    pub username: String,
    pub password: String,
    pub hosting_provider: String,
    pub notes: String,
}

/// Any other subscription the agency manages for a client (SSL, CDN, analytics...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdditionalService {
    pub service_name: String,
    pub service_type: String,
    pub username: String,
    pub password: String,
    pub login_url: String,
    pub expiry_date: Option<NaiveDate>,
    pub notes: String,
}

/// Fully assembled client, ready to be persisted.
///
/// Built once per accepted spreadsheet row and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientRecord {
    pub client_name: String,
    pub client_code: String,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub notes: String,
    pub domain: ClientDomain,
    pub google_workspace: Option<GoogleWorkspace>,
    pub website: Website,
    pub additional_services: Vec<AdditionalService>,
}

/// A persisted client.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: i64,
    pub record: ClientRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight projection used by list views.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSummary {
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

impl ClientSummary {
    /// Builds the list projection of a full client.
    pub fn from_client(client: &Client) -> Self {
        let record = &client.record;
        Self {
            id: client.id,
            client_name: record.client_name.clone(),
            client_code: record.client_code.clone(),
            domain_name: record.domain.name.clone(),
            domain_expiry_date: record.domain.expiry_date,
            has_workspace: record.google_workspace.is_some(),
            email_account_count: record
                .google_workspace
                .as_ref()
                .map_or(0, |w| w.email_accounts.len() as i64),
            additional_service_count: record.additional_services.len() as i64,
            created_at: client.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_children() {
        let record = ClientRecord {
            client_name: "Acme Inc".to_string(),
            domain: ClientDomain {
                name: "acme.com".to_string(),
                ..Default::default()
            },
            google_workspace: Some(GoogleWorkspace {
                email_accounts: vec![EmailAccount::default(), EmailAccount::default()],
                ..Default::default()
            }),
            additional_services: vec![AdditionalService::default()],
            ..Default::default()
        };
        let client = Client {
            id: 3,
            record,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let summary = ClientSummary::from_client(&client);

        assert_eq!(summary.id, 3);
        assert_eq!(summary.domain_name, "acme.com");
        assert!(summary.has_workspace);
        assert_eq!(summary.email_account_count, 2);
        assert_eq!(summary.additional_service_count, 1);
    }

    #[test]
    fn test_summary_without_workspace() {
        let client = Client {
            id: 1,
            record: ClientRecord::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let summary = ClientSummary::from_client(&client);
        assert!(!summary.has_workspace);
        assert_eq!(summary.email_account_count, 0);
    }
}
