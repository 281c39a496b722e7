//! PostgreSQL implementation of client repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::domain::entities::{
    AdditionalService, Client, ClientDomain, ClientRecord, ClientSummary, EmailAccount,
    GoogleWorkspace, Website,
};
use crate::domain::repositories::ClientRepository;
use crate::error::AppError;

/// PostgreSQL repository for clients.
///
/// The domain and website live on the `clients` row; the workspace, its
/// mailboxes and the additional services live in child tables that cascade
/// on delete. Each [`ClientRepository::create`] runs in its own transaction.
pub struct PgClientRepository {
    pool: Arc<PgPool>,
}

impl PgClientRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load(&self, row: ClientRow) -> Result<Client, AppError> {
        let pool = self.pool.as_ref();

        let workspace: Option<WorkspaceRow> = sqlx::query_as(
            r#"
            SELECT admin_email, admin_password, subscription_type, monthly_fee, renewal_date, notes
            FROM client_workspaces
            WHERE client_id = $1
            "#,
        )
        .bind(row.id)
        .fetch_optional(pool)
        .await?;

        let google_workspace = match workspace {
            Some(ws) => {
                let accounts: Vec<EmailRow> = sqlx::query_as(
                    r#"
                    SELECT email, password, login_url, notes
                    FROM client_email_accounts
                    WHERE client_id = $1
                    ORDER BY position
                    "#,
                )
                .bind(row.id)
                .fetch_all(pool)
                .await?;

                Some(ws.into_workspace(accounts))
            }
            None => None,
        };

        let services: Vec<ServiceRow> = sqlx::query_as(
            r#"
            SELECT service_name, service_type, username, password, login_url, expiry_date, notes
            FROM client_additional_services
            WHERE client_id = $1
            ORDER BY position
            "#,
        )
        .bind(row.id)
        .fetch_all(pool)
        .await?;

        Ok(row.into_client(google_workspace, services))
    }
}

const CLIENT_COLUMNS: &str = r#"
    id, client_name, client_code, contact_person, contact_email, contact_phone, notes,
    domain_name, domain_platform, domain_username, domain_password, domain_expiry_date,
    domain_auto_renewal, domain_notes,
    website_url, website_platform, website_username, website_password, hosting_provider,
    website_notes, created_at, updated_at
"#;

#[derive(FromRow)]
struct ClientRow {
    id: i64,
    client_name: String,
    client_code: String,
    contact_person: String,
    contact_email: String,
    contact_phone: String,
    notes: String,
    domain_name: String,
    domain_platform: String,
    domain_username: String,
    domain_password: String,
    domain_expiry_date: Option<NaiveDate>,
    domain_auto_renewal: bool,
    domain_notes: String,
    website_url: String,
    website_platform: String,
    website_username: String,
    website_password: String,
    hosting_provider: String,
    website_notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClientRow {
    fn into_client(
        self,
        google_workspace: Option<GoogleWorkspace>,
        services: Vec<ServiceRow>,
    ) -> Client {
        Client {
            id: self.id,
            record: ClientRecord {
                client_name: self.client_name,
                client_code: self.client_code,
                contact_person: self.contact_person,
                contact_email: self.contact_email,
                contact_phone: self.contact_phone,
                notes: self.notes,
                domain: ClientDomain {
                    name: self.domain_name,
                    platform: self.domain_platform,
                    username: self.domain_username,
                    password: self.domain_password,
                    expiry_date: self.domain_expiry_date,
                    auto_renewal: self.domain_auto_renewal,
                    notes: self.domain_notes,
                },
                google_workspace,
                website: Website {
                    url: self.website_url,
                    platform: self.website_platform,
                    username: self.website_username,
                    password: self.website_password,
                    hosting_provider: self.hosting_provider,
                    notes: self.website_notes,
                },
                additional_services: services.into_iter().map(Into::into).collect(),
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct WorkspaceRow {
    admin_email: String,
    admin_password: String,
    subscription_type: String,
    monthly_fee: Option<Decimal>,
    renewal_date: Option<NaiveDate>,
    notes: String,
}

impl WorkspaceRow {
    fn into_workspace(self, accounts: Vec<EmailRow>) -> GoogleWorkspace {
        GoogleWorkspace {
            admin_email: self.admin_email,
            admin_password: self.admin_password,
            subscription_type: self.subscription_type,
            monthly_fee: self.monthly_fee,
            renewal_date: self.renewal_date,
            notes: self.notes,
            email_accounts: accounts
                .into_iter()
                .map(|a| EmailAccount {
                    email: a.email,
                    password: a.password,
                    login_url: a.login_url,
                    notes: a.notes,
                })
                .collect(),
        }
    }
}

#[derive(FromRow)]
struct EmailRow {
    email: String,
    password: String,
    login_url: String,
    notes: String,
}

#[derive(FromRow)]
struct ServiceRow {
    service_name: String,
    service_type: String,
    username: String,
    password: String,
    login_url: String,
    expiry_date: Option<NaiveDate>,
    notes: String,
}

impl From<ServiceRow> for AdditionalService {
    fn from(s: ServiceRow) -> Self {
        AdditionalService {
            service_name: s.service_name,
            service_type: s.service_type,
            username: s.username,
            password: s.password,
            login_url: s.login_url,
            expiry_date: s.expiry_date,
            notes: s.notes,
        }
    }
}

#[derive(FromRow)]
struct SummaryRow {
    id: i64,
    client_name: String,
    client_code: String,
    domain_name: String,
    domain_expiry_date: Option<NaiveDate>,
    has_workspace: bool,
    email_account_count: i64,
    additional_service_count: i64,
    created_at: DateTime<Utc>,
}

impl From<SummaryRow> for ClientSummary {
    fn from(r: SummaryRow) -> Self {
        ClientSummary {
            id: r.id,
            client_name: r.client_name,
            client_code: r.client_code,
            domain_name: r.domain_name,
            domain_expiry_date: r.domain_expiry_date,
            has_workspace: r.has_workspace,
            email_account_count: r.email_account_count,
            additional_service_count: r.additional_service_count,
            created_at: r.created_at,
        }
    }
}

/// Wraps a search term for `ILIKE`, escaping its wildcards.
fn like_pattern(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(|s| {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{escaped}%")
        })
}

async fn insert_children(
    tx: &mut Transaction<'_, Postgres>,
    client_id: i64,
    record: &ClientRecord,
) -> Result<(), sqlx::Error> {
    if let Some(ws) = &record.google_workspace {
        sqlx::query(
            r#"
            INSERT INTO client_workspaces
                (client_id, admin_email, admin_password, subscription_type, monthly_fee, renewal_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(client_id)
        .bind(&ws.admin_email)
        .bind(&ws.admin_password)
        .bind(&ws.subscription_type)
        .bind(ws.monthly_fee)
        .bind(ws.renewal_date)
        .bind(&ws.notes)
        .execute(&mut **tx)
        .await?;

        for (position, account) in ws.email_accounts.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO client_email_accounts
                    (client_id, position, email, password, login_url, notes)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(client_id)
            .bind(position as i32)
            .bind(&account.email)
            .bind(&account.password)
            .bind(&account.login_url)
            .bind(&account.notes)
            .execute(&mut **tx)
            .await?;
        }
    }

    for (position, service) in record.additional_services.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO client_additional_services
                (client_id, position, service_name, service_type, username, password, login_url, expiry_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(client_id)
        .bind(position as i32)
        .bind(&service.service_name)
        .bind(&service.service_type)
        .bind(&service.username)
        .bind(&service.password)
        .bind(&service.login_url)
        .bind(service.expiry_date)
        .bind(&service.notes)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn create(&self, record: ClientRecord) -> Result<Client, AppError> {
        let mut tx = self.pool.begin().await?;

        let (id, created_at, updated_at): (i64, DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO clients (
                client_name, client_code, contact_person, contact_email, contact_phone, notes,
                domain_name, domain_platform, domain_username, domain_password,
                domain_expiry_date, domain_auto_renewal, domain_notes,
                website_url, website_platform, website_username, website_password,
                hosting_provider, website_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(&record.client_name)
        .bind(&record.client_code)
        .bind(&record.contact_person)
        .bind(&record.contact_email)
        .bind(&record.contact_phone)
        .bind(&record.notes)
        .bind(&record.domain.name)
        .bind(&record.domain.platform)
        .bind(&record.domain.username)
        .bind(&record.domain.password)
        .bind(record.domain.expiry_date)
        .bind(record.domain.auto_renewal)
        .bind(&record.domain.notes)
        .bind(&record.website.url)
        .bind(&record.website.platform)
        .bind(&record.website.username)
        .bind(&record.website.password)
        .bind(&record.website.hosting_provider)
        .bind(&record.website.notes)
        .fetch_one(&mut *tx)
        .await?;

        insert_children(&mut tx, id, &record).await?;
        tx.commit().await?;

        Ok(Client {
            id,
            record,
            created_at,
            updated_at,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError> {
        let row: Option<ClientRow> =
            sqlx::query_as(&format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        match row {
            Some(row) => Ok(Some(self.load(row).await?)),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<Vec<ClientSummary>, AppError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT
                c.id,
                c.client_name,
                c.client_code,
                c.domain_name,
                c.domain_expiry_date,
                (w.client_id IS NOT NULL) AS has_workspace,
                (SELECT COUNT(*) FROM client_email_accounts e WHERE e.client_id = c.id) AS email_account_count,
                (SELECT COUNT(*) FROM client_additional_services s WHERE s.client_id = c.id) AS additional_service_count,
                c.created_at
            FROM clients c
            LEFT JOIN client_workspaces w ON w.client_id = c.id
            WHERE ($1::text IS NULL
                OR c.client_name ILIKE $1
                OR c.client_code ILIKE $1
                OR c.domain_name ILIKE $1)
            ORDER BY c.client_name, c.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(like_pattern(search))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ClientSummary::from).collect())
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM clients c
            WHERE ($1::text IS NULL
                OR c.client_name ILIKE $1
                OR c.client_code ILIKE $1
                OR c.domain_name ILIKE $1)
            "#,
        )
        .bind(like_pattern(search))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Client not found", json!({ "id": id })));
        }

        Ok(())
    }
}
