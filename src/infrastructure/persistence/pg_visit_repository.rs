//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewVisit, PageCount, Visit, VisitSummary};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// PostgreSQL repository for tracked visits.
///
/// IP addresses are stored as `INET` and read back without the netmask.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

const VISIT_COLUMNS: &str = r#"
    id, session_id, page_url, page_path, referrer, user_agent, host(ip) AS ip,
    language, screen, timezone, storage, visited_at
"#;

#[derive(FromRow)]
struct VisitRow {
    id: i64,
    session_id: String,
    page_url: String,
    page_path: String,
    referrer: Option<String>,
    user_agent: Option<String>,
    ip: Option<String>,
    language: Option<String>,
    screen: Option<String>,
    timezone: Option<String>,
    storage: Value,
    visited_at: DateTime<Utc>,
}

impl From<VisitRow> for Visit {
    fn from(r: VisitRow) -> Self {
        Visit {
            id: r.id,
            session_id: r.session_id,
            page_url: r.page_url,
            page_path: r.page_path,
            referrer: r.referrer,
            user_agent: r.user_agent,
            ip: r.ip,
            language: r.language,
            screen: r.screen,
            timezone: r.timezone,
            storage: r.storage,
            visited_at: r.visited_at,
        }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record(&self, visit: NewVisit) -> Result<Visit, AppError> {
        let row: VisitRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO visits (
                session_id, page_url, page_path, referrer, user_agent, ip,
                language, screen, timezone, storage, visited_at
            )
            VALUES ($1, $2, $3, $4, $5, $6::inet, $7, $8, $9, $10, $11)
            RETURNING {VISIT_COLUMNS}
            "#
        ))
        .bind(&visit.session_id)
        .bind(&visit.page_url)
        .bind(&visit.page_path)
        .bind(&visit.referrer)
        .bind(&visit.user_agent)
        .bind(&visit.ip)
        .bind(&visit.language)
        .bind(&visit.screen)
        .bind(&visit.timezone)
        .bind(&visit.storage)
        .bind(visit.visited_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Visit>, AppError> {
        let rows: Vec<VisitRow> = sqlx::query_as(&format!(
            "SELECT {VISIT_COLUMNS} FROM visits ORDER BY visited_at DESC, id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Visit::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM visits")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn summary(&self, top: i64) -> Result<VisitSummary, AppError> {
        let (total_visits, unique_sessions): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), COUNT(DISTINCT session_id) FROM visits")
                .fetch_one(self.pool.as_ref())
                .await?;

        let top_pages: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT page_path, COUNT(*) AS visits
            FROM visits
            GROUP BY page_path
            ORDER BY visits DESC, page_path
            LIMIT $1
            "#,
        )
        .bind(top)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(VisitSummary {
            total_visits,
            unique_sessions,
            top_pages: top_pages
                .into_iter()
                .map(|(page_path, visits)| PageCount { page_path, visits })
                .collect(),
        })
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM visits WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Visit not found", json!({ "id": id })));
        }

        Ok(())
    }
}
