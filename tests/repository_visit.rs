use agency_cms::domain::entities::NewVisit;
use agency_cms::domain::repositories::VisitRepository;
use agency_cms::error::AppError;
use agency_cms::infrastructure::persistence::PgVisitRepository;
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

fn visit(session: &str, path: &str, minutes_ago: i64) -> NewVisit {
    NewVisit {
        session_id: session.to_string(),
        page_url: format!("https://agency.test{path}"),
        page_path: path.to_string(),
        referrer: None,
        user_agent: Some("Mozilla/5.0".to_string()),
        ip: Some("203.0.113.7".to_string()),
        language: Some("en-US".to_string()),
        screen: None,
        timezone: None,
        storage: json!({ "theme": "dark" }),
        visited_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_record_visit(pool: PgPool) {
    let repo = PgVisitRepository::new(Arc::new(pool));

    let saved = repo.record(visit("s-1", "/about", 0)).await.unwrap();

    assert!(saved.id > 0);
    assert_eq!(saved.ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(saved.storage["theme"], "dark");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = PgVisitRepository::new(Arc::new(pool));

    repo.record(visit("a", "/", 30)).await.unwrap();
    repo.record(visit("b", "/pricing", 5)).await.unwrap();
    repo.record(visit("c", "/contact", 15)).await.unwrap();

    let page = repo.list(0, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].page_path, "/pricing");
    assert_eq!(page[1].page_path, "/contact");

    assert_eq!(repo.count().await.unwrap(), 3);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_summary(pool: PgPool) {
    let repo = PgVisitRepository::new(Arc::new(pool));

    repo.record(visit("a", "/", 3)).await.unwrap();
    repo.record(visit("a", "/services", 2)).await.unwrap();
    repo.record(visit("b", "/services", 1)).await.unwrap();

    let summary = repo.summary(1).await.unwrap();

    assert_eq!(summary.total_visits, 3);
    assert_eq!(summary.unique_sessions, 2);
    assert_eq!(summary.top_pages.len(), 1);
    assert_eq!(summary.top_pages[0].page_path, "/services");
    assert_eq!(summary.top_pages[0].visits, 2);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_visit(pool: PgPool) {
    let repo = PgVisitRepository::new(Arc::new(pool));

    let saved = repo.record(visit("a", "/", 0)).await.unwrap();

    repo.delete(saved.id).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 0);

    let again = repo.delete(saved.id).await;
    assert!(matches!(again, Err(AppError::NotFound { .. })));
}
