use agency_cms::domain::entities::{
    AdditionalService, ClientDomain, ClientRecord, EmailAccount, GoogleWorkspace, Website,
};
use agency_cms::domain::repositories::ClientRepository;
use agency_cms::error::AppError;
use agency_cms::infrastructure::persistence::PgClientRepository;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;

fn full_record(name: &str) -> ClientRecord {
    ClientRecord {
        client_name: name.to_string(),
        client_code: "ACME-001".to_string(),
        contact_person: "Jane Doe".to_string(),
        contact_email: "jane@acme.com".to_string(),
        contact_phone: "+1 555 0100".to_string(),
        notes: "Key account".to_string(),
        domain: ClientDomain {
            name: "acme.com".to_string(),
            platform: "GoDaddy".to_string(),
            username: "acme-admin".to_string(),
            password: "secret".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 3, 15),
            auto_renewal: true,
            notes: String::new(),
        },
        google_workspace: Some(GoogleWorkspace {
            admin_email: "admin@acme.com".to_string(),
            admin_password: "pw".to_string(),
            subscription_type: "Business Starter".to_string(),
            monthly_fee: Some(Decimal::from_str("1200.50").unwrap()),
            renewal_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            notes: String::new(),
            email_accounts: vec![
                EmailAccount {
                    email: "info@acme.com".to_string(),
                    ..Default::default()
                },
                EmailAccount {
                    email: "sales@acme.com".to_string(),
                    ..Default::default()
                },
            ],
        }),
        website: Website {
            url: "https://acme.com".to_string(),
            platform: "WordPress".to_string(),
            ..Default::default()
        },
        additional_services: vec![AdditionalService {
            service_name: "Cloudflare".to_string(),
            service_type: "CDN".to_string(),
            ..Default::default()
        }],
    }
}

fn minimal_record(name: &str, domain: &str) -> ClientRecord {
    ClientRecord {
        client_name: name.to_string(),
        domain: ClientDomain {
            name: domain.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_monthly_fee_keeps_scale_and_magnitude(pool: PgPool) {
    let repo = PgClientRepository::new(Arc::new(pool));

    for fee in ["12.345", "98765432109.5"] {
        let mut record = full_record(&format!("Client {fee}"));
        if let Some(ws) = record.google_workspace.as_mut() {
            ws.monthly_fee = Some(Decimal::from_str(fee).unwrap());
        }

        let created = repo.create(record).await.unwrap();
        let loaded = repo.find_by_id(created.id).await.unwrap().unwrap();
        let stored = loaded.record.google_workspace.unwrap().monthly_fee;
        assert_eq!(stored, Some(Decimal::from_str(fee).unwrap()));
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_and_load_full_client(pool: PgPool) {
    let repo = PgClientRepository::new(Arc::new(pool));
    let record = full_record("Acme Inc");

    let created = repo.create(record.clone()).await.unwrap();
    assert_eq!(created.record, record);

    let loaded = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.record, record);

    let workspace = loaded.record.google_workspace.unwrap();
    assert_eq!(workspace.email_accounts[0].email, "info@acme.com");
    assert_eq!(workspace.email_accounts[1].email, "sales@acme.com");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_client_without_workspace(pool: PgPool) {
    let repo = PgClientRepository::new(Arc::new(pool));

    let created = repo
        .create(minimal_record("Beta LLC", "beta.io"))
        .await
        .unwrap();

    let loaded = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.id, created.id);
    assert!(loaded.record.google_workspace.is_none());
    assert!(loaded.record.additional_services.is_empty());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_list_search_and_count(pool: PgPool) {
    let repo = PgClientRepository::new(Arc::new(pool));

    repo.create(full_record("Acme Inc")).await.unwrap();
    repo.create(minimal_record("Beta LLC", "beta.io")).await.unwrap();
    repo.create(minimal_record("100% Organic", "organic.farm"))
        .await
        .unwrap();

    let all = repo.list(0, 10, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].client_name, "100% Organic");
    assert_eq!(all[1].client_name, "Acme Inc");
    assert!(all[1].has_workspace);
    assert_eq!(all[1].email_account_count, 2);
    assert_eq!(all[1].additional_service_count, 1);

    let found = repo.list(0, 10, Some("ACME".to_string())).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(repo.count(Some("beta".to_string())).await.unwrap(), 1);

    // Wildcards in the search term are literal.
    assert_eq!(repo.count(Some("%".to_string())).await.unwrap(), 1);
    assert_eq!(repo.count(None).await.unwrap(), 3);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_cascades(pool: PgPool) {
    let repo = PgClientRepository::new(Arc::new(pool.clone()));

    let created = repo.create(full_record("Acme Inc")).await.unwrap();
    repo.delete(created.id).await.unwrap();

    assert!(repo.find_by_id(created.id).await.unwrap().is_none());

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM client_email_accounts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);

    let again = repo.delete(created.id).await;
    assert!(matches!(again, Err(AppError::NotFound { .. })));
}
