#![allow(dead_code)]

use agency_cms::application::services::hash_token_with_secret;
use agency_cms::domain::entities::{
    Client, ClientRecord, ClientSummary, NewVisit, PageCount, Visit, VisitSummary,
};
use agency_cms::domain::repositories::{
    ApiToken, ClientRepository, TokenRepository, VisitRepository,
};
use agency_cms::domain::visit_event::VisitEvent;
use agency_cms::error::AppError;
use agency_cms::state::AppState;
use async_trait::async_trait;
use chrono::Utc;
use rust_xlsxwriter::Workbook;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_TOKEN: &str = "test-token-0123456789";
pub const REVOKED_TOKEN: &str = "revoked-token-0123456789";
pub const TEST_UPLOAD_LIMIT: usize = 64 * 1024;

/// Client storage in a `Vec`, with an optional client name whose insert fails.
#[derive(Default)]
pub struct InMemoryClientRepository {
    clients: Mutex<Vec<Client>>,
    pub fail_on: Option<String>,
}

impl InMemoryClientRepository {
    pub fn failing_on(client_name: &str) -> Self {
        Self {
            fail_on: Some(client_name.to_string()),
            ..Default::default()
        }
    }

    pub fn all(&self) -> Vec<Client> {
        self.clients.lock().unwrap().clone()
    }

    fn matches(client: &Client, search: &Option<String>) -> bool {
        let Some(term) = search else { return true };
        let term = term.to_lowercase();
        let r = &client.record;
        [&r.client_name, &r.client_code, &r.domain.name]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn create(&self, record: ClientRecord) -> Result<Client, AppError> {
        if self.fail_on.as_deref() == Some(record.client_name.as_str()) {
            return Err(AppError::internal("Database error", json!({})));
        }

        let mut clients = self.clients.lock().unwrap();
        let client = Client {
            id: clients.len() as i64 + 1,
            record,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        clients.push(client.clone());
        Ok(client)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError> {
        Ok(self.all().into_iter().find(|c| c.id == id))
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<Vec<ClientSummary>, AppError> {
        let mut clients: Vec<Client> = self
            .all()
            .into_iter()
            .filter(|c| Self::matches(c, &search))
            .collect();
        clients.sort_by(|a, b| a.record.client_name.cmp(&b.record.client_name));

        Ok(clients
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(ClientSummary::from_client)
            .collect())
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        Ok(self
            .all()
            .iter()
            .filter(|c| Self::matches(c, &search))
            .count() as i64)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut clients = self.clients.lock().unwrap();
        let before = clients.len();
        clients.retain(|c| c.id != id);
        if clients.len() == before {
            return Err(AppError::not_found("Client not found", json!({ "id": id })));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryVisitRepository {
    visits: Mutex<Vec<Visit>>,
}

impl InMemoryVisitRepository {
    pub fn all(&self) -> Vec<Visit> {
        self.visits.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisitRepository for InMemoryVisitRepository {
    async fn record(&self, visit: NewVisit) -> Result<Visit, AppError> {
        let mut visits = self.visits.lock().unwrap();
        let saved = Visit {
            id: visits.len() as i64 + 1,
            session_id: visit.session_id,
            page_url: visit.page_url,
            page_path: visit.page_path,
            referrer: visit.referrer,
            user_agent: visit.user_agent,
            ip: visit.ip,
            language: visit.language,
            screen: visit.screen,
            timezone: visit.timezone,
            storage: visit.storage,
            visited_at: visit.visited_at,
        };
        visits.push(saved.clone());
        Ok(saved)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Visit>, AppError> {
        let mut visits = self.all();
        visits.sort_by(|a, b| b.visited_at.cmp(&a.visited_at).then(b.id.cmp(&a.id)));
        Ok(visits
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.all().len() as i64)
    }

    async fn summary(&self, top: i64) -> Result<VisitSummary, AppError> {
        let visits = self.all();
        let sessions: HashSet<&str> = visits.iter().map(|v| v.session_id.as_str()).collect();

        let mut per_page: HashMap<&str, i64> = HashMap::new();
        for v in &visits {
            *per_page.entry(v.page_path.as_str()).or_default() += 1;
        }
        let mut top_pages: Vec<PageCount> = per_page
            .into_iter()
            .map(|(path, visits)| PageCount {
                page_path: path.to_string(),
                visits,
            })
            .collect();
        top_pages.sort_by(|a, b| b.visits.cmp(&a.visits).then(a.page_path.cmp(&b.page_path)));
        top_pages.truncate(top as usize);

        Ok(VisitSummary {
            total_visits: visits.len() as i64,
            unique_sessions: sessions.len() as i64,
            top_pages,
        })
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut visits = self.visits.lock().unwrap();
        let before = visits.len();
        visits.retain(|v| v.id != id);
        if visits.len() == before {
            return Err(AppError::not_found("Visit not found", json!({ "id": id })));
        }
        Ok(())
    }
}

/// Token storage seeded with [`TEST_TOKEN`] (active) and [`REVOKED_TOKEN`].
pub struct InMemoryTokenRepository {
    tokens: Mutex<Vec<ApiToken>>,
}

impl Default for InMemoryTokenRepository {
    fn default() -> Self {
        let token = |id: i64, name: &str, raw: &str, revoked: bool| ApiToken {
            id,
            name: name.to_string(),
            token_hash: hash_token_with_secret(TEST_SECRET, raw),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: revoked.then(Utc::now),
        };

        Self {
            tokens: Mutex::new(vec![
                token(1, "test", TEST_TOKEN, false),
                token(2, "old", REVOKED_TOKEN, true),
            ]),
        }
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn validate_token(&self, token_hash: &str) -> Result<bool, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.token_hash == token_hash && t.revoked_at.is_none()))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        for t in self.tokens.lock().unwrap().iter_mut() {
            if t.token_hash == token_hash {
                t.last_used_at = Some(Utc::now());
            }
        }
        Ok(())
    }

    async fn create_token(&self, name: &str, token_hash: &str) -> Result<ApiToken, AppError> {
        let mut tokens = self.tokens.lock().unwrap();
        let token = ApiToken {
            id: tokens.len() as i64 + 1,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tokens.push(token.clone());
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(self.tokens.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        for t in self.tokens.lock().unwrap().iter_mut() {
            if t.id == id {
                t.revoked_at = Some(Utc::now());
                return Ok(());
            }
        }
        Err(AppError::not_found("Token not found", json!({ "id": id })))
    }
}

pub struct TestContext {
    pub state: AppState,
    pub clients: Arc<InMemoryClientRepository>,
    pub visits: Arc<InMemoryVisitRepository>,
    pub visit_rx: mpsc::Receiver<VisitEvent>,
}

pub fn create_test_state() -> TestContext {
    create_test_state_with(InMemoryClientRepository::default(), 100)
}

pub fn create_test_state_with(clients: InMemoryClientRepository, queue: usize) -> TestContext {
    let clients = Arc::new(clients);
    let visits = Arc::new(InMemoryVisitRepository::default());
    let (tx, rx) = mpsc::channel(queue);

    let state = AppState::from_repositories(
        clients.clone(),
        visits.clone(),
        Arc::new(InMemoryTokenRepository::default()),
        tx,
        TEST_SECRET.to_string(),
        TEST_UPLOAD_LIMIT,
        false,
    );

    TestContext {
        state,
        clients,
        visits,
        visit_rx: rx,
    }
}

/// Builds `.xlsx` bytes sheet by sheet; empty strings leave the cell blank.
pub struct WorkbookBuilder {
    workbook: Workbook,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
        }
    }

    pub fn sheet(mut self, name: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        let sheet = self.workbook.add_worksheet();
        sheet.set_name(name).unwrap();

        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32 + 1, col as u16, *value).unwrap();
                }
            }
        }

        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.workbook.save_to_buffer().unwrap()
    }
}

/// The three-row workbook from the import documentation: one valid client,
/// one without a domain and one without a name.
pub fn scenario_workbook() -> Vec<u8> {
    use agency_cms::domain::sheet::{client_cols, sheet_names};

    WorkbookBuilder::new()
        .sheet(
            sheet_names::CLIENT_INFORMATION,
            &[client_cols::CLIENT_NAME, client_cols::DOMAIN_NAME],
            &[&["Acme Inc", "acme.com"], &["Beta LLC", ""], &["", "orphan.com"]],
        )
        .build()
}
