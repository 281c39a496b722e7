//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, ClientService, ImportService, VisitService};
use crate::domain::repositories::{ClientRepository, TokenRepository, VisitRepository};
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::persistence::{
    PgClientRepository, PgTokenRepository, PgVisitRepository,
};

/// Services behind trait objects so tests can swap in in-memory repositories.
#[derive(Clone)]
pub struct AppState {
    pub import_service: Arc<ImportService<dyn ClientRepository>>,
    pub client_service: Arc<ClientService<dyn ClientRepository>>,
    pub visit_service: Arc<VisitService<dyn VisitRepository>>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
    /// Read client IPs from forwarding headers.
    pub behind_proxy: bool,
}

impl AppState {
    /// Assembles the state from arbitrary repository implementations.
    pub fn from_repositories(
        clients: Arc<dyn ClientRepository>,
        visits: Arc<dyn VisitRepository>,
        tokens: Arc<dyn TokenRepository>,
        visit_tx: mpsc::Sender<VisitEvent>,
        token_signing_secret: String,
        max_upload_bytes: usize,
        behind_proxy: bool,
    ) -> Self {
        Self {
            import_service: Arc::new(ImportService::new(clients.clone(), max_upload_bytes)),
            client_service: Arc::new(ClientService::new(clients)),
            visit_service: Arc::new(VisitService::new(visits, visit_tx)),
            auth_service: Arc::new(AuthService::new(tokens, token_signing_secret)),
            behind_proxy,
        }
    }

    /// PostgreSQL-backed state used by the server.
    pub fn new(
        pool: Arc<PgPool>,
        visit_tx: mpsc::Sender<VisitEvent>,
        token_signing_secret: String,
        max_upload_bytes: usize,
        behind_proxy: bool,
    ) -> Self {
        Self::from_repositories(
            Arc::new(PgClientRepository::new(pool.clone())),
            Arc::new(PgVisitRepository::new(pool.clone())),
            Arc::new(PgTokenRepository::new(pool)),
            visit_tx,
            token_signing_secret,
            max_upload_bytes,
            behind_proxy,
        )
    }
}
