//! Client lookup and removal.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Client, ClientSummary};
use crate::domain::repositories::ClientRepository;
use crate::error::AppError;

/// Read and delete operations on stored clients.
pub struct ClientService<R: ClientRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ClientRepository + ?Sized> ClientService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns one page of client summaries and the total matching count.
    ///
    /// # Arguments
    ///
    /// - `page` - 1-indexed page number
    /// - `page_size` - items per page
    /// - `search` - optional case-insensitive filter on name, code or domain
    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        search: Option<String>,
    ) -> Result<(Vec<ClientSummary>, i64), AppError> {
        let offset = (page - 1) * page_size;
        let items = self
            .repository
            .list(offset, page_size, search.clone())
            .await?;
        let total = self.repository.count(search).await?;

        Ok((items, total))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no client has this ID.
    pub async fn get(&self, id: i64) -> Result<Client, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found", json!({ "id": id })))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count(None).await
    }
}
