//! Repository trait for client records.

use crate::domain::entities::{Client, ClientRecord, ClientSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage of clients together with their workspace, mailboxes and services.
///
/// A client and all of its nested records are written atomically: a failed
/// insert leaves nothing behind.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClientRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Inserts one client with all nested records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on unique violations.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, record: ClientRecord) -> Result<Client, AppError>;

    /// Finds a client by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError>;

    /// Lists clients ordered by name, optionally filtered by a case-insensitive
    /// substring of the client name, code or domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(
        &self,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<Vec<ClientSummary>, AppError>;

    /// Counts clients matching the same filter as [`ClientRepository::list`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, search: Option<String>) -> Result<i64, AppError>;

    /// Deletes a client and its nested records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the client does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
