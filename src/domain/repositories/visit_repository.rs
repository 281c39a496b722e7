//! Repository trait for visitor tracking.

use crate::domain::entities::{NewVisit, Visit, VisitSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage of page visits captured by the tracking endpoint.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Persists a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, visit: NewVisit) -> Result<Visit, AppError>;

    /// Lists visits, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Visit>, AppError>;

    /// Counts all visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Totals, distinct sessions and the `top` most visited paths.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn summary(&self, top: i64) -> Result<VisitSummary, AppError>;

    /// Deletes one visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the visit does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
