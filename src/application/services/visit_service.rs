//! Visitor tracking: queueing new visits and reading recorded ones.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::entities::{Visit, VisitSummary};
use crate::domain::repositories::VisitRepository;
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;

/// Number of pages listed in [`VisitService::summary`].
pub const TOP_PAGES: i64 = 10;

/// Service in front of the visit queue and the visit repository.
///
/// Writes never touch the database on the request path: events are handed
/// to [`crate::domain::visit_worker::run_visit_worker`] through a bounded
/// channel and dropped when it is full.
pub struct VisitService<R: VisitRepository + ?Sized> {
    repository: Arc<R>,
    sender: mpsc::Sender<VisitEvent>,
}

impl<R: VisitRepository + ?Sized> VisitService<R> {
    pub fn new(repository: Arc<R>, sender: mpsc::Sender<VisitEvent>) -> Self {
        Self { repository, sender }
    }

    /// Queues a visit for persistence.
    ///
    /// Returns `false` when the event was dropped because the queue is full
    /// or the worker has stopped.
    pub fn enqueue(&self, event: VisitEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(session_id = %event.session_id, "Visit queue full, dropping event");
                metrics::counter!("visits_dropped_total").increment(1);
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::error!("Visit worker is not running");
                metrics::counter!("visits_dropped_total").increment(1);
                false
            }
        }
    }

    /// Free slots and total size of the visit queue.
    pub fn queue_status(&self) -> (usize, usize) {
        (self.sender.capacity(), self.sender.max_capacity())
    }

    pub fn queue_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Returns one page of visits (newest first) and the total count.
    pub async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<Visit>, i64), AppError> {
        let offset = (page - 1) * page_size;
        let items = self.repository.list(offset, page_size).await?;
        let total = self.repository.count().await?;

        Ok((items, total))
    }

    pub async fn summary(&self) -> Result<VisitSummary, AppError> {
        self.repository.summary(TOP_PAGES).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
