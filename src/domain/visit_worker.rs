//! Background worker persisting visit events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::repositories::VisitRepository;
use crate::domain::visit_event::VisitEvent;

/// Attempts after the first failed insert.
const MAX_RETRIES: usize = 3;

/// Drains the visit channel until every sender is dropped.
///
/// Each event is written through `repository` with jittered exponential
/// backoff (roughly 50ms, 100ms, 200ms). Events that still fail are logged and
/// counted in `visits_dropped_total`; tracking never blocks the site.
pub async fn run_visit_worker<R>(mut rx: mpsc::Receiver<VisitEvent>, repository: Arc<R>)
where
    R: VisitRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        let visit = event.into_new_visit();
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(25)
            .map(jitter)
            .take(MAX_RETRIES);

        let result = Retry::spawn(strategy, || {
            let repository = repository.clone();
            let visit = visit.clone();
            async move { repository.record(visit).await }
        })
        .await;

        match result {
            Ok(saved) => {
                debug!(visit_id = saved.id, path = %saved.page_path, "Visit recorded");
                metrics::counter!("visits_recorded_total").increment(1);
            }
            Err(e) => {
                warn!(session_id = %visit.session_id, error = %e, "Dropping visit after retries");
                metrics::counter!("visits_dropped_total").increment(1);
            }
        }
    }

    info!("Visit worker stopped");
}
