//! Background persistence of click events.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Attempts per event, including the first one.
const MAX_ATTEMPTS: usize = 3;

/// Drains the click channel until every sender is dropped.
///
/// Up to `concurrency` events are written at the same time. Each event is
/// retried with exponential backoff on transient store errors; events that
/// still fail, or that reference a missing link, are logged and dropped.
pub async fn run_click_worker<C>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<C>,
    concurrency: usize,
) where
    C: ClickRepository + ?Sized + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            let _permit = permit;
            persist_event(repository.as_ref(), event).await;
        });
    }

    // Wait for in-flight writes before reporting shutdown.
    let _ = semaphore.acquire_many(concurrency.max(1) as u32).await;
    info!("Click worker stopped");
}

/// Persists a single event with retry.
///
/// Returns `true` if the event was stored.
pub async fn persist_event<C>(repository: &C, event: ClickEvent) -> bool
where
    C: ClickRepository + ?Sized,
{
    let link_id = event.link_id;
    let new_click = event.into_new_click();

    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(std::time::Duration::from_secs(1))
        .map(jitter)
        .take(MAX_ATTEMPTS - 1);

    let result = RetryIf::spawn(
        strategy,
        move || repository.record_click(new_click.clone()),
        |e: &AppError| e.is_transient(),
    )
    .await;

    match result {
        Ok(click) => {
            debug!(link_id, click_id = click.id, "Click recorded");
            true
        }
        Err(e) => {
            error!(link_id, error = %e, "Failed to record click, dropping event");
            false
        }
    }
}
