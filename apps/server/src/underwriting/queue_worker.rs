//! Queue worker for deferred loan evaluations.
//!
//! Receives application ids from an mpsc channel and spawns one delayed
//! evaluation task per id. Jobs are independent: a slow or failing
//! evaluation never blocks the queue.

use std::sync::Arc;
use std::time::Duration;

use financehub_core::{
    loans::{UnderwritingScheduler, UnderwritingServiceTrait},
    Error, Result,
};
use tokio::sync::mpsc;

/// Scheduler that hands application ids to the queue worker.
pub struct QueueScheduler {
    tx: mpsc::UnboundedSender<String>,
}

impl QueueScheduler {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }
}

impl UnderwritingScheduler for QueueScheduler {
    fn schedule(&self, application_id: &str) -> Result<()> {
        self.tx
            .send(application_id.to_string())
            .map_err(|_| Error::Unexpected("Underwriting queue is closed".to_string()))
    }
}

/// Runs the underwriting queue worker until every sender is dropped.
///
/// Evaluations already waiting on their delay keep running after the
/// channel closes.
pub async fn underwriting_queue_worker(
    mut rx: mpsc::UnboundedReceiver<String>,
    service: Arc<dyn UnderwritingServiceTrait>,
    delay: Duration,
) {
    tracing::info!("Underwriting queue worker started");

    while let Some(application_id) = rx.recv().await {
        tracing::debug!(
            "Evaluation of {} scheduled in {}s",
            application_id,
            delay.as_secs()
        );
        let service = service.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match service.process_application(&application_id).await {
                Ok(application) => tracing::info!(
                    "Application {} evaluated: {:?}",
                    application_id,
                    application.status
                ),
                Err(e) => tracing::warn!("Evaluation of {} failed: {}", application_id, e),
            }
        });
    }

    tracing::info!("Underwriting queue worker shutting down");
}
