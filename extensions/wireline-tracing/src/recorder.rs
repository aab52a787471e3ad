use crate::Span;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Sink for finished spans.
///
/// Recording must never block or fail the call that produced the span;
/// implementations absorb their own delivery problems.
pub trait SpanRecorder: Send + Sync {
    fn record(&self, span: Span);
}

/// Prints finished spans through the process logger.
///
/// The default recorder when no collector endpoint is configured.
pub struct ConsoleRecorder;

impl SpanRecorder for ConsoleRecorder {
    fn record(&self, span: Span) {
        let started_at = chrono::DateTime::from_timestamp_micros(span.timestamp as i64)
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        let body = serde_json::to_string(&span).unwrap_or_else(|_| format!("{span:?}"));
        tracing::info!(
            trace_id = %span.trace_id,
            name = %span.name,
            %started_at,
            span = %body,
            "span recorded"
        );
    }
}

/// Buffers spans in memory and posts them to a remote collector in batches.
///
/// A background task flushes on a fixed interval; [`SpanRecorder::record`]
/// nudges it early once the buffer reaches the batch-size threshold.
/// Delivery failures are logged at debug level and the batch is dropped;
/// spans still buffered when the process exits are lost. Requires a running
/// tokio runtime at construction.
pub struct BatchRecorder {
    buffer: Arc<Mutex<Vec<Span>>>,
    max_batch_size: usize,
    flush_tx: mpsc::UnboundedSender<()>,
}

impl BatchRecorder {
    pub fn new(endpoint: String, http_interval: Duration, max_batch_size: usize) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let (flush_tx, mut flush_rx) = mpsc::unbounded_channel::<()>();

        let task_buffer = buffer.clone();
        tokio::spawn(async move {
            let client = reqwest::Client::new();
            let mut ticker = tokio::time::interval(http_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    nudge = flush_rx.recv() => {
                        if nudge.is_none() {
                            // Recorder dropped: push out what is left, then stop.
                            flush(&client, &endpoint, &task_buffer).await;
                            break;
                        }
                    }
                }
                flush(&client, &endpoint, &task_buffer).await;
            }
        });

        BatchRecorder {
            buffer,
            max_batch_size,
            flush_tx,
        }
    }
}

impl SpanRecorder for BatchRecorder {
    fn record(&self, span: Span) {
        let reached_threshold = {
            let mut buffer = self.buffer.lock().unwrap();
            buffer.push(span);
            buffer.len() >= self.max_batch_size
        };
        if reached_threshold {
            let _ = self.flush_tx.send(());
        }
    }
}

async fn flush(client: &reqwest::Client, endpoint: &str, buffer: &Arc<Mutex<Vec<Span>>>) {
    let batch: Vec<Span> = std::mem::take(&mut *buffer.lock().unwrap());
    if batch.is_empty() {
        return;
    }
    match client.post(endpoint).json(&batch).send().await {
        Ok(response) if response.status().is_success() => {}
        Ok(response) => {
            tracing::debug!(
                status = response.status().as_u16(),
                dropped = batch.len(),
                "span collector refused batch"
            );
        }
        Err(err) => {
            tracing::debug!(%err, dropped = batch.len(), "span batch delivery failed");
        }
    }
}
