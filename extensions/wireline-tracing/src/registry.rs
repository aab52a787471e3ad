use crate::{BatchRecorder, ConsoleRecorder, CountingSampler, SpanRecorder, Tracer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sample rate applied when a config names none.
pub const DEFAULT_SAMPLE_RATE: f64 = 0.1;

/// Flush period of the batching remote recorder.
pub const DEFAULT_HTTP_INTERVAL: Duration = Duration::from_secs(1);

/// Buffered-span count that triggers an early batch flush.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Construction options for a service's tracer.
#[derive(Debug, Clone, Default)]
pub struct TracerConfig {
    /// Sample every request regardless of `sample_rate`.
    pub debug: bool,

    /// Remote span-collector URL (e.g. `http://localhost:9411/api/v2/spans`).
    /// When absent, spans go to the console recorder instead.
    pub endpoint: Option<String>,

    /// Fraction of requests to sample. Defaults to [`DEFAULT_SAMPLE_RATE`].
    pub sample_rate: Option<f64>,

    /// Flush period of the batching remote recorder. Defaults to
    /// [`DEFAULT_HTTP_INTERVAL`].
    pub http_interval: Option<Duration>,

    /// Span count that triggers an early batch flush. Defaults to
    /// [`DEFAULT_MAX_BATCH_SIZE`].
    pub max_batch_size: Option<usize>,
}

/// Per-service tracer cache.
///
/// An explicit object rather than ambient process state: construct one at
/// startup and hand it (via `Arc`) to everything that needs a tracer. The
/// map is append-only; a service name resolves to the same tracer instance
/// for the registry's lifetime, no matter what options later lookups carry.
#[derive(Default)]
pub struct TracerRegistry {
    tracers: Mutex<HashMap<String, Arc<Tracer>>>,
}

impl TracerRegistry {
    pub fn new() -> Self {
        TracerRegistry::default()
    }

    /// Returns the tracer for `service_name`, building it on first use.
    pub fn get_tracer_for_service(
        &self,
        service_name: &str,
        config: &TracerConfig,
    ) -> Arc<Tracer> {
        let mut tracers = self.tracers.lock().unwrap();
        tracers
            .entry(service_name.to_string())
            .or_insert_with(|| Arc::new(build_tracer(service_name, config)))
            .clone()
    }
}

fn build_tracer(service_name: &str, config: &TracerConfig) -> Tracer {
    let rate = if config.debug {
        1.0
    } else {
        config.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE)
    };
    Tracer::new(
        service_name,
        CountingSampler::new(rate),
        recorder_for_config(config),
    )
}

fn recorder_for_config(config: &TracerConfig) -> Arc<dyn SpanRecorder> {
    match &config.endpoint {
        Some(endpoint) => Arc::new(BatchRecorder::new(
            endpoint.clone(),
            config.http_interval.unwrap_or(DEFAULT_HTTP_INTERVAL),
            config.max_batch_size.unwrap_or(DEFAULT_MAX_BATCH_SIZE),
        )),
        None => Arc::new(ConsoleRecorder),
    }
}
