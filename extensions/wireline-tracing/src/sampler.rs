use std::sync::atomic::{AtomicU64, Ordering};

/// Deterministic counting sampler.
///
/// A rate of `r` samples the first of every `round(1 / r)` decisions, so a
/// service under steady load traces a predictable fraction of its calls.
/// Rates at or below zero never sample; rates at or above one always do.
#[derive(Debug)]
pub struct CountingSampler {
    every: u64,
    counter: AtomicU64,
}

impl CountingSampler {
    pub fn new(rate: f64) -> Self {
        let every = if rate <= 0.0 {
            0
        } else if rate >= 1.0 {
            1
        } else {
            (1.0 / rate).round() as u64
        };
        CountingSampler {
            every,
            counter: AtomicU64::new(0),
        }
    }

    /// The sampling decision for the next request.
    pub fn is_sampled(&self) -> bool {
        if self.every == 0 {
            return false;
        }
        self.counter.fetch_add(1, Ordering::Relaxed) % self.every == 0
    }
}
