use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-global counter backing envelope sequence ids.
static SEQUENCE_COUNTER: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1));

/// Returns the next call sequence id.
///
/// Sequence ids correlate a reply envelope with the call that produced it,
/// so they only need to be unique among a connection's in-flight calls. The
/// counter is masked into the non-negative i32 range, which keeps every
/// emitted id valid for the envelope field.
#[inline]
pub fn next_sequence_id() -> i32 {
    (SEQUENCE_COUNTER.fetch_add(1, Ordering::Relaxed) & 0x7fff_ffff) as i32
}
