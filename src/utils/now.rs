use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current timestamp in microseconds since the UNIX epoch.
///
/// Falls back to `0` if the system clock reports a time before the epoch,
/// so callers never have to handle a clock error on a hot path.
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
