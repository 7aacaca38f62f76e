use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out request ids.
///
/// Ids start at the current Unix time in milliseconds, so they still look like
/// timestamps in server logs, then count up by one. Two submissions in the same
/// millisecond therefore never share an id.
#[derive(Debug)]
pub struct RequestIdGenerator {
    next: AtomicU64,
}

impl RequestIdGenerator {
    pub fn new() -> Self {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        Self::starting_at(now_ms)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for RequestIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
