use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Time-based id source: milliseconds since the epoch, strictly increasing
/// within the process even when several records are created in the same
/// millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self { Self::default() }

    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Next id for which `taken` is false, skipping ids already present in a
    /// collection (e.g. written by another process before a restart).
    pub fn next_unused(&self, taken: impl Fn(i64) -> bool) -> i64 {
        loop {
            let id = self.next();
            if !taken(id) {
                return id;
            }
        }
    }
}
