//! Identifier and clock utilities
//!
//! Widget instances get a monotonically increasing id so completions for a
//! destroyed instance can be recognized; image widgets use the clock for
//! cache-busting URLs.

use std::fmt;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Identity of one activation of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Hands out fresh instance ids.
#[derive(Debug, Default)]
pub struct InstanceIds {
    next: u64,
}

impl InstanceIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id. Never returns the same id twice.
    pub fn allocate(&mut self) -> InstanceId {
        self.next += 1;
        InstanceId(self.next)
    }
}
