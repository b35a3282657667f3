//! Coarse global success priors, keyed by channel and hour of day.
//!
//! Counters only ever go up during a run. They act as a cheap prior that is
//! independent of any single target.

use std::collections::HashMap;
use std::fmt;

/// Composite key for a pattern counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternKey {
    Channel(u16),
    Hour(u8),
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKey::Channel(ch) => write!(f, "channel:{}", ch),
            PatternKey::Hour(h) => write!(f, "hour:{}", h),
        }
    }
}

/// Running success counters per pattern key.
#[derive(Debug, Clone, Default)]
pub struct PatternStats {
    counts: HashMap<PatternKey, u32>,
}

impl PatternStats {
    /// Record one successful attempt against `channel` at `hour`.
    pub fn record_success(&mut self, channel: u16, hour: u8) {
        *self.counts.entry(PatternKey::Channel(channel)).or_insert(0) += 1;
        *self.counts.entry(PatternKey::Hour(hour)).or_insert(0) += 1;
    }

    pub fn count(&self, key: PatternKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Best-performing pattern key, ties broken by key order so reads are
    /// reproducible. `None` when nothing has succeeded yet.
    pub fn best(&self) -> Option<(PatternKey, u32)> {
        self.counts
            .iter()
            .max_by_key(|(key, count)| (**count, **key))
            .map(|(key, count)| (*key, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
