//! Per-network attempt history, bounded per target.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum retained attempts per network; oldest entries drop first.
pub const MAX_ATTEMPTS_PER_NETWORK: usize = 50;

/// One past attack attempt against a network. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub timestamp: DateTime<Utc>,
    pub succeeded: bool,
    pub handshake: bool,
    /// Signal strength at the time of the attempt (dBm).
    pub signal: i32,
    pub channel: u16,
    pub hour: u8,
}

/// Append-only history of attempts, keyed by BSSID, capped FIFO.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    history: HashMap<String, Vec<AttemptRecord>>,
}

impl Ledger {
    /// Append an attempt, evicting the oldest entry once the cap is reached.
    pub fn append(&mut self, bssid: &str, record: AttemptRecord) {
        let entries = self.history.entry(bssid.to_string()).or_default();
        entries.push(record);
        while entries.len() > MAX_ATTEMPTS_PER_NETWORK {
            entries.remove(0);
        }
    }

    /// Full retained history for a network, empty if never attacked.
    pub fn attempts(&self, bssid: &str) -> &[AttemptRecord] {
        self.history.get(bssid).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_attempts(&self) -> usize {
        self.history.values().map(Vec::len).sum()
    }

    pub fn total_successes(&self) -> usize {
        self.history
            .values()
            .flat_map(|entries| entries.iter())
            .filter(|a| a.succeeded)
            .count()
    }

    /// Number of distinct networks with at least one recorded attempt.
    pub fn networks_with_history(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(succeeded: bool, signal: i32) -> AttemptRecord {
        AttemptRecord {
            timestamp: Utc::now(),
            succeeded,
            handshake: succeeded,
            signal,
            channel: 6,
            hour: 12,
        }
    }

    #[test]
    fn test_append_and_read() {
        let mut ledger = Ledger::default();
        ledger.append("AA:BB:CC:DD:EE:FF", attempt(true, -50));
        ledger.append("AA:BB:CC:DD:EE:FF", attempt(false, -60));

        assert_eq!(ledger.attempts("AA:BB:CC:DD:EE:FF").len(), 2);
        assert!(ledger.attempts("11:22:33:44:55:66").is_empty());
        assert_eq!(ledger.total_attempts(), 2);
        assert_eq!(ledger.total_successes(), 1);
        assert_eq!(ledger.networks_with_history(), 1);
    }

    #[test]
    fn test_cap_evicts_oldest_first() {
        let mut ledger = Ledger::default();
        for i in 0..(MAX_ATTEMPTS_PER_NETWORK + 10) {
            // Encode the insertion index in the signal field so eviction
            // order is observable.
            ledger.append("AA:BB:CC:DD:EE:FF", attempt(false, -(i as i32)));
        }

        let attempts = ledger.attempts("AA:BB:CC:DD:EE:FF");
        assert_eq!(attempts.len(), MAX_ATTEMPTS_PER_NETWORK);
        // The first 10 entries (signals 0..-9) must be gone.
        assert_eq!(attempts[0].signal, -10);
        assert_eq!(attempts.last().unwrap().signal, -59);
    }
}
