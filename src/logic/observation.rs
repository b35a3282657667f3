//! Normalized record of one discovered wireless network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Encryption class reported by the scanner.
///
/// Anything beyond "no encryption" is collapsed into `Protected`; the exact
/// cipher suite does not matter for target selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encryption {
    Open,
    Protected,
}

/// One discovered network at a point in time.
///
/// Identity is the BSSID. A later scan replaces the whole record for the same
/// BSSID; attempt history is kept separately in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub bssid: String,
    pub ssid: String,
    pub channel: u16,
    /// Signal strength in dBm, more negative = weaker.
    pub signal: i32,
    pub encryption: Encryption,
    pub last_seen: DateTime<Utc>,
}
