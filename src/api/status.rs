//! Status surface data contract.
//!
//! These are the shapes the dashboard and the display pull; rendering them
//! is someone else's problem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::observation::Encryption;
use crate::logic::records::{ExecutionMode, Mood};

/// Point-in-time agent status, consistent at the instant of read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub name: String,
    pub version: String,
    pub mood: Mood,
    pub face: String,
    pub epoch: u64,
    pub execution: ExecutionMode,
    pub networks_count: usize,
    pub attacks_count: usize,
    pub handshakes_count: usize,
    pub learning: LearningStats,
}

/// Aggregate learning statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningStats {
    pub total_attempts: usize,
    /// Percent over all recorded attempts.
    pub success_rate: f64,
    pub networks_learned: usize,
    /// Best-performing pattern key ("channel:6", "hour:14"), "none" if empty.
    pub best_pattern: String,
    pub exploration_rate: f64,
}

/// A network table entry annotated with its live score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkView {
    pub bssid: String,
    pub ssid: String,
    pub channel: u16,
    pub signal: i32,
    pub encryption: Encryption,
    pub last_seen: DateTime<Utc>,
    pub score: i32,
    pub eligible: bool,
}
