//! Attack log entries and agent-level enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether attempts are delegated to real radio tooling or simulated.
/// Decided once at startup, immutable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    Real,
    Simulated,
}

/// How an attack was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackMode {
    AiControlled,
    Manual,
}

/// Attack lifecycle. Only `Launched` → terminal transitions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackStatus {
    Launched,
    HandshakeCaptured,
    Failed,
}

/// One entry in the append-only attack log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackRecord {
    pub id: Uuid,
    pub bssid: String,
    pub ssid: String,
    pub mode: AttackMode,
    pub timestamp: DateTime<Utc>,
    pub status: AttackStatus,
    /// Live score at decision time; 0 for manual attacks.
    pub score_at_decision: i32,
    pub execution: ExecutionMode,
}

/// A captured handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeRecord {
    pub bssid: String,
    pub ssid: String,
    pub timestamp: DateTime<Utc>,
    pub mode: AttackMode,
    pub execution: ExecutionMode,
}

/// Agent personality state, rendered by the display and dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Learning,
    Thinking,
    Hunting,
    Attacking,
    Excited,
    Smart,
}

impl Mood {
    pub fn face(self) -> &'static str {
        match self {
            Mood::Learning => "(◕‿‿◕)",
            Mood::Thinking => "(◔_◔)",
            Mood::Hunting => "(⌐■_■)",
            Mood::Attacking => "(◣_◢)",
            Mood::Excited => "(ᵔ◡◡ᵔ)",
            Mood::Smart => "(✜‿‿✜)",
        }
    }
}
