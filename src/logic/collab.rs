#![allow(dead_code)]

//! External collaborator contracts and their simulated implementations.
//!
//! Physical radio work (scanning, deauth, capture) lives behind narrow
//! traits. The core never drives hardware directly; when no monitor-mode
//! interface is present the agent falls back to the simulated
//! implementations so the whole loop stays exercisable.

use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::config::AgentConfig;
use super::observation::{Encryption, Observation};
use super::records::{AttackMode, ExecutionMode};

#[derive(Debug, Error)]
pub enum CollabError {
    #[error("scan tool unavailable: {0}")]
    Unavailable(String),

    #[error("scan timed out after {0:?}")]
    Timeout(Duration),
}

/// Network discovery. A failed scan degrades to "no new observations this
/// epoch"; it is never fatal to the orchestrator.
pub trait Scanner: Send + Sync {
    fn scan(&self) -> Result<Vec<Observation>, CollabError>;
}

/// One attack delegation. Bounded-time by contract; timeouts map to a
/// failed outcome inside the implementation.
#[derive(Debug, Clone)]
pub struct AttackRequest<'a> {
    pub bssid: &'a str,
    pub channel: u16,
    pub execution: ExecutionMode,
    pub mode: AttackMode,
}

#[derive(Debug, Clone, Copy)]
pub struct AttackOutcome {
    pub succeeded: bool,
    pub handshake: bool,
}

pub trait AttackTool: Send + Sync {
    fn attempt(&self, req: AttackRequest<'_>) -> AttackOutcome;
}

/// Decide once at startup whether real radio tooling is available. A
/// monitor-mode interface must already exist; the core never creates one.
pub fn detect_execution_mode(config: &AgentConfig) -> ExecutionMode {
    if config.force_simulation {
        tracing::info!("Simulation forced by configuration");
        return ExecutionMode::Simulated;
    }

    let path = format!("/sys/class/net/{}", config.monitor_interface);
    if std::path::Path::new(&path).exists() {
        tracing::info!(
            "Monitor interface {} present - REAL attack mode",
            config.monitor_interface
        );
        ExecutionMode::Real
    } else {
        tracing::info!(
            "No monitor interface {} - SIMULATION mode",
            config.monitor_interface
        );
        ExecutionMode::Simulated
    }
}

// ============================================================================
// SIMULATED IMPLEMENTATIONS
// ============================================================================

/// Base signal jitter per scan (dBm).
const SIGNAL_JITTER_DBM: i32 = 4;
/// Chance a neighborhood AP is momentarily out of range.
const DROPOUT_CHANCE: f64 = 0.1;

/// A stable fake neighborhood with jittered signal readings.
pub struct SimulatedScanner {
    rng: Mutex<StdRng>,
}

impl SimulatedScanner {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SimulatedScanner {
    fn default() -> Self {
        Self::new()
    }
}

const NEIGHBORHOOD: &[(&str, &str, u16, i32, Encryption)] = &[
    ("AA:BB:CC:11:22:33", "HomeNet-2G", 6, -48, Encryption::Protected),
    ("AA:BB:CC:44:55:66", "CoffeeShop", 1, -62, Encryption::Open),
    ("DE:AD:BE:EF:00:01", "Office-5G", 36, -71, Encryption::Protected),
    ("12:34:56:78:9A:BC", "NetFiber-AC", 11, -55, Encryption::Protected),
    ("CA:FE:00:00:00:01", "GuestWifi", 3, -83, Encryption::Open),
    ("BA:5E:BA:11:00:02", "Lab-IoT", 9, -79, Encryption::Protected),
];

impl Scanner for SimulatedScanner {
    fn scan(&self) -> Result<Vec<Observation>, CollabError> {
        let mut rng = self.rng.lock();
        let mut observations = Vec::with_capacity(NEIGHBORHOOD.len());

        for &(bssid, ssid, channel, base_signal, encryption) in NEIGHBORHOOD {
            if rng.gen::<f64>() < DROPOUT_CHANCE {
                continue;
            }
            observations.push(Observation {
                bssid: bssid.to_string(),
                ssid: ssid.to_string(),
                channel,
                signal: base_signal + rng.gen_range(-SIGNAL_JITTER_DBM..=SIGNAL_JITTER_DBM),
                encryption,
                last_seen: chrono::Utc::now(),
            });
        }

        Ok(observations)
    }
}

/// Simulated success rate for AI-selected targets.
const AI_SUCCESS_RATE: f64 = 0.4;
/// Simulated success rate for manually commanded targets.
const MANUAL_SUCCESS_RATE: f64 = 0.25;

/// Simulated deauth + capture. Sleeps for a short dwell to mimic the
/// capture window of the real tooling.
pub struct SimulatedAttackTool {
    rng: Mutex<StdRng>,
    dwell: Duration,
}

impl SimulatedAttackTool {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            dwell: Duration::from_millis(1500),
        }
    }

    pub fn with_seed(seed: u64, dwell: Duration) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            dwell,
        }
    }
}

impl Default for SimulatedAttackTool {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackTool for SimulatedAttackTool {
    fn attempt(&self, req: AttackRequest<'_>) -> AttackOutcome {
        tracing::debug!(
            "Simulated attempt against {} (ch {}, {:?}/{:?})",
            req.bssid,
            req.channel,
            req.execution,
            req.mode
        );

        thread::sleep(self.dwell);

        let success_rate = match req.mode {
            AttackMode::AiControlled => AI_SUCCESS_RATE,
            AttackMode::Manual => MANUAL_SUCCESS_RATE,
        };
        let succeeded = self.rng.lock().gen::<f64>() < success_rate;

        AttackOutcome {
            succeeded,
            handshake: succeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_scanner_is_seedable() {
        let a = SimulatedScanner::with_seed(42).scan().unwrap();
        let b = SimulatedScanner::with_seed(42).scan().unwrap();

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.bssid, y.bssid);
            assert_eq!(x.signal, y.signal);
        }
    }

    #[test]
    fn test_simulated_attack_always_returns() {
        let tool = SimulatedAttackTool::with_seed(7, Duration::ZERO);
        let outcome = tool.attempt(AttackRequest {
            bssid: "AA:BB:CC:11:22:33",
            channel: 6,
            execution: ExecutionMode::Simulated,
            mode: AttackMode::Manual,
        });
        // A handshake implies success.
        assert!(!outcome.handshake || outcome.succeeded);
    }

    #[test]
    fn test_force_simulation_wins() {
        let config = AgentConfig {
            force_simulation: true,
            ..Default::default()
        };
        assert_eq!(detect_execution_mode(&config), ExecutionMode::Simulated);
    }
}
