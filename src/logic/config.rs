//! Agent configuration
//!
//! Loaded once at startup from environment variables, with defaults from
//! `constants`.

use std::env;

use crate::constants;

/// Runtime configuration for the agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Agent display name
    pub name: String,

    /// Status surface port
    pub port: u16,

    /// Epsilon for the selection policy, in [0, 1]
    pub exploration_rate: f64,

    /// Per-epoch probability of launching an autonomous attack, in [0, 1]
    pub attack_trigger: f64,

    /// Pause between epochs (seconds)
    pub epoch_interval_secs: u64,

    /// Networks unseen for this long are evicted from the table (seconds)
    pub network_ttl_secs: i64,

    /// Interface probed to decide Real vs Simulated execution
    pub monitor_interface: String,

    /// Force simulated execution even when a monitor interface exists
    pub force_simulation: bool,
}

impl AgentConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            name: env::var("AGENT_NAME")
                .unwrap_or_else(|_| constants::DEFAULT_AGENT_NAME.to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(constants::DEFAULT_PORT),

            exploration_rate: env::var("EXPLORATION_RATE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(constants::DEFAULT_EXPLORATION_RATE)
                .clamp(0.0, 1.0),

            attack_trigger: env::var("ATTACK_TRIGGER")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(constants::DEFAULT_ATTACK_TRIGGER)
                .clamp(0.0, 1.0),

            epoch_interval_secs: env::var("EPOCH_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(constants::DEFAULT_EPOCH_INTERVAL_SECS),

            network_ttl_secs: env::var("NETWORK_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(constants::DEFAULT_NETWORK_TTL_SECS),

            monitor_interface: env::var("MONITOR_INTERFACE")
                .unwrap_or_else(|_| constants::DEFAULT_MONITOR_INTERFACE.to_string()),

            force_simulation: env::var("FORCE_SIMULATION")
                .map(|s| s.to_lowercase() != "false" && s != "0")
                .unwrap_or(false),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_AGENT_NAME.to_string(),
            port: constants::DEFAULT_PORT,
            exploration_rate: constants::DEFAULT_EXPLORATION_RATE,
            attack_trigger: constants::DEFAULT_ATTACK_TRIGGER,
            epoch_interval_secs: constants::DEFAULT_EPOCH_INTERVAL_SECS,
            network_ttl_secs: constants::DEFAULT_NETWORK_TTL_SECS,
            monitor_interface: constants::DEFAULT_MONITOR_INTERFACE.to_string(),
            force_simulation: false,
        }
    }
}
