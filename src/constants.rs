//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change a default, only edit this file.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default agent display name
pub const DEFAULT_AGENT_NAME: &str = "AirHunter";

/// Default status surface port
pub const DEFAULT_PORT: u16 = 8080;

/// Default exploration rate for target selection (epsilon)
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.3;

/// Default probability that an epoch launches an autonomous attack
pub const DEFAULT_ATTACK_TRIGGER: f64 = 0.25;

/// Default pause between epochs (seconds)
pub const DEFAULT_EPOCH_INTERVAL_SECS: u64 = 20;

/// Default time-to-live for networks not re-seen by a scan (seconds)
pub const DEFAULT_NETWORK_TTL_SECS: i64 = 300;

/// Default monitor-mode interface probed at startup
pub const DEFAULT_MONITOR_INTERFACE: &str = "wlan1mon";

/// Backoff after a failed epoch (seconds)
pub const FAULT_BACKOFF_SECS: u64 = 5;
