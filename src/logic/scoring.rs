//! Target desirability heuristic.
//!
//! Deterministic linear scoring with bounded per-term contributions. No
//! side effects, no randomness; identical inputs always produce the same
//! score so results stay reproducible in isolation.

use super::ledger::AttemptRecord;
use super::observation::{Encryption, Observation};
use super::patterns::{PatternKey, PatternStats};

/// Signal bonus for strong (> -50 dBm) networks.
const STRONG_SIGNAL_BONUS: i32 = 30;
/// Signal bonus for usable (> -70 dBm) networks.
const MEDIUM_SIGNAL_BONUS: i32 = 20;
/// Signal bonus for everything weaker.
const WEAK_SIGNAL_BONUS: i32 = 10;
/// Bonus for protected networks (a handshake is worth capturing).
const ENCRYPTION_BONUS: i32 = 25;
/// Maximum bonus from historical success rate.
const HISTORY_MAX_BONUS: f64 = 40.0;
/// Ceiling for the channel saturation penalty.
const CHANNEL_PENALTY_CAP: i32 = 15;
/// Ceiling for the time-of-day bonus.
const HOUR_BONUS_CAP: i32 = 20;

/// Score a network as an attack target. Always ≥ 1 so every target stays
/// selectable.
pub fn score(
    obs: &Observation,
    attempts: &[AttemptRecord],
    patterns: &PatternStats,
    hour: u8,
) -> i32 {
    let mut score = if obs.signal > -50 {
        STRONG_SIGNAL_BONUS
    } else if obs.signal > -70 {
        MEDIUM_SIGNAL_BONUS
    } else {
        WEAK_SIGNAL_BONUS
    };

    if obs.encryption != Encryption::Open {
        score += ENCRYPTION_BONUS;
    }

    if !attempts.is_empty() {
        let successes = attempts.iter().filter(|a| a.succeeded).count();
        let rate = successes as f64 / attempts.len() as f64;
        score += (rate * HISTORY_MAX_BONUS).floor() as i32;
    }

    // Channels that already produced many successes get de-prioritized to
    // keep the hunt diverse.
    let channel_hits = patterns.count(PatternKey::Channel(obs.channel)) as i32;
    score -= (2 * channel_hits).min(CHANNEL_PENALTY_CAP);

    // Hours that historically worked get a bonus.
    let hour_hits = patterns.count(PatternKey::Hour(hour)) as i32;
    score += (3 * hour_hits).min(HOUR_BONUS_CAP);

    score.max(1)
}
