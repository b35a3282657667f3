//! Epsilon-greedy target selection.
//!
//! The RNG is injected so exploration is reproducible under test; the
//! exploitation path is fully deterministic given the candidate order.

use rand::Rng;

use super::ledger::Ledger;
use super::observation::{Encryption, Observation};
use super::patterns::PatternStats;
use super::scoring;

/// Networks at or below this signal are never auto-selected.
pub const MIN_ELIGIBLE_SIGNAL_DBM: i32 = -85;

/// Whether a network passes the auto-selection filter. Open networks carry
/// no handshake and very weak ones are not worth the airtime.
pub fn is_eligible(obs: &Observation) -> bool {
    obs.encryption != Encryption::Open && obs.signal > MIN_ELIGIBLE_SIGNAL_DBM
}

/// Pick a target from `candidates`.
///
/// With probability `exploration_rate` a uniformly random eligible candidate
/// is returned; otherwise the strict-maximum scorer wins, ties broken by
/// first-encountered order.
pub fn select<'a, R: Rng>(
    candidates: &'a [Observation],
    exploration_rate: f64,
    ledger: &Ledger,
    patterns: &PatternStats,
    hour: u8,
    rng: &mut R,
) -> Option<&'a Observation> {
    let eligible: Vec<&Observation> = candidates.iter().filter(|o| is_eligible(o)).collect();
    if eligible.is_empty() {
        return None;
    }

    if rng.gen::<f64>() < exploration_rate {
        return Some(eligible[rng.gen_range(0..eligible.len())]);
    }

    let mut best = eligible[0];
    let mut best_score = scoring::score(best, ledger.attempts(&best.bssid), patterns, hour);
    for &obs in eligible.iter().skip(1) {
        let s = scoring::score(obs, ledger.attempts(&obs.bssid), patterns, hour);
        if s > best_score {
            best = obs;
            best_score = s;
        }
    }
    Some(best)
}
