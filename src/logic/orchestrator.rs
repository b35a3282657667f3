//! Epoch loop: scan → decide → attack → learn → report.
//!
//! Runs on a dedicated thread next to the async status surface. A fault in
//! one epoch is logged and backed off, never fatal; the loop only exits on
//! the external stop signal.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants;

use super::observation::Observation;
use super::records::{AttackMode, Mood};
use super::selection;
use super::state::{Agent, AttackError};

/// Slice length for interruptible sleeps.
const SLEEP_SLICE: Duration = Duration::from_millis(500);

/// Epochs between progress log lines.
const PROGRESS_LOG_EVERY: u64 = 5;

pub fn spawn(agent: Arc<Agent>) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("orchestrator".to_string())
        .spawn(move || run(agent))
        .expect("failed to spawn orchestrator thread")
}

fn run(agent: Arc<Agent>) {
    tracing::info!("Orchestrator loop started [{:?}]", agent.execution());
    let mut rng = StdRng::from_entropy();

    while agent.is_running() {
        if let Err(e) = run_epoch(&agent, &mut rng) {
            tracing::error!("Epoch failed: {:#} - backing off", e);
            sleep_interruptible(
                &agent,
                Duration::from_secs(constants::FAULT_BACKOFF_SECS),
            );
        }
        sleep_interruptible(
            &agent,
            Duration::from_secs(agent.config().epoch_interval_secs),
        );
    }

    tracing::info!("Orchestrator loop stopped");
}

fn run_epoch(agent: &Arc<Agent>, rng: &mut StdRng) -> anyhow::Result<()> {
    // Scanning - failures already degrade inside.
    agent.run_scan();

    // Deciding - most epochs just watch.
    if let Some(bssid) = decide(agent, rng) {
        agent.state().write().mood = Mood::Hunting;

        // Attacking + Learning.
        match agent.launch_attack(&bssid, AttackMode::AiControlled) {
            Ok(record) => {
                tracing::info!(
                    "AI auto-attack on {} (score {}) -> {:?}",
                    record.ssid,
                    record.score_at_decision,
                    record.status
                );
            }
            Err(AttackError::Busy) => {
                tracing::debug!("Attack already in flight - skipping this epoch");
            }
            Err(e) => {
                tracing::warn!("Auto-attack on {} not launched: {}", bssid, e);
            }
        }
    }

    // Reporting.
    report(agent);
    Ok(())
}

/// Epsilon-greedy decision for this epoch. `None` when the trigger gate
/// stays closed, the table is empty, or nothing is eligible.
fn decide(agent: &Agent, rng: &mut StdRng) -> Option<String> {
    let config = agent.config();
    if rng.gen::<f64>() >= config.attack_trigger {
        return None;
    }

    let state = agent.state().read();
    if state.networks.is_empty() {
        return None;
    }

    let candidates: Vec<Observation> = state.networks.values().cloned().collect();
    let hour = Utc::now().hour() as u8;
    selection::select(
        &candidates,
        config.exploration_rate,
        &state.ledger,
        &state.patterns,
        hour,
        rng,
    )
    .map(|obs| obs.bssid.clone())
}

/// Publish the epoch: bump the counter and log progress periodically. The
/// snapshot itself is pulled by the surface; nothing is pushed.
fn report(agent: &Agent) {
    let mut state = agent.state().write();
    state.epoch += 1;

    let stats = state.learning_stats(agent.config().exploration_rate);

    // A seasoned agent gets to look smug between attacks.
    if stats.total_attempts >= 10
        && stats.success_rate >= 50.0
        && matches!(state.mood, Mood::Learning | Mood::Thinking)
    {
        state.mood = Mood::Smart;
    }

    if state.epoch % PROGRESS_LOG_EVERY == 0 {
        tracing::info!(
            "Epoch {}: {} networks, {} attacks, success {:.1}%, best {} [{:?}]",
            state.epoch,
            state.networks.len(),
            state.attacks.len(),
            stats.success_rate,
            stats.best_pattern,
            agent.execution()
        );
    }
}

/// Sleep in slices so a stop signal is honored within a bounded time.
fn sleep_interruptible(agent: &Agent, total: Duration) {
    let deadline = Instant::now() + total;
    while agent.is_running() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return;
        }
        thread::sleep(remaining.min(SLEEP_SLICE));
    }
}
