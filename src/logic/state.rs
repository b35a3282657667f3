//! Shared agent state and the single mutation gateway.
//!
//! Every piece of mutable state lives in one `CoreState` behind one
//! `RwLock`, so a reader always sees a consistent snapshot and writers
//! never interleave mid-update. Attacks are additionally serialized through
//! an attack gate: at most one attack is in flight system-wide, whether it
//! came from the epoch loop or from a surface command.
//!
//! The lock is never held across a blocking collaborator call; only the
//! state mutation before and after the call is guarded.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Timelike, Utc};
use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

use crate::api::status::{LearningStats, NetworkView, StatusSnapshot};
use crate::constants;

use super::collab::{AttackRequest, AttackTool, Scanner};
use super::config::AgentConfig;
use super::ledger::{AttemptRecord, Ledger};
use super::observation::Observation;
use super::patterns::PatternStats;
use super::records::{
    AttackMode, AttackRecord, AttackStatus, ExecutionMode, HandshakeRecord, Mood,
};
use super::{scoring, selection};

#[derive(Debug, Error)]
pub enum AttackError {
    #[error("target {0} not found in the network table")]
    UnknownTarget(String),

    #[error("another attack is already in flight")]
    Busy,

    #[error("agent is shutting down")]
    ShuttingDown,
}

/// Everything the orchestrator owns. Other components only ever see
/// read-only views or returned copies.
pub struct CoreState {
    pub networks: HashMap<String, Observation>,
    pub ledger: Ledger,
    pub patterns: PatternStats,
    pub attacks: Vec<AttackRecord>,
    pub handshakes: Vec<HandshakeRecord>,
    pub mood: Mood,
    pub epoch: u64,
}

impl CoreState {
    fn new() -> Self {
        Self {
            networks: HashMap::new(),
            ledger: Ledger::default(),
            patterns: PatternStats::default(),
            attacks: Vec::new(),
            handshakes: Vec::new(),
            mood: Mood::Learning,
            epoch: 0,
        }
    }

    /// Merge a scan result into the network table. A re-seen BSSID
    /// overwrites its observation; its ledger history is untouched. Entries
    /// unseen for longer than `ttl_secs` are evicted.
    pub fn merge_scan(&mut self, observations: Vec<Observation>, ttl_secs: i64) -> usize {
        for obs in observations {
            self.networks.insert(obs.bssid.clone(), obs);
        }

        let cutoff = Utc::now() - chrono::Duration::seconds(ttl_secs);
        self.networks.retain(|_, obs| obs.last_seen >= cutoff);

        self.networks.len()
    }

    /// Fold one attack outcome into the ledger and pattern stats. Rejected
    /// when the target is no longer in the network table.
    pub fn learn(
        &mut self,
        bssid: &str,
        succeeded: bool,
        handshake: bool,
    ) -> Result<(), AttackError> {
        let obs = self
            .networks
            .get(bssid)
            .ok_or_else(|| AttackError::UnknownTarget(bssid.to_string()))?;

        let now = Utc::now();
        let hour = now.hour() as u8;
        let (signal, channel) = (obs.signal, obs.channel);

        self.ledger.append(
            bssid,
            AttemptRecord {
                timestamp: now,
                succeeded,
                handshake,
                signal,
                channel,
                hour,
            },
        );

        if succeeded {
            self.patterns.record_success(channel, hour);
        }

        Ok(())
    }

    /// One-way status transition for an attack log entry. A record that
    /// already reached a terminal status is left alone.
    fn set_attack_status(&mut self, id: Uuid, status: AttackStatus) {
        if let Some(record) = self.attacks.iter_mut().find(|r| r.id == id) {
            if record.status == AttackStatus::Launched {
                record.status = status;
            }
        }
    }

    pub fn learning_stats(&self, exploration_rate: f64) -> LearningStats {
        let total_attempts = self.ledger.total_attempts();
        let success_rate = if total_attempts > 0 {
            self.ledger.total_successes() as f64 / total_attempts as f64 * 100.0
        } else {
            0.0
        };

        LearningStats {
            total_attempts,
            success_rate,
            networks_learned: self.ledger.networks_with_history(),
            best_pattern: self
                .patterns
                .best()
                .map(|(key, _)| key.to_string())
                .unwrap_or_else(|| "none".to_string()),
            exploration_rate,
        }
    }
}

/// Handle shared between the orchestrator loop and the status surface.
pub struct Agent {
    config: AgentConfig,
    execution: ExecutionMode,
    state: RwLock<CoreState>,
    attack_gate: Mutex<()>,
    running: AtomicBool,
    scanner: Box<dyn Scanner>,
    attack_tool: Box<dyn AttackTool>,
}

impl Agent {
    pub fn new(
        config: AgentConfig,
        execution: ExecutionMode,
        scanner: Box<dyn Scanner>,
        attack_tool: Box<dyn AttackTool>,
    ) -> Self {
        Self {
            config,
            execution,
            state: RwLock::new(CoreState::new()),
            attack_gate: Mutex::new(()),
            running: AtomicBool::new(true),
            scanner,
            attack_tool,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    pub fn state(&self) -> &RwLock<CoreState> {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Run one scan and merge the result. Scan failures degrade to "no new
    /// observations this epoch".
    pub fn run_scan(&self) {
        match self.scanner.scan() {
            Ok(observations) => {
                let seen = observations.len();
                let total = self
                    .state
                    .write()
                    .merge_scan(observations, self.config.network_ttl_secs);
                tracing::debug!("Scan merged: {} seen, {} in table", seen, total);
            }
            Err(e) => {
                tracing::warn!("Network scan failed: {} - continuing without it", e);
            }
        }
    }

    /// Launch one attack against a known BSSID and fold the outcome back in.
    ///
    /// Used by the epoch loop (AiControlled, gated upstream) and by surface
    /// commands (which bypass the trigger gate and the eligibility filter -
    /// any known BSSID may be targeted). Returns the terminal attack record.
    pub fn launch_attack(&self, bssid: &str, mode: AttackMode) -> Result<AttackRecord, AttackError> {
        if !self.is_running() {
            return Err(AttackError::ShuttingDown);
        }

        // At most one attack in flight, system-wide.
        let _gate = self.attack_gate.try_lock().ok_or(AttackError::Busy)?;

        let hour = Utc::now().hour() as u8;
        let record_id;
        let target;
        {
            let mut state = self.state.write();
            let obs = state
                .networks
                .get(bssid)
                .cloned()
                .ok_or_else(|| AttackError::UnknownTarget(bssid.to_string()))?;

            let score_at_decision = match mode {
                AttackMode::AiControlled => {
                    scoring::score(&obs, state.ledger.attempts(bssid), &state.patterns, hour)
                }
                AttackMode::Manual => 0,
            };

            let record = AttackRecord {
                id: Uuid::new_v4(),
                bssid: obs.bssid.clone(),
                ssid: obs.ssid.clone(),
                mode,
                timestamp: Utc::now(),
                status: AttackStatus::Launched,
                score_at_decision,
                execution: self.execution,
            };
            record_id = record.id;
            state.attacks.push(record);
            state.mood = Mood::Attacking;
            target = obs;
        }

        tracing::info!(
            "{:?} attack launched on {} ({}) [{:?}]",
            mode,
            target.ssid,
            target.bssid,
            self.execution
        );

        // Collaborator call runs unguarded; it may block for seconds.
        let outcome = self.attack_tool.attempt(AttackRequest {
            bssid: &target.bssid,
            channel: target.channel,
            execution: self.execution,
            mode,
        });

        let mut state = self.state.write();

        let status = if outcome.handshake {
            state.handshakes.push(HandshakeRecord {
                bssid: target.bssid.clone(),
                ssid: target.ssid.clone(),
                timestamp: Utc::now(),
                mode,
                execution: self.execution,
            });
            state.mood = Mood::Excited;
            tracing::info!("HANDSHAKE captured from {} [{:?}]", target.ssid, self.execution);
            AttackStatus::HandshakeCaptured
        } else {
            state.mood = match mode {
                AttackMode::AiControlled => Mood::Thinking,
                AttackMode::Manual => Mood::Learning,
            };
            AttackStatus::Failed
        };

        state.set_attack_status(record_id, status);

        // The target may have been evicted while the tool ran; history
        // writes for unknown identifiers are rejected, not recreated.
        if let Err(e) = state.learn(&target.bssid, outcome.succeeded, outcome.handshake) {
            tracing::warn!("Learning update skipped: {}", e);
        }

        let record = state
            .attacks
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .expect("attack record appended above");
        Ok(record)
    }

    /// Consistent point-in-time status snapshot.
    pub fn status_snapshot(&self) -> StatusSnapshot {
        let state = self.state.read();
        StatusSnapshot {
            name: self.config.name.clone(),
            version: constants::APP_VERSION.to_string(),
            mood: state.mood,
            face: state.mood.face().to_string(),
            epoch: state.epoch,
            execution: self.execution,
            networks_count: state.networks.len(),
            attacks_count: state.attacks.len(),
            handshakes_count: state.handshakes.len(),
            learning: state.learning_stats(self.config.exploration_rate),
        }
    }

    /// Network table annotated with live scores, best targets first.
    pub fn network_views(&self) -> Vec<NetworkView> {
        let hour = Utc::now().hour() as u8;
        let state = self.state.read();

        let mut views: Vec<NetworkView> = state
            .networks
            .values()
            .map(|obs| NetworkView {
                bssid: obs.bssid.clone(),
                ssid: obs.ssid.clone(),
                channel: obs.channel,
                signal: obs.signal,
                encryption: obs.encryption,
                last_seen: obs.last_seen,
                score: scoring::score(obs, state.ledger.attempts(&obs.bssid), &state.patterns, hour),
                eligible: selection::is_eligible(obs),
            })
            .collect();

        views.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.bssid.cmp(&b.bssid)));
        views
    }

    pub fn attack_log(&self) -> Vec<AttackRecord> {
        self.state.read().attacks.clone()
    }

    /// Stop the loop and resolve anything still marked in flight. No record
    /// is left permanently in `Launched` after shutdown.
    pub fn shutdown(&self) {
        self.stop();

        let mut state = self.state.write();
        for record in state
            .attacks
            .iter_mut()
            .filter(|r| r.status == AttackStatus::Launched)
        {
            tracing::warn!(
                "Attack on {} abandoned by shutdown - marking failed",
                record.ssid
            );
            record.status = AttackStatus::Failed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::collab::{AttackOutcome, CollabError};
    use crate::logic::observation::Encryption;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    struct FixedScanner(Vec<Observation>);

    impl Scanner for FixedScanner {
        fn scan(&self) -> Result<Vec<Observation>, CollabError> {
            Ok(self.0.clone())
        }
    }

    struct FailingScanner;

    impl Scanner for FailingScanner {
        fn scan(&self) -> Result<Vec<Observation>, CollabError> {
            Err(CollabError::Unavailable("no radio".to_string()))
        }
    }

    struct FixedTool {
        outcome: AttackOutcome,
        dwell: Duration,
    }

    impl AttackTool for FixedTool {
        fn attempt(&self, _req: AttackRequest<'_>) -> AttackOutcome {
            thread::sleep(self.dwell);
            self.outcome
        }
    }

    fn obs(bssid: &str, signal: i32, encryption: Encryption) -> Observation {
        Observation {
            bssid: bssid.to_string(),
            ssid: format!("net-{}", bssid),
            channel: 6,
            signal,
            encryption,
            last_seen: Utc::now(),
        }
    }

    fn agent_with(
        networks: Vec<Observation>,
        outcome: AttackOutcome,
        dwell: Duration,
    ) -> Agent {
        let agent = Agent::new(
            AgentConfig::default(),
            ExecutionMode::Simulated,
            Box::new(FixedScanner(networks)),
            Box::new(FixedTool { outcome, dwell }),
        );
        agent.run_scan();
        agent
    }

    const TARGET: &str = "AA:BB:CC:DD:EE:FF";

    fn success() -> AttackOutcome {
        AttackOutcome {
            succeeded: true,
            handshake: true,
        }
    }

    fn failure() -> AttackOutcome {
        AttackOutcome {
            succeeded: false,
            handshake: false,
        }
    }

    #[test]
    fn test_scan_failure_degrades() {
        let agent = Agent::new(
            AgentConfig::default(),
            ExecutionMode::Simulated,
            Box::new(FailingScanner),
            Box::new(FixedTool {
                outcome: failure(),
                dwell: Duration::ZERO,
            }),
        );
        agent.run_scan();
        assert_eq!(agent.state().read().networks.len(), 0);
    }

    #[test]
    fn test_rescan_preserves_ledger() {
        let agent = agent_with(
            vec![obs(TARGET, -45, Encryption::Protected)],
            success(),
            Duration::ZERO,
        );
        agent.launch_attack(TARGET, AttackMode::AiControlled).unwrap();
        assert_eq!(agent.state().read().ledger.attempts(TARGET).len(), 1);

        // Same BSSID seen again with a different signal.
        agent
            .state()
            .write()
            .merge_scan(vec![obs(TARGET, -60, Encryption::Protected)], 300);

        let state = agent.state().read();
        assert_eq!(state.networks.get(TARGET).unwrap().signal, -60);
        assert_eq!(state.ledger.attempts(TARGET).len(), 1);
    }

    #[test]
    fn test_stale_networks_evicted() {
        let agent = agent_with(vec![], failure(), Duration::ZERO);
        let mut stale = obs(TARGET, -45, Encryption::Protected);
        stale.last_seen = Utc::now() - chrono::Duration::seconds(600);

        let mut state = agent.state().write();
        state.networks.insert(stale.bssid.clone(), stale);
        let remaining = state.merge_scan(vec![], 300);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_unknown_target_rejected() {
        let agent = agent_with(vec![], failure(), Duration::ZERO);
        let result = agent.launch_attack("00:00:00:00:00:00", AttackMode::Manual);
        assert!(matches!(result, Err(AttackError::UnknownTarget(_))));
        // No state mutation on rejection.
        assert!(agent.attack_log().is_empty());
    }

    #[test]
    fn test_successful_attack_reaches_terminal_state() {
        let agent = agent_with(
            vec![obs(TARGET, -45, Encryption::Protected)],
            success(),
            Duration::ZERO,
        );

        let record = agent.launch_attack(TARGET, AttackMode::AiControlled).unwrap();
        assert_eq!(record.status, AttackStatus::HandshakeCaptured);
        assert!(record.score_at_decision >= 1);

        let state = agent.state().read();
        assert_eq!(state.mood, Mood::Excited);
        assert_eq!(state.handshakes.len(), 1);
        assert_eq!(state.ledger.attempts(TARGET).len(), 1);
        assert!(!state.patterns.is_empty());
    }

    #[test]
    fn test_failed_attack_records_attempt_without_patterns() {
        let agent = agent_with(
            vec![obs(TARGET, -45, Encryption::Protected)],
            failure(),
            Duration::ZERO,
        );

        let record = agent.launch_attack(TARGET, AttackMode::Manual).unwrap();
        assert_eq!(record.status, AttackStatus::Failed);
        assert_eq!(record.score_at_decision, 0);

        let state = agent.state().read();
        assert_eq!(state.mood, Mood::Learning);
        assert!(state.handshakes.is_empty());
        assert_eq!(state.ledger.attempts(TARGET).len(), 1);
        assert!(state.patterns.is_empty());
    }

    #[test]
    fn test_manual_attack_bypasses_eligibility() {
        // Open and far below the auto-selection signal floor.
        let agent = agent_with(
            vec![obs(TARGET, -92, Encryption::Open)],
            failure(),
            Duration::ZERO,
        );
        let record = agent.launch_attack(TARGET, AttackMode::Manual).unwrap();
        assert_eq!(record.status, AttackStatus::Failed);
    }

    #[test]
    fn test_concurrent_attacks_serialized() {
        let agent = Arc::new(agent_with(
            vec![obs(TARGET, -45, Encryption::Protected)],
            failure(),
            Duration::from_millis(300),
        ));

        let background = {
            let agent = agent.clone();
            thread::spawn(move || agent.launch_attack(TARGET, AttackMode::Manual))
        };
        thread::sleep(Duration::from_millis(50));

        let second = agent.launch_attack(TARGET, AttackMode::Manual);
        assert!(matches!(second, Err(AttackError::Busy)));

        background.join().unwrap().unwrap();
    }

    #[test]
    fn test_shutdown_resolves_launched_records() {
        let agent = agent_with(
            vec![obs(TARGET, -45, Encryption::Protected)],
            failure(),
            Duration::ZERO,
        );

        // Simulate a record abandoned mid-flight.
        agent.state().write().attacks.push(AttackRecord {
            id: Uuid::new_v4(),
            bssid: TARGET.to_string(),
            ssid: "net".to_string(),
            mode: AttackMode::AiControlled,
            timestamp: Utc::now(),
            status: AttackStatus::Launched,
            score_at_decision: 55,
            execution: ExecutionMode::Simulated,
        });

        agent.shutdown();
        assert!(!agent.is_running());
        assert!(agent
            .attack_log()
            .iter()
            .all(|r| r.status != AttackStatus::Launched));

        // Commands are refused once shutting down.
        let result = agent.launch_attack(TARGET, AttackMode::Manual);
        assert!(matches!(result, Err(AttackError::ShuttingDown)));
    }

    #[test]
    fn test_terminal_status_is_never_reversed() {
        let agent = agent_with(
            vec![obs(TARGET, -45, Encryption::Protected)],
            success(),
            Duration::ZERO,
        );
        let record = agent.launch_attack(TARGET, AttackMode::Manual).unwrap();

        agent
            .state()
            .write()
            .set_attack_status(record.id, AttackStatus::Failed);

        let log = agent.attack_log();
        assert_eq!(log[0].status, AttackStatus::HandshakeCaptured);
    }

    #[test]
    fn test_snapshot_idempotent_without_writes() {
        let agent = agent_with(
            vec![
                obs(TARGET, -45, Encryption::Protected),
                obs("11:22:33:44:55:66", -70, Encryption::Open),
            ],
            success(),
            Duration::ZERO,
        );
        agent.launch_attack(TARGET, AttackMode::AiControlled).unwrap();

        let a = serde_json::to_value(agent.status_snapshot()).unwrap();
        let b = serde_json::to_value(agent.status_snapshot()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_learning_stats_aggregate() {
        let agent = agent_with(
            vec![obs(TARGET, -45, Encryption::Protected)],
            success(),
            Duration::ZERO,
        );
        agent.launch_attack(TARGET, AttackMode::AiControlled).unwrap();

        let stats = agent
            .state()
            .read()
            .learning_stats(agent.config().exploration_rate);
        assert_eq!(stats.total_attempts, 1);
        assert_eq!(stats.success_rate, 100.0);
        assert_eq!(stats.networks_learned, 1);
        assert!(stats.best_pattern.starts_with("channel:") || stats.best_pattern.starts_with("hour:"));
    }

    #[test]
    fn test_network_views_sorted_by_score() {
        let agent = agent_with(
            vec![
                obs("AA:00:00:00:00:01", -80, Encryption::Protected),
                obs("AA:00:00:00:00:02", -45, Encryption::Protected),
            ],
            failure(),
            Duration::ZERO,
        );

        let views = agent.network_views();
        assert_eq!(views.len(), 2);
        assert!(views[0].score >= views[1].score);
        assert_eq!(views[0].bssid, "AA:00:00:00:00:02");
    }
}
