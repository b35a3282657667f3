//! HTTP handlers for the status surface.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::records::{AttackMode, AttackRecord, AttackStatus};
use crate::{AppError, AppResult};

use super::status::{NetworkView, StatusSnapshot};
use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// Current agent status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.agent.status_snapshot())
}

/// Network table with live scores, best targets first
pub async fn get_networks(State(state): State<AppState>) -> Json<Vec<NetworkView>> {
    Json(state.agent.network_views())
}

/// Full attack log
pub async fn get_attacks(State(state): State<AppState>) -> Json<Vec<AttackRecord>> {
    Json(state.agent.attack_log())
}

#[derive(Debug, Deserialize)]
pub struct AttackCommand {
    pub bssid: String,
}

#[derive(Debug, Serialize)]
pub struct AttackResponse {
    pub id: Uuid,
    pub status: AttackStatus,
    pub target: String,
    pub bssid: String,
    pub score: i32,
    pub message: String,
}

/// Launch an AI-controlled attack on a known BSSID
pub async fn ai_attack(
    State(state): State<AppState>,
    Json(cmd): Json<AttackCommand>,
) -> AppResult<Json<AttackResponse>> {
    launch(state, cmd.bssid, AttackMode::AiControlled).await
}

/// Launch a manual attack on a known BSSID
pub async fn manual_attack(
    State(state): State<AppState>,
    Json(cmd): Json<AttackCommand>,
) -> AppResult<Json<AttackResponse>> {
    launch(state, cmd.bssid, AttackMode::Manual).await
}

async fn launch(
    state: AppState,
    bssid: String,
    mode: AttackMode,
) -> AppResult<Json<AttackResponse>> {
    let agent = state.agent.clone();

    // The attack blocks for the capture window; keep it off the runtime.
    let record = tokio::task::spawn_blocking(move || agent.launch_attack(&bssid, mode))
        .await
        .map_err(|e| AppError::InternalError(format!("attack task failed: {}", e)))??;

    let message = match record.status {
        AttackStatus::HandshakeCaptured => {
            format!("Handshake captured from {}", record.ssid)
        }
        _ => format!("Attack on {} completed without a handshake", record.ssid),
    };

    Ok(Json(AttackResponse {
        id: record.id,
        status: record.status,
        target: record.ssid,
        bssid: record.bssid,
        score: record.score_at_decision,
        message,
    }))
}
