//! AI WiFi Agent - Target Scoring & Attack Orchestration Core
//!
//! An autonomous agent that scores discovered wireless networks as attack
//! targets, picks one with an epsilon-greedy policy, delegates execution to
//! external tooling (simulated when no monitor-mode interface exists) and
//! learns from the outcome - forever, one epoch at a time. Live state is
//! exposed over an HTTP status surface.

mod api;
mod constants;
mod error;
mod logic;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::collab::{self, SimulatedAttackTool, SimulatedScanner};
use logic::config::AgentConfig;
use logic::orchestrator;
use logic::state::Agent;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ai_wifi_core=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = AgentConfig::from_env();

    tracing::info!("{} v{} starting...", config.name, constants::APP_VERSION);

    // Capability detection happens exactly once; the mode is fixed for the
    // process lifetime.
    let execution = collab::detect_execution_mode(&config);

    let agent = Arc::new(Agent::new(
        config.clone(),
        execution,
        Box::new(SimulatedScanner::new()),
        Box::new(SimulatedAttackTool::new()),
    ));

    // Start the epoch loop
    let orchestrator = orchestrator::spawn(agent.clone());

    // Start the status surface
    let app = api::create_router(api::AppState {
        agent: agent.clone(),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Status surface listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind status surface");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("status surface crashed");

    tracing::info!("Shutting down...");
    agent.shutdown();
    if orchestrator.join().is_err() {
        tracing::error!("Orchestrator thread panicked during shutdown");
    }
    tracing::info!("Goodbye");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
