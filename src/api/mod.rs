//! Status surface - axum router and shared state.
//!
//! Read endpoints serve consistent snapshots; the two attack commands are
//! the only externally triggered mutations, and both funnel through the
//! same gateway as the epoch loop.

pub mod handlers;
pub mod status;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::logic::state::Agent;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/status", get(handlers::get_status))
        .route("/api/v1/networks", get(handlers::get_networks))
        .route("/api/v1/attacks", get(handlers::get_attacks))
        .route("/api/v1/attacks/ai", post(handlers::ai_attack))
        .route("/api/v1/attacks/manual", post(handlers::manual_attack))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::collab::{
        AttackOutcome, AttackRequest, AttackTool, CollabError, Scanner,
    };
    use crate::logic::config::AgentConfig;
    use crate::logic::observation::{Encryption, Observation};
    use crate::logic::records::ExecutionMode;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::Utc;
    use tower::ServiceExt;

    struct FixedScanner(Vec<Observation>);

    impl Scanner for FixedScanner {
        fn scan(&self) -> Result<Vec<Observation>, CollabError> {
            Ok(self.0.clone())
        }
    }

    struct AlwaysFails;

    impl AttackTool for AlwaysFails {
        fn attempt(&self, _req: AttackRequest<'_>) -> AttackOutcome {
            AttackOutcome {
                succeeded: false,
                handshake: false,
            }
        }
    }

    fn test_state() -> AppState {
        let agent = Agent::new(
            AgentConfig::default(),
            ExecutionMode::Simulated,
            Box::new(FixedScanner(vec![Observation {
                bssid: "AA:BB:CC:DD:EE:FF".to_string(),
                ssid: "TestNet".to_string(),
                channel: 6,
                signal: -45,
                encryption: Encryption::Protected,
                last_seen: Utc::now(),
            }])),
            Box::new(AlwaysFails),
        );
        agent.run_scan();
        AppState {
            agent: Arc::new(agent),
        }
    }

    fn attack_request(path: &str, bssid: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"bssid":"{}"}}"#, bssid)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_status_and_networks_ok() {
        let state = test_state();

        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/networks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_manual_attack_known_target() {
        let app = create_router(test_state());
        let response = app
            .oneshot(attack_request("/api/v1/attacks/manual", "AA:BB:CC:DD:EE:FF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_attack_unknown_target_is_404() {
        let app = create_router(test_state());
        let response = app
            .oneshot(attack_request("/api/v1/attacks/ai", "00:00:00:00:00:00"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
