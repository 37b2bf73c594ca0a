//! Service health probes
//!
//! `/health` and `/health/live` answer from process state alone.
//! `/health/ready` additionally pings Postgres, the service's only
//! runtime dependency, and reports 503 while it is unreachable.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Body returned by every probe
#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseStatus>,
}

/// Outcome of the Postgres ping, attached by the readiness probe
#[derive(Serialize)]
pub struct DatabaseStatus {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::new("healthy"))
}

/// GET /health/live
///
/// Never touches the database; any response at all means the process
/// is still serving requests.
pub async fn liveness_check() -> Json<HealthStatus> {
    Json(HealthStatus::new("alive"))
}

/// GET /health/ready
///
/// Pings Postgres before reporting ready, so orchestrators stop
/// routing traffic here while the database is down.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let database = match db::ping(state.db()).await {
        Ok(()) => DatabaseStatus {
            reachable: true,
            error: None,
        },
        Err(e) => DatabaseStatus {
            reachable: false,
            error: Some(e.to_string()),
        },
    };

    let (status, label) = if database.reachable {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    };

    let mut body = HealthStatus::new(label);
    body.database = Some(database);

    (status, Json(body))
}
