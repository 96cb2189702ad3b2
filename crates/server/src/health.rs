use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::state::IndexHandle;

#[derive(Clone)]
pub struct HealthState {
    index: IndexHandle,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub index: HealthCheck,
    pub checked_at: String,
}

pub fn router(index: IndexHandle) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { index })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let index = index_check(&state.index);
    // An empty index is degraded but still serving: queries return empty
    // results rather than errors.
    let ready = index.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "basketry-server runtime initialized".to_string(),
        },
        index,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn index_check(handle: &IndexHandle) -> HealthCheck {
    let index = handle.current();
    let stats = index.stats();

    if index.is_empty() {
        HealthCheck {
            status: "degraded",
            detail: format!(
                "index is empty ({} line items, {} eligible orders)",
                stats.line_items, stats.eligible_orders
            ),
        }
    } else {
        HealthCheck {
            status: "ready",
            detail: format!(
                "{} distinct triples over {} eligible orders",
                stats.distinct_triples, stats.eligible_orders
            ),
        }
    }
}
