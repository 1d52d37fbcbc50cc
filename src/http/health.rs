//! Liveness and storage health endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};

use super::AppState;
use crate::content::{Collection, ContentService};
use crate::model::{stamp, RecordStore};

fn summary<S: RecordStore + 'static>(state: &AppState<S>, status: &str) -> Map<String, Value> {
    let settings = state.settings();
    let mut body = Map::new();
    body.insert("status".into(), json!(status));
    body.insert("timestamp".into(), json!(stamp::timestamp_now()));
    body.insert("uptime".into(), json!(settings.uptime_secs()));
    body.insert("environment".into(), json!(settings.environment.as_str()));
    body.insert("version".into(), json!(env!("CARGO_PKG_VERSION")));
    body
}

/// `GET /health`
pub async fn health<S: RecordStore + 'static>(State(state): State<AppState<S>>) -> Json<Value> {
    Json(Value::Object(summary(&state, "OK")))
}

fn probe<C: Collection, S: RecordStore>(service: &ContentService<C, S>, checks: &mut Map<String, Value>) -> bool {
    match service.probe() {
        Ok(count) => {
            checks.insert(C::NAME.into(), json!({ "status": "OK", "records": count }));
            true
        }
        Err(err) => {
            tracing::error!(collection = C::NAME, error = %err, "storage health check failed");
            checks.insert(C::NAME.into(), json!({ "status": "ERROR" }));
            false
        }
    }
}

/// `GET /health/detailed`: reads every collection; 503 when any read fails.
pub async fn health_detailed<S: RecordStore + 'static>(State(state): State<AppState<S>>) -> Response {
    let probed = state.clone();
    let checked = tokio::task::spawn_blocking(move || {
        let mut checks = Map::new();
        let healthy = [
            probe(&*probed.events, &mut checks),
            probe(&*probed.news, &mut checks),
            probe(&*probed.gallery, &mut checks),
            probe(&*probed.contacts, &mut checks),
        ]
        .iter()
        .all(|ok| *ok);
        (healthy, checks)
    })
    .await;

    let (healthy, checks) = match checked {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(error = %err, "storage health check task failed");
            (false, Map::new())
        }
    };

    let mut body = summary(&state, if healthy { "OK" } else { "DEGRADED" });
    body.insert("checks".into(), Value::Object(checks));
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(Value::Object(body))).into_response()
}
