//! Axum router wiring.
//!
//! Workload routes are wrapped by the instrumentation middleware under a fixed
//! route label; `/metrics` is served bare.

use axum::{
    routing::{any, get},
    Router,
};

use crate::{app_state::AppState, obs::middleware::instrument, ops, workloads};

pub const HEALTH: &str = "/health";
pub const CPU: &str = "/cpu";
pub const IO: &str = "/io";
pub const JSON: &str = "/json";
pub const STREAM: &str = "/stream";
pub const METRICS: &str = "/metrics";

pub fn build_router(state: AppState) -> Router {
    let m = state.http_metrics();
    Router::new()
        .route(HEALTH, instrument(HEALTH, m.clone(), any(ops::health)))
        .route(CPU, instrument(CPU, m.clone(), get(workloads::cpu::cpu)))
        .route(IO, instrument(IO, m.clone(), get(workloads::io::io)))
        .route(JSON, instrument(JSON, m.clone(), get(workloads::json::json)))
        .route(STREAM, instrument(STREAM, m, get(workloads::stream::stream)))
        .route(METRICS, get(ops::metrics))
        .with_state(state)
}
