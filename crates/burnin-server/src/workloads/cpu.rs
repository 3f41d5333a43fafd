//! `GET /cpu?iterations=<int>`

use axum::extract::{Query, State};

use burnin_core::workload::{resolve_iterations, CpuReport};

use crate::app_state::AppState;
use crate::error::ApiError;

use super::{fail, run_blocking};

const ITERATIONS: &str = "iterations";

/// First value of `key`, kept raw: empty and unparseable values resolve
/// differently. Repeated keys are not an error.
pub fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

pub async fn cpu(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<String, ApiError> {
    let iterations = resolve_iterations(
        first_param(&pairs, ITERATIONS),
        state.cfg().workloads.cpu.default_iterations,
    );
    let report = run_blocking(move || Ok(CpuReport::run(iterations)))
        .await
        .map_err(|e| fail("/cpu", e))?;
    Ok(report.summary())
}
