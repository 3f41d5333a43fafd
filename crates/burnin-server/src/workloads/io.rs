//! `GET /io`

use axum::{extract::State, Json};

use burnin_core::workload::{file_roundtrip, IoReport};

use crate::app_state::AppState;
use crate::error::ApiError;

use super::{fail, run_blocking};

pub async fn io(State(state): State<AppState>) -> Result<Json<IoReport>, ApiError> {
    let section = &state.cfg().workloads.io;
    let dir = section.dir();
    let lines = section.lines;

    let report = run_blocking(move || file_roundtrip(&dir, lines))
        .await
        .map_err(|e| fail("/io", e))?;
    Ok(Json(report))
}
