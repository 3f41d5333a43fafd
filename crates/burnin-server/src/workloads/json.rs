//! `GET /json`
//!
//! Builds the dataset, encodes it, decodes it back, and answers with the
//! decoded copy, so each request pays for both directions.

use axum::{extract::State, Json};
use chrono::Utc;

use burnin_core::workload::{build_payload, roundtrip, UsersPayload};

use crate::app_state::AppState;
use crate::error::ApiError;

use super::{fail, run_blocking};

pub async fn json(State(state): State<AppState>) -> Result<Json<UsersPayload>, ApiError> {
    let records = state.cfg().workloads.json.records;

    let decoded = run_blocking(move || roundtrip(&build_payload(records, Utc::now())))
        .await
        .map_err(|e| fail("/json", e))?;
    Ok(Json(decoded))
}
