//! `GET /stream`
//!
//! Emits `chunk 1` .. `chunk N`, one body frame each, pausing after every
//! frame. Each frame is handed to the transport as soon as it is produced.

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::State,
    http::{header, Version},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::stream;

use burnin_core::workload::StreamPlan;
use burnin_core::BurninError;

use crate::app_state::AppState;
use crate::error::ApiError;

use super::fail;

/// HTTP/1.0 and older have no chunked transfer coding, so frames cannot be
/// delivered incrementally.
pub fn supports_incremental(version: Version) -> bool {
    version >= Version::HTTP_11
}

pub async fn stream(State(state): State<AppState>, version: Version) -> Result<Response, ApiError> {
    if !supports_incremental(version) {
        return Err(fail("/stream", BurninError::StreamingUnsupported));
    }

    let plan = state.cfg().workloads.stream.plan();
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(chunks(plan)),
    )
        .into_response())
}

/// Chunk `n` is produced `delay` after chunk `n - 1`; the stream ends one
/// `delay` after the last chunk.
fn chunks(plan: StreamPlan) -> impl futures_util::Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    stream::unfold(1u32, move |n| async move {
        if n > 1 {
            tokio::time::sleep(plan.delay).await;
        }
        (n <= plan.chunks).then(|| (Ok(Bytes::from(StreamPlan::chunk(n))), n + 1))
    })
}
