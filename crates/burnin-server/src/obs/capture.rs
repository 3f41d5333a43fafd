//! Status capture and body-completion tracking.
//!
//! The handler's response head carries its final status (200 unless the
//! handler chose otherwise). The body is wrapped in `ObservedBody`, which
//! forwards frames, size hints and end-of-stream untouched and records the
//! request exactly once: when the inner body ends, errors, or is dropped.
//! Streamed responses are therefore timed until their last chunk, not until
//! the head was produced.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::body::Body;
use axum::http::StatusCode;
use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};

use super::http::InFlight;

/// One pending request observation.
pub struct Observation {
    flight: InFlight,
    status: StatusCode,
    start: Instant,
}

impl Observation {
    pub fn new(flight: InFlight, status: StatusCode, start: Instant) -> Self {
        Self { flight, status, start }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn record(self) {
        let elapsed = self.start.elapsed();
        self.flight.metrics().record(
            self.flight.method().as_str(),
            self.flight.route(),
            self.status.as_str(),
            elapsed,
        );
        // `flight` drops here: in-progress gauge goes down after the record.
    }
}

/// Pass-through body that completes an `Observation`.
pub struct ObservedBody {
    inner: Body,
    pending: Option<Observation>,
}

impl ObservedBody {
    pub fn new(inner: Body, observation: Observation) -> Self {
        Self { inner, pending: Some(observation) }
    }

    fn finish(&mut self) {
        if let Some(o) = self.pending.take() {
            o.record();
        }
    }
}

impl HttpBody for ObservedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let polled = Pin::new(&mut self.inner).poll_frame(cx);
        if matches!(polled, Poll::Ready(None) | Poll::Ready(Some(Err(_)))) {
            self.finish();
        }
        polled
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for ObservedBody {
    fn drop(&mut self) {
        self.finish();
    }
}
