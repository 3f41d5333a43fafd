//! Instrumentation middleware.
//!
//! `instrument(route, metrics, handler)` wraps a workload handler so that every
//! call records one `http_requests_total` increment and one
//! `http_request_duration_seconds` observation labeled with the request method
//! and the fixed route label. 5xx responses are recorded like any other.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use super::capture::{Observation, ObservedBody};
use super::http::HttpMetrics;

/// Middleware state: which instruments, and under which route label.
#[derive(Clone)]
pub struct RouteLabel {
    metrics: Arc<HttpMetrics>,
    route: &'static str,
}

impl RouteLabel {
    pub fn new(metrics: Arc<HttpMetrics>, route: &'static str) -> Self {
        Self { metrics, route }
    }
}

pub async fn track(State(label): State<RouteLabel>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let flight = label.metrics.in_flight(req.method().clone(), label.route);

    let response = next.run(req).await;

    let observation = Observation::new(flight, response.status(), start);
    response.map(|body| Body::new(ObservedBody::new(body, observation)))
}

/// Wrap `handler` with request instrumentation under `route`.
///
/// Applied with `layer`, not `route_layer`, so handlers mounted through the
/// method fallback (`any`) are instrumented too.
pub fn instrument<S>(route: &'static str, metrics: Arc<HttpMetrics>, handler: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    handler.layer(middleware::from_fn_with_state(RouteLabel::new(metrics, route), track))
}
