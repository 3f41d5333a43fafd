//! HTTP request instruments.

use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;

use burnin_core::error::Result;

use super::metrics::{CounterVec, GaugeVec, HistogramVec, Registry, DEFAULT_BUCKETS};

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const REQUESTS_IN_PROGRESS: &str = "http_requests_inprogress";

/// Per-request instruments, labeled by method and route (`endpoint`).
pub struct HttpMetrics {
    pub requests: Arc<CounterVec>,
    pub duration: Arc<HistogramVec>,
    pub in_progress: Arc<GaugeVec>,
}

impl HttpMetrics {
    /// Register the request instruments. Fails if `registry` already holds them.
    pub fn register(registry: &Registry) -> Result<Self> {
        Ok(Self {
            requests: registry.register_counter(
                REQUESTS_TOTAL,
                "Total number of HTTP requests",
                &["method", "endpoint", "status"],
            )?,
            duration: registry.register_histogram(
                REQUEST_DURATION,
                "HTTP request duration in seconds",
                &["method", "endpoint"],
                &DEFAULT_BUCKETS,
            )?,
            in_progress: registry.register_gauge(
                REQUESTS_IN_PROGRESS,
                "Number of HTTP requests in progress",
                &["method", "endpoint"],
            )?,
        })
    }

    /// Mark a request in flight until the returned guard drops.
    pub fn in_flight(self: &Arc<Self>, method: Method, route: &'static str) -> InFlight {
        self.in_progress.inc(&[method.as_str(), route]);
        InFlight { metrics: Arc::clone(self), method, route }
    }

    /// One counter increment and one histogram observation, same (method, route).
    pub fn record(&self, method: &str, route: &str, status: &str, elapsed: Duration) {
        self.requests.inc(&[method, route, status]);
        self.duration.observe(&[method, route], elapsed);
    }
}

/// In-progress gauge guard. Dropping it decrements the gauge, so a request
/// whose future is cancelled still leaves the gauge balanced.
pub struct InFlight {
    metrics: Arc<HttpMetrics>,
    method: Method,
    route: &'static str,
}

impl InFlight {
    pub fn metrics(&self) -> &HttpMetrics {
        &self.metrics
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn route(&self) -> &'static str {
        self.route
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.metrics.in_progress.dec(&[self.method.as_str(), self.route]);
    }
}
