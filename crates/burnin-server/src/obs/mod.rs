//! Observability: metrics registry, request instruments, and the
//! instrumentation middleware that feeds them.
//!
//! Metrics are stored as atomics and rendered by the `/metrics` handler.

pub mod capture;
pub mod http;
pub mod metrics;
pub mod middleware;

pub use http::HttpMetrics;
pub use metrics::Registry;
