//! Workload route handlers.
//!
//! Thin async adapters over `burnin_core::workload`. Blocking kernels (hashing,
//! file I/O, serialization) run on the blocking pool so they occupy a thread
//! for their whole duration without stalling the async workers.

pub mod cpu;
pub mod io;
pub mod json;
pub mod stream;

use burnin_core::error::{BurninError, Result};

use crate::error::ApiError;

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BurninError::Task(e.to_string()))?
}

/// Log a request-scoped failure and turn it into a 500.
fn fail(route: &'static str, e: BurninError) -> ApiError {
    tracing::warn!(route, code = e.client_code().as_str(), error = %e, "workload failed");
    ApiError(e)
}
