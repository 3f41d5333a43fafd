//! Shared application state.
//!
//! Holds the effective config and the metrics registry. The registry is built
//! here, explicitly, so every `AppState` (and every test) owns an isolated one.

use std::sync::Arc;

use burnin_core::error::Result;

use crate::config::ServerConfig;
use crate::obs::{HttpMetrics, Registry};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<ServerConfig>,
    registry: Arc<Registry>,
    http: Arc<HttpMetrics>,
}

impl AppState {
    /// Build state with a fresh registry.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_registry(cfg, Arc::new(Registry::new()))
    }

    /// Build state on top of an existing registry. Fails if the HTTP
    /// instruments are already registered there.
    pub fn with_registry(cfg: ServerConfig, registry: Arc<Registry>) -> Result<Self> {
        cfg.validate()?;
        let http = Arc::new(HttpMetrics::register(&registry)?);
        Ok(Self { cfg: Arc::new(cfg), registry, http })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    pub fn http_metrics(&self) -> Arc<HttpMetrics> {
        Arc::clone(&self.http)
    }
}
