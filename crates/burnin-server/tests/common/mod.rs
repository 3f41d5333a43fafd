//! Shared helpers: isolated state, in-process requests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode, Version};
use axum::Router;
use tower::ServiceExt;

use burnin_server::app_state::AppState;
use burnin_server::config::ServerConfig;
use burnin_server::router::build_router;

pub struct Harness {
    pub state: AppState,
    pub app: Router,
    pub io_dir: tempfile::TempDir,
}

/// Fresh registry, temp dir for the io workload, short stream pacing.
pub fn harness() -> Harness {
    let io_dir = tempfile::tempdir().unwrap();
    let mut cfg = ServerConfig::default();
    cfg.workloads.io.dir = Some(io_dir.path().to_path_buf());
    cfg.workloads.stream.delay_ms = 5;
    harness_with(cfg, io_dir)
}

pub fn harness_with(cfg: ServerConfig, io_dir: tempfile::TempDir) -> Harness {
    let state = AppState::new(cfg).unwrap();
    let app = build_router(state.clone());
    Harness { state, app, io_dir }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub fn get_with_version(uri: &str, version: Version) -> Request<Body> {
    Request::builder().uri(uri).version(version).body(Body::empty()).unwrap()
}
