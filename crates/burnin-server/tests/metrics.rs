//! Instrumentation invariants: one counter increment and one histogram
//! observation per request, with matching labels.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, Version};
use futures_util::StreamExt;
use tower::ServiceExt;

use burnin_core::error::ClientCode;
use burnin_server::app_state::AppState;
use burnin_server::config::ServerConfig;
use burnin_server::obs::metrics::Registry;
use burnin_server::router::build_router;

use common::{get, get_with_version, harness, send};

#[tokio::test]
async fn each_route_records_once() {
    let h = harness();
    let m = h.state.http_metrics();

    for route in ["/health", "/cpu", "/io", "/json", "/stream"] {
        let (s, _) = get(&h.app, route).await;
        assert_eq!(s, StatusCode::OK, "{route}");
        assert_eq!(m.requests.get(&["GET", route, "200"]), 1, "counter {route}");
        assert_eq!(m.duration.sample_count(&["GET", route]), 1, "histogram {route}");
        assert_eq!(m.in_progress.get(&["GET", route]), 0, "in progress {route}");
    }
}

#[tokio::test]
async fn any_method_health_is_instrumented() {
    let h = harness();
    let m = h.state.http_metrics();

    let post = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&h.app, post).await.0, StatusCode::OK);
    get(&h.app, "/health").await;

    assert_eq!(m.requests.get(&["POST", "/health", "200"]), 1);
    assert_eq!(m.requests.get(&["GET", "/health", "200"]), 1);
    assert_eq!(m.duration.sample_count(&["POST", "/health"]), 1);
}

#[test]
fn router_builds_for_fresh_state() {
    let state = AppState::new(ServerConfig::default()).unwrap();
    let _router = build_router(state);
}

#[tokio::test]
async fn aborted_stream_records_once_and_balances_gauge() {
    let h = harness();
    let m = h.state.http_metrics();

    let res = h.app.clone().oneshot(get_with_version("/stream", Version::HTTP_11)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(m.in_progress.get(&["GET", "/stream"]), 1);

    let mut frames = res.into_body().into_data_stream();
    let first = frames.next().await.unwrap().unwrap();
    assert_eq!(&first[..], b"chunk 1\n");
    assert_eq!(m.requests.get(&["GET", "/stream", "200"]), 0, "recorded before the body finished");

    drop(frames);

    assert_eq!(m.requests.get(&["GET", "/stream", "200"]), 1);
    assert_eq!(m.duration.sample_count(&["GET", "/stream"]), 1);
    assert_eq!(m.in_progress.get(&["GET", "/stream"]), 0);
}

#[tokio::test]
async fn query_does_not_leak_into_route_label() {
    let h = harness();
    let m = h.state.http_metrics();
    get(&h.app, "/cpu?iterations=3").await;
    get(&h.app, "/cpu?iterations=abc").await;
    assert_eq!(m.requests.get(&["GET", "/cpu", "200"]), 2);
    assert_eq!(m.duration.sample_count(&["GET", "/cpu"]), 2);
}

#[tokio::test]
async fn failures_are_recorded_with_their_status() {
    let h = harness();
    let m = h.state.http_metrics();

    let (s, _) = send(&h.app, get_with_version("/stream", Version::HTTP_10)).await;
    assert_eq!(s, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(m.requests.get(&["GET", "/stream", "500"]), 1);
    assert_eq!(m.requests.get(&["GET", "/stream", "200"]), 0);
    assert_eq!(m.duration.sample_count(&["GET", "/stream"]), 1);
}

#[tokio::test]
async fn streamed_body_is_timed_to_completion() {
    let io_dir = tempfile::tempdir().unwrap();
    let mut cfg = ServerConfig::default();
    cfg.workloads.stream.chunks = 4;
    cfg.workloads.stream.delay_ms = 50;
    let h = common::harness_with(cfg, io_dir);
    let m = h.state.http_metrics();

    get(&h.app, "/stream").await;
    let sum = m.duration.sample_sum(&["GET", "/stream"]);
    assert!(sum >= Duration::from_millis(200).as_secs_f64(), "sum {sum}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_lose_no_updates() {
    let h = harness();
    let m = h.state.http_metrics();

    let mut tasks = Vec::new();
    for _ in 0..100 {
        let app = h.app.clone();
        tasks.push(tokio::spawn(async move { get(&app, "/cpu?iterations=50").await }));
    }
    for t in tasks {
        assert_eq!(t.await.unwrap().0, StatusCode::OK);
    }

    assert_eq!(m.requests.get(&["GET", "/cpu", "200"]), 100);
    assert_eq!(m.duration.sample_count(&["GET", "/cpu"]), 100);
    assert_eq!(m.in_progress.get(&["GET", "/cpu"]), 0);
}

#[tokio::test]
async fn metrics_endpoint_renders_exposition() {
    let h = harness();
    get(&h.app, "/health").await;

    let (s, body) = get(&h.app, "/metrics").await;
    assert_eq!(s, StatusCode::OK);
    assert!(body.contains("# TYPE http_requests_total counter"));
    assert!(body.contains("# TYPE http_request_duration_seconds histogram"));
    assert!(body.contains(r#"http_requests_total{method="GET",endpoint="/health",status="200"} 1"#));
    assert!(body.contains(r#"http_request_duration_seconds_bucket{method="GET",endpoint="/health",le="+Inf"} 1"#));
    assert!(body.contains(r#"http_request_duration_seconds_count{method="GET",endpoint="/health"} 1"#));
    // the scrape endpoint is not instrumented
    assert!(!body.contains(r#"endpoint="/metrics""#));
}

#[test]
fn second_registration_fails_fast() {
    let registry = Arc::new(Registry::new());
    AppState::with_registry(ServerConfig::default(), Arc::clone(&registry)).unwrap();

    let err = match AppState::with_registry(ServerConfig::default(), registry) {
        Ok(_) => panic!("duplicate registration must fail"),
        Err(e) => e,
    };
    assert_eq!(err.client_code(), ClientCode::AlreadyRegistered);
}

#[test]
fn histogram_buckets_are_cumulative() {
    let registry = Registry::new();
    let h = registry
        .register_histogram("t_seconds", "test", &["k"], &[0.1, 1.0])
        .unwrap();
    h.observe(&["a"], Duration::from_millis(50));
    h.observe(&["a"], Duration::from_millis(500));
    h.observe(&["a"], Duration::from_secs(3));

    let out = registry.render();
    assert!(out.contains(r#"t_seconds_bucket{k="a",le="0.1"} 1"#), "{out}");
    assert!(out.contains(r#"t_seconds_bucket{k="a",le="1"} 2"#), "{out}");
    assert!(out.contains(r#"t_seconds_bucket{k="a",le="+Inf"} 3"#), "{out}");
    assert!(out.contains(r#"t_seconds_count{k="a"} 3"#), "{out}");
}

#[test]
fn wrong_label_count_is_dropped() {
    let registry = Registry::new();
    let c = registry.register_counter("arity_total", "test", &["a", "b"]).unwrap();
    let h = registry
        .register_histogram("arity_seconds", "test", &["a"], &[1.0])
        .unwrap();

    c.inc(&["only-one"]);
    c.inc(&["x", "y", "z"]);
    h.observe(&["x", "y"], Duration::from_millis(1));
    c.inc(&["x", "y"]);

    assert_eq!(c.get(&["only-one"]), 0);
    assert_eq!(c.get(&["x", "y"]), 1);
    assert_eq!(h.sample_count(&["x", "y"]), 0);

    let out = registry.render();
    assert!(out.contains(r#"arity_total{a="x",b="y"} 1"#), "{out}");
    assert!(!out.contains("only-one"), "{out}");
    assert!(!out.contains("arity_seconds_count"), "{out}");
}

#[test]
fn label_values_are_escaped() {
    let registry = Registry::new();
    let c = registry.register_counter("esc_total", "test", &["v"]).unwrap();
    c.inc(&["a\"b\\c\nd"]);
    assert!(registry.render().contains(r#"esc_total{v="a\"b\\c\nd"} 1"#));
}
