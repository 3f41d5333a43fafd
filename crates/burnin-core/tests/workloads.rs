//! Workload kernel tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::time::Duration;

use chrono::Utc;

use burnin_core::error::ClientCode;
use burnin_core::workload::cpu::DEFAULT_ITERATIONS;
use burnin_core::workload::{
    build_payload, file_roundtrip, resolve_iterations, roundtrip, CpuReport, Role, StreamPlan,
};
use burnin_core::BurninError;

#[test]
fn iterations_default_only_when_absent_or_empty() {
    assert_eq!(resolve_iterations(None, DEFAULT_ITERATIONS), 100);
    assert_eq!(resolve_iterations(Some(""), DEFAULT_ITERATIONS), 100);
    assert_eq!(resolve_iterations(Some("0"), DEFAULT_ITERATIONS), 0);
    assert_eq!(resolve_iterations(Some("abc"), DEFAULT_ITERATIONS), 0);
    assert_eq!(resolve_iterations(Some("+7"), DEFAULT_ITERATIONS), 7);
    assert_eq!(resolve_iterations(Some(" 7"), DEFAULT_ITERATIONS), 0);
}

#[test]
fn cpu_report_counts_rounds() {
    let r = CpuReport::run(25);
    assert_eq!(r.performed, 25);
    assert_eq!(r.summary(), "Completed 25 SHA256 hashes");

    let zero = CpuReport::run(0);
    assert_eq!(zero.performed, 0);
    assert_eq!(zero.summary(), "Completed 0 SHA256 hashes");
}

#[test]
fn cpu_negative_request_does_no_work() {
    let r = CpuReport::run(-3);
    assert_eq!(r.performed, 0);
    assert_eq!(r.summary(), "Completed -3 SHA256 hashes");
}

#[test]
fn io_roundtrip_counts_lines_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let report = file_roundtrip(dir.path(), 1000).unwrap();
    assert_eq!(report.status, "ok");
    assert_eq!(report.lines_written, 1000);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0, "temp file left behind");
}

#[test]
fn io_roundtrip_zero_lines() {
    let dir = tempfile::tempdir().unwrap();
    let report = file_roundtrip(dir.path(), 0).unwrap();
    assert_eq!(report.lines_written, 0);
}

#[test]
fn io_missing_dir_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = file_roundtrip(&missing, 10).expect_err("must fail");
    assert_eq!(err.client_code(), ClientCode::Io);
    assert!(err.to_string().starts_with("Failed to create file"));
}

#[test]
fn payload_shape_and_roles() {
    let p = build_payload(1000, Utc::now());
    assert_eq!(p.users.len(), 1000);
    assert_eq!(p.pagination.total, 1000);
    assert_eq!(p.pagination.page, 1);
    for (i, u) in p.users.iter().enumerate() {
        let want = if i % 10 == 0 { Role::Admin } else { Role::User };
        assert_eq!(u.metadata.role, want, "role at {i}");
        if i % 2 == 0 {
            assert!(u.active, "user {i} should be active");
        }
    }
}

#[test]
fn payload_survives_roundtrip() {
    let now = Utc::now();
    let p = build_payload(50, now);
    let back = roundtrip(&p).unwrap();
    assert_eq!(back, p);
    assert_eq!(build_payload(50, now), p);
}

#[test]
fn roundtrip_rejects_non_string_keys() {
    use std::collections::HashMap;
    let mut m: HashMap<(u8, u8), u8> = HashMap::new();
    m.insert((1, 2), 3);
    let err = roundtrip(&m).expect_err("tuple keys are not JSON");
    assert!(matches!(err, BurninError::Serialize(_)));
}

#[test]
fn stream_plan_defaults() {
    let plan = StreamPlan::default();
    assert_eq!(plan.chunks, 20);
    assert_eq!(plan.min_duration(), Duration::from_secs(2));
    assert_eq!(StreamPlan::chunk(3), "chunk 3\n");
}
