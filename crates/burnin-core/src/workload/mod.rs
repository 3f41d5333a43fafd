//! Workload kernels.
//!
//! One module per stressed resource:
//! - `cpu`: repeated SHA-256 over a fixed input.
//! - `io`: blocking temp-file write/read/delete round-trip.
//! - `json`: synthetic user dataset, serialize then deserialize.
//! - `stream`: paced chunk plan for incrementally flushed bodies.
//!
//! Kernels are synchronous. Callers on an async runtime decide where blocking
//! work runs.

pub mod cpu;
pub mod io;
pub mod json;
pub mod stream;

pub use cpu::{resolve_iterations, CpuReport};
pub use io::{file_roundtrip, IoReport};
pub use json::{build_payload, roundtrip, Pagination, Preferences, Role, Theme, User, UserMetadata, UsersPayload};
pub use stream::StreamPlan;
