//! burnin core: transport-agnostic workload kernels and the shared error type.
//!
//! Each kernel stresses one resource dimension (CPU hashing, blocking file I/O,
//! serialization, paced streaming) in a reproducible, parameterizable way. The
//! HTTP layer lives in `burnin-server`; nothing here knows about requests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `BurninError`/`Result` so a failing workload
//! fails one request, never the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod workload;

/// Shared result type.
pub use error::{Result, BurninError};
