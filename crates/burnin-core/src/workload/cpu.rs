//! CPU-bound hashing loop.

use sha2::{Digest, Sha256};

/// Iterations used when the caller does not supply any.
pub const DEFAULT_ITERATIONS: i64 = 100;

const HASH_INPUT: &[u8] = b"benchmark test data";

/// Resolve the raw `iterations` parameter.
///
/// Absent or empty selects `default`. Anything that does not parse as an
/// integer counts as zero; the asymmetry is part of the observable contract.
pub fn resolve_iterations(raw: Option<&str>, default: i64) -> i64 {
    match raw {
        None | Some("") => default,
        Some(s) => s.parse::<i64>().unwrap_or(0),
    }
}

/// Outcome of a hashing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuReport {
    /// Value the caller asked for (may be negative).
    pub requested: i64,
    /// Hashes actually computed.
    pub performed: u64,
}

impl CpuReport {
    /// Run `iterations` SHA-256 rounds, hex-encoding and discarding each digest.
    pub fn run(iterations: i64) -> Self {
        let rounds = u64::try_from(iterations).unwrap_or(0);
        for _ in 0..rounds {
            let digest = Sha256::digest(HASH_INPUT);
            std::hint::black_box(hex::encode(digest));
        }
        Self { requested: iterations, performed: rounds }
    }

    /// Response body text.
    pub fn summary(&self) -> String {
        format!("Completed {} SHA256 hashes", self.requested)
    }
}
