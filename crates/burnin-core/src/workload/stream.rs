//! Paced chunk plan for the streaming workload.

use std::time::Duration;

/// Chunks per response.
pub const DEFAULT_CHUNKS: u32 = 20;
/// Pause after each chunk.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPlan {
    pub chunks: u32,
    pub delay: Duration,
}

impl Default for StreamPlan {
    fn default() -> Self {
        Self { chunks: DEFAULT_CHUNKS, delay: DEFAULT_DELAY }
    }
}

impl StreamPlan {
    pub fn new(chunks: u32, delay: Duration) -> Self {
        Self { chunks, delay }
    }

    /// Body line for chunk `n` (1-based), newline included.
    pub fn chunk(n: u32) -> String {
        format!("chunk {n}\n")
    }

    /// Lower bound on how long a full response takes to produce.
    pub fn min_duration(&self) -> Duration {
        self.delay * self.chunks
    }
}
