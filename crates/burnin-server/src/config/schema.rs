use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use burnin_core::error::{BurninError, Result};
use burnin_core::workload::{cpu, io, json, stream, StreamPlan};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_listen_host")]
    pub listen_host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub workloads: WorkloadsSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_host: default_listen_host(),
            port: default_port(),
            workloads: WorkloadsSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.listen_host.trim().is_empty() {
            return Err(BurninError::Config("listen_host must not be empty".into()));
        }
        self.workloads.validate()
    }

    /// `host:port` string handed to the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkloadsSection {
    #[serde(default)]
    pub cpu: CpuSection,
    #[serde(default)]
    pub io: IoSection,
    #[serde(default)]
    pub json: JsonSection,
    #[serde(default)]
    pub stream: StreamSection,
}

impl WorkloadsSection {
    pub fn validate(&self) -> Result<()> {
        if self.json.records == 0 {
            return Err(BurninError::Config("workloads.json.records must be at least 1".into()));
        }
        if self.stream.chunks == 0 {
            return Err(BurninError::Config("workloads.stream.chunks must be at least 1".into()));
        }
        if self.stream.delay_ms > 10_000 {
            return Err(BurninError::Config(
                "workloads.stream.delay_ms must be at most 10000".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CpuSection {
    #[serde(default = "default_iterations")]
    pub default_iterations: i64,
}

impl Default for CpuSection {
    fn default() -> Self {
        Self { default_iterations: default_iterations() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoSection {
    #[serde(default = "default_lines")]
    pub lines: usize,

    /// Directory for temp files; the OS temp dir when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for IoSection {
    fn default() -> Self {
        Self { lines: default_lines(), dir: None }
    }
}

impl IoSection {
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonSection {
    #[serde(default = "default_records")]
    pub records: usize,
}

impl Default for JsonSection {
    fn default() -> Self {
        Self { records: default_records() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamSection {
    #[serde(default = "default_chunks")]
    pub chunks: u32,

    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for StreamSection {
    fn default() -> Self {
        Self { chunks: default_chunks(), delay_ms: default_delay_ms() }
    }
}

impl StreamSection {
    pub fn plan(&self) -> StreamPlan {
        StreamPlan::new(self.chunks, Duration::from_millis(self.delay_ms))
    }
}

fn default_listen_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}
fn default_iterations() -> i64 {
    cpu::DEFAULT_ITERATIONS
}
fn default_lines() -> usize {
    io::DEFAULT_LINES
}
fn default_records() -> usize {
    json::DEFAULT_RECORDS
}
fn default_chunks() -> u32 {
    stream::DEFAULT_CHUNKS
}
fn default_delay_ms() -> u64 {
    stream::DEFAULT_DELAY.as_millis() as u64
}
