//! Shared error type across burnin crates.

use thiserror::Error;

/// Stable error codes (logs and metrics-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Filesystem failure during a workload.
    Io,
    /// Encoding a payload failed.
    Serialize,
    /// Decoding a payload failed.
    Deserialize,
    /// Transport cannot flush incrementally.
    StreamingUnsupported,
    /// A collector name was registered twice.
    AlreadyRegistered,
    /// A worker task died before finishing.
    Task,
    /// Invalid configuration.
    Config,
    /// Process could not start.
    Startup,
}

impl ClientCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Io => "IO",
            ClientCode::Serialize => "SERIALIZE",
            ClientCode::Deserialize => "DESERIALIZE",
            ClientCode::StreamingUnsupported => "STREAMING_UNSUPPORTED",
            ClientCode::AlreadyRegistered => "ALREADY_REGISTERED",
            ClientCode::Task => "TASK",
            ClientCode::Config => "CONFIG",
            ClientCode::Startup => "STARTUP",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BurninError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum BurninError {
    #[error("{0}")]
    Io(String),
    #[error("serialize failed: {0}")]
    Serialize(String),
    #[error("deserialize failed: {0}")]
    Deserialize(String),
    #[error("Streaming not supported")]
    StreamingUnsupported,
    #[error("collector already registered: {0}")]
    AlreadyRegistered(String),
    #[error("worker task failed: {0}")]
    Task(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("startup failed: {0}")]
    Startup(String),
}

impl BurninError {
    /// Map the error to a stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BurninError::Io(_) => ClientCode::Io,
            BurninError::Serialize(_) => ClientCode::Serialize,
            BurninError::Deserialize(_) => ClientCode::Deserialize,
            BurninError::StreamingUnsupported => ClientCode::StreamingUnsupported,
            BurninError::AlreadyRegistered(_) => ClientCode::AlreadyRegistered,
            BurninError::Task(_) => ClientCode::Task,
            BurninError::Config(_) => ClientCode::Config,
            BurninError::Startup(_) => ClientCode::Startup,
        }
    }
}
