//! Server config loader (strict parsing).
//!
//! Sources, later wins:
//! 1. built-in defaults
//! 2. YAML file named by `BURNIN_CONFIG`, if set
//! 3. `PORT` environment variable

pub mod schema;

use std::fs;

use burnin_core::error::{BurninError, Result};

pub use schema::{CpuSection, IoSection, JsonSection, ServerConfig, StreamSection, WorkloadsSection};

pub const CONFIG_PATH_ENV: &str = "BURNIN_CONFIG";
pub const PORT_ENV: &str = "PORT";

/// Load from the process environment.
pub fn load() -> Result<ServerConfig> {
    let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => load_from_file(&path)?,
        _ => ServerConfig::default(),
    };
    apply_port_override(&mut cfg, std::env::var(PORT_ENV).ok().as_deref())?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BurninError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    // An empty document deserializes as unit, not as an empty mapping.
    let cfg: ServerConfig = if s.trim().is_empty() {
        ServerConfig::default()
    } else {
        serde_yaml::from_str(s).map_err(|e| BurninError::Config(format!("invalid yaml: {e}")))?
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Apply a raw `PORT` value. Empty or missing keeps the configured port.
pub fn apply_port_override(cfg: &mut ServerConfig, raw: Option<&str>) -> Result<()> {
    match raw {
        None | Some("") => Ok(()),
        Some(p) => {
            cfg.port = p
                .parse()
                .map_err(|_| BurninError::Config(format!("{PORT_ENV} must be a port number, got {p:?}")))?;
            Ok(())
        }
    }
}
