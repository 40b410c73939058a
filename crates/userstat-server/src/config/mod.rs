//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use userstat_core::error::{Result, UserstatError};

pub use schema::{GeneratorSection, HandlerSection, ServerConfig, ServerSection};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "userstat.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| UserstatError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

/// Load `path` if it exists, otherwise fall back to built-in defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_from_file(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(ServerConfig::default())
    }
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| UserstatError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
