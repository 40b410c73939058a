use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use userstat_core::error::{Result, UserstatError};
use userstat_core::protocol::DEFAULT_FAILURE_THRESHOLD;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub handler: HandlerSection,

    #[serde(default)]
    pub generator: GeneratorSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            handler: HandlerSection::default(),
            generator: GeneratorSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(UserstatError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.handler.validate()?;
        self.generator.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            UserstatError::Config(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerSection {
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: f64,
}

impl Default for HandlerSection {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
        }
    }
}

impl HandlerSection {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_threshold) {
            return Err(UserstatError::Config(
                "handler.failure_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_target")]
    pub target: String,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_users")]
    pub users: Vec<String>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            target: default_target(),
            interval_ms: default_interval_ms(),
            users: default_users(),
        }
    }
}

impl GeneratorSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=600000).contains(&self.interval_ms) {
            return Err(UserstatError::Config(
                "generator.interval_ms must be between 100 and 600000".into(),
            ));
        }
        if self.users.is_empty() {
            return Err(UserstatError::Config(
                "generator.users must not be empty".into(),
            ));
        }
        if !self.target.starts_with("http://") {
            return Err(UserstatError::Config(
                "generator.target must be an http:// URL".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_failure_threshold() -> f64 {
    DEFAULT_FAILURE_THRESHOLD
}
fn default_enabled() -> bool {
    true
}
fn default_target() -> String {
    "http://localhost:8080".into()
}
fn default_interval_ms() -> u64 {
    2000
}
fn default_users() -> Vec<String> {
    ["bob", "alice", "jack"].map(String::from).to_vec()
}
