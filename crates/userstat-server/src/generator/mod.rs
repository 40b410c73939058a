//! Synthetic traffic generator.
//!
//! Posts `{"user": ...}` for a random user from a fixed pool to the classifier
//! endpoint, once per interval, until its cancellation token fires. Responses
//! and errors are discarded.

use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use userstat_core::error::{Result, UserstatError};
use userstat_core::protocol::UserRequest;

use crate::config::GeneratorSection;

pub struct TrafficGenerator {
    client: reqwest::Client,
    target: String,
    users: Vec<String>,
    interval: Duration,
}

impl TrafficGenerator {
    pub fn new(target: impl Into<String>, users: Vec<String>, interval: Duration) -> Result<Self> {
        if users.is_empty() {
            return Err(UserstatError::Config("generator user pool is empty".into()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            target: target.into(),
            users,
            interval,
        })
    }

    pub fn from_config(cfg: &GeneratorSection) -> Result<Self> {
        Self::new(cfg.target.clone(), cfg.users.clone(), cfg.interval())
    }

    /// Uniform pick from the pool.
    pub fn pick_user(&self) -> &str {
        self.users
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Send one request; the outcome is ignored.
    async fn fire(&self) {
        let req = UserRequest::new(self.pick_user());
        let _ = self.client.post(&self.target).json(&req).send().await;
    }

    /// Run until `cancel` fires. Cancellation interrupts both the in-flight
    /// request and the sleep.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            target_url = %self.target,
            interval_ms = self.interval.as_millis() as u64,
            users = ?self.users,
            "traffic generator started"
        );
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.fire() => {}
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        tracing::info!("traffic generator stopped");
    }

    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}
