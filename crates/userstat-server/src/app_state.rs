//! Shared application state for the userstat server.
//!
//! Holds the metrics registry and the classifier built over it. The registry
//! is injected rather than global so each test can start from a fresh one.

use std::sync::Arc;

use userstat_core::protocol::OutcomeSampler;

use crate::classify::Classifier;
use crate::config::ServerConfig;
use crate::obs::UserstatMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    metrics: Arc<UserstatMetrics>,
    classifier: Classifier,
}

impl AppState {
    pub fn new(cfg: &ServerConfig, metrics: Arc<UserstatMetrics>) -> Self {
        let classifier = Classifier::new(Arc::clone(&metrics), cfg.handler.failure_threshold);
        Self::from_parts(metrics, classifier)
    }

    /// Build state with a custom sampler (pinned draws in tests).
    pub fn with_sampler(
        cfg: &ServerConfig,
        metrics: Arc<UserstatMetrics>,
        sampler: Arc<dyn OutcomeSampler>,
    ) -> Self {
        let classifier = Classifier::with_sampler(
            Arc::clone(&metrics),
            sampler,
            cfg.handler.failure_threshold,
        );
        Self::from_parts(metrics, classifier)
    }

    fn from_parts(metrics: Arc<UserstatMetrics>, classifier: Classifier) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                metrics,
                classifier,
            }),
        }
    }

    pub fn metrics(&self) -> Arc<UserstatMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.inner.classifier
    }
}
