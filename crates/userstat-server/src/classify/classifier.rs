use std::sync::Arc;

use axum::http::Method;

use userstat_core::error::{Result, UserstatError};
use userstat_core::protocol::{Outcome, OutcomeSampler, ThreadRngSampler, UserRequest};

use crate::obs::UserstatMetrics;

/// Records exactly one `(user, status)` sample when dropped.
///
/// Labels stay empty unless the request made it through parsing and the draw.
struct RecordOnDrop<'a> {
    metrics: &'a UserstatMetrics,
    user: String,
    status: &'static str,
}

impl<'a> RecordOnDrop<'a> {
    fn new(metrics: &'a UserstatMetrics) -> Self {
        Self {
            metrics,
            user: String::new(),
            status: "",
        }
    }
}

impl Drop for RecordOnDrop<'_> {
    fn drop(&mut self) {
        self.metrics.record_user_status(&self.user, self.status);
    }
}

/// Randomly labels requests as `2xx`/`4xx` and counts them per user.
#[derive(Clone)]
pub struct Classifier {
    metrics: Arc<UserstatMetrics>,
    sampler: Arc<dyn OutcomeSampler>,
    failure_threshold: f64,
}

impl Classifier {
    pub fn new(metrics: Arc<UserstatMetrics>, failure_threshold: f64) -> Self {
        Self::with_sampler(metrics, Arc::new(ThreadRngSampler), failure_threshold)
    }

    pub fn with_sampler(
        metrics: Arc<UserstatMetrics>,
        sampler: Arc<dyn OutcomeSampler>,
        failure_threshold: f64,
    ) -> Self {
        Self {
            metrics,
            sampler,
            failure_threshold,
        }
    }

    pub fn metrics(&self) -> &Arc<UserstatMetrics> {
        &self.metrics
    }

    /// Classify one request.
    ///
    /// Every call records one sample, including the method and parse-error
    /// returns, which record `("", "")`.
    pub fn classify(&self, method: &Method, body: &[u8]) -> Result<Outcome> {
        let mut record = RecordOnDrop::new(&self.metrics);

        if *method != Method::POST {
            return Err(UserstatError::MethodNotAllowed);
        }
        let req = UserRequest::decode(body)?;

        let outcome = self.sampler.sample(self.failure_threshold);
        record.user = req.user;
        record.status = outcome.as_str();

        tracing::info!("{} {}", record.user, outcome);
        Ok(outcome)
    }
}
