//! Outcome label and random draw.

use std::fmt;

/// Draws above this value classify as `4xx`.
pub const DEFAULT_FAILURE_THRESHOLD: f64 = 0.8;

/// Synthetic classification of a request. Unrelated to the HTTP status sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Strictly greater than `threshold` is a failure; equal is a success.
    pub fn from_draw(draw: f64, threshold: f64) -> Self {
        if draw > threshold {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }

    /// Metric label value.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "2xx",
            Outcome::Failure => "4xx",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of uniform draws in `[0, 1)`.
pub trait OutcomeSampler: Send + Sync {
    fn draw(&self) -> f64;

    fn sample(&self, threshold: f64) -> Outcome {
        Outcome::from_draw(self.draw(), threshold)
    }
}

/// Default sampler backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSampler;

impl OutcomeSampler for ThreadRngSampler {
    fn draw(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Always returns the same draw. Used to pin outcomes.
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler(pub f64);

impl OutcomeSampler for FixedSampler {
    fn draw(&self) -> f64 {
        self.0
    }
}
