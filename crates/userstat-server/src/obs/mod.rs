//! Lightweight in-process metrics.
//!
//! Counters are stored as atomics in a `DashMap` and rendered in the
//! Prometheus text format by the `/metrics` handler.

pub mod metrics;

pub use metrics::{CounterVec, UserstatMetrics, USER_STATUS_METRIC};
