//! userstat server library entry.
//!
//! This crate wires the classifier, metrics registry, HTTP transport, and
//! traffic generator into a runnable service. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod classify;
pub mod config;
pub mod generator;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
