//! Request classification.
//!
//! Re-exports the transport-agnostic classifier so HTTP bindings and tests
//! share one implementation.

pub mod classifier;

pub use classifier::Classifier;
