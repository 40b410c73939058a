//! userstat core: transport-agnostic request types, outcome sampling, and errors.
//!
//! This crate defines the request/response contracts and error surface shared
//! by the HTTP server and the traffic generator. It carries no transport or
//! runtime dependencies so the classification logic can be tested in isolation.
//!
//! # Lints
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed request bodies surface as `UserstatError::BadRequest`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, UserstatError};
