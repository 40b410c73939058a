//! Wire types for the classification endpoint.
//!
//! - `request`: the `{"user": ...}` body posted by clients and the generator.
//! - `outcome`: the synthetic `2xx`/`4xx` label and the random draw behind it.
//!
//! Decoding never panics: malformed input is reported as `UserstatError`.

pub mod outcome;
pub mod request;

pub use outcome::{
    FixedSampler, Outcome, OutcomeSampler, ThreadRngSampler, DEFAULT_FAILURE_THRESHOLD,
};
pub use request::{StatusBody, UserRequest};
