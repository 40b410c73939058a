//! Transport layer modules.
//!
//! `http`: axum binding of the classifier (`POST /`) and the error response mapping.

pub mod http;
