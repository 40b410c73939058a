//! Shared error type across userstat crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed request body.
    BadRequest,
    /// Wrong HTTP method.
    MethodNotAllowed,
    /// Invalid configuration.
    Config,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, UserstatError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum UserstatError {
    /// Carries the underlying parse error text verbatim.
    #[error("{0}")]
    BadRequest(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl UserstatError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            UserstatError::BadRequest(_) => ClientCode::BadRequest,
            UserstatError::MethodNotAllowed => ClientCode::MethodNotAllowed,
            UserstatError::Config(_) => ClientCode::Config,
            UserstatError::Internal(_) => ClientCode::Internal,
        }
    }
}
