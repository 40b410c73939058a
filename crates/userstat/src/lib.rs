//! Top-level facade crate for userstat.
//!
//! Re-exports the core types and the server library so users can depend on a single crate.

pub mod core {
    pub use userstat_core::*;
}

pub mod server {
    pub use userstat_server::*;
}
