//! Transport probe
//!
//! Manages one real-time connection's full lifecycle for a scenario:
//! credential acquisition, connect, matcher-based request/response
//! exchange, close.

mod connection;
mod credential;
mod matcher;

pub use connection::{Connection, Probe};
pub use matcher::Matcher;

use thiserror::Error;

/// Probe errors
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("credential unavailable: {0}")]
    CredentialUnavailable(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("no matching response within {0}ms")]
    ResponseTimeout(u64),
}
