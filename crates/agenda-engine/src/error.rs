//! Error types for agenda-engine request handling.
//!
//! The engine functions themselves are infallible. Errors only arise at the
//! boundary where JSON requests and configuration are turned into engine inputs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
