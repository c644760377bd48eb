//! Core error type.
//!
//! Sub-crates define their own error enums and wrap the ones below them via
//! `#[from]`, so a caller at the top of the stack sees a single type.

use thiserror::Error;

/// Errors produced by `rd-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid clock time {0:?} (expected HH:MM)")]
    InvalidClockTime(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rd-core`.
pub type CoreResult<T> = Result<T, CoreError>;
