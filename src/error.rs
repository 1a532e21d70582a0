//! Error types for the reveal engine.
//!
//! The engine itself never fails on its input. Errors only come from
//! configuration validation and from spawning the ticker thread.

use std::io;
use thiserror::Error;

/// Errors raised while setting up a reveal.
#[derive(Debug, Error)]
pub enum RevealError {
    /// A configuration value is out of range.
    #[error("Invalid reveal configuration: {0}")]
    InvalidConfig(&'static str),

    /// The OS refused to spawn the ticker thread.
    #[error("Failed to spawn ticker thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RevealError>;
