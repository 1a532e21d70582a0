//! Reveal configuration.

use crate::error::{Result, RevealError};
use std::time::Duration;

/// Configuration for a reveal run.
///
/// None of these values affect correctness; they tune how fast text
/// appears. Runs and cursors accept any config and treat a zero step as
/// 1. [`validate`](Self::validate) is the strict check, applied by
/// [`RevealDriver::with_config`](crate::actor::RevealDriver::with_config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealConfig {
    /// Time between ticks.
    pub tick_interval: Duration,
    /// Units revealed per tick before any math span has been shown.
    pub prose_step: usize,
    /// Units revealed per tick once a math span has been shown.
    pub math_step: usize,
    /// The math delimiter character.
    pub delimiter: char,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(15),
            prose_step: 1,
            math_step: 3,
            delimiter: '$',
        }
    }
}

impl RevealConfig {
    /// Set the tick interval.
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the per-tick step sizes for prose before and after the first math span.
    #[must_use]
    pub const fn with_steps(mut self, prose_step: usize, math_step: usize) -> Self {
        self.prose_step = prose_step;
        self.math_step = math_step;
        self
    }

    /// Set the math delimiter character.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Check that the configuration can drive a reveal.
    ///
    /// A zero step would stall the cursor and a zero interval would spin
    /// the ticker thread.
    pub fn validate(&self) -> Result<()> {
        if self.prose_step == 0 {
            return Err(RevealError::InvalidConfig("prose_step must be at least 1"));
        }
        if self.math_step == 0 {
            return Err(RevealError::InvalidConfig("math_step must be at least 1"));
        }
        if self.tick_interval.is_zero() {
            return Err(RevealError::InvalidConfig("tick_interval must be non-zero"));
        }
        if self.delimiter.is_whitespace() {
            return Err(RevealError::InvalidConfig("delimiter must not be whitespace"));
        }
        Ok(())
    }
}
