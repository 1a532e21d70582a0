//! Cancellation token shared between a run and its caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable "stop generating" capability.
///
/// The caller keeps one clone and hands another to the run at
/// construction. The run reads it once per tick.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Calling this more than once has no extra effect.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check if cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
