//! Animator: A reveal run bound to its own ticker thread.

use super::ticker::TickerActor;
use crate::error::Result;
use crate::reveal::{CancelToken, RevealRun, RevealSink, RunId};
use std::ops::ControlFlow;
use std::time::Duration;
use tracing::debug;

/// Drives one [`RevealRun`] on a dedicated ticker.
///
/// Dropping the animator disposes it; once [`dispose`](Self::dispose)
/// returns, the run's sink receives nothing more.
pub struct Animator {
    id: RunId,
    cancel: CancelToken,
    ticker: Option<TickerActor>,
}

impl Animator {
    /// Start ticking `run` every `interval`.
    ///
    /// A run that skips animation is completed right here, on the
    /// calling thread, without spawning a ticker.
    pub fn spawn<S>(mut run: RevealRun<S>, interval: Duration) -> Result<Self>
    where
        S: RevealSink + Send + 'static,
    {
        let id = run.id();
        let cancel = run.cancel_token().clone();

        if run.is_skipping() {
            run.tick();
            return Ok(Self {
                id,
                cancel,
                ticker: None,
            });
        }

        let ticker = TickerActor::spawn(&format!("typewheel-{id}"), interval, move |_tick| {
            if run.tick().is_done() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        debug!(run = %id, ?interval, "animator started");

        Ok(Self {
            id,
            cancel,
            ticker: Some(ticker),
        })
    }

    /// The run being animated.
    pub const fn id(&self) -> RunId {
        self.id
    }

    /// The run's cancellation token.
    pub const fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Request a cooperative stop.
    ///
    /// The run observes it on its next tick, reports `Stopped` and the
    /// ticker exits.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Check if the run needs no more ticks.
    pub fn is_finished(&self) -> bool {
        self.ticker.as_ref().map_or(true, TickerActor::is_finished)
    }

    /// Tear down the ticker. No tick fires after this returns.
    ///
    /// A run torn down before finishing never notifies its sink.
    pub fn dispose(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.join();
            debug!(run = %self.id, "animator disposed");
        }
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.dispose();
    }
}
