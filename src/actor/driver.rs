//! Driver: Coordinates reveal runs for one display target.
//!
//! The driver is the entry point for applications that want animated
//! reveals without managing threads. It keeps at most one live
//! [`Animator`], so two runs never write to the same display at once,
//! and funnels every run's output into a single event channel.

use super::Animator;
use crate::config::RevealConfig;
use crate::error::Result;
use crate::reveal::{CancelToken, RevealEvent, RevealRun, RunId};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::Duration;
use tracing::debug;

/// Runs one reveal at a time and collects their events.
pub struct RevealDriver {
    /// Configuration.
    config: RevealConfig,
    /// Event sender handed to each run.
    events_tx: Sender<RevealEvent>,
    /// Event receiver for the application.
    events_rx: Receiver<RevealEvent>,
    /// The live animator, if any.
    active: Option<Animator>,
}

impl RevealDriver {
    /// Create a driver with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(RevealConfig::default())
    }

    /// Create a driver with custom configuration.
    pub fn with_config(config: RevealConfig) -> Result<Self> {
        config.validate()?;
        // Unbounded: prefix updates must never be dropped or reordered
        let (events_tx, events_rx) = unbounded();
        Ok(Self {
            config,
            events_tx,
            events_rx,
            active: None,
        })
    }

    /// Get the configuration.
    pub const fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Start revealing `text` as run `id`.
    ///
    /// Any previous run is disposed first and will not report
    /// completion. Returns the new run's cancellation token.
    pub fn start(&mut self, id: RunId, text: impl Into<String>, skip: bool) -> Result<CancelToken> {
        if let Some(mut previous) = self.active.take() {
            if !previous.is_finished() {
                debug!(previous = %previous.id(), next = %id, "replacing active reveal");
            }
            previous.dispose();
        }

        let cancel = CancelToken::new();
        let run = RevealRun::new(id, text, cancel.clone(), &self.config, self.events_tx.clone())
            .skip_animation(skip);
        let animator = Animator::spawn(run, self.config.tick_interval)?;
        self.active = Some(animator);
        Ok(cancel)
    }

    /// Ask the active run to stop ("stop generating").
    pub fn stop(&self) {
        if let Some(animator) = &self.active {
            animator.stop();
        }
    }

    /// The run still being animated, if any.
    pub fn active_run(&self) -> Option<RunId> {
        self.active
            .as_ref()
            .filter(|animator| !animator.is_finished())
            .map(Animator::id)
    }

    /// Check if a run is still being animated.
    pub fn is_animating(&self) -> bool {
        self.active_run().is_some()
    }

    /// Get the event receiver for `select!`-style loops.
    pub const fn receiver(&self) -> &Receiver<RevealEvent> {
        &self.events_rx
    }

    /// Poll for the next event (non-blocking).
    pub fn poll_event(&self) -> Option<RevealEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Wait for the next event (blocking with timeout).
    pub fn wait_event(&self, timeout: Duration) -> Option<RevealEvent> {
        self.events_rx.recv_timeout(timeout).ok()
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<RevealEvent> {
        self.events_rx.try_iter().collect()
    }

    /// Dispose the active run, if any.
    pub fn dispose(&mut self) {
        if let Some(mut animator) = self.active.take() {
            animator.dispose();
        }
    }
}

impl Drop for RevealDriver {
    fn drop(&mut self) {
        self.dispose();
    }
}
