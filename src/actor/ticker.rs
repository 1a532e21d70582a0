//! Ticker Actor: Dedicated thread for generating timing events.
//!
//! This actor calls a callback at a regular interval until the callback
//! asks to stop or the actor is shut down. It is the clock behind every
//! animated reveal.

use std::io;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A tick event passed to the callback.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Frame number (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Ticker actor that drives a callback at regular intervals.
pub struct TickerActor {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl TickerActor {
    /// Spawn a new ticker thread.
    ///
    /// # Arguments
    ///
    /// * `name` - Thread name.
    /// * `interval` - Time between ticks (e.g., 15ms for a typing effect).
    /// * `on_tick` - Called once per tick; returning `Break` ends the thread.
    ///
    /// The first tick fires one `interval` after spawning.
    pub fn spawn<F>(name: &str, interval: Duration, on_tick: F) -> io::Result<Self>
    where
        F: FnMut(Tick) -> ControlFlow<()> + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                Self::run_loop(&shutdown_clone, interval, on_tick);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the ticker to shutdown.
    ///
    /// A tick already in progress still completes; use [`join`](Self::join)
    /// to wait for it.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Check if the ticker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop the ticker and wait for the thread to finish.
    ///
    /// No callback runs after this returns.
    pub fn join(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            // Joining from inside the callback would deadlock
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }

    /// Main ticker loop.
    fn run_loop<F>(shutdown: &AtomicBool, interval: Duration, mut on_tick: F)
    where
        F: FnMut(Tick) -> ControlFlow<()>,
    {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut next_tick = start + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                let tick = Tick {
                    frame,
                    elapsed: now - start,
                };

                if on_tick(tick).is_break() {
                    break;
                }

                frame += 1;
                next_tick += interval;

                // Handle case where we're behind (catch up without bursting)
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                // Sleep until next tick
                let sleep_duration = next_tick - now;
                thread::sleep(sleep_duration.min(Duration::from_millis(1)));
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
