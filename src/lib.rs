//! # Typewheel
//!
//! A delimiter-aware typewriter reveal engine for chat answers.
//!
//! Typewheel takes an answer that has already arrived in full and shows
//! it as if it were being typed, without ever splitting a `$...$` or
//! `$$...$$` math span across frames. Markup renderers downstream only
//! ever see whole expressions.
//!
//! ## Core Concepts
//!
//! - **Reveal runs**: One explicit, cancellable run per message, owning its cursor and sink
//! - **Atomic math spans**: A delimited span is revealed in a single tick
//! - **Actor model**: An optional ticker thread drives runs for hosts without an event loop
//! - **Optimistic append**: The terminal sink writes only the newly revealed suffix
//!
//! ## Example
//!
//! ```rust,ignore
//! use typewheel::{RevealDriver, RunId, RevealEvent};
//!
//! let mut driver = RevealDriver::new()?;
//! driver.start(RunId(1), "The mean is $\\mu$.", false)?;
//!
//! while let Some(event) = driver.wait_event(timeout) {
//!     match event {
//!         RevealEvent::Prefix { text, .. } => redraw(&text),
//!         RevealEvent::Finished { outcome, .. } => break,
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod error;
pub mod ffi;
pub mod reveal;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use actor::{Animator, RevealDriver, TickerActor};
pub use config::RevealConfig;
pub use error::{Result, RevealError};
pub use reveal::{CancelToken, Outcome, RevealEvent, RevealRun, RevealSink, RunId, TickStatus};
pub use terminal::{TerminalConfig, TerminalSink};
pub use widget::{Message, Role, ThinkingIndicator, Transcript};
