//! Chat widgets: The message list and its waiting indicator.
//!
//! These are the collaborators that sit between a chat backend and the
//! reveal engine. They hold no rendering code; a frontend reads
//! [`Message::displayed`] and [`Transcript::thinking_status`] each frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use typewheel::{RevealDriver, Transcript};
//!
//! let mut driver = RevealDriver::new()?;
//! let mut transcript = Transcript::new();
//!
//! transcript.submit("What is the Central Limit Theorem?");
//! transcript.receive_answer(Some("The mean $\\bar{X}$ tends to normal..."));
//! transcript.sync(&mut driver)?;
//!
//! while let Some(event) = driver.wait_event(timeout) {
//!     transcript.apply(&event);
//! }
//! ```

mod thinking;
mod transcript;

pub use thinking::{ThinkingIndicator, DEFAULT_STAGES};
pub use transcript::{Message, RevealState, Role, Transcript, CONNECTION_ERROR, FALLBACK_ANSWER};
