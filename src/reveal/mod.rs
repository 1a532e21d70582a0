//! Reveal Engine: Delimiter-aware typewriter reveal.
//!
//! A run turns a complete source text into a growing prefix, one step
//! per tick. Ordinary text advances a few graphemes at a time; a math
//! span delimited by `$...$` or `$$...$$` appears whole in a single tick,
//! so a markup renderer downstream never sees half an expression.
//!
//! # Example
//!
//! ```rust
//! use typewheel::reveal::{CancelToken, Recorder, RevealRun, RunId};
//! use typewheel::RevealConfig;
//!
//! let mut run = RevealRun::new(
//!     RunId(1),
//!     "a $x+y$ b",
//!     CancelToken::new(),
//!     &RevealConfig::default(),
//!     Recorder::new(),
//! );
//! run.run_to_end();
//! assert_eq!(run.sink().prefixes(), vec!["a", "a ", "a $x+y$", "a $x+y$ b"]);
//! ```

mod cancel;
mod cursor;
mod messages;
mod run;
mod scan;
mod sink;

pub use cancel::CancelToken;
pub use cursor::{RevealCursor, Step};
pub use messages::{Outcome, RevealEvent, RunId};
pub use run::{RevealRun, TickStatus};
pub use scan::{Delimiter, Units};
pub use sink::{NullSink, Recorder, RevealSink};
