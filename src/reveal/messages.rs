//! Message types emitted by reveal runs.
//!
//! These types form the protocol between a run and whoever displays
//! its output, whether on the same thread or across a channel.

use std::fmt;

/// Identifies one reveal run. Callers usually reuse their message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The whole text was revealed.
    Completed,
    /// Cancellation was observed before the end of the text.
    Stopped,
}

/// Output of a reveal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// The displayed prefix grew.
    Prefix {
        /// Run that produced the prefix.
        run: RunId,
        /// The new displayed prefix.
        text: String,
    },

    /// The run finished. Sent exactly once per run.
    Finished {
        /// Run that finished.
        run: RunId,
        /// How it ended.
        outcome: Outcome,
    },
}

impl RevealEvent {
    /// The run this event belongs to.
    pub const fn run(&self) -> RunId {
        match self {
            Self::Prefix { run, .. } | Self::Finished { run, .. } => *run,
        }
    }

    /// Replay this event into a sink.
    pub fn deliver<S: super::RevealSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Self::Prefix { run, text } => sink.prefix(*run, text),
            Self::Finished { run, outcome } => sink.finished(*run, *outcome),
        }
    }
}
