//! Terminal output for reveals.

mod output;

pub use output::{TerminalConfig, TerminalSink};
