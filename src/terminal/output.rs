//! `TerminalSink`: Optimistic append of revealed text to a terminal.
//!
//! Prefixes only ever grow, so each update writes just the newly
//! revealed suffix. Escape sequences and text for one update are
//! queued into a scratch buffer and flushed in a single `write()`.

use crate::reveal::{Outcome, RevealSink, RunId};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};
use tracing::warn;

/// Configuration for the terminal sink.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Foreground color for revealed text (`None` keeps the terminal default).
    pub answer_color: Option<Color>,
    /// Text appended when a run is stopped early.
    pub stopped_marker: String,
    /// Color of the stopped marker.
    pub marker_color: Color,
    /// Line ending written when a run finishes.
    pub line_ending: &'static str,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            answer_color: Some(Color::Rgb {
                r: 200,
                g: 200,
                b: 200,
            }),
            stopped_marker: " [stopped]".to_string(),
            marker_color: Color::Rgb {
                r: 150,
                g: 150,
                b: 150,
            },
            // Raw mode terminals need an explicit carriage return
            line_ending: "\r\n",
        }
    }
}

/// Writes a reveal to a terminal as it grows.
pub struct TerminalSink<W: Write> {
    writer: W,
    config: TerminalConfig,
    /// Run currently being written.
    run: Option<RunId>,
    /// Bytes of the current run's prefix already on screen.
    written: usize,
    /// Scratch buffer for one update.
    output: Vec<u8>,
}

impl<W: Write> TerminalSink<W> {
    /// Create a sink with default configuration.
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, TerminalConfig::default())
    }

    /// Create a sink with custom configuration.
    pub fn with_config(writer: W, config: TerminalConfig) -> Self {
        Self {
            writer,
            config,
            run: None,
            written: 0,
            output: Vec::with_capacity(256),
        }
    }

    /// Bytes of the current run already written.
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Get a reference to the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_delta(&mut self, delta: &str) -> io::Result<()> {
        self.output.clear();
        if let Some(color) = self.config.answer_color {
            queue!(self.output, SetForegroundColor(color))?;
        }
        queue!(self.output, Print(delta), ResetColor)?;
        self.flush_output()
    }

    fn write_finish(&mut self, outcome: Outcome) -> io::Result<()> {
        self.output.clear();
        if outcome == Outcome::Stopped && !self.config.stopped_marker.is_empty() {
            queue!(
                self.output,
                SetForegroundColor(self.config.marker_color),
                Print(&self.config.stopped_marker),
                ResetColor
            )?;
        }
        queue!(self.output, Print(self.config.line_ending))?;
        self.flush_output()
    }

    fn flush_output(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.output)?;
        self.writer.flush()
    }
}

impl<W: Write> RevealSink for TerminalSink<W> {
    fn prefix(&mut self, run: RunId, prefix: &str) {
        if self.run != Some(run) {
            self.run = Some(run);
            self.written = 0;
        }

        let Some(delta) = prefix.get(self.written..) else {
            warn!(%run, written = self.written, len = prefix.len(), "prefix shrank; ignoring update");
            return;
        };
        if delta.is_empty() {
            return;
        }

        match self.write_delta(delta) {
            Ok(()) => self.written = prefix.len(),
            Err(error) => warn!(%run, %error, "terminal write failed"),
        }
    }

    fn finished(&mut self, run: RunId, outcome: Outcome) {
        if let Err(error) = self.write_finish(outcome) {
            warn!(%run, %error, "terminal write failed");
        }
        self.run = None;
        self.written = 0;
    }
}
