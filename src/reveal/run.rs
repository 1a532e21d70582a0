//! Reveal run: One cancellable reveal of one message.
//!
//! A run owns its cursor, its cancellation token and the sink that
//! receives its output. It does not own a clock: something else calls
//! [`RevealRun::tick`] at a fixed period, either the host's event loop
//! or an [`Animator`](crate::actor::Animator).

use super::cancel::CancelToken;
use super::cursor::{RevealCursor, Step};
use super::messages::{Outcome, RunId};
use super::sink::RevealSink;
use crate::config::RevealConfig;
use tracing::{debug, trace};

/// Result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// The run needs more ticks.
    Pending,
    /// The run has finished.
    Finished(Outcome),
    /// The run was disposed before finishing.
    Disposed,
}

impl TickStatus {
    /// Check if no further ticks are needed.
    pub const fn is_done(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Active,
    Finished(Outcome),
    Disposed,
}

/// One reveal of one source text.
#[derive(Debug)]
pub struct RevealRun<S: RevealSink> {
    id: RunId,
    cursor: RevealCursor,
    cancel: CancelToken,
    skip: bool,
    state: RunState,
    sink: S,
}

impl<S: RevealSink> RevealRun<S> {
    /// Create a run at cursor 0.
    pub fn new(
        id: RunId,
        text: impl Into<String>,
        cancel: CancelToken,
        config: &RevealConfig,
        sink: S,
    ) -> Self {
        let cursor = RevealCursor::new(text, config);
        debug!(run = %id, units = cursor.len(), "reveal run created");
        Self {
            id,
            cursor,
            cancel,
            skip: false,
            state: RunState::Active,
            sink,
        }
    }

    /// Skip the animation for text loaded from history.
    ///
    /// The first tick then emits the full text and completes. Skipped
    /// runs ignore cancellation since there is nothing left to stop.
    #[must_use]
    pub fn skip_animation(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Run identity.
    #[inline]
    pub const fn id(&self) -> RunId {
        self.id
    }

    /// The displayed prefix.
    #[inline]
    pub fn prefix(&self) -> &str {
        self.cursor.prefix()
    }

    /// The full source text.
    #[inline]
    pub fn text(&self) -> &str {
        self.cursor.text()
    }

    /// Cursor position in units.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor.position()
    }

    /// Source length in units.
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    /// Check if the source text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// Whether a math span has been revealed yet.
    #[inline]
    pub const fn in_math_mode(&self) -> bool {
        self.cursor.in_math_mode()
    }

    /// Whether this run skips animation.
    #[inline]
    pub const fn is_skipping(&self) -> bool {
        self.skip
    }

    /// The cancellation token this run polls.
    #[inline]
    pub const fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// The outcome, once finished.
    pub const fn outcome(&self) -> Option<Outcome> {
        match self.state {
            RunState::Finished(outcome) => Some(outcome),
            RunState::Active | RunState::Disposed => None,
        }
    }

    /// Check if the run needs no more ticks.
    pub const fn is_finished(&self) -> bool {
        !matches!(self.state, RunState::Active)
    }

    /// The sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the run and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Execute one tick.
    ///
    /// Ticking a finished run reports its outcome again without
    /// notifying the sink a second time. Skipped runs and empty text
    /// emit the full text once and complete on the first tick.
    pub fn tick(&mut self) -> TickStatus {
        match self.state {
            RunState::Active => {}
            RunState::Finished(outcome) => return TickStatus::Finished(outcome),
            RunState::Disposed => return TickStatus::Disposed,
        }

        if self.skip || self.cursor.is_empty() {
            self.cursor.reveal_all();
            self.sink.prefix(self.id, self.cursor.prefix());
            return self.finish(Outcome::Completed);
        }

        if self.cancel.is_cancelled() {
            return self.finish(Outcome::Stopped);
        }

        let Some(step) = self.cursor.advance() else {
            return self.finish(Outcome::Completed);
        };
        if let Step::MathSpan { from, to, delimiter } = step {
            trace!(run = %self.id, from, to, ?delimiter, "math span revealed");
        }
        self.sink.prefix(self.id, self.cursor.prefix());
        TickStatus::Pending
    }

    /// Tick until the run finishes, without any delay between ticks.
    ///
    /// Returns `None` if the run was disposed.
    pub fn run_to_end(&mut self) -> Option<Outcome> {
        loop {
            match self.tick() {
                TickStatus::Pending => {}
                TickStatus::Finished(outcome) => return Some(outcome),
                TickStatus::Disposed => return None,
            }
        }
    }

    /// Tear the run down early. The sink is not notified.
    ///
    /// Disposing a finished run has no effect.
    pub fn dispose(&mut self) {
        if self.state == RunState::Active {
            debug!(run = %self.id, revealed = self.cursor.position(), "reveal run disposed");
            self.state = RunState::Disposed;
        }
    }

    fn finish(&mut self, outcome: Outcome) -> TickStatus {
        self.state = RunState::Finished(outcome);
        debug!(
            run = %self.id,
            ?outcome,
            revealed = self.cursor.position(),
            total = self.cursor.len(),
            "reveal run finished"
        );
        self.sink.finished(self.id, outcome);
        TickStatus::Finished(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::{Recorder, RevealEvent};

    fn run(text: &str) -> RevealRun<Recorder> {
        RevealRun::new(
            RunId(1),
            text,
            CancelToken::new(),
            &RevealConfig::default(),
            Recorder::new(),
        )
    }

    #[test]
    fn test_run_completes_with_every_prefix() {
        let mut run = run("hi $x$!");
        assert_eq!(run.run_to_end(), Some(Outcome::Completed));

        let recorder = run.sink();
        assert_eq!(recorder.prefixes(), vec!["h", "hi", "hi ", "hi $x$", "hi $x$!"]);
        assert_eq!(recorder.outcomes(), vec![Outcome::Completed]);
        assert!(run.in_math_mode());
    }

    #[test]
    fn test_completion_fires_on_the_tick_after_the_end() {
        let mut run = run("ab");
        assert_eq!(run.tick(), TickStatus::Pending);
        assert_eq!(run.tick(), TickStatus::Pending);
        assert_eq!(run.prefix(), "ab");
        assert_eq!(run.tick(), TickStatus::Finished(Outcome::Completed));
    }

    #[test]
    fn test_cancel_freezes_prefix_and_reports_stopped_once() {
        let cancel = CancelToken::new();
        let mut run = RevealRun::new(
            RunId(9),
            "abcdef",
            cancel.clone(),
            &RevealConfig::default(),
            Recorder::new(),
        );
        run.tick();
        run.tick();
        cancel.cancel();

        assert_eq!(run.tick(), TickStatus::Finished(Outcome::Stopped));
        assert_eq!(run.tick(), TickStatus::Finished(Outcome::Stopped));
        assert_eq!(run.prefix(), "ab");
        assert_eq!(run.outcome(), Some(Outcome::Stopped));

        let recorder = run.into_sink();
        assert_eq!(recorder.prefixes(), vec!["a", "ab"]);
        assert_eq!(recorder.outcomes(), vec![Outcome::Stopped]);
    }

    #[test]
    fn test_cancel_after_completion_has_no_effect() {
        let cancel = CancelToken::new();
        let mut run = RevealRun::new(
            RunId(2),
            "ok",
            cancel.clone(),
            &RevealConfig::default(),
            Recorder::new(),
        );
        assert_eq!(run.run_to_end(), Some(Outcome::Completed));
        cancel.cancel();
        assert_eq!(run.tick(), TickStatus::Finished(Outcome::Completed));
        assert_eq!(run.sink().outcomes(), vec![Outcome::Completed]);
    }

    #[test]
    fn test_skip_emits_single_full_update() {
        let mut run = run("loaded $from$ history").skip_animation(true);
        assert!(run.is_skipping());
        assert_eq!(run.tick(), TickStatus::Finished(Outcome::Completed));

        assert_eq!(
            run.sink().events(),
            &[
                RevealEvent::Prefix {
                    run: RunId(1),
                    text: "loaded $from$ history".into()
                },
                RevealEvent::Finished {
                    run: RunId(1),
                    outcome: Outcome::Completed
                },
            ]
        );
    }

    #[test]
    fn test_empty_text_completes_immediately() {
        let mut run = run("");
        assert!(run.is_empty());
        assert_eq!(run.tick(), TickStatus::Finished(Outcome::Completed));
        assert_eq!(run.prefix(), "");
        assert_eq!(
            run.sink().events(),
            &[
                RevealEvent::Prefix { run: RunId(1), text: String::new() },
                RevealEvent::Finished { run: RunId(1), outcome: Outcome::Completed },
            ]
        );
    }

    #[test]
    fn test_empty_text_completes_even_if_cancelled() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut run = RevealRun::new(RunId(4), "", cancel, &RevealConfig::default(), Recorder::new());
        assert_eq!(run.tick(), TickStatus::Finished(Outcome::Completed));
        assert_eq!(run.sink().prefixes(), vec![""]);
    }

    #[test]
    fn test_zero_steps_are_raised_to_one() {
        let config = RevealConfig::default().with_steps(0, 0);
        assert!(config.validate().is_err());

        let mut run = RevealRun::new(RunId(6), "a$x$bc", CancelToken::new(), &config, Recorder::new());
        assert_eq!(run.run_to_end(), Some(Outcome::Completed));
        assert_eq!(run.sink().prefixes(), vec!["a", "a$x$", "a$x$b", "a$x$bc"]);
    }

    #[test]
    fn test_dispose_silences_run() {
        let mut run = run("abc");
        run.tick();
        run.dispose();
        assert_eq!(run.tick(), TickStatus::Disposed);
        assert!(run.is_finished());
        assert_eq!(run.outcome(), None);
        assert_eq!(run.run_to_end(), None);
        assert!(run.sink().outcomes().is_empty());
    }

    #[test]
    fn test_dispose_after_finish_keeps_outcome() {
        let mut run = run("a");
        run.run_to_end();
        run.dispose();
        assert_eq!(run.tick(), TickStatus::Finished(Outcome::Completed));
    }

    #[test]
    fn test_tick_status_is_done() {
        assert!(!TickStatus::Pending.is_done());
        assert!(TickStatus::Finished(Outcome::Stopped).is_done());
        assert!(TickStatus::Disposed.is_done());
    }
}
