//! Sink trait and the in-process sinks.
//!
//! A sink receives the prefix stream of a run and its single completion
//! event. The run owns its sink, so whoever subscribed to the run is the
//! only one that hears about its completion.

use super::messages::{Outcome, RevealEvent, RunId};
use crossbeam_channel::Sender;

/// Receiver of a run's output.
pub trait RevealSink {
    /// The displayed prefix grew to `prefix`.
    fn prefix(&mut self, run: RunId, prefix: &str);

    /// The run finished. Called exactly once per run.
    fn finished(&mut self, run: RunId, outcome: Outcome);
}

impl<S: RevealSink + ?Sized> RevealSink for &mut S {
    fn prefix(&mut self, run: RunId, prefix: &str) {
        (**self).prefix(run, prefix);
    }

    fn finished(&mut self, run: RunId, outcome: Outcome) {
        (**self).finished(run, outcome);
    }
}

impl<S: RevealSink + ?Sized> RevealSink for Box<S> {
    fn prefix(&mut self, run: RunId, prefix: &str) {
        (**self).prefix(run, prefix);
    }

    fn finished(&mut self, run: RunId, outcome: Outcome) {
        (**self).finished(run, outcome);
    }
}

/// Forwards events over a channel. A dropped receiver is not an error.
impl RevealSink for Sender<RevealEvent> {
    fn prefix(&mut self, run: RunId, prefix: &str) {
        let _ = self.send(RevealEvent::Prefix {
            run,
            text: prefix.to_string(),
        });
    }

    fn finished(&mut self, run: RunId, outcome: Outcome) {
        let _ = self.send(RevealEvent::Finished { run, outcome });
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RevealSink for NullSink {
    fn prefix(&mut self, _run: RunId, _prefix: &str) {}

    fn finished(&mut self, _run: RunId, _outcome: Outcome) {}
}

/// Records every event in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Vec<RevealEvent>,
}

impl Recorder {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// All recorded events.
    pub fn events(&self) -> &[RevealEvent] {
        &self.events
    }

    /// The recorded prefixes, in order.
    pub fn prefixes(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RevealEvent::Prefix { text, .. } => Some(text.as_str()),
                RevealEvent::Finished { .. } => None,
            })
            .collect()
    }

    /// The recorded outcomes, in order.
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RevealEvent::Finished { outcome, .. } => Some(*outcome),
                RevealEvent::Prefix { .. } => None,
            })
            .collect()
    }

    /// The most recent prefix, if any.
    pub fn last_prefix(&self) -> Option<&str> {
        self.prefixes().last().copied()
    }

    /// Forget all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RevealSink for Recorder {
    fn prefix(&mut self, run: RunId, prefix: &str) {
        self.events.push(RevealEvent::Prefix {
            run,
            text: prefix.to_string(),
        });
    }

    fn finished(&mut self, run: RunId, outcome: Outcome) {
        self.events.push(RevealEvent::Finished { run, outcome });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_recorder() {
        let mut recorder = Recorder::new();
        recorder.prefix(RunId(1), "a");
        recorder.prefix(RunId(1), "ab");
        recorder.finished(RunId(1), Outcome::Completed);

        assert_eq!(recorder.prefixes(), vec!["a", "ab"]);
        assert_eq!(recorder.outcomes(), vec![Outcome::Completed]);
        assert_eq!(recorder.last_prefix(), Some("ab"));

        recorder.clear();
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_channel_sink() {
        let (mut tx, rx) = unbounded::<RevealEvent>();
        tx.prefix(RunId(2), "x");
        tx.finished(RunId(2), Outcome::Stopped);

        assert_eq!(
            rx.try_recv().unwrap(),
            RevealEvent::Prefix { run: RunId(2), text: "x".into() }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            RevealEvent::Finished { run: RunId(2), outcome: Outcome::Stopped }
        );
    }

    #[test]
    fn test_channel_sink_ignores_dropped_receiver() {
        let (mut tx, rx) = unbounded::<RevealEvent>();
        drop(rx);
        tx.prefix(RunId(3), "still fine");
    }

    #[test]
    fn test_forwarding_through_mut_ref() {
        fn feed<S: RevealSink>(mut sink: S) {
            sink.prefix(RunId(4), "z");
        }

        let mut recorder = Recorder::new();
        feed(&mut recorder);
        feed(Box::new(&mut recorder));
        assert_eq!(recorder.prefixes(), vec!["z", "z"]);
    }
}
