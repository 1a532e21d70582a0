//! Thinking indicator: Status line shown while waiting for an answer.

use std::time::Duration;

/// Pipeline stages shown while the backend works.
pub const DEFAULT_STAGES: [&str; 5] = [
    "Analyzing your intent...",
    "Searching Walpole textbook...",
    "Reading relevant sections...",
    "Synthesizing answer...",
    "Finalizing formatting...",
];

/// Cycles through stages at a fixed period and holds on the last one.
///
/// The indicator is a pure function of elapsed time, so it needs no
/// timer of its own; callers pass in how long they have been waiting.
#[derive(Debug, Clone)]
pub struct ThinkingIndicator {
    stages: Vec<String>,
    period: Duration,
}

impl Default for ThinkingIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_STAGES, Duration::from_millis(1500))
    }
}

impl ThinkingIndicator {
    /// Create an indicator over `stages`, advancing every `period`.
    pub fn new<I, S>(stages: I, period: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stages: stages.into_iter().map(Into::into).collect(),
            period,
        }
    }

    /// Index of the stage shown after `elapsed`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn stage_index(&self, elapsed: Duration) -> usize {
        let last = self.stages.len().saturating_sub(1);
        if self.period.is_zero() {
            return last;
        }
        let steps = (elapsed.as_nanos() / self.period.as_nanos()) as usize;
        steps.min(last)
    }

    /// The stage shown after `elapsed`, or `None` if there are no stages.
    pub fn stage(&self, elapsed: Duration) -> Option<&str> {
        self.stages.get(self.stage_index(elapsed)).map(String::as_str)
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if there are no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
