//! Transcript: The chat message list that feeds reveal runs.
//!
//! The transcript decides which message gets animated and tracks what
//! each message currently displays. Only the most recent message
//! animates; older pending messages and messages loaded from history
//! are revealed in one step. Input is re-enabled only when the most
//! recent message finishes.

use super::thinking::ThinkingIndicator;
use crate::actor::RevealDriver;
use crate::error::Result;
use crate::reveal::{Outcome, RevealEvent, RunId};
use std::time::Instant;
use tracing::debug;

/// Shown when the backend answers with nothing.
pub const FALLBACK_ANSWER: &str = "Sorry, I didn’t get that.";

/// Shown when the backend could not be reached.
pub const CONNECTION_ERROR: &str =
    "There was an error connecting to the server. Please try again later.";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The person asking.
    User,
    /// The answering backend.
    Assistant,
}

/// Reveal progress of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Waiting for a run to be started.
    Pending,
    /// A run is revealing the message.
    Revealing,
    /// The message is final.
    Done(Outcome),
}

/// One chat message.
#[derive(Debug, Clone)]
pub struct Message {
    id: RunId,
    role: Role,
    content: String,
    displayed: String,
    from_history: bool,
    state: RevealState,
}

impl Message {
    /// Message id, also used as its run id.
    pub const fn id(&self) -> RunId {
        self.id
    }

    /// Author.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Full content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The text currently displayed.
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// Whether the message was loaded from history.
    pub const fn is_from_history(&self) -> bool {
        self.from_history
    }

    /// Reveal progress.
    pub const fn state(&self) -> RevealState {
        self.state
    }

    const fn is_settled(&self) -> bool {
        matches!(self.state, RevealState::Done(_))
    }
}

/// The chat message list.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
    /// Set while a question has been sent and no answer has arrived.
    awaiting_since: Option<Instant>,
    thinking: ThinkingIndicator,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom thinking indicator.
    #[must_use]
    pub fn with_thinking(mut self, thinking: ThinkingIndicator) -> Self {
        self.thinking = thinking;
        self
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Look up a message by id.
    pub fn message(&self, id: RunId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    /// The most recent message.
    pub fn latest(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if there are no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether a question is waiting for its answer.
    pub const fn is_awaiting_answer(&self) -> bool {
        self.awaiting_since.is_some()
    }

    /// Whether the user may send a new question.
    pub fn input_enabled(&self) -> bool {
        self.awaiting_since.is_none() && self.latest().map_or(true, Message::is_settled)
    }

    /// Status line while waiting for an answer.
    pub fn thinking_status(&self, now: Instant) -> Option<&str> {
        let since = self.awaiting_since?;
        self.thinking.stage(now.saturating_duration_since(since))
    }

    /// Send a question. Blank queries and queries sent while input is
    /// disabled are ignored.
    pub fn submit(&mut self, query: &str) -> Option<RunId> {
        if query.trim().is_empty() || !self.input_enabled() {
            return None;
        }
        let id = self.push(Role::User, query.to_string(), false);
        self.awaiting_since = Some(Instant::now());
        Some(id)
    }

    /// Record the backend's answer. An empty answer becomes [`FALLBACK_ANSWER`].
    pub fn receive_answer(&mut self, answer: Option<&str>) -> RunId {
        let content = answer
            .filter(|answer| !answer.trim().is_empty())
            .unwrap_or(FALLBACK_ANSWER);
        self.awaiting_since = None;
        self.push(Role::Assistant, content.to_string(), false)
    }

    /// Record a failed backend call.
    pub fn receive_error(&mut self) -> RunId {
        self.awaiting_since = None;
        self.push(Role::Assistant, CONNECTION_ERROR.to_string(), false)
    }

    /// Append previously stored messages. Their answers are not animated.
    pub fn load_history<I, S>(&mut self, history: I)
    where
        I: IntoIterator<Item = (Role, S)>,
        S: Into<String>,
    {
        for (role, content) in history {
            self.push(role, content.into(), true);
        }
    }

    /// Start runs for pending messages.
    ///
    /// Only the most recent message animates. Starting a run replaces
    /// the driver's previous run, so a message still being animated is
    /// marked as stopped first. Skipped runs finish inside `start`, and
    /// their events are picked up by [`apply`](Self::apply) as usual.
    pub fn sync(&mut self, driver: &mut RevealDriver) -> Result<()> {
        let latest = self.latest().map(Message::id);
        let pending: Vec<usize> = self
            .messages
            .iter()
            .enumerate()
            .filter(|(_, message)| message.state == RevealState::Pending)
            .map(|(index, _)| index)
            .collect();

        for index in pending {
            if let Some(active) = driver.active_run() {
                if let Some(message) = self
                    .messages
                    .iter_mut()
                    .find(|message| message.id == active && message.state == RevealState::Revealing)
                {
                    debug!(run = %active, "reveal interrupted by newer message");
                    message.state = RevealState::Done(Outcome::Stopped);
                }
            }

            let message = &mut self.messages[index];
            let skip = message.from_history || Some(message.id) != latest;
            driver.start(message.id, message.content.clone(), skip)?;
            message.state = RevealState::Revealing;
        }
        Ok(())
    }

    /// Apply a run event. Returns `true` if a message changed.
    ///
    /// Events for messages that are not revealing are ignored.
    pub fn apply(&mut self, event: &RevealEvent) -> bool {
        let Some(message) = self
            .messages
            .iter_mut()
            .find(|message| message.id == event.run())
        else {
            return false;
        };
        if message.state != RevealState::Revealing {
            return false;
        }

        match event {
            RevealEvent::Prefix { text, .. } => message.displayed.clone_from(text),
            RevealEvent::Finished { outcome, .. } => message.state = RevealState::Done(*outcome),
        }
        true
    }

    /// Apply every pending driver event. Returns how many changed a message.
    pub fn apply_pending(&mut self, driver: &RevealDriver) -> usize {
        driver
            .drain_events()
            .iter()
            .filter(|event| self.apply(event))
            .count()
    }

    /// The "stop generating" action.
    pub fn stop_generating(&self, driver: &RevealDriver) {
        if self.latest().is_some_and(|message| message.state == RevealState::Revealing) {
            driver.stop();
        }
    }

    fn push(&mut self, role: Role, content: String, from_history: bool) -> RunId {
        self.next_id += 1;
        let id = RunId(self.next_id);
        let (displayed, state) = match role {
            Role::User => (content.clone(), RevealState::Done(Outcome::Completed)),
            Role::Assistant => (String::new(), RevealState::Pending),
        };
        self.messages.push(Message {
            id,
            role,
            content,
            displayed,
            from_history,
            state,
        });
        id
    }
}
