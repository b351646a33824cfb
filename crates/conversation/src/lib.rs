//! # Conversation Session
//!
//! Ordered, in-memory log of user and assistant turns. [`ConversationSession::build_context`]
//! renders the trailing window that is injected into the system prompt.

use shop_core::ConversationMessage;
use std::collections::VecDeque;
use tracing::debug;

/// Number of trailing entries rendered by [`ConversationSession::build_context`].
pub const CONTEXT_WINDOW: usize = 6;

/// Logs of this size or smaller produce no context.
const MIN_ENTRIES_FOR_CONTEXT: usize = 2;

/// Append-only conversation log. Unbounded unless a retention cap is set.
#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    messages: VecDeque<ConversationMessage>,
    max_messages: Option<usize>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the retention cap. `None` (or `Some(0)`) keeps everything.
    pub fn with_max_messages(mut self, max_messages: Option<usize>) -> Self {
        self.max_messages = max_messages.filter(|max| *max > 0);
        self.enforce_cap();
        self
    }

    pub fn max_messages(&self) -> Option<usize> {
        self.max_messages
    }

    pub fn append(&mut self, message: ConversationMessage) {
        self.messages.push_back(message);
        self.enforce_cap();
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.append(ConversationMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.append(ConversationMessage::assistant(content));
    }

    /// The last [`CONTEXT_WINDOW`] entries as `"{Role}: {content}"` lines joined by `\n`.
    /// Empty while the log holds two entries or fewer.
    pub fn build_context(&self) -> String {
        if self.messages.len() <= MIN_ENTRIES_FOR_CONTEXT {
            return String::new();
        }
        let skip = self.messages.len().saturating_sub(CONTEXT_WINDOW);
        self.messages
            .iter()
            .skip(skip)
            .map(ConversationMessage::to_context_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear(&mut self) {
        debug!(cleared = self.messages.len(), "Conversation history cleared");
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Snapshot of the log, oldest first.
    pub fn history(&self) -> Vec<ConversationMessage> {
        self.messages.iter().cloned().collect()
    }

    fn enforce_cap(&mut self) {
        if let Some(max) = self.max_messages {
            while self.messages.len() > max {
                self.messages.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::ConversationRole;

    fn session_with(n: usize) -> ConversationSession {
        let mut session = ConversationSession::new();
        for i in 0..n {
            if i % 2 == 0 {
                session.push_user(format!("u{i}"));
            } else {
                session.push_assistant(format!("a{i}"));
            }
        }
        session
    }

    #[test]
    fn test_context_empty_for_short_logs() {
        for n in 0..=2 {
            assert_eq!(session_with(n).build_context(), "", "n = {n}");
        }
    }

    #[test]
    fn test_context_includes_all_when_under_window() {
        assert_eq!(session_with(3).build_context(), "User: u0\nAssistant: a1\nUser: u2");
    }

    #[test]
    fn test_context_is_last_six_in_order() {
        let context = session_with(9).build_context();

        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Assistant: a3",
                "User: u4",
                "Assistant: a5",
                "User: u6",
                "Assistant: a7",
                "User: u8",
            ]
        );
    }

    #[test]
    fn test_unbounded_by_default() {
        let session = session_with(50);

        assert_eq!(session.len(), 50);
        assert_eq!(session.max_messages(), None);
    }

    #[test]
    fn test_retention_cap_drops_oldest() {
        let mut session = ConversationSession::new().with_max_messages(Some(4));
        for i in 0..6 {
            session.push_user(format!("m{i}"));
        }

        let history = session.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].content, "m2");
        assert_eq!(history[3].content, "m5");
    }

    #[test]
    fn test_zero_cap_means_unbounded() {
        let session = ConversationSession::new().with_max_messages(Some(0));

        assert_eq!(session.max_messages(), None);
    }

    #[test]
    fn test_clear() {
        let mut session = session_with(3);

        session.clear();

        assert!(session.is_empty());
        assert_eq!(session.build_context(), "");
    }

    #[test]
    fn test_history_roles() {
        let history = session_with(2).history();

        assert_eq!(history[0].role, ConversationRole::User);
        assert_eq!(history[1].role, ConversationRole::Assistant);
    }
}
