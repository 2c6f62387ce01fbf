use crate::chat::responder::BotReply;

/// Default text shown in the empty input box. Submitting it verbatim is
/// treated the same as submitting nothing.
pub const PLACEHOLDER_INPUT: &str = "Type your message...";

/// One user message paired with the corresponding reply. Append-only: turns
/// are never mutated or removed individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub user: String,
    pub bot: BotReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// No turns yet; the placeholder greeting is shown.
    Idle,
    /// At least one turn; the transcript is shown.
    Active,
}

/// The signals gathered in one UI update cycle. A single form post normally
/// carries only one of `clear`/`submit`, but when both fire in the same
/// cycle, clear takes precedence.
#[derive(Debug, Clone, Default)]
pub struct EventCycle {
    pub clear: bool,
    pub submit: bool,
    /// Current content of the input field.
    pub input: String,
}

impl EventCycle {
    pub fn submit(input: impl Into<String>) -> Self {
        Self {
            clear: false,
            submit: true,
            input: input.into(),
        }
    }

    pub fn clear() -> Self {
        Self {
            clear: true,
            submit: false,
            input: String::new(),
        }
    }
}

/// Conversation state for one chat session, owned by the caller and threaded
/// through each turn-handling call. Process-lifetime scoped; nothing is
/// persisted.
#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<Turn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn state(&self) -> ChatState {
        if self.turns.is_empty() {
            ChatState::Idle
        } else {
            ChatState::Active
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn push_turn(&mut self, user: impl Into<String>, bot: BotReply) {
        self.turns.push(Turn {
            user: user.into(),
            bot,
        });
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// True when the input should trigger a turn: non-empty after trimming and
/// not the untouched placeholder.
pub fn is_submittable(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && trimmed != PLACEHOLDER_INPUT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = ChatSession::new();
        assert_eq!(session.state(), ChatState::Idle);
        assert!(session.turns().is_empty());
    }

    #[test]
    fn push_turn_activates_session() {
        let mut session = ChatSession::new();
        session.push_turn("Hello", BotReply::Text("Hi there!".into()));
        assert_eq!(session.state(), ChatState::Active);
        assert_eq!(
            session.turns(),
            &[Turn {
                user: "Hello".into(),
                bot: BotReply::Text("Hi there!".into()),
            }]
        );
    }

    #[test]
    fn history_only_grows_until_cleared() {
        let mut session = ChatSession::new();
        for i in 0..3 {
            session.push_turn(format!("q{i}"), BotReply::Text(format!("a{i}")));
            assert_eq!(session.turns().len(), i + 1);
        }
        session.clear();
        assert!(session.turns().is_empty());
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn submittable_rejects_empty_and_placeholder() {
        assert!(is_submittable("Hello"));
        assert!(is_submittable("  Hello  "));
        assert!(!is_submittable(""));
        assert!(!is_submittable("   "));
        assert!(!is_submittable(PLACEHOLDER_INPUT));
    }
}
