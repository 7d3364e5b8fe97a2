use crate::{Sender, Transcript};

/// Leading system turn of every ask request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that remembers the conversation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Role::User,
            Sender::Bot => Role::Assistant,
        }
    }
}

/// One role-tagged unit of the outbound history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Builds the full ask payload: system turn, one turn per transcript entry,
/// then `pending_input` as the trailing user turn.
///
/// `transcript` must be the state before the pending input is echoed, so the
/// new text appears exactly once.
pub fn build_chat_request(transcript: &Transcript, pending_input: &str) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(transcript.len() + 2);
    turns.push(ChatTurn::new(Role::System, SYSTEM_PROMPT));
    turns.extend(
        transcript
            .messages()
            .iter()
            .map(|message| ChatTurn::new(message.sender().into(), message.text())),
    );
    turns.push(ChatTurn::new(Role::User, pending_input));
    turns
}
