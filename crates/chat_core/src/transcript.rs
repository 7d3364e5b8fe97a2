/// Greeting seeded as the first bot entry of every transcript.
pub const GREETING: &str =
    "Ahlan beek fy ChatGPT El Ghalaba! Es2alny ay so2al aw esbaat file ala5asholak.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One displayed transcript entry. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
    timestamp: String,
}

impl Message {
    pub fn user(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self::new(Sender::User, text, timestamp)
    }

    pub fn bot(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text, timestamp)
    }

    fn new(sender: Sender, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Append-only conversation log. Index order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// A transcript holding only the bot greeting.
    pub fn seeded(timestamp: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::bot(GREETING, timestamp)],
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the greeting is never removed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
