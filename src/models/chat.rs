use serde::{ Serialize, Deserialize, Deserializer };

/// Body of `POST /api/chat`, forwarded to the backend unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chat_history: Vec<String>,
}

/// `null` history is treated the same as a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where D: Deserializer<'de>
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The part of a backend reply the client consumes. Any other fields the
/// backend sends are ignored here but still passed through by the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Role label used when flattening turns into `chat_history` entries.
    pub fn role(&self) -> &'static str {
        match self {
            Sender::User => "User",
            Sender::Bot => "Assistant",
        }
    }
}

/// One immutable message in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    sender: Sender,
    text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into() }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { sender: Sender::Bot, text: text.into() }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `"<Role>: <text>"`, the form the backend expects in `chat_history`.
    pub fn to_history_entry(&self) -> String {
        format!("{}: {}", self.sender.role(), self.text)
    }
}
