use crate::models::chat::ChatTurn;

/// First turn of every conversation.
pub const GREETING: &str = "Hi! I'm Vytal, how can I help you?";

/// Ordered, append-only list of turns. Always starts with the greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { turns: vec![ChatTurn::bot(GREETING)] }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// Every turn as `"<Role>: <text>"`, in conversation order.
    pub fn flattened_history(&self) -> Vec<String> {
        self.turns.iter().map(ChatTurn::to_history_entry).collect()
    }

    /// Drops the whole conversation and starts over from the greeting.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.turns.push(ChatTurn::bot(GREETING));
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
