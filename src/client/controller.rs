//! Drives one conversation: owns the transcript, guards against overlapping
//! relay calls and turns relay outcomes into bot turns.
//!
//! A submission is split in two so a UI can keep handling input while the
//! relay call is outstanding: [`ChatController::begin_submit`] records the
//! user turn and hands back the request to send, and
//! [`ChatController::finish_submit`] applies whatever came back.
//! [`ChatController::submit`] does both around a single awaited call.

use super::transcript::Transcript;
use super::{ RelayClient, SubmissionError };
use crate::models::chat::{ ChatRequest, ChatResponse, ChatTurn };
use log::{ error, info };
use std::sync::Arc;

/// Bot text shown when a relay call fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// A relay call that has been started but not yet applied.
#[derive(Debug)]
pub struct PendingSubmission {
    epoch: u64,
    request: ChatRequest,
}

impl PendingSubmission {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

pub struct ChatController {
    client: Arc<dyn RelayClient>,
    transcript: Transcript,
    loading: bool,
    epoch: u64,
    discard_stale: bool,
}

impl ChatController {
    pub fn new(client: Arc<dyn RelayClient>) -> Self {
        Self {
            client,
            transcript: Transcript::new(),
            loading: false,
            epoch: 0,
            discard_stale: false,
        }
    }

    /// When set, a reply for a conversation that has since been reset is
    /// dropped instead of being appended to the new conversation.
    pub fn discard_stale_replies(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    pub fn client(&self) -> Arc<dyn RelayClient> {
        Arc::clone(&self.client)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Records the user turn and returns the request to send, or `None` when
    /// `text` is blank or another call is still outstanding.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingSubmission> {
        if text.trim().is_empty() || self.loading {
            return None;
        }

        let chat_history = self.transcript.flattened_history();
        self.transcript.push(ChatTurn::user(text));
        self.loading = true;

        Some(PendingSubmission {
            epoch: self.epoch,
            request: ChatRequest {
                message: text.to_string(),
                chat_history,
            },
        })
    }

    /// Applies the outcome of a relay call and clears the loading state.
    /// Returns the bot turn that was appended, if any.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<ChatResponse, SubmissionError>
    ) -> Option<&ChatTurn> {
        self.loading = false;

        if self.discard_stale && pending.epoch != self.epoch {
            info!("Discarding reply for a conversation that was reset");
            return None;
        }

        let turn = match outcome {
            Ok(reply) => ChatTurn::bot(reply.response),
            Err(e) => {
                error!("Relay call failed: {}", e);
                ChatTurn::bot(FALLBACK_REPLY)
            }
        };
        self.transcript.push(turn);
        self.transcript.last()
    }

    /// Full submit cycle. Returns `false` if nothing was sent.
    pub async fn submit(&mut self, text: &str) -> bool {
        let Some(pending) = self.begin_submit(text) else {
            return false;
        };
        let outcome = self.client.send(pending.request().clone()).await;
        self.finish_submit(pending, outcome);
        true
    }

    /// Starts a new conversation. An outstanding call is left running.
    pub fn reset_conversation(&mut self) {
        self.transcript.reset();
        self.epoch += 1;
    }
}
