//! The append-only chat conversation and its single-request gate.

use std::error::Error as StdError;
use std::fmt;

use tokio_util::sync::CancellationToken;

use crate::api::ChatMessage;
use crate::core::chat::ChatError;
use crate::core::constants::GREETING;
use crate::core::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Input was empty after trimming.
    Empty,
    /// A previous submission has not finished yet.
    Busy,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Empty => f.write_str("Nothing to send."),
            SubmitError::Busy => f.write_str("Still waiting for the previous reply."),
        }
    }
}

impl StdError for SubmitError {}

/// Everything needed to run one request outside the conversation borrow.
pub struct PendingRequest {
    pub api_messages: Vec<ChatMessage>,
    cancel_token: CancellationToken,
}

impl PendingRequest {
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }
}

pub struct Conversation {
    messages: Vec<Message>,
    pending: Option<CancellationToken>,
    last_error: Option<String>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// A conversation seeded with the assistant greeting.
    pub fn new() -> Self {
        Self::with_messages(vec![Message::assistant(GREETING)])
    }

    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            pending: None,
            last_error: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_assistant(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role.is_assistant())
    }

    /// Append the user's input and hand back the request to run.
    ///
    /// The whole conversation, including the greeting, is sent so the model
    /// sees the same transcript the user does.
    pub fn begin_submit(&mut self, input: &str) -> Result<PendingRequest, SubmitError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(SubmitError::Empty);
        }
        if self.pending.is_some() {
            return Err(SubmitError::Busy);
        }

        self.messages.push(Message::user(text));
        self.last_error = None;
        let cancel_token = CancellationToken::new();
        self.pending = Some(cancel_token.clone());

        Ok(PendingRequest {
            api_messages: self.messages.iter().map(Message::to_api).collect(),
            cancel_token,
        })
    }

    /// Cancel the outstanding request, if any. Returns whether one existed.
    pub fn cancel_pending(&self) -> bool {
        match &self.pending {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Record the outcome of the outstanding request.
    pub fn finish_submit(&mut self, result: Result<Message, ChatError>) {
        self.pending = None;
        match result {
            Ok(reply) => self.messages.push(reply),
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }
}
