//! One-shot chat completion requests against an OpenAI-compatible endpoint.

use std::error::Error as StdError;
use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{ChatCompletionResponse, ChatMessage, ChatRequest};
use crate::core::constants::API_KEY_ENV_VARS;
use crate::core::message::Message;
use crate::utils::url::construct_api_url;

const GENERIC_API_ERROR: &str = "An API error occurred.";

#[derive(Debug)]
pub enum ChatError {
    /// No API key in any of the supported environment variables.
    MissingApiKey,
    /// Transport failure before a response arrived.
    Http(reqwest::Error),
    /// The endpoint answered with a non-success status.
    Api { status: u16, message: String },
    /// The success body was not a chat completion.
    Decode(serde_json::Error),
    /// The completion carried no assistant message.
    EmptyReply,
    /// The request was cancelled before it completed.
    Cancelled,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::MissingApiKey => write!(
                f,
                "No API key found. Set one of: {}",
                API_KEY_ENV_VARS.join(", ")
            ),
            ChatError::Http(err) => write!(f, "Request failed: {err}"),
            ChatError::Api { message, .. } => f.write_str(message),
            ChatError::Decode(err) => write!(f, "Could not read the reply: {err}"),
            ChatError::EmptyReply => f.write_str("The model returned no reply."),
            ChatError::Cancelled => f.write_str("Request cancelled."),
        }
    }
}

impl StdError for ChatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ChatError::Http(err) => Some(err),
            ChatError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Http(err)
    }
}

/// Pull a human-readable message out of an error body.
fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_owned)
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_owned)
        });

    summary
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
}

pub(crate) fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body.trim())
        .ok()
        .and_then(|value| extract_error_summary(&value))
        .unwrap_or_else(|| GENERIC_API_ERROR.to_string())
}

pub fn api_key_from_env() -> Result<String, ChatError> {
    API_KEY_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
        .ok_or(ChatError::MissingApiKey)
}

#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send the conversation and wait for the assistant reply.
    ///
    /// Resolves with [`ChatError::Cancelled`] as soon as `cancel` fires; the
    /// in-flight HTTP request is dropped.
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        cancel: &CancellationToken,
    ) -> Result<Message, ChatError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(model = %self.model, "chat request cancelled");
                Err(ChatError::Cancelled)
            }
            result = self.send(messages) => result,
        }
    }

    async fn send(&self, messages: Vec<ChatMessage>) -> Result<Message, ChatError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        };
        let url = construct_api_url(&self.base_url, "chat/completions");
        debug!(%url, model = %self.model, turns = request.messages.len(), "sending chat request");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(ChatError::Decode)?;
        completion
            .first_content()
            .map(Message::assistant)
            .ok_or(ChatError::EmptyReply)
    }
}
