//! Model client layer: conversation history entries and the provider seam.
//!
//! The turn controller talks to the language model exclusively through the
//! [`ModelClient`] trait, so tests can script responses and the OpenAI-compatible
//! HTTP client stays swappable.

pub mod openai;
pub mod types;

pub use openai::OpenAiClient;
pub use types::{AiError, AiResponse, ToolCall, ToolResponse};

use crate::tools::ToolDefinition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::Tool => "tool",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a conversation history.
///
/// Histories are append-only: entries are never reordered or deleted within a
/// session. Assistant entries may carry the tool calls the model requested;
/// tool entries carry the call id they respond to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub content: String,
    /// Tool calls requested by the model (assistant entries only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// ID of the call this entry responds to (tool entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Whether a tool entry reports an execution error
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatEntry {
    fn bare(role: ChatRole, content: impl Into<String>) -> Self {
        ChatEntry {
            role,
            content: content.into(),
            tool_calls: vec![],
            tool_call_id: None,
            is_error: false,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::bare(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::bare(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::bare(ChatRole::Assistant, content)
    }

    /// Build the assistant entry recording a model response, including any
    /// tool calls it requested.
    pub fn from_response(response: &AiResponse) -> Self {
        ChatEntry {
            role: ChatRole::Assistant,
            content: response.content.clone(),
            tool_calls: response.tool_calls.clone(),
            tool_call_id: None,
            is_error: false,
        }
    }

    /// Build the tool entry recording one executed tool call.
    pub fn tool_result(response: &ToolResponse) -> Self {
        ChatEntry {
            role: ChatRole::Tool,
            content: response.content.clone(),
            tool_calls: vec![],
            tool_call_id: Some(response.tool_call_id.clone()),
            is_error: response.is_error,
        }
    }
}

/// Seam to the external language-model service.
///
/// Retry/backoff policy belongs to implementations; callers treat a returned
/// [`AiError`] as the turn-aborting external-service failure.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Plain text completion without tool support.
    async fn generate_text(&self, model: &str, entries: &[ChatEntry]) -> Result<String, AiError>;

    /// Completion with function-calling support. `tools` may be empty.
    async fn generate_with_tools(
        &self,
        model: &str,
        entries: &[ChatEntry],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, AiError>;
}

/// Scripted model client for tests. Pops pre-configured responses in order and
/// records what each request looked like.
#[cfg(test)]
pub struct MockAiClient {
    responses: std::sync::Mutex<std::collections::VecDeque<AiResponse>>,
    pub requests: std::sync::Mutex<Vec<MockRequest>>,
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub model: String,
    pub system: Option<String>,
    pub entry_count: usize,
    pub tool_names: Vec<String>,
}

#[cfg(test)]
impl MockAiClient {
    pub fn new(responses: Vec<AiResponse>) -> Self {
        MockAiClient {
            responses: std::sync::Mutex::new(responses.into()),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn record(&self, model: &str, entries: &[ChatEntry], tools: &[ToolDefinition]) {
        let system = entries
            .first()
            .filter(|e| e.role == ChatRole::System)
            .map(|e| e.content.clone());
        self.requests.lock().unwrap().push(MockRequest {
            model: model.to_string(),
            system,
            entry_count: entries.len(),
            tool_names: tools.iter().map(|t| t.name.clone()).collect(),
        });
    }
}

#[cfg(test)]
#[async_trait]
impl ModelClient for MockAiClient {
    async fn generate_text(&self, model: &str, entries: &[ChatEntry]) -> Result<String, AiError> {
        self.record(model, entries, &[]);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .map(|r| r.content)
            .ok_or_else(|| AiError::new("MockAiClient: no responses left"))
    }

    async fn generate_with_tools(
        &self,
        model: &str,
        entries: &[ChatEntry],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, AiError> {
        self.record(model, entries, tools);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AiError::new("MockAiClient: no responses left"))
    }
}
