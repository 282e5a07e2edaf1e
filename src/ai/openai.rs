//! OpenAI-compatible chat-completions client.
//!
//! Works against the OpenAI API or any endpoint speaking the same protocol.
//! Tool definitions are passed via the API's `tools` parameter; retry/backoff
//! for transient failures lives here, not in the turn controller.

use crate::ai::types::{AiError, AiResponse, ToolCall};
use crate::ai::{ChatEntry, ChatRole, ModelClient};
use crate::tools::ToolDefinition;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiClient {
    client: Client,
    auth_headers: header::HeaderMap,
    endpoint: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: String,
    function: WireFunctionCall,
}

/// The API carries function arguments as a JSON-encoded string, not an object.
#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, endpoint: Option<&str>, max_tokens: u32) -> Result<Self, String> {
        let mut auth_headers = header::HeaderMap::new();
        auth_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let auth_value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| format!("Invalid API key format: {}", e))?;
        auth_headers.insert(header::AUTHORIZATION, auth_value);

        Ok(Self {
            client: crate::http::shared_client().clone(),
            auth_headers,
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
            max_tokens,
        })
    }

    fn wire_messages(entries: &[ChatEntry]) -> Vec<WireMessage> {
        entries
            .iter()
            .map(|entry| WireMessage {
                role: entry.role.as_str().to_string(),
                // Assistant entries that only carry tool calls have no content
                content: if entry.content.is_empty() && !entry.tool_calls.is_empty() {
                    None
                } else {
                    Some(entry.content.clone())
                },
                tool_calls: if entry.tool_calls.is_empty() {
                    None
                } else {
                    Some(
                        entry
                            .tool_calls
                            .iter()
                            .map(|tc| WireToolCall {
                                id: tc.id.clone(),
                                call_type: "function".to_string(),
                                function: WireFunctionCall {
                                    name: tc.name.clone(),
                                    arguments: tc.arguments.to_string(),
                                },
                            })
                            .collect(),
                    )
                },
                tool_call_id: entry.tool_call_id.clone(),
            })
            .collect()
    }

    /// POST a chat-completion request with bounded retry on transient errors.
    async fn post_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AiError> {
        const MAX_RETRIES: u32 = 3;
        const BASE_DELAY_MS: u64 = 2000;

        let mut last_error: Option<AiError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay_ms = BASE_DELAY_MS * (1 << (attempt - 1));
                log::warn!(
                    "[OPENAI] Retry attempt {}/{} after {}ms delay",
                    attempt,
                    MAX_RETRIES,
                    delay_ms
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }

            let request_result = self
                .client
                .post(&self.endpoint)
                .headers(self.auth_headers.clone())
                .json(request)
                .send()
                .await;

            let response = match request_result {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AiError::new(format!("OpenAI API request failed: {}", e)));
                    if attempt < MAX_RETRIES {
                        log::warn!(
                            "[OPENAI] Request failed (attempt {}): {}, will retry",
                            attempt + 1,
                            e
                        );
                        continue;
                    }
                    break;
                }
            };

            let status = response.status();
            let status_code = status.as_u16();

            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                let is_retryable = matches!(status_code, 429 | 502 | 503 | 504);

                if is_retryable && attempt < MAX_RETRIES {
                    log::warn!(
                        "[OPENAI] Received retryable status {} (attempt {}), will retry",
                        status,
                        attempt + 1
                    );
                    last_error = Some(AiError::with_status(
                        format!("HTTP {}: {}", status, error_text),
                        status_code,
                    ));
                    continue;
                }

                let message = match serde_json::from_str::<ApiErrorResponse>(&error_text) {
                    Ok(parsed) => format!("OpenAI API error: {}", parsed.error.message),
                    Err(_) => format!(
                        "OpenAI API returned error status: {}, body: {}",
                        status, error_text
                    ),
                };
                return Err(AiError::with_status(message, status_code));
            }

            return response
                .json()
                .await
                .map_err(|e| AiError::new(format!("Failed to parse OpenAI response: {}", e)));
        }

        Err(last_error.unwrap_or_else(|| AiError::new("Max retries exceeded")))
    }

    fn into_ai_response(response: ChatCompletionResponse) -> Result<AiResponse, AiError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::new("OpenAI API returned no choices"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| {
                // Malformed argument payloads are kept verbatim so the tool
                // layer can surface a decode error back to the model.
                let arguments = serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(Value::String(tc.function.arguments));
                ToolCall {
                    id: tc.id,
                    name: tc.function.name,
                    arguments,
                }
            })
            .collect();

        Ok(AiResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            stop_reason: choice.finish_reason,
        })
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn generate_text(&self, model: &str, entries: &[ChatEntry]) -> Result<String, AiError> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: Self::wire_messages(entries),
            max_tokens: self.max_tokens,
            tools: None,
        };

        let response = Self::into_ai_response(self.post_chat(&request).await?)?;
        if response.content.is_empty() {
            return Err(AiError::new("OpenAI API returned no content"));
        }
        Ok(response.content)
    }

    async fn generate_with_tools(
        &self,
        model: &str,
        entries: &[ChatEntry],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, AiError> {
        let descriptors: Vec<Value> = tools.iter().map(|t| t.descriptor()).collect();
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: Self::wire_messages(entries),
            max_tokens: self.max_tokens,
            tools: if descriptors.is_empty() {
                None
            } else {
                Some(descriptors)
            },
        };

        log::debug!(
            "[OPENAI] Sending tool request: {}",
            serde_json::to_string(&request).unwrap_or_default()
        );

        Self::into_ai_response(self.post_chat(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<ChatEntry> {
        vec![
            ChatEntry::system("You are a test agent."),
            ChatEntry::user("hello"),
            ChatEntry::from_response(&AiResponse::with_tools(
                String::new(),
                vec![ToolCall {
                    id: "call_1".to_string(),
                    name: "look_up_item".to_string(),
                    arguments: serde_json::json!({"search_query": "anvil"}),
                }],
            )),
            ChatEntry::tool_result(&crate::ai::ToolResponse::success(
                "call_1".to_string(),
                "item_132612938".to_string(),
            )),
        ]
    }

    #[test]
    fn test_wire_messages_roles_and_metadata() {
        let wire = OpenAiClient::wire_messages(&sample_entries());

        assert_eq!(wire.len(), 4);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[1].role, "user");
        assert_eq!(wire[2].role, "assistant");
        // Tool-call-only assistant entries serialize without content
        assert!(wire[2].content.is_none());
        assert_eq!(wire[2].tool_calls.as_ref().unwrap().len(), 1);
        assert_eq!(
            wire[2].tool_calls.as_ref().unwrap()[0].function.arguments,
            r#"{"search_query":"anvil"}"#
        );
        assert_eq!(wire[3].role, "tool");
        assert_eq!(wire[3].tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn test_into_ai_response_parses_tool_calls() {
        let raw = serde_json::json!({
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {
                            "name": "execute_refund",
                            "arguments": "{\"item_id\":\"item_1\"}"
                        }
                    }]
                }
            }]
        });
        let parsed: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
        let response = OpenAiClient::into_ai_response(parsed).unwrap();

        assert!(response.content.is_empty());
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "execute_refund");
        assert_eq!(
            response.tool_calls[0].arguments,
            serde_json::json!({"item_id": "item_1"})
        );
        assert_eq!(response.stop_reason.as_deref(), Some("tool_calls"));
    }

    #[test]
    fn test_into_ai_response_keeps_malformed_arguments_verbatim() {
        let raw = serde_json::json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "id": "call_2",
                        "type": "function",
                        "function": { "name": "retrieve", "arguments": "{not json" }
                    }]
                }
            }]
        });
        let parsed: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
        let response = OpenAiClient::into_ai_response(parsed).unwrap();

        assert_eq!(
            response.tool_calls[0].arguments,
            Value::String("{not json".to_string())
        );
    }

    #[test]
    fn test_into_ai_response_no_choices_is_error() {
        let parsed: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({"choices": []})).unwrap();
        assert!(OpenAiClient::into_ai_response(parsed).is_err());
    }
}
