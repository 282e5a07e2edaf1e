//! The full-turn loop: drive the model until it stops requesting capability
//! calls, switching personas mid-turn when a transfer fires.
//!
//! One turn may span several model round trips. The controller prepends the
//! active persona's instructions as the system entry on every request, so a
//! transfer changes both the prompt and the capability set for the next
//! round trip. Every entry produced during the turn is returned to the
//! caller; the controller never mutates session history directly.

use crate::agent::Persona;
use crate::ai::{AiError, ChatEntry, ModelClient, ToolCall, ToolResponse};
use crate::tools::types::{ToolContext, ToolOutcome};
use std::sync::Arc;

#[cfg(test)]
mod controller_tests;

/// Everything one turn produced: the entries to append to history, the
/// persona that was active when the turn ended, and a pending end-of-session
/// request if an escalation fired.
pub struct TurnResult {
    pub persona: Arc<Persona>,
    pub entries: Vec<ChatEntry>,
    pub end_session: Option<String>,
}

impl std::fmt::Debug for TurnResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnResult")
            .field("persona", &self.persona.name)
            .field("entries", &self.entries)
            .field("end_session", &self.end_session)
            .finish()
    }
}

pub struct TurnController {
    client: Arc<dyn ModelClient>,
    context: ToolContext,
}

impl TurnController {
    pub fn new(client: Arc<dyn ModelClient>, context: ToolContext) -> Self {
        TurnController { client, context }
    }

    /// Run one full turn starting from `persona` on top of `history`.
    ///
    /// A model failure aborts the whole turn; partial entries are discarded
    /// with it, never half-applied to history.
    pub async fn run_full_turn(
        &self,
        persona: Arc<Persona>,
        history: &[ChatEntry],
    ) -> Result<TurnResult, AiError> {
        let mut active = persona;
        let mut entries: Vec<ChatEntry> = Vec::new();
        let mut end_session: Option<String> = None;

        loop {
            let mut request: Vec<ChatEntry> =
                Vec::with_capacity(1 + history.len() + entries.len());
            request.push(ChatEntry::system(&active.instructions));
            request.extend_from_slice(history);
            request.extend_from_slice(&entries);

            let response = self
                .client
                .generate_with_tools(&active.model, &request, &active.tool_definitions())
                .await?;

            if !response.content.is_empty() {
                self.context
                    .console
                    .say(&format!("{}: {}", active.name, response.content));
            }

            entries.push(ChatEntry::from_response(&response));

            if !response.has_tool_calls() {
                break;
            }

            for call in &response.tool_calls {
                let (tool_response, transfer) =
                    self.execute_tool_call(&active, call, &mut end_session).await;
                entries.push(ChatEntry::tool_result(&tool_response));
                if let Some(next) = transfer {
                    active = next;
                }
            }
        }

        Ok(TurnResult {
            persona: active,
            entries,
            end_session,
        })
    }

    /// Execute one requested call against the active persona's capability
    /// set. Failures are reported to the model as error tool-results, never
    /// as turn aborts.
    async fn execute_tool_call(
        &self,
        active: &Arc<Persona>,
        call: &ToolCall,
        end_session: &mut Option<String>,
    ) -> (ToolResponse, Option<Arc<Persona>>) {
        log::info!("[TURN] {}: {}({})", active.name, call.name, call.arguments);

        let tool = match active.tool(&call.name) {
            Some(tool) => tool,
            None => {
                log::warn!(
                    "[TURN] Unknown tool '{}' requested by agent '{}'",
                    call.name,
                    active.name
                );
                return (
                    ToolResponse::error(
                        call.id.clone(),
                        format!("Unknown tool '{}' for agent '{}'", call.name, active.name),
                    ),
                    None,
                );
            }
        };

        match tool.execute(call.arguments.clone(), &self.context).await {
            ToolOutcome::Text(content) => (ToolResponse::success(call.id.clone(), content), None),
            ToolOutcome::Error(message) => {
                log::warn!("[TURN] Tool '{}' failed: {}", call.name, message);
                (ToolResponse::error(call.id.clone(), message), None)
            }
            ToolOutcome::Transfer(target) => {
                log::info!("[TURN] Transfer: {} -> {}", active.name, target.name);
                let notice = format!(
                    "Transferred to {}. Adopt persona immediately.",
                    target.name
                );
                (
                    ToolResponse::success(call.id.clone(), notice),
                    Some(target),
                )
            }
            ToolOutcome::EndSession(summary) => {
                log::info!("[TURN] Session end requested: {}", summary);
                *end_session = Some(summary);
                (
                    ToolResponse::success(
                        call.id.clone(),
                        "Escalation recorded. Wrap up the conversation; the session ends after your reply."
                            .to_string(),
                    ),
                    None,
                )
            }
        }
    }
}
