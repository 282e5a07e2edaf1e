//! Human escalation capability.
//!
//! Escalation never kills the process from inside the tool. It yields a
//! [`ToolOutcome::EndSession`] variant: the turn still runs to completion
//! and the caller decides how to honor the request.

use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolOutcome};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub struct EscalateToHumanTool {
    definition: ToolDefinition,
}

impl EscalateToHumanTool {
    pub fn new() -> Arc<Self> {
        let definition = ToolDefinition::new("escalate_to_human", "Only call this if explicitly asked to.")
            .with_param(
                "summary",
                "string",
                "Summary of the conversation for the human agent.",
            )
            .expect("escalate_to_human schema is static");
        Arc::new(EscalateToHumanTool { definition })
    }
}

#[derive(Debug, Deserialize)]
struct EscalateParams {
    summary: String,
}

#[async_trait]
impl Tool for EscalateToHumanTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolOutcome {
        let params: EscalateParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolOutcome::error(format!("Invalid parameters: {}", e)),
        };

        context.console.say("Escalating to human agent...");
        context.console.say("");
        context.console.say("=== Escalation Report ===");
        context.console.say(&format!("Summary: {}", params.summary));
        context.console.say("=========================");

        ToolOutcome::EndSession(params.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use serde_json::json;

    #[tokio::test]
    async fn test_escalation_requests_session_end() {
        let console = Arc::new(ScriptedConsole::new(vec![]));
        let context = ToolContext {
            console: console.clone(),
        };
        let tool = EscalateToHumanTool::new();

        let outcome = tool
            .execute(json!({"summary": "Customer needs a specialist"}), &context)
            .await;

        match outcome {
            ToolOutcome::EndSession(report) => {
                assert_eq!(report, "Customer needs a specialist")
            }
            _ => panic!("expected EndSession outcome"),
        }
        let transcript = console.transcript();
        assert!(transcript
            .iter()
            .any(|l| l.contains("Summary: Customer needs a specialist")));
    }

    #[tokio::test]
    async fn test_malformed_arguments_surface_decode_error() {
        let tool = EscalateToHumanTool::new();
        let outcome = tool
            .execute(json!({"sum": 42}), &ToolContext::default())
            .await;
        match outcome {
            ToolOutcome::Error(message) => {
                assert!(message.starts_with("Invalid parameters:"))
            }
            _ => panic!("expected decode error outcome"),
        }
    }
}
