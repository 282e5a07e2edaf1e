//! Dental-clinic demo capabilities: appointment booking and feedback
//! collection. Both interact with the user through the console collaborator.

use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolOutcome};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub struct ExecuteSchedulingTool {
    definition: ToolDefinition,
}

impl ExecuteSchedulingTool {
    pub fn new() -> Arc<Self> {
        let definition = ToolDefinition::new("execute_scheduling", "")
            .with_param("date", "string", "Requested appointment date.")
            .and_then(|d| d.with_param("event_type", "string", "Kind of appointment."))
            .and_then(|d| d.with_param("reason", "string", "Why the visit is needed."))
            .expect("execute_scheduling schema is static");
        Arc::new(ExecuteSchedulingTool { definition })
    }
}

#[derive(Debug, Deserialize)]
struct ExecuteSchedulingParams {
    date: String,
    event_type: String,
    reason: String,
}

#[async_trait]
impl Tool for ExecuteSchedulingTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolOutcome {
        let params: ExecuteSchedulingParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolOutcome::error(format!("Invalid parameters: {}", e)),
        };

        let console = &context.console;
        console.say("");
        console.say("=== Scheduling Summary ===");
        console.say(&format!("Date: {}", params.date));
        console.say(&format!("Event: {}", params.event_type));
        console.say(&format!("Reason: {}", params.reason));
        console.say("=================");

        let confirm = console.ask("Confirm event? y/n: ").to_lowercase();
        if confirm == "y" {
            console.say("Event scheduled successfully!");
            ToolOutcome::text("Success")
        } else {
            console.say("Event cancelled!");
            ToolOutcome::text("User cancelled order.")
        }
    }
}

pub struct CollectFeedbackTool {
    definition: ToolDefinition,
}

impl CollectFeedbackTool {
    pub fn new() -> Arc<Self> {
        Arc::new(CollectFeedbackTool {
            definition: ToolDefinition::new(
                "collect_human_feedback",
                "Prompt the user for feedback after completing tasks.",
            ),
        })
    }
}

#[async_trait]
impl Tool for CollectFeedbackTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, _params: Value, context: &ToolContext) -> ToolOutcome {
        let feedback = context
            .console
            .ask("We'd love your feedback to improve our service: ");
        ToolOutcome::text(feedback)
    }
}
