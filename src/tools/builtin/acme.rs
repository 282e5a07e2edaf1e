//! ACME storefront demo capabilities: item lookup, refunds, and orders.

use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolOutcome};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct LookUpItemTool {
    definition: ToolDefinition,
}

impl LookUpItemTool {
    pub fn new() -> Arc<Self> {
        let definition = ToolDefinition::new(
            "look_up_item",
            "Use to find item ID. Search query can be a description or keywords.",
        )
        .with_param("search_query", "string", "Description or keywords to search for.")
        .expect("look_up_item schema is static");
        Arc::new(LookUpItemTool { definition })
    }
}

#[derive(Debug, Deserialize)]
struct LookUpItemParams {
    #[allow(dead_code)]
    search_query: String,
}

#[async_trait]
impl Tool for LookUpItemTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolOutcome {
        let _params: LookUpItemParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolOutcome::error(format!("Invalid parameters: {}", e)),
        };

        // Canned catalog lookup; every query maps to the same demo item.
        let item_id = "item_132612938";
        context.console.say(&format!("Found item: {}", item_id));
        ToolOutcome::text(item_id)
    }
}

pub struct ExecuteRefundTool {
    definition: ToolDefinition,
}

impl ExecuteRefundTool {
    pub fn new() -> Arc<Self> {
        let definition = ToolDefinition::new("execute_refund", "")
            .with_param("item_id", "string", "ID of the item to refund.")
            .and_then(|d| {
                d.with_optional_param(
                    "reason",
                    "string",
                    "Why the refund was requested.",
                    json!("not provided"),
                )
            })
            .expect("execute_refund schema is static");
        Arc::new(ExecuteRefundTool { definition })
    }
}

#[derive(Debug, Deserialize)]
struct ExecuteRefundParams {
    item_id: String,
    #[serde(default = "default_refund_reason")]
    reason: String,
}

fn default_refund_reason() -> String {
    "not provided".to_string()
}

#[async_trait]
impl Tool for ExecuteRefundTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolOutcome {
        let params: ExecuteRefundParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolOutcome::error(format!("Invalid parameters: {}", e)),
        };

        let console = &context.console;
        console.say("");
        console.say("=== Refund Summary ===");
        console.say(&format!("Item ID: {}", params.item_id));
        console.say(&format!("Reason: {}", params.reason));
        console.say("=================");
        console.say("Refund execution successful!");
        ToolOutcome::text("success")
    }
}

pub struct ExecuteOrderTool {
    definition: ToolDefinition,
}

impl ExecuteOrderTool {
    pub fn new() -> Arc<Self> {
        let definition = ToolDefinition::new("execute_order", "Price should be in USD.")
            .with_param("product", "string", "Name of the product to order.")
            .and_then(|d| d.with_param("price", "integer", "Price of the product in USD."))
            .expect("execute_order schema is static");
        Arc::new(ExecuteOrderTool { definition })
    }
}

#[derive(Debug, Deserialize)]
struct ExecuteOrderParams {
    product: String,
    price: i64,
}

#[async_trait]
impl Tool for ExecuteOrderTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolOutcome {
        let params: ExecuteOrderParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolOutcome::error(format!("Invalid parameters: {}", e)),
        };

        let console = &context.console;
        console.say("");
        console.say("=== Order Summary ===");
        console.say(&format!("Product: {}", params.product));
        console.say(&format!("Price: ${}", params.price));
        console.say("=================");

        let confirm = console.ask("Confirm order? y/n: ").to_lowercase();
        if confirm == "y" {
            console.say("Order execution successful!");
            ToolOutcome::text("Success")
        } else {
            console.say("Order cancelled!");
            ToolOutcome::text("User cancelled order.")
        }
    }
}
