//! Retrieval capability wrapping the external retrieval collaborator.

use crate::retrieval::Retriever;
use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolOutcome};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const DEFAULT_TOP_K: usize = 3;

pub struct RetrieveTool {
    definition: ToolDefinition,
    retriever: Arc<dyn Retriever>,
}

impl RetrieveTool {
    pub fn new(retriever: Arc<dyn Retriever>) -> Arc<Self> {
        let definition = ToolDefinition::new(
            "retrieve",
            "Retrieve the most relevant service descriptions for a given query.",
        )
        .with_param("query", "string", "The query to search the dataset for.")
        .and_then(|d| {
            d.with_optional_param(
                "top_k",
                "integer",
                "Number of top documents to return.",
                json!(DEFAULT_TOP_K),
            )
        })
        .expect("retrieve schema is static");

        Arc::new(RetrieveTool {
            definition,
            retriever,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RetrieveParams {
    query: String,
    #[serde(default = "default_top_k")]
    top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

#[async_trait]
impl Tool for RetrieveTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> ToolOutcome {
        let params: RetrieveParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolOutcome::error(format!("Invalid parameters: {}", e)),
        };

        match self.retriever.retrieve(&params.query, params.top_k).await {
            Ok(snippets) if snippets.is_empty() => {
                ToolOutcome::text("No matching services found.")
            }
            Ok(snippets) => ToolOutcome::text(snippets.join("\n\n")),
            Err(e) => ToolOutcome::error(format!("Retrieval failed: {}", e)),
        }
    }
}
