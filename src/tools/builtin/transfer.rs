//! Persona transfer capability.
//!
//! A transfer takes no domain arguments and hands the conversation to a
//! statically known target persona. At the schema level it looks like any
//! other capability; the special handling happens in the turn controller,
//! which matches the [`ToolOutcome::Transfer`] variant.
//!
//! Demo persona graphs are cyclic (the Q&A agent can transfer to Scheduling
//! and back), so the target is wired in a second pass after every persona in
//! the registry has been constructed.

use crate::agent::Persona;
use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolOutcome};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::sync::Arc;

pub struct TransferTool {
    definition: ToolDefinition,
    target: OnceCell<Arc<Persona>>,
}

impl TransferTool {
    pub fn new(name: &str, description: &str) -> Arc<Self> {
        Arc::new(TransferTool {
            definition: ToolDefinition::new(name, description),
            target: OnceCell::new(),
        })
    }

    /// Set the transfer target. Called exactly once during registry wiring.
    pub fn wire(&self, target: Arc<Persona>) {
        if self.target.set(target).is_err() {
            log::warn!(
                "[REGISTRY] Transfer '{}' wired more than once; keeping first target",
                self.definition.name
            );
        }
    }
}

#[async_trait]
impl Tool for TransferTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, _params: Value, _context: &ToolContext) -> ToolOutcome {
        match self.target.get() {
            Some(persona) => ToolOutcome::Transfer(persona.clone()),
            None => ToolOutcome::error(format!(
                "Transfer target for '{}' is not wired",
                self.definition.name
            )),
        }
    }
}
