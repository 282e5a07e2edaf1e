use crate::tools::types::{SchemaError, ToolContext, ToolDefinition, ToolOutcome};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Trait that all capabilities implement.
///
/// Schemas are declared statically via [`ToolDefinition`]; execution decodes
/// its argument payload into a typed parameter struct and returns a
/// discriminated [`ToolOutcome`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the capability definition presented to the model
    fn definition(&self) -> ToolDefinition;

    /// Executes the capability with the given JSON arguments
    async fn execute(&self, params: Value, context: &ToolContext) -> ToolOutcome;

    /// Returns the capability's name
    fn name(&self) -> String {
        self.definition().name
    }
}

/// A persona's ordered capability set.
///
/// Validated and frozen at persona construction; the model sees descriptors
/// in declaration order, and lookup by name resolves model-requested calls.
pub struct ToolSet {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolSet {
    /// Build a set from an ordered list of capabilities.
    ///
    /// Every definition is validated up front; a duplicate name or an invalid
    /// schema aborts construction with a [`SchemaError`].
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Result<Self, SchemaError> {
        let mut seen: Vec<String> = Vec::with_capacity(tools.len());
        for tool in &tools {
            let definition = tool.definition();
            definition.validate()?;
            if seen.contains(&definition.name) {
                return Err(SchemaError::Signature {
                    tool: definition.name.clone(),
                    detail: "duplicate capability name in persona".to_string(),
                });
            }
            seen.push(definition.name);
        }
        Ok(ToolSet { tools })
    }

    /// Look up a capability by the name the model requested
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|t| t.definition().name == name)
            .cloned()
    }

    /// Definitions in declaration order, for the model request
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
