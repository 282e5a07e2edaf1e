//! Personas and the registry that owns them.
//!
//! A persona binds a system prompt, a model name, and a frozen capability
//! set. Registry instances are shared: a transfer capability hands back the
//! very [`Arc<Persona>`] the registry holds, so pointer identity is enough
//! to tell which persona is active.

use crate::tools::registry::{Tool, ToolSet};
use crate::tools::types::{SchemaError, ToolDefinition};
use std::sync::Arc;

pub struct Persona {
    pub name: String,
    pub model: String,
    pub instructions: String,
    tools: ToolSet,
}

impl Persona {
    /// Build a persona with a validated capability set. Construction fails
    /// if any capability schema is invalid or a name is duplicated.
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        instructions: impl Into<String>,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Result<Arc<Self>, SchemaError> {
        Ok(Arc::new(Persona {
            name: name.into(),
            model: model.into(),
            instructions: instructions.into(),
            tools: ToolSet::new(tools)?,
        }))
    }

    /// Look up a capability by the name the model requested
    pub fn tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Capability definitions in declaration order
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.definitions()
    }
}

/// The persona roster for one application, with a designated entry point.
pub struct AgentRegistry {
    entry: Arc<Persona>,
    personas: Vec<Arc<Persona>>,
}

impl AgentRegistry {
    /// Build a registry. `entry` must also appear in `personas`.
    pub fn new(entry: Arc<Persona>, personas: Vec<Arc<Persona>>) -> Self {
        if !personas.iter().any(|p| Arc::ptr_eq(p, &entry)) {
            log::warn!(
                "[REGISTRY] Entry persona '{}' is not in the roster",
                entry.name
            );
        }
        AgentRegistry { entry, personas }
    }

    /// The persona a new session starts with
    pub fn entry(&self) -> Arc<Persona> {
        self.entry.clone()
    }

    /// Name lookup, used for diagnostics only. Transfers resolve targets by
    /// reference, not by name.
    pub fn get(&self, name: &str) -> Option<Arc<Persona>> {
        self.personas.iter().find(|p| p.name == name).cloned()
    }

    pub fn personas(&self) -> &[Arc<Persona>] {
        &self.personas
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
