//! Capability schema types and the schema → descriptor adapter.
//!
//! A capability declares its parameters against a fixed type-mapping table
//! ([`ParamType`]) at definition time; there is no runtime reflection.
//! Parameters without defaults are required. [`ToolDefinition::descriptor`]
//! renders the function-calling JSON the model API consumes.

use crate::agent::Persona;
use crate::console::{Console, StdioConsole};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The fixed parameter type table exposed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

impl ParamType {
    /// Resolve a textual type name through the mapping table.
    /// Unknown names have no fallback; schema construction fails closed.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ParamType::String),
            "integer" => Some(ParamType::Integer),
            "number" => Some(ParamType::Number),
            "boolean" => Some(ParamType::Boolean),
            "array" => Some(ParamType::Array),
            "object" => Some(ParamType::Object),
            "null" => Some(ParamType::Null),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
            ParamType::Null => "null",
        }
    }
}

/// Error building or validating a capability schema. Fatal at persona
/// construction: a persona with a bad capability never starts.
#[derive(Debug, Clone)]
pub enum SchemaError {
    /// The definition is structurally invalid (empty name, dangling required
    /// parameter, duplicate capability name within a persona).
    Signature { tool: String, detail: String },
    /// A declared parameter type has no entry in the mapping table.
    UnknownType {
        tool: String,
        param: String,
        declared: String,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Signature { tool, detail } => {
                write!(f, "invalid signature for capability '{}': {}", tool, detail)
            }
            SchemaError::UnknownType {
                tool,
                param,
                declared,
            } => write!(
                f,
                "unknown parameter type '{}' for '{}.{}'",
                declared, tool, param
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Schema for a single parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: ParamType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// JSON-Schema-shaped parameter map for a capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: HashMap<String, PropertySchema>,
    pub required: Vec<String>,
}

impl Default for ToolInputSchema {
    fn default() -> Self {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties: HashMap::new(),
            required: vec![],
        }
    }
}

/// Definition of a capability as presented to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

impl ToolDefinition {
    /// Start a definition with an empty parameter map. The description comes
    /// from the capability's documentation and may be empty.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        ToolDefinition {
            name: name.into(),
            description: description.into(),
            input_schema: ToolInputSchema::default(),
        }
    }

    /// Declare a required parameter. `type_name` goes through the fixed
    /// mapping table and fails closed on unknown types.
    pub fn with_param(
        mut self,
        name: &str,
        type_name: &str,
        description: &str,
    ) -> Result<Self, SchemaError> {
        let schema_type = self.resolve_type(name, type_name)?;
        self.input_schema.properties.insert(
            name.to_string(),
            PropertySchema {
                schema_type,
                description: description.to_string(),
                default: None,
            },
        );
        self.input_schema.required.push(name.to_string());
        Ok(self)
    }

    /// Declare an optional parameter with a default value. Parameters with
    /// defaults are never marked required.
    pub fn with_optional_param(
        mut self,
        name: &str,
        type_name: &str,
        description: &str,
        default: Value,
    ) -> Result<Self, SchemaError> {
        let schema_type = self.resolve_type(name, type_name)?;
        self.input_schema.properties.insert(
            name.to_string(),
            PropertySchema {
                schema_type,
                description: description.to_string(),
                default: Some(default),
            },
        );
        Ok(self)
    }

    fn resolve_type(&self, param: &str, type_name: &str) -> Result<ParamType, SchemaError> {
        ParamType::from_name(type_name).ok_or_else(|| SchemaError::UnknownType {
            tool: self.name.clone(),
            param: param.to_string(),
            declared: type_name.to_string(),
        })
    }

    /// Structural validation, run once when a persona is constructed.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::Signature {
                tool: self.name.clone(),
                detail: "capability name is empty".to_string(),
            });
        }
        for required in &self.input_schema.required {
            if !self.input_schema.properties.contains_key(required) {
                return Err(SchemaError::Signature {
                    tool: self.name.clone(),
                    detail: format!("required parameter '{}' has no schema", required),
                });
            }
        }
        Ok(())
    }

    /// Render the function-calling descriptor consumed by the model API.
    /// Pure function of the definition: calling it twice yields identical JSON.
    pub fn descriptor(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.input_schema,
            }
        })
    }
}

/// Discriminated result of one capability execution, matched exhaustively by
/// the turn controller. Control flow is never smuggled through return-value
/// types: a transfer and a termination are their own variants.
pub enum ToolOutcome {
    /// Plain result content folded into history.
    Text(String),
    /// Execution failed; folded into history as an error tool-result.
    Error(String),
    /// Switch the active persona to the referenced registry instance.
    Transfer(Arc<Persona>),
    /// Ask the caller to end the session after this turn completes.
    EndSession(String),
}

impl ToolOutcome {
    pub fn text(content: impl Into<String>) -> Self {
        ToolOutcome::Text(content.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolOutcome::Error(message.into())
    }
}

/// Execution context handed to every capability.
#[derive(Clone)]
pub struct ToolContext {
    /// Console collaborator for confirmation prompts and user-facing output.
    pub console: Arc<dyn Console>,
}

impl Default for ToolContext {
    fn default() -> Self {
        ToolContext {
            console: Arc::new(StdioConsole),
        }
    }
}
