//! Capabilities: schema types, the `Tool` trait, and the built-in demo tools.

pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::{Tool, ToolSet};
pub use types::{
    ParamType, PropertySchema, SchemaError, ToolContext, ToolDefinition, ToolInputSchema,
    ToolOutcome,
};
