//! Built-in capabilities for the demo personas.

pub mod acme;
pub mod clinic;
pub mod escalate;
pub mod retrieve;
pub mod transfer;

pub use acme::{ExecuteOrderTool, ExecuteRefundTool, LookUpItemTool};
pub use clinic::{CollectFeedbackTool, ExecuteSchedulingTool};
pub use escalate::EscalateToHumanTool;
pub use retrieve::RetrieveTool;
pub use transfer::TransferTool;
