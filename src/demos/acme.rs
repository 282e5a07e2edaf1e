//! ACME storefront roster: a triage entry persona routing to sales and
//! issues-and-repairs personas.

use crate::agent::{AgentRegistry, Persona};
use crate::tools::builtin::{
    EscalateToHumanTool, ExecuteOrderTool, ExecuteRefundTool, LookUpItemTool, TransferTool,
};
use crate::tools::types::SchemaError;
use std::sync::Arc;

const TRIAGE_INSTRUCTIONS: &str = "You are a customer service bot for ACME Inc. Introduce yourself. Always be very brief. Gather information to direct the customer to the right department. But make your questions subtle and natural.";

const SALES_INSTRUCTIONS: &str = "You are a sales agent for ACME Inc. Always answer in a sentence or less. Follow the following routine with the user:\n1. Ask them about any problems in their life related to catching roadrunners.\n2. Casually mention one of ACME's crazy made-up products can help.\n - Don't mention price.\n3. Once the user is bought in, drop a ridiculous price.\n4. Only after everything, and if the user says yes, tell them a crazy caveat and execute their order.";

const ISSUES_INSTRUCTIONS: &str = "You are a customer support agent for ACME Inc. Always answer in a sentence or less. Follow the following routine with the user:\n1. First, ask probing questions and understand the user's problem deeper.\n - unless the user has already provided a reason.\n2. Propose a fix (make one up).\n3. ONLY if not satisfied, offer a refund.\n4. If accepted, search for the ID and then execute refund.";

/// Build the ACME roster. The triage agent is the entry persona.
pub fn registry(model: &str) -> Result<AgentRegistry, SchemaError> {
    let triage_to_sales = TransferTool::new(
        "transfer_to_sales_agent",
        "User for anything sales or buying related.",
    );
    let triage_to_issues = TransferTool::new(
        "transfer_to_issues_and_repairs",
        "User for issues, repairs, or refunds.",
    );
    let sales_to_triage = TransferTool::new(
        "transfer_back_to_triage",
        "Call this if the user brings up a topic outside of your purview, including escalating to human.",
    );
    let issues_to_triage = TransferTool::new(
        "transfer_back_to_triage",
        "Call this if the user brings up a topic outside of your purview, including escalating to human.",
    );

    let triage = Persona::new(
        "Triage Agent",
        model,
        TRIAGE_INSTRUCTIONS,
        vec![
            triage_to_sales.clone(),
            triage_to_issues.clone(),
            EscalateToHumanTool::new(),
        ],
    )?;

    let sales = Persona::new(
        "Sales Agent",
        model,
        SALES_INSTRUCTIONS,
        vec![ExecuteOrderTool::new(), sales_to_triage.clone()],
    )?;

    let issues = Persona::new(
        "Issues and Repairs Agent",
        model,
        ISSUES_INSTRUCTIONS,
        vec![
            ExecuteRefundTool::new(),
            LookUpItemTool::new(),
            issues_to_triage.clone(),
        ],
    )?;

    triage_to_sales.wire(sales.clone());
    triage_to_issues.wire(issues.clone());
    sales_to_triage.wire(triage.clone());
    issues_to_triage.wire(triage.clone());

    Ok(AgentRegistry::new(
        triage.clone(),
        vec![triage, sales, issues],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::types::{ToolContext, ToolOutcome};

    #[test]
    fn test_roster_wiring() {
        let registry = registry("gpt-4o-mini").unwrap();
        assert_eq!(registry.len(), 3);

        let entry = registry.entry();
        assert_eq!(entry.name, "Triage Agent");
        assert!(entry.tool("transfer_to_sales_agent").is_some());
        assert!(entry.tool("transfer_to_issues_and_repairs").is_some());
        assert!(entry.tool("escalate_to_human").is_some());
        assert!(entry.tool("execute_order").is_none());

        let sales = registry.get("Sales Agent").unwrap();
        assert!(sales.tool("execute_order").is_some());

        let issues = registry.get("Issues and Repairs Agent").unwrap();
        assert!(issues.tool("execute_refund").is_some());
        assert!(issues.tool("look_up_item").is_some());
    }

    #[tokio::test]
    async fn test_transfer_cycle_returns_to_triage() {
        let registry = registry("gpt-4o-mini").unwrap();
        let triage = registry.entry();
        let sales = registry.get("Sales Agent").unwrap();

        let back = sales.tool("transfer_back_to_triage").unwrap();
        match back
            .execute(serde_json::Value::Null, &ToolContext::default())
            .await
        {
            ToolOutcome::Transfer(target) => assert!(Arc::ptr_eq(&target, &triage)),
            _ => panic!("expected transfer outcome"),
        }
    }
}
