//! Dental clinic roster: a Q&A entry persona backed by catalog retrieval,
//! plus scheduling and feedback personas it can hand the conversation to.
//! The transfer graph is cyclic, so persona construction and transfer wiring
//! happen in two passes.

use crate::agent::{AgentRegistry, Persona};
use crate::retrieval::{Retriever, ServiceCatalog, ServiceRecord};
use crate::tools::builtin::{
    CollectFeedbackTool, EscalateToHumanTool, ExecuteSchedulingTool, RetrieveTool, TransferTool,
};
use crate::tools::types::SchemaError;
use std::sync::Arc;

const QA_INSTRUCTIONS: &str = "You are a professional and empathetic Q&A agent for a Dental Clinic. Your role is to engage users thoughtfully, offering them precise and helpful information dynamically based on their dental concerns. ### Responsibilities:\n1. Begin by understanding the user's dental health concerns, asking clarifying questions to identify their needs.\n2. Use the retrieval system to find detailed, accurate information about services available at the clinic. Provide relevant recommendations with explanations.\n3. Clearly describe services, including preparation steps, durations, and specialists involved, using a patient-friendly tone.\n4. Avoid discussing prices unless the user specifically requests it.\n5. Encourage user engagement, ensuring clarity and empathy in responses. If users wish to schedule, transfer them seamlessly to the scheduling agent.\n6. Request feedback courteously to help improve the service, transferring the user to the feedback agent when appropriate.\n7. If a query exceeds your expertise or requires human intervention, escalate to a human agent immediately.\n\nAlways structure responses in a professional yet approachable manner, using a step-by-step process where relevant to improve understanding.";

const SCHEDULING_INSTRUCTIONS: &str = "You are a professional scheduling assistant for a Dental Clinic. Your job is to ensure seamless and efficient scheduling experiences for users. Always maintain a polite and helpful demeanor, guiding users through the appointment process with ease.\n### Responsibilities:\n1. Confirm the user's preferred date and time, suggesting alternatives if unavailable.\n2. Provide information on specialists and services to help users make informed decisions.\n3. Politely verify all scheduling details before confirming appointments.\n4. Address any scheduling-related queries promptly.\n5. If the user requests general information or has broader concerns, transfer them back to the Q&A agent.";

const FEEDBACK_INSTRUCTIONS: &str = "You are a courteous and attentive feedback agent for a Dental Clinic. Your role is to gather constructive feedback from users to help improve the clinic's services. ### Responsibilities:\n1. Begin by thanking the user for their time and willingness to provide feedback.\n2. Ask open-ended questions to encourage detailed responses about their experience.\n3. Ensure the feedback process is easy, respectful, and focused on improving future interactions.\n4. Summarize the feedback clearly for future reference and improvements.\n5. If users bring up additional service queries during feedback, transfer them back to the Q&A agent.";

/// Build the clinic roster. The Q&A agent is the entry persona.
pub fn registry(model: &str, retriever: Arc<dyn Retriever>) -> Result<AgentRegistry, SchemaError> {
    // Transfer capabilities are created unwired so the cyclic persona graph
    // can be built, then wired once every persona exists.
    let qa_to_scheduling = TransferTool::new(
        "transfer_to_scheduling_agent",
        "Use for anything scheduling related.",
    );
    let qa_to_feedback = TransferTool::new("transfer_to_feedback_agent", "Use for feedback related.");
    let scheduling_to_qa = TransferTool::new(
        "transfer_back_to_qa",
        "Call this if the user brings up a topic outside your purview, including escalating to human.",
    );
    let scheduling_to_feedback =
        TransferTool::new("transfer_to_feedback_agent", "Use for feedback related.");
    let feedback_to_qa = TransferTool::new(
        "transfer_back_to_qa",
        "Call this if the user brings up a topic outside your purview, including escalating to human.",
    );

    let qa = Persona::new(
        "Q&A Agent",
        model,
        QA_INSTRUCTIONS,
        vec![
            qa_to_scheduling.clone(),
            qa_to_feedback.clone(),
            EscalateToHumanTool::new(),
            RetrieveTool::new(retriever),
        ],
    )?;

    let scheduling = Persona::new(
        "Scheduling Assistant",
        model,
        SCHEDULING_INSTRUCTIONS,
        vec![
            ExecuteSchedulingTool::new(),
            scheduling_to_qa.clone(),
            scheduling_to_feedback.clone(),
        ],
    )?;

    let feedback = Persona::new(
        "Feedback Agent",
        model,
        FEEDBACK_INSTRUCTIONS,
        vec![CollectFeedbackTool::new(), feedback_to_qa.clone()],
    )?;

    qa_to_scheduling.wire(scheduling.clone());
    qa_to_feedback.wire(feedback.clone());
    scheduling_to_qa.wire(qa.clone());
    scheduling_to_feedback.wire(feedback.clone());
    feedback_to_qa.wire(qa.clone());

    Ok(AgentRegistry::new(
        qa.clone(),
        vec![qa, scheduling, feedback],
    ))
}

/// The clinic's service catalog, searched by the Q&A agent's retrieval
/// capability.
pub fn catalog() -> ServiceCatalog {
    let record = |name: &str,
                  description: &str,
                  price: &str,
                  specialist: &str,
                  preparation: &str,
                  duration_mins: u32| ServiceRecord {
        name: name.to_string(),
        description: description.to_string(),
        price: price.to_string(),
        specialist: specialist.to_string(),
        preparation: preparation.to_string(),
        duration_mins,
    };

    ServiceCatalog::new(vec![
        record(
            "Dental Cleaning",
            "Routine cleaning to remove plaque and tartar buildup.",
            "$120",
            "Dental Hygienist",
            "None required.",
            45,
        ),
        record(
            "Teeth Whitening",
            "In-office cosmetic whitening treatment for a brighter smile.",
            "$350",
            "Cosmetic Dentist",
            "Avoid staining foods for 24 hours before the visit.",
            60,
        ),
        record(
            "Root Canal Treatment",
            "Removal of infected pulp to relieve pain and save the tooth.",
            "$900",
            "Endodontist",
            "Eat a light meal beforehand; arrange a ride home if sedated.",
            90,
        ),
        record(
            "Wisdom Tooth Extraction",
            "Surgical removal of impacted or problematic wisdom teeth.",
            "$650",
            "Oral Surgeon",
            "Fast for 6 hours before the procedure if sedation is planned.",
            75,
        ),
        record(
            "Dental Implant Consultation",
            "Assessment and planning session for replacing missing teeth with implants.",
            "$200",
            "Implantologist",
            "Bring recent dental X-rays if available.",
            30,
        ),
        record(
            "Orthodontic Evaluation",
            "Evaluation for braces or clear aligners to correct tooth alignment.",
            "$150",
            "Orthodontist",
            "None required.",
            40,
        ),
        record(
            "Pediatric Checkup",
            "Gentle dental examination and cleaning for children.",
            "$95",
            "Pediatric Dentist",
            "None required.",
            30,
        ),
        record(
            "Emergency Toothache Visit",
            "Same-day examination and pain relief for acute dental pain.",
            "$180",
            "General Dentist",
            "Call ahead so the team can prepare for your arrival.",
            30,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_wiring() {
        let registry = registry("gpt-4o-mini", Arc::new(catalog())).unwrap();
        assert_eq!(registry.len(), 3);

        let entry = registry.entry();
        assert_eq!(entry.name, "Q&A Agent");
        assert!(entry.tool("retrieve").is_some());
        assert!(entry.tool("escalate_to_human").is_some());
        assert!(entry.tool("transfer_to_scheduling_agent").is_some());
        assert!(entry.tool("execute_scheduling").is_none());

        let scheduling = registry.get("Scheduling Assistant").unwrap();
        assert!(scheduling.tool("execute_scheduling").is_some());
        assert!(scheduling.tool("transfer_back_to_qa").is_some());

        let feedback = registry.get("Feedback Agent").unwrap();
        assert!(feedback.tool("collect_human_feedback").is_some());
    }

    #[tokio::test]
    async fn test_transfers_resolve_to_roster_instances() {
        use crate::tools::types::{ToolContext, ToolOutcome};

        let registry = registry("gpt-4o-mini", Arc::new(catalog())).unwrap();
        let qa = registry.entry();
        let scheduling = registry.get("Scheduling Assistant").unwrap();

        let transfer = qa.tool("transfer_to_scheduling_agent").unwrap();
        match transfer
            .execute(serde_json::Value::Null, &ToolContext::default())
            .await
        {
            ToolOutcome::Transfer(target) => assert!(Arc::ptr_eq(&target, &scheduling)),
            _ => panic!("expected transfer outcome"),
        }
    }

    #[test]
    fn test_catalog_has_records() {
        assert!(!catalog().is_empty());
    }
}
