use super::*;
use crate::ai::types::AiResponse;
use crate::ai::{ChatRole, MockAiClient};
use crate::console::ScriptedConsole;
use crate::tools::builtin::{EscalateToHumanTool, TransferTool};
use crate::tools::registry::Tool;
use crate::tools::types::ToolDefinition;
use async_trait::async_trait;
use serde_json::{json, Value};

struct EchoTool {
    definition: ToolDefinition,
}

impl EchoTool {
    fn new(name: &str) -> Arc<Self> {
        let definition = ToolDefinition::new(name, "Echo back the supplied text.")
            .with_param("text", "string", "Text to echo.")
            .unwrap();
        Arc::new(EchoTool { definition })
    }
}

#[async_trait]
impl Tool for EchoTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> ToolOutcome {
        match params.get("text").and_then(Value::as_str) {
            Some(text) => ToolOutcome::text(format!("echo: {}", text)),
            None => ToolOutcome::error("Invalid parameters: missing field `text`".to_string()),
        }
    }
}

fn scripted_controller(responses: Vec<AiResponse>) -> (TurnController, Arc<MockAiClient>) {
    let client = Arc::new(MockAiClient::new(responses));
    let context = ToolContext {
        console: Arc::new(ScriptedConsole::new(vec![])),
    };
    (TurnController::new(client.clone(), context), client)
}

fn call(id: &str, name: &str, arguments: Value) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

#[tokio::test]
async fn test_plain_reply_produces_one_entry() {
    let (controller, client) =
        scripted_controller(vec![AiResponse::text("We open at 9am.".to_string())]);
    let persona = Persona::new("Q&A Agent", "gpt-4o-mini", "Answer questions.", vec![]).unwrap();

    let result = controller
        .run_full_turn(persona.clone(), &[ChatEntry::user("When do you open?")])
        .await
        .unwrap();

    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].role, ChatRole::Assistant);
    assert_eq!(result.entries[0].content, "We open at 9am.");
    assert!(result.end_session.is_none());
    assert!(Arc::ptr_eq(&result.persona, &persona));

    let requests = client.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system.as_deref(), Some("Answer questions."));
    // system + user entry
    assert_eq!(requests[0].entry_count, 2);
}

#[tokio::test]
async fn test_tool_calls_execute_in_request_order() {
    let (controller, _client) = scripted_controller(vec![
        AiResponse::with_tools(
            String::new(),
            vec![
                call("call_1", "echo", json!({"text": "first"})),
                call("call_2", "echo", json!({"text": "second"})),
            ],
        ),
        AiResponse::text("Done.".to_string()),
    ]);
    let persona = Persona::new(
        "Q&A Agent",
        "gpt-4o-mini",
        "Answer questions.",
        vec![EchoTool::new("echo")],
    )
    .unwrap();

    let result = controller
        .run_full_turn(persona, &[ChatEntry::user("Echo twice")])
        .await
        .unwrap();

    // assistant(tool_calls) + two tool results + final assistant
    assert_eq!(result.entries.len(), 4);
    assert_eq!(result.entries[1].role, ChatRole::Tool);
    assert_eq!(result.entries[1].content, "echo: first");
    assert_eq!(result.entries[1].tool_call_id.as_deref(), Some("call_1"));
    assert_eq!(result.entries[2].content, "echo: second");
    assert_eq!(result.entries[3].content, "Done.");
}

#[tokio::test]
async fn test_transfer_switches_persona_for_next_round_trip() {
    let (controller, client) = scripted_controller(vec![
        AiResponse::with_tools(
            String::new(),
            vec![call("call_1", "transfer_to_scheduling_agent", json!({}))],
        ),
        AiResponse::text("Let's book your appointment.".to_string()),
    ]);

    let scheduling = Persona::new(
        "Scheduling Assistant",
        "gpt-4o-mini",
        "Book appointments.",
        vec![],
    )
    .unwrap();
    let transfer = TransferTool::new("transfer_to_scheduling_agent", "Scheduling related.");
    transfer.wire(scheduling.clone());
    let qa = Persona::new(
        "Q&A Agent",
        "gpt-4o-mini",
        "Answer questions.",
        vec![transfer],
    )
    .unwrap();

    let result = controller
        .run_full_turn(qa, &[ChatEntry::user("I need an appointment")])
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&result.persona, &scheduling));
    assert_eq!(
        result.entries[1].content,
        "Transferred to Scheduling Assistant. Adopt persona immediately."
    );
    assert!(!result.entries[1].is_error);

    // The second round trip must run under the scheduling persona's prompt.
    let requests = client.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].system.as_deref(), Some("Answer questions."));
    assert_eq!(requests[1].system.as_deref(), Some("Book appointments."));
    assert!(requests[1].tool_names.is_empty());
}

#[tokio::test]
async fn test_unknown_tool_is_surfaced_not_fatal() {
    let (controller, _client) = scripted_controller(vec![
        AiResponse::with_tools(
            String::new(),
            vec![call("call_1", "format_hard_drive", json!({}))],
        ),
        AiResponse::text("I can't do that.".to_string()),
    ]);
    let persona = Persona::new("Q&A Agent", "gpt-4o-mini", "Answer questions.", vec![]).unwrap();

    let result = controller
        .run_full_turn(persona, &[ChatEntry::user("Do something odd")])
        .await
        .unwrap();

    assert!(result.entries[1].is_error);
    assert_eq!(
        result.entries[1].content,
        "Unknown tool 'format_hard_drive' for agent 'Q&A Agent'"
    );
    assert_eq!(result.entries[2].content, "I can't do that.");
}

#[tokio::test]
async fn test_malformed_arguments_become_error_result() {
    let (controller, _client) = scripted_controller(vec![
        AiResponse::with_tools(
            String::new(),
            vec![call("call_1", "echo", json!({"wrong": true}))],
        ),
        AiResponse::text("Sorry about that.".to_string()),
    ]);
    let persona = Persona::new(
        "Q&A Agent",
        "gpt-4o-mini",
        "Answer questions.",
        vec![EchoTool::new("echo")],
    )
    .unwrap();

    let result = controller
        .run_full_turn(persona, &[ChatEntry::user("Echo")])
        .await
        .unwrap();

    assert!(result.entries[1].is_error);
    assert!(result.entries[1].content.starts_with("Invalid parameters:"));
}

#[tokio::test]
async fn test_escalation_requests_session_end_after_reply() {
    let (controller, _client) = scripted_controller(vec![
        AiResponse::with_tools(
            String::new(),
            vec![call(
                "call_1",
                "escalate_to_human",
                json!({"summary": "Angry customer, refund dispute"}),
            )],
        ),
        AiResponse::text("A human agent will take over shortly.".to_string()),
    ]);
    let persona = Persona::new(
        "Issues and Repairs Agent",
        "gpt-4o-mini",
        "Handle issues.",
        vec![EscalateToHumanTool::new()],
    )
    .unwrap();

    let result = controller
        .run_full_turn(persona, &[ChatEntry::user("Get me a human")])
        .await
        .unwrap();

    assert_eq!(
        result.end_session.as_deref(),
        Some("Angry customer, refund dispute")
    );
    // The model still got to produce its closing reply.
    assert_eq!(
        result.entries.last().unwrap().content,
        "A human agent will take over shortly."
    );
}

#[tokio::test]
async fn test_model_failure_aborts_turn() {
    let (controller, _client) = scripted_controller(vec![]);
    let persona = Persona::new("Q&A Agent", "gpt-4o-mini", "Answer questions.", vec![]).unwrap();

    let err = controller
        .run_full_turn(persona, &[ChatEntry::user("Hello")])
        .await
        .unwrap_err();
    assert!(err.message.contains("no responses left"));
}
