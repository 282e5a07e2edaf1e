use concierge::ai::OpenAiClient;
use concierge::config::Config;
use concierge::console::{Console, StdioConsole};
use concierge::demos::clinic;
use concierge::session::Session;
use concierge::tools::types::ToolContext;
use concierge::turn::TurnController;
use dotenv::dotenv;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let client = Arc::new(
        OpenAiClient::new(&config.api_key, config.endpoint.as_deref(), config.max_tokens)
            .expect("Failed to build model client"),
    );

    let catalog = Arc::new(clinic::catalog());
    let registry =
        clinic::registry(&config.model, catalog).expect("Failed to build clinic roster");
    log::info!("[MAIN] Loaded {} personas", registry.len());

    let console: Arc<dyn Console> = Arc::new(StdioConsole);
    let controller = TurnController::new(
        client,
        ToolContext {
            console: console.clone(),
        },
    );
    let mut session = Session::new(registry.entry());

    loop {
        let input = console.ask("User: ");
        if input.trim().is_empty() {
            continue;
        }
        session.push_user(input);

        let result = match controller
            .run_full_turn(session.persona(), session.history())
            .await
        {
            Ok(result) => result,
            Err(e) => {
                log::error!("[MAIN] Turn failed: {}", e);
                console.say("Sorry, something went wrong. Please try again.");
                continue;
            }
        };

        if let Some(summary) = session.absorb(result) {
            log::info!("[MAIN] Session ended by escalation: {}", summary);
            break;
        }
    }
}
