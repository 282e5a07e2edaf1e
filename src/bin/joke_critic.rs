use concierge::ai::OpenAiClient;
use concierge::config::Config;
use concierge::console::{Console, StdioConsole};
use concierge::workflow::JokeFlow;
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

    let topic = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "chemistry".to_string());

    let flow = JokeFlow::new(client, &config.model);
    let console = StdioConsole;

    let joke = flow
        .generate_joke(&topic)
        .await
        .expect("Failed to generate joke");

    let feedback = console.ask(&format!(
        "Generated joke: {}. Please provide feedback: ",
        joke
    ));

    let critique = flow
        .critique_joke(&joke, &feedback)
        .await
        .expect("Failed to critique joke");
    console.say(&format!("Critique result: {}", critique));
}
