use std::env;

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub endpoint: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set"),
            endpoint: env::var("OPENAI_ENDPOINT").ok(),
            model: env::var("CONCIERGE_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            max_tokens: env::var("CONCIERGE_MAX_TOKENS")
                .unwrap_or_else(|_| "4096".to_string())
                .parse()
                .expect("CONCIERGE_MAX_TOKENS must be a valid number"),
        }
    }
}
