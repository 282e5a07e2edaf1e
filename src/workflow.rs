//! Two-step joke workflow: generate, collect human feedback, critique.
//!
//! Uses plain text completion; no capability schemas are involved.

use crate::ai::{AiError, ChatEntry, ModelClient};
use std::sync::Arc;

pub struct JokeFlow {
    client: Arc<dyn ModelClient>,
    model: String,
}

impl JokeFlow {
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        JokeFlow {
            client,
            model: model.into(),
        }
    }

    pub async fn generate_joke(&self, topic: &str) -> Result<String, AiError> {
        let prompt = format!("Write your best joke about {}.", topic);
        self.client
            .generate_text(&self.model, &[ChatEntry::user(prompt)])
            .await
    }

    pub async fn critique_joke(&self, joke: &str, feedback: &str) -> Result<String, AiError> {
        let prompt = format!(
            "Critique the following joke: {} based on feedback: {}",
            joke, feedback
        );
        self.client
            .generate_text(&self.model, &[ChatEntry::user(prompt)])
            .await
    }
}
