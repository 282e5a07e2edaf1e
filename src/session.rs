//! Conversation session state.
//!
//! Owns the append-only history and the currently active persona. All
//! mutation happens through [`Session::push_user`] and [`Session::absorb`],
//! so a turn either lands fully or not at all.

use crate::agent::Persona;
use crate::ai::ChatEntry;
use crate::turn::TurnResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct Session {
    persona: Arc<Persona>,
    history: Vec<ChatEntry>,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(persona: Arc<Persona>) -> Self {
        Session {
            persona,
            history: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn persona(&self) -> Arc<Persona> {
        self.persona.clone()
    }

    pub fn history(&self) -> &[ChatEntry] {
        &self.history
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.history.push(ChatEntry::user(content));
    }

    /// Fold a completed turn into the session: append its entries, adopt the
    /// persona it ended on, and hand back any pending end-of-session request.
    pub fn absorb(&mut self, result: TurnResult) -> Option<String> {
        self.history.extend(result.entries);
        self.persona = result.persona;
        result.end_session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatRole;

    fn persona(name: &str) -> Arc<Persona> {
        Persona::new(name, "gpt-4o-mini", "instructions", vec![]).unwrap()
    }

    #[test]
    fn test_absorb_appends_entries_and_adopts_persona() {
        let qa = persona("Q&A Agent");
        let scheduling = persona("Scheduling Assistant");
        let mut session = Session::new(qa.clone());

        session.push_user("I need an appointment");
        let end = session.absorb(TurnResult {
            persona: scheduling.clone(),
            entries: vec![ChatEntry::assistant("What date works for you?")],
            end_session: None,
        });

        assert!(end.is_none());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, ChatRole::User);
        assert!(Arc::ptr_eq(&session.persona(), &scheduling));
    }

    #[test]
    fn test_absorb_surfaces_end_session() {
        let qa = persona("Q&A Agent");
        let mut session = Session::new(qa.clone());

        let end = session.absorb(TurnResult {
            persona: qa,
            entries: vec![],
            end_session: Some("needs a human".to_string()),
        });
        assert_eq!(end.as_deref(), Some("needs a human"));
    }
}
