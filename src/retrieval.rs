//! Lightweight in-process retrieval over a service catalog.
//!
//! Scoring is plain term overlap between the query and each record's text.
//! Good enough for a demo catalog of a few dozen records; swap in a real
//! index behind [`Retriever`] if the corpus ever grows.

use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub enum RetrievalError {
    /// The catalog has no records to search
    EmptyCatalog,
}

impl fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalError::EmptyCatalog => write!(f, "service catalog is empty"),
        }
    }
}

impl std::error::Error for RetrievalError {}

/// Retrieval collaborator: returns up to `top_k` snippets for a query.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, RetrievalError>;
}

/// One offered service, rendered as a snippet for the model.
#[derive(Debug, Clone)]
pub struct ServiceRecord {
    pub name: String,
    pub description: String,
    pub price: String,
    pub specialist: String,
    pub preparation: String,
    pub duration_mins: u32,
}

impl ServiceRecord {
    pub fn snippet(&self) -> String {
        format!(
            "Service: {}\nDescription: {}\nPrice: {}\nSpecialist: {}\nPreparation: {}\nDuration: {} minutes.",
            self.name,
            self.description,
            self.price,
            self.specialist,
            self.preparation,
            self.duration_mins
        )
    }

    fn terms(&self) -> HashSet<String> {
        tokenize(&format!("{} {}", self.name, self.description))
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// In-memory catalog scored by term overlap.
pub struct ServiceCatalog {
    records: Vec<ServiceRecord>,
}

impl ServiceCatalog {
    pub fn new(records: Vec<ServiceRecord>) -> Self {
        ServiceCatalog { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl Retriever for ServiceCatalog {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, RetrievalError> {
        if self.records.is_empty() {
            return Err(RetrievalError::EmptyCatalog);
        }

        let query_terms = tokenize(query);
        let mut scored: Vec<(usize, &ServiceRecord)> = self
            .records
            .iter()
            .map(|record| {
                let overlap = record.terms().intersection(&query_terms).count();
                (overlap, record)
            })
            .collect();

        // Stable sort keeps catalog order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .filter(|(score, _)| *score > 0)
            .take(top_k)
            .map(|(_, record)| record.snippet())
            .collect())
    }
}
