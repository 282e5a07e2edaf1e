//! Multi-persona conversational assistant built on an OpenAI-compatible
//! function-calling API.
//!
//! A conversation is driven by a [`turn::TurnController`] over a roster of
//! [`agent::Persona`]s. Capabilities ([`tools::Tool`]) can answer with text,
//! hand the conversation to another persona, or request the end of the
//! session; the controller folds each outcome back into the history the
//! model sees.

pub mod agent;
pub mod ai;
pub mod config;
pub mod console;
pub mod demos;
pub mod http;
pub mod retrieval;
pub mod session;
pub mod tools;
pub mod turn;
pub mod workflow;
