//! Gemini `generateContent` collaborator.
//!
//! [`GeminiClient`] implements both [`QuestionSource`](hr_trainer::upstream::QuestionSource)
//! and [`IntelligenceSource`](hr_trainer::upstream::IntelligenceSource). Every response is
//! requested as JSON against a response schema and then run through the core crate's
//! validated decode before anything else sees it.

mod client;
mod prompts;
mod schema;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiApiKey, GeminiClient, GeminiConfig};
