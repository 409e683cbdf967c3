//! # translatable-providers
//!
//! Translator implementations for Translatable.

mod client;
pub mod ollama;
pub mod openai;
mod prompt;

pub use ollama::OllamaTranslator;
pub use openai::OpenAiTranslator;
