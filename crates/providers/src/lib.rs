//! Text-generation provider implementations for setforge.
//!
//! All providers implement the `setforge_core::TextGenerationProvider`
//! trait; the pipeline receives one by explicit injection.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
