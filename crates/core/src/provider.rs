//! TextGenerationProvider trait — the abstraction over the generative
//! text service, the only network boundary in the system.
//!
//! A provider takes role-tagged text blocks and returns the model's raw
//! textual reply. Everything downstream treats that reply as untrusted,
//! semi-structured input.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The role of a prompt text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    /// Instructions (identity, rules, output schema)
    System,
    /// The session's data payload
    User,
}

/// A single role-tagged text block sent to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// A compiled instruction document: one system block and one user block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDocument {
    /// Role statement, rules, and the literal output schema
    pub system: String,
    /// The session's narrated constraint data
    pub user: String,
}

impl PromptDocument {
    /// The document as the two-message wire shape providers consume.
    pub fn messages(&self) -> Vec<PromptMessage> {
        vec![
            PromptMessage::system(&self.system),
            PromptMessage::user(&self.user),
        ]
    }
}

/// The text-generation contract.
///
/// Implementations wrap a concrete service (OpenAI-compatible endpoint,
/// test double, etc.). The pipeline calls `invoke` without knowing which —
/// pure polymorphism, injected explicitly rather than held in ambient
/// module state.
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send the prompt and return the model's raw textual reply.
    async fn invoke(
        &self,
        messages: Vec<PromptMessage>,
    ) -> std::result::Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_to_messages() {
        let doc = PromptDocument {
            system: "You are a coordinator.".into(),
            user: "## Clients:\n- Hilary".into(),
        };
        let messages = doc.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, PromptRole::System);
        assert_eq!(messages[1].role, PromptRole::User);
        assert!(messages[1].content.contains("Hilary"));
    }

    #[test]
    fn role_serialization_is_lowercase() {
        let json = serde_json::to_string(&PromptRole::System).unwrap();
        assert_eq!(json, "\"system\"");
    }
}
