//! Generation invocation — the single fault-containment point around the
//! provider call.
//!
//! Any provider-level failure (timeout, rate limit, bad credentials,
//! context length) is caught here and converted into a result carrying an
//! error string, so the rest of the pipeline sees one success/failure
//! signal instead of heterogeneous error types.

use setforge_core::provider::{PromptDocument, TextGenerationProvider};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Wall-clock milliseconds for the phases the invoker owns.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokerTimings {
    pub input_format_ms: u64,
    pub provider_call_ms: u64,
}

/// The raw outcome of one provider invocation.
///
/// Exactly one of `text` / `error` is set.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    pub text: Option<String>,
    pub error: Option<String>,
    pub timings: InvokerTimings,
}

/// Sends a compiled document to the provider and measures latency.
pub struct GenerationInvoker {
    provider: Arc<dyn TextGenerationProvider>,
}

impl GenerationInvoker {
    pub fn new(provider: Arc<dyn TextGenerationProvider>) -> Self {
        Self { provider }
    }

    /// Invoke the provider with the document's two role-tagged blocks.
    pub async fn invoke(&self, document: &PromptDocument) -> InvocationResult {
        let format_start = Instant::now();
        let messages = document.messages();
        let input_format_ms = format_start.elapsed().as_millis() as u64;

        debug!(
            provider = self.provider.name(),
            system_len = document.system.len(),
            user_len = document.user.len(),
            "Invoking text generation provider"
        );

        let call_start = Instant::now();
        let result = self.provider.invoke(messages).await;
        let provider_call_ms = call_start.elapsed().as_millis() as u64;

        let timings = InvokerTimings {
            input_format_ms,
            provider_call_ms,
        };

        match result {
            Ok(text) => {
                debug!(
                    provider = self.provider.name(),
                    response_len = text.len(),
                    provider_call_ms,
                    "Provider reply received"
                );
                InvocationResult {
                    text: Some(text),
                    error: None,
                    timings,
                }
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Provider invocation failed");
                InvocationResult {
                    text: None,
                    error: Some(e.to_string()),
                    timings,
                }
            }
        }
    }
}
