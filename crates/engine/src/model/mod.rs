//! Model service abstraction and implementations

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use complexity_common::Result;

/// A text-generation service that answers a single prompt.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Provider name for logging/identification
    fn name(&self) -> &str;

    /// Model identifier requests are sent to
    fn model(&self) -> &str;

    /// Whether a credential is available. Requests fail without one.
    fn has_credential(&self) -> bool;

    /// Submit `prompt` and return the first text part of the first candidate.
    ///
    /// One attempt, no retry, no streaming.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
