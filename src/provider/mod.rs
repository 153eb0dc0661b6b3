pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Ways a provider call can fail. The translator treats all of them as a
/// single "provider failure" outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider credential is not set")]
    MissingCredential,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    InvalidBody(String),

    #[error("provider returned an empty response")]
    EmptyResponse,

    #[error("provider call timed out after {0}s")]
    Timeout(u64),
}

#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Send a prompt and return the raw generated text.
    async fn generate_content(
        &self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> std::result::Result<String, ProviderError>;

    fn name(&self) -> &'static str;

    /// Default model used when no override is given.
    fn model(&self) -> &str;
}
