//! Gemini text generation over the Generative Language REST API.

use crate::config::Config;
use crate::provider::{ProviderClient, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    api_version: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client. A missing key is reported on each call.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Client for the configured endpoint. Call duration is bounded by the
    /// caller, so no transport timeout is set here.
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            api_version: config.gemini_api_version.clone(),
            model: config.gemini_model.clone(),
        }
    }

    /// Point the client at a different host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    fn endpoint(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/{}/models/{}:generateContent?key={}",
            self.base_url, self.api_version, model, api_key
        )
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize, Debug)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Deserialize, Debug)]
struct GeminiResponseContent {
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Deserialize, Debug)]
struct GeminiResponsePart {
    text: Option<String>,
}

/// First non-empty text part of the first candidate, trimmed.
fn extract_text(response: GeminiResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .filter_map(|p| p.text)
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
}

#[async_trait]
impl ProviderClient for GeminiClient {
    async fn generate_content(
        &self,
        prompt: &str,
        model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingCredential)?;

        let model = model_override.unwrap_or(&self.model);
        debug!("Calling Gemini model {} ({} byte prompt)", model, prompt.len());

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(model, api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        let gemini_response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidBody(e.to_string()))?;

        let text = extract_text(gemini_response).ok_or(ProviderError::EmptyResponse)?;
        debug!("Gemini returned {} bytes of text", text.len());
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
