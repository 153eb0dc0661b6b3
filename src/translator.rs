//! Cached translation: look up, call the provider on a miss, always record.

use crate::config::Config;
use crate::error::Result;
use crate::lang::SourceLang;
use crate::parse::parse_response;
use crate::prompt::build_prompt;
use crate::provider::{ProviderClient, ProviderError};
use crate::record::{NewTranslation, TranslationRecord, TranslationStatus};
use crate::request::{TranslateResponse, TranslationRequest};
use crate::store::CacheStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Text returned and stored when the provider could not produce a translation.
pub const FAILURE_SENTINEL: &str = "[Translation failed]";

/// Result of a provider round trip, after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Outcome {
    translated_text: String,
    detected_source_lang: Option<String>,
    status: TranslationStatus,
}

impl Outcome {
    fn failed() -> Self {
        Self {
            translated_text: FAILURE_SENTINEL.to_string(),
            detected_source_lang: None,
            status: TranslationStatus::Failed,
        }
    }
}

pub struct TranslationService {
    provider: Arc<dyn ProviderClient>,
    store: Arc<dyn CacheStore>,
    provider_label: String,
    model_override: Option<String>,
    timeout: Duration,
}

impl TranslationService {
    pub fn new(
        provider: Arc<dyn ProviderClient>,
        store: Arc<dyn CacheStore>,
        config: &Config,
    ) -> Self {
        Self {
            provider,
            store,
            provider_label: config.provider_label.clone(),
            model_override: None,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Ask the provider for `model` instead of its default on every call.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    /// Model named in stored records: the override, else the provider default.
    pub fn model(&self) -> &str {
        self.model_override
            .as_deref()
            .unwrap_or_else(|| self.provider.model())
    }

    /// Bound each provider call; a call that exceeds it counts as failed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Translate `request`, serving an identical earlier request from the store.
    ///
    /// Provider failures do not produce an error: the caller gets
    /// [`FAILURE_SENTINEL`] and a `FAILED` record is stored. Errors are
    /// returned only for a request that breaks the source-language rule, or
    /// when the store cannot be read or written.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslateResponse> {
        request.check_invariant()?;

        let source_lang = SourceLang::resolve(request.source_lang);
        info!(
            "Translating {} chars {} -> {}",
            request.text.chars().count(),
            source_lang,
            request.target_lang
        );

        if let Some(cached) = self
            .store
            .find_exact(source_lang, request.target_lang, &request.text)
            .await?
        {
            info!("Cache hit ({}), returning stored translation", cached.status);
            return Ok(TranslateResponse {
                translated_text: cached.translated_text,
                from_cache: true,
            });
        }

        let outcome = match self.call_provider(request).await {
            Ok(raw) => {
                let parsed = parse_response(&raw, request.auto_detect);
                Outcome {
                    detected_source_lang: parsed.detected_source_lang(request.auto_detect),
                    translated_text: parsed.into_translated_text(),
                    status: TranslationStatus::Success,
                }
            }
            Err(e) => {
                warn!("{} call failed: {}", self.provider.name(), e);
                Outcome::failed()
            }
        };

        let record = TranslationRecord::create(NewTranslation {
            source_lang,
            target_lang: request.target_lang,
            source_text: request.text.clone(),
            translated_text: outcome.translated_text.clone(),
            detected_source_lang: outcome.detected_source_lang,
            provider: self.provider_label.clone(),
            model: self.model().to_string(),
            status: outcome.status,
        });
        self.store.insert(record).await?;

        Ok(TranslateResponse {
            translated_text: outcome.translated_text,
            from_cache: false,
        })
    }

    async fn call_provider(
        &self,
        request: &TranslationRequest,
    ) -> std::result::Result<String, ProviderError> {
        let prompt = build_prompt(
            &request.text,
            request.target_lang,
            request.source_lang,
            request.auto_detect,
        );
        debug!("Prompt is {} bytes", prompt.len());

        let call = self
            .provider
            .generate_content(&prompt, self.model_override.as_deref());
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout.as_secs())),
        }
    }
}
