//! Persisted translation records.

use crate::lang::{Lang, SourceLang};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TranslationStatus {
    Success,
    Failed,
}

impl std::fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationStatus::Success => write!(f, "SUCCESS"),
            TranslationStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// One translation attempt. Records are append-only and never modified
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub id: Uuid,
    pub source_lang: SourceLang,
    pub target_lang: Lang,
    pub source_text: String,
    pub translated_text: String,
    /// Set only for auto-detect requests.
    pub detected_source_lang: Option<String>,
    pub provider: String,
    pub model: String,
    pub status: TranslationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a record about to be created.
#[derive(Debug, Clone)]
pub struct NewTranslation {
    pub source_lang: SourceLang,
    pub target_lang: Lang,
    pub source_text: String,
    pub translated_text: String,
    pub detected_source_lang: Option<String>,
    pub provider: String,
    pub model: String,
    pub status: TranslationStatus,
}

impl TranslationRecord {
    pub fn create(new: NewTranslation) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            source_lang: new.source_lang,
            target_lang: new.target_lang,
            source_text: new.source_text,
            translated_text: new.translated_text,
            detected_source_lang: new.detected_source_lang,
            provider: new.provider,
            model: new.model,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this record answers a lookup for the given key.
    pub fn matches(&self, source_lang: SourceLang, target_lang: Lang, source_text: &str) -> bool {
        self.source_lang == source_lang
            && self.target_lang == target_lang
            && self.source_text == source_text
    }
}
