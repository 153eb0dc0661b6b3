use crate::error::Result;
use crate::lang::{Lang, SourceLang};
use crate::record::TranslationRecord;
use crate::store::CacheStore;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<TranslationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in insertion order.
    pub async fn records(&self) -> Vec<TranslationRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn find_exact(
        &self,
        source_lang: SourceLang,
        target_lang: Lang,
        source_text: &str,
    ) -> Result<Option<TranslationRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.matches(source_lang, target_lang, source_text))
            .cloned())
    }

    async fn insert(&self, record: TranslationRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{NewTranslation, TranslationStatus};

    fn record(text: &str, translated: &str) -> TranslationRecord {
        TranslationRecord::create(NewTranslation {
            source_lang: SourceLang::Code(Lang::En),
            target_lang: Lang::Tr,
            source_text: text.to_string(),
            translated_text: translated.to_string(),
            detected_source_lang: None,
            provider: "Gemini".to_string(),
            model: "test".to_string(),
            status: TranslationStatus::Success,
        })
    }

    #[tokio::test]
    async fn test_find_returns_first_match() {
        let store = MemoryStore::new();
        store.insert(record("Hello", "Merhaba")).await.unwrap();
        store.insert(record("Hello", "Selam")).await.unwrap();

        let found = store
            .find_exact(SourceLang::Code(Lang::En), Lang::Tr, "Hello")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.translated_text, "Merhaba");
        assert_eq!(store.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_miss() {
        let store = MemoryStore::new();
        store.insert(record("Hello", "Merhaba")).await.unwrap();

        let found = store
            .find_exact(SourceLang::Auto, Lang::Tr, "Hello")
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
