//! Persistent lookup of earlier translations.

pub mod memory;
pub mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::error::Result;
use crate::lang::{Lang, SourceLang};
use crate::record::TranslationRecord;
use async_trait::async_trait;

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// First stored record with exactly this key, regardless of status.
    async fn find_exact(
        &self,
        source_lang: SourceLang,
        target_lang: Lang,
        source_text: &str,
    ) -> Result<Option<TranslationRecord>>;

    /// Append a record. Existing records with the same key are kept.
    async fn insert(&self, record: TranslationRecord) -> Result<()>;

    async fn len(&self) -> Result<usize>;
}
