use crate::error::{Result, TranscacheError};
use crate::lang::{Lang, SourceLang};
use crate::record::TranslationRecord;
use crate::store::CacheStore;
use async_trait::async_trait;
use redb::{
    Database, MultimapTableDefinition, ReadableMultimapTable, ReadableTable,
    ReadableTableMetadata, TableDefinition,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Record id → record JSON.
const RECORDS: TableDefinition<u128, &str> = TableDefinition::new("translations");

/// Cache key → ids of every record stored under it. Multimap values are kept
/// sorted, and ids are time-ordered, so the first id is the earliest insert.
const BY_KEY: MultimapTableDefinition<&str, u128> =
    MultimapTableDefinition::new("translations_by_key");

/// Durable store backed by a single redb file.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    path: PathBuf,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").field("path", &self.path).finish()
    }
}

fn storage(e: impl std::fmt::Display) -> TranscacheError {
    TranscacheError::Storage(e.to_string())
}

fn cache_key(source_lang: SourceLang, target_lang: Lang, source_text: &str) -> String {
    format!("{}\u{0}{}\u{0}{}", source_lang.as_str(), target_lang.code(), source_text)
}

impl RedbStore {
    /// Open the database at `path`, creating it and its parent directory if
    /// needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    TranscacheError::Storage(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        let db_path = path.clone();
        let db = tokio::task::spawn_blocking(move || -> Result<Database> {
            let db = Database::create(&db_path)
                .map_err(|e| TranscacheError::Storage(format!("{}: {}", db_path.display(), e)))?;

            let write_txn = db.begin_write().map_err(storage)?;
            {
                write_txn.open_table(RECORDS).map_err(storage)?;
                write_txn.open_multimap_table(BY_KEY).map_err(storage)?;
            }
            write_txn.commit().map_err(storage)?;
            Ok(db)
        })
        .await
        .map_err(storage)??;

        let store = Self {
            db: Arc::new(db),
            path,
        };
        info!(
            "Opened translation store at {} ({} records)",
            store.path.display(),
            store.len().await?
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || op(&db))
            .await
            .map_err(storage)?
    }
}

#[async_trait]
impl CacheStore for RedbStore {
    async fn find_exact(
        &self,
        source_lang: SourceLang,
        target_lang: Lang,
        source_text: &str,
    ) -> Result<Option<TranslationRecord>> {
        let key = cache_key(source_lang, target_lang, source_text);
        self.run_blocking(move |db| {
            let read_txn = db.begin_read().map_err(storage)?;
            let index = read_txn.open_multimap_table(BY_KEY).map_err(storage)?;

            let first_id = match index.get(key.as_str()).map_err(storage)?.next() {
                Some(id) => id.map_err(storage)?.value(),
                None => return Ok(None),
            };

            let records = read_txn.open_table(RECORDS).map_err(storage)?;
            match records.get(first_id).map_err(storage)? {
                Some(json) => Ok(Some(serde_json::from_str(json.value())?)),
                None => Err(TranscacheError::Storage(format!(
                    "index points at missing record {:032x}",
                    first_id
                ))),
            }
        })
        .await
    }

    async fn insert(&self, record: TranslationRecord) -> Result<()> {
        let key = cache_key(record.source_lang, record.target_lang, &record.source_text);
        let id = record.id.as_u128();
        let json = serde_json::to_string(&record)?;

        self.run_blocking(move |db| {
            let write_txn = db.begin_write().map_err(storage)?;
            {
                let mut records = write_txn.open_table(RECORDS).map_err(storage)?;
                records.insert(id, json.as_str()).map_err(storage)?;

                let mut index = write_txn.open_multimap_table(BY_KEY).map_err(storage)?;
                index.insert(key.as_str(), id).map_err(storage)?;
            }
            write_txn.commit().map_err(storage)?;
            Ok(())
        })
        .await?;

        debug!("Stored record {}", record.id);
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        self.run_blocking(|db| {
            let read_txn = db.begin_read().map_err(storage)?;
            let records = read_txn.open_table(RECORDS).map_err(storage)?;
            let count = records.len().map_err(storage)?;
            Ok(count as usize)
        })
        .await
    }
}
