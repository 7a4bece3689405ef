//! File-based DocumentStore implementation.

use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::fs;

use super::traits::{ensure_object, rank_by_field, validate_key};
use super::{DocumentStore, Result, StoreError};

/// File-based implementation of DocumentStore.
///
/// # File Format
///
/// Each document is stored as pretty-printed JSON at
/// `{base_dir}/{collection}/{key}.json`. Every write goes to its own temp
/// file in the collection directory and is renamed into place, so a reader
/// never observes a half-written save and concurrent writers to one key
/// never share a temp file. The last rename wins.
pub struct FileDocumentStore {
    base_dir: PathBuf,
}

impl FileDocumentStore {
    /// Create a new file-based store rooted at `base_dir`.
    pub async fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        validate_key(collection)?;
        Ok(self.base_dir.join(collection))
    }

    fn document_path(&self, collection: &str, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.collection_dir(collection)?.join(format!("{key}.json")))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<()> {
        ensure_object(collection, key, &document)?;
        let path = self.document_path(collection, key)?;
        let dir = self.collection_dir(collection)?;

        fs::create_dir_all(&dir).await?;
        let bytes = serde_json::to_vec_pretty(&document)?;
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, &bytes))
            .await
            .map_err(io::Error::other)??;

        tracing::debug!("Stored {}/{} at {}", collection, key, path.display());
        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let path = self.document_path(collection, key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn top_n(&self, collection: &str, sort_field: &str, n: usize) -> Result<Vec<Value>> {
        let dir = self.collection_dir(collection)?;
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path).await?;
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(document) => documents.push(document),
                Err(err) => {
                    tracing::warn!("Skipping unreadable document {}: {}", path.display(), err)
                }
            }
        }

        Ok(rank_by_field(documents, sort_field, n))
    }
}

/// Writes `bytes` to a uniquely named temp file in `dir`, then renames it
/// over `target`.
fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileDocumentStore::open(dir.path()).await.unwrap();
            store
                .put("leaderboard", "u1", json!({"uid": "u1", "coins": 3}))
                .await
                .unwrap();
        }
        let store = FileDocumentStore::open(dir.path()).await.unwrap();
        let doc = store.get("leaderboard", "u1").await.unwrap().unwrap();
        assert_eq!(doc["coins"], 3);
        assert!(dir.path().join("leaderboard/u1.json").exists());
        assert!(!dir.path().join("leaderboard/u1.json.tmp").exists());
    }

    #[tokio::test]
    async fn top_n_orders_files_by_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDocumentStore::open(dir.path()).await.unwrap();
        for (uid, coins) in [("a", 10), ("b", 30), ("c", 20)] {
            store
                .put("leaderboard", uid, json!({"uid": uid, "coins": coins}))
                .await
                .unwrap();
        }
        let top = store.top_n("leaderboard", "coins", 2).await.unwrap();
        assert_eq!(top[0]["uid"], "b");
        assert_eq!(top[1]["uid"], "c");
        assert!(store.top_n("missing", "coins", 5).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writes_to_one_key_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FileDocumentStore::open(dir.path()).await.unwrap());
        let padding = "#".repeat(100_000);

        let mut writers = tokio::task::JoinSet::new();
        for energy in 0..32 {
            let store = store.clone();
            let padding = padding.clone();
            writers.spawn(async move {
                store
                    .put(
                        "gameState",
                        "u1",
                        json!({"energy": energy, "padding": padding}),
                    )
                    .await
            });
        }
        while let Some(joined) = writers.join_next().await {
            joined.unwrap().unwrap();
        }

        let saved = store.get("gameState", "u1").await.unwrap().unwrap();
        assert!(saved["energy"].as_u64().unwrap() < 32);
        assert_eq!(saved["padding"].as_str().unwrap().len(), 100_000);
        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("gameState"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("u1.json")]);
    }

    #[tokio::test]
    async fn missing_document_is_none_and_bad_keys_fail() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDocumentStore::open(dir.path()).await.unwrap();
        assert!(store.get("gameState", "nobody").await.unwrap().is_none());
        assert!(matches!(
            store.get("gameState", "../escape").await,
            Err(StoreError::InvalidKey(_))
        ));
    }
}
