//! File-backed store
//!
//! Keeps every key in a single JSON document. The document is loaded once when
//! the store is opened; each write rewrites the whole file through a temporary
//! file and a rename, and only then updates the in-memory copy.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::debug;

use super::Memento;
use crate::error::{CacheError, Result};

/// `Memento` persisted as a JSON document on disk.
#[derive(Debug)]
pub struct FileMemento {
    path: PathBuf,
    document: RwLock<Map<String, Value>>,
    /// Serializes file rewrites so a slower write cannot clobber a newer one
    write_lock: Mutex<()>,
}

impl FileMemento {
    /// Opens the store at `path`. A missing or empty file yields an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let document = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Map::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                CacheError::Store(format!("unreadable state file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = document.len(), "opened file store");

        Ok(Self {
            path,
            document: RwLock::new(document),
            write_lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn poisoned() -> CacheError {
        CacheError::Store("file store lock poisoned".to_string())
    }
}

/// Writes `bytes` to `temp`, then renames it over `target`.
async fn replace_file(temp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(temp, bytes).await?;
    tokio::fs::rename(temp, target).await
}

#[async_trait]
impl Memento for FileMemento {
    fn read(&self, key: &str, default: Value) -> Result<Value> {
        let document = self.document.read().map_err(|_| Self::poisoned())?;
        Ok(document.get(key).cloned().unwrap_or(default))
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        // Staged copy is committed only once the file is in place
        let (staged, bytes) = {
            let document = self.document.read().map_err(|_| Self::poisoned())?;
            let mut staged = document.clone();
            staged.insert(key.to_string(), value);
            let bytes = serde_json::to_vec_pretty(&staged)?;
            (staged, bytes)
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp = self.temp_path();
        if let Err(e) = replace_file(&temp, &self.path, &bytes).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        *self.document.write().map_err(|_| Self::poisoned())? = staged;

        debug!(path = %self.path.display(), key, bytes = bytes.len(), "file store written");
        Ok(())
    }

    fn list_keys(&self) -> Vec<String> {
        self.document
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect()
    }
}
