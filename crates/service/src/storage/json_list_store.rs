use std::{marker::PhantomData, path::{Path, PathBuf}};
use tokio::fs;
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// The file holds a top-level JSON array of `T` and nothing else. Every
/// `load` reads and parses the whole file; every `save` rewrites it in full.
/// Nothing is cached between calls, so the file stays the only source of truth.
#[derive(Debug, Clone)]
pub struct JsonListStore<T> {
    file_path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Create the parent directory and an empty `[]` file if the file is absent.
    /// Returns whether a file was created.
    pub async fn init_if_missing(&self) -> Result<bool, ServiceError> {
        if fs::metadata(&self.file_path).await.is_ok() {
            return Ok(false);
        }
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }
        self.save(&[]).await?;
        Ok(true)
    }

    /// Read the full collection. A missing file and an unparsable file are
    /// both reported as `ServiceError::Storage`.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = fs::read(&self.file_path).await.map_err(|e| {
            ServiceError::Storage(format!("read {}: {}", self.file_path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::Storage(format!("parse {}: {}", self.file_path.display(), e))
        })
    }

    /// Serialize the full collection and replace the file with it.
    ///
    /// Bytes go to `<file>.tmp` first and are renamed over the target, so a
    /// reader sees either the old or the new collection.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, &data).await.map_err(|e| {
            ServiceError::Storage(format!("write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.file_path).await.map_err(|e| {
            ServiceError::Storage(format!("rename onto {}: {}", self.file_path.display(), e))
        })?;
        debug!(path = %self.file_path.display(), bytes = data.len(), "collection written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}
