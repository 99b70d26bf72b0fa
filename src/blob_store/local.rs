use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use super::{BlobStore, BlobStoreError};

/// Local filesystem blob store.
pub struct LocalStore {
    base_path: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

#[async_trait]
impl BlobStore for LocalStore {
    async fn put(&self, key: &str, data: Bytes) -> Result<(), BlobStoreError> {
        let path = self.blob_path(key);
        tokio::fs::write(&path, &data).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, BlobStoreError> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Err(BlobStoreError::NotFound(key.to_string()));
        }
        let data = tokio::fs::read(&path).await?;
        Ok(Bytes::from(data))
    }

    async fn purge_all(&self) -> Result<(), BlobStoreError> {
        if self.base_path.exists() {
            tokio::fs::remove_dir_all(&self.base_path).await?;
        }
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }
}
