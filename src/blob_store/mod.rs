mod local;

pub use local::LocalStore;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Blob not found: {0}")]
    NotFound(String),
}

/// Abstraction over blob storage backends.
/// Keys are filenames -- the raw bytes are meaningless without the image rows.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, data: Bytes) -> Result<(), BlobStoreError>;
    async fn get(&self, key: &str) -> Result<Bytes, BlobStoreError>;
    /// Drop every stored blob. Runs as part of the destructive read, after
    /// the winning request has already copied the bytes it will serve.
    async fn purge_all(&self) -> Result<(), BlobStoreError>;
}
