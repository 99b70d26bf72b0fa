//! record-manager - A small record-keeping API for users, their internet
//! credentials, and a drop-box image slot
//!
//! This crate provides:
//! - User accounts paired one-to-one with an "internet" credential record
//! - PBKDF2-hashed account passwords with constant-time verification
//! - redb embedded database for records (ACID, MVCC, crash-safe)
//! - A single-slot image box: uploads overwrite one file, a fetch drains it

pub mod api;
pub mod auth;
pub mod blob_store;
pub mod config;
pub mod storage;

use std::sync::Arc;

use config::Config;
use storage::Database;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub blob_store: Arc<dyn blob_store::BlobStore>,
    /// Serializes the image routes. Upload and fetch-and-purge both span a
    /// blob write and a table write, and the blob name is fixed, so the two
    /// must never interleave.
    pub image_lock: tokio::sync::Mutex<()>,
}
