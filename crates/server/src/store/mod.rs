//! JSON document persistence.
//!
//! The whole store lives in one JSON document (`<data_dir>/db.json`) with
//! top-level keys `products`, `sales`, `payout`, `users` and `config` -
//! all five are always present, even when empty. Every operation is a
//! full load, in-memory mutation, full save.
//!
//! Access is serialized behind a mutex so two requests can never
//! interleave a read-modify-write cycle; the observable contract stays
//! last-write-wins at operation granularity. Saves go through a temp
//! file and rename so a crash mid-write cannot truncate the document.
//!
//! An unreadable or corrupt document is a fatal [`StoreError`]; no
//! recovery is attempted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{Payout, Product, Sale, StoreConfig, User};

/// File name of the store document inside the data directory.
pub const STORE_FILE: &str = "db.json";

/// Errors raised by the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying file could not be read or written.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The document on disk is not valid JSON for the expected shape.
    #[error("store document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The complete persisted state of the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub payout: Option<Payout>,
    pub users: Vec<User>,
    pub config: StoreConfig,
}

/// Handle to the JSON document store.
pub struct Store {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Store {
    /// Open the store under `data_dir`, creating the directory and an
    /// empty document on first run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory or document cannot be
    /// created.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = data_dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let store = Self {
            path: dir.join(STORE_FILE),
            lock: Mutex::new(()),
        };

        if !tokio::fs::try_exists(&store.path).await? {
            store.persist(&Document::default()).await?;
        }

        Ok(store)
    }

    /// Load a snapshot of the document.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the document is unreadable or corrupt.
    pub async fn read(&self) -> Result<Document, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Run a mutation over the document: load, apply `mutate`, save.
    ///
    /// The whole cycle holds the store lock, so concurrent updates are
    /// applied one after another and none is lost.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the document cannot be loaded or the
    /// mutated document cannot be saved.
    pub async fn update<F, T>(&self, mutate: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Document) -> T,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        let out = mutate(&mut doc);
        self.persist(&doc).await?;
        Ok(out)
    }

    async fn load(&self) -> Result<Document, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn persist(&self, doc: &Document) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
