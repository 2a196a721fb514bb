//! A single-entry cache of the last parsed upload, keyed by content hash.

use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::{Error, loader::load_transactions, transaction::TransactionTable};

/// The SHA-256 digest of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash the raw bytes of an upload.
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut hash = [0; 32];
        hash.copy_from_slice(&digest);

        Self(hash)
    }

    /// The first few hex digits, enough to tell uploads apart on screen.
    pub fn short(&self) -> String {
        self.to_string()[..12].to_owned()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether a load was answered from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// The upload matched the cached entry and was not parsed again.
    Hit,
    /// The upload was parsed and replaced the cached entry.
    Miss,
}

/// Remembers the most recently parsed upload.
///
/// Only one entry is kept: a successful load of different content replaces
/// it. Failed loads leave the cache untouched.
#[derive(Debug, Default)]
pub struct LoadCache {
    entry: Option<(ContentHash, Arc<TransactionTable>)>,
}

impl LoadCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached table if its content hash is `hash`.
    pub fn get(&self, hash: &ContentHash) -> Option<Arc<TransactionTable>> {
        self.entry
            .as_ref()
            .filter(|(cached_hash, _)| cached_hash == hash)
            .map(|(_, table)| table.clone())
    }

    /// Replace the cached entry.
    pub fn insert(&mut self, hash: ContentHash, table: Arc<TransactionTable>) {
        self.entry = Some((hash, table));
    }

    /// Drop the cached entry.
    pub fn invalidate(&mut self) {
        if let Some((hash, _)) = self.entry.take() {
            tracing::debug!("Invalidated cached upload {}", hash.short());
        }
    }

    /// Load `bytes`, parsing them only if they differ from the cached upload.
    ///
    /// # Errors
    /// Returns the load error if the upload has to be parsed and parsing fails.
    pub fn load(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(Arc<TransactionTable>, CacheStatus), Error> {
        let hash = ContentHash::of(bytes);

        if let Some(table) = self.get(&hash) {
            tracing::debug!("Cache hit for '{file_name}' ({})", hash.short());
            return Ok((table, CacheStatus::Hit));
        }

        tracing::debug!("Cache miss for '{file_name}' ({})", hash.short());
        let table = load_transactions(file_name, bytes)?.with_content_hash(hash);
        let table = Arc::new(table);
        self.insert(hash, table.clone());

        Ok((table, CacheStatus::Miss))
    }
}
