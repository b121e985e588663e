//! Appearance preference persistence
//!
//! This module defines the durable record for the user's light/dark choice
//! and the asynchronous get/set contract the theme resolver talks to. The
//! storage engine behind the contract is opaque: [`KvStore`] implements it
//! for on-device persistence and [`MemoryPreferenceStore`] for tests and
//! previews.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::kv::{KvError, KvStore};

/// Fixed key the appearance preference is stored under
pub const PREFERENCE_KEY: &str = "lumen:theme-preference";

/// Errors a preference store may report
#[derive(Debug, Error)]
pub enum PreferenceStoreError {
    /// Backing store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Key-value store error
    #[error("Key-value error: {0}")]
    Kv(#[from] KvError),
}

/// Result type for preference store operations
pub type Result<T> = std::result::Result<T, PreferenceStoreError>;

/// Asynchronous key-value contract for preference persistence
///
/// Both operations may fail. Implementations serialize access to a single
/// key internally but promise nothing about the ordering of separate calls.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read the text stored under `key`, or `None` if nothing is stored
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the text stored under `key`
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

#[async_trait]
impl PreferenceStore for KvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_raw(key)?)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.set_raw(key, &value)?;
        self.flush_async().await?;
        Ok(())
    }
}

// =============================================================================
// Preference Record
// =============================================================================

/// The persisted light/dark choice
///
/// Serialized as `{"isDark": bool, "lastUpdated": "<RFC 3339>"}`. Unknown
/// fields are ignored on read; a missing `isDark` is a parse failure. The
/// timestamp is informational: a missing or unreadable one reads as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    /// Whether the dark theme is selected
    pub is_dark: bool,
    /// When the record was written
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,
}

fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|stamp| stamp.with_timezone(&Utc)))
}

impl PreferenceRecord {
    /// Create a record stamped with the current time
    pub fn now(is_dark: bool) -> Self {
        Self { is_dark, last_updated: Some(Utc::now()) }
    }

    /// Parse a stored record
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Encode for storage
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// In-memory Store
// =============================================================================

/// In-memory preference store
///
/// Counts reads and writes and can be switched into failure mode, which makes
/// it the store of choice for exercising the resolver's fallback paths.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryPreferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.values.get_mut().insert(key.into(), value.into());
        store
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of read attempts, including failed ones
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of write attempts, including failed ones
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current value under a key
    pub async fn value(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PreferenceStoreError::Unavailable("simulated read failure".into()));
        }
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PreferenceStoreError::Unavailable("simulated write failure".into()));
        }
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
