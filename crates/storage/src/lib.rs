//! Storage layer for Lumen
//!
//! This crate provides the durable key-value store and the preference
//! persistence contract the theme resolver depends on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod preferences;

pub use kv::{KvConfig, KvError, KvStore};
pub use preferences::{
    MemoryPreferenceStore, PreferenceRecord, PreferenceStore, PreferenceStoreError,
    PREFERENCE_KEY,
};
