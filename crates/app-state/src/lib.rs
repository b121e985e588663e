//! Application state for Lumen
//!
//! This crate owns the runtime appearance state: which theme is active, how
//! it was chosen and when the choice is persisted.
//!
//! # Example
//!
//! ```no_run
//! use app_state::{PlatformColorScheme, ThemeResolver};
//! use std::sync::Arc;
//! use storage::MemoryPreferenceStore;
//!
//! # async fn example() {
//! let resolver = ThemeResolver::with_defaults(Arc::new(MemoryPreferenceStore::new()));
//! resolver.start(PlatformColorScheme::from(Some(true)));
//! resolver.wait_ready().await;
//!
//! let colors = &resolver.theme().colors;
//! # let _ = colors;
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod theme_resolver;

pub use theme_resolver::{
    PlatformColorScheme, PreferenceSource, ResolverPhase, ResolverState, ThemeEvent,
    ThemePreferenceError, ThemeResolver, ThemeResolverConfig,
};
