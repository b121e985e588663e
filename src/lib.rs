//! Lumen theming
//!
//! Facade over the workspace crates:
//!
//! - [`ui`] - the immutable light/dark catalog, color math and accessibility checks
//! - [`storage`] - durable preference records and the store contract
//! - [`state`] - the runtime resolver that picks and persists the active theme

#![warn(missing_docs)]

pub use app_state as state;
pub use app_ui as ui;
pub use storage;

pub use app_state::{PlatformColorScheme, ThemeResolver, ThemeResolverConfig};
pub use app_ui::{theme_for, validate, Theme, ThemeName};
pub use storage::{KvStore, PreferenceStore};
