//! Design system for Lumen
//!
//! This crate provides the immutable theme catalog and the color science it
//! is validated with.
//!
//! Two themes are supported:
//! - [`theme::ThemeName::Light`] - Bright theme with white background
//! - [`theme::ThemeName::Dark`] - Dark theme with near-black background
//!
//! # Modules
//!
//! - [`color`] - Luminance, contrast and color manipulation
//! - [`theme`] - Color roles and the light/dark catalog
//! - [`tokens`] - Spacing and border radius scales
//! - [`typography`] - Text styles by role
//! - [`accessibility`] - WCAG AA validation of a theme
//!
//! # Example
//!
//! ```rust
//! use app_ui::{theme_for, validate, ColorRole};
//!
//! let theme = theme_for(true);
//! assert!(theme.is_dark());
//! assert!(validate(theme).all_valid);
//!
//! let padding = theme.spacing.md;
//! let tint = theme.color(ColorRole::Tint);
//! # let _ = (padding, tint);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accessibility;
pub mod color;
pub mod theme;
pub mod tokens;
pub mod typography;

// Re-export commonly used types
pub use accessibility::{validate, AccessibilityReport, ContrastCheck};

pub use color::{
    adjust_brightness, contrast_ratio, meets_aa, relative_luminance, with_alpha, ColorError, Rgb,
};

pub use theme::{
    all_themes, get_theme, theme_for, Color, ColorRole, Theme, ThemeColors, ThemeName,
    DARK_THEME, LIGHT_THEME,
};

pub use tokens::{BorderRadius, Spacing};

pub use typography::{TextStyle, Typography, TypographyRole};
