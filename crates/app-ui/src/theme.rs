//! Theme catalog for Lumen
//!
//! Exactly two themes exist process-wide, [`LIGHT_THEME`] and [`DARK_THEME`].
//! Both are immutable statics built at compile time; consumers hold
//! `&'static Theme` references and never mutate them.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{get_theme, ColorRole, ThemeName};
//!
//! let theme = get_theme(ThemeName::Dark);
//! assert!(theme.is_dark());
//! assert_eq!(theme.color(ColorRole::Tint), theme.color(ColorRole::Primary));
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::tokens::{BorderRadius, Spacing, DEFAULT_BORDER_RADIUS, DEFAULT_SPACING};
use crate::typography::{Typography, DEFAULT_TYPOGRAPHY};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a `#RRGGBB` hex string
///
/// Borrowed for the built-in catalog, owned for themes assembled at runtime.
pub type Color = Cow<'static, str>;

const fn hex(value: &'static str) -> Color {
    Cow::Borrowed(value)
}

/// Named color roles every theme defines
///
/// The last four variants are legacy aliases kept for older call sites. They
/// have no storage of their own and resolve onto a canonical role through
/// [`ColorRole::canonical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    /// Brand color for primary actions
    Primary,
    /// Secondary highlight color
    Accent,
    /// Screen background
    Background,
    /// Cards and elevated surfaces
    Surface,
    /// Body text
    Text,
    /// Muted text
    TextSecondary,
    /// Dividers and outlines
    Border,
    /// Positive status
    Success,
    /// Cautionary status
    Warning,
    /// Error status
    Error,
    /// Legacy alias for [`ColorRole::Primary`]
    Tint,
    /// Legacy alias for [`ColorRole::TextSecondary`]
    Icon,
    /// Legacy alias for [`ColorRole::TextSecondary`]
    TabIconDefault,
    /// Legacy alias for [`ColorRole::Primary`]
    TabIconSelected,
}

impl ColorRole {
    /// Every role, canonical roles first
    pub const ALL: [ColorRole; 14] = [
        ColorRole::Primary,
        ColorRole::Accent,
        ColorRole::Background,
        ColorRole::Surface,
        ColorRole::Text,
        ColorRole::TextSecondary,
        ColorRole::Border,
        ColorRole::Success,
        ColorRole::Warning,
        ColorRole::Error,
        ColorRole::Tint,
        ColorRole::Icon,
        ColorRole::TabIconDefault,
        ColorRole::TabIconSelected,
    ];

    /// Map a legacy alias onto the role that stores its color
    pub fn canonical(self) -> ColorRole {
        match self {
            ColorRole::Tint | ColorRole::TabIconSelected => ColorRole::Primary,
            ColorRole::Icon | ColorRole::TabIconDefault => ColorRole::TextSecondary,
            role => role,
        }
    }

    /// Check if this role is a legacy alias
    pub fn is_legacy_alias(self) -> bool {
        self.canonical() != self
    }

    /// The camelCase name used in serialized themes
    pub fn as_str(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Accent => "accent",
            ColorRole::Background => "background",
            ColorRole::Surface => "surface",
            ColorRole::Text => "text",
            ColorRole::TextSecondary => "textSecondary",
            ColorRole::Border => "border",
            ColorRole::Success => "success",
            ColorRole::Warning => "warning",
            ColorRole::Error => "error",
            ColorRole::Tint => "tint",
            ColorRole::Icon => "icon",
            ColorRole::TabIconDefault => "tabIconDefault",
            ColorRole::TabIconSelected => "tabIconSelected",
        }
    }
}

impl std::fmt::Display for ColorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Unknown color role: {}", s))
    }
}

/// Canonical color assignments for a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Brand color for primary actions
    pub primary: Color,
    /// Secondary highlight color
    pub accent: Color,
    /// Screen background
    pub background: Color,
    /// Cards and elevated surfaces
    pub surface: Color,
    /// Body text
    pub text: Color,
    /// Muted text
    pub text_secondary: Color,
    /// Dividers and outlines
    pub border: Color,
    /// Positive status
    pub success: Color,
    /// Cautionary status
    pub warning: Color,
    /// Error status
    pub error: Color,
}

impl ThemeColors {
    /// Look up a role, resolving legacy aliases
    pub fn get(&self, role: ColorRole) -> &str {
        match role.canonical() {
            ColorRole::Primary => &self.primary,
            ColorRole::Accent => &self.accent,
            ColorRole::Background => &self.background,
            ColorRole::Surface => &self.surface,
            ColorRole::Text => &self.text,
            ColorRole::TextSecondary => &self.text_secondary,
            ColorRole::Border => &self.border,
            ColorRole::Success => &self.success,
            ColorRole::Warning => &self.warning,
            // `canonical` only ever yields the ten stored roles
            _ => &self.error,
        }
    }
}

// =============================================================================
// Theme Definition
// =============================================================================

/// Theme name enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl ThemeName {
    /// Get the color scheme name
    pub fn color_scheme(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    /// Check if this names the dark variant
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeName::Dark)
    }

    /// Name for a dark flag
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemeName::Dark
        } else {
            ThemeName::Light
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Light => write!(f, "Light"),
            ThemeName::Dark => write!(f, "Dark"),
        }
    }
}

impl std::str::FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Complete theme definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Theme name
    pub name: ThemeName,
    /// Role to color assignments
    pub colors: ThemeColors,
    /// Spacing scale in pixels
    pub spacing: Spacing,
    /// Corner radius scale
    pub border_radius: BorderRadius,
    /// Text styles by role
    pub typography: Typography,
}

impl Theme {
    /// Check if this is a dark theme
    pub fn is_dark(&self) -> bool {
        self.name.is_dark()
    }

    /// Get the color for a role, resolving legacy aliases
    pub fn color(&self, role: ColorRole) -> &str {
        self.colors.get(role)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The light theme
pub static LIGHT_THEME: Theme = Theme {
    name: ThemeName::Light,
    colors: ThemeColors {
        primary: hex("#0A7EA4"),
        accent: hex("#B4580B"),
        background: hex("#FFFFFF"),
        surface: hex("#F4F6F8"),
        text: hex("#11181C"),
        text_secondary: hex("#5B6470"),
        border: hex("#D7DCE1"),
        success: hex("#1E8E3E"),
        warning: hex("#B26A00"),
        error: hex("#C62828"),
    },
    spacing: DEFAULT_SPACING,
    border_radius: DEFAULT_BORDER_RADIUS,
    typography: DEFAULT_TYPOGRAPHY,
};

/// The dark theme
pub static DARK_THEME: Theme = Theme {
    name: ThemeName::Dark,
    colors: ThemeColors {
        primary: hex("#4FC3F7"),
        accent: hex("#FFB74D"),
        background: hex("#0F1417"),
        surface: hex("#1C2226"),
        text: hex("#ECEDEE"),
        text_secondary: hex("#A3ABB3"),
        border: hex("#2E363C"),
        success: hex("#81C995"),
        warning: hex("#FDD663"),
        error: hex("#F28B82"),
    },
    spacing: DEFAULT_SPACING,
    border_radius: DEFAULT_BORDER_RADIUS,
    typography: DEFAULT_TYPOGRAPHY,
};

/// Get a theme by name
pub fn get_theme(name: ThemeName) -> &'static Theme {
    match name {
        ThemeName::Light => &LIGHT_THEME,
        ThemeName::Dark => &DARK_THEME,
    }
}

/// Get the theme for a dark flag
pub fn theme_for(is_dark: bool) -> &'static Theme {
    get_theme(ThemeName::from_dark(is_dark))
}

/// All available themes
pub fn all_themes() -> [&'static Theme; 2] {
    [&LIGHT_THEME, &DARK_THEME]
}
