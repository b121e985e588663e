//! Typography tokens for Lumen
//!
//! Text styles keyed by role. Sizes and line heights are integer pixel units,
//! weights use the usual 100-900 scale.

use serde::{Deserialize, Serialize};

// =============================================================================
// Font Weights
// =============================================================================

/// Font weight values
pub mod font_weight {
    /// Normal weight (400)
    pub const NORMAL: u16 = 400;
    /// Medium weight (500)
    pub const MEDIUM: u16 = 500;
    /// Semi-bold weight (600)
    pub const SEMIBOLD: u16 = 600;
    /// Bold weight (700)
    pub const BOLD: u16 = 700;
}

// =============================================================================
// Typography Style
// =============================================================================

/// A typography style definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in pixels
    pub size: u32,
    /// Font weight (400, 500, 600, 700)
    pub weight: u16,
    /// Line height in pixels
    pub line_height: u32,
}

impl TextStyle {
    /// Create a new text style
    pub const fn new(size: u32, weight: u16, line_height: u32) -> Self {
        Self { size, weight, line_height }
    }

    /// Scale size and line height by a font-scale multiplier
    ///
    /// The multiplier is clamped to `0.8..=1.4`; results round to whole pixels.
    pub fn scaled(&self, multiplier: f32) -> Self {
        let multiplier = multiplier.clamp(0.8, 1.4);
        let scale = |px: u32| (px as f32 * multiplier).round() as u32;
        Self {
            size: scale(self.size),
            weight: self.weight,
            line_height: scale(self.line_height),
        }
    }
}

// =============================================================================
// Typography Roles
// =============================================================================

/// Typography role identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypographyRole {
    /// Screen title
    H1,
    /// Section title
    H2,
    /// Subsection title
    H3,
    /// Body copy
    Body,
    /// Dense body copy
    BodySmall,
    /// Captions and footnotes
    Caption,
    /// Button labels
    Button,
}

impl std::str::FromStr for TypographyRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h1" => Ok(TypographyRole::H1),
            "h2" => Ok(TypographyRole::H2),
            "h3" => Ok(TypographyRole::H3),
            "body" => Ok(TypographyRole::Body),
            "bodySmall" => Ok(TypographyRole::BodySmall),
            "caption" => Ok(TypographyRole::Caption),
            "button" => Ok(TypographyRole::Button),
            _ => Err(format!("Unknown typography role: {}", s)),
        }
    }
}

// =============================================================================
// Typography System
// =============================================================================

/// Text styles for every role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Screen title
    pub h1: TextStyle,
    /// Section title
    pub h2: TextStyle,
    /// Subsection title
    pub h3: TextStyle,
    /// Body copy
    pub body: TextStyle,
    /// Dense body copy
    pub body_small: TextStyle,
    /// Captions and footnotes
    pub caption: TextStyle,
    /// Button labels
    pub button: TextStyle,
}

impl Typography {
    /// Get a text style by role
    pub fn get(&self, role: TypographyRole) -> &TextStyle {
        match role {
            TypographyRole::H1 => &self.h1,
            TypographyRole::H2 => &self.h2,
            TypographyRole::H3 => &self.h3,
            TypographyRole::Body => &self.body,
            TypographyRole::BodySmall => &self.body_small,
            TypographyRole::Caption => &self.caption,
            TypographyRole::Button => &self.button,
        }
    }

    /// Get a text style by role name
    pub fn get_by_name(&self, name: &str) -> Option<&TextStyle> {
        name.parse::<TypographyRole>().ok().map(|role| self.get(role))
    }
}

/// Typography used by the built-in themes
pub const DEFAULT_TYPOGRAPHY: Typography = Typography {
    h1: TextStyle::new(32, font_weight::BOLD, 40),
    h2: TextStyle::new(24, font_weight::BOLD, 32),
    h3: TextStyle::new(20, font_weight::SEMIBOLD, 28),
    body: TextStyle::new(16, font_weight::NORMAL, 24),
    body_small: TextStyle::new(14, font_weight::NORMAL, 20),
    caption: TextStyle::new(12, font_weight::NORMAL, 16),
    button: TextStyle::new(16, font_weight::SEMIBOLD, 24),
};
