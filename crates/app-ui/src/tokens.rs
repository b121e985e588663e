//! Layout tokens for Lumen
//!
//! Spacing and border radius scales shared by both themes. Values are integer
//! pixel units; converting them into platform widgets is the renderer's job.

use serde::{Deserialize, Serialize};

// =============================================================================
// Spacing Tokens
// =============================================================================

/// Spacing scale in pixels
/// Based on a 4px base unit with t-shirt sizes
pub mod spacing {
    /// 4px - Extra small
    pub const XS: u32 = 4;
    /// 8px - Small
    pub const SM: u32 = 8;
    /// 16px - Medium
    pub const MD: u32 = 16;
    /// 24px - Large
    pub const LG: u32 = 24;
    /// 32px - Extra large
    pub const XL: u32 = 32;
    /// 48px - 2x large
    pub const XXL: u32 = 48;
}

/// Named spacing scale carried by a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spacing {
    /// Extra small
    pub xs: u32,
    /// Small
    pub sm: u32,
    /// Medium
    pub md: u32,
    /// Large
    pub lg: u32,
    /// Extra large
    pub xl: u32,
    /// 2x large
    pub xxl: u32,
}

impl Spacing {
    /// Get spacing value by name
    pub fn get(&self, name: &str) -> Option<u32> {
        match name {
            "xs" => Some(self.xs),
            "sm" => Some(self.sm),
            "md" => Some(self.md),
            "lg" => Some(self.lg),
            "xl" => Some(self.xl),
            "xxl" => Some(self.xxl),
            _ => None,
        }
    }
}

/// Spacing scale used by the built-in themes
pub const DEFAULT_SPACING: Spacing = Spacing {
    xs: spacing::XS,
    sm: spacing::SM,
    md: spacing::MD,
    lg: spacing::LG,
    xl: spacing::XL,
    xxl: spacing::XXL,
};

// =============================================================================
// Border Radius Tokens
// =============================================================================

/// Border radius tokens
pub mod radius {
    /// Small radius (4px)
    pub const SM: u32 = 4;
    /// Medium radius (8px)
    pub const MD: u32 = 8;
    /// Large radius (16px)
    pub const LG: u32 = 16;
    /// Extra large radius (24px)
    pub const XL: u32 = 24;
    /// Full/round radius (9999px)
    pub const FULL: u32 = 9999;
}

/// Named border radius scale carried by a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderRadius {
    /// Small
    pub sm: u32,
    /// Medium
    pub md: u32,
    /// Large
    pub lg: u32,
    /// Extra large
    pub xl: u32,
    /// Pill / circle
    pub full: u32,
}

impl BorderRadius {
    /// Get radius value by name
    pub fn get(&self, name: &str) -> Option<u32> {
        match name {
            "sm" => Some(self.sm),
            "md" => Some(self.md),
            "lg" => Some(self.lg),
            "xl" => Some(self.xl),
            "full" => Some(self.full),
            _ => None,
        }
    }
}

/// Border radius scale used by the built-in themes
pub const DEFAULT_BORDER_RADIUS: BorderRadius = BorderRadius {
    sm: radius::SM,
    md: radius::MD,
    lg: radius::LG,
    xl: radius::XL,
    full: radius::FULL,
};
