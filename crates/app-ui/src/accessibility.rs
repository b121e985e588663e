//! Accessibility validation for themes
//!
//! Checks the foreground/background pairs a screen actually renders against
//! the WCAG AA body-text threshold and folds them into one report. Works the
//! same for the built-in catalog and for themes assembled by consumers.

use serde::{Deserialize, Serialize};

use crate::color::contrast_ratio;
use crate::color::WCAG_AA_CONTRAST;
use crate::theme::{ColorRole, Theme};

/// Role pairs every theme must render legibly, as (foreground, background)
pub const CHECKED_PAIRS: [(ColorRole, ColorRole); 5] = [
    (ColorRole::Text, ColorRole::Background),
    (ColorRole::Text, ColorRole::Surface),
    (ColorRole::Primary, ColorRole::Background),
    (ColorRole::Accent, ColorRole::Background),
    (ColorRole::TextSecondary, ColorRole::Background),
];

/// Result of checking one role pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastCheck {
    /// Foreground role
    pub foreground: ColorRole,
    /// Background role
    pub background: ColorRole,
    /// Measured contrast ratio
    pub ratio: f64,
    /// Whether the ratio meets AA
    pub passes: bool,
}

/// Pass/fail report for a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    /// Text on background
    pub text_on_background: bool,
    /// Text on surface
    pub text_on_surface: bool,
    /// Primary on background
    pub primary_on_background: bool,
    /// Accent on background
    pub accent_on_background: bool,
    /// Secondary text on background
    pub text_secondary_on_background: bool,
    /// Conjunction of every check
    pub all_valid: bool,
    checks: Vec<ContrastCheck>,
}

impl AccessibilityReport {
    /// Every check in [`CHECKED_PAIRS`] order
    pub fn checks(&self) -> &[ContrastCheck] {
        &self.checks
    }

    /// Checks that fell below the threshold
    pub fn failures(&self) -> impl Iterator<Item = &ContrastCheck> {
        self.checks.iter().filter(|c| !c.passes)
    }
}

/// Validate a theme's role pairs against WCAG AA
pub fn validate(theme: &Theme) -> AccessibilityReport {
    let checks: Vec<ContrastCheck> = CHECKED_PAIRS
        .iter()
        .map(|&(foreground, background)| {
            let ratio = contrast_ratio(theme.color(foreground), theme.color(background));
            ContrastCheck {
                foreground,
                background,
                ratio,
                passes: ratio >= WCAG_AA_CONTRAST,
            }
        })
        .collect();

    AccessibilityReport {
        text_on_background: checks[0].passes,
        text_on_surface: checks[1].passes,
        primary_on_background: checks[2].passes,
        accent_on_background: checks[3].passes,
        text_secondary_on_background: checks[4].passes,
        all_valid: checks.iter().all(|c| c.passes),
        checks,
    }
}
