//! Color science utilities
//!
//! Pure functions over `#RRGGBB` hex triplets (24-bit sRGB): relative
//! luminance, WCAG contrast ratio, AA compliance, alpha suffixing and
//! brightness adjustment.
//!
//! The string-based functions treat malformed input as a caller error. They
//! never panic in release builds, but the value they return for a malformed
//! color is unspecified. Use [`Rgb::from_str`](std::str::FromStr) when the
//! input is untrusted.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::color::{contrast_ratio, meets_aa, with_alpha};
//!
//! assert_eq!(contrast_ratio("#000000", "#FFFFFF"), 21.0);
//! assert!(meets_aa("#11181C", "#FFFFFF"));
//! assert_eq!(with_alpha("#FF0000", 0.5), "#FF000080");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Minimum contrast ratio for WCAG AA body text
pub const WCAG_AA_CONTRAST: f64 = 4.5;

/// Color parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input is not a `#RRGGBB` triplet
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse a hex color string to RGB components
///
/// Accepts an optional leading `#`. Any characters after the sixth hex digit
/// (such as an alpha suffix) are ignored.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

/// Convert RGB to hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// A parsed sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as an uppercase `#RRGGBB` string
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// WCAG relative luminance in `[0, 1]`
    pub fn relative_luminance(self) -> f64 {
        0.2126 * srgb_to_linear(self.r)
            + 0.7152 * srgb_to_linear(self.g)
            + 0.0722 * srgb_to_linear(self.b)
    }

    /// Contrast ratio against another color, in `[1, 21]`
    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Shift every channel by the same amount, clamped to `[0, 255]`
    fn shifted(self, amount: i32) -> Self {
        let shift = |c: u8| (i32::from(c) + amount).clamp(0, 255) as u8;
        Self::new(shift(self.r), shift(self.g), shift(self.b))
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(ColorError::InvalidHex(s.to_string()));
        }
        parse_hex_color(digits)
            .map(|(r, g, b)| Rgb::new(r, g, b))
            .ok_or_else(|| ColorError::InvalidHex(s.to_string()))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Lenient parse for the contract-checked string API
fn channels(color: &str) -> Rgb {
    let parsed = parse_hex_color(color);
    debug_assert!(parsed.is_some(), "malformed hex color: {color:?}");
    parsed.map(|(r, g, b)| Rgb::new(r, g, b)).unwrap_or_default()
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Round half toward positive infinity
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

// =============================================================================
// Contrast
// =============================================================================

/// Relative luminance of a hex color
pub fn relative_luminance(color: &str) -> f64 {
    channels(color).relative_luminance()
}

/// Contrast ratio between two hex colors
///
/// Symmetric in its arguments. Identical colors yield exactly 1, black
/// against white yields exactly 21.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    channels(a).contrast_ratio(channels(b))
}

/// Check a foreground/background pair against the WCAG AA body-text threshold
///
/// There is no large-text relaxation.
pub fn meets_aa(foreground: &str, background: &str) -> bool {
    contrast_ratio(foreground, background) >= WCAG_AA_CONTRAST
}

/// Pick the candidate with the highest contrast against `background`
///
/// Returns `None` when `candidates` is empty. Ties keep the earlier candidate.
pub fn best_text_color<'a>(background: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let bg = channels(background);
    candidates
        .iter()
        .map(|c| (*c, channels(c).contrast_ratio(bg)))
        .fold(None, |best: Option<(&'a str, f64)>, (color, ratio)| match best {
            Some((_, best_ratio)) if best_ratio >= ratio => best,
            _ => Some((color, ratio)),
        })
        .map(|(color, _)| color)
}

// =============================================================================
// Manipulation
// =============================================================================

/// Append a two-digit uppercase alpha channel to a hex color
///
/// `alpha` is clamped to `[0, 1]` and scaled by 255.
pub fn with_alpha(color: &str, alpha: f64) -> String {
    let alpha = round_half_up(alpha.clamp(0.0, 1.0) * 255.0) as u8;
    format!("{}{:02X}", color, alpha)
}

/// Lighten (positive) or darken (negative) a hex color
///
/// Adds `round(2.55 * percent)` to each channel and clamps to `[0, 255]`.
/// `percent` is clamped to `[-100, 100]`. The result is uppercase.
pub fn adjust_brightness(color: &str, percent: f64) -> String {
    let amount = round_half_up(2.55 * percent.clamp(-100.0, 100.0)) as i32;
    channels(color).shifted(amount).to_hex()
}
