//! Named color palettes with a closed set of semantic keys.
//!
//! Every style maps the same twelve semantic keys to concrete colors, so a
//! figure written against one style renders under any other. The key set is a
//! closed enum; schemes are validated once at registration, never at render
//! time.

use std::collections::HashMap;

use crate::errors::ConfigError;
use crate::types::Rgb;

/// Semantic color roles used by the figure pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorKey {
    /// Main curve / primary boundary.
    Primary,
    /// Auxiliary curve / secondary boundary.
    Secondary,
    /// Emphasis (integration lines, sample segments).
    Accent,
    LightBlue,
    LightGreen,
    LightCoral,
    /// Text and key-point markers.
    DarkGray,
    /// Grid lines.
    LightGray,
    /// Callout boxes.
    WarningYellow,
    Background,
    Purple,
    Orange,
}

impl ColorKey {
    /// Every semantic key, in declaration order.
    pub const ALL: [ColorKey; 12] = [
        ColorKey::Primary,
        ColorKey::Secondary,
        ColorKey::Accent,
        ColorKey::LightBlue,
        ColorKey::LightGreen,
        ColorKey::LightCoral,
        ColorKey::DarkGray,
        ColorKey::LightGray,
        ColorKey::WarningYellow,
        ColorKey::Background,
        ColorKey::Purple,
        ColorKey::Orange,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }
}

/// A complete palette: one color per semantic key.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScheme {
    colors: [Rgb; ColorKey::ALL.len()],
}

impl ColorScheme {
    /// Build a scheme from key/color entries, enforcing the completeness
    /// invariant: every key present exactly once.
    pub fn from_entries(style: &str, entries: &[(ColorKey, Rgb)]) -> Result<Self, ConfigError> {
        let mut colors = [None; ColorKey::ALL.len()];
        for &(key, color) in entries {
            let slot = &mut colors[key.index()];
            if slot.is_some() {
                return Err(ConfigError::SchemeDuplicateKey {
                    style: style.to_string(),
                    key,
                });
            }
            *slot = Some(color);
        }
        let missing: Vec<ColorKey> = ColorKey::ALL
            .iter()
            .copied()
            .filter(|k| colors[k.index()].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::SchemeKeyMismatch {
                style: style.to_string(),
                missing,
            });
        }
        let mut dense = [Rgb::BLACK; ColorKey::ALL.len()];
        for (slot, color) in dense.iter_mut().zip(colors) {
            if let Some(color) = color {
                *slot = color;
            }
        }
        Ok(ColorScheme { colors: dense })
    }

    /// Look up a semantic key. Total: the completeness invariant holds by
    /// construction.
    pub fn color(&self, key: ColorKey) -> Rgb {
        self.colors[key.index()]
    }
}

/// The academic palette of the original figure templates.
fn academic() -> ColorScheme {
    ColorScheme::from_entries(
        "academic",
        &[
            (ColorKey::Primary, Rgb::from_hex(0x2E86C1)),
            (ColorKey::Secondary, Rgb::from_hex(0xE74C3C)),
            (ColorKey::Accent, Rgb::from_hex(0x27AE60)),
            (ColorKey::LightBlue, Rgb::from_hex(0xAED6F1)),
            (ColorKey::LightGreen, Rgb::from_hex(0xA9DFBF)),
            (ColorKey::LightCoral, Rgb::from_hex(0xF1948A)),
            (ColorKey::DarkGray, Rgb::from_hex(0x2C3E50)),
            (ColorKey::LightGray, Rgb::from_hex(0xBDC3C7)),
            (ColorKey::WarningYellow, Rgb::from_hex(0xF39C12)),
            (ColorKey::Background, Rgb::from_hex(0xFEFEFE)),
            (ColorKey::Purple, Rgb::from_hex(0x8E44AD)),
            (ColorKey::Orange, Rgb::from_hex(0xE67E22)),
        ],
    )
    .expect("builtin academic scheme is complete")
}

fn modern() -> ColorScheme {
    ColorScheme::from_entries(
        "modern",
        &[
            (ColorKey::Primary, Rgb::from_hex(0x3498DB)),
            (ColorKey::Secondary, Rgb::from_hex(0xE74C3C)),
            (ColorKey::Accent, Rgb::from_hex(0x2ECC71)),
            (ColorKey::LightBlue, Rgb::from_hex(0xEBF5FB)),
            (ColorKey::LightGreen, Rgb::from_hex(0xEAFAF1)),
            (ColorKey::LightCoral, Rgb::from_hex(0xFADBD8)),
            (ColorKey::DarkGray, Rgb::from_hex(0x34495E)),
            (ColorKey::LightGray, Rgb::from_hex(0xD5DBDB)),
            (ColorKey::WarningYellow, Rgb::from_hex(0xF1C40F)),
            (ColorKey::Background, Rgb::from_hex(0xFFFFFF)),
            (ColorKey::Purple, Rgb::from_hex(0x9B59B6)),
            (ColorKey::Orange, Rgb::from_hex(0xFF7F50)),
        ],
    )
    .expect("builtin modern scheme is complete")
}

/// Registry of named styles, read-only after construction.
#[derive(Clone, Debug)]
pub struct ColorSchemeRegistry {
    schemes: HashMap<String, ColorScheme>,
}

impl Default for ColorSchemeRegistry {
    fn default() -> Self {
        let mut schemes = HashMap::new();
        schemes.insert("academic".to_string(), academic());
        schemes.insert("modern".to_string(), modern());
        ColorSchemeRegistry { schemes }
    }
}

impl ColorSchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom style. The scheme was already validated by
    /// [`ColorScheme::from_entries`]; this only rejects name collisions.
    pub fn register(&mut self, style_id: &str, scheme: ColorScheme) -> Result<(), ConfigError> {
        if self.schemes.contains_key(style_id) {
            return Err(ConfigError::StyleAlreadyRegistered {
                style: style_id.to_string(),
            });
        }
        self.schemes.insert(style_id.to_string(), scheme);
        Ok(())
    }

    /// Look up a style by name.
    pub fn get_scheme(&self, style_id: &str) -> Result<&ColorScheme, ConfigError> {
        self.schemes.get(style_id).ok_or_else(|| ConfigError::UnknownStyle {
            style: style_id.to_string(),
        })
    }

    /// Names of all registered styles.
    pub fn style_ids(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }
}
