//! Bilingual label library.
//!
//! Lookup is `(category, key)` against the language fixed at construction.
//! A key with no registered translation degrades to the key itself so a
//! missing label can never block rendering; the miss is logged once.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::errors::ConfigError;
use crate::log::warn;

/// Supported label languages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Zh,
}

impl Language {
    /// Parse a language code, the only point where an unsupported language
    /// can enter the pipeline.
    pub fn from_code(code: &str) -> Result<Self, ConfigError> {
        match code {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(ConfigError::UnsupportedLanguage {
                code: other.to_string(),
            }),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

/// Label categories, one per figure family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextCategory {
    Common,
    DoubleIntegral,
    TripleIntegral,
}

impl TextCategory {
    pub fn name(self) -> &'static str {
        match self {
            TextCategory::Common => "common",
            TextCategory::DoubleIntegral => "double_integral",
            TextCategory::TripleIntegral => "triple_integral",
        }
    }
}

/// Built-in translation table. Every key is present for every language.
fn lookup(category: TextCategory, language: Language, key: &str) -> Option<&'static str> {
    use Language::*;
    use TextCategory::*;
    let entry = match (category, key) {
        (Common, "x_axis") => ("x", "x"),
        (Common, "y_axis") => ("y", "y"),
        (Common, "z_axis") => ("z", "z"),
        (Common, "volume") => ("Volume", "体积"),
        (Common, "area") => ("Area", "面积"),
        (Common, "region") => ("Region", "区域"),
        (Common, "boundary") => ("Boundary", "边界"),
        (Common, "integration") => ("Integration", "积分"),
        (Common, "coordinate_system") => ("Coordinate System", "坐标系"),
        (DoubleIntegral, "x_type_region") => ("X-Type Region", "X型区域"),
        (DoubleIntegral, "y_type_region") => ("Y-Type Region", "Y型区域"),
        (DoubleIntegral, "upper_boundary") => ("Upper Boundary", "上边界"),
        (DoubleIntegral, "lower_boundary") => ("Lower Boundary", "下边界"),
        (DoubleIntegral, "left_boundary") => ("Left Boundary", "左边界"),
        (DoubleIntegral, "right_boundary") => ("Right Boundary", "右边界"),
        (DoubleIntegral, "integration_line") => ("Integration Line", "积分线"),
        (DoubleIntegral, "polar_transform") => ("Polar Coordinate Transform", "极坐标变换"),
        (TripleIntegral, "rectangular_coord") => ("Rectangular Coordinates", "直角坐标系"),
        (TripleIntegral, "cylindrical_coord") => ("Cylindrical Coordinates", "柱坐标系"),
        (TripleIntegral, "spherical_coord") => ("Spherical Coordinates", "球坐标系"),
        (TripleIntegral, "projection_method") => ("Projection Method", "投影法"),
        (TripleIntegral, "cross_section_method") => ("Cross Section Method", "截面法"),
        (TripleIntegral, "coordinate_transform") => ("Coordinate Transform", "坐标变换"),
        (TripleIntegral, "volume_element") => ("Volume Element", "体积元素"),
        _ => return None,
    };
    Some(match language {
        En => entry.0,
        Zh => entry.1,
    })
}

/// Label lookup fixed to one language, read-only after construction.
#[derive(Debug)]
pub struct TextLibrary {
    language: Language,
    // Tracks keys already warned about so a miss is logged once.
    warned: Mutex<HashSet<(TextCategory, String)>>,
}

impl TextLibrary {
    pub fn new(language: Language) -> Self {
        TextLibrary {
            language,
            warned: Mutex::new(HashSet::new()),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Get the label for `key`, falling back to the key itself when no
    /// translation is registered.
    pub fn get_text(&self, category: TextCategory, key: &str) -> String {
        match lookup(category, self.language, key) {
            Some(text) => text.to_string(),
            None => {
                if let Ok(mut warned) = self.warned.lock() {
                    if warned.insert((category, key.to_string())) {
                        warn!(
                            category = category.name(),
                            key, "no registered label; falling back to key"
                        );
                    }
                }
                key.to_string()
            }
        }
    }
}
