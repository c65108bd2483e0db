//! Brightness regimes and their enhancement presets
//!
//! The preset factors are fixed tuning data and must not be rounded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Brightness below this is [`Category::Dark`]
pub const DARK_BELOW: f64 = 50.0;
/// Brightness at or above this is [`Category::Bright`]
pub const BRIGHT_FROM: f64 = 100.0;

/// Brightness regime of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dark,
    Normal,
    Bright,
}

/// Multiplicative factors for the tone chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnhancementPreset {
    pub brightness_factor: f64,
    pub contrast_factor: f64,
    pub sharpness_factor: f64,
}

pub const DARK_PRESET: EnhancementPreset = EnhancementPreset {
    brightness_factor: 0.9411223551057959,
    contrast_factor: 1.0227920227920229,
    sharpness_factor: 0.01367602640116344,
};

pub const NORMAL_PRESET: EnhancementPreset = EnhancementPreset {
    brightness_factor: 1.00420511622474,
    contrast_factor: 1.0076833138466679,
    sharpness_factor: 0.7218255991840898,
};

pub const BRIGHT_PRESET: EnhancementPreset = EnhancementPreset {
    brightness_factor: 0.9857360365413895,
    contrast_factor: 1.0073332140940798,
    sharpness_factor: 0.4813268137967491,
};

/// Classify a mean brightness.
///
/// Thresholds are half-open: `[0, 50)` dark, `[50, 100)` normal, the
/// rest bright. NaN compares false everywhere and lands in `Bright`.
pub fn classify(brightness: f64) -> Category {
    if brightness < DARK_BELOW {
        Category::Dark
    } else if brightness < BRIGHT_FROM {
        Category::Normal
    } else {
        Category::Bright
    }
}

/// The preset used for a category.
pub fn preset_for(category: Category) -> EnhancementPreset {
    match category {
        Category::Dark => DARK_PRESET,
        Category::Normal => NORMAL_PRESET,
        Category::Bright => BRIGHT_PRESET,
    }
}

impl Category {
    /// The preset used for this category.
    pub fn preset(self) -> EnhancementPreset {
        preset_for(self)
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Dark => "dark",
            Category::Normal => "normal",
            Category::Bright => "bright",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
