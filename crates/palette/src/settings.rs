use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{
    color::{ColorSpace, Coordinate},
    error::Result,
    interpolation::auto_range_number,
    naming::TintNamingMode,
};

/// Width of the hue window an `accurate` hue gap may move within, on each side.
pub const ACCURATE_HUE_WINDOW: f64 = 20.0;

/// How far a hue gap may move the hue of an end tint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum HueGapMode {
    /// Within `hue ± 20°`.
    #[default]
    Accurate,
    /// Anywhere on the wheel.
    Large,
}

impl HueGapMode {
    /// The `(min, max)` hue domain around `hue`.
    pub fn domain(&self, hue: f64) -> (f64, f64) {
        match self {
            HueGapMode::Accurate => (hue - ACCURATE_HUE_WINDOW, hue + ACCURATE_HUE_WINDOW),
            HueGapMode::Large => (0.0, 360.0),
        }
    }
}

/// Shaping parameters of one palette.
///
/// Every gap is a position in `[0, 1]`; `0.5` leaves the axis untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteSettings {
    /// Share of white mixed into the center to get the first tint.
    pub lightness_max: f64,
    /// One minus the share of black mixed into the center to get the last tint.
    pub lightness_min: f64,
    pub sat_chroma_gap_left: f64,
    pub sat_chroma_gap_right: f64,
    pub hue_gap_left: f64,
    pub hue_gap_right: f64,
    pub hue_gap_mode_left: HueGapMode,
    pub hue_gap_mode_right: HueGapMode,
}

impl PaletteSettings {
    pub const NEUTRAL_GAP: f64 = 0.5;

    /// Copy with every value saturated to `[0, 1]`. Non-finite values reset to their default.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let unit = |value: f64, default: f64| {
            if value.is_finite() {
                auto_range_number(value, 0.0, 1.0)
            } else {
                default
            }
        };

        Self {
            lightness_max: unit(self.lightness_max, defaults.lightness_max),
            lightness_min: unit(self.lightness_min, defaults.lightness_min),
            sat_chroma_gap_left: unit(self.sat_chroma_gap_left, Self::NEUTRAL_GAP),
            sat_chroma_gap_right: unit(self.sat_chroma_gap_right, Self::NEUTRAL_GAP),
            hue_gap_left: unit(self.hue_gap_left, Self::NEUTRAL_GAP),
            hue_gap_right: unit(self.hue_gap_right, Self::NEUTRAL_GAP),
            hue_gap_mode_left: self.hue_gap_mode_left,
            hue_gap_mode_right: self.hue_gap_mode_right,
        }
    }
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            lightness_max: 0.9,
            lightness_min: 0.1,
            sat_chroma_gap_left: Self::NEUTRAL_GAP,
            sat_chroma_gap_right: Self::NEUTRAL_GAP,
            hue_gap_left: Self::NEUTRAL_GAP,
            hue_gap_right: Self::NEUTRAL_GAP,
            hue_gap_mode_left: HueGapMode::default(),
            hue_gap_mode_right: HueGapMode::default(),
        }
    }
}

/// Space in which the gaps between pinned tints are filled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationColorSpace {
    #[default]
    Oklch,
    Lch,
    Hsl,
}

impl InterpolationColorSpace {
    pub fn color_space(&self) -> ColorSpace {
        match self {
            InterpolationColorSpace::Oklch => ColorSpace::Oklch,
            InterpolationColorSpace::Lch => ColorSpace::Lch,
            InterpolationColorSpace::Hsl => ColorSpace::Hsl,
        }
    }

    /// The saturation or chroma axis shaped by the sat/chroma gaps.
    pub fn sat_chroma_axis(&self) -> Coordinate {
        match self {
            InterpolationColorSpace::Oklch => Coordinate::OKLCH_C,
            InterpolationColorSpace::Lch => Coordinate::LCH_C,
            InterpolationColorSpace::Hsl => Coordinate::HSL_S,
        }
    }

    pub fn hue_axis(&self) -> Coordinate {
        match self {
            InterpolationColorSpace::Oklch => Coordinate::OKLCH_H,
            InterpolationColorSpace::Lch => Coordinate::LCH_H,
            InterpolationColorSpace::Hsl => Coordinate::HSL_H,
        }
    }
}

/// Settings shared by every palette of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PalettesSettings {
    /// Number of tints per palette, saturated to `3..=20`.
    pub steps: usize,
    pub tint_naming_mode: TintNamingMode,
    pub interpolation_color_space: InterpolationColorSpace,
    /// Template for newly created palettes.
    pub palette_settings: PaletteSettings,
}

impl PalettesSettings {
    pub const MIN_STEPS: usize = 3;
    pub const MAX_STEPS: usize = 20;

    pub fn clamped(&self) -> Self {
        Self {
            steps: auto_range_number(self.steps, Self::MIN_STEPS, Self::MAX_STEPS),
            palette_settings: self.palette_settings.clamped(),
            ..*self
        }
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        tracing::debug!("loaded settings from {}", path.display());
        Ok(settings.clamped())
    }
}

impl Default for PalettesSettings {
    fn default() -> Self {
        Self {
            steps: 11,
            tint_naming_mode: TintNamingMode::default(),
            interpolation_color_space: InterpolationColorSpace::default(),
            palette_settings: PaletteSettings::default(),
        }
    }
}
