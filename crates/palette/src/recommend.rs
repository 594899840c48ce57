//! Harmonic color recommendations by hue rotation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    color::{ColorSpace, ColorValue},
    naming::hue_name,
    palette::{Palette, Tint},
};

/// HSL saturation, in percent, given to gray recommendations.
pub const GRAY_SATURATION: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationFlag {
    Complementary,
    Triad,
    Square,
    Others,
    Gray,
}

impl RecommendationFlag {
    pub const ALL: [RecommendationFlag; 5] = [
        RecommendationFlag::Complementary,
        RecommendationFlag::Triad,
        RecommendationFlag::Square,
        RecommendationFlag::Others,
        RecommendationFlag::Gray,
    ];

    /// Hue rotations, in degrees, applied to the base color.
    pub fn gaps(&self) -> &'static [f64] {
        match self {
            RecommendationFlag::Complementary => &[180.0],
            RecommendationFlag::Triad => &[120.0, 240.0],
            RecommendationFlag::Square => &[90.0, 270.0],
            RecommendationFlag::Others => &[30.0, 60.0, 150.0, 210.0, 300.0, 330.0],
            RecommendationFlag::Gray => &[0.0, 90.0, 180.0, 270.0],
        }
    }
}

/// Which tints of the existing palettes a recommendation must not repeat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ExistingTintScope {
    /// The center tint of each palette.
    #[default]
    Center,
    /// First, center, last and anchored tints.
    Pinned,
    All,
}

impl ExistingTintScope {
    fn includes(&self, index: usize, tint: &Tint, palette: &Palette) -> bool {
        match self {
            ExistingTintScope::Center => palette.center_index() == Some(index),
            ExistingTintScope::Pinned => {
                index == 0
                    || index + 1 == palette.tints.len()
                    || tint.is_anchor
                    || palette.center_index() == Some(index)
            }
            ExistingTintScope::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationOptions {
    pub existing_tints: ExistingTintScope,
    /// Give each candidate the HWB whiteness and blackness of the base color.
    pub hwb_align: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedColor {
    pub name: String,
    pub color: ColorValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationGroup {
    pub flag: RecommendationFlag,
    pub colors: Vec<RecommendedColor>,
}

/// Keep the HWB hue of `new_color` with the whiteness and blackness of `color_to_align`.
pub fn hwb_hue_aligner(new_color: &ColorValue, color_to_align: &ColorValue) -> ColorValue {
    let [hue, _, _] = new_color.coords_in(ColorSpace::Hwb);
    let [_, whiteness, blackness] = color_to_align.coords_in(ColorSpace::Hwb);
    ColorValue::hwb(hue, whiteness, blackness)
}

/// Rotate the OKLCH hue of `base` by `gap` degrees, keeping lightness and chroma.
pub fn recommend_color(
    base: &ColorValue,
    flag: RecommendationFlag,
    gap: f64,
    options: &RecommendationOptions,
) -> RecommendedColor {
    let [l, c, h] = base.coords_in(ColorSpace::Oklch);
    let mut color = ColorValue::oklch(l, c, h + gap);

    if options.hwb_align {
        color = hwb_hue_aligner(&color, base);
    }
    if flag == RecommendationFlag::Gray {
        let [h, _, l] = color.coords_in(ColorSpace::Hsl);
        color = ColorValue::hsl(h, GRAY_SATURATION, l);
    }

    let color = color.to_gamut();
    RecommendedColor {
        name: hue_name(&color),
        color,
    }
}

/// Every recommendation group for `base`, without colors already used by `palettes`.
///
/// An achromatic base has no hue to rotate and yields no group.
pub fn recommendations(
    base: &ColorValue,
    palettes: &[Palette],
    options: &RecommendationOptions,
) -> Vec<RecommendationGroup> {
    if base.is_achromatic() {
        tracing::debug!(base = %base, "no recommendations for an achromatic color");
        return vec![];
    }

    let existing: HashSet<String> = palettes
        .iter()
        .flat_map(|palette| {
            palette
                .tints
                .iter()
                .enumerate()
                .filter(move |(index, tint)| {
                    options.existing_tints.includes(*index, tint, palette)
                })
                .map(|(_, tint)| tint.color.to_hex())
        })
        .collect();

    RecommendationFlag::ALL
        .into_iter()
        .map(|flag| RecommendationGroup {
            flag,
            colors: flag
                .gaps()
                .iter()
                .map(|gap| recommend_color(base, flag, *gap, options))
                .filter(|candidate| !existing.contains(&candidate.color.to_hex()))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Coordinate;

    fn blue() -> ColorValue {
        ColorValue::parse("#3b82f6").unwrap()
    }

    fn palette(hexes: &[&str]) -> Palette {
        let mut palette = Palette::new(&blue(), Default::default());
        palette.tints = hexes
            .iter()
            .map(|hex| Tint::new(*hex, ColorValue::parse(hex).unwrap()))
            .collect();
        palette
    }

    #[test]
    fn test_groups() {
        let groups = recommendations(&blue(), &[], &RecommendationOptions::default());
        let sizes: Vec<(RecommendationFlag, usize)> =
            groups.iter().map(|g| (g.flag, g.colors.len())).collect();
        assert_eq!(
            sizes,
            [
                (RecommendationFlag::Complementary, 1),
                (RecommendationFlag::Triad, 2),
                (RecommendationFlag::Square, 2),
                (RecommendationFlag::Others, 6),
                (RecommendationFlag::Gray, 4),
            ]
        );
        for gray in &groups[4].colors {
            assert!(gray.name.starts_with("gray-"), "{}", gray.name);
        }
    }

    #[test]
    fn test_rotation_keeps_lightness() {
        let base = ColorValue::oklch(0.7, 0.08, 40.0);
        let options = RecommendationOptions::default();
        let rotated = recommend_color(&base, RecommendationFlag::Triad, 120.0, &options);
        assert!((rotated.color.get(Coordinate::OKLCH_L) - 0.7).abs() < 0.005);
        assert!((rotated.color.get(Coordinate::OKLCH_H) - 160.0).abs() < 1.0);
        assert_eq!(rotated.name, hue_name(&rotated.color));
    }

    #[test]
    fn test_hwb_alignment() {
        let base = blue();
        let options = RecommendationOptions {
            hwb_align: true,
            ..Default::default()
        };
        let aligned = recommend_color(&base, RecommendationFlag::Triad, 120.0, &options);
        for axis in [Coordinate::HWB_W, Coordinate::HWB_B] {
            assert!((aligned.color.get(axis) - base.get(axis)).abs() < 0.5);
        }
    }

    #[test]
    fn test_achromatic_base() {
        let options = RecommendationOptions::default();
        assert!(recommendations(&ColorValue::neutral(), &[], &options).is_empty());
        assert!(recommendations(&ColorValue::white(), &[], &options).is_empty());
    }

    #[test]
    fn test_existing_scope() {
        let base = blue();
        let options = RecommendationOptions::default();
        let complement =
            recommend_color(&base, RecommendationFlag::Complementary, 180.0, &options);
        let hex = complement.color.to_hex();

        let as_center = palette(&["#ffffff", hex.as_str(), "#000000"]);
        let groups = recommendations(&base, &[as_center], &options);
        assert!(groups[0].colors.is_empty());

        let as_first = palette(&[hex.as_str(), "#3b82f6", "#000000"]);
        let groups = recommendations(&base, &[as_first.clone()], &options);
        assert_eq!(groups[0].colors.len(), 1);

        let pinned = RecommendationOptions {
            existing_tints: ExistingTintScope::Pinned,
            ..Default::default()
        };
        assert!(recommendations(&base, &[as_first], &pinned)[0].colors.is_empty());

        let mut as_plain = palette(&["#ffffff", hex.as_str(), "#3b82f6", "#111111", "#000000"]);
        let groups = recommendations(&base, &[as_plain.clone()], &pinned);
        assert_eq!(groups[0].colors.len(), 1);
        let all = RecommendationOptions {
            existing_tints: ExistingTintScope::All,
            ..Default::default()
        };
        assert!(recommendations(&base, &[as_plain.clone()], &all)[0].colors.is_empty());
        as_plain.tints[1].is_anchor = true;
        assert!(recommendations(&base, &[as_plain], &pinned)[0].colors.is_empty());
    }
}
