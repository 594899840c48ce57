//! Per-tint numeric readouts used to line up tints across palettes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    color::{ColorValue, Coordinate},
    palette::Tint,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Aligner {
    /// HWB whiteness and blackness.
    #[default]
    Hwb,
    /// OKLCH lightness and chroma.
    Oklch,
    /// CIE LCH lightness and chroma.
    Lch,
    /// WCAG 2.1 contrast against a reference color.
    ContrastColor,
    None,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlignerContrastMode {
    /// Compare with the tint at `alignerContrastPaletteStep` of the same palette.
    #[default]
    PaletteStep,
    CustomColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AlignerSettings {
    pub aligner: Aligner,
    pub aligner_contrast_mode: AlignerContrastMode,
    #[serde(rename = "alignerConstrastCustomColor")]
    pub aligner_contrast_custom_color: ColorValue,
    pub aligner_contrast_palette_step: usize,
    pub is_display: bool,
}

impl Default for AlignerSettings {
    fn default() -> Self {
        Self {
            aligner: Aligner::default(),
            aligner_contrast_mode: AlignerContrastMode::default(),
            aligner_contrast_custom_color: ColorValue::black(),
            aligner_contrast_palette_step: 0,
            is_display: false,
        }
    }
}

/// One line of a readout, e.g. `W: 0.93`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignerValue {
    pub label: &'static str,
    pub value: f64,
}

impl AlignerValue {
    fn new(label: &'static str, value: f64) -> Self {
        Self { label, value }
    }

    /// The value with two decimals.
    pub fn formatted(&self) -> String {
        format!("{:.2}", self.value)
    }
}

impl std::fmt::Display for AlignerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.formatted())
    }
}

/// Readout for `color`, a tint of the palette whose tints are `tints`.
///
/// Axis readouts use the gamut-mapped color. A palette step outside `tints`
/// yields no readout.
pub fn readout(
    color: &ColorValue,
    tints: &[Tint],
    settings: &AlignerSettings,
) -> Vec<AlignerValue> {
    let color = color.to_gamut();
    let axes = |first: (&'static str, Coordinate), second: (&'static str, Coordinate)| {
        vec![
            AlignerValue::new(first.0, color.get(first.1).abs()),
            AlignerValue::new(second.0, color.get(second.1).abs()),
        ]
    };

    match settings.aligner {
        Aligner::Hwb => axes(("W", Coordinate::HWB_W), ("B", Coordinate::HWB_B)),
        Aligner::Oklch => axes(("L", Coordinate::OKLCH_L), ("C", Coordinate::OKLCH_C)),
        Aligner::Lch => axes(("L", Coordinate::LCH_L), ("C", Coordinate::LCH_C)),
        Aligner::ContrastColor => {
            let reference = match settings.aligner_contrast_mode {
                AlignerContrastMode::PaletteStep => tints
                    .get(settings.aligner_contrast_palette_step)
                    .map(|tint| tint.color),
                AlignerContrastMode::CustomColor => Some(settings.aligner_contrast_custom_color),
            };
            reference
                .map(|reference| vec![AlignerValue::new("C", color.contrast_wcag21(&reference))])
                .unwrap_or_default()
        }
        Aligner::None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tints() -> Vec<Tint> {
        ["#ffffff", "#3b82f6", "#000000"]
            .into_iter()
            .map(|hex| Tint::new(hex, ColorValue::parse(hex).unwrap()))
            .collect()
    }

    fn settings(aligner: Aligner) -> AlignerSettings {
        AlignerSettings {
            aligner,
            ..Default::default()
        }
    }

    #[test]
    fn test_axis_readouts() {
        let color = ColorValue::parse("#3b82f6").unwrap();

        let values = readout(&color, &tints(), &settings(Aligner::Hwb));
        let lines: Vec<String> = values.iter().map(ToString::to_string).collect();
        assert_eq!(lines, ["W: 23.14", "B: 3.53"]);

        let values = readout(&color, &tints(), &settings(Aligner::Oklch));
        assert_eq!(values[0].label, "L");
        assert_eq!(values[0].formatted(), "0.62");
        assert_eq!(values[1].formatted(), "0.19");

        let values = readout(&color, &tints(), &settings(Aligner::Lch));
        assert_eq!(values.len(), 2);
        assert!(values[0].value > 50.0 && values[0].value < 60.0);

        assert!(readout(&color, &tints(), &settings(Aligner::None)).is_empty());
    }

    #[test]
    fn test_contrast_readouts() {
        let color = ColorValue::white();
        let tints = tints();

        let mut settings = AlignerSettings {
            aligner: Aligner::ContrastColor,
            aligner_contrast_palette_step: 2,
            ..Default::default()
        };
        let values = readout(&color, &tints, &settings);
        assert_eq!(values[0].formatted(), "21.00");

        settings.aligner_contrast_palette_step = 7;
        assert!(readout(&color, &tints, &settings).is_empty());

        settings.aligner_contrast_mode = AlignerContrastMode::CustomColor;
        settings.aligner_contrast_custom_color = ColorValue::white();
        assert_eq!(readout(&color, &tints, &settings)[0].formatted(), "1.00");
    }

    #[test]
    fn test_settings_file_form() {
        let json = r##"{"aligner":"CONTRAST_COLOR","alignerContrastMode":"CUSTOM_COLOR","alignerConstrastCustomColor":"#ffffff"}"##;
        let settings: AlignerSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.aligner, Aligner::ContrastColor);
        assert_eq!(settings.aligner_contrast_mode, AlignerContrastMode::CustomColor);
        assert_eq!(settings.aligner_contrast_custom_color.to_hex(), "#ffffff");
        assert!(!settings.is_display);
    }
}
