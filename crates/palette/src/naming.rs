//! Tint and palette names.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::{ColorValue, Coordinate};

/// How tints of a scale are labeled, written as the scheme it produces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum TintNamingMode {
    #[serde(rename = "5,10,20...90,95")]
    FiveTen,
    #[default]
    #[serde(rename = "50,100,200...900,950")]
    FiftyHundred,
    #[serde(rename = "0,10,20...")]
    ZeroTen,
    #[serde(rename = "0,100,200...")]
    ZeroHundred,
    #[serde(rename = "10,20,30...")]
    Tens,
    #[serde(rename = "100,200,300...")]
    Hundreds,
    #[serde(rename = "manual")]
    Manual,
}

impl TintNamingMode {
    pub const ALL: [TintNamingMode; 7] = [
        TintNamingMode::FiftyHundred,
        TintNamingMode::FiveTen,
        TintNamingMode::ZeroTen,
        TintNamingMode::ZeroHundred,
        TintNamingMode::Tens,
        TintNamingMode::Hundreds,
        TintNamingMode::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TintNamingMode::FiveTen => "5,10,20...90,95",
            TintNamingMode::FiftyHundred => "50,100,200...900,950",
            TintNamingMode::ZeroTen => "0,10,20...",
            TintNamingMode::ZeroHundred => "0,100,200...",
            TintNamingMode::Tens => "10,20,30...",
            TintNamingMode::Hundreds => "100,200,300...",
            TintNamingMode::Manual => "manual",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == label)
    }
}

impl fmt::Display for TintNamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the tint at `index` in a scale of `length` tints.
///
/// [`TintNamingMode::Manual`] keeps `existing` when there is one and otherwise
/// falls back to the `50,100,200...900,950` scheme.
pub fn tint_name(
    index: usize,
    length: usize,
    mode: TintNamingMode,
    existing: Option<&str>,
) -> String {
    let mode = match (mode, existing) {
        (TintNamingMode::Manual, Some(name)) if !name.is_empty() => return name.to_string(),
        (TintNamingMode::Manual, _) => TintNamingMode::FiftyHundred,
        (mode, _) => mode,
    };

    match mode {
        TintNamingMode::FiveTen | TintNamingMode::FiftyHundred => {
            let (step, offset) = if mode == TintNamingMode::FiveTen {
                (10, 5)
            } else {
                (100, 50)
            };
            if length <= 1 || index == 0 {
                offset.to_string()
            } else if index == length - 1 {
                (index * step - offset).to_string()
            } else {
                (index * step).to_string()
            }
        }
        TintNamingMode::ZeroTen => (index * 10).to_string(),
        TintNamingMode::ZeroHundred => (index * 100).to_string(),
        TintNamingMode::Tens => ((index + 1) * 10).to_string(),
        TintNamingMode::Hundreds | TintNamingMode::Manual => ((index + 1) * 100).to_string(),
    }
}

/// HSL saturation, in percent, below which a color is named as a gray.
pub const GRAY_SATURATION: f64 = 15.0;

const HUE_NAMES: [(f64, &str); 11] = [
    (45.0, "orange"),
    (75.0, "yellow"),
    (105.0, "lime"),
    (135.0, "green"),
    (165.0, "teal"),
    (195.0, "cyan"),
    (225.0, "blue"),
    (255.0, "indigo"),
    (285.0, "violet"),
    (315.0, "purple"),
    (345.0, "pink"),
];

/// Name a color after its HSL hue bucket, e.g. `blue` or `gray-blue`.
pub fn hue_name(color: &ColorValue) -> String {
    let hue = color.get(Coordinate::HSL_H);
    let saturation = color.get(Coordinate::HSL_S);
    let prefix = if saturation < GRAY_SATURATION { "gray-" } else { "" };

    let name = if !(15.0..345.0).contains(&hue) {
        "red"
    } else {
        HUE_NAMES
            .iter()
            .find(|(upper, _)| hue < *upper)
            .map_or("pink", |(_, name)| *name)
    };
    format!("{prefix}{name}")
}
