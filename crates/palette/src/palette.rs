use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    aligner::AlignerSettings, color::ColorValue, naming::hue_name, settings::PaletteSettings,
    settings::PalettesSettings,
};

fn is_false(value: &bool) -> bool {
    !*value
}

/// One shade of a palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tint {
    pub name: String,
    pub color: ColorValue,
    /// Pinned by the user; survives recomputation.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_anchor: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_center: bool,
}

impl Tint {
    pub fn new(name: impl Into<String>, color: ColorValue) -> Self {
        Self {
            name: name.into(),
            color,
            is_anchor: false,
            is_center: false,
        }
    }

    pub fn anchor(mut self) -> Self {
        self.is_anchor = true;
        self
    }

    pub fn center(mut self) -> Self {
        self.is_center = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub id: Uuid,
    pub name: String,
    pub tints: Vec<Tint>,
    #[serde(default)]
    pub settings: PaletteSettings,
}

impl Palette {
    /// An empty palette named after `color`, with a fresh id.
    pub fn new(color: &ColorValue, settings: PaletteSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: hue_name(color),
            tints: vec![],
            settings,
        }
    }

    /// Index of the center tint: the flagged one, or the middle of the scale.
    pub fn center_index(&self) -> Option<usize> {
        if self.tints.is_empty() {
            return None;
        }
        self.tints
            .iter()
            .position(|tint| tint.is_center)
            .or(Some(self.tints.len() / 2))
    }

    pub fn center(&self) -> Option<&Tint> {
        self.center_index().and_then(|index| self.tints.get(index))
    }
}

/// Every palette of a session with the shared settings.
///
/// This is the file form and the snapshot handed to a [`crate::PaletteRepository`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaletteBuilderPayload {
    #[serde(default)]
    pub palettes: Vec<Palette>,
    #[serde(default)]
    pub settings: PalettesSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aligner_settings: Option<AlignerSettings>,
}

impl PaletteBuilderPayload {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
