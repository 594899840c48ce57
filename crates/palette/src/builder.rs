use std::sync::Arc;
use uuid::Uuid;

use crate::{
    aligner::{AlignerSettings, AlignerValue, readout},
    color::{ColorSpace, ColorValue, Coordinate},
    ends::resolve_ends,
    error::{Error, Result},
    fallback::{AxisFallbacks, TintKey},
    naming::tint_name,
    palette::{Palette, PaletteBuilderPayload, Tint},
    recommend::{
        RecommendationGroup, RecommendationOptions, RecommendedColor, hwb_hue_aligner,
        recommendations,
    },
    repository::{CanUndoRedo, PaletteRepository},
    sequence::{build_tints, recompute},
    settings::PalettesSettings,
};

/// Owner of the palettes of a session.
///
/// Every change recomputes the affected palettes before returning and hands a
/// snapshot of the whole session to the repository.
pub struct PaletteBuilder {
    repository: Arc<dyn PaletteRepository>,
    palettes: Vec<Palette>,
    settings: PalettesSettings,
    aligner_settings: AlignerSettings,
    recommendation_options: RecommendationOptions,
    fallbacks: AxisFallbacks,
}

impl PaletteBuilder {
    pub fn new(repository: Arc<dyn PaletteRepository>) -> Self {
        Self::with_settings(repository, PalettesSettings::default())
    }

    pub fn with_settings(repository: Arc<dyn PaletteRepository>, settings: PalettesSettings) -> Self {
        Self {
            repository,
            palettes: vec![],
            settings: settings.clamped(),
            aligner_settings: AlignerSettings::default(),
            recommendation_options: RecommendationOptions::default(),
            fallbacks: AxisFallbacks::default(),
        }
    }

    /// Restore the latest snapshot of `repository`, if it has one.
    pub fn from_repository(repository: Arc<dyn PaletteRepository>) -> Result<Self> {
        let payload = repository.load()?;
        let mut builder = Self::new(repository);
        if let Some(payload) = payload {
            builder.apply(payload);
        }
        Ok(builder)
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn palette(&self, index: usize) -> Result<&Palette> {
        self.palettes.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.palettes.len(),
        })
    }

    pub fn settings(&self) -> &PalettesSettings {
        &self.settings
    }

    pub fn aligner_settings(&self) -> &AlignerSettings {
        &self.aligner_settings
    }

    pub fn payload(&self) -> PaletteBuilderPayload {
        PaletteBuilderPayload {
            palettes: self.palettes.clone(),
            settings: self.settings,
            aligner_settings: Some(self.aligner_settings),
        }
    }

    fn commit(&self) -> Result<()> {
        self.repository.save(&self.payload())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        self.palette(index).map(|_| ())
    }

    /// Create a palette from a single seed, `#dddddd` when `seed` is `None`.
    pub fn create_palette(&mut self, seed: Option<ColorValue>) -> Result<Palette> {
        let seed = seed.unwrap_or_default();
        let (start, end) = resolve_ends(
            &seed,
            &self.settings.palette_settings,
            None,
            self.settings.interpolation_color_space,
        );

        let seed_tints: Vec<Tint> = [start, seed, end]
            .into_iter()
            .enumerate()
            .map(|(index, color)| Tint {
                is_center: index == 1,
                ..Tint::new(tint_name(index, 3, self.settings.tint_naming_mode, None), color)
            })
            .collect();

        let palette = Palette {
            tints: build_tints(&seed_tints, &self.settings),
            ..Palette::new(&seed, self.settings.palette_settings)
        };
        tracing::info!(id = %palette.id, name = %palette.name, seed = %seed, "created palette");

        self.palettes.push(palette.clone());
        self.commit()?;
        Ok(palette)
    }

    /// Create a palette from hex or CSS text, falling back to `#dddddd`.
    pub fn create_palette_from_hex(&mut self, text: &str) -> Result<Palette> {
        self.create_palette(Some(ColorValue::parse_or_default(text)))
    }

    /// Create a palette shaped like `source` around a recommended color.
    ///
    /// Anchors of `source` keep their whiteness and blackness and take the
    /// recommended hue.
    pub fn create_palette_from_existing(
        &mut self,
        source: &Palette,
        recommended: &RecommendedColor,
    ) -> Result<Palette> {
        let (start, end) = resolve_ends(
            &recommended.color,
            &source.settings,
            None,
            self.settings.interpolation_color_space,
        );
        let [_, _, hue] = recommended.color.coords_in(ColorSpace::Oklch);
        let last = source.tints.len().saturating_sub(1);

        let tints: Vec<Tint> = source
            .tints
            .iter()
            .enumerate()
            .map(|(index, tint)| {
                let mut color = tint.color;
                if index == 0 {
                    color = start;
                }
                if index == last {
                    color = end;
                }
                if tint.is_center {
                    color = recommended.color;
                }
                if tint.is_anchor {
                    let [l, c, _] = tint.color.coords_in(ColorSpace::Oklch);
                    color = hwb_hue_aligner(&ColorValue::oklch(l, c, hue), &tint.color);
                }
                Tint { color, ..tint.clone() }
            })
            .collect();

        let palette = Palette {
            id: Uuid::new_v4(),
            name: recommended.name.clone(),
            tints: build_tints(&tints, &self.settings),
            settings: source.settings,
        };
        tracing::info!(id = %palette.id, name = %palette.name, "created palette from existing");

        self.palettes.push(palette.clone());
        self.commit()?;
        Ok(palette)
    }

    /// Replace the palette at `index` with `palette`, recomputed.
    pub fn update_palette(&mut self, index: usize, palette: Palette) -> Result<&Palette> {
        self.replace_palette(index, palette, true)
    }

    /// Like [`update_palette`](Self::update_palette), without handing a snapshot
    /// to the repository. Used while a value is being dragged.
    pub fn update_palette_without_history(
        &mut self,
        index: usize,
        palette: Palette,
    ) -> Result<&Palette> {
        self.replace_palette(index, palette, false)
    }

    fn replace_palette(&mut self, index: usize, palette: Palette, record: bool) -> Result<&Palette> {
        self.check_index(index)?;
        let palette = recompute(&palette, &self.settings);
        tracing::debug!(index, id = %palette.id, tints = palette.tints.len(), "updated palette");
        self.palettes[index] = palette;
        if record {
            self.commit()?;
        }
        Ok(&self.palettes[index])
    }

    /// Rebuild every palette with the current settings.
    pub fn update_palettes(&mut self) -> Result<()> {
        for palette in &mut self.palettes {
            palette.tints = build_tints(&palette.tints, &self.settings);
        }
        self.commit()
    }

    /// Replace the session settings. `steps` saturates to `3..=20`.
    pub fn set_settings(&mut self, settings: PalettesSettings) -> Result<()> {
        let settings = settings.clamped();
        if settings.steps != self.settings.steps {
            // Positions move, so remembered axis values no longer match their tint.
            self.fallbacks.clear();
        }
        self.settings = settings;
        tracing::debug!(steps = settings.steps, "settings changed");
        self.update_palettes()
    }

    pub fn delete_palette(&mut self, id: Uuid) -> Result<Palette> {
        let index = self
            .palettes
            .iter()
            .position(|palette| palette.id == id)
            .ok_or_else(|| Error::PaletteNotFound(id.to_string()))?;
        let palette = self.palettes.remove(index);
        self.fallbacks.forget_palette(id);
        tracing::info!(id = %id, name = %palette.name, "deleted palette");
        self.commit()?;
        Ok(palette)
    }

    pub fn move_palette(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        let palette = self.palettes.remove(from);
        self.palettes.insert(to, palette);
        self.commit()
    }

    /// Drop every palette.
    pub fn reset(&mut self) -> Result<()> {
        self.palettes.clear();
        self.fallbacks.clear();
        tracing::info!("reset palettes");
        self.commit()
    }

    /// Replace the session with `payload` as it was stored.
    pub fn load(&mut self, payload: PaletteBuilderPayload) -> Result<()> {
        self.apply(payload);
        self.commit()
    }

    fn apply(&mut self, payload: PaletteBuilderPayload) {
        self.palettes = payload.palettes;
        self.settings = payload.settings.clamped();
        if let Some(aligner_settings) = payload.aligner_settings {
            self.aligner_settings = aligner_settings;
        }
        self.fallbacks.clear();
    }

    pub fn set_aligner_settings(&mut self, settings: AlignerSettings) {
        self.aligner_settings = settings;
    }

    pub fn set_recommendation_options(&mut self, options: RecommendationOptions) {
        self.recommendation_options = options;
    }

    /// Recommendations for `base` that no palette of the session uses yet.
    pub fn recommendations(&self, base: &ColorValue) -> Vec<RecommendationGroup> {
        recommendations(base, &self.palettes, &self.recommendation_options)
    }

    /// Aligner readout of every tint of the palette at `index`.
    pub fn readouts(&self, index: usize) -> Result<Vec<Vec<AlignerValue>>> {
        let palette = self.palette(index)?;
        Ok(palette
            .tints
            .iter()
            .map(|tint| readout(&tint.color, &palette.tints, &self.aligner_settings))
            .collect())
    }

    /// Write one axis of a tint and recompute its palette.
    ///
    /// The edited tint is pinned, unless it is the center.
    pub fn set_tint_axis(
        &mut self,
        index: usize,
        tint_index: usize,
        coordinate: Coordinate,
        value: f64,
    ) -> Result<&Palette> {
        let mut palette = self.palette(index)?.clone();
        let len = palette.tints.len();
        let tint = palette
            .tints
            .get_mut(tint_index)
            .ok_or(Error::IndexOutOfRange { index: tint_index, len })?;

        tint.color = tint.color.with(coordinate, value);
        if !tint.is_center {
            tint.is_anchor = true;
        }
        self.fallbacks
            .record(TintKey::new(palette.id, tint_index), coordinate, value);
        self.update_palette(index, palette)
    }

    /// Read one axis of a tint, preferring the value last written through
    /// [`set_tint_axis`](Self::set_tint_axis) while it still describes the tint.
    pub fn tint_axis(&self, index: usize, tint_index: usize, coordinate: Coordinate) -> Result<f64> {
        let palette = self.palette(index)?;
        let tint = palette.tints.get(tint_index).ok_or(Error::IndexOutOfRange {
            index: tint_index,
            len: palette.tints.len(),
        })?;
        Ok(self
            .fallbacks
            .resolve(TintKey::new(palette.id, tint_index), &tint.color, coordinate))
    }

    /// Step back to the previous snapshot. Returns whether anything changed.
    pub fn undo(&mut self) -> Result<bool> {
        match self.repository.undo()? {
            Some(payload) => {
                self.apply(payload);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Step forward to the next snapshot. Returns whether anything changed.
    pub fn redo(&mut self) -> Result<bool> {
        match self.repository.redo()? {
            Some(payload) => {
                self.apply(payload);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn can_undo_redo(&self) -> Result<CanUndoRedo> {
        self.repository.can_undo_redo()
    }
}
