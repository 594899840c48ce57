//! Tint scales for design-system palettes.
//!
//! A [`Palette`] is an ordered list of [`Tint`]s built around a center color.
//! The ends are derived from the center, pinned tints survive every rebuild
//! and everything in between is interpolated in a perceptual color space.
//! [`PaletteBuilder`] owns the palettes of a session and keeps them in sync
//! with the [`PalettesSettings`].

mod aligner;
mod builder;
mod color;
mod ends;
mod error;
mod fallback;
mod interpolation;
mod naming;
mod palette;
mod recommend;
mod repository;
mod sequence;
mod settings;

pub use aligner::{Aligner, AlignerContrastMode, AlignerSettings, AlignerValue, readout};
pub use builder::PaletteBuilder;
pub use color::{Axis, ColorSpace, ColorValue, Coordinate, DEFAULT_COLOR_HEX};
pub use ends::resolve_ends;
pub use error::{Error, Result};
pub use fallback::{AxisFallbacks, TintKey};
pub use interpolation::{Point, auto_range_number, interpolate_gap};
pub use naming::{TintNamingMode, hue_name, tint_name};
pub use palette::{Palette, PaletteBuilderPayload, Tint};
pub use recommend::{
    ExistingTintScope, RecommendationFlag, RecommendationGroup, RecommendationOptions,
    RecommendedColor, hwb_hue_aligner, recommend_color, recommendations,
};
pub use repository::{CanUndoRedo, InMemoryPaletteRepository, PaletteRepository};
pub use sequence::{build_tints, recompute};
pub use settings::{
    ACCURATE_HUE_WINDOW, HueGapMode, InterpolationColorSpace, PaletteSettings, PalettesSettings,
};
