//! Raw axis values remembered across color space round trips.
//!
//! Writing `hsl.h = 200` on a gray and reading it back yields `0`, since a gray
//! has no hue, and repeated conversions slowly drift a hue written in one
//! space and read in another. The side-table keeps the last value a caller
//! wrote for a tint axis and hands it back while it is still accurate.

use std::collections::HashMap;
use uuid::Uuid;

use crate::color::{Axis, ColorValue, Coordinate};

/// Identity of a tint: its palette and its position in the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TintKey {
    pub palette: Uuid,
    pub index: usize,
}

impl TintKey {
    pub fn new(palette: Uuid, index: usize) -> Self {
        Self { palette, index }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AxisFallbacks {
    values: HashMap<(TintKey, Coordinate), f64>,
}

impl AxisFallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: TintKey, coordinate: Coordinate, value: f64) {
        self.values.insert((key, coordinate), value);
    }

    /// The value to show for `coordinate` of `color`.
    ///
    /// The recorded value wins when the axis is undefined for `color` or when
    /// writing it back would give the same displayed color.
    pub fn resolve(&self, key: TintKey, color: &ColorValue, coordinate: Coordinate) -> f64 {
        let current = color.get(coordinate);
        match self.values.get(&(key, coordinate)) {
            Some(&raw) if is_undefined(color, coordinate) || encodes(color, coordinate, raw) => raw,
            _ => current,
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: TintKey, coordinate: Coordinate) -> Option<f64> {
        self.values.get(&(key, coordinate)).copied()
    }

    /// Drop every value recorded for the tints of `palette`.
    pub fn forget_palette(&mut self, palette: Uuid) {
        self.values.retain(|(key, _), _| key.palette != palette);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn is_undefined(color: &ColorValue, coordinate: Coordinate) -> bool {
    let space = coordinate.space();
    coordinate.axis() == Axis::Hue && space.is_achromatic(color.coords_in(space))
}

fn encodes(color: &ColorValue, coordinate: Coordinate, raw: f64) -> bool {
    color.with(coordinate, raw).to_hex() == color.to_hex()
}
