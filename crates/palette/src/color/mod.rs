//! Colors convertible across sRGB, HSL, HWB, OKLCH and CIE LCH.
//!
//! A [`ColorValue`] remembers the space it was last written in, so reading
//! back an axis that was just set never goes through a lossy round trip.

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{borrow::Cow, fmt, str::FromStr};

use crate::error::{Error, Result};

mod convert;
mod gamut;
mod interpolation;
mod parse;

/// Neutral color used whenever color input cannot be parsed.
pub const DEFAULT_COLOR_HEX: &str = "#dddddd";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Srgb,
    Hsl,
    Hwb,
    Oklch,
    Lch,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 5] = [
        ColorSpace::Srgb,
        ColorSpace::Hsl,
        ColorSpace::Hwb,
        ColorSpace::Oklch,
        ColorSpace::Lch,
    ];

    /// Return lower_case space name: `srgb`, `hsl`, `hwb`, `oklch`, `lch`.
    pub fn name(&self) -> &'static str {
        match self {
            ColorSpace::Srgb => "srgb",
            ColorSpace::Hsl => "hsl",
            ColorSpace::Hwb => "hwb",
            ColorSpace::Oklch => "oklch",
            ColorSpace::Lch => "lch",
        }
    }

    /// The three axes of the space, in coordinate order.
    pub fn axes(&self) -> [Axis; 3] {
        match self {
            ColorSpace::Srgb => [Axis::Red, Axis::Green, Axis::Blue],
            ColorSpace::Hsl => [Axis::Hue, Axis::Saturation, Axis::Lightness],
            ColorSpace::Hwb => [Axis::Hue, Axis::Whiteness, Axis::Blackness],
            ColorSpace::Oklch | ColorSpace::Lch => [Axis::Lightness, Axis::Chroma, Axis::Hue],
        }
    }

    pub fn axis_index(&self, axis: Axis) -> Option<usize> {
        self.axes().iter().position(|a| *a == axis)
    }

    pub(crate) fn hue_index(&self) -> Option<usize> {
        self.axis_index(Axis::Hue)
    }

    /// Whether `coords` (in this space) describe a color without a meaningful hue.
    pub(crate) fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        match self {
            ColorSpace::Srgb => false,
            ColorSpace::Hsl => coords[1].abs() < convert::HSL_ACHROMATIC,
            ColorSpace::Hwb => coords[1] + coords[2] >= 100.0 - convert::HSL_ACHROMATIC,
            ColorSpace::Oklch => coords[1] < convert::OKLCH_ACHROMATIC,
            ColorSpace::Lch => coords[1] < convert::LCH_ACHROMATIC,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srgb" | "rgb" => Ok(ColorSpace::Srgb),
            "hsl" => Ok(ColorSpace::Hsl),
            "hwb" => Ok(ColorSpace::Hwb),
            "oklch" => Ok(ColorSpace::Oklch),
            "lch" => Ok(ColorSpace::Lch),
            _ => Err(Error::InvalidCoordinate(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Lightness,
    Whiteness,
    Blackness,
    Chroma,
}

impl Axis {
    pub fn letter(&self) -> char {
        match self {
            Axis::Red => 'r',
            Axis::Green => 'g',
            Axis::Blue | Axis::Blackness => 'b',
            Axis::Hue => 'h',
            Axis::Saturation => 's',
            Axis::Lightness => 'l',
            Axis::Whiteness => 'w',
            Axis::Chroma => 'c',
        }
    }
}

/// One axis of one color space, written `space.axis` (e.g. `oklch.h`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    space: ColorSpace,
    axis: Axis,
}

impl Coordinate {
    pub const HSL_H: Coordinate = Coordinate::of(ColorSpace::Hsl, Axis::Hue);
    pub const HSL_S: Coordinate = Coordinate::of(ColorSpace::Hsl, Axis::Saturation);
    pub const HSL_L: Coordinate = Coordinate::of(ColorSpace::Hsl, Axis::Lightness);
    pub const HWB_H: Coordinate = Coordinate::of(ColorSpace::Hwb, Axis::Hue);
    pub const HWB_W: Coordinate = Coordinate::of(ColorSpace::Hwb, Axis::Whiteness);
    pub const HWB_B: Coordinate = Coordinate::of(ColorSpace::Hwb, Axis::Blackness);
    pub const OKLCH_L: Coordinate = Coordinate::of(ColorSpace::Oklch, Axis::Lightness);
    pub const OKLCH_C: Coordinate = Coordinate::of(ColorSpace::Oklch, Axis::Chroma);
    pub const OKLCH_H: Coordinate = Coordinate::of(ColorSpace::Oklch, Axis::Hue);
    pub const LCH_L: Coordinate = Coordinate::of(ColorSpace::Lch, Axis::Lightness);
    pub const LCH_C: Coordinate = Coordinate::of(ColorSpace::Lch, Axis::Chroma);
    pub const LCH_H: Coordinate = Coordinate::of(ColorSpace::Lch, Axis::Hue);

    const fn of(space: ColorSpace, axis: Axis) -> Self {
        Self { space, axis }
    }

    /// Fails when `axis` is not one of the axes of `space`.
    pub fn new(space: ColorSpace, axis: Axis) -> Result<Self> {
        match space.axis_index(axis) {
            Some(_) => Ok(Self { space, axis }),
            None => Err(Error::InvalidCoordinate(format!(
                "{}.{}",
                space,
                axis.letter()
            ))),
        }
    }

    pub fn space(&self) -> ColorSpace {
        self.space
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    fn index(&self) -> usize {
        // Guaranteed by construction.
        self.space.axis_index(self.axis).unwrap_or(0)
    }

    /// Natural domain of the axis, as offered by a color picker.
    pub fn range(&self) -> (f64, f64) {
        match (self.space, self.axis) {
            (_, Axis::Hue) => (0.0, 360.0),
            (ColorSpace::Srgb, _) => (0.0, 1.0),
            (ColorSpace::Oklch, Axis::Lightness) => (0.0, 1.0),
            (ColorSpace::Oklch, _) => (0.0, 0.4),
            (ColorSpace::Lch, Axis::Chroma) => (0.0, 150.0),
            _ => (0.0, 100.0),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.space, self.axis.letter())
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate(s.to_string());
        let (space, letter) = s.trim().split_once('.').ok_or_else(invalid)?;
        let space: ColorSpace = space.parse().map_err(|_| invalid())?;
        space
            .axes()
            .into_iter()
            .find(|axis| letter.len() == 1 && letter.starts_with(axis.letter()))
            .map(|axis| Coordinate { space, axis })
            .ok_or_else(invalid)
    }
}

/// A color stored in the space where it was last written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorValue {
    space: ColorSpace,
    coords: [f64; 3],
}

impl ColorValue {
    /// Create a color from coordinates in `space`. Hues are normalized to `[0, 360)`.
    pub fn new(space: ColorSpace, mut coords: [f64; 3]) -> Self {
        if let Some(h) = space.hue_index() {
            coords[h] = coords[h].rem_euclid(360.0);
        }
        Self { space, coords }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            ColorSpace::Srgb,
            [r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0],
        )
    }

    pub fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self::new(ColorSpace::Oklch, [l, c, h])
    }

    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::new(ColorSpace::Hsl, [h, s, l])
    }

    pub fn hwb(h: f64, w: f64, b: f64) -> Self {
        Self::new(ColorSpace::Hwb, [h, w, b])
    }

    pub fn white() -> Self {
        Self::from_rgb8(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::from_rgb8(0, 0, 0)
    }

    /// The neutral fallback color, `#dddddd`.
    pub fn neutral() -> Self {
        Self::from_rgb8(0xdd, 0xdd, 0xdd)
    }

    /// Parse hex or CSS functional notation.
    pub fn parse(input: &str) -> Result<Self> {
        parse::parse_color(input)
    }

    /// Parse `input`, falling back to [`ColorValue::neutral`] when it is not a color.
    pub fn parse_or_default(input: &str) -> Self {
        match Self::parse(input) {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!("{}, falling back to {}", err, DEFAULT_COLOR_HEX);
                Self::neutral()
            }
        }
    }

    pub fn space(&self) -> ColorSpace {
        self.space
    }

    pub fn coords(&self) -> [f64; 3] {
        self.coords
    }

    /// Coordinates of this color in `space`.
    pub fn coords_in(&self, space: ColorSpace) -> [f64; 3] {
        convert::convert(self.space, space, self.coords)
    }

    /// The same color expressed in `space`.
    pub fn to(&self, space: ColorSpace) -> Self {
        Self::new(space, self.coords_in(space))
    }

    pub fn get(&self, coordinate: Coordinate) -> f64 {
        self.coords_in(coordinate.space)[coordinate.index()]
    }

    /// Write one axis. The color moves to the coordinate's space.
    pub fn set(&mut self, coordinate: Coordinate, value: f64) {
        let mut coords = self.coords_in(coordinate.space);
        coords[coordinate.index()] = value;
        *self = Self::new(coordinate.space, coords);
    }

    /// Copy of this color with one axis replaced.
    pub fn with(mut self, coordinate: Coordinate, value: f64) -> Self {
        self.set(coordinate, value);
        self
    }

    /// Whether the color has no meaningful OKLCH hue.
    pub fn is_achromatic(&self) -> bool {
        match self.space.hue_index() {
            Some(_) if self.space != ColorSpace::Hwb => self.space.is_achromatic(self.coords),
            _ => ColorSpace::Oklch.is_achromatic(self.coords_in(ColorSpace::Oklch)),
        }
    }

    /// Mix with `other` in `space`; `amount` is the share of `other` (0 keeps `self`).
    pub fn mix(&self, other: &ColorValue, amount: f64, space: ColorSpace) -> Self {
        let coords = interpolation::interpolate(
            space,
            self.coords_in(space),
            other.coords_in(space),
            amount,
        );
        Self::new(space, coords)
    }

    /// `count` evenly spaced colors from `self` to `other`, both ends included.
    pub fn steps(&self, other: &ColorValue, space: ColorSpace, count: usize) -> Vec<Self> {
        match count {
            0 => vec![],
            1 => vec![self.to(space)],
            _ => {
                let start = self.coords_in(space);
                let end = other.coords_in(space);
                (0..count)
                    .map(|i| {
                        let t = i as f64 / (count - 1) as f64;
                        Self::new(space, interpolation::interpolate(space, start, end, t))
                    })
                    .collect()
            }
        }
    }

    pub fn in_gamut(&self) -> bool {
        gamut::in_srgb_gamut(self.coords_in(ColorSpace::Srgb))
    }

    /// Map into the sRGB gamut, returning an sRGB color.
    pub fn to_gamut(&self) -> Self {
        Self::new(ColorSpace::Srgb, gamut::map_to_srgb(self.space, self.coords))
    }

    /// WCAG 2.1 relative luminance.
    pub fn luminance(&self) -> f64 {
        let [r, g, b] = convert::to_linear_srgb(self.space, self.coords);
        (0.2126729 * r + 0.7151522 * g + 0.0721750 * b).max(0.0)
    }

    /// WCAG 2.1 contrast ratio, from 1 to 21.
    pub fn contrast_wcag21(&self, other: &ColorValue) -> f64 {
        let a = self.luminance();
        let b = other.luminance();
        let (lighter, darker) = if a > b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// 8-bit sRGB channels after gamut mapping.
    pub fn to_rgb8(&self) -> [u8; 3] {
        gamut::map_to_srgb(self.space, self.coords)
            .map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self::neutral()
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ColorValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ColorValue {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl Serialize for ColorValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Cow::<'de, str>::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&text))
    }
}

impl JsonSchema for ColorValue {
    fn schema_name() -> Cow<'static, str> {
        "ColorValue".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "description": "Hex color such as `#3b82f6`, or CSS `oklch()`, `lch()`, `hsl()`, `hwb()`, `rgb()` notation.",
        })
    }
}
