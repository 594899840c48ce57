//! The lightest and darkest tints of a scale, derived from its center.

use crate::{
    color::{ColorSpace, ColorValue, Coordinate},
    interpolation::{Point, interpolate_gap},
    palette::Tint,
    settings::{HueGapMode, InterpolationColorSpace, PaletteSettings},
};

/// Resolve `(start, end)` for a scale centered on `center`.
///
/// With `existing` tints, the chromatic anchor between the first tint and the
/// center that sits nearest to the first tint lends its OKLCH hue to `start`.
/// Likewise the anchor between the center and the last tint that sits nearest
/// to the last tint lends its hue to `end`.
pub fn resolve_ends(
    center: &ColorValue,
    settings: &PaletteSettings,
    existing: Option<&[Tint]>,
    space: InterpolationColorSpace,
) -> (ColorValue, ColorValue) {
    let settings = settings.clamped();
    let mut start = center.mix(&ColorValue::white(), settings.lightness_max, ColorSpace::Oklch);
    let mut end = center.mix(
        &ColorValue::black(),
        1.0 - settings.lightness_min,
        ColorSpace::Oklch,
    );

    if let Some(tints) = existing {
        let (left, right) = nearest_anchors(tints);
        if let Some(anchor) = left {
            start.set(Coordinate::OKLCH_H, anchor.color.get(Coordinate::OKLCH_H));
        }
        if let Some(anchor) = right {
            end.set(Coordinate::OKLCH_H, anchor.color.get(Coordinate::OKLCH_H));
        }
    }

    let sat_chroma = space.sat_chroma_axis();
    apply_gap(&mut start, sat_chroma, sat_chroma.range(), settings.sat_chroma_gap_left);
    apply_gap(&mut end, sat_chroma, sat_chroma.range(), settings.sat_chroma_gap_right);

    let hue = space.hue_axis();
    apply_hue_gap(&mut start, hue, settings.hue_gap_mode_left, settings.hue_gap_left);
    apply_hue_gap(&mut end, hue, settings.hue_gap_mode_right, settings.hue_gap_right);

    tracing::trace!(start = %start, end = %end, "resolved end tints");
    (start, end)
}

/// Chromatic anchors strictly inside `(0, center)` and `(center, last)` that sit
/// nearest to the first and to the last tint respectively.
fn nearest_anchors(tints: &[Tint]) -> (Option<&Tint>, Option<&Tint>) {
    let Some(center) = tints.iter().position(|tint| tint.is_center) else {
        return (None, None);
    };
    let last = tints.len() - 1;
    let usable = |(index, tint): &(usize, &Tint)| {
        *index != 0 && *index != last && tint.is_anchor && !tint.color.is_achromatic()
    };

    let left = tints[..center]
        .iter()
        .enumerate()
        .find(usable)
        .map(|(_, tint)| tint);
    let right = tints
        .iter()
        .enumerate()
        .skip(center + 1)
        .rev()
        .find(usable)
        .map(|(_, tint)| tint);
    (left, right)
}

fn apply_gap(color: &mut ColorValue, axis: Coordinate, (min, max): (f64, f64), gap: f64) {
    if gap == PaletteSettings::NEUTRAL_GAP {
        return;
    }
    let value = interpolate_gap(
        Point::new(0.0, min),
        Point::new(0.5, color.get(axis)),
        Point::new(1.0, max),
        gap,
    );
    color.set(axis, value);
}

fn apply_hue_gap(color: &mut ColorValue, axis: Coordinate, mode: HueGapMode, gap: f64) {
    if gap == PaletteSettings::NEUTRAL_GAP || color.is_achromatic() {
        return;
    }
    let domain = mode.domain(color.get(axis));
    apply_gap(color, axis, domain, gap);
}
