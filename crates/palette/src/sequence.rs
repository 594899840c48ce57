//! Rebuilding a tint scale around its pinned tints.
//!
//! A build runs in three passes:
//!
//! 1. Anchor placement: the first tint, the center and the last tint, plus
//!    every flagged anchor still inside the scale, are copied to their slot.
//! 2. Gap fill: each run of empty slots is filled by interpolating between
//!    the two pinned tints around it.
//! 3. Materialization: colors are mapped into sRGB, named and flagged.
//!
//! Pinned colors are mapped into sRGB before they are interpolated from, so
//! rebuilding an already built scale reproduces it exactly.

use itertools::Itertools as _;

use crate::{
    color::{ColorSpace, ColorValue},
    ends::resolve_ends,
    naming::tint_name,
    palette::{Palette, Tint},
    settings::PalettesSettings,
};

/// Rebuild `original` to `settings.steps` tints, keeping pinned tints unchanged.
///
/// Returns an empty scale when `original` is empty.
pub fn build_tints(original: &[Tint], settings: &PalettesSettings) -> Vec<Tint> {
    let steps = settings.steps;
    if original.is_empty() || steps == 0 {
        return vec![];
    }

    let slots = place_anchors(original, steps);
    let colors = fill_gaps(&slots, settings.interpolation_color_space.color_space());
    let center = steps / 2;

    let tints: Vec<Tint> = colors
        .into_iter()
        .enumerate()
        .filter_map(|(index, color)| {
            let Some(color) = color else {
                tracing::error!(index, "tint left unresolved");
                return None;
            };
            let existing = original.get(index).map(|tint| tint.name.as_str());
            Some(Tint {
                name: tint_name(index, steps, settings.tint_naming_mode, existing),
                color: color.to_gamut(),
                is_anchor: index != center
                    && slots[index].as_ref().is_some_and(|tint| tint.is_anchor),
                is_center: index == center,
            })
        })
        .collect();

    tracing::debug!(
        steps,
        pinned = slots.iter().flatten().count(),
        space = %settings.interpolation_color_space.color_space(),
        "built tints"
    );
    tints
}

/// Pass 1: copy pinned tints to their slot, every other slot is empty.
fn place_anchors(original: &[Tint], steps: usize) -> Vec<Option<Tint>> {
    let center = steps / 2;
    let last = steps - 1;

    (0..steps)
        .map(|index| {
            let tint = if index == 0 {
                original.first().cloned()
            } else if index == center {
                Some(center_tint(original))
            } else if index == last {
                original.last().cloned()
            } else {
                original
                    .get(index)
                    .filter(|tint| tint.is_anchor && !tint.is_center)
                    .cloned()
            };
            tint.map(|mut tint| {
                tint.color = tint.color.to_gamut();
                tint
            })
        })
        .collect()
}

/// The flagged center, or the middle tint promoted to center.
fn center_tint(original: &[Tint]) -> Tint {
    match original.iter().find(|tint| tint.is_center) {
        Some(tint) => tint.clone(),
        None => Tint {
            is_center: true,
            ..original[original.len() / 2].clone()
        },
    }
}

/// Pass 2: interpolate across each maximal run of empty slots.
fn fill_gaps(slots: &[Option<Tint>], space: ColorSpace) -> Vec<Option<ColorValue>> {
    let mut colors: Vec<Option<ColorValue>> = slots
        .iter()
        .map(|slot| slot.as_ref().map(|tint| tint.color))
        .collect();

    let pinned = slots
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| slot.as_ref().map(|tint| (index, tint.color)));

    for ((from, start), (to, end)) in pinned.tuple_windows() {
        if to - from < 2 {
            continue;
        }
        tracing::trace!(from, to, "filling run");
        let steps = start.steps(&end, space, to - from + 1);
        for (offset, color) in steps.into_iter().enumerate().take(to - from).skip(1) {
            colors[from + offset] = Some(color);
        }
    }

    colors
}

/// Re-derive the unpinned ends of `palette` from its center, then rebuild it.
pub fn recompute(palette: &Palette, settings: &PalettesSettings) -> Palette {
    let Some(center) = palette.center_index() else {
        return palette.clone();
    };

    let (start, end) = resolve_ends(
        &palette.tints[center].color,
        &palette.settings,
        Some(&palette.tints),
        settings.interpolation_color_space,
    );

    let mut tints = palette.tints.clone();
    let last = tints.len() - 1;
    if center != 0 && !tints[0].is_anchor {
        tints[0].color = start;
    }
    if center != last && !tints[last].is_anchor {
        tints[last].color = end;
    }

    Palette {
        tints: build_tints(&tints, settings),
        ..palette.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::InterpolationColorSpace;

    fn settings(steps: usize) -> PalettesSettings {
        PalettesSettings {
            steps,
            ..Default::default()
        }
    }

    fn seed() -> Vec<Tint> {
        vec![
            Tint::new("50", ColorValue::parse("#eff6ff").unwrap()),
            Tint::new("100", ColorValue::parse("#3b82f6").unwrap()).center(),
            Tint::new("150", ColorValue::parse("#172554").unwrap()),
        ]
    }

    fn hexes(tints: &[Tint]) -> Vec<String> {
        tints.iter().map(|tint| tint.color.to_hex()).collect()
    }

    #[test]
    fn test_empty() {
        assert!(build_tints(&[], &settings(11)).is_empty());
    }

    #[test]
    fn test_expand_seed() {
        let tints = build_tints(&seed(), &settings(11));
        assert_eq!(tints.len(), 11);
        assert_eq!(tints[0].color.to_hex(), "#eff6ff");
        assert_eq!(tints[5].color.to_hex(), "#3b82f6");
        assert_eq!(tints[10].color.to_hex(), "#172554");
        assert!(tints[5].is_center);
        assert_eq!(tints.iter().filter(|tint| tint.is_center).count(), 1);
        assert_eq!(tints[0].name, "50");
        assert_eq!(tints[10].name, "950");
        assert!(tints.iter().all(|tint| tint.color.space() == ColorSpace::Srgb));
    }

    #[test]
    fn test_fill_matches_direct_steps() {
        let seed = seed();
        let tints = build_tints(&seed, &settings(5));
        let direct = seed[0].color.steps(&seed[1].color, ColorSpace::Oklch, 3);
        assert_eq!(tints[1].color.to_hex(), direct[1].to_hex());
        assert_eq!(tints.len(), 5);
    }

    #[test]
    fn test_missing_center_is_synthesized() {
        let mut seed = seed();
        seed[1].is_center = false;
        let tints = build_tints(&seed, &settings(7));
        assert_eq!(tints[3].color.to_hex(), "#3b82f6");
        assert!(tints[3].is_center);
    }

    #[test]
    fn test_anchor_is_kept() {
        let mut tints = build_tints(&seed(), &settings(11));
        tints[2].color = ColorValue::parse("#ff0000").unwrap();
        tints[2].is_anchor = true;

        let rebuilt = build_tints(&tints, &settings(11));
        assert_eq!(rebuilt[2].color.to_hex(), "#ff0000");
        assert!(rebuilt[2].is_anchor);
        assert!(!rebuilt[3].is_anchor);
        assert_ne!(rebuilt[1].color, tints[1].color);
    }

    #[test]
    fn test_anchor_past_the_end_is_dropped() {
        let mut tints = build_tints(&seed(), &settings(11));
        tints[8].is_anchor = true;
        let shrunk = build_tints(&tints, &settings(5));
        assert_eq!(shrunk.len(), 5);
        assert!(shrunk.iter().all(|tint| !tint.is_anchor));
        assert_eq!(shrunk[4].color, tints[10].color);
    }

    #[test]
    fn test_rebuild_is_stable() {
        for space in [
            InterpolationColorSpace::Oklch,
            InterpolationColorSpace::Lch,
            InterpolationColorSpace::Hsl,
        ] {
            let settings = PalettesSettings {
                interpolation_color_space: space,
                ..Default::default()
            };
            let once = build_tints(&seed(), &settings);
            let twice = build_tints(&once, &settings);
            assert_eq!(once, twice);
            assert_eq!(hexes(&once), hexes(&twice));
        }
    }

    #[test]
    fn test_recompute_keeps_anchored_ends() {
        let palette = Palette {
            tints: build_tints(&seed(), &settings(11)),
            ..Palette::new(&ColorValue::parse("#3b82f6").unwrap(), Default::default())
        };
        let recomputed = recompute(&palette, &settings(11));
        assert_ne!(recomputed.tints[0].color.to_hex(), "#eff6ff");
        assert_eq!(recomputed.tints[5].color.to_hex(), "#3b82f6");

        let mut pinned = palette.clone();
        pinned.tints[0].is_anchor = true;
        let recomputed = recompute(&pinned, &settings(11));
        assert_eq!(recomputed.tints[0].color.to_hex(), "#eff6ff");
        assert_eq!(recomputed.id, palette.id);
    }
}
