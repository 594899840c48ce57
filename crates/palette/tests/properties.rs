use palette_builder::{
    ColorSpace, ColorValue, Coordinate, InterpolationColorSpace, Palette, PaletteBuilderPayload,
    PaletteSettings, PalettesSettings, Point, Tint, build_tints, interpolate_gap, recompute,
    resolve_ends,
};
use proptest::prelude::*;

fn any_space() -> impl Strategy<Value = InterpolationColorSpace> {
    prop_oneof![
        Just(InterpolationColorSpace::Oklch),
        Just(InterpolationColorSpace::Lch),
        Just(InterpolationColorSpace::Hsl),
    ]
}

fn any_color() -> impl Strategy<Value = ColorValue> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| ColorValue::from_rgb8(r, g, b))
}

fn settings(steps: usize, space: InterpolationColorSpace) -> PalettesSettings {
    PalettesSettings {
        steps,
        interpolation_color_space: space,
        ..Default::default()
    }
}

fn seed_tints(seed: &ColorValue, settings: &PalettesSettings) -> Vec<Tint> {
    let (start, end) = resolve_ends(
        seed,
        &settings.palette_settings,
        None,
        settings.interpolation_color_space,
    );
    vec![
        Tint::new("start", start),
        Tint::new("center", *seed).center(),
        Tint::new("end", end),
    ]
}

fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

proptest! {
    #[test]
    fn rebuild_is_idempotent(
        seed in any_color(),
        steps in 3_usize..=20,
        space in any_space(),
    ) {
        let settings = settings(steps, space);
        let once = build_tints(&seed_tints(&seed, &settings), &settings);
        let twice = build_tints(&once, &settings);
        prop_assert_eq!(&once, &twice);

        let palette = Palette { tints: once, ..Palette::new(&seed, settings.palette_settings) };
        let recomputed = recompute(&palette, &settings);
        prop_assert_eq!(&recompute(&recomputed, &settings), &recomputed);
    }

    #[test]
    fn pinned_tints_survive_rebuild(
        seed in any_color(),
        anchor in any_color(),
        steps in 4_usize..=20,
        position in 0.0_f64..1.0,
        space in any_space(),
    ) {
        let settings = settings(steps, space);
        let center = steps / 2;
        let mut tints = build_tints(&seed_tints(&seed, &settings), &settings);

        let index = 1 + ((steps - 2) as f64 * position) as usize;
        prop_assume!(index != center && index < steps - 1);
        tints[index].color = anchor;
        tints[index].is_anchor = true;

        let rebuilt = build_tints(&tints, &settings);
        prop_assert_eq!(rebuilt.len(), steps);
        prop_assert_eq!(rebuilt[index].color.to_hex(), anchor.to_hex());
        prop_assert!(rebuilt[index].is_anchor);
        prop_assert_eq!(rebuilt[center].color.to_hex(), seed.to_hex());
        prop_assert_eq!(rebuilt.iter().filter(|tint| tint.is_center).count(), 1);
        prop_assert!(!rebuilt[center].is_anchor);
    }

    #[test]
    fn neutral_settings_match_direct_steps(
        seed in any_color(),
        steps in 3_usize..=20,
        space in any_space(),
    ) {
        let settings = settings(steps, space);
        let seeds = seed_tints(&seed, &settings);
        let tints = build_tints(&seeds, &settings);

        let center = steps / 2;
        let start = seeds[0].color.to_gamut();
        let end = seeds[2].color.to_gamut();
        let pinned = seed.to_gamut();
        let left = start.steps(&pinned, space.color_space(), center + 1);
        let right = pinned.steps(&end, space.color_space(), steps - center);

        prop_assert_eq!(tints[0].color, start);
        prop_assert_eq!(tints[center].color, pinned);
        prop_assert_eq!(tints[steps - 1].color, end);
        for (index, tint) in tints.iter().enumerate() {
            if index == 0 || index == center || index == steps - 1 {
                continue;
            }
            let expected = if index < center { left[index] } else { right[index - center] };
            prop_assert_eq!(tint.color, expected.to_gamut(), "tint {}", index);
        }
    }

    #[test]
    fn gap_is_continuous_at_center(
        min in -100.0_f64..0.0,
        center in 0.0_f64..100.0,
        max in 100.0_f64..200.0,
        x in 0.0_f64..=1.0,
    ) {
        let (lo, mid, hi) = (Point::new(0.0, min), Point::new(0.5, center), Point::new(1.0, max));
        prop_assert_eq!(interpolate_gap(lo, mid, hi, 0.5), center);

        let y = interpolate_gap(lo, mid, hi, x);
        prop_assert!(y >= min - 1e-9 && y <= max + 1e-9);
        if x < 0.5 {
            prop_assert!(y <= center + 1e-9);
        } else {
            prop_assert!(y >= center - 1e-9);
        }
    }

    #[test]
    fn hues_take_the_shorter_arc(
        from in 0.0_f64..360.0,
        delta in -170.0_f64..170.0,
        count in 3_usize..=20,
    ) {
        let start = ColorValue::oklch(0.6, 0.1, from);
        let end = ColorValue::oklch(0.6, 0.1, from + delta);
        for color in start.steps(&end, ColorSpace::Oklch, count) {
            let hue = color.get(Coordinate::OKLCH_H);
            prop_assert!((0.0..=360.0).contains(&hue));
            prop_assert!(hue_distance(hue, from) <= delta.abs() + 1e-9);
            prop_assert!(hue_distance(hue, from + delta) <= delta.abs() + 1e-9);
        }
    }

    #[test]
    fn payload_json_keeps_colors(
        seed in any_color(),
        steps in 3_usize..=20,
        gap in 0.0_f64..=1.0,
    ) {
        let settings = PalettesSettings {
            palette_settings: PaletteSettings { hue_gap_left: gap, ..Default::default() },
            ..settings(steps, InterpolationColorSpace::Oklch)
        };
        let palette = Palette {
            tints: build_tints(&seed_tints(&seed, &settings), &settings),
            ..Palette::new(&seed, settings.palette_settings)
        };
        let payload = PaletteBuilderPayload {
            palettes: vec![palette],
            settings,
            aligner_settings: None,
        };

        let json = payload.to_json().unwrap();
        let parsed = PaletteBuilderPayload::from_json(&json).unwrap();
        prop_assert_eq!(parsed.settings.steps, steps);
        prop_assert!((parsed.settings.palette_settings.hue_gap_left - gap).abs() < 1e-12);
        prop_assert_eq!(parsed.palettes[0].id, payload.palettes[0].id);
        let hexes = |payload: &PaletteBuilderPayload| -> Vec<String> {
            payload.palettes[0].tints.iter().map(|tint| tint.color.to_hex()).collect()
        };
        prop_assert_eq!(hexes(&parsed), hexes(&payload));
    }
}

#[test]
fn hue_wrap_spans_twenty_degrees() {
    let start = ColorValue::oklch(0.7, 0.1, 350.0);
    let end = ColorValue::oklch(0.5, 0.1, 10.0);
    let hues: Vec<f64> = start
        .steps(&end, ColorSpace::Oklch, 5)
        .iter()
        .map(|color| color.get(Coordinate::OKLCH_H))
        .collect();

    let expected = [350.0, 355.0, 0.0, 5.0, 10.0];
    for (hue, expected) in hues.iter().zip(expected) {
        assert!(hue_distance(*hue, expected) < 1e-9, "{hue} != {expected}");
    }
}
