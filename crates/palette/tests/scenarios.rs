use std::{fs, sync::Arc};

use palette_builder::{
    Aligner, AlignerContrastMode, AlignerSettings, ColorValue, Coordinate, InMemoryPaletteRepository,
    InterpolationColorSpace, PaletteBuilder, PalettesSettings, RecommendationFlag, TintNamingMode,
    hue_name,
};
use uuid::Uuid;

const BLUE: &str = "#3B82F6";

fn builder() -> PaletteBuilder {
    PaletteBuilder::new(Arc::new(InMemoryPaletteRepository::new()))
}

fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[test]
fn blue_scale() {
    let mut builder = builder();
    let palette = builder.create_palette_from_hex(BLUE).unwrap();
    let tints = &palette.tints;

    assert_eq!(tints.len(), 11);
    assert_eq!(tints[5].color.to_hex(), "#3b82f6");
    assert_eq!(tints[5].name, "500");

    let [r, _, b] = tints[0].color.to_rgb8();
    assert!(b > r);
    assert!(tints[0].color.get(Coordinate::OKLCH_L) > 0.9);
    assert!(hue_distance(tints[0].color.get(Coordinate::OKLCH_H), 258.6) < 1.0);

    let [r, _, b] = tints[10].color.to_rgb8();
    assert!(b >= r);
    assert!(tints[10].color.get(Coordinate::OKLCH_L) < 0.2);

    for pair in tints.windows(2) {
        let (lighter, darker) = (&pair[0].color, &pair[1].color);
        assert!(
            lighter.get(Coordinate::OKLCH_L) > darker.get(Coordinate::OKLCH_L),
            "{lighter} is not lighter than {darker}"
        );
    }
}

#[test]
fn blue_complementary_is_orange() {
    let builder = builder();
    let blue = ColorValue::parse(BLUE).unwrap();
    let groups = builder.recommendations(&blue);
    let complementary = &groups
        .iter()
        .find(|group| group.flag == RecommendationFlag::Complementary)
        .unwrap()
        .colors[0];

    let expected = blue.get(Coordinate::OKLCH_H) + 180.0;
    let hue = complementary.color.get(Coordinate::OKLCH_H);
    assert!(hue_distance(hue, expected) < 6.0, "hue {hue}");
    assert_eq!(complementary.name, "orange");
    assert_eq!(complementary.name, hue_name(&complementary.color));
    assert!(complementary.color.in_gamut());
}

#[test]
fn every_space_and_length() {
    for space in [
        InterpolationColorSpace::Oklch,
        InterpolationColorSpace::Lch,
        InterpolationColorSpace::Hsl,
    ] {
        let mut builder = builder();
        builder.create_palette_from_hex(BLUE).unwrap();
        for steps in 3..=20 {
            builder
                .set_settings(PalettesSettings {
                    steps,
                    interpolation_color_space: space,
                    ..Default::default()
                })
                .unwrap();
            let palette = builder.palette(0).unwrap();
            assert_eq!(palette.tints.len(), steps);
            assert_eq!(palette.tints[steps / 2].color.to_hex(), "#3b82f6");
            assert!(palette.tints.iter().all(|tint| tint.color.in_gamut()));
        }
    }
}

#[test]
fn anchor_hue_reaches_the_end() {
    let mut builder = builder();
    let mut palette = builder.create_palette_from_hex(BLUE).unwrap();
    palette.tints[2].color = ColorValue::oklch(0.85, 0.08, 200.0);
    palette.tints[2].is_anchor = true;

    let palette = builder.update_palette(0, palette).unwrap();
    let first = palette.tints[0].color.get(Coordinate::OKLCH_H);
    assert!(hue_distance(first, 200.0) < 3.0, "hue {first}");
    assert!(palette.tints[2].is_anchor);
}

#[test]
fn contrast_readout_against_palette_step() {
    let mut builder = builder();
    builder.create_palette_from_hex(BLUE).unwrap();
    builder.set_aligner_settings(AlignerSettings {
        aligner: Aligner::ContrastColor,
        aligner_contrast_mode: AlignerContrastMode::PaletteStep,
        aligner_contrast_palette_step: 0,
        ..Default::default()
    });

    let readouts = builder.readouts(0).unwrap();
    assert_eq!(readouts[0][0].formatted(), "1.00");
    let darkest = readouts[10][0].value;
    assert!(darkest > 15.0, "contrast {darkest}");
}

#[test]
fn settings_file() {
    let path = std::env::temp_dir().join(format!("palette-settings-{}.json", Uuid::new_v4()));
    fs::write(
        &path,
        r#"{ "steps": 42, "tintNamingMode": "0,10,20...", "paletteSettings": { "lightnessMax": 2.0 } }"#,
    )
    .unwrap();

    let settings = PalettesSettings::from_json_file(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(settings.steps, 20);
    assert_eq!(settings.tint_naming_mode, TintNamingMode::ZeroTen);
    assert_eq!(settings.palette_settings.lightness_max, 1.0);
    assert_eq!(settings.palette_settings.lightness_min, 0.1);

    let mut builder = PaletteBuilder::with_settings(Arc::new(InMemoryPaletteRepository::new()), settings);
    let palette = builder.create_palette_from_hex(BLUE).unwrap();
    assert_eq!(palette.tints[0].name, "0");
    assert_eq!(palette.tints[0].color.to_hex(), "#ffffff");
}
