use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use palette_builder::{
    Aligner, AlignerContrastMode, AlignerSettings, ColorValue, InMemoryPaletteRepository,
    InterpolationColorSpace, PaletteBuilder, PaletteBuilderPayload, PalettesSettings,
    RecommendationOptions, TintNamingMode,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Build tint scales for design-system palettes.
#[derive(Parser)]
#[command(name = "tintctl", version)]
struct Cli {
    /// JSON file with palette settings.
    #[arg(long, global = true, env = "TINTCTL_CONFIG")]
    config: Option<PathBuf>,
    #[command(flatten)]
    overrides: SettingsOverrides,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a palette around a color.
    Scale {
        color: String,
    },
    /// Harmonic colors for a base color.
    Recommend {
        color: String,
        /// Also leave out colors already used by any tint of the palettes in this file.
        #[arg(long)]
        exclude: Option<PathBuf>,
        /// Give each candidate the whiteness and blackness of the base color.
        #[arg(long)]
        hwb_align: bool,
    },
    /// Aligner readout for every tint of the palette built around a color.
    Readout {
        color: String,
        #[arg(long, value_enum, default_value_t = AlignerArg::Hwb)]
        aligner: AlignerArg,
        /// Reference color for `--aligner contrast`. Defaults to the first tint.
        #[arg(long)]
        against: Option<String>,
    },
    /// Recompute every palette of a saved session.
    Rebuild {
        file: PathBuf,
        /// Write the result back to `file`.
        #[arg(long)]
        in_place: bool,
    },
    /// JSON schema of a saved session.
    Schema,
}

#[derive(Args)]
struct SettingsOverrides {
    /// Tints per palette, from 3 to 20.
    #[arg(long, global = true)]
    steps: Option<usize>,
    #[arg(long, global = true, value_enum)]
    space: Option<SpaceArg>,
    /// Naming scheme, e.g. "50,100,200...900,950".
    #[arg(long, global = true, value_parser = parse_naming_mode)]
    naming: Option<TintNamingMode>,
    #[arg(long, global = true)]
    lightness_max: Option<f64>,
    #[arg(long, global = true)]
    lightness_min: Option<f64>,
}

impl SettingsOverrides {
    fn apply(&self, mut settings: PalettesSettings) -> PalettesSettings {
        if let Some(steps) = self.steps {
            settings.steps = steps;
        }
        if let Some(space) = self.space {
            settings.interpolation_color_space = space.into();
        }
        if let Some(naming) = self.naming {
            settings.tint_naming_mode = naming;
        }
        if let Some(value) = self.lightness_max {
            settings.palette_settings.lightness_max = value;
        }
        if let Some(value) = self.lightness_min {
            settings.palette_settings.lightness_min = value;
        }
        settings.clamped()
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SpaceArg {
    Oklch,
    Lch,
    Hsl,
}

impl From<SpaceArg> for InterpolationColorSpace {
    fn from(value: SpaceArg) -> Self {
        match value {
            SpaceArg::Oklch => InterpolationColorSpace::Oklch,
            SpaceArg::Lch => InterpolationColorSpace::Lch,
            SpaceArg::Hsl => InterpolationColorSpace::Hsl,
        }
    }
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum AlignerArg {
    Hwb,
    Oklch,
    Lch,
    Contrast,
}

impl From<AlignerArg> for Aligner {
    fn from(value: AlignerArg) -> Self {
        match value {
            AlignerArg::Hwb => Aligner::Hwb,
            AlignerArg::Oklch => Aligner::Oklch,
            AlignerArg::Lch => Aligner::Lch,
            AlignerArg::Contrast => Aligner::ContrastColor,
        }
    }
}

fn parse_naming_mode(label: &str) -> Result<TintNamingMode, String> {
    TintNamingMode::from_label(label).ok_or_else(|| {
        let known: Vec<&str> = TintNamingMode::ALL.iter().map(|mode| mode.as_str()).collect();
        format!("unknown naming mode, expected one of: {}", known.join(" | "))
    })
}

fn parse_color(text: &str) -> Result<ColorValue> {
    ColorValue::parse(text).with_context(|| format!("failed to parse color {text:?}"))
}

fn load_settings(cli: &Cli) -> Result<PalettesSettings> {
    let settings = match &cli.config {
        Some(path) => PalettesSettings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => PalettesSettings::default(),
    };
    Ok(cli.overrides.apply(settings))
}

fn load_payload(path: &Path) -> Result<PaletteBuilderPayload> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    PaletteBuilderPayload::from_json(&json)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("palette_builder=info".parse()?),
        )
        .try_init()?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;
    let repository = Arc::new(InMemoryPaletteRepository::new());
    let mut builder = PaletteBuilder::with_settings(repository, settings);

    match cli.command {
        Command::Scale { color } => {
            let palette = builder.create_palette(Some(parse_color(&color)?))?;
            print_json(&palette)
        }
        Command::Recommend {
            color,
            exclude,
            hwb_align,
        } => {
            if let Some(path) = exclude {
                builder.load(load_payload(&path)?)?;
            }
            builder.set_recommendation_options(RecommendationOptions {
                hwb_align,
                ..Default::default()
            });
            print_json(&builder.recommendations(&parse_color(&color)?))
        }
        Command::Readout {
            color,
            aligner,
            against,
        } => {
            builder.create_palette(Some(parse_color(&color)?))?;
            let mut aligner_settings = AlignerSettings {
                aligner: aligner.into(),
                is_display: true,
                ..Default::default()
            };
            if let Some(against) = against {
                aligner_settings.aligner_contrast_mode = AlignerContrastMode::CustomColor;
                aligner_settings.aligner_contrast_custom_color = parse_color(&against)?;
            }
            builder.set_aligner_settings(aligner_settings);

            let palette = builder.palette(0)?;
            for (tint, values) in palette.tints.iter().zip(builder.readouts(0)?) {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                println!("{:>5}  {}  {}", tint.name, tint.color, values.join("  "));
            }
            Ok(())
        }
        Command::Rebuild { file, in_place } => {
            let mut payload = load_payload(&file)?;
            payload.settings = match cli.config {
                Some(_) => settings,
                None => cli.overrides.apply(payload.settings),
            };
            builder.load(payload)?;
            builder.update_palettes()?;

            let json = builder.payload().to_json()?;
            if in_place {
                fs::write(&file, json)
                    .with_context(|| format!("failed to write {}", file.display()))?;
                tracing::info!("rebuilt {}", file.display());
            } else {
                println!("{json}");
            }
            Ok(())
        }
        Command::Schema => print_json(&schemars::schema_for!(PaletteBuilderPayload)),
    }
}

fn main() -> Result<()> {
    init_tracing()?;
    run(Cli::parse())
}
