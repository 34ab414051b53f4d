use clap::Parser;
use seamcarve::io::{load_rgb_image, save_gray_image, save_rgb_image};
use seamcarve::{
    gradient_magnitude, CarveConfig, CarvingScheme, Orientation, RgbWeights, SeamCarver,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Seam carving CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for each seam step.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    #[default]
    Carve,
    Seams,
    Energy,
}

#[derive(Debug, Default, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum SchemeConfig {
    #[default]
    VerticalFirst,
    HorizontalFirst,
    Interleaved,
}

impl From<SchemeConfig> for CarvingScheme {
    fn from(value: SchemeConfig) -> Self {
        match value {
            SchemeConfig::VerticalFirst => CarvingScheme::VerticalFirst,
            SchemeConfig::HorizontalFirst => CarvingScheme::HorizontalFirst,
            SchemeConfig::Interleaved => CarvingScheme::Interleaved,
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum SeamFilterConfig {
    #[default]
    All,
    Vertical,
    Horizontal,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct WeightsConfig {
    red: u32,
    green: u32,
    blue: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            red: 1,
            green: 1,
            blue: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    input_path: String,
    output_path: String,
    summary_path: Option<String>,
    mode: ModeConfig,
    width: Option<usize>,
    height: Option<usize>,
    scheme: SchemeConfig,
    seam_color: String,
    seams: SeamFilterConfig,
    weights: WeightsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: String::new(),
            output_path: String::new(),
            summary_path: None,
            mode: ModeConfig::Carve,
            width: None,
            height: None,
            scheme: SchemeConfig::VerticalFirst,
            seam_color: "#ff0000".to_string(),
            seams: SeamFilterConfig::All,
            weights: WeightsConfig::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Size {
    width: usize,
    height: usize,
}

#[derive(Debug, Serialize)]
struct Summary {
    mode: &'static str,
    input: Size,
    output: Size,
    vertical_seams: usize,
    horizontal_seams: usize,
    output_path: String,
}

fn parse_color(text: &str) -> Result<u32, Box<dyn std::error::Error>> {
    let hex = text.trim_start_matches('#').trim_start_matches("0x");
    let value = u32::from_str_radix(hex, 16)?;
    if hex.len() != 6 {
        return Err(format!("seam_color must be six hex digits, got {text:?}").into());
    }
    Ok(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("seamcarve=debug".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.input_path.is_empty() || config.output_path.is_empty() {
        return Err("input_path and output_path must be set in the config".into());
    }

    let image = load_rgb_image(&config.input_path)?;
    let (in_width, in_height) = (image.width(), image.height());
    let weights = RgbWeights::new(
        config.weights.red,
        config.weights.green,
        config.weights.blue,
    )?;

    if let ModeConfig::Energy = config.mode {
        let energy = gradient_magnitude(image.view(), &weights)?;
        save_gray_image(&energy, &config.output_path)?;
        return emit_summary(
            &config,
            Summary {
                mode: "energy",
                input: Size {
                    width: in_width,
                    height: in_height,
                },
                output: Size {
                    width: in_width,
                    height: in_height,
                },
                vertical_seams: 0,
                horizontal_seams: 0,
                output_path: config.output_path.clone(),
            },
        );
    }

    let target_width = config.width.unwrap_or(in_width);
    let target_height = config.height.unwrap_or(in_height);
    let carve_cfg = CarveConfig::for_target(in_width, in_height, target_width, target_height)?
        .with_scheme(config.scheme.into());
    let carver = SeamCarver::new(image.view(), carve_cfg)?.with_sampler(weights);

    let (mode, output) = match config.mode {
        ModeConfig::Seams => {
            let color = parse_color(&config.seam_color)?;
            let overlay = match config.seams {
                SeamFilterConfig::All => carver.visualize_seams(color)?,
                SeamFilterConfig::Vertical => carver.show_seams(Orientation::Vertical, color)?,
                SeamFilterConfig::Horizontal => {
                    carver.show_seams(Orientation::Horizontal, color)?
                }
            };
            ("seams", overlay)
        }
        _ => ("carve", carver.carve()?),
    };
    save_rgb_image(&output, &config.output_path)?;

    emit_summary(
        &config,
        Summary {
            mode,
            input: Size {
                width: in_width,
                height: in_height,
            },
            output: Size {
                width: output.width(),
                height: output.height(),
            },
            vertical_seams: carve_cfg.vertical_seams,
            horizontal_seams: carve_cfg.horizontal_seams,
            output_path: config.output_path.clone(),
        },
    )
}

fn emit_summary(config: &Config, summary: Summary) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&summary)?;
    match &config.summary_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
