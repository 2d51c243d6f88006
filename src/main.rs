use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use log::info;

use poster_split::{
    basis::{MarginMode, PageLayout, Target},
    Config,
};

/// Split an image into printable pages sized to a target output dimension.
#[derive(Parser, Debug)]
#[command(name = "poster_split", version)]
#[command(group(ArgGroup::new("size").required(true).args(["height", "width"])))]
struct Cli {
    /// Input image file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Desired output height (inches)
    #[arg(long, allow_negative_numbers = true)]
    height: Option<f64>,

    /// Desired output width (inches)
    #[arg(long, allow_negative_numbers = true)]
    width: Option<f64>,

    /// Desired output DPI; the image is resized to it before splitting
    #[arg(long, allow_negative_numbers = true)]
    dpi: Option<f64>,

    /// Page margin size (inches)
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    margin: f64,

    /// Whether the margin is taken from one edge or both edges of a page
    #[arg(long = "margin_mode", value_enum, default_value_t = MarginArg::Single)]
    margin_mode: MarginArg,

    /// Page height (inches)
    #[arg(long = "page_height", default_value_t = 11.0, allow_negative_numbers = true)]
    page_height: f64,

    /// Page width (inches)
    #[arg(long = "page_width", default_value_t = 8.5, allow_negative_numbers = true)]
    page_width: f64,

    /// Directory to write the pages into
    #[arg(long = "output_dir", value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MarginArg {
    /// usable = page - margin
    Single,
    /// usable = page - 2 * margin
    Double,
}

impl From<MarginArg> for MarginMode {
    fn from(arg: MarginArg) -> Self {
        match arg {
            MarginArg::Single => MarginMode::Single,
            MarginArg::Double => MarginMode::Double,
        }
    }
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let target = match (self.height, self.width) {
            (Some(height), None) => Target::Height(height),
            (None, Some(width)) => Target::Width(width),
            _ => bail!("exactly one of --height or --width must be given"),
        };

        Ok(Config {
            input: self.input,
            target,
            layout: PageLayout {
                page_width: self.page_width,
                page_height: self.page_height,
                margin: self.margin,
                margin_mode: self.margin_mode.into(),
            },
            dpi: self.dpi,
            output_dir: self.output_dir,
        })
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = try_main() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let config = Cli::parse().into_config()?;

    let summary = poster_split::run(&config)
        .with_context(|| format!("failed to split {}", config.input.display()))?;

    info!(
        "done: {} pages ({} wide x {} high) in {}",
        summary.written.len(),
        summary.pages_wide,
        summary.pages_high,
        config.output_dir.display()
    );

    Ok(())
}

#[test]
fn test_cli_defaults() {
    let config = Cli::try_parse_from(["poster_split", "poster.jpg", "--width", "10"])
        .unwrap()
        .into_config()
        .unwrap();
    assert_eq!(config.target, Target::Width(10.0));
    assert_eq!(config.layout, PageLayout::default());
    assert_eq!(config.dpi, None);
    assert_eq!(config.output_dir, PathBuf::from("."));
}

#[test]
fn test_cli_options() {
    let config = Cli::try_parse_from([
        "poster_split",
        "poster.jpg",
        "--height",
        "24",
        "--margin",
        "0.25",
        "--margin_mode",
        "double",
        "--page_height",
        "11.69",
        "--page_width",
        "8.27",
        "--dpi",
        "150",
        "--output_dir",
        "out",
    ])
    .unwrap()
    .into_config()
    .unwrap();

    assert_eq!(config.target, Target::Height(24.0));
    assert_eq!(
        config.layout,
        PageLayout {
            page_width: 8.27,
            page_height: 11.69,
            margin: 0.25,
            margin_mode: MarginMode::Double,
        }
    );
    assert_eq!(config.dpi, Some(150.0));
    assert_eq!(config.output_dir, PathBuf::from("out"));
}

#[test]
fn test_cli_size_is_exclusive_and_required() {
    assert!(Cli::try_parse_from(["poster_split", "poster.jpg"]).is_err());
    // 負の値は clap を通して run() 側で InvalidValue にする
    let config = Cli::try_parse_from(["poster_split", "poster.jpg", "--margin", "-1", "--width", "10"])
        .unwrap()
        .into_config()
        .unwrap();
    assert_eq!(config.layout.margin, -1.0);
    assert!(Cli::try_parse_from([
        "poster_split",
        "poster.jpg",
        "--height",
        "5",
        "--width",
        "10"
    ])
    .is_err());
}

#[test]
fn test_cli_without_single_target() {
    let cli = Cli::try_parse_from(["poster_split", "poster.jpg", "--width", "10"]).unwrap();

    let neither = Cli {
        width: None,
        ..cli
    };
    assert!(neither.into_config().is_err());

    let cli = Cli::try_parse_from(["poster_split", "poster.jpg", "--width", "10"]).unwrap();
    let both = Cli {
        height: Some(5.0),
        ..cli
    };
    assert!(both.into_config().is_err());
}
