//! Tintlens — identify pixel colors and preview color-vision deficiencies.
//!
//! Opens an image in a window. Double-click a pixel to name its nearest
//! palette color; the name, RGB and hex code appear in a swatch at the top
//! left.
//!
//! Keys:
//! - `n` / `p` / `d` / `t`: normal, protanopia, deuteranopia, tritanopia
//! - `c`: copy the current color to the clipboard
//! - `Esc`: quit

mod clipboard;
mod config;
mod dialog;
mod image_loader;
mod input;
mod probe;
mod window;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tintlens_core::{Dimensions, Palette, Session, SimulationMode, resolve_available_area};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::clipboard::SystemClipboard;
use crate::config::{DISPLAY_AREA_ENV, POLL_ENV, PALETTE_ENV, ViewerConfig, parse_area};
use crate::probe::Source;
use crate::window::MinifbFrontend;

const WINDOW_TITLE: &str = "Tintlens";

const KEYS_HELP: &str = "\
Keys:
  n, p, d, t   normal / protanopia / deuteranopia / tritanopia
  c            copy the selected color
  Esc          quit";

#[derive(Parser)]
#[command(name = "tintlens", version)]
#[command(about = "Identify pixel colors and preview color-vision deficiencies")]
#[command(after_help = KEYS_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the nearest palette color of one pixel as JSON
    Probe {
        /// Image to read
        image: PathBuf,

        /// Pixel column in the original image
        #[arg(long)]
        x: u32,

        /// Pixel row in the original image
        #[arg(long)]
        y: u32,

        /// Pass the pixel through this mode before matching
        #[arg(long, default_value = "normal")]
        mode: SimulationMode,

        #[command(flatten)]
        palette: PaletteArgs,
    },
    /// Write a full-resolution simulated copy of an image
    Simulate {
        /// Image to read
        image: PathBuf,

        /// Deficiency to apply
        #[arg(long)]
        mode: SimulationMode,

        /// Output path; the format follows the extension
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct PaletteArgs {
    /// Palette table (CSV); the builtin table is used when absent
    #[arg(long, env = PALETTE_ENV)]
    palette: Option<PathBuf>,
}

#[derive(Args)]
struct ViewArgs {
    /// Image to open; a file dialog is shown when absent
    image: Option<PathBuf>,

    #[command(flatten)]
    palette: PaletteArgs,

    /// Mode active when the window opens
    #[arg(long, default_value = "normal")]
    mode: SimulationMode,

    /// Available screen area as WIDTHxHEIGHT
    #[arg(long, env = DISPLAY_AREA_ENV, value_parser = parse_area)]
    display_area: Option<Dimensions>,

    /// Bounded wait between frames, in milliseconds
    #[arg(long, env = POLL_ENV, default_value_t = 20)]
    poll_interval_ms: u64,
}

impl From<ViewArgs> for ViewerConfig {
    fn from(args: ViewArgs) -> Self {
        Self {
            image: args.image,
            palette: args.palette.palette,
            mode: args.mode,
            display_area: args.display_area,
            poll_interval: Duration::from_millis(args.poll_interval_ms),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            init_tracing("tintlens=info,tintlens_core=info");
            run_viewer(cli.view.into())
        }
        Some(Commands::Probe {
            image,
            x,
            y,
            mode,
            palette,
        }) => {
            init_tracing("tintlens=warn,tintlens_core=warn");
            run_probe(&image, x, y, mode, palette.palette.as_deref())
        }
        Some(Commands::Simulate {
            image,
            mode,
            output,
        }) => {
            init_tracing("tintlens=info,tintlens_core=info");
            run_simulate(&image, mode, &output)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so `probe` output stays machine-readable.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_palette(path: Option<&Path>) -> anyhow::Result<Palette> {
    let palette = match path {
        Some(path) => Palette::load(path)
            .with_context(|| format!("failed to load palette from {}", path.display()))?,
        None => Palette::builtin().context("builtin palette is malformed")?,
    };
    if palette.is_empty() {
        bail!("palette has no entries");
    }
    Ok(palette)
}

fn run_viewer(config: ViewerConfig) -> anyhow::Result<()> {
    let palette = load_palette(config.palette.as_deref())?;

    let (path, interactive) = match &config.image {
        Some(path) => (path.clone(), false),
        None => match dialog::pick_image() {
            Some(path) => (path, true),
            None => {
                tracing::info!("no image file was selected");
                dialog::show_info("No Image", "No image file was selected.");
                return Ok(());
            }
        },
    };

    let original = match image_loader::load_image(&path) {
        Ok(img) => img,
        Err(e) => {
            if interactive {
                dialog::show_error(&e.to_string());
            }
            return Err(e).context("failed to open image");
        }
    };

    let available = resolve_available_area(&config.geometry());
    let mut session = Session::new(palette, original, available, config.mode)
        .context("failed to start session")?;
    let canvas = session.viewport().canvas;

    let mut frontend =
        MinifbFrontend::open(WINDOW_TITLE, canvas).context("failed to open window")?;
    let mut clipboard = SystemClipboard::new();
    tintlens_core::run(&mut session, &mut frontend, &mut clipboard, config.poll_interval);
    Ok(())
}

fn run_probe(
    image: &Path,
    x: u32,
    y: u32,
    mode: SimulationMode,
    palette: Option<&Path>,
) -> anyhow::Result<()> {
    let palette = load_palette(palette)?;
    let original = image_loader::load_image(image).context("failed to open image")?;
    let source = if mode == SimulationMode::Normal {
        Source::Original
    } else {
        Source::Simulated
    };
    let report = probe::probe(&palette, &original, x, y, mode, source)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_simulate(image: &Path, mode: SimulationMode, output: &Path) -> anyhow::Result<()> {
    let original = image_loader::load_image(image).context("failed to open image")?;
    let simulated = tintlens_core::simulate(&original, mode);
    simulated
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!(output = %output.display(), %mode, "wrote simulated image");
    Ok(())
}
