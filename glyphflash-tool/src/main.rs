//! glyphflash - glyph bitmap generator and serial flasher
//!
//! Renders strings with a TrueType font into packed 1-bit bitmaps, emits
//! them as C source for a display firmware, and optionally streams the
//! bitmap data to a microcontroller over a serial port.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod font;
mod pipeline;
mod preview;

use crate::config::{load_config, ConfigOverrides};

#[derive(Parser, Debug)]
#[command(author, version, about = "Glyph bitmap generator and serial flasher", long_about = None)]
struct Cli {
    /// Configuration file (default: glyphflash.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output - shows per-asset and per-chunk detail
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every configured asset and emit the firmware source
    Generate(GenerateArgs),
    /// Stream a raw file to the device
    Upload(UploadArgs),
    /// List available serial ports
    Ports,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TrueType/OpenType font file
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in pixels per em
    #[arg(long)]
    size: Option<f32>,

    /// Output source file (default: stdout)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for PNG previews of every asset
    #[arg(long)]
    preview_dir: Option<PathBuf>,

    /// Stream the upload assets to the device after generating
    #[arg(long, default_value_t = false)]
    upload: bool,
}

#[derive(Args, Debug)]
struct UploadArgs {
    /// File to send
    file: PathBuf,

    /// Serial port name
    #[arg(long)]
    port: Option<String>,

    /// Baud rate
    #[arg(long)]
    baud: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate(args) => {
            let overrides = ConfigOverrides {
                font_path: args.font,
                font_size: args.size,
                output_path: args.out,
                preview_dir: args.preview_dir,
                upload: args.upload,
                ..ConfigOverrides::default()
            };
            let config = load_config(cli.config.as_deref(), overrides)?;
            pipeline::generate(&config)
        }
        Commands::Upload(args) => {
            let overrides = ConfigOverrides {
                port: args.port,
                baud: args.baud,
                ..ConfigOverrides::default()
            };
            let config = load_config(cli.config.as_deref(), overrides)?;
            pipeline::upload_file(&args.file, &config.upload)
        }
        Commands::Ports => pipeline::list_ports(),
    }
}

/// Log to stderr so stdout carries only the generated source
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "glyphflash={level},glyphflash_hal_serialport={level}",
            level = level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
