pub mod completions;
pub mod convert;
pub mod info;
pub mod new;
pub mod replay;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::canvas::Canvas;
use crate::codec::PixelCodec;
use crate::config::{self, Config};
use crate::error::Result;
use crate::export::{timestamp_ms, ExportFormat, Exporter};
use crate::output::{display_path, Printer};

/// xqc - Indexed-palette pixel canvas tools
#[derive(Parser, Debug)]
#[command(name = "xqc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory to look for xqc.yaml in (default: current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only print errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a blank canvas and export it
    New(new::NewArgs),

    /// Re-export existing images in other formats
    Convert(convert::ConvertArgs),

    /// Show the header and palette of an image
    Info(info::InfoArgs),

    /// Replay a scripted editing session and export the result
    Replay(replay::ReplayArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Export options shared by every command that writes images.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Formats to write
    #[arg(long, short, value_enum, value_delimiter = ',', default_value = "binary")]
    pub format: Vec<ExportFormat>,

    /// Output directory (default: from xqc.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Integer upscale for PNG output (default: from xqc.yaml)
    #[arg(long)]
    pub png_scale: Option<u32>,
}

impl ExportArgs {
    pub fn output_dir(&self, config: &Config) -> PathBuf {
        self.output.clone().unwrap_or_else(|| config.output.clone())
    }

    pub fn exporter<C: PixelCodec>(&self, codec: C, config: &Config) -> Exporter<C> {
        Exporter::new(codec).with_png_scale(self.png_scale.unwrap_or(config.png_scale))
    }
}

/// Load xqc.yaml from `dir`, or from the current directory.
pub fn load_config(dir: Option<&Path>) -> Result<Config> {
    config::discover(dir.unwrap_or_else(|| Path::new(".")))
}

/// Hands out artifact timestamps that never repeat within a run.
#[derive(Debug, Default)]
pub struct Stamper {
    last: Option<u128>,
}

impl Stamper {
    pub fn next(&mut self) -> u128 {
        let now = timestamp_ms();
        let stamp = match self.last {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }
}

/// Export `canvas` in every requested format and write the artifacts.
///
/// All formats of one canvas share a timestamp.
pub fn write_exports<C: PixelCodec>(
    canvas: &Canvas,
    exporter: &Exporter<C>,
    formats: &[ExportFormat],
    output: &Path,
    stamp: u128,
    printer: &Printer,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(formats.len());
    for &format in formats {
        let artifact = exporter.export(canvas, format, stamp)?;
        let path = artifact.write_to(output)?;
        printer.status("Exported", &display_path(&path));
        written.push(path);
    }
    Ok(written)
}
