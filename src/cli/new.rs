//! New command implementation.
//!
//! Builds a blank canvas from xqc.yaml plus any flags and exports it.

use clap::Args;

use super::{write_exports, ExportArgs, Stamper};
use crate::codec::XqstCodec;
use crate::config::Config;
use crate::error::Result;
use crate::output::Printer;
use crate::types::Swatch;

/// Create a blank canvas and export it
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Width in cells
    #[arg(long)]
    pub width: Option<u32>,

    /// Height in cells
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of palette slots
    #[arg(long)]
    pub palette_size: Option<usize>,

    /// Palette colours, in slot order (replaces the configured palette)
    #[arg(long = "colour", value_name = "HEX")]
    pub colours: Vec<String>,

    #[command(flatten)]
    pub export: ExportArgs,
}

impl NewArgs {
    /// The configuration with command line overrides applied.
    fn resolve(&self, config: &Config) -> Config {
        let mut resolved = config.clone();
        if let Some(width) = self.width {
            resolved.width = width;
        }
        if let Some(height) = self.height {
            resolved.height = height;
        }
        if self.palette_size.is_some() {
            resolved.palette_size = self.palette_size;
        }
        if !self.colours.is_empty() {
            resolved.palette = self.colours.iter().map(|c| Swatch::normalize(c)).collect();
        }
        resolved
    }
}

pub fn run(args: NewArgs, config: &Config, printer: &Printer) -> Result<()> {
    let resolved = args.resolve(config);
    let canvas = resolved.new_canvas()?;

    printer.info(
        "Created",
        &format!(
            "{}x{} canvas, palette {}",
            canvas.width(),
            canvas.height(),
            canvas.palette_string()
        ),
    );

    let exporter = args.export.exporter(XqstCodec, &resolved);
    write_exports(
        &canvas,
        &exporter,
        &args.export.format,
        &args.export.output_dir(&resolved),
        Stamper::default().next(),
        printer,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::export::read_file;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn parse(argv: &[&str]) -> NewArgs {
        match Cli::parse_from(argv).command {
            Commands::New(args) => args,
            _ => panic!("expected new"),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&["xqc", "new", "--width", "4", "--colour", "000", "--colour", "#fff"]);
        let config = Config {
            height: 3,
            ..Config::default()
        };
        let resolved = args.resolve(&config);

        assert_eq!((resolved.width, resolved.height), (4, 3));
        assert_eq!(
            resolved.palette,
            vec![Swatch::normalize("#000000"), Swatch::normalize("#fff000")]
        );
    }

    #[test]
    fn test_run_writes_binary() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let args = parse(&[
            "xqc",
            "new",
            "--width",
            "5",
            "--height",
            "2",
            "--palette-size",
            "4",
            "-o",
            out.to_str().unwrap(),
        ]);

        run(args, &Config::default(), &Printer::new().quiet(true)).unwrap();

        let files: Vec<_> = fs::read_dir(&out).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(files.len(), 1);
        let image = read_file(&XqstCodec, &files[0]).unwrap();
        assert_eq!((image.width, image.height), (5, 2));
        assert_eq!(image.palette.len(), 4);
    }

    #[test]
    fn test_run_rejects_small_palette() {
        let dir = tempdir().unwrap();
        let args = parse(&[
            "xqc",
            "new",
            "--palette-size",
            "1",
            "-o",
            dir.path().to_str().unwrap(),
        ]);
        assert!(run(args, &Config::default(), &Printer::new().quiet(true)).is_err());
    }
}
