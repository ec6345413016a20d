//! Convert command implementation.
//!
//! Imports each input image and writes it back out in the requested formats.

use std::path::PathBuf;

use clap::Args;

use super::{write_exports, ExportArgs, Stamper};
use crate::codec::XqstCodec;
use crate::config::{collect_images, Config};
use crate::error::{XqError, Result};
use crate::export::import_file;
use crate::output::{display_path, plural, Printer};

/// Re-export existing images in other formats
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Image files or directories to convert
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub export: ExportArgs,
}

pub fn run(args: ConvertArgs, config: &Config, printer: &Printer) -> Result<()> {
    let files = collect_images(&args.inputs);
    if files.is_empty() {
        printer.warning("Skipped", "no image files found");
        return Ok(());
    }

    let codec = XqstCodec;
    let exporter = args.export.exporter(codec, config);
    let output = args.export.output_dir(config);
    let mut stamper = Stamper::default();
    let mut failed = 0;

    for file in &files {
        let converted = import_file(&codec, file).and_then(|canvas| {
            write_exports(
                &canvas,
                &exporter,
                &args.export.format,
                &output,
                stamper.next(),
                printer,
            )
        });

        if let Err(e) = converted {
            printer.error("Failed", &format!("{}: {}", display_path(file), e));
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(XqError::Export {
            message: format!(
                "{} of {} could not be converted",
                failed,
                plural(files.len(), "image", "images")
            ),
            help: None,
        });
    }

    printer.info("Converted", &plural(files.len(), "image", "images"));
    Ok(())
}
