//! Info command implementation.
//!
//! Prints the decoded header, the palette and how often each slot is used.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::codec::{Header, PixelBuffer, XqstCodec};
use crate::error::{XqError, Result};
use crate::export::decode_buffer;
use crate::output::{display_path, plural, Printer};

/// Show the header and palette of an image
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Image file (binary or hex)
    pub file: PathBuf,

    /// Print a JSON report to stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct ImageReport {
    pub header: Header,
    pub palette: Vec<SlotReport>,
}

#[derive(Debug, Serialize)]
pub struct SlotReport {
    pub slot: usize,
    pub colour: String,
    pub pixels: usize,
}

impl ImageReport {
    pub fn from_buffer<B: PixelBuffer>(buffer: &B) -> Self {
        let header = buffer.header().clone();
        let mut counts = vec![0usize; buffer.palette().len()];
        for y in 0..header.height {
            for x in 0..header.width {
                if let Some(count) = counts.get_mut(buffer.get_pixel(x, y)) {
                    *count += 1;
                }
            }
        }

        let palette = buffer
            .palette()
            .iter()
            .zip(counts)
            .enumerate()
            .map(|(slot, (colour, pixels))| SlotReport {
                slot,
                colour: colour.clone(),
                pixels,
            })
            .collect();

        Self { header, palette }
    }
}

pub fn run(args: InfoArgs, printer: &Printer) -> Result<()> {
    let bytes = fs::read(&args.file).map_err(|e| XqError::Io {
        path: args.file.clone(),
        message: format!("Failed to read image: {}", e),
    })?;
    let buffer = decode_buffer(&XqstCodec, &bytes)?;
    let report = ImageReport::from_buffer(&buffer);

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| XqError::Export {
            message: format!("Failed to serialize report: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    let header = &report.header;
    printer.info("Image", &display_path(&args.file));
    printer.info(
        "Size",
        &format!(
            "{}x{}, {} (version {})",
            header.width,
            header.height,
            plural(header.num_colors, "colour", "colours"),
            header.version
        ),
    );
    if header.alpha {
        printer.info("Alpha", "palette carries alpha");
    }
    if header.background_included {
        printer.info("Background", &format!("slot {}", header.background_index));
    }
    for slot in &report.palette {
        printer.info(
            &format!("{}", slot.slot),
            &format!(
                "{} {}",
                slot.colour,
                printer.dim(&plural(slot.pixels, "pixel", "pixels"))
            ),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::export::{ExportFormat, Exporter};
    use crate::types::Palette;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn report_for(canvas: &Canvas) -> ImageReport {
        let bytes = Exporter::new(XqstCodec)
            .export(canvas, ExportFormat::Binary, 1)
            .unwrap()
            .contents;
        ImageReport::from_buffer(&decode_buffer(&XqstCodec, &bytes).unwrap())
    }

    #[test]
    fn test_report_counts_slots() {
        let mut canvas = Canvas::new(2, 2, Palette::new(3).unwrap()).unwrap();
        canvas.set_pixel(0, 0, 2);
        canvas.set_pixel(1, 0, 2);
        canvas.set_pixel(0, 1, 1);

        let report = report_for(&canvas);
        let counts: Vec<usize> = report.palette.iter().map(|s| s.pixels).collect();
        assert_eq!(counts, vec![1, 1, 2]);
        assert_eq!(report.header.num_colors, 3);
    }

    #[test]
    fn test_report_json_shape() {
        let report = report_for(&Canvas::new(1, 1, Palette::default()).unwrap());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["header"]["width"], 1);
        assert_eq!(value["palette"][1]["slot"], 1);
        assert_eq!(value["palette"][0]["pixels"], 1);
    }

    #[test]
    fn test_run_missing_file() {
        let dir = tempdir().unwrap();
        let args = InfoArgs {
            file: dir.path().join("missing.xqst"),
            json: false,
        };
        assert!(matches!(
            run(args, &Printer::new().quiet(true)),
            Err(XqError::Io { .. })
        ));
    }
}
