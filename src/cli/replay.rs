//! Replay command implementation.
//!
//! Runs a session script against a canvas (blank, or imported from a file)
//! and exports the result.

use std::path::PathBuf;

use clap::Args;

use super::{write_exports, ExportArgs, Stamper};
use crate::codec::XqstCodec;
use crate::config::Config;
use crate::editor::Editor;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::session::Session;

/// Replay a scripted editing session and export the result
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Session script (YAML)
    pub script: PathBuf,

    /// Start from this image instead of a blank canvas
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub export: ExportArgs,
}

pub fn run(args: ReplayArgs, config: &Config, printer: &Printer) -> Result<()> {
    let session = Session::load(&args.script)?;

    let exporter = args.export.exporter(XqstCodec, config);
    let mut editor = Editor::new(config.new_canvas()?, XqstCodec).with_exporter(exporter);

    if let Some(input) = &args.input {
        editor.begin_import(input);
        editor.finish_import()?;
        printer.info("Imported", &display_path(input));
    }

    let replay = session.replay(&mut editor)?;
    printer.info(
        "Replayed",
        &format!(
            "{}, {} painted",
            plural(replay.actions, "action", "actions"),
            plural(replay.painted, "cell", "cells")
        ),
    );

    write_exports(
        editor.canvas(),
        editor.exporter(),
        &args.export.format,
        &args.export.output_dir(config),
        Stamper::default().next(),
        printer,
    )?;
    Ok(())
}
