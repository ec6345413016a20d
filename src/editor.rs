//! The editor session: one canvas and everything that acts on it.
//!
//! `Editor` is the single owner of the canvas. Input handlers, exports and
//! import completion all run through it on the owning thread; only the file
//! read and decode of an import happen elsewhere.

use std::path::PathBuf;

use crate::canvas::Canvas;
use crate::codec::PixelCodec;
use crate::error::Result;
use crate::export::{Artifact, ExportFormat, Exporter, PendingImport};
use crate::interaction::{GridLayout, Painter, PointerEvent, Response, TouchEvent};

pub struct Editor<C> {
    canvas: Canvas,
    painter: Painter,
    layout: GridLayout,
    exporter: Exporter<C>,
    pending: Option<PendingImport>,
}

impl<C> Editor<C>
where
    C: PixelCodec + Clone + Send + 'static,
{
    pub fn new(canvas: Canvas, codec: C) -> Self {
        Self {
            canvas,
            painter: Painter::new(),
            layout: GridLayout::default(),
            exporter: Exporter::new(codec),
            pending: None,
        }
    }

    /// Use a custom exporter (for a PNG scale, for instance).
    pub fn with_exporter(mut self, exporter: Exporter<C>) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn exporter(&self) -> &Exporter<C> {
        &self.exporter
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn painter(&self) -> &Painter {
        &self.painter
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Move the on-screen grid.
    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
    }

    pub fn pointer(&mut self, event: PointerEvent) -> Response {
        self.painter.handle_pointer(&mut self.canvas, &self.layout, event)
    }

    pub fn touch(&self, event: TouchEvent) -> Response {
        self.painter.handle_touch(event)
    }

    /// Start importing a file. Replaces any import still in flight.
    pub fn begin_import(&mut self, path: impl Into<PathBuf>) {
        let codec = self.exporter.codec().clone();
        self.pending = Some(PendingImport::spawn(codec, path));
    }

    pub fn is_importing(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply a finished import, if there is one.
    ///
    /// Returns `Ok(true)` when the canvas was replaced. A failed import is
    /// returned as an error and leaves the canvas as it was.
    pub fn poll_import(&mut self) -> Result<bool> {
        let Some(pending) = &self.pending else {
            return Ok(false);
        };
        let Some(result) = pending.try_take() else {
            return Ok(false);
        };

        self.pending = None;
        result?.apply_to(&mut self.canvas)?;
        Ok(true)
    }

    /// Block until the current import finishes and apply it.
    pub fn finish_import(&mut self) -> Result<bool> {
        match self.pending.take() {
            Some(pending) => {
                pending.wait()?.apply_to(&mut self.canvas)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn export(&self, format: ExportFormat, timestamp_ms: u128) -> Result<Artifact> {
        self.exporter.export(&self.canvas, format, timestamp_ms)
    }

    /// Export by format name; unknown names produce nothing.
    pub fn export_named(&self, name: &str, timestamp_ms: u128) -> Result<Option<Artifact>> {
        self.exporter.export_named(&self.canvas, name, timestamp_ms)
    }
}
