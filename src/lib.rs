//! xqc - Indexed-palette pixel canvas
//!
//! A small editor core for palette-indexed pixel art: a canvas that stores
//! palette slots per cell, a pointer-driven painter, and export/import
//! through a pluggable pixel codec (XQST binary and hex), plus SVG and PNG
//! rendering.

pub mod canvas;
pub mod cli;
pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod interaction;
pub mod output;
pub mod session;
pub mod types;

pub use canvas::{Canvas, Purged};
pub use codec::{Header, PixelBuffer, PixelCodec, XqstBuffer, XqstCodec};
pub use config::{discover, Config};
pub use editor::Editor;
pub use error::{Result, XqError};
pub use export::{
    import_file, render_png, render_svg, Artifact, ExportFormat, ExportPayload, Exporter,
    ImportedImage, PendingImport,
};
pub use interaction::{
    GridLayout, HitTest, Painter, Point, PointerEvent, PointerKind, Response, StrokeState,
    Surface, TouchEvent,
};
pub use session::{Action, Replay, Session};
pub use types::{Cell, Colour, Palette, PixelGrid, Swatch};
