//! Loading images back into a canvas.
//!
//! An imported image is always dense: every palette entry becomes an
//! explicit override and every cell in bounds gets a stored slot.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::canvas::{check_dimensions, Canvas};
use crate::codec::{decode_hex, is_hex_text, PixelBuffer, PixelCodec};
use crate::error::{XqError, Result};
use crate::types::{Cell, Palette, PixelGrid, Swatch};

/// A decoded image, detached from the codec that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedImage {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<Swatch>,
    /// Stored slot per cell, row-major.
    pub pixels: Vec<usize>,
}

impl ImportedImage {
    /// Copy everything out of a codec buffer.
    pub fn from_buffer<B: PixelBuffer>(buffer: &B) -> Self {
        let header = buffer.header();
        let (width, height) = (header.width, header.height);

        let palette = buffer
            .palette()
            .iter()
            .map(|colour| Swatch::normalize(colour))
            .collect();

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(buffer.get_pixel(x, y));
            }
        }

        Self {
            width,
            height,
            palette,
            pixels,
        }
    }

    /// The stored slot for a cell, 0 outside the image.
    pub fn slot(&self, x: u32, y: u32) -> usize {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Replace the canvas image with this one in a single step.
    ///
    /// The canvas is untouched if the dimensions are invalid or the pixel
    /// count does not match them.
    pub fn apply_to(self, canvas: &mut Canvas) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(XqError::Validation {
                message: format!(
                    "Imported {}x{} image has {} pixels, expected {}",
                    self.width,
                    self.height,
                    self.pixels.len(),
                    expected
                ),
                help: None,
            });
        }

        let width = self.width;
        let pixels: PixelGrid = self
            .pixels
            .iter()
            .enumerate()
            .map(|(i, &slot)| {
                let cell = Cell::new(i as u32 % width, i as u32 / width);
                (cell, slot)
            })
            .collect();

        canvas.replace_image(self.width, self.height, Palette::from_dense(self.palette), pixels)
    }
}

/// Parse file contents into a codec buffer, accepting raw codec bytes or a
/// hex artifact.
pub fn decode_buffer<C: PixelCodec>(codec: &C, bytes: &[u8]) -> Result<C::Buffer> {
    if is_hex_text(bytes) {
        let text = std::str::from_utf8(bytes).map_err(|e| XqError::codec(e.to_string()))?;
        codec.parse(&decode_hex(text)?)
    } else {
        codec.parse(bytes)
    }
}

/// Decode file contents into an image.
pub fn decode<C: PixelCodec>(codec: &C, bytes: &[u8]) -> Result<ImportedImage> {
    Ok(ImportedImage::from_buffer(&decode_buffer(codec, bytes)?))
}

/// Read and decode an image file.
pub fn read_file<C: PixelCodec>(codec: &C, path: &Path) -> Result<ImportedImage> {
    let bytes = fs::read(path).map_err(|e| XqError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read image: {}", e),
    })?;
    decode(codec, &bytes)
}

/// Read an image file into a fresh canvas.
pub fn import_file<C: PixelCodec>(codec: &C, path: &Path) -> Result<Canvas> {
    let mut canvas = Canvas::default();
    read_file(codec, path)?.apply_to(&mut canvas)?;
    Ok(canvas)
}

/// An import running on a worker thread.
///
/// The canvas is untouched until the owner takes the result and applies it.
#[derive(Debug)]
pub struct PendingImport {
    path: PathBuf,
    rx: Receiver<Result<ImportedImage>>,
}

impl PendingImport {
    /// Start reading and decoding `path` in the background.
    pub fn spawn<C>(codec: C, path: impl Into<PathBuf>) -> Self
    where
        C: PixelCodec + Send + 'static,
    {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        let worker_path = path.clone();
        thread::spawn(move || {
            // The receiver may already be gone if the import was abandoned.
            let _ = tx.send(read_file(&codec, &worker_path));
        });
        Self { path, rx }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The result, if the worker has finished.
    pub fn try_take(&self) -> Option<Result<ImportedImage>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(self.worker_gone())),
        }
    }

    /// Block until the worker finishes.
    pub fn wait(self) -> Result<ImportedImage> {
        self.rx.recv().unwrap_or_else(|_| Err(self.worker_gone()))
    }

    fn worker_gone(&self) -> XqError {
        XqError::Io {
            path: self.path.clone(),
            message: "Import worker stopped without a result".to_string(),
        }
    }
}
