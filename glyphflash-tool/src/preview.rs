//! PNG previews of encoded bitmaps
//!
//! A preview shows exactly what was packed: set bits are opaque black,
//! everything else is transparent. Files are named after the rendered text,
//! with every byte outside `[A-Za-z0-9-]` written as `_XX` hex.

use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glyphflash_core::{Bitmap, RenderedAsset};
use image::{ImageError, Rgba, RgbaImage};
use thiserror::Error;
use tracing::{debug, warn};

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PAPER: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Preview writing errors
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to create preview directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("nothing to draw for {0}")]
    Empty(String),
}

/// Image of a bitmap at one pixel per bit
pub fn preview_image(bitmap: &Bitmap) -> RgbaImage {
    RgbaImage::from_fn(bitmap.width(), bitmap.height(), |x, y| {
        if bitmap.pixel(x, y) {
            INK
        } else {
            PAPER
        }
    })
}

/// File stem for a preview of `text`
///
/// Distinct texts give distinct stems. Empty text falls back to `name`.
pub fn preview_stem(text: &str, name: &str) -> String {
    if text.is_empty() {
        return name.to_string();
    }

    let mut stem = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            // Writing to a String cannot fail
            let _ = write!(stem, "_{:02X}", byte);
        }
    }
    stem
}

/// Write `<dir>/<stem>.png`
pub fn write_preview(dir: &Path, stem: &str, bitmap: &Bitmap) -> Result<PathBuf, PreviewError> {
    if bitmap.width() == 0 {
        return Err(PreviewError::Empty(stem.to_string()));
    }

    fs::create_dir_all(dir).map_err(|source| PreviewError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{}.png", stem));
    preview_image(bitmap)
        .save(&path)
        .map_err(|source| PreviewError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Write a preview for every asset
///
/// Failures are logged and skipped. Returns the number written.
pub fn write_previews(dir: &Path, assets: &[RenderedAsset]) -> usize {
    let mut written = 0;
    for asset in assets {
        let stem = preview_stem(&asset.text, &asset.name);
        match write_preview(dir, &stem, &asset.bitmap) {
            Ok(path) => {
                debug!("Wrote preview of {} to {}", asset.name, path.display());
                written += 1;
            }
            Err(e) => warn!("Skipping preview: {}", e),
        }
    }
    written
}
