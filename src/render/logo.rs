//! Center logo loading and compositing

use crate::error::Result;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbaImage};
use std::io;
use std::path::Path;

/// Open a logo and normalize it to RGBA.
///
/// The format is sniffed from the file contents, so the extension does not
/// have to match. Returns `Ok(None)` when the file does not exist. Any other
/// failure, including a file that exists but is not a decodable image, is
/// an error.
pub fn load_logo(path: &Path) -> Result<Option<DynamicImage>> {
    let reader = match ImageReader::open(path) {
        Ok(reader) => reader,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let img = reader.with_guessed_format()?.decode()?;
    Ok(Some(DynamicImage::ImageRgba8(img.to_rgba8())))
}

/// Alpha-composite `logo` centered on `canvas`.
///
/// The logo is scaled to fit a square `ratio` times the canvas width,
/// keeping its aspect ratio.
pub fn embed_logo(canvas: &mut RgbaImage, logo: &DynamicImage, ratio: f32) {
    let target = ((canvas.width() as f32 * ratio) as u32).max(1);
    let scaled = logo.resize(target, target, FilterType::Lanczos3).to_rgba8();

    let x = canvas.width().saturating_sub(scaled.width()) / 2;
    let y = canvas.height().saturating_sub(scaled.height()) / 2;
    imageops::overlay(canvas, &scaled, i64::from(x), i64::from(y));
}
