//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::QrPayload;
use image::{DynamicImage, GrayImage, ImageReader};
use std::path::Path;

/// QR code decoder
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode a QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<QrPayload> {
        let gray = img.to_luma8();
        self.decode_gray(gray)
    }

    /// Open an image file and decode the first QR code in it
    ///
    /// The image format is sniffed from the file contents.
    pub fn decode_file(&self, path: &Path) -> Result<QrPayload> {
        let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        self.decode(&img)
    }

    fn decode_gray(&self, img: GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img);
        let grids = prepared.detect_grids();

        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );

                Ok(QrPayload::from_bytes(content.into_bytes()))
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_blank_image_has_no_code() {
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(120, 120, Luma([255])));
        let err = QrDecoder::new().decode(&blank).unwrap_err();
        assert!(matches!(err, Error::NoQrCodeFound));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = QrDecoder::new()
            .decode_file(Path::new("definitely-not-here.png"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_decode_file_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let code = qrcode::QrCode::new(b"no extension").unwrap();
        let rendered = code.render::<Luma<u8>>().min_dimensions(200, 200).build();
        let png = dir.path().join("code.png");
        rendered.save(&png).unwrap();
        let bare = dir.path().join("code");
        std::fs::rename(&png, &bare).unwrap();

        let payload = QrDecoder::new().decode_file(&bare).unwrap();
        assert_eq!(payload.as_str(), Some("no extension"));
    }

    #[test]
    fn test_decode_plain_render() {
        let code = qrcode::QrCode::new(b"plain render").unwrap();
        let rendered = code.render::<Luma<u8>>().min_dimensions(200, 200).build();
        let payload = QrDecoder::new()
            .decode(&DynamicImage::ImageLuma8(rendered))
            .unwrap();
        assert_eq!(payload.as_str(), Some("plain render"));
    }
}
