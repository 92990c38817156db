//! QR symbol construction and decoding
//!
//! Encoding is delegated to the `qrcode` crate, which picks the smallest
//! version that fits the data at the requested error correction level.
//! Decoding (via `rqrr`) exists to verify rendered output.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::QrEncoder;

use qrcode::{Color, EcLevel, QrCode, Version};
use serde::{Deserialize, Serialize};

/// A decoded QR code payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The raw decoded data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Create a new QR payload from a string
    pub fn from_string(s: String) -> Self {
        Self {
            data: s.as_bytes().to_vec(),
            text: Some(s),
        }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// A finalized QR module grid, ready for rendering.
#[derive(Debug, Clone)]
pub struct QrSymbol {
    width: usize,
    version: i16,
    ec_level: EcLevel,
    modules: Vec<Color>,
}

impl QrSymbol {
    pub(crate) fn from_code(code: &QrCode) -> Self {
        let version = match code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        };
        Self {
            width: code.width(),
            version,
            ec_level: code.error_correction_level(),
            modules: code.to_colors(),
        }
    }

    /// Number of modules along one side, excluding the border.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Symbol version chosen by the encoder (1..=40).
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Error correction level the symbol was built with.
    pub fn ec_level(&self) -> EcLevel {
        self.ec_level
    }

    /// Whether the module at column `x`, row `y` is dark.
    ///
    /// Coordinates outside the grid are treated as light, so renderers can
    /// look at neighbours of edge modules without bounds checks.
    pub fn is_dark(&self, x: i32, y: i32) -> bool {
        let w = self.width as i32;
        if x < 0 || y < 0 || x >= w || y >= w {
            return false;
        }
        self.modules[(y * w + x) as usize] == Color::Dark
    }
}
