//! Error types for qrstamp operations

use thiserror::Error;

/// Result type alias using qrstamp's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrstamp operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed (e.g. data exceeds symbol capacity)
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Rendered image decoded to a different payload than the one encoded
    #[error("Decoded payload mismatch: expected {expected:?}, found {actual:?}")]
    PayloadMismatch {
        /// Text that was encoded
        expected: String,
        /// Text read back from the written image
        actual: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
