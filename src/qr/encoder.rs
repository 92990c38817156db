//! QR symbol encoder

use crate::error::{Error, Result};
use crate::qr::{QrPayload, QrSymbol};
use qrcode::{EcLevel, QrCode};

/// QR symbol encoder
pub struct QrEncoder {
    /// Error correction level
    ecc_level: EcLevel,
}

impl QrEncoder {
    /// Create a new QR encoder with High ECC, which tolerates a center logo
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::H,
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc_level: EcLevel) -> Self {
        Self { ecc_level }
    }

    /// Error correction level used for new symbols
    pub fn ecc_level(&self) -> EcLevel {
        self.ecc_level
    }

    /// Encode a payload into the smallest symbol that fits it
    pub fn encode(&self, payload: &QrPayload) -> Result<QrSymbol> {
        let code = QrCode::with_error_correction_level(&payload.data, self.ecc_level)
            .map_err(|e| {
                Error::QrEncode(format!(
                    "{} bytes do not fit at level {:?}: {}",
                    payload.data.len(),
                    self.ecc_level,
                    e
                ))
            })?;

        let symbol = QrSymbol::from_code(&code);
        tracing::debug!(
            version = symbol.version(),
            width = symbol.width(),
            ecc_level = ?self.ecc_level,
            "Encoded QR symbol"
        );

        Ok(symbol)
    }

    /// Encode a string into a QR symbol
    pub fn encode_str(&self, data: &str) -> Result<QrSymbol> {
        let payload = QrPayload::from_string(data.to_string());
        self.encode(&payload)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}
