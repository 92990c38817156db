//! qrstamp - styled QR code generator
//!
//! Encodes a URL (or any text) into a QR code at error correction level H,
//! draws it with rounded modules on a solid background, optionally stamps a
//! logo in the center, and writes the image to disk.
//!
//! # Features
//!
//! - **Minimal symbols**: the encoder picks the smallest version that fits
//! - **Styled rendering**: rounded or square modules, custom colors
//! - **Logo compositing**: centered, alpha-blended, with a graceful fallback
//!   when the logo file is missing
//! - **Verification**: rendered files can be decoded back with `rqrr`
//!
//! # Example
//!
//! ```no_run
//! use qrstamp::{GenerateRequest, Generator, LogoSource};
//!
//! fn main() -> anyhow::Result<()> {
//!     let request = GenerateRequest {
//!         text: "https://example.com".to_string(),
//!         output: "example.png".into(),
//!         logo: LogoSource::from_arg("logo.png"),
//!     };
//!
//!     let report = Generator::default().generate(&request)?;
//!     println!("Wrote version {} symbol", report.version);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod output;
pub mod qr;
pub mod render;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{GeneratorOptions, LogRotation, LoggingOptions, QrstampConfig};
pub use generate::{
    GenerateReport, GenerateRequest, Generator, LogoOutcome, LogoSource, NO_LOGO_SENTINEL,
    generate_qrcode,
};
pub use qr::{QrDecoder, QrEncoder, QrPayload, QrSymbol};
pub use render::{ColorMask, ModuleDrawer, StyleOptions, StyledRenderer};
