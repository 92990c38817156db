//! QR generation routine: encode, style, optionally stamp a logo, save

use crate::config::{DEFAULT_LOGO, DEFAULT_OUTPUT, DEFAULT_URL};
use crate::error::{Error, Result};
use crate::output::render_report;
use crate::qr::{QrDecoder, QrEncoder, QrPayload};
use crate::render::{
    ColorMask, ModuleDrawer, StyleOptions, StyledRenderer, embed_logo, load_logo,
};
use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Logo argument value that disables logo compositing
pub const NO_LOGO_SENTINEL: &str = "none";

/// Where the center logo comes from, if anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    /// No logo; nothing is read from disk
    Disabled,
    /// Logo image at this path
    Path(PathBuf),
}

impl LogoSource {
    /// Interpret a raw logo argument.
    ///
    /// The exact sentinel and the empty string disable the logo; anything
    /// else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.is_empty() || arg == NO_LOGO_SENTINEL {
            LogoSource::Disabled
        } else {
            LogoSource::Path(PathBuf::from(arg))
        }
    }
}

impl From<Option<&Path>> for LogoSource {
    fn from(path: Option<&Path>) -> Self {
        match path {
            Some(p) => LogoSource::Path(p.to_path_buf()),
            None => LogoSource::Disabled,
        }
    }
}

/// One generation job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Text to encode
    pub text: String,
    /// Image file to write; format follows the extension
    pub output: PathBuf,
    /// Optional center logo
    pub logo: LogoSource,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            text: DEFAULT_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            logo: LogoSource::from_arg(DEFAULT_LOGO),
        }
    }
}

/// What happened to the logo during generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoOutcome {
    /// Logo use was disabled by the caller
    Disabled,
    /// Logo was composited at the center
    Embedded {
        /// Logo that was used
        path: PathBuf,
    },
    /// Logo file was absent; the code was rendered without it
    Missing {
        /// Logo that was looked for
        path: PathBuf,
    },
}

impl LogoOutcome {
    /// Short machine-friendly label
    pub fn label(&self) -> &'static str {
        match self {
            LogoOutcome::Disabled => "disabled",
            LogoOutcome::Embedded { .. } => "embedded",
            LogoOutcome::Missing { .. } => "missing",
        }
    }

    /// Logo path involved, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            LogoOutcome::Disabled => None,
            LogoOutcome::Embedded { path } | LogoOutcome::Missing { path } => Some(path),
        }
    }
}

/// Summary of a completed generation
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// File that was written
    pub output: PathBuf,
    /// Encoded text
    pub text: String,
    /// Logo handling result
    pub logo: LogoOutcome,
    /// Symbol version picked by the encoder
    pub version: i16,
    /// Symbol side length in modules, without border
    pub width_modules: usize,
    /// Written image width in pixels
    pub image_width: u32,
    /// Written image height in pixels
    pub image_height: u32,
    /// Diagnostic lines produced while generating, in order
    pub notices: Vec<String>,
}

/// Builds styled QR images according to a fixed [`StyleOptions`]
pub struct Generator {
    style: StyleOptions,
    encoder: QrEncoder,
}

impl Generator {
    /// Create a generator for the given style
    pub fn new(style: StyleOptions) -> Self {
        let encoder = QrEncoder::with_ecc_level(style.ec_level);
        Self { style, encoder }
    }

    /// Encode `request.text`, render it, and write the image to `request.output`.
    ///
    /// A logo path that does not exist is not an error: the code is rendered
    /// without a logo and two notices are recorded in the report. Every other
    /// failure is returned.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateReport> {
        let symbol = self.encoder.encode_str(&request.text)?;
        let mut notices = Vec::new();

        let (image, logo) = match &request.logo {
            LogoSource::Disabled => (
                plain(StyledRenderer::new(&self.style).render(&symbol)?),
                LogoOutcome::Disabled,
            ),
            LogoSource::Path(path) => match load_logo(path)? {
                Some(logo_image) => {
                    let mut canvas = StyledRenderer::new(&self.style).render(&symbol)?;
                    embed_logo(&mut canvas, &logo_image, self.style.logo_ratio);
                    (
                        DynamicImage::ImageRgba8(canvas),
                        LogoOutcome::Embedded { path: path.clone() },
                    )
                }
                None => {
                    warn!(logo = %path.display(), "Logo not found, rendering without it");
                    notices.push(format!("Logo not found: {}", path.display()));
                    notices.push("Creating QR code without logo...".to_string());
                    (
                        plain(self.fallback_renderer().render(&symbol)?),
                        LogoOutcome::Missing { path: path.clone() },
                    )
                }
            },
        };

        image.save(&request.output)?;
        info!(
            output = %request.output.display(),
            version = symbol.version(),
            logo = logo.label(),
            "QR code written"
        );

        Ok(GenerateReport {
            output: request.output.clone(),
            text: request.text.clone(),
            logo,
            version: symbol.version(),
            width_modules: symbol.width(),
            image_width: image.width(),
            image_height: image.height(),
            notices,
        })
    }

    /// Read back a written image and check it carries the encoded text.
    pub fn verify(&self, report: &GenerateReport) -> Result<QrPayload> {
        let payload = QrDecoder::new().decode_file(&report.output)?;
        if payload.as_bytes() != report.text.as_bytes() {
            return Err(Error::PayloadMismatch {
                expected: report.text.clone(),
                actual: String::from_utf8_lossy(payload.as_bytes()).into_owned(),
            });
        }
        Ok(payload)
    }

    /// Rounded modules in default colors, keeping the configured geometry.
    fn fallback_renderer(&self) -> StyledRenderer {
        StyledRenderer::new(&StyleOptions {
            drawer: ModuleDrawer::Rounded,
            mask: ColorMask::default(),
            ..self.style.clone()
        })
    }
}

/// Flatten a logo-less canvas to RGB.
fn plain(canvas: RgbaImage) -> DynamicImage {
    DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(StyleOptions::default())
    }
}

/// Generate with default styling and print the status lines to stdout.
///
/// `logo` of `None` disables the logo. A missing logo file falls back to a
/// logo-less image; the fallback notices are printed before the status lines.
pub fn generate_qrcode(text: &str, output: &Path, logo: Option<&Path>) -> Result<()> {
    let request = GenerateRequest {
        text: text.to_string(),
        output: output.to_path_buf(),
        logo: LogoSource::from(logo),
    };
    let report = Generator::default().generate(&request)?;
    for line in render_report(&report).human {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_exact() {
        assert_eq!(LogoSource::from_arg("none"), LogoSource::Disabled);
        assert_eq!(LogoSource::from_arg(""), LogoSource::Disabled);
        assert_eq!(
            LogoSource::from_arg("None"),
            LogoSource::Path(PathBuf::from("None"))
        );
        assert_eq!(
            LogoSource::from_arg("logo.png"),
            LogoSource::Path(PathBuf::from("logo.png"))
        );
    }

    #[test]
    fn default_request_uses_constants() {
        let request = GenerateRequest::default();
        assert_eq!(request.text, DEFAULT_URL);
        assert_eq!(request.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(request.logo, LogoSource::Path(PathBuf::from(DEFAULT_LOGO)));
    }

    #[test]
    fn generates_and_verifies_without_logo() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerateRequest {
            text: "hello qrstamp".to_string(),
            output: dir.path().join("plain.png"),
            logo: LogoSource::Disabled,
        };

        let generator = Generator::default();
        let report = generator.generate(&request).unwrap();

        assert_eq!(report.logo, LogoOutcome::Disabled);
        assert!(report.notices.is_empty());
        assert_eq!(
            report.image_width,
            (report.width_modules as u32 + 8) * 10
        );
        let payload = generator.verify(&report).unwrap();
        assert_eq!(payload.as_str(), Some("hello qrstamp"));
    }

    #[test]
    fn missing_logo_records_notices() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("absent.png");
        let request = GenerateRequest {
            text: "fallback".to_string(),
            output: dir.path().join("out.png"),
            logo: LogoSource::Path(logo.clone()),
        };

        let report = Generator::default().generate(&request).unwrap();

        assert_eq!(report.logo, LogoOutcome::Missing { path: logo.clone() });
        assert_eq!(
            report.notices,
            vec![
                format!("Logo not found: {}", logo.display()),
                "Creating QR code without logo...".to_string(),
            ]
        );
    }

    #[test]
    fn corrupt_logo_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("broken.png");
        std::fs::write(&logo, b"definitely not a png").unwrap();
        let request = GenerateRequest {
            text: "broken".to_string(),
            output: dir.path().join("out.png"),
            logo: LogoSource::Path(logo),
        };

        let err = Generator::default().generate(&request).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
        assert!(!request.output.exists());
    }

    #[test]
    fn unsupported_output_extension_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerateRequest {
            text: "ext".to_string(),
            output: dir.path().join("out.notanimage"),
            logo: LogoSource::Disabled,
        };

        let err = Generator::default().generate(&request).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn oversized_text_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerateRequest {
            text: "z".repeat(2000),
            output: dir.path().join("out.png"),
            logo: LogoSource::Disabled,
        };

        let err = Generator::default().generate(&request).unwrap_err();
        assert!(matches!(err, Error::QrEncode(_)));
    }

    #[test]
    fn verify_detects_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerateRequest {
            text: "original".to_string(),
            output: dir.path().join("out.png"),
            logo: LogoSource::Disabled,
        };
        let generator = Generator::default();
        let mut report = generator.generate(&request).unwrap();
        report.text = "something else".to_string();

        let err = generator.verify(&report).unwrap_err();
        assert!(matches!(err, Error::PayloadMismatch { .. }));
    }

    #[test]
    fn fallback_ignores_configured_shape_and_colors() {
        let dir = tempfile::tempdir().unwrap();
        let square = Generator::new(StyleOptions {
            drawer: ModuleDrawer::Square,
            mask: ColorMask::solid([0, 60, 0], [240, 240, 200]),
            ..StyleOptions::default()
        });
        let fallback = square
            .generate(&GenerateRequest {
                text: "shape".to_string(),
                output: dir.path().join("fallback.png"),
                logo: LogoSource::Path(dir.path().join("absent.png")),
            })
            .unwrap();

        let reference = Generator::default()
            .generate(&GenerateRequest {
                text: "shape".to_string(),
                output: dir.path().join("reference.png"),
                logo: LogoSource::Disabled,
            })
            .unwrap();

        let a = image::open(&fallback.output).unwrap().to_rgb8();
        let b = image::open(&reference.output).unwrap().to_rgb8();
        assert!(a.as_raw() == b.as_raw(), "fallback is not rounded black on white");
    }

    #[test]
    fn empty_logo_argument_means_no_logo() {
        let dir = tempfile::tempdir().unwrap();
        let report = Generator::default()
            .generate(&GenerateRequest {
                text: "empty logo".to_string(),
                output: dir.path().join("out.png"),
                logo: LogoSource::from_arg(""),
            })
            .unwrap();

        assert_eq!(report.logo, LogoOutcome::Disabled);
        assert!(report.notices.is_empty());
    }

    #[test]
    fn extensionless_logo_is_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("brandmark");
        let mut png = Vec::new();
        RgbaImage::from_pixel(32, 32, image::Rgba([255, 255, 255, 255]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        std::fs::write(&logo, png).unwrap();

        let text = "https://example.org/sniffed/logo/format";
        let generator = Generator::default();
        let report = generator
            .generate(&GenerateRequest {
                text: text.to_string(),
                output: dir.path().join("out.png"),
                logo: LogoSource::Path(logo.clone()),
            })
            .unwrap();

        assert_eq!(report.logo, LogoOutcome::Embedded { path: logo });
        assert_eq!(generator.verify(&report).unwrap().as_str(), Some(text));
    }

    #[test]
    fn oversized_geometry_fails_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(StyleOptions {
            box_size: u32::MAX / 8,
            ..StyleOptions::default()
        });
        let request = GenerateRequest {
            text: "too big".to_string(),
            output: dir.path().join("out.png"),
            logo: LogoSource::Disabled,
        };

        let err = generator.generate(&request).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!request.output.exists());
    }
}
