//! Styled rasterization of QR symbols
//!
//! A [`StyledRenderer`] paints each dark module with a [`ModuleDrawer`]
//! shape and fills foreground/background from a [`ColorMask`]. Logos are
//! composited afterwards with [`embed_logo`].

mod drawer;
mod logo;

pub use drawer::{ModuleDrawer, Neighbours};
pub use logo::{embed_logo, load_logo};

use crate::error::{Error, Result};
use crate::qr::QrSymbol;
use image::{Rgb, Rgba, RgbaImage};
use qrcode::EcLevel;

/// Pixel size of one module
pub const DEFAULT_BOX_SIZE: u32 = 10;
/// Quiet zone width, in modules
pub const DEFAULT_BORDER: u32 = 4;
/// Logo width as a fraction of the rendered image width
pub const DEFAULT_LOGO_RATIO: f32 = 0.25;
/// Largest accepted image side in pixels
pub const MAX_IMAGE_SIDE: u32 = 32_768;
/// Modules per side of a version 40 symbol
const MAX_SYMBOL_WIDTH: u32 = 177;

/// Foreground/background coloring for rendered modules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMask {
    /// One flat color for dark modules and one for the background
    Solid {
        /// Dark module color
        front: Rgb<u8>,
        /// Background color
        back: Rgb<u8>,
    },
}

impl ColorMask {
    /// Solid fill with the given colors.
    pub fn solid(front: [u8; 3], back: [u8; 3]) -> Self {
        ColorMask::Solid {
            front: Rgb(front),
            back: Rgb(back),
        }
    }

    fn front(&self) -> Rgba<u8> {
        match self {
            ColorMask::Solid { front, .. } => opaque(*front),
        }
    }

    fn back(&self) -> Rgba<u8> {
        match self {
            ColorMask::Solid { back, .. } => opaque(*back),
        }
    }
}

impl Default for ColorMask {
    fn default() -> Self {
        Self::solid([0, 0, 0], [255, 255, 255])
    }
}

fn opaque(Rgb([r, g, b]): Rgb<u8>) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Everything that determines how a symbol is built and drawn
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    /// Pixels per module
    pub box_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Error correction level for symbol construction
    pub ec_level: EcLevel,
    /// Module shape
    pub drawer: ModuleDrawer,
    /// Colors used when rendering
    pub mask: ColorMask,
    /// Logo width relative to the image width
    pub logo_ratio: f32,
}

impl StyleOptions {
    /// Check that every symbol version renders within [`MAX_IMAGE_SIDE`].
    pub fn validate(&self) -> Result<()> {
        if self.box_size == 0 {
            return Err(Error::Config("box_size must be at least 1".to_string()));
        }
        image_side(MAX_SYMBOL_WIDTH, self.border, self.box_size).map(|_| ())
    }
}

/// Pixel side of a `modules`-wide symbol, or a config error when too large.
fn image_side(modules: u32, border: u32, box_size: u32) -> Result<u32> {
    border
        .checked_mul(2)
        .and_then(|b| b.checked_add(modules))
        .and_then(|m| m.checked_mul(box_size))
        .filter(|&side| side <= MAX_IMAGE_SIDE)
        .ok_or_else(|| {
            Error::Config(format!(
                "box_size {box_size} with border {border} exceeds {MAX_IMAGE_SIDE}px for a {modules}-module symbol"
            ))
        })
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            ec_level: EcLevel::H,
            drawer: ModuleDrawer::Rounded,
            mask: ColorMask::default(),
            logo_ratio: DEFAULT_LOGO_RATIO,
        }
    }
}

/// Rasterizes a [`QrSymbol`] into an RGBA canvas
#[derive(Debug, Clone)]
pub struct StyledRenderer {
    box_size: u32,
    border: u32,
    drawer: ModuleDrawer,
    mask: ColorMask,
}

impl StyledRenderer {
    /// Renderer for the given style.
    pub fn new(style: &StyleOptions) -> Self {
        Self {
            box_size: style.box_size.max(1),
            border: style.border,
            drawer: style.drawer,
            mask: style.mask,
        }
    }

    /// Side length in pixels of the image produced for `symbol`.
    pub fn image_side(&self, symbol: &QrSymbol) -> Result<u32> {
        image_side(symbol.width() as u32, self.border, self.box_size)
    }

    /// Paint the symbol, quiet zone included.
    pub fn render(&self, symbol: &QrSymbol) -> Result<RgbaImage> {
        let side = self.image_side(symbol)?;
        let mut canvas = RgbaImage::from_pixel(side, side, self.mask.back());
        let front = self.mask.front();
        let w = symbol.width() as i32;

        for y in 0..w {
            for x in 0..w {
                if !symbol.is_dark(x, y) {
                    continue;
                }
                let neighbours = Neighbours {
                    north: symbol.is_dark(x, y - 1),
                    east: symbol.is_dark(x + 1, y),
                    south: symbol.is_dark(x, y + 1),
                    west: symbol.is_dark(x - 1, y),
                };
                let origin = (
                    (x as u32 + self.border) * self.box_size,
                    (y as u32 + self.border) * self.box_size,
                );
                self.drawer
                    .draw(&mut canvas, origin, self.box_size, neighbours, front);
            }
        }

        Ok(canvas)
    }
}
