// THEORY:
// The `raster` module is the decode boundary and the vocabulary of positions.
// Everything upstream of it is bytes; everything downstream is an 8-bit RGBA grid
// plus the geometry needed to relate screen positions to that grid.
//
// Two coordinate spaces exist and are kept as distinct types:
// - display space (`DisplayGeometry`, `ClickPoint`): floating point, whatever size
//   the UI happened to render the image at.
// - pixel space (`PixelCoord`): unsigned integers addressing the decoded grid.
// Only the click mapper converts between them.

use std::fmt;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgba};

use crate::error::Result;

/// A decoded image normalized to 8 bits per RGBA channel. Never mutated once decoded.
pub type RasterImage = image::RgbaImage;

/// The size, in display units, at which a `RasterImage` is currently rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    pub width: f32,
    pub height: f32,
}

impl DisplayGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Geometry for an image rendered at its native size (ratio 1:1).
    pub fn native(image: &RasterImage) -> Self {
        Self::new(image.width() as f32, image.height() as f32)
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_renderable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// `[0, width) × [0, height)`
    pub fn contains(&self, click: ClickPoint) -> bool {
        click.x.is_finite()
            && click.y.is_finite()
            && click.x >= 0.0
            && click.y >= 0.0
            && click.x < self.width
            && click.y < self.height
    }
}

/// A position in display units, relative to the top-left corner of the rendered image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickPoint {
    pub x: f32,
    pub y: f32,
}

impl ClickPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A source pixel address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

impl PixelCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PixelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Decodes an encoded image (format guessed from its signature) into 8-bit RGBA.
///
/// 16-bit and floating point sources are narrowed to 8 bits per channel here, so
/// every downstream computation sees the same 0-255 range. 16-bit channels keep
/// their high byte (`v >> 8`).
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage> {
    let decoded = image::load_from_memory(bytes)?;
    log::debug!(
        "decoded {}x{} image ({:?}) from {} bytes",
        decoded.width(),
        decoded.height(),
        decoded.color(),
        bytes.len()
    );
    let raster = match decoded {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => narrow_16(&decoded.to_rgba16()),
        _ => decoded.to_rgba8(),
    };
    Ok(raster)
}

fn narrow_16(wide: &ImageBuffer<Rgba<u16>, Vec<u16>>) -> RasterImage {
    RasterImage::from_fn(wide.width(), wide.height(), |x, y| {
        let [r, g, b, a] = wide.get_pixel(x, y).0;
        Rgba([(r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8, (a >> 8) as u8])
    })
}

/// Reads `path` and decodes it with [`decode_image`].
pub fn open_image<P: AsRef<Path>>(path: P) -> Result<RasterImage> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_image(&bytes)
}
