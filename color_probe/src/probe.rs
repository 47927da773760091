// THEORY:
// The `probe` module is the top-level API. It wraps the decode boundary and the two
// pixel computations behind one struct and turns every outcome, success or failure,
// into a `Report`.
//
// A `Report` is what a rendering layer receives instead of widgets being mutated
// from inside callbacks. The renderer asks it for a message and, separately, for a
// swatch color. Misses and failures carry no swatch, so a UI cannot accidentally
// keep showing an earlier color as if it were the answer to the latest click.

use image::imageops::FilterType;

use crate::core_modules::click_mapper::map_click;
use crate::core_modules::dominant_color::dominant_color::{
    dominant_color_with, DEFAULT_FILTER, DEFAULT_SAMPLE_WIDTH,
};
use crate::core_modules::raster::decode_image;
use crate::error::{ProbeError, Result};

// Re-export key data structures for the public API.
pub use crate::core_modules::color::color::Color;
pub use crate::core_modules::raster::{ClickPoint, DisplayGeometry, PixelCoord, RasterImage};

/// Environment variable overriding [`ProbeConfig::sample_width`].
pub const SAMPLE_WIDTH_ENV: &str = "COLOR_PROBE_SAMPLE_WIDTH";

pub const IDLE_MESSAGE: &str = "Upload an image and click to get the color at that spot.";

/// Configuration for the ColorProbe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Width, in pixels, the image is downsampled to before averaging.
    pub sample_width: u32,
    /// Resampling filter used for that downsample.
    pub filter: FilterType,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            sample_width: DEFAULT_SAMPLE_WIDTH,
            filter: DEFAULT_FILTER,
        }
    }
}

impl ProbeConfig {
    /// Defaults, with `sample_width` taken from `COLOR_PROBE_SAMPLE_WIDTH` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(SAMPLE_WIDTH_ENV) {
            match parse_sample_width(&raw) {
                Some(width) => config.sample_width = width,
                None => log::warn!(
                    "ignoring {}={:?}: expected a positive integer, using {}",
                    SAMPLE_WIDTH_ENV,
                    raw,
                    config.sample_width
                ),
            }
        }
        config
    }
}

fn parse_sample_width(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|width| *width > 0)
}

/// The outcome of a single probe, ready for display.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Report {
    /// Nothing has been probed yet.
    #[default]
    Idle,
    Picked { coord: PixelCoord, color: Color },
    Dominant(Color),
    OutsideImage,
    DecodeFailed,
    Degenerate { width: u32, height: u32 },
}

impl Report {
    pub fn message(&self) -> String {
        match self {
            Report::Idle => IDLE_MESSAGE.to_string(),
            Report::Picked { coord, color } => format!("Clicked {}: {}", coord, color),
            Report::Dominant(color) => format!("Dominant color: {}", color),
            Report::OutsideImage => ProbeError::OutOfBounds.to_string(),
            Report::DecodeFailed => "Failed to decode image.".to_string(),
            Report::Degenerate { width, height } => ProbeError::DegenerateImage {
                width: *width,
                height: *height,
            }
            .to_string(),
        }
    }

    /// The color to fill the swatch with, if this report produced one.
    pub fn swatch(&self) -> Option<Color> {
        match self {
            Report::Picked { color, .. } | Report::Dominant(color) => Some(*color),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Report::OutsideImage | Report::DecodeFailed | Report::Degenerate { .. }
        )
    }
}

impl From<&ProbeError> for Report {
    fn from(err: &ProbeError) -> Self {
        match err {
            ProbeError::DecodeFailure(_) | ProbeError::Unreadable(_) => Report::DecodeFailed,
            ProbeError::OutOfBounds => Report::OutsideImage,
            ProbeError::DegenerateImage { width, height } => Report::Degenerate {
                width: *width,
                height: *height,
            },
        }
    }
}

/// The main, top-level struct for probing images.
#[derive(Debug, Clone, Default)]
pub struct ColorProbe {
    config: ProbeConfig,
}

impl ColorProbe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Decodes image bytes. Failures are logged and returned; render them with
    /// `Report::from(&err)`.
    pub fn load(&self, bytes: &[u8]) -> Result<RasterImage> {
        decode_image(bytes).inspect_err(|err| log::warn!("decode failed: {:?}", err))
    }

    pub fn click(&self, image: &RasterImage, display: DisplayGeometry, click: ClickPoint) -> Report {
        match map_click(image, display, click) {
            Ok((coord, color)) => Report::Picked { coord, color },
            Err(err) => {
                log::debug!("click ({}, {}) missed: {}", click.x, click.y, err);
                Report::from(&err)
            }
        }
    }

    pub fn dominant(&self, image: &RasterImage) -> Report {
        match dominant_color_with(image, self.config.sample_width, self.config.filter) {
            Ok(color) => Report::Dominant(color),
            Err(err) => {
                log::warn!("dominant color rejected: {}", err);
                Report::from(&err)
            }
        }
    }
}
