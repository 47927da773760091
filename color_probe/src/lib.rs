// THEORY:
// This file is the main entry point for the `color_probe` library crate.
//
// The public surface is the `probe` module: `ColorProbe`, its `ProbeConfig`, and
// the `Report` values it produces for a rendering layer. The pixel math itself
// lives in `core_modules` and stays usable on its own (`map_click`,
// `dominant_color`) for callers that want raw values rather than reports.

pub mod core_modules;
pub mod error;
pub mod logging;
pub mod probe;

pub use core_modules::click_mapper::map_click;
pub use core_modules::dominant_color::dominant_color::{dominant_color, dominant_color_with};
pub use core_modules::raster::{decode_image, open_image};
pub use core_modules::utils::image_helper::image_helper::save_swatch;
pub use error::ProbeError;
pub use probe::{
    ClickPoint, Color, ColorProbe, DisplayGeometry, PixelCoord, ProbeConfig, RasterImage, Report,
};
