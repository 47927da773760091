pub mod click_mapper;
pub mod color;
pub mod dominant_color;
pub mod raster;
pub mod utils;
