// THEORY:
// The dominant color is defined here as the channel-wise mean of a downsampled
// copy of the image.
//
// 1.  **Bounded cost**: Every image is first resized to a fixed width (100 by
//     default), so the averaging pass touches a roughly constant number of pixels
//     no matter how large the source is.
// 2.  **Filtered downsample**: The resize uses a Lanczos-class filter. Each sample
//     is then a weighted blend of its whole neighborhood, so a single outlier
//     block cannot survive or vanish by the luck of nearest-neighbor picking.
// 3.  **Naive sRGB mean**: Channels are summed as stored and divided by the pixel
//     count. The result is truncated, not rounded. Alpha is dropped before the
//     resize and the result is always opaque.

pub mod dominant_color {
    use image::buffer::ConvertBuffer;
    use image::imageops::{self, FilterType};
    use image::RgbImage;

    use crate::core_modules::color::color::Color;
    use crate::core_modules::raster::RasterImage;
    use crate::error::{ProbeError, Result};

    pub const DEFAULT_SAMPLE_WIDTH: u32 = 100;
    pub const DEFAULT_FILTER: FilterType = FilterType::Lanczos3;
    /// Downsampled rows never exceed this many times the sample width.
    pub const MAX_SAMPLE_ASPECT: u32 = 16;

    /// Dominant color with the default sample width and filter.
    pub fn dominant_color(image: &RasterImage) -> Result<Color> {
        dominant_color_with(image, DEFAULT_SAMPLE_WIDTH, DEFAULT_FILTER)
    }

    /// Downsamples `image` to `sample_width` columns (aspect ratio preserved) and
    /// returns the mean of each RGB channel over the downsampled pixels.
    ///
    /// Fails with [`ProbeError::DegenerateImage`] when the image has no area, or when
    /// `sample_width` is zero.
    pub fn dominant_color_with(
        image: &RasterImage,
        sample_width: u32,
        filter: FilterType,
    ) -> Result<Color> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 || sample_width == 0 {
            return Err(ProbeError::DegenerateImage { width, height });
        }

        let sample_height = sample_height(width, height, sample_width);
        if sample_height == sample_width.saturating_mul(MAX_SAMPLE_ASPECT) {
            log::warn!(
                "{}x{} image is at least {}:1 tall; averaging over {} rows",
                width,
                height,
                MAX_SAMPLE_ASPECT,
                sample_height
            );
        }
        // Alpha is dropped here, before the resampler can weight anything by it.
        let rgb: RgbImage = image.convert();
        let sampled = imageops::resize(&rgb, sample_width, sample_height, filter);

        let mut sum_r = 0u64;
        let mut sum_g = 0u64;
        let mut sum_b = 0u64;
        let mut count = 0u64;

        for pixel in sampled.pixels() {
            let [r, g, b] = pixel.0;
            sum_r += r as u64;
            sum_g += g as u64;
            sum_b += b as u64;
            count += 1;
        }

        // sample_width and sample_height are both at least 1.
        let color = Color::opaque(
            (sum_r / count) as u8,
            (sum_g / count) as u8,
            (sum_b / count) as u8,
        );
        log::debug!(
            "dominant color of {}x{} image over {}x{} samples: {}",
            width,
            height,
            sample_width,
            sample_height,
            color
        );
        Ok(color)
    }

    /// Height that keeps the source aspect ratio at `sample_width` columns,
    /// rounded to the nearest row, never less than one and never more than
    /// `sample_width * MAX_SAMPLE_ASPECT`.
    pub fn sample_height(width: u32, height: u32, sample_width: u32) -> u32 {
        let limit = sample_width.saturating_mul(MAX_SAMPLE_ASPECT).max(1);
        let scaled = (height as f64 * sample_width as f64 / width as f64).round();
        scaled.clamp(1.0, limit as f64) as u32
    }

}
