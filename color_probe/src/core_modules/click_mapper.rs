// THEORY:
// The click mapper answers one question: which source pixel is under this point of
// the rendered image? The UI may draw the image at any size, so a click is first
// scaled by the per-axis ratio between native and displayed size, then truncated
// to an integer pixel address.
//
// A point that does not land on a pixel is a miss. It is never clamped to the
// nearest edge, because a clamped answer would show the user a color they did not
// click on.

use crate::core_modules::color::color::Color;
use crate::core_modules::raster::{ClickPoint, DisplayGeometry, PixelCoord, RasterImage};
use crate::error::{ProbeError, Result};

/// Maps a click in display space to the source pixel beneath it and samples that pixel.
///
/// Translucent pixels are reported premultiplied by their alpha (the color as
/// composited over black), and the returned color is always opaque.
///
/// Returns [`ProbeError::OutOfBounds`] when the display has no area, when the click
/// is outside `[0, width) × [0, height)` of the display, or when the scaled
/// coordinate falls outside the image.
pub fn map_click(
    image: &RasterImage,
    display: DisplayGeometry,
    click: ClickPoint,
) -> Result<(PixelCoord, Color)> {
    if !display.is_renderable() || !display.contains(click) {
        return Err(ProbeError::OutOfBounds);
    }

    let ratio_x = image.width() as f64 / display.width as f64;
    let ratio_y = image.height() as f64 / display.height as f64;

    let scaled_x = (click.x as f64 * ratio_x).floor();
    let scaled_y = (click.y as f64 * ratio_y).floor();

    if scaled_x < 0.0
        || scaled_y < 0.0
        || scaled_x >= image.width() as f64
        || scaled_y >= image.height() as f64
    {
        return Err(ProbeError::OutOfBounds);
    }

    let coord = PixelCoord::new(scaled_x as u32, scaled_y as u32);
    let color = Color::from(*image.get_pixel(coord.x, coord.y))
        .premultiplied()
        .to_opaque();
    log::debug!("click ({}, {}) -> pixel {} = {}", click.x, click.y, coord, color);
    Ok((coord, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Every pixel encodes its own position: R = x, G = y, B = x ^ y.
    fn coordinate_image(width: u32, height: u32) -> RasterImage {
        RasterImage::from_fn(width, height, |x, y| {
            Rgba([x as u8, y as u8, (x ^ y) as u8, 255])
        })
    }

    #[test]
    fn native_display_returns_the_exact_pixel() {
        let image = coordinate_image(64, 48);
        let display = DisplayGeometry::native(&image);

        for (px, py) in [(0, 0), (10, 20), (63, 47), (31, 0), (0, 47)] {
            let (coord, color) = map_click(&image, display, ClickPoint::new(px as f32, py as f32))
                .expect("click inside the image should map");
            assert_eq!(coord, PixelCoord::new(px, py));
            assert_eq!(color, Color::opaque(px as u8, py as u8, (px ^ py) as u8));
        }
    }

    #[test]
    fn fractional_clicks_truncate_toward_zero() {
        let image = coordinate_image(10, 10);
        let display = DisplayGeometry::native(&image);
        let (coord, _) = map_click(&image, display, ClickPoint::new(3.99, 7.5)).unwrap();
        assert_eq!(coord, PixelCoord::new(3, 7));
    }

    #[test]
    fn downscaled_display_maps_back_to_source_pixels() {
        let image = coordinate_image(400, 400);
        let display = DisplayGeometry::new(200.0, 200.0);
        let (coord, _) = map_click(&image, display, ClickPoint::new(10.0, 20.0)).unwrap();
        assert_eq!(coord, PixelCoord::new(20, 40));
    }

    #[test]
    fn upscaled_display_maps_back_to_source_pixels() {
        let image = coordinate_image(50, 25);
        let display = DisplayGeometry::new(200.0, 100.0);
        let (coord, _) = map_click(&image, display, ClickPoint::new(199.0, 99.0)).unwrap();
        assert_eq!(coord, PixelCoord::new(49, 24));
    }

    #[test]
    fn clicks_at_or_beyond_the_display_edge_miss() {
        let image = coordinate_image(40, 30);
        let display = DisplayGeometry::native(&image);

        for click in [
            ClickPoint::new(40.0, 0.0),
            ClickPoint::new(0.0, 30.0),
            ClickPoint::new(100.0, 100.0),
            ClickPoint::new(-1.0, 5.0),
            ClickPoint::new(5.0, -0.1),
        ] {
            assert!(matches!(
                map_click(&image, display, click),
                Err(ProbeError::OutOfBounds)
            ));
        }
    }

    #[test]
    fn edge_of_a_non_integer_ratio_still_misses() {
        let image = coordinate_image(3, 3);
        let display = DisplayGeometry::new(7.0, 7.0);
        assert!(map_click(&image, display, ClickPoint::new(7.0, 0.0)).is_err());
        let (coord, _) = map_click(&image, display, ClickPoint::new(6.99, 6.99)).unwrap();
        assert_eq!(coord, PixelCoord::new(2, 2));
    }

    #[test]
    fn zero_sized_display_is_a_miss() {
        let image = coordinate_image(10, 10);
        for display in [DisplayGeometry::new(0.0, 10.0), DisplayGeometry::new(10.0, 0.0)] {
            assert!(matches!(
                map_click(&image, display, ClickPoint::new(0.0, 0.0)),
                Err(ProbeError::OutOfBounds)
            ));
        }
    }

    #[test]
    fn translucent_pixels_are_premultiplied_by_alpha() {
        let image = RasterImage::from_pixel(4, 4, Rgba([12, 34, 56, 128]));
        let (_, color) =
            map_click(&image, DisplayGeometry::native(&image), ClickPoint::new(1.0, 1.0)).unwrap();
        assert_eq!(color, Color::opaque(6, 17, 28));
    }

    #[test]
    fn fully_transparent_pixels_read_as_opaque_black() {
        let image = RasterImage::from_pixel(4, 4, Rgba([12, 34, 56, 0]));
        let (_, color) =
            map_click(&image, DisplayGeometry::native(&image), ClickPoint::new(1.0, 1.0)).unwrap();
        assert_eq!(color, Color::opaque(0, 0, 0));
    }
}
