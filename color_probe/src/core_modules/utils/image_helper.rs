pub mod image_helper {
    use std::path::Path;

    use image::error::{ImageError, LimitError, LimitErrorKind};
    use image::ImageEncoder;

    use crate::core_modules::color::color::Color;

    /// Writes a `size` x `size` PNG filled with `color`.
    ///
    /// Sizes whose RGBA byte count does not fit in a `u32` are rejected before
    /// anything is allocated or created on disk.
    pub fn save_swatch<P: AsRef<Path>>(
        path: P,
        color: Color,
        size: u32,
    ) -> Result<(), ImageError> {
        let pixels = size
            .checked_mul(size)
            .filter(|pixels| pixels.checked_mul(4).is_some())
            .ok_or_else(|| ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError)))?;

        let buffer: Vec<u8> = std::iter::repeat(color.channels())
            .take(pixels as usize)
            .flatten()
            .collect();

        let output = std::fs::File::create(path.as_ref())?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(&buffer, size, size, image::ExtendedColorType::Rgba8)?;

        log::debug!("wrote {}x{} swatch {} to {}", size, size, color.hex(), path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::image_helper::*;
    use crate::core_modules::color::color::Color;
    use crate::core_modules::raster::open_image;

    #[test]
    fn save_swatch_file() {
        let name = std::env::temp_dir().join("color_probe_swatch_file.png");
        let color = Color::opaque(12, 34, 56);

        save_swatch(&name, color, 100).expect("Error Saving File.");

        let image = open_image(&name).expect("Error Reading File.");
        assert_eq!(image.dimensions(), (100, 100));
        assert!(image.pixels().all(|p| p.0 == [12, 34, 56, 255]));

        std::fs::remove_file(&name).ok();
    }

    #[test]
    fn oversized_swatch_is_rejected_without_writing() {
        let name = std::env::temp_dir().join("color_probe_oversized_swatch.png");

        for size in [65_536, u32::MAX, 40_000] {
            let err = save_swatch(&name, Color::WHITE, size).unwrap_err();
            assert!(matches!(err, image::error::ImageError::Limits(_)), "size {size}: {err:?}");
        }
        assert!(!name.exists());
    }

    #[test]
    fn save_swatch_to_missing_directory_fails() {
        let name = std::env::temp_dir()
            .join("color_probe_missing_dir")
            .join("swatch.png");

        assert!(save_swatch(&name, Color::WHITE, 4).is_err());
    }
}
