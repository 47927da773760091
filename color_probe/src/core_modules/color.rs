// THEORY:
// The `Color` module is the most fundamental unit of the probe. It is a "dumb"
// data container for a single RGBA value, the thing both the click mapper and
// the dominant color estimator ultimately hand back to a caller.
//
// Key principles:
// 1.  **Statically typed channels**: Channel values are read straight out of the
//     decoded `image::Rgba<u8>` and stored as named fields. No caller ever has to
//     recover channels from a generic color abstraction.
// 2.  **Derived colors are opaque**: Anything the probe computes (a sampled pixel,
//     an average) is reported with alpha fixed at 255. The source alpha is not
//     part of the result.
// 3.  **Formatting lives with the data**: The hex form and the `R:<r> G:<g> B:<b>`
//     channel listing are the only two textual shapes a color takes in this crate,
//     so they are defined here once and reused by every report.

pub mod color {
    use std::fmt;

    pub type Channel = u8;

    pub const OPAQUE: Channel = 255;

    /// A single 8-bit-per-channel RGBA color.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Color {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Default for Color {
        fn default() -> Self {
            Self::WHITE
        }
    }

    impl Color {
        pub const WHITE: Color = Color::opaque(255, 255, 255);
        pub const BLACK: Color = Color::opaque(0, 0, 0);

        pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Self { red, green, blue, alpha }
        }

        /// A color with alpha fixed at fully opaque.
        pub const fn opaque(red: Channel, green: Channel, blue: Channel) -> Self {
            Self::new(red, green, blue, OPAQUE)
        }

        /// The same RGB channels with alpha forced to 255.
        pub fn to_opaque(self) -> Self {
            Self::opaque(self.red, self.green, self.blue)
        }

        /// RGB scaled by alpha, then narrowed to 8 bits by truncation.
        ///
        /// Each channel is widened to 16 bits (`v * 257`), multiplied by alpha and
        /// divided by 255, then shifted right by 8. Opaque colors come back unchanged
        /// and fully transparent ones come back black.
        pub fn premultiplied(self) -> Self {
            let alpha = self.alpha as u32;
            let scale = |channel: Channel| ((channel as u32 * 257 * alpha / 255) >> 8) as Channel;
            Self::new(scale(self.red), scale(self.green), scale(self.blue), self.alpha)
        }

        /// `#RRGGBB`, two uppercase hex digits per channel. Alpha is not included.
        pub fn hex(&self) -> String {
            format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
        }

        pub fn channels(&self) -> [Channel; 4] {
            [self.red, self.green, self.blue, self.alpha]
        }
    }

    /// `R:<r> G:<g> B:<b> (#RRGGBB)`
    impl fmt::Display for Color {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "R:{} G:{} B:{} ({})",
                self.red,
                self.green,
                self.blue,
                self.hex()
            )
        }
    }

    impl From<image::Rgba<u8>> for Color {
        fn from(pixel: image::Rgba<u8>) -> Self {
            let [red, green, blue, alpha] = pixel.0;
            Self::new(red, green, blue, alpha)
        }
    }

    impl From<Color> for image::Rgba<u8> {
        fn from(color: Color) -> Self {
            image::Rgba(color.channels())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn hex_is_zero_padded_uppercase() {
            assert_eq!(Color::opaque(255, 0, 16).hex(), "#FF0010");
            assert_eq!(Color::opaque(12, 34, 56).hex(), "#0C2238");
            assert_eq!(Color::BLACK.hex(), "#000000");
        }

        #[test]
        fn display_lists_channels_then_hex() {
            let color = Color::opaque(12, 34, 56);
            assert_eq!(color.to_string(), "R:12 G:34 B:56 (#0C2238)");
        }

        #[test]
        fn to_opaque_keeps_rgb_and_drops_alpha() {
            let translucent = Color::new(1, 2, 3, 40);
            assert_eq!(translucent.to_opaque(), Color::opaque(1, 2, 3));
        }

        #[test]
        fn premultiplied_scales_by_alpha_and_truncates() {
            assert_eq!(
                Color::new(12, 34, 56, 128).premultiplied(),
                Color::new(6, 17, 28, 128)
            );
            assert_eq!(Color::new(12, 34, 56, 0).premultiplied(), Color::new(0, 0, 0, 0));
            assert_eq!(Color::opaque(255, 1, 16).premultiplied(), Color::opaque(255, 1, 16));
        }

        #[test]
        fn converts_from_image_rgba() {
            let color: Color = image::Rgba([9, 8, 7, 6]).into();
            assert_eq!(color, Color::new(9, 8, 7, 6));
            let back: image::Rgba<u8> = color.into();
            assert_eq!(back.0, [9, 8, 7, 6]);
        }
    }
}
