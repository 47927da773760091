// The `Display` strings double as the messages a UI shows the user, so they are
// written as sentences rather than diagnostics. The underlying cause is kept as
// the error source for logs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The input bytes were malformed, truncated, or in an unsupported format.
    #[error("Failed to decode image.")]
    DecodeFailure(#[from] image::ImageError),

    /// The image file could not be read at all.
    #[error("Failed to decode image.")]
    Unreadable(#[from] std::io::Error),

    /// The click did not land on a pixel of the rendered image.
    #[error("Click was outside the image area.")]
    OutOfBounds,

    /// Zero width or zero height; there is nothing to average.
    #[error("Image has no area ({width}x{height}); cannot compute a dominant color.")]
    DegenerateImage { width: u32, height: u32 },
}

impl ProbeError {
    /// Both decode variants surface as the same user-facing failure.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, ProbeError::DecodeFailure(_) | ProbeError::Unreadable(_))
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
