use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// Resource limits checked before a decoder allocates its pixel buffer.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check the dimensions of an image about to be decoded.
    pub(crate) fn check_image(
        &self,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<(), BitmapError> {
        let pixels = u64::from(width) * u64::from(height);
        let bytes = pixels.saturating_mul(layout.bytes_per_pixel() as u64);
        within("width", u64::from(width), self.max_width)?;
        within("height", u64::from(height), self.max_height)?;
        within("pixel count", pixels, self.max_pixels)?;
        within("pixel buffer bytes", bytes, self.max_memory_bytes)
    }
}

fn within(what: &str, value: u64, limit: Option<u64>) -> Result<(), BitmapError> {
    match limit {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
