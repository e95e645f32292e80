/// Pixel memory layout of a decoded image.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Single channel, 8-bit intensity (the raw byte of an 8-bit BMP).
    Gray8,
    /// 3 channels, 8-bit RGB in memory (BGR on disk).
    Rgb8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 => 3,
        }
    }

    /// Value of the BMP `bits per pixel` field for this layout.
    pub fn bits_per_pixel(&self) -> u16 {
        match self {
            Self::Gray8 => 8,
            Self::Rgb8 => 24,
        }
    }

    /// Layout stored by a BMP with the given `bits per pixel` field.
    pub fn from_bits_per_pixel(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(Self::Gray8),
            24 => Some(Self::Rgb8),
            _ => None,
        }
    }
}
