use crate::pixel::PixelLayout;

/// Errors from BMP decoding, encoding and filtering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a BMP file: signature {found:02X?}, expected \"BM\"")]
    InvalidSignature { found: [u8; 2] },

    #[error("unsupported bit depth {bits} (expected {expected:?})")]
    UnsupportedDepth { bits: u16, expected: Option<u16> },

    #[error("unsupported BMP compression {0}, only uncompressed (0) is handled")]
    UnsupportedCompression(u32),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("truncated file: need {needed} bytes, only {available} available")]
    TruncatedFile { needed: usize, available: usize },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("invalid kernel: size {size} with {weights} weights (size must be odd and positive)")]
    InvalidKernel { size: usize, weights: usize },

    #[error("pixel buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("filter {filter} does not apply to {layout:?} images")]
    UnsupportedFilter {
        filter: &'static str,
        layout: PixelLayout,
    },

    #[error("no image loaded")]
    NoImageLoaded,
}
