use std::path::Path;

use log::debug;

use crate::bmp;
use crate::error::BitmapError;
use crate::image::{Gray8Image, Image, Rgb24Image};
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Decode request builder.
///
/// ```no_run
/// use bmpfx::{DecodeRequest, Limits};
///
/// let data = std::fs::read("photo.bmp")?;
/// let limits = Limits {
///     max_pixels: Some(64 * 1024 * 1024),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new(&data).with_limits(&limits).decode()?;
/// println!("{}", image.info());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before allocating pixels.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Layout the file would decode to, from its signature and depth field.
    pub fn probe(&self) -> Result<PixelLayout, BitmapError> {
        bmp::probe_layout(self.data)
    }

    /// Decode an 8-bit or 24-bit file, whichever the header declares.
    pub fn decode(&self) -> Result<Image, BitmapError> {
        let layout = self.probe()?;
        debug!("detected {layout:?} BMP");
        match layout {
            PixelLayout::Gray8 => self.decode_gray8().map(Image::Gray8),
            PixelLayout::Rgb8 => self.decode_rgb24().map(Image::Rgb24),
        }
    }

    /// Decode, requiring a 24-bit file.
    pub fn decode_rgb24(&self) -> Result<Rgb24Image, BitmapError> {
        bmp::decode_24bit(self.data, self.limits)
    }

    /// Decode, requiring an 8-bit file.
    pub fn decode_gray8(&self) -> Result<Gray8Image, BitmapError> {
        bmp::decode_8bit(self.data, self.limits)
    }
}

/// Decode an 8-bit or 24-bit BMP from memory.
pub fn decode(data: &[u8]) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).decode()
}

/// Decode an 8-bit BMP from memory.
pub fn decode_8bit(data: &[u8]) -> Result<Gray8Image, BitmapError> {
    DecodeRequest::new(data).decode_gray8()
}

/// Decode a 24-bit BMP from memory.
pub fn decode_24bit(data: &[u8]) -> Result<Rgb24Image, BitmapError> {
    DecodeRequest::new(data).decode_rgb24()
}

/// Encode an image back to BMP bytes.
pub fn encode(image: &Image) -> Result<Vec<u8>, BitmapError> {
    image.encode()
}

/// Read and decode a BMP file.
pub fn load(path: impl AsRef<Path>) -> Result<Image, BitmapError> {
    Image::load(path)
}

/// Encode and write a BMP file.
pub fn save(path: impl AsRef<Path>, image: &Image) -> Result<(), BitmapError> {
    image.save(path)
}
