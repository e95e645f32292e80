use core::fmt;
use std::path::Path;

use imgref::{ImgRef, ImgRefMut, ImgVec};
use rgb::RGB8;

use crate::bmp::{self, ColorTable, FileHeader, InfoHeader, RawHeader};
use crate::decode::DecodeRequest;
use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// A 24-bit BMP: its headers plus an RGB pixel grid with row 0 at the top.
#[derive(Clone, Debug)]
pub struct Rgb24Image {
    pub(crate) file_header: FileHeader,
    pub(crate) info_header: InfoHeader,
    pub(crate) pixels: ImgVec<RGB8>,
}

impl Rgb24Image {
    /// Wrap a pixel grid, synthesizing headers for a bottom-up 24-bit file.
    pub fn new(pixels: ImgVec<RGB8>) -> Result<Self, BitmapError> {
        let (file_header, info_header) = bmp::headers_24(pixels.width(), pixels.height())?;
        Ok(Self {
            file_header,
            info_header,
            pixels,
        })
    }

    /// Decode a 24-bit BMP from memory.
    pub fn decode(data: &[u8]) -> Result<Self, BitmapError> {
        DecodeRequest::new(data).decode_rgb24()
    }

    /// Read and decode a 24-bit BMP file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BitmapError> {
        let data = std::fs::read(path)?;
        Self::decode(&data)
    }

    /// Encode as a bottom-up 24-bit BMP.
    pub fn encode(&self) -> Result<Vec<u8>, BitmapError> {
        bmp::encode_24bit(self.pixels.as_ref())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BitmapError> {
        std::fs::write(path, self.encode()?)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.height() as u32
    }

    /// File header as read from disk (or synthesized by [`Rgb24Image::new`]).
    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    pub fn pixels(&self) -> ImgRef<'_, RGB8> {
        self.pixels.as_ref()
    }

    pub fn pixels_mut(&mut self) -> ImgRefMut<'_, RGB8> {
        self.pixels.as_mut()
    }

    /// Swap in a new pixel grid of the same dimensions.
    pub fn replace_pixels(&mut self, pixels: ImgVec<RGB8>) -> Result<(), BitmapError> {
        if pixels.width() != self.pixels.width() || pixels.height() != self.pixels.height() {
            return Err(BitmapError::BufferSizeMismatch {
                expected: self.pixels.width() * self.pixels.height(),
                actual: pixels.width() * pixels.height(),
            });
        }
        self.pixels = pixels;
        Ok(())
    }

    pub fn into_pixels(self) -> ImgVec<RGB8> {
        self.pixels
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width(),
            height: self.height(),
            layout: PixelLayout::Rgb8,
            file_size: self.file_header.file_size,
            pixel_offset: self.file_header.pixel_offset,
            compression: self.info_header.compression,
            top_down: self.info_header.is_top_down(),
        }
    }
}

/// An 8-bit BMP kept as on disk: header blob, color table and raw
/// pixel bytes. Pixel bytes are intensities; rows are never reordered.
#[derive(Clone, Debug)]
pub struct Gray8Image {
    pub(crate) header: RawHeader,
    pub(crate) color_table: ColorTable,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Vec<u8>,
}

impl Gray8Image {
    /// Build an image from `width * height` intensity bytes, with a
    /// standard header and a linear gray palette.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BitmapError> {
        let (file_header, info_header) = bmp::headers_8(width, height)?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(BitmapError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            header: RawHeader::from_headers(&file_header, &info_header),
            color_table: ColorTable::grayscale(),
            width,
            height,
            data,
        })
    }

    /// Decode an 8-bit BMP from memory.
    pub fn decode(data: &[u8]) -> Result<Self, BitmapError> {
        DecodeRequest::new(data).decode_gray8()
    }

    /// Read and decode an 8-bit BMP file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BitmapError> {
        let data = std::fs::read(path)?;
        Self::decode(&data)
    }

    /// Header blob, color table, then the pixel bytes, all unmodified.
    pub fn encode(&self) -> Vec<u8> {
        bmp::encode_8bit(self)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BitmapError> {
        std::fs::write(path, self.encode())?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn header(&self) -> &RawHeader {
        &self.header
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    /// Whether the header declares top-down rows. The data is stored as
    /// read either way.
    pub fn is_top_down(&self) -> bool {
        self.header.height() < 0
    }

    /// Number of pixel bytes read from (and written back to) the file.
    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// View the bytes as a `width x height` grid. Fails when the stored
    /// data size is not exactly `width * height`.
    pub fn as_imgref(&self) -> Result<ImgRef<'_, u8>, BitmapError> {
        let (w, h) = (self.width as usize, self.height as usize);
        if self.data.len() != w * h {
            return Err(BitmapError::BufferSizeMismatch {
                expected: w * h,
                actual: self.data.len(),
            });
        }
        Ok(ImgRef::new(&self.data[..], w, h))
    }

    /// Swap in new pixel bytes of the same length.
    pub fn replace_data(&mut self, data: Vec<u8>) -> Result<(), BitmapError> {
        if data.len() != self.data.len() {
            return Err(BitmapError::BufferSizeMismatch {
                expected: self.data.len(),
                actual: data.len(),
            });
        }
        self.data = data;
        Ok(())
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width,
            height: self.height,
            layout: PixelLayout::Gray8,
            file_size: self.header.file_size(),
            pixel_offset: self.header.pixel_offset(),
            compression: self.header.compression(),
            top_down: self.is_top_down(),
        }
    }
}

/// A decoded image of either supported depth, owned by the caller.
#[derive(Clone, Debug)]
pub enum Image {
    Gray8(Gray8Image),
    Rgb24(Rgb24Image),
}

impl Image {
    /// Decode either depth, chosen by the bits-per-pixel field.
    pub fn decode(data: &[u8]) -> Result<Self, BitmapError> {
        DecodeRequest::new(data).decode()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BitmapError> {
        let data = std::fs::read(path)?;
        Self::decode(&data)
    }

    pub fn encode(&self) -> Result<Vec<u8>, BitmapError> {
        match self {
            Self::Gray8(img) => Ok(img.encode()),
            Self::Rgb24(img) => img.encode(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BitmapError> {
        match self {
            Self::Gray8(img) => img.save(path),
            Self::Rgb24(img) => img.save(path),
        }
    }

    pub fn layout(&self) -> PixelLayout {
        match self {
            Self::Gray8(_) => PixelLayout::Gray8,
            Self::Rgb24(_) => PixelLayout::Rgb8,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Gray8(img) => img.width(),
            Self::Rgb24(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Gray8(img) => img.height(),
            Self::Rgb24(img) => img.height(),
        }
    }

    pub fn info(&self) -> ImageInfo {
        match self {
            Self::Gray8(img) => img.info(),
            Self::Rgb24(img) => img.info(),
        }
    }
}

impl From<Gray8Image> for Image {
    fn from(img: Gray8Image) -> Self {
        Self::Gray8(img)
    }
}

impl From<Rgb24Image> for Image {
    fn from(img: Rgb24Image) -> Self {
        Self::Rgb24(img)
    }
}

/// Header summary of a loaded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    /// File size as declared in the file header.
    pub file_size: u32,
    pub pixel_offset: u32,
    pub compression: u32,
    pub top_down: bool,
}

impl ImageInfo {
    pub fn bits_per_pixel(&self) -> u16 {
        self.layout.bits_per_pixel()
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "width:        {} px", self.width)?;
        writeln!(f, "height:       {} px", self.height)?;
        writeln!(f, "depth:        {} bits", self.bits_per_pixel())?;
        writeln!(f, "file size:    {} bytes", self.file_size)?;
        writeln!(f, "pixel offset: {}", self.pixel_offset)?;
        writeln!(f, "compression:  {}", self.compression)?;
        write!(
            f,
            "row order:    {}",
            if self.top_down { "top-down" } else { "bottom-up" }
        )
    }
}
