//! # bmpfx
//!
//! BMP decoder and encoder for 8-bit and 24-bit files, with a small set of
//! image filters: convolution with square kernels plus per-pixel
//! operations (negative, brightness, threshold, grayscale, histogram
//! equalization).
//!
//! ## Supported Formats
//!
//! - **24-bit** uncompressed BMP: decoded to an RGB grid with row 0 at the
//!   top, whichever row order the file uses. Encoded bottom-up with rows
//!   padded to 4 bytes.
//! - **8-bit** BMP: header, color table and pixel bytes are kept exactly as
//!   read, so decode then encode reproduces the file byte for byte. Pixel
//!   bytes are treated as intensities.
//!
//! ## Non-Goals
//!
//! - RLE and bitfield compression
//! - 1/4/16/32-bit depths
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfx::{Filter, Image, Kernel};
//!
//! let mut image = Image::load("photo.bmp")?;
//! println!("{}", image.info());
//!
//! image.apply(&Filter::GaussianBlur)?;
//! image.apply(&Filter::Brightness(20))?;
//! image.apply(&Filter::Convolve(Kernel::identity(5)?))?;
//! image.save("photo-out.bmp")?;
//! # Ok::<(), bmpfx::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod error;
mod image;
mod limits;
mod pixel;

pub mod bmp;
pub mod filter;

// Re-exports
pub use decode::{DecodeRequest, decode, decode_8bit, decode_24bit, encode, load, save};
pub use error::BitmapError;
pub use filter::{Filter, Kernel, apply_filter, convolve};
pub use image::{Gray8Image, Image, ImageInfo, Rgb24Image};
pub use imgref::{ImgRef, ImgVec};
pub use limits::Limits;
pub use pixel::PixelLayout;
pub use rgb::RGB8;
