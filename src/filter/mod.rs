//! Image filters: convolution with a [`Kernel`] and per-pixel operations.
//!
//! The free functions in [`convolve`](mod@convolve) and [`pointwise`] work on
//! plain pixel slices and grids. [`Filter`] bundles every operation with
//! its parameters so a caller can dispatch on a loaded [`Image`].

pub mod convolve;
pub mod kernel;
pub mod pointwise;

use std::borrow::Cow;

use log::{debug, warn};
use rgb::RGB8;

use crate::error::BitmapError;
use crate::image::{Gray8Image, Image, Rgb24Image};
use crate::pixel::PixelLayout;

pub use convolve::convolve;
pub use kernel::Kernel;

/// A pixel made of 8-bit channels.
pub trait Channels: Copy {
    /// Number of meaningful entries in [`Channels::to_channels`].
    const COUNT: usize;

    /// Channel values, zero-filled past [`Channels::COUNT`].
    fn to_channels(self) -> [u8; 3];

    fn from_channels(c: [u8; 3]) -> Self;

    fn map_channels(self, f: impl Fn(u8) -> u8) -> Self;
}

impl Channels for u8 {
    const COUNT: usize = 1;

    fn to_channels(self) -> [u8; 3] {
        [self, 0, 0]
    }

    fn from_channels(c: [u8; 3]) -> Self {
        c[0]
    }

    fn map_channels(self, f: impl Fn(u8) -> u8) -> Self {
        f(self)
    }
}

impl Channels for RGB8 {
    const COUNT: usize = 3;

    fn to_channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    fn from_channels([r, g, b]: [u8; 3]) -> Self {
        RGB8::new(r, g, b)
    }

    fn map_channels(self, f: impl Fn(u8) -> u8) -> Self {
        RGB8::new(f(self.r), f(self.g), f(self.b))
    }
}

/// Every filter an image can be put through.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Filter {
    Negative,
    /// Add a signed delta to every channel.
    Brightness(i32),
    /// Binarize around a threshold (8-bit only).
    Threshold(i32),
    /// Luma gray (24-bit only).
    Grayscale,
    /// Histogram equalization (8-bit only).
    Equalize,
    BoxBlur,
    GaussianBlur,
    Sharpen,
    Outline,
    Emboss,
    /// Convolution with an arbitrary kernel.
    Convolve(Kernel),
}

impl Filter {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Brightness(_) => "brightness",
            Self::Threshold(_) => "threshold",
            Self::Grayscale => "grayscale",
            Self::Equalize => "equalize",
            Self::BoxBlur => "box blur",
            Self::GaussianBlur => "gaussian blur",
            Self::Sharpen => "sharpen",
            Self::Outline => "outline",
            Self::Emboss => "emboss",
            Self::Convolve(_) => "convolve",
        }
    }

    /// The kernel behind a convolution filter, if this is one.
    pub fn kernel(&self) -> Option<Cow<'_, Kernel>> {
        Some(match self {
            Self::BoxBlur => Cow::Owned(Kernel::box_blur()),
            Self::GaussianBlur => Cow::Owned(Kernel::gaussian_blur()),
            Self::Sharpen => Cow::Owned(Kernel::sharpen()),
            Self::Outline => Cow::Owned(Kernel::outline()),
            Self::Emboss => Cow::Owned(Kernel::emboss()),
            Self::Convolve(k) => Cow::Borrowed(k),
            _ => return None,
        })
    }

    fn unsupported(&self, layout: PixelLayout) -> BitmapError {
        BitmapError::UnsupportedFilter {
            filter: self.name(),
            layout,
        }
    }
}

impl Rgb24Image {
    pub fn negative(&mut self) {
        pointwise::negative(self.pixels.buf_mut());
    }

    pub fn brightness(&mut self, delta: i32) {
        pointwise::brightness(self.pixels.buf_mut(), delta);
    }

    pub fn grayscale(&mut self) {
        pointwise::grayscale(self.pixels.buf_mut());
    }

    /// Replace the pixels with their convolution by `kernel`.
    pub fn convolve(&mut self, kernel: &Kernel) {
        self.pixels = convolve(self.pixels.as_ref(), kernel);
    }

    pub fn apply(&mut self, filter: &Filter) -> Result<(), BitmapError> {
        debug!(
            "applying {} to {}x{} RGB image",
            filter.name(),
            self.width(),
            self.height()
        );
        match filter {
            Filter::Negative => self.negative(),
            Filter::Brightness(delta) => self.brightness(*delta),
            Filter::Grayscale => self.grayscale(),
            Filter::Threshold(_) | Filter::Equalize => {
                return Err(filter.unsupported(PixelLayout::Rgb8));
            }
            other => match other.kernel() {
                Some(kernel) => self.convolve(&kernel),
                None => return Err(other.unsupported(PixelLayout::Rgb8)),
            },
        }
        Ok(())
    }
}

impl Gray8Image {
    pub fn negative(&mut self) {
        pointwise::negative(&mut self.data);
    }

    pub fn brightness(&mut self, delta: i32) {
        pointwise::brightness(&mut self.data, delta);
    }

    pub fn threshold(&mut self, threshold: i32) {
        pointwise::threshold(&mut self.data, threshold);
    }

    pub fn equalize(&mut self) {
        pointwise::equalize(&mut self.data);
    }

    /// Replace the pixel bytes with their convolution by `kernel`.
    ///
    /// Needs the data to be exactly `width * height` bytes.
    pub fn convolve(&mut self, kernel: &Kernel) -> Result<(), BitmapError> {
        let out = convolve(self.as_imgref()?, kernel);
        self.data = out.into_buf();
        Ok(())
    }

    pub fn apply(&mut self, filter: &Filter) -> Result<(), BitmapError> {
        debug!(
            "applying {} to {}x{} gray image",
            filter.name(),
            self.width(),
            self.height()
        );
        match filter {
            Filter::Negative => self.negative(),
            Filter::Brightness(delta) => self.brightness(*delta),
            Filter::Threshold(t) => self.threshold(*t),
            Filter::Equalize => self.equalize(),
            Filter::Grayscale => return Err(filter.unsupported(PixelLayout::Gray8)),
            other => match other.kernel() {
                Some(kernel) => self.convolve(&kernel)?,
                None => return Err(other.unsupported(PixelLayout::Gray8)),
            },
        }
        Ok(())
    }
}

impl Image {
    /// Run `filter` over the image in place.
    ///
    /// Fails with [`BitmapError::UnsupportedFilter`] when the filter does
    /// not exist for this depth; the image is left untouched then.
    pub fn apply(&mut self, filter: &Filter) -> Result<(), BitmapError> {
        match self {
            Self::Gray8(img) => img.apply(filter),
            Self::Rgb24(img) => img.apply(filter),
        }
    }
}

/// Apply `filter` to an image slot that may be empty.
///
/// An empty slot is reported as [`BitmapError::NoImageLoaded`] and
/// nothing else happens.
pub fn apply_filter(image: Option<&mut Image>, filter: &Filter) -> Result<(), BitmapError> {
    match image {
        Some(image) => image.apply(filter),
        None => {
            warn!("{} requested with no image loaded", filter.name());
            Err(BitmapError::NoImageLoaded)
        }
    }
}
