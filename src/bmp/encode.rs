//! BMP encoders: bottom-up 24-bit and pass-through 8-bit.

use imgref::ImgRef;
use log::debug;
use rgb::RGB8;

use super::header::{
    COLOR_TABLE_SIZE, FileHeader, HEADER_SIZE, InfoHeader, checked_row_stride,
};
use crate::error::BitmapError;
use crate::image::Gray8Image;

/// Headers for a bottom-up 24-bit file of the given size.
pub(crate) fn headers_24(
    width: usize,
    height: usize,
) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let (w, h) = positive_dimensions(width, height)?;
    let too_large = || BitmapError::DimensionsTooLarge {
        width: width as u32,
        height: height as u32,
    };
    let image_size = checked_row_stride(width)
        .and_then(|stride| stride.checked_mul(height))
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(too_large)?;
    let file_size = image_size
        .checked_add(HEADER_SIZE as u32)
        .ok_or_else(too_large)?;

    Ok((
        FileHeader::new(file_size, HEADER_SIZE as u32),
        InfoHeader::new(w, h, 24, image_size),
    ))
}

/// Headers for an 8-bit file followed by a full 256-entry palette and
/// `width * height` unpadded bytes.
pub(crate) fn headers_8(width: u32, height: u32) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let (w, h) = positive_dimensions(width as usize, height as usize)?;
    let pixel_offset = (HEADER_SIZE + COLOR_TABLE_SIZE) as u32;
    let too_large = || BitmapError::DimensionsTooLarge { width, height };
    let image_size = width.checked_mul(height).ok_or_else(too_large)?;
    let file_size = image_size
        .checked_add(pixel_offset)
        .ok_or_else(too_large)?;

    let mut info = InfoHeader::new(w, h, 8, image_size);
    info.colors_used = 256;
    Ok((FileHeader::new(file_size, pixel_offset), info))
}

fn positive_dimensions(width: usize, height: usize) -> Result<(i32, i32), BitmapError> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(BitmapError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        }),
    }
}

/// Encode an RGB grid as an uncompressed 24-bit BMP.
///
/// Output is always bottom-up with a 54-byte pixel offset, whatever the
/// orientation of the file the pixels came from.
pub(crate) fn encode_24bit(pixels: ImgRef<'_, RGB8>) -> Result<Vec<u8>, BitmapError> {
    let (w, h) = (pixels.width(), pixels.height());
    let (file_header, info_header) = headers_24(w, h)?;
    let row_stride = info_header.image_size as usize / h;
    let pad_bytes = row_stride - w * 3;

    debug!(
        "encoding 24-bit BMP {w}x{h}, row stride {row_stride}, {} bytes",
        file_header.file_size
    );

    let mut out = Vec::with_capacity(file_header.file_size as usize);
    file_header.write(&mut out);
    info_header.write(&mut out);

    let buf = pixels.buf();
    let src_stride = pixels.stride();
    for row in (0..h).rev() {
        let start = row * src_stride;
        for px in &buf[start..start + w] {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

/// Write an 8-bit image back exactly as it was read.
pub(crate) fn encode_8bit(img: &Gray8Image) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + COLOR_TABLE_SIZE + img.data.len());
    out.extend_from_slice(img.header.as_bytes());
    out.extend_from_slice(img.color_table.as_bytes());
    out.extend_from_slice(&img.data);
    debug!("encoded 8-bit BMP, {} bytes", out.len());
    out
}
