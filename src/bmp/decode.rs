//! Decoders for uncompressed 24-bit and 8-bit BMP files.

use imgref::ImgVec;
use log::debug;
use rgb::RGB8;

use super::header::{
    COLOR_TABLE_SIZE, ColorTable, Cursor, FileHeader, HEADER_SIZE, InfoHeader, RawHeader,
    checked_row_stride, offset,
};
use crate::error::BitmapError;
use crate::image::{Gray8Image, Rgb24Image};
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Read only the signature and depth field, to pick a decoder.
pub(crate) fn probe_layout(data: &[u8]) -> Result<PixelLayout, BitmapError> {
    let mut cur = Cursor::new(data);
    FileHeader::read(&mut cur)?;
    cur.set_position(offset::BITS_PER_PIXEL)?;
    let bits = cur.read_u16_le()?;
    PixelLayout::from_bits_per_pixel(bits).ok_or(BitmapError::UnsupportedDepth {
        bits,
        expected: None,
    })
}

// ── 24-bit ──────────────────────────────────────────────────────────

/// Decode a 24-bit BMP into a top-row-first RGB grid.
pub(crate) fn decode_24bit(
    data: &[u8],
    limits: Option<&Limits>,
) -> Result<Rgb24Image, BitmapError> {
    let mut cur = Cursor::new(data);
    let file_header = FileHeader::read(&mut cur)?;
    let info_header = InfoHeader::read(&mut cur)?;

    if info_header.bits_per_pixel != 24 {
        return Err(BitmapError::UnsupportedDepth {
            bits: info_header.bits_per_pixel,
            expected: Some(24),
        });
    }
    if info_header.compression != 0 {
        return Err(BitmapError::UnsupportedCompression(
            info_header.compression,
        ));
    }

    let (width, height) = info_header.dimensions()?;
    if let Some(limits) = limits {
        limits.check_image(width, height, PixelLayout::Rgb8)?;
    }
    let top_down = info_header.is_top_down();
    let w = width as usize;
    let h = height as usize;
    let stride =
        checked_row_stride(w).ok_or(BitmapError::DimensionsTooLarge { width, height })?;

    cur.set_position(file_header.pixel_offset as usize)?;

    // Reject short files before allocating the output grid.
    let needed = stride
        .checked_mul(h)
        .and_then(|n| n.checked_add(cur.position()))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if needed > data.len() {
        return Err(BitmapError::TruncatedFile {
            needed,
            available: data.len(),
        });
    }

    debug!(
        "decoding 24-bit BMP {width}x{height} ({}), offset {}, row stride {stride}",
        if top_down { "top-down" } else { "bottom-up" },
        file_header.pixel_offset
    );

    let mut pixels = vec![RGB8::default(); w * h];
    if top_down {
        for out in pixels.chunks_exact_mut(w) {
            bgr_row_to_rgb(cur.read_slice(stride)?, out);
        }
    } else {
        // First on-disk row is the bottom of the picture.
        for out in pixels.rchunks_exact_mut(w) {
            bgr_row_to_rgb(cur.read_slice(stride)?, out);
        }
    }

    Ok(Rgb24Image {
        file_header,
        info_header,
        pixels: ImgVec::new(pixels, w, h),
    })
}

/// Convert one padded on-disk row; trailing padding bytes are ignored.
fn bgr_row_to_rgb(row: &[u8], out: &mut [RGB8]) {
    for (px, bgr) in out.iter_mut().zip(row.chunks_exact(3)) {
        *px = RGB8 {
            r: bgr[2],
            g: bgr[1],
            b: bgr[0],
        };
    }
}

// ── 8-bit ───────────────────────────────────────────────────────────

/// Decode an 8-bit BMP: header blob, 1024-byte color table, then
/// `image_size` raw bytes (or `width * height` when the field is 0).
///
/// No row padding is stripped and no rows are reordered.
pub(crate) fn decode_8bit(data: &[u8], limits: Option<&Limits>) -> Result<Gray8Image, BitmapError> {
    let mut cur = Cursor::new(data);
    let header = RawHeader::from_bytes(cur.read_array::<HEADER_SIZE>()?);

    let bits = header.bits_per_pixel();
    if bits != 8 {
        return Err(BitmapError::UnsupportedDepth {
            bits,
            expected: Some(8),
        });
    }

    let (raw_width, raw_height) = (header.width(), header.height());
    if raw_width <= 0 || raw_height == 0 {
        return Err(BitmapError::InvalidDimensions {
            width: i64::from(raw_width),
            height: i64::from(raw_height),
        });
    }
    let width = raw_width as u32;
    let height = raw_height.unsigned_abs();
    if let Some(limits) = limits {
        limits.check_image(width, height, PixelLayout::Gray8)?;
    }

    let color_table = ColorTable::from_bytes(cur.read_array::<COLOR_TABLE_SIZE>()?);

    let data_size = match header.image_size() {
        0 => (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?,
        n => n as usize,
    };

    debug!("decoding 8-bit BMP {width}x{height}, {data_size} data bytes");

    let pixels = cur.read_slice(data_size)?.to_vec();

    Ok(Gray8Image {
        header,
        color_table,
        width,
        height,
        data: pixels,
    })
}
