//! BMP codec: 24-bit RGB and 8-bit grayscale, uncompressed only.
//!
//! Use the top-level [`crate::decode`], [`crate::encode`], [`crate::load`]
//! and [`crate::save`], or the per-format image types, for whole-file work.
//! This module exposes the header records for callers that need them.

mod decode;
mod encode;
pub mod header;

pub use header::{
    COLOR_TABLE_SIZE, ColorTable, FILE_HEADER_SIZE, FileHeader, HEADER_SIZE, INFO_HEADER_SIZE,
    InfoHeader, RawHeader, SIGNATURE, offset, row_stride,
};

pub(crate) use decode::{decode_8bit, decode_24bit, probe_layout};
pub(crate) use encode::{encode_8bit, encode_24bit, headers_8, headers_24};
