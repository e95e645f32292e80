//! On-disk header records of an uncompressed BMP and their byte layout.
//!
//! Every multi-byte field is little-endian and the records are packed:
//! the 14-byte file header is immediately followed by the 40-byte
//! `BITMAPINFOHEADER`, with no padding between fields.

use crate::error::BitmapError;

/// Size of the file header (`BITMAPFILEHEADER`).
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the info header (`BITMAPINFOHEADER`).
pub const INFO_HEADER_SIZE: usize = 40;
/// File header plus info header.
pub const HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// 256 palette entries of 4 bytes (blue, green, red, reserved).
pub const COLOR_TABLE_SIZE: usize = 1024;
/// Magic bytes at the start of every BMP file.
pub const SIGNATURE: [u8; 2] = *b"BM";
/// 2835 pixels per metre, i.e. 72 DPI.
pub const DEFAULT_RESOLUTION: i32 = 2835;

/// Absolute byte offsets of the header fields from the start of the file.
pub mod offset {
    pub const SIGNATURE: usize = 0x00;
    pub const FILE_SIZE: usize = 0x02;
    pub const RESERVED1: usize = 0x06;
    pub const RESERVED2: usize = 0x08;
    pub const PIXEL_OFFSET: usize = 0x0A;
    pub const INFO_SIZE: usize = 0x0E;
    pub const WIDTH: usize = 0x12;
    pub const HEIGHT: usize = 0x16;
    pub const PLANES: usize = 0x1A;
    pub const BITS_PER_PIXEL: usize = 0x1C;
    pub const COMPRESSION: usize = 0x1E;
    pub const IMAGE_SIZE: usize = 0x22;
    pub const X_RESOLUTION: usize = 0x26;
    pub const Y_RESOLUTION: usize = 0x2A;
    pub const COLORS_USED: usize = 0x2E;
    pub const IMPORTANT_COLORS: usize = 0x32;
}

/// Bytes in one on-disk 24-bit pixel row, padded to a multiple of 4.
///
/// ```
/// assert_eq!(bmpfx::bmp::row_stride(5), 16);
/// assert_eq!(bmpfx::bmp::row_stride(4), 12);
/// ```
pub const fn row_stride(width: usize) -> usize {
    (width * 3).div_ceil(4) * 4
}

/// Overflow-checked [`row_stride`].
pub(crate) fn checked_row_stride(width: usize) -> Option<usize> {
    width
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

// ── Cursor over the input bytes ─────────────────────────────────────

/// Bounds-checked little-endian reader. Short reads fail with
/// [`BitmapError::TruncatedFile`] instead of yielding zeros.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn truncated(&self, needed: usize) -> BitmapError {
        BitmapError::TruncatedFile {
            needed,
            available: self.data.len(),
        }
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), BitmapError> {
        if pos > self.data.len() {
            return Err(self.truncated(pos));
        }
        self.pos = pos;
        Ok(())
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn read_slice(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or_else(|| self.truncated(usize::MAX))?;
        let data = self.data;
        let out = data.get(self.pos..end).ok_or_else(|| self.truncated(end))?;
        self.pos = end;
        Ok(out)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_slice(N)?);
        Ok(buf)
    }

    pub(crate) fn read_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub(crate) fn read_i32_le(&mut self) -> Result<i32, BitmapError> {
        self.read_array().map(i32::from_le_bytes)
    }
}

// ── File header ─────────────────────────────────────────────────────

/// `BITMAPFILEHEADER`: the first 14 bytes of the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    /// Total file size in bytes as declared by the writer.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Distance from the start of the file to the first pixel byte.
    pub pixel_offset: u32,
}

impl FileHeader {
    /// Header for a freshly written file.
    pub fn new(file_size: u32, pixel_offset: u32) -> Self {
        Self {
            signature: SIGNATURE,
            file_size,
            reserved1: 0,
            reserved2: 0,
            pixel_offset,
        }
    }

    /// Parse from the start of `data`, rejecting anything not signed "BM".
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        let mut cur = Cursor::new(data);
        Self::read(&mut cur)
    }

    pub(crate) fn read(cur: &mut Cursor<'_>) -> Result<Self, BitmapError> {
        let signature = cur.read_array::<2>()?;
        if signature != SIGNATURE {
            return Err(BitmapError::InvalidSignature { found: signature });
        }
        Ok(Self {
            signature,
            file_size: cur.read_u32_le()?,
            reserved1: cur.read_u16_le()?,
            reserved2: cur.read_u16_le()?,
            pixel_offset: cur.read_u32_le()?,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.pixel_offset.to_le_bytes());
    }
}

// ── Info header ─────────────────────────────────────────────────────

/// `BITMAPINFOHEADER`: the 40 bytes following the file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    /// Size of this header; 40 for `BITMAPINFOHEADER`.
    pub header_size: u32,
    pub width: i32,
    /// Negative for top-down row order, positive for bottom-up.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Size of the raw pixel data; may be 0 for uncompressed files.
    pub image_size: u32,
    pub x_resolution: i32,
    pub y_resolution: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl InfoHeader {
    /// Uncompressed header at 72 DPI; a negative `height` declares top-down rows.
    pub fn new(width: i32, height: i32, bits_per_pixel: u16, image_size: u32) -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width,
            height,
            planes: 1,
            bits_per_pixel,
            compression: 0,
            image_size,
            x_resolution: DEFAULT_RESOLUTION,
            y_resolution: DEFAULT_RESOLUTION,
            colors_used: 0,
            important_colors: 0,
        }
    }

    /// Parse the info header that follows the 14-byte file header in `data`.
    ///
    /// Only the fixed layout is checked here; depth, compression and
    /// dimension rules are the codec's business.
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        let mut cur = Cursor::new(data);
        cur.set_position(FILE_HEADER_SIZE)?;
        Self::read(&mut cur)
    }

    pub(crate) fn read(cur: &mut Cursor<'_>) -> Result<Self, BitmapError> {
        let header = Self {
            header_size: cur.read_u32_le()?,
            width: cur.read_i32_le()?,
            height: cur.read_i32_le()?,
            planes: cur.read_u16_le()?,
            bits_per_pixel: cur.read_u16_le()?,
            compression: cur.read_u32_le()?,
            image_size: cur.read_u32_le()?,
            x_resolution: cur.read_i32_le()?,
            y_resolution: cur.read_i32_le()?,
            colors_used: cur.read_u32_le()?,
            important_colors: cur.read_u32_le()?,
        };
        if (header.header_size as usize) < INFO_HEADER_SIZE {
            return Err(BitmapError::InvalidHeader(format!(
                "info header size {} is smaller than {INFO_HEADER_SIZE}",
                header.header_size
            )));
        }
        Ok(header)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_resolution.to_le_bytes());
        out.extend_from_slice(&self.y_resolution.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.important_colors.to_le_bytes());
    }

    /// Rows are stored first-row-first when the height is negative.
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Validated `(width, abs(height))`.
    pub fn dimensions(&self) -> Result<(u32, u32), BitmapError> {
        let height = self.height.unsigned_abs();
        if self.width <= 0 || height == 0 {
            return Err(BitmapError::InvalidDimensions {
                width: i64::from(self.width),
                height: i64::from(self.height),
            });
        }
        Ok((self.width as u32, height))
    }
}

// ── Opaque 8-bit header blob ────────────────────────────────────────

/// The 54 header bytes of an 8-bit file, kept verbatim.
///
/// Accessors decode individual fields at their fixed offsets; the blob
/// itself is written back unchanged on encode.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawHeader([u8; HEADER_SIZE]);

impl RawHeader {
    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a blob from typed records.
    pub fn from_headers(file: &FileHeader, info: &InfoHeader) -> Self {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        file.write(&mut out);
        info.write(&mut out);
        let mut bytes = [0u8; HEADER_SIZE];
        bytes.copy_from_slice(&out);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.0
    }

    fn field<const N: usize>(&self, at: usize) -> [u8; N] {
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.0[at..at + N]);
        buf
    }

    pub fn signature(&self) -> [u8; 2] {
        self.field(offset::SIGNATURE)
    }

    pub fn file_size(&self) -> u32 {
        u32::from_le_bytes(self.field(offset::FILE_SIZE))
    }

    pub fn pixel_offset(&self) -> u32 {
        u32::from_le_bytes(self.field(offset::PIXEL_OFFSET))
    }

    pub fn width(&self) -> i32 {
        i32::from_le_bytes(self.field(offset::WIDTH))
    }

    pub fn height(&self) -> i32 {
        i32::from_le_bytes(self.field(offset::HEIGHT))
    }

    pub fn bits_per_pixel(&self) -> u16 {
        u16::from_le_bytes(self.field(offset::BITS_PER_PIXEL))
    }

    pub fn compression(&self) -> u32 {
        u32::from_le_bytes(self.field(offset::COMPRESSION))
    }

    /// Raw pixel data size as stored; 0 means "width * height".
    pub fn image_size(&self) -> u32 {
        u32::from_le_bytes(self.field(offset::IMAGE_SIZE))
    }
}

impl core::fmt::Debug for RawHeader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawHeader")
            .field("signature", &self.signature())
            .field("file_size", &self.file_size())
            .field("pixel_offset", &self.pixel_offset())
            .field("width", &self.width())
            .field("height", &self.height())
            .field("bits_per_pixel", &self.bits_per_pixel())
            .field("image_size", &self.image_size())
            .finish()
    }
}

// ── Color table ─────────────────────────────────────────────────────

/// The 1024-byte palette of an 8-bit file.
///
/// Carried through decode/encode untouched; pixel bytes are treated as
/// intensities and never looked up here.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorTable(Box<[u8; COLOR_TABLE_SIZE]>);

impl ColorTable {
    pub fn from_bytes(bytes: [u8; COLOR_TABLE_SIZE]) -> Self {
        Self(Box::new(bytes))
    }

    /// Linear gray ramp: entry `i` is `(i, i, i, 0)`.
    pub fn grayscale() -> Self {
        let mut bytes = [0u8; COLOR_TABLE_SIZE];
        for (i, entry) in bytes.chunks_exact_mut(4).enumerate() {
            let v = i as u8;
            entry.copy_from_slice(&[v, v, v, 0]);
        }
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; COLOR_TABLE_SIZE] {
        &self.0
    }

    /// Palette entry in on-disk order: blue, green, red, reserved.
    pub fn entry(&self, index: u8) -> [u8; 4] {
        let at = usize::from(index) * 4;
        [self.0[at], self.0[at + 1], self.0[at + 2], self.0[at + 3]]
    }
}

impl core::fmt::Debug for ColorTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ColorTable")
            .field("len", &COLOR_TABLE_SIZE)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_stride_pads_to_four() {
        assert_eq!(row_stride(1), 4);
        assert_eq!(row_stride(2), 8);
        assert_eq!(row_stride(3), 12);
        assert_eq!(row_stride(4), 12);
        assert_eq!(row_stride(5), 16);
        assert_eq!(checked_row_stride(5), Some(16));
        assert_eq!(checked_row_stride(usize::MAX), None);
    }

    #[test]
    fn headers_occupy_exact_widths() {
        let file = FileHeader::new(70, 54);
        let info = InfoHeader::new(2, -3, 24, 16);
        let mut out = Vec::new();
        file.write(&mut out);
        assert_eq!(out.len(), FILE_HEADER_SIZE);
        info.write(&mut out);
        assert_eq!(out.len(), HEADER_SIZE);

        assert_eq!(&out[offset::SIGNATURE..2], b"BM");
        assert_eq!(out[offset::FILE_SIZE], 70);
        assert_eq!(out[offset::PIXEL_OFFSET], 54);
        assert_eq!(out[offset::INFO_SIZE], 40);
        assert_eq!(out[offset::WIDTH], 2);
        assert_eq!(&out[offset::HEIGHT..offset::HEIGHT + 4], &(-3i32).to_le_bytes());
        assert_eq!(out[offset::PLANES], 1);
        assert_eq!(out[offset::BITS_PER_PIXEL], 24);
        assert_eq!(out[offset::IMAGE_SIZE], 16);
        assert_eq!(
            &out[offset::X_RESOLUTION..offset::X_RESOLUTION + 4],
            &2835i32.to_le_bytes()
        );

        assert_eq!(FileHeader::parse(&out).unwrap(), file);
        let parsed = InfoHeader::parse(&out).unwrap();
        assert_eq!(parsed, info);
        assert!(parsed.is_top_down());
        assert_eq!(parsed.dimensions().unwrap(), (2, 3));
    }

    #[test]
    fn signature_mismatch() {
        let mut out = Vec::new();
        FileHeader::new(54, 54).write(&mut out);
        out[0] = b'P';
        match FileHeader::parse(&out) {
            Err(BitmapError::InvalidSignature { found }) => assert_eq!(&found, b"PM"),
            other => panic!("expected InvalidSignature, got {other:?}"),
        }
    }

    #[test]
    fn short_header_is_truncated() {
        match FileHeader::parse(b"BM\x00\x00") {
            Err(BitmapError::TruncatedFile { available: 4, .. }) => {}
            other => panic!("expected TruncatedFile, got {other:?}"),
        }
    }

    #[test]
    fn zero_dimensions_rejected() {
        let info = InfoHeader::new(0, 4, 24, 0);
        assert!(matches!(
            info.dimensions(),
            Err(BitmapError::InvalidDimensions { width: 0, height: 4 })
        ));
        let info = InfoHeader::new(4, 0, 24, 0);
        assert!(info.dimensions().is_err());
        let info = InfoHeader::new(-4, 4, 24, 0);
        assert!(info.dimensions().is_err());
    }

    #[test]
    fn raw_header_accessors() {
        let raw = RawHeader::from_headers(
            &FileHeader::new(1078 + 6, 1078),
            &InfoHeader::new(3, 2, 8, 6),
        );
        assert_eq!(raw.signature(), SIGNATURE);
        assert_eq!(raw.file_size(), 1084);
        assert_eq!(raw.pixel_offset(), 1078);
        assert_eq!(raw.width(), 3);
        assert_eq!(raw.height(), 2);
        assert_eq!(raw.bits_per_pixel(), 8);
        assert_eq!(raw.compression(), 0);
        assert_eq!(raw.image_size(), 6);
    }

    #[test]
    fn grayscale_palette() {
        let table = ColorTable::grayscale();
        assert_eq!(table.entry(0), [0, 0, 0, 0]);
        assert_eq!(table.entry(200), [200, 200, 200, 0]);
        assert_eq!(table.entry(255), [255, 255, 255, 0]);
    }

    #[test]
    fn pixel_offset_past_declared_size_is_accepted() {
        // Writers often leave the file size at 0; pixels are found through
        // the offset and the real input length.
        let mut out = Vec::new();
        FileHeader::new(0, 54).write(&mut out);
        let file = FileHeader::parse(&out).unwrap();
        assert_eq!(file.file_size, 0);
        assert_eq!(file.pixel_offset, 54);
    }

    #[test]
    fn larger_info_header_and_planes_accepted() {
        let mut info = InfoHeader::new(3, 2, 24, 24);
        info.header_size = 124;
        info.planes = 2;
        let mut out = Vec::new();
        FileHeader::new(138 + 24, 138).write(&mut out);
        info.write(&mut out);
        // Rest of the V5 header.
        out.resize(138, 0);

        let parsed = InfoHeader::parse(&out).unwrap();
        assert_eq!(parsed.header_size, 124);
        assert_eq!(parsed.planes, 2);
        assert_eq!(parsed.dimensions().unwrap(), (3, 2));

        out[offset::INFO_SIZE] = 39;
        assert!(matches!(
            InfoHeader::parse(&out),
            Err(BitmapError::InvalidHeader(_))
        ));
    }
}
