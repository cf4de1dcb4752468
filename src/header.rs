//! BMP header model: the 14-byte file header and the 40-byte BITMAPINFOHEADER.
//!
//! Every field is kept as its exact little-endian byte representation
//! ([`LeField`]). Numeric values are computed on demand, so fields that a
//! caller never touches are written back byte-for-byte.
//!
//! Layout (all offsets absolute, all integers little-endian):
//!
//! | Offset | Size | Field              |
//! |--------|------|--------------------|
//! | 0      | 2    | signature `BM`     |
//! | 2      | 4    | file_size          |
//! | 6      | 4    | reserved           |
//! | 10     | 4    | data_offset        |
//! | 14     | 4    | info_header_size   |
//! | 18     | 4    | width              |
//! | 22     | 4    | height             |
//! | 26     | 2    | planes             |
//! | 28     | 2    | color_depth        |
//! | 30     | 4    | compression        |
//! | 34     | 4    | compressed_size    |
//! | 38     | 4    | x_pixels_per_m     |
//! | 42     | 4    | y_pixels_per_m     |
//! | 46     | 4    | used_colors        |
//! | 50     | 4    | important_colors   |
//! | 54     | N    | color table        |
//! | 54+N   | M    | raster data        |

use crate::error::BmpError;
use crate::le::{decode_le, encode_array};

/// The `BM` magic.
pub const SIGNATURE: [u8; 2] = *b"BM";
/// Size of the file header.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of a BITMAPINFOHEADER.
pub const INFO_HEADER_LEN: usize = 40;
/// Combined header size; the color table (if any) starts here.
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

// ── Fixed-width field ───────────────────────────────────────────────

/// A header field stored as exactly `N` little-endian bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LeField<const N: usize>([u8; N]);

impl<const N: usize> LeField<N> {
    /// Wrap raw bytes verbatim.
    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Encode an unsigned value, rejecting values wider than `N` bytes.
    pub fn from_value(n: u64) -> Result<Self, BmpError> {
        encode_array::<N>(n).map(Self)
    }

    pub const fn bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Unsigned little-endian value.
    pub fn value(&self) -> u64 {
        decode_le(&self.0)
    }
}

impl<const N: usize> Default for LeField<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl LeField<2> {
    pub const fn as_u16(&self) -> u16 {
        u16::from_le_bytes(self.0)
    }
}

impl LeField<4> {
    pub const fn as_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub const fn as_i32(&self) -> i32 {
        i32::from_le_bytes(self.0)
    }

    /// Const constructor for u32 values (always fits).
    pub const fn from_u32(n: u32) -> Self {
        Self(n.to_le_bytes())
    }
}

// ── Color depth ─────────────────────────────────────────────────────

/// Bits per pixel understood by this codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorDepth {
    /// 1 bpp, 2-entry palette.
    Bpp1,
    /// 4 bpp, 16-entry palette.
    Bpp4,
    /// 8 bpp, 256-entry palette.
    Bpp8,
    /// 16 bpp direct color (RGB555).
    Bpp16,
    /// 24 bpp direct color (BGR).
    Bpp24,
}

impl ColorDepth {
    pub fn from_bits(bits: u16) -> Result<Self, BmpError> {
        match bits {
            1 => Ok(Self::Bpp1),
            4 => Ok(Self::Bpp4),
            8 => Ok(Self::Bpp8),
            16 => Ok(Self::Bpp16),
            24 => Ok(Self::Bpp24),
            other => Err(BmpError::UnsupportedColorDepth(other)),
        }
    }

    pub const fn bits(self) -> u16 {
        match self {
            Self::Bpp1 => 1,
            Self::Bpp4 => 4,
            Self::Bpp8 => 8,
            Self::Bpp16 => 16,
            Self::Bpp24 => 24,
        }
    }

    /// Whether pixels are palette indices.
    pub const fn is_indexed(self) -> bool {
        self.bits() <= 8
    }

    /// Color table length in bytes: `4 * 2^bits` for indexed depths, else 0.
    pub const fn color_table_len(self) -> usize {
        color_table_len(self.bits())
    }

    /// Bytes per 4-byte-aligned scanline of `width` pixels.
    pub fn row_size(self, width: u32) -> Option<usize> {
        row_size(width, self.bits())
    }
}

impl TryFrom<u16> for ColorDepth {
    type Error = BmpError;

    fn try_from(bits: u16) -> Result<Self, BmpError> {
        Self::from_bits(bits)
    }
}

/// Color table length for a raw bit count: `4 * 2^bits` for 1, 4 and 8 bpp.
///
/// Any other value, including unsupported sub-byte depths, has no table.
pub const fn color_table_len(bits: u16) -> usize {
    match bits {
        1 | 4 | 8 => 4 << bits,
        _ => 0,
    }
}

/// `ceil(bits * width / 32) * 4`, or `None` on overflow.
pub fn row_size(width: u32, bits: u16) -> Option<usize> {
    let bits_per_row = u64::from(width).checked_mul(u64::from(bits))?;
    let size = bits_per_row.div_ceil(32).checked_mul(4)?;
    usize::try_from(size).ok()
}

// ── Compression ─────────────────────────────────────────────────────

/// Compression type code. Only [`Compression::Rgb`] raster data is handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    /// BI_RGB, uncompressed.
    Rgb,
    /// BI_RLE8.
    Rle8,
    /// BI_RLE4.
    Rle4,
    Other(u32),
}

impl Compression {
    pub const fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            other => Self::Other(other),
        }
    }

    pub const fn code(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Other(code) => code,
        }
    }
}

// ── File header ─────────────────────────────────────────────────────

/// The 14-byte BITMAPFILEHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileHeader {
    pub signature: LeField<2>,
    /// Total byte length of the encoded file.
    pub file_size: LeField<4>,
    /// Always zero when written; preserved verbatim when parsed.
    pub reserved: LeField<4>,
    /// Absolute offset of the raster data.
    pub data_offset: LeField<4>,
}

impl FileHeader {
    pub fn file_size(&self) -> u32 {
        self.file_size.as_u32()
    }

    pub fn data_offset(&self) -> u32 {
        self.data_offset.as_u32()
    }

    pub fn has_signature(&self) -> bool {
        *self.signature.bytes() == SIGNATURE
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        Self {
            signature: LeField::from_bytes(SIGNATURE),
            file_size: LeField::from_u32(HEADER_LEN as u32),
            reserved: LeField::default(),
            data_offset: LeField::from_u32(HEADER_LEN as u32),
        }
    }
}

// ── Info header ─────────────────────────────────────────────────────

/// The 40-byte BITMAPINFOHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InfoHeader {
    pub info_header_size: LeField<4>,
    pub width: LeField<4>,
    pub height: LeField<4>,
    pub planes: LeField<2>,
    pub color_depth: LeField<2>,
    pub compression: LeField<4>,
    /// Byte length of the raster data region.
    pub compressed_size: LeField<4>,
    pub x_pixels_per_m: LeField<4>,
    pub y_pixels_per_m: LeField<4>,
    pub used_colors: LeField<4>,
    pub important_colors: LeField<4>,
}

impl InfoHeader {
    /// Signed width as stored.
    pub fn width(&self) -> i32 {
        self.width.as_i32()
    }

    /// Signed height as stored. Negative means top-down row order.
    pub fn height(&self) -> i32 {
        self.height.as_i32()
    }

    pub fn planes(&self) -> u16 {
        self.planes.as_u16()
    }

    /// Raw bits-per-pixel value, which may be outside [`ColorDepth`].
    pub fn bits_per_pixel(&self) -> u16 {
        self.color_depth.as_u16()
    }

    pub fn color_depth(&self) -> Result<ColorDepth, BmpError> {
        ColorDepth::from_bits(self.bits_per_pixel())
    }

    pub fn compression(&self) -> Compression {
        Compression::from_code(self.compression.as_u32())
    }

    pub fn compressed_size(&self) -> u32 {
        self.compressed_size.as_u32()
    }

    /// Expected raster length for uncompressed data: `row_size * |height|`.
    pub fn expected_raster_len(&self) -> Option<usize> {
        let row = row_size(self.width().unsigned_abs(), self.bits_per_pixel())?;
        row.checked_mul(self.height().unsigned_abs() as usize)
    }

    /// Length of the raster region this header describes.
    ///
    /// `compressed_size`, except that BI_RGB files may leave it as 0, in
    /// which case the length is `row_size * |height|`.
    pub fn raster_len(&self) -> Option<usize> {
        match self.compressed_size() {
            0 if self.compression() == Compression::Rgb => self.expected_raster_len(),
            declared => Some(declared as usize),
        }
    }
}

impl Default for InfoHeader {
    fn default() -> Self {
        Self {
            info_header_size: LeField::from_u32(INFO_HEADER_LEN as u32),
            width: LeField::default(),
            height: LeField::default(),
            planes: LeField::from_bytes(1u16.to_le_bytes()),
            color_depth: LeField::from_bytes(24u16.to_le_bytes()),
            compression: LeField::from_u32(Compression::Rgb.code()),
            compressed_size: LeField::default(),
            x_pixels_per_m: LeField::from_u32(255),
            y_pixels_per_m: LeField::from_u32(255),
            used_colors: LeField::default(),
            important_colors: LeField::default(),
        }
    }
}
