//! BMP parser: fixed-offset header extraction and region slicing.
//!
//! Header fields are copied verbatim into [`LeField`]s, the color table is
//! sized from the color depth (`4 * 2^depth` bytes when depth <= 8), and the
//! raster region spans `compressed_size` bytes immediately after it. Every
//! slice is bounds-checked first; short input yields
//! [`BmpError::TruncatedBuffer`].

use alloc::string::String;

use enough::Stop;

use crate::error::BmpError;
use crate::header::{
    ColorDepth, Compression, FileHeader, HEADER_LEN, INFO_HEADER_LEN, InfoHeader, LeField,
    SIGNATURE, color_table_len,
};
use crate::image::Image;
use crate::limits::Limits;

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the parser validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Additionally require `file_size` to equal the buffer length,
    /// `data_offset` to point right after the color table, `planes == 1`,
    /// and `compressed_size` to equal `row_size * height`.
    Strict,

    /// Default. Require a 40-byte info header, a supported color depth,
    /// BI_RGB compression, and in-bounds regions.
    #[default]
    Standard,

    /// Accept any info header size, depth, and compression code, treating
    /// the raster region as opaque bytes. Regions must still be in bounds.
    Permissive,
}

// ── Request ─────────────────────────────────────────────────────────

/// Parse a BMP byte buffer into an [`Image`].
///
/// ```
/// use zenbmp::{ParseRequest, Permissiveness, Unstoppable};
///
/// let bytes = zenbmp::serialize(&zenbmp::new_image((2, 2), 24, "#00FF00")?);
/// let img = ParseRequest::new(&bytes)
///     .with_permissiveness(Permissiveness::Strict)
///     .with_path_name("assets/green.bmp")
///     .parse(Unstoppable)?;
/// assert_eq!(img.name(), Some("green.bmp"));
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ParseRequest<'a> {
    data: &'a [u8],
    permissiveness: Permissiveness,
    limits: Option<&'a Limits>,
    name: Option<String>,
}

impl<'a> ParseRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            permissiveness: Permissiveness::default(),
            limits: None,
            name: None,
        }
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Attach a display name to the parsed image.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the final component of a `/` or `\` separated path as the name.
    pub fn with_path_name(self, path: &str) -> Self {
        let base = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
        self.with_name(base)
    }

    pub fn parse(&self, stop: impl Stop) -> Result<Image, BmpError> {
        let image = parse_image(self.data, self.permissiveness, self.limits, &stop)?;
        Ok(match &self.name {
            Some(name) => image.with_name(name.clone()),
            None => image,
        })
    }
}

/// Parse with default settings.
pub fn parse(data: &[u8]) -> Result<Image, BmpError> {
    ParseRequest::new(data).parse(enough::Unstoppable)
}

/// Parse with default settings, naming the image after the base name of `path`.
pub fn parse_named(data: &[u8], path: &str) -> Result<Image, BmpError> {
    ParseRequest::new(data)
        .with_path_name(path)
        .parse(enough::Unstoppable)
}

// ── Implementation ──────────────────────────────────────────────────

fn parse_image(
    data: &[u8],
    permissiveness: Permissiveness,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpError> {
    if data.get(..2) != Some(&SIGNATURE[..]) {
        return Err(BmpError::NotABitmap);
    }
    let header: &[u8; HEADER_LEN] = data.first_chunk().ok_or(BmpError::TruncatedBuffer {
        needed: HEADER_LEN,
        actual: data.len(),
    })?;

    let file_header = read_file_header(header);
    let info_header = read_info_header(header);

    let is_strict = permissiveness == Permissiveness::Strict;
    let is_permissive = permissiveness == Permissiveness::Permissive;

    let ihsize = info_header.info_header_size.as_u32();
    if ihsize != INFO_HEADER_LEN as u32 {
        if !is_permissive {
            return Err(BmpError::UnsupportedInfoHeader(ihsize));
        }
        warn!("info header size {ihsize} read with BITMAPINFOHEADER layout");
    }

    let bits = info_header.bits_per_pixel();
    if let Err(e) = ColorDepth::from_bits(bits) {
        if !is_permissive {
            return Err(e);
        }
        warn!("unsupported color depth {bits} passed through");
    }

    let compression = info_header.compression();
    if compression != Compression::Rgb {
        if !is_permissive {
            return Err(BmpError::UnsupportedCompression(compression.code()));
        }
        warn!("compressed raster ({compression:?}) kept as opaque bytes");
    }

    let width = info_header.width().unsigned_abs();
    let height = info_header.height().unsigned_abs();
    trace!("BMP {width}x{height}, {bits} bpp, {compression:?}");

    if let Some(limits) = limits {
        limits.check_dimensions(width, height)?;
    }

    let table_len = color_table_len(bits);
    // Strict reads compressed_size as written so check_strict can reject a 0.
    let raster_len = if is_strict {
        info_header.compressed_size() as usize
    } else {
        info_header
            .raster_len()
            .ok_or(BmpError::DimensionsTooLarge { width, height })?
    };
    let table_end = HEADER_LEN + table_len;
    let raster_end = table_end
        .checked_add(raster_len)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;

    if let Some(limits) = limits {
        limits.check_memory(table_len, raster_len)?;
    }

    let color_table = data.get(HEADER_LEN..table_end).ok_or(BmpError::TruncatedBuffer {
        needed: table_end,
        actual: data.len(),
    })?;
    let raster_data = data.get(table_end..raster_end).ok_or(BmpError::TruncatedBuffer {
        needed: raster_end,
        actual: data.len(),
    })?;

    if is_strict {
        check_strict(&file_header, &info_header, data.len(), table_end)?;
    } else if !is_permissive
        && file_header.file_size() as usize == data.len()
        && raster_end != data.len()
    {
        // file_size accounts for bytes that compressed_size leaves out
        return Err(BmpError::SizeMismatch {
            field: "compressed_size",
            declared: raster_len as u64,
            actual: (data.len() - table_end) as u64,
        });
    }
    if raster_end < data.len() {
        trace!("ignoring {} trailing bytes", data.len() - raster_end);
    }

    stop.check()?;

    Ok(Image::from_parts(
        file_header,
        info_header,
        color_table.to_vec(),
        raster_data.to_vec(),
    ))
}

fn check_strict(
    file_header: &FileHeader,
    info_header: &InfoHeader,
    data_len: usize,
    table_end: usize,
) -> Result<(), BmpError> {
    let mismatch = |field: &'static str, declared: u64, actual: usize| BmpError::SizeMismatch {
        field,
        declared,
        actual: actual as u64,
    };

    let file_size = file_header.file_size();
    if file_size as usize != data_len {
        return Err(mismatch("file_size", u64::from(file_size), data_len));
    }
    let data_offset = file_header.data_offset();
    if data_offset as usize != table_end {
        return Err(mismatch("data_offset", u64::from(data_offset), table_end));
    }
    if info_header.planes() != 1 {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "planes must be 1, got {}",
            info_header.planes()
        )));
    }
    let expected = info_header
        .expected_raster_len()
        .ok_or(BmpError::DimensionsTooLarge {
            width: info_header.width().unsigned_abs(),
            height: info_header.height().unsigned_abs(),
        })?;
    let compressed_size = info_header.compressed_size();
    if compressed_size as usize != expected {
        return Err(mismatch(
            "compressed_size",
            u64::from(compressed_size),
            expected,
        ));
    }
    Ok(())
}

fn read_file_header(h: &[u8; HEADER_LEN]) -> FileHeader {
    FileHeader {
        signature: field(h, 0),
        file_size: field(h, 2),
        reserved: field(h, 6),
        data_offset: field(h, 10),
    }
}

fn read_info_header(h: &[u8; HEADER_LEN]) -> InfoHeader {
    InfoHeader {
        info_header_size: field(h, 14),
        width: field(h, 18),
        height: field(h, 22),
        planes: field(h, 26),
        color_depth: field(h, 28),
        compression: field(h, 30),
        compressed_size: field(h, 34),
        x_pixels_per_m: field(h, 38),
        y_pixels_per_m: field(h, 42),
        used_colors: field(h, 46),
        important_colors: field(h, 50),
    }
}

/// Copy `N` bytes at `offset` out of the fixed-size header.
fn field<const N: usize>(h: &[u8; HEADER_LEN], offset: usize) -> LeField<N> {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&h[offset..offset + N]);
    LeField::from_bytes(bytes)
}
