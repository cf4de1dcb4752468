//! Image builder: solid-color bitmaps of a given size and depth.
//!
//! Every scanline is padded to a 4-byte boundary. Indexed depths (1, 4, 8)
//! get a full `2^depth`-entry palette whose entry 0 is the fill color, and
//! every pixel references index 0.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use rgb::RGB8;

use crate::color::FillColor;
use crate::error::BmpError;
use crate::header::{ColorDepth, FileHeader, HEADER_LEN, InfoHeader, LeField};
use crate::image::Image;
use crate::limits::Limits;

/// Builder for a new solid-color [`Image`].
///
/// ```
/// use zenbmp::{BuildRequest, ColorDepth, Unstoppable};
///
/// let img = BuildRequest::new(10, 2)
///     .with_depth(ColorDepth::Bpp24)
///     .with_fill("#FF0000")
///     .build(Unstoppable)?;
/// assert_eq!(img.raster_data().len(), 32 * 2);
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BuildRequest<'a> {
    width: u32,
    height: u32,
    depth: ColorDepth,
    fill: FillColor,
    limits: Option<&'a Limits>,
}

impl<'a> BuildRequest<'a> {
    /// A black 24-bit image of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: ColorDepth::Bpp24,
            fill: FillColor::Raw([0, 0, 0]),
            limits: None,
        }
    }

    pub fn with_depth(mut self, depth: ColorDepth) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<FillColor>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn build(&self, stop: impl Stop) -> Result<Image, BmpError> {
        build_image(
            self.width,
            self.height,
            self.depth,
            &self.fill,
            self.limits,
            &stop,
        )
    }
}

/// Build a solid-color image from `(width, height)`, a raw bit depth, and a fill.
///
/// `color_depth` must be one of 1, 4, 8, 16, 24.
pub fn new_image(
    dimensions: (u32, u32),
    color_depth: u16,
    fill: impl Into<FillColor>,
) -> Result<Image, BmpError> {
    let (width, height) = dimensions;
    BuildRequest::new(width, height)
        .with_depth(ColorDepth::from_bits(color_depth)?)
        .with_fill(fill)
        .build(enough::Unstoppable)
}

fn build_image(
    width: u32,
    height: u32,
    depth: ColorDepth,
    fill: &FillColor,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpError> {
    let color = fill.resolve()?;
    if let Some(limits) = limits {
        limits.check_dimensions(width, height)?;
    }

    let too_large = || BmpError::DimensionsTooLarge { width, height };
    let signed_width = i32::try_from(width).map_err(|_| too_large())?;
    let signed_height = i32::try_from(height).map_err(|_| too_large())?;

    let row_size = depth.row_size(width).ok_or_else(too_large)?;
    let raster_len = row_size
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;
    let table_len = depth.color_table_len();
    let data_offset = HEADER_LEN + table_len;
    let file_size = data_offset.checked_add(raster_len).ok_or_else(too_large)?;
    let file_size = u32::try_from(file_size).map_err(|_| too_large())?;

    if let Some(limits) = limits {
        limits.check_memory(table_len, raster_len)?;
    }

    stop.check()?;

    let color_table = palette(depth, color);
    let row_bytes = scanline(depth, color, width as usize, row_size);

    let mut raster_data = Vec::with_capacity(raster_len);
    for row in 0..height as usize {
        if row % 16 == 0 {
            stop.check()?;
        }
        raster_data.extend_from_slice(&row_bytes);
    }

    let file_header = FileHeader {
        file_size: LeField::from_u32(file_size),
        data_offset: LeField::from_u32(data_offset as u32),
        ..FileHeader::default()
    };
    let info_header = InfoHeader {
        width: LeField::from_bytes(signed_width.to_le_bytes()),
        height: LeField::from_bytes(signed_height.to_le_bytes()),
        color_depth: LeField::from_bytes(depth.bits().to_le_bytes()),
        compressed_size: LeField::from_u32(raster_len as u32),
        ..InfoHeader::default()
    };

    trace!(
        "built {width}x{height} @ {} bpp: row {row_size} bytes, file {file_size} bytes",
        depth.bits()
    );

    Ok(Image::from_parts(
        file_header,
        info_header,
        color_table,
        raster_data,
    ))
}

/// Palette with the fill color at index 0; empty for direct-color depths.
fn palette(depth: ColorDepth, color: RGB8) -> Vec<u8> {
    let mut table = vec![0u8; depth.color_table_len()];
    if let Some(first) = table.get_mut(..4) {
        first.copy_from_slice(&[color.b, color.g, color.r, 0]);
    }
    table
}

/// One padded scanline of `width` fill pixels.
fn scanline(depth: ColorDepth, color: RGB8, width: usize, row_size: usize) -> Vec<u8> {
    let mut row = Vec::with_capacity(row_size);
    match depth {
        ColorDepth::Bpp24 => {
            for _ in 0..width {
                row.extend_from_slice(&[color.b, color.g, color.r]);
            }
        }
        ColorDepth::Bpp16 => {
            let px = rgb555(color).to_le_bytes();
            for _ in 0..width {
                row.extend_from_slice(&px);
            }
        }
        // every pixel is palette index 0
        ColorDepth::Bpp1 | ColorDepth::Bpp4 | ColorDepth::Bpp8 => {}
    }
    row.resize(row_size, 0);
    row
}

/// Pack into X1R5G5B5, the BI_RGB layout for 16 bpp.
fn rgb555(c: RGB8) -> u16 {
    (u16::from(c.r >> 3) << 10) | (u16::from(c.g >> 3) << 5) | u16::from(c.b >> 3)
}
