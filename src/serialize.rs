//! BMP serializer: headers, color table, and raster data in file order.

use alloc::vec::Vec;

use crate::error::BmpError;
use crate::image::Image;

/// Concatenate every header field, the color table, and the raster data.
///
/// Fields are written exactly as stored, so an unmodified parsed image
/// reproduces its source bytes. Declared sizes are not checked; use
/// [`serialize_checked`] for that.
pub fn serialize(image: &Image) -> Vec<u8> {
    let fh = image.file_header();
    let ih = image.info_header();
    let mut out = Vec::with_capacity(image.encoded_len());

    // File header (14 bytes)
    out.extend_from_slice(fh.signature.bytes());
    out.extend_from_slice(fh.file_size.bytes());
    out.extend_from_slice(fh.reserved.bytes());
    out.extend_from_slice(fh.data_offset.bytes());

    // Info header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(ih.info_header_size.bytes());
    out.extend_from_slice(ih.width.bytes());
    out.extend_from_slice(ih.height.bytes());
    out.extend_from_slice(ih.planes.bytes());
    out.extend_from_slice(ih.color_depth.bytes());
    out.extend_from_slice(ih.compression.bytes());
    out.extend_from_slice(ih.compressed_size.bytes());
    out.extend_from_slice(ih.x_pixels_per_m.bytes());
    out.extend_from_slice(ih.y_pixels_per_m.bytes());
    out.extend_from_slice(ih.used_colors.bytes());
    out.extend_from_slice(ih.important_colors.bytes());

    out.extend_from_slice(image.color_table());
    out.extend_from_slice(image.raster_data());
    out
}

/// [`Image::validate`], then [`serialize`].
pub fn serialize_checked(image: &Image) -> Result<Vec<u8>, BmpError> {
    image.validate()?;
    Ok(serialize(image))
}
