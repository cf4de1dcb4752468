use alloc::string::String;
use alloc::vec::Vec;

use crate::error::BmpError;
use crate::header::{FileHeader, HEADER_LEN, InfoHeader, color_table_len};

/// A decoded or freshly built bitmap.
///
/// Immutable once constructed: produced by [`crate::BuildRequest`] or
/// [`crate::ParseRequest`], consumed by [`crate::serialize`].
#[derive(Clone, Debug)]
pub struct Image {
    file_header: FileHeader,
    info_header: InfoHeader,
    color_table: Vec<u8>,
    raster_data: Vec<u8>,
    name: Option<String>,
}

impl Image {
    pub(crate) fn from_parts(
        file_header: FileHeader,
        info_header: InfoHeader,
        color_table: Vec<u8>,
        raster_data: Vec<u8>,
    ) -> Self {
        Self {
            file_header,
            info_header,
            color_table,
            raster_data,
            name: None,
        }
    }

    /// Attach a display name. Not part of the binary format.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// Raw palette bytes (BGRX quads). Empty for depths above 8.
    pub fn color_table(&self) -> &[u8] {
        &self.color_table
    }

    /// Row-major, bottom-up raster bytes including row padding.
    pub fn raster_data(&self) -> &[u8] {
        &self.raster_data
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.info_header.width().unsigned_abs()
    }

    pub fn height(&self) -> u32 {
        self.info_header.height().unsigned_abs()
    }

    /// Total encoded length: headers, color table, and raster data.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.color_table.len() + self.raster_data.len()
    }

    /// Check that declared sizes agree with the owned buffers.
    ///
    /// Verifies `file_size`, `data_offset`, `compressed_size` and the
    /// color table length implied by the color depth. A BI_RGB
    /// `compressed_size` of 0 stands for `row_size * |height|`.
    pub fn validate(&self) -> Result<(), BmpError> {
        let expected_table = color_table_len(self.info_header.bits_per_pixel());
        check("color table length", expected_table as u64, self.color_table.len())?;
        let raster_len = self.info_header.raster_len().map_or(u64::MAX, |n| n as u64);
        check("compressed_size", raster_len, self.raster_data.len())?;
        check(
            "data_offset",
            u64::from(self.file_header.data_offset()),
            HEADER_LEN + self.color_table.len(),
        )?;
        check(
            "file_size",
            u64::from(self.file_header.file_size()),
            self.encoded_len(),
        )?;
        Ok(())
    }
}

/// Images compare by content; the display name is provenance only.
impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.file_header == other.file_header
            && self.info_header == other.info_header
            && self.color_table == other.color_table
            && self.raster_data == other.raster_data
    }
}

impl Eq for Image {}

fn check(field: &'static str, declared: u64, actual: usize) -> Result<(), BmpError> {
    if declared != actual as u64 {
        return Err(BmpError::SizeMismatch {
            field,
            declared,
            actual: actual as u64,
        });
    }
    Ok(())
}
