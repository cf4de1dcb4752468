use crate::error::BmpError;

/// Caps applied before a bitmap's color table and raster are allocated.
///
/// Every field defaults to `None`, meaning unlimited.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    /// Largest accepted `|width|`.
    pub max_width: Option<u64>,
    /// Largest accepted `|height|`. Top-down images are measured the same way.
    pub max_height: Option<u64>,
    /// Largest accepted `|width| * |height|`.
    pub max_pixels: Option<u64>,
    /// Largest accepted color table plus raster data, in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check the absolute dimensions a header declares.
    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), BmpError> {
        within("width", u64::from(width), self.max_width)?;
        within("height", u64::from(height), self.max_height)?;
        // u32 * u32 always fits in u64
        within("pixel count", u64::from(width) * u64::from(height), self.max_pixels)
    }

    /// Check the bytes a bitmap body needs: its color table plus its raster.
    pub(crate) fn check_memory(&self, table_len: usize, raster_len: usize) -> Result<(), BmpError> {
        let Some(max) = self.max_memory_bytes else {
            return Ok(());
        };
        let total = (table_len as u64).checked_add(raster_len as u64).ok_or_else(|| {
            BmpError::LimitExceeded(alloc::format!(
                "color table ({table_len} bytes) plus raster ({raster_len} bytes) overflows"
            ))
        })?;
        if total > max {
            return Err(BmpError::LimitExceeded(alloc::format!(
                "color table ({table_len} bytes) plus raster ({raster_len} bytes) exceeds memory limit {max}"
            )));
        }
        Ok(())
    }
}

fn within(what: &str, value: u64, limit: Option<u64>) -> Result<(), BmpError> {
    match limit {
        Some(max) if value > max => Err(BmpError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
