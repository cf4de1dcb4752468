use alloc::string::String;
use enough::StopReason;

/// Errors from BMP parsing, building, and serialization.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("not a bitmap: missing \"BM\" signature")]
    NotABitmap,

    #[error("truncated buffer: need {needed} bytes, got {actual}")]
    TruncatedBuffer { needed: usize, actual: usize },

    #[error("unsupported color depth: {0} bits per pixel")]
    UnsupportedColorDepth(u16),

    #[error("unsupported compression type: {0}")]
    UnsupportedCompression(u32),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported info header size: {0} bytes")]
    UnsupportedInfoHeader(u32),

    #[error("{field} mismatch: declared {declared}, actual {actual}")]
    SizeMismatch {
        field: &'static str,
        declared: u64,
        actual: u64,
    },

    #[error("value {value} does not fit in {width} bytes")]
    ValueTooWide { value: u64, width: usize },

    #[error("invalid fill color: {0}")]
    InvalidColor(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
