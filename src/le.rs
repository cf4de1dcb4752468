//! Little-endian integer <-> fixed-width byte conversion.
//!
//! Values that need more bytes than the requested width are rejected
//! with [`BmpError::ValueTooWide`] rather than truncated.

use alloc::vec::Vec;

use crate::error::BmpError;

/// Encode `n` as exactly `width` little-endian bytes, zero-padded on the right.
///
/// ```
/// assert_eq!(zenbmp::encode_le(54, 4).unwrap(), [54, 0, 0, 0]);
/// assert!(zenbmp::encode_le(256, 1).is_err());
/// ```
pub fn encode_le(n: u64, width: usize) -> Result<Vec<u8>, BmpError> {
    if !fits(n, width) {
        return Err(BmpError::ValueTooWide { value: n, width });
    }
    let mut out = Vec::with_capacity(width);
    let bytes = n.to_le_bytes();
    let used = width.min(bytes.len());
    out.extend_from_slice(&bytes[..used]);
    out.resize(width, 0);
    Ok(out)
}

/// Decode little-endian bytes of any length as an unsigned integer.
///
/// Only the low 8 bytes contribute; anything beyond is treated as padding.
pub fn decode_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Fill a fixed array, the const-width counterpart of [`encode_le`].
pub(crate) fn encode_array<const N: usize>(n: u64) -> Result<[u8; N], BmpError> {
    if !fits(n, N) {
        return Err(BmpError::ValueTooWide { value: n, width: N });
    }
    let mut out = [0u8; N];
    let bytes = n.to_le_bytes();
    let used = N.min(bytes.len());
    out[..used].copy_from_slice(&bytes[..used]);
    Ok(out)
}

fn fits(n: u64, width: usize) -> bool {
    width >= 8 || n >> (width * 8) == 0
}
