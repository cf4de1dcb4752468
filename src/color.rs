//! Fill colors for [`crate::BuildRequest`].

use alloc::string::{String, ToString};

use rgb::RGB8;

use crate::error::BmpError;

/// A fill color given either as `"#RRGGBB"` text or as raw `[r, g, b]` bytes.
///
/// Both forms resolve to the same [`RGB8`], so
/// `FillColor::from("#FF0000")` and `FillColor::from([255, 0, 0])` build
/// identical images.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FillColor {
    Hex(String),
    Raw([u8; 3]),
}

impl FillColor {
    /// Resolve to canonical RGB components.
    pub fn resolve(&self) -> Result<RGB8, BmpError> {
        match self {
            Self::Hex(s) => parse_hex(s),
            Self::Raw([r, g, b]) => Ok(RGB8::new(*r, *g, *b)),
        }
    }
}

impl From<&str> for FillColor {
    fn from(s: &str) -> Self {
        Self::Hex(s.to_string())
    }
}

impl From<String> for FillColor {
    fn from(s: String) -> Self {
        Self::Hex(s)
    }
}

impl From<[u8; 3]> for FillColor {
    fn from(bytes: [u8; 3]) -> Self {
        Self::Raw(bytes)
    }
}

impl From<RGB8> for FillColor {
    fn from(c: RGB8) -> Self {
        Self::Raw([c.r, c.g, c.b])
    }
}

/// Parse `#RRGGBB` (the leading `#` is optional, digits are case-insensitive).
fn parse_hex(s: &str) -> Result<RGB8, BmpError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    // from_str_radix alone would accept a leading '+'
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(BmpError::InvalidColor(alloc::format!(
            "expected #RRGGBB, got {s:?}"
        )));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| BmpError::InvalidColor(alloc::format!("bad hex digits in {s:?}")))
    };
    Ok(RGB8::new(channel(0)?, channel(2)?, channel(4)?))
}
