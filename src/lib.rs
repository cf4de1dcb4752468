//! # zenbmp
//!
//! Byte-exact Windows Bitmap (BMP) codec: parse a buffer into headers,
//! color table, and raster data, build solid-color images, and serialize
//! back to bytes.
//!
//! ## Fidelity
//!
//! Header fields are stored as their exact little-endian bytes
//! ([`LeField`]), not as converted integers. Serializing an unmodified
//! parsed image reproduces the source buffer byte-for-byte.
//!
//! ## Supported
//!
//! - 14-byte file header + 40-byte BITMAPINFOHEADER
//! - Color depths 1, 4, 8 (palette kept as raw BGRX quads), 16, 24
//! - Uncompressed (BI_RGB) raster data, rows padded to 4 bytes
//!
//! ## Non-Goals
//!
//! - RLE4/RLE8 decoding (the compression code is recognized, not decoded)
//! - Expanding palette indices into pixels
//! - Pixel manipulation (crop, resize, blend)
//! - File I/O; bring your own bytes
//!
//! ## Usage
//!
//! ```
//! use zenbmp::{ParseRequest, Unstoppable};
//!
//! let img = zenbmp::new_image((4, 4), 24, "#FF0000")?;
//! let bytes = zenbmp::serialize(&img);
//!
//! let parsed = ParseRequest::new(&bytes).parse(Unstoppable)?;
//! assert_eq!(parsed, img);
//! assert_eq!(zenbmp::serialize(&parsed), bytes);
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod logging;

mod build;
mod color;
mod error;
mod header;
mod image;
mod le;
mod limits;
mod parse;
mod serialize;

// Re-exports
pub use build::{BuildRequest, new_image};
pub use color::FillColor;
pub use enough::{Stop, Unstoppable};
pub use error::BmpError;
pub use header::{
    ColorDepth, Compression, FILE_HEADER_LEN, FileHeader, HEADER_LEN, INFO_HEADER_LEN, InfoHeader,
    LeField, SIGNATURE, color_table_len, row_size,
};
pub use image::Image;
pub use le::{decode_le, encode_le};
pub use limits::Limits;
pub use parse::{ParseRequest, Permissiveness, parse, parse_named};
pub use rgb::RGB8;
pub use serialize::{serialize, serialize_checked};
