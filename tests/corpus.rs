//! Hand-assembled BMP buffers: known-good files, malformed input, limits.

use enough::{StopReason, Unstoppable};
use zenbmp::*;

struct Fields {
    width: i32,
    height: i32,
    bpp: u16,
    compression: u32,
    info_size: u32,
    planes: u16,
}

impl Default for Fields {
    fn default() -> Self {
        Self {
            width: 2,
            height: 2,
            bpp: 24,
            compression: 0,
            info_size: 40,
            planes: 1,
        }
    }
}

/// Assemble a BMP with consistent size fields and a noise-filled palette/raster.
fn assemble(f: &Fields) -> Vec<u8> {
    let table_len = color_table_len(f.bpp);
    let raster_len = row_size(f.width.unsigned_abs(), f.bpp).unwrap() * f.height.unsigned_abs() as usize;
    let data_offset = 54 + table_len;
    let file_size = data_offset + raster_len;

    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(file_size as u32).to_le_bytes());
    bmp[10..14].copy_from_slice(&(data_offset as u32).to_le_bytes());
    bmp[14..18].copy_from_slice(&f.info_size.to_le_bytes());
    bmp[18..22].copy_from_slice(&f.width.to_le_bytes());
    bmp[22..26].copy_from_slice(&f.height.to_le_bytes());
    bmp[26..28].copy_from_slice(&f.planes.to_le_bytes());
    bmp[28..30].copy_from_slice(&f.bpp.to_le_bytes());
    bmp[30..34].copy_from_slice(&f.compression.to_le_bytes());
    bmp[34..38].copy_from_slice(&(raster_len as u32).to_le_bytes());
    bmp[38..42].copy_from_slice(&2835u32.to_le_bytes());
    bmp[42..46].copy_from_slice(&2835u32.to_le_bytes());

    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..table_len + raster_len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        bmp.push(state as u8);
    }
    bmp
}

// ── Known-good files ─────────────────────────────────────────────────

#[test]
fn reserialize_is_byte_identical() {
    for bpp in [1u16, 4, 8, 16, 24] {
        let bmp = assemble(&Fields {
            width: 7,
            height: 3,
            bpp,
            ..Default::default()
        });
        let img = ParseRequest::new(&bmp)
            .with_permissiveness(Permissiveness::Strict)
            .parse(Unstoppable)
            .unwrap();
        assert_eq!(serialize(&img), bmp, "{bpp} bpp");
        assert_eq!(serialize_checked(&img).unwrap(), bmp, "{bpp} bpp");
    }
}

#[test]
fn palette_and_raster_regions() {
    let bmp = assemble(&Fields {
        width: 3,
        height: 2,
        bpp: 8,
        ..Default::default()
    });
    let img = parse(&bmp).unwrap();
    assert_eq!(img.color_table(), &bmp[54..54 + 1024]);
    assert_eq!(img.raster_data(), &bmp[54 + 1024..]);
    assert_eq!(img.raster_data().len(), 8);
}

#[test]
fn opaque_fields_survive() {
    let mut bmp = assemble(&Fields::default());
    bmp[6..10].copy_from_slice(&[1, 2, 3, 4]); // reserved
    bmp[46..50].copy_from_slice(&7u32.to_le_bytes()); // used colors
    bmp[50..54].copy_from_slice(&9u32.to_le_bytes()); // important colors
    let img = parse(&bmp).unwrap();
    assert_eq!(img.file_header().reserved.bytes(), &[1, 2, 3, 4]);
    assert_eq!(img.info_header().x_pixels_per_m.as_u32(), 2835);
    assert_eq!(img.info_header().used_colors.as_u32(), 7);
    assert_eq!(img.info_header().important_colors.as_u32(), 9);
    assert_eq!(serialize(&img), bmp);
}

#[test]
fn top_down_height() {
    let bmp = assemble(&Fields {
        height: -3,
        ..Default::default()
    });
    let img = ParseRequest::new(&bmp)
        .with_permissiveness(Permissiveness::Strict)
        .parse(Unstoppable)
        .unwrap();
    assert_eq!(img.info_header().height(), -3);
    assert_eq!(img.height(), 3);
    assert_eq!(serialize(&img), bmp);
}

#[test]
fn trailing_bytes_ignored_unless_strict() {
    let mut bmp = assemble(&Fields::default());
    let clean_len = bmp.len();
    bmp.extend_from_slice(&[0xAA; 5]);

    let img = parse(&bmp).unwrap();
    assert_eq!(serialize(&img).len(), clean_len);

    match ParseRequest::new(&bmp)
        .with_permissiveness(Permissiveness::Strict)
        .parse(Unstoppable)
    {
        Err(BmpError::SizeMismatch {
            field: "file_size", ..
        }) => {}
        other => panic!("expected SizeMismatch, got {other:?}"),
    }
}

// ── Malformed input ──────────────────────────────────────────────────

#[test]
fn jpeg_is_not_a_bitmap() {
    let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    assert!(matches!(parse(&jpeg), Err(BmpError::NotABitmap)));

    let mut bmp = assemble(&Fields::default());
    bmp[1] = b'A';
    assert!(matches!(parse(&bmp), Err(BmpError::NotABitmap)));
}

#[test]
fn truncated_palette() {
    let bmp = assemble(&Fields {
        bpp: 8,
        ..Default::default()
    });
    match parse(&bmp[..100]) {
        Err(BmpError::TruncatedBuffer {
            needed: 1078,
            actual: 100,
        }) => {}
        other => panic!("expected TruncatedBuffer, got {other:?}"),
    }
}

#[test]
fn truncated_raster() {
    let bmp = assemble(&Fields::default());
    let cut = bmp.len() - 1;
    match parse(&bmp[..cut]) {
        Err(BmpError::TruncatedBuffer { needed, actual }) => {
            assert_eq!(needed, bmp.len());
            assert_eq!(actual, cut);
        }
        other => panic!("expected TruncatedBuffer, got {other:?}"),
    }
}

#[test]
fn every_prefix_fails_cleanly() {
    let bmp = assemble(&Fields {
        width: 3,
        height: 2,
        bpp: 4,
        ..Default::default()
    });
    for len in 0..bmp.len() {
        assert!(parse(&bmp[..len]).is_err(), "prefix {len} parsed");
    }
    assert!(parse(&bmp).is_ok());
}

#[test]
fn unsupported_depth() {
    let bmp = assemble(&Fields {
        bpp: 32,
        ..Default::default()
    });
    assert!(matches!(
        parse(&bmp),
        Err(BmpError::UnsupportedColorDepth(32))
    ));

    let img = ParseRequest::new(&bmp)
        .with_permissiveness(Permissiveness::Permissive)
        .parse(Unstoppable)
        .unwrap();
    assert!(img.color_table().is_empty());
    assert_eq!(img.raster_data().len(), 16);
    assert_eq!(serialize(&img), bmp);
}

#[test]
fn permissive_unknown_depths_have_no_table() {
    for bpp in [0u16, 2] {
        let mut bmp = assemble(&Fields::default());
        bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
        assert!(
            matches!(parse(&bmp), Err(BmpError::UnsupportedColorDepth(b)) if b == bpp),
            "{bpp} bpp"
        );

        let img = ParseRequest::new(&bmp)
            .with_permissiveness(Permissiveness::Permissive)
            .parse(Unstoppable)
            .unwrap();
        assert!(img.color_table().is_empty(), "{bpp} bpp");
        assert_eq!(img.raster_data(), &bmp[54..], "{bpp} bpp");
        assert_eq!(img.raster_data().len(), 16);
        assert_eq!(serialize(&img), bmp, "{bpp} bpp");
        img.validate().unwrap();
    }
}

#[test]
fn rle_is_recognized_not_decoded() {
    let bmp = assemble(&Fields {
        bpp: 8,
        compression: 1,
        ..Default::default()
    });
    assert!(matches!(
        parse(&bmp),
        Err(BmpError::UnsupportedCompression(1))
    ));

    let img = ParseRequest::new(&bmp)
        .with_permissiveness(Permissiveness::Permissive)
        .parse(Unstoppable)
        .unwrap();
    assert_eq!(img.info_header().compression(), Compression::Rle8);
    assert_eq!(serialize(&img), bmp);
}

#[test]
fn other_info_header_sizes() {
    let bmp = assemble(&Fields {
        info_size: 108,
        ..Default::default()
    });
    assert!(matches!(
        parse(&bmp),
        Err(BmpError::UnsupportedInfoHeader(108))
    ));
    assert!(
        ParseRequest::new(&bmp)
            .with_permissiveness(Permissiveness::Permissive)
            .parse(Unstoppable)
            .is_ok()
    );
}

#[test]
fn strict_checks_planes_and_sizes() {
    let bmp = assemble(&Fields {
        planes: 3,
        ..Default::default()
    });
    assert!(parse(&bmp).is_ok());
    assert!(matches!(
        ParseRequest::new(&bmp)
            .with_permissiveness(Permissiveness::Strict)
            .parse(Unstoppable),
        Err(BmpError::InvalidHeader(_))
    ));

    let mut bmp = assemble(&Fields::default());
    bmp[10..14].copy_from_slice(&60u32.to_le_bytes());
    assert!(matches!(
        ParseRequest::new(&bmp)
            .with_permissiveness(Permissiveness::Strict)
            .parse(Unstoppable),
        Err(BmpError::SizeMismatch {
            field: "data_offset",
            declared: 60,
            actual: 54,
        })
    ));
}

#[test]
fn zero_compressed_size_uses_row_layout() {
    let mut bmp = assemble(&Fields::default());
    bmp[34..38].copy_from_slice(&0u32.to_le_bytes());

    for level in [Permissiveness::Standard, Permissiveness::Permissive] {
        let img = ParseRequest::new(&bmp)
            .with_permissiveness(level)
            .parse(Unstoppable)
            .unwrap();
        assert_eq!(img.raster_data(), &bmp[54..], "{level:?}");
        assert_eq!(img.info_header().compressed_size(), 0);
        img.validate().unwrap();
        assert_eq!(serialize_checked(&img).unwrap(), bmp, "{level:?}");
    }

    match ParseRequest::new(&bmp)
        .with_permissiveness(Permissiveness::Strict)
        .parse(Unstoppable)
    {
        Err(BmpError::SizeMismatch {
            field: "compressed_size",
            declared: 0,
            actual: 16,
        }) => {}
        other => panic!("expected SizeMismatch, got {other:?}"),
    }
}

#[test]
fn short_compressed_size_with_exact_file_size() {
    let mut bmp = assemble(&Fields::default());
    bmp[34..38].copy_from_slice(&8u32.to_le_bytes());
    match parse(&bmp) {
        Err(BmpError::SizeMismatch {
            field: "compressed_size",
            declared: 8,
            actual: 16,
        }) => {}
        other => panic!("expected SizeMismatch, got {other:?}"),
    }

    // Permissive keeps exactly the declared region
    let img = ParseRequest::new(&bmp)
        .with_permissiveness(Permissiveness::Permissive)
        .parse(Unstoppable)
        .unwrap();
    assert_eq!(img.raster_data(), &bmp[54..62]);
}

#[test]
fn compressed_size_beyond_buffer() {
    let mut bmp = assemble(&Fields::default());
    bmp[34..38].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(matches!(
        parse(&bmp),
        Err(BmpError::TruncatedBuffer { .. })
    ));
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_max_width() {
    let bmp = assemble(&Fields::default());
    let limits = Limits {
        max_width: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        ParseRequest::new(&bmp).with_limits(&limits).parse(Unstoppable),
        Err(BmpError::LimitExceeded(_))
    ));
}

#[test]
fn limits_max_pixels_on_build() {
    let limits = Limits {
        max_pixels: Some(8),
        ..Default::default()
    };
    assert!(
        BuildRequest::new(2, 4)
            .with_limits(&limits)
            .build(Unstoppable)
            .is_ok()
    );
    assert!(matches!(
        BuildRequest::new(3, 3).with_limits(&limits).build(Unstoppable),
        Err(BmpError::LimitExceeded(_))
    ));
}

#[test]
fn limits_max_memory() {
    let bmp = assemble(&Fields {
        bpp: 8,
        ..Default::default()
    });
    let limits = Limits {
        max_memory_bytes: Some(1024),
        ..Default::default()
    };
    // 1024-byte palette + 8 bytes of raster
    assert!(
        ParseRequest::new(&bmp)
            .with_limits(&limits)
            .parse(Unstoppable)
            .is_err()
    );
    assert!(
        BuildRequest::new(2, 2)
            .with_depth(ColorDepth::Bpp8)
            .with_limits(&limits)
            .build(Unstoppable)
            .is_err()
    );
}

// ── Cancellation ─────────────────────────────────────────────────────

struct AlwaysCancelled;

impl Stop for AlwaysCancelled {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

#[test]
fn cancelled_stop_aborts_build_and_parse() {
    assert!(matches!(
        BuildRequest::new(2, 2).build(AlwaysCancelled),
        Err(BmpError::Cancelled(StopReason::Cancelled))
    ));

    let bmp = assemble(&Fields::default());
    assert!(matches!(
        ParseRequest::new(&bmp).parse(AlwaysCancelled),
        Err(BmpError::Cancelled(StopReason::Cancelled))
    ));
    assert!(ParseRequest::new(&bmp).parse(Unstoppable).is_ok());
}
