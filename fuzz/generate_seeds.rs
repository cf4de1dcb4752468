#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16) -> Vec<u8> {
    let table = if bpp <= 8 { 4usize << bpp } else { 0 };
    let row = (width as usize * bpp as usize).div_ceil(32) * 4;
    let raster = row * height.unsigned_abs() as usize;
    let offset = 54 + table;
    let mut out = vec![0u8; offset + raster];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&((offset + raster) as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&(offset as u32).to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    out[34..38].copy_from_slice(&(raster as u32).to_le_bytes()); // compressed size
    out
}

fn main() {
    use std::fs;
    for target in ["fuzz_parse", "fuzz_roundtrip"] {
        let dir = format!("fuzz/corpus/{target}");
        fs::create_dir_all(&dir).unwrap();

        for bpp in [1u16, 4, 8, 16, 24] {
            fs::write(format!("{dir}/bmp_3x2_{bpp}.bmp"), bmp(3, 2, bpp)).unwrap();
        }
        fs::write(format!("{dir}/bmp_topdown.bmp"), bmp(2, -2, 24)).unwrap();

        // Truncated/malformed seeds for edge coverage
        let good = bmp(4, 4, 8);
        fs::write(format!("{dir}/truncated_header.bmp"), &good[..30]).unwrap();
        fs::write(format!("{dir}/truncated_palette.bmp"), &good[..200]).unwrap();
        fs::write(format!("{dir}/not_bmp.bin"), b"\xff\xd8\xff\xe0JFIF").unwrap();
    }
}
