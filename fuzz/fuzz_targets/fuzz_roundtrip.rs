#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can parse it, re-serializing and parsing again must be lossless
    let Ok(img) = ParseRequest::new(data)
        .with_permissiveness(Permissiveness::Permissive)
        .parse(enough::Unstoppable)
    else {
        return;
    };

    let bytes = serialize(&img);
    assert_eq!(&bytes[..], &data[..bytes.len()], "serialized bytes diverge from input");

    let Ok(again) = ParseRequest::new(&bytes)
        .with_permissiveness(Permissiveness::Permissive)
        .parse(enough::Unstoppable)
    else {
        panic!("re-serialized data failed to parse");
    };
    assert_eq!(img, again, "roundtrip mismatch");
});
