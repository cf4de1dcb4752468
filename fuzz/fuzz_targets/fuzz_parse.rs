#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{ParseRequest, Permissiveness};

fuzz_target!(|data: &[u8]| {
    // Every permissiveness level must return, never panic
    for level in [
        Permissiveness::Strict,
        Permissiveness::Standard,
        Permissiveness::Permissive,
    ] {
        let _ = ParseRequest::new(data)
            .with_permissiveness(level)
            .parse(enough::Unstoppable);
    }
});
