#![no_main]

use libfuzzer_sys::fuzz_target;
use lzpak::{Compressor, EncodeConfig, MatchStrategy};

fuzz_target!(|data: &[u8]| {
    // Limit data size to avoid slowdowns in the brute-force finder
    let data = if data.len() > 16 * 1024 { &data[..16 * 1024] } else { data };

    let encoded = lzpak::encode(data).expect("encode into bound must succeed");
    assert!(encoded.len() <= lzpak::max_encoded_size(data.len()));

    let decoded = lzpak::decode(&encoded).expect("own output must decode");
    assert_eq!(decoded, data, "Round-trip mismatch");

    let brute = Compressor::new(EncodeConfig {
        strategy: MatchStrategy::BruteForce,
        ..Default::default()
    })
    .encode(data)
    .expect("encode into bound must succeed");
    assert_eq!(brute, encoded, "Strategies disagree");
});
