#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding may fail on invalid input - that's OK
    // We're looking for panics/crashes, not errors
    if let Ok(decoded) = lzpak::decode(data) {
        assert_eq!(Some(decoded.len()), lzpak::max_decoded_size(data).ok());
    }

    // Same input through a caller buffer that may be too small
    let mut target = [0u8; 256];
    let _ = lzpak::decode_into(data, &mut target);
});
