#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Auto-detect decode must never panic
    let _ = bmpfx::decode(data);

    // Each depth explicitly: the 8-bit path skips the signature check
    let _ = bmpfx::decode_8bit(data);
    let _ = bmpfx::decode_24bit(data);
});
