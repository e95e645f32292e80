#![no_main]
use bmpfx::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Keep allocations bounded; headers can declare huge images
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data).with_limits(&limits).decode() else {
        return;
    };

    let Ok(reencoded) = decoded.encode() else {
        return;
    };
    let Ok(decoded2) = decode(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    match (&decoded, &decoded2) {
        (Image::Rgb24(a), Image::Rgb24(b)) => {
            assert_eq!(a.pixels().buf(), b.pixels().buf(), "roundtrip pixel mismatch");
        }
        (Image::Gray8(a), Image::Gray8(b)) => {
            assert_eq!(a.data(), b.data(), "roundtrip data mismatch");
            // 8-bit files are written back verbatim
            assert_eq!(reencoded, b.encode());
        }
        _ => panic!("roundtrip changed depth"),
    }
    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
});
