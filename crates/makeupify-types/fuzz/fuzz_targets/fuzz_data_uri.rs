#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary strings must parse to Ok or Err, never panic
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(img) = makeupify_types::EncodedImage::parse(s)
    {
        let _ = img.mime_type();
        let _ = img.decode_bytes();
        let _ = serde_json::to_string(&img);
    }
});
