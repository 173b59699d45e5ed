#![no_main]
use bopa_pp20::{DecodeOptions, Pp20Decoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // First 2 bytes pick the unpacked size, the rest is the member
    let unpacked_size = u16::from_le_bytes([data[0], data[1]]) as usize;
    let packed = &data[2..];

    let _ = Pp20Decoder::new().decompress(packed, unpacked_size);
    let strict = Pp20Decoder::with_options(DecodeOptions::new().strict(true));
    let _ = strict.decompress(packed, unpacked_size);
});
