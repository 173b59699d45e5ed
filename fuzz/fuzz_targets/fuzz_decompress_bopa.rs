#![no_main]
use bopa_pp20::{BopaDecoder, DecodeOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let unpacked_size = u16::from_le_bytes([data[0], data[1]]) as usize;
    let packed = &data[2..];

    let tolerant = BopaDecoder::new().decompress(packed, unpacked_size);
    let strict = BopaDecoder::with_options(DecodeOptions::new().strict(true))
        .decompress(packed, unpacked_size);

    // Strict mode may only turn a tolerant success into an error
    if let Ok(bytes) = strict {
        assert_eq!(tolerant, Ok(bytes));
    }
});
