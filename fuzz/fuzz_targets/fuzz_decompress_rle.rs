#![no_main]
use bopa_pp20::RleDecoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let unpacked_size = u16::from_le_bytes([data[0], data[1]]) as usize;
    let _ = RleDecoder::new().decompress(&data[2..], unpacked_size);
});
