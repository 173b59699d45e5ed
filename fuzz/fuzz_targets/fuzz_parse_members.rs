#![no_main]
use bopa_pp20::formats::{unpack_bopa_file, unpack_pp20_file};
use bopa_pp20::parsing::{BopaHeaderParser, Pp20HeaderParser};
use bopa_pp20::DecodeOptions;
use libfuzzer_sys::fuzz_target;

/// Skip members whose header asks for more than this.
const MAX_UNPACKED: u32 = 1 << 20;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = Pp20HeaderParser::parse(data) {
        if header.unpacked_size <= MAX_UNPACKED {
            let _ = unpack_pp20_file(data, DecodeOptions::default());
        }
    }

    if let Ok(header) = BopaHeaderParser::parse(data) {
        if header.unpacked_size <= MAX_UNPACKED {
            let _ = unpack_bopa_file(data, DecodeOptions::default());
        }
    }
});
