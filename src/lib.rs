//! Decompressors for Amiga-era game archive members.
//!
//! Two LZ-family schemes cover almost every packed member:
//!
//! - **PP20** (PowerPacker 2.0): a bitstream read from the end of the input
//!   backwards, producing the output from its last byte to its first.
//! - **BoPa**: a forward flag-byte LZ with 12 bit offsets.
//!
//! A small `0x7F` escape RLE used by some image members is included as well.
//!
//! The caller always chooses the method and supplies the unpacked size;
//! nothing here guesses either from the data.
//!
//! ## Features
//! - Core library depends only on the `log` facade
//! - `parallel` - Decode independent members on the rayon thread pool

mod crc16;

pub mod batch;
pub mod decompress;
pub mod error;
pub mod formats;
pub mod parsing;

pub use crc16::crc16;
pub use error::UnpackError;

// Re-export decompression types
pub use decompress::{
    decode_bopa, decode_pp20, decode_rle, BitReader, BopaDecoder, Corruption, DecodeOptions,
    DecompressError, Method, Pp20Decoder, RleDecoder, Status,
};
