//! Member decompression algorithms.
//!
//! This module implements the three codecs found in the archives: the
//! PowerPacker 2.0 bitstream, the BoPa flag-byte LZ scheme and the `0x7F`
//! escape RLE used by some image members.
//!
//! ## Decoders
//!
//! | Decoder | Method | Direction | Dictionary |
//! |---------|--------|-----------|------------|
//! | [`Pp20Decoder`] | PP20 | back to front, bit granular | output written so far |
//! | [`BopaDecoder`] | BoPa | front to back, byte granular | output written so far (max 4095 back) |
//! | [`RleDecoder`] | RLE | front to back | none |
//!
//! None of the formats describes its own output size in a portable way, so
//! every decoder is handed the exact unpacked size up front: either as the
//! length of the output slice ([`decode_into`](Pp20Decoder::decode_into)) or as
//! an explicit size ([`decompress`](Pp20Decoder::decompress)).
//!
//! ## Example
//!
//! ```rust
//! use bopa_pp20::{decode_bopa, Status};
//!
//! // Two literals followed by a 7 byte copy from 2 bytes back.
//! let packed = [0xC0, b'A', b'B', 0x04, 0x02];
//! let mut out = [0u8; 9];
//! assert_eq!(decode_bopa(&packed, &mut out).unwrap(), Status::Complete);
//! assert_eq!(&out, b"ABABABABA");
//! ```
//!
//! ## Tolerance
//!
//! The historical decoders never validated their input. The defaults here
//! keep their output byte for byte on anything they could decode without
//! crashing, and turn every out-of-bounds access into a defined
//! [`DecompressError`] or [`Status::TruncatedInput`]. Set
//! [`DecodeOptions::strict`] to reject streams that only decode by
//! tolerance.

mod bit_reader;
pub mod bopa;
pub mod pp20;
pub mod rle;


pub use bit_reader::BitReader;
pub use bopa::BopaDecoder;
pub use pp20::Pp20Decoder;
pub use rle::RleDecoder;

use std::fmt;
use std::str::FromStr;

/// The specific inconsistency behind a [`DecompressError::CorruptStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    /// PP20 offset-width selector indexes past the compressed input.
    OffsetSelector { selector: u32, input_len: usize },
    /// BoPa copy with a zero-length source window.
    ZeroOffset { position: usize },
    /// Back-reference outside the bytes decoded so far.
    BackReference { offset: u32, position: usize },
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffsetSelector {
                selector,
                input_len,
            } => write!(
                f,
                "offset width selector {} outside {} byte input",
                selector, input_len
            ),
            Self::ZeroOffset { position } => {
                write!(f, "zero copy offset at output position {}", position)
            }
            Self::BackReference { offset, position } => write!(
                f,
                "back reference offset {} invalid at output position {}",
                offset, position
            ),
        }
    }
}

/// Decompression errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecompressError {
    /// The stream contains a token that cannot be decoded.
    CorruptStream(Corruption),
    /// Input ran out before the output was filled (strict mode only).
    TruncatedInput { filled: usize },
    /// The input is too short to hold the mandatory framing.
    BufferTooSmall { needed: usize, have: usize },
    /// The stream expands past the end of the output buffer.
    OutputOverflow { capacity: usize },
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorruptStream(c) => write!(f, "Corrupt compressed stream: {}", c),
            Self::TruncatedInput { filled } => {
                write!(f, "Compressed input ended after {} output bytes", filled)
            }
            Self::BufferTooSmall { needed, have } => {
                write!(f, "Input too small: need {} bytes, have {}", needed, have)
            }
            Self::OutputOverflow { capacity } => {
                write!(f, "Decompressed data exceeds {} byte output", capacity)
            }
        }
    }
}

impl std::error::Error for DecompressError {}

impl From<Corruption> for DecompressError {
    fn from(c: Corruption) -> Self {
        Self::CorruptStream(c)
    }
}

pub type Result<T> = std::result::Result<T, DecompressError>;

/// How a successful decode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Status {
    /// Every output byte was produced by the stream.
    Complete,
    /// The input ran out first; output from `filled` onward is zero.
    TruncatedInput { filled: usize },
}

impl Status {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Decoder configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject streams that only decode thanks to the historical tolerance:
    /// truncated input becomes an error and PP20 back-references past the
    /// end of the output are reported as corrupt instead of yielding zeros.
    pub strict: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Apply the truncation policy to a finished decode.
    pub(crate) fn finish(&self, status: Status) -> Result<Status> {
        match status {
            Status::TruncatedInput { filled } if self.strict => {
                Err(DecompressError::TruncatedInput { filled })
            }
            other => Ok(other),
        }
    }
}

/// Compression methods. Chosen by the caller, never detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// PowerPacker 2.0 backward bitstream
    Pp20,
    /// BoPa flag-byte LZ
    Bopa,
    /// `0x7F` escape run-length encoding
    Rle,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pp20 => "pp20",
            Self::Bopa => "bopa",
            Self::Rle => "rle",
        }
    }

    /// Decode `input` into `output` with this method.
    pub fn decode_into(
        &self,
        input: &[u8],
        output: &mut [u8],
        options: DecodeOptions,
    ) -> Result<Status> {
        match self {
            Self::Pp20 => Pp20Decoder::with_options(options).decode_into(input, output),
            Self::Bopa => BopaDecoder::with_options(options).decode_into(input, output),
            Self::Rle => RleDecoder::with_options(options).decode_into(input, output),
        }
    }

    /// Decode `input` into a freshly allocated buffer of `unpacked_size` bytes.
    pub fn decompress(
        &self,
        input: &[u8],
        unpacked_size: usize,
        options: DecodeOptions,
    ) -> Result<Vec<u8>> {
        let mut output = vec![0u8; unpacked_size];
        // Tolerant truncation leaves the zero padding in place.
        let _ = self.decode_into(input, &mut output, options)?;
        Ok(output)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pp20" | "powerpacker" => Ok(Self::Pp20),
            "bopa" => Ok(Self::Bopa),
            "rle" => Ok(Self::Rle),
            other => Err(format!("unknown compression method: {}", other)),
        }
    }
}

/// Decode a PP20 stream into `output` with default options.
pub fn decode_pp20(input: &[u8], output: &mut [u8]) -> Result<Status> {
    Pp20Decoder::new().decode_into(input, output)
}

/// Decode a BoPa stream into `output` with default options.
pub fn decode_bopa(input: &[u8], output: &mut [u8]) -> Result<Status> {
    BopaDecoder::new().decode_into(input, output)
}

/// Decode an RLE stream into `output` with default options.
pub fn decode_rle(input: &[u8], output: &mut [u8]) -> Result<Status> {
    RleDecoder::new().decode_into(input, output)
}
