//! Error types for member framing and decompression.
//!
//! This module provides the [`UnpackError`] type returned by the
//! whole-member helpers in [`crate::formats`] and the header parsers in
//! [`crate::parsing`]. The decoders themselves return the narrower
//! [`DecompressError`], which converts into [`UnpackError`] with `?`.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Framing | [`InvalidSignature`], [`BufferTooSmall`] | Member header is missing or cut short |
//! | Decompression | [`Decompress`] | The packed stream itself is bad |
//! | I/O | [`Io`] | Reading the member failed |
//!
//! ## Example
//!
//! ```rust,ignore
//! use bopa_pp20::{formats, DecodeOptions, UnpackError};
//!
//! match formats::unpack_pp20_file(&data, DecodeOptions::default()) {
//!     Ok(bytes) => println!("{} bytes", bytes.len()),
//!     Err(UnpackError::InvalidSignature) => eprintln!("Not a PP20 member"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! [`InvalidSignature`]: UnpackError::InvalidSignature
//! [`BufferTooSmall`]: UnpackError::BufferTooSmall
//! [`Decompress`]: UnpackError::Decompress
//! [`Io`]: UnpackError::Io

use crate::decompress::DecompressError;
use std::fmt;
use std::io;

/// Error type for unpacking archive members.
#[derive(Debug)]
pub enum UnpackError {
    /// The member starts with a magic this crate cannot decode.
    ///
    /// Currently only the encrypted PowerPacker variant (`PX20`).
    InvalidSignature,

    /// The member is shorter than its header says.
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        have: usize,
    },

    /// The packed stream failed to decode.
    Decompress(DecompressError),

    /// An I/O error occurred.
    Io(io::Error),
}

impl fmt::Display for UnpackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSignature => write!(f, "Invalid or unsupported member signature"),
            Self::BufferTooSmall { needed, have } => {
                write!(f, "Buffer too small: need {} bytes, have {}", needed, have)
            }
            Self::Decompress(e) => write!(f, "Decompression failed: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for UnpackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decompress(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for UnpackError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DecompressError> for UnpackError {
    fn from(e: DecompressError) -> Self {
        match e {
            DecompressError::BufferTooSmall { needed, have } => {
                Self::BufferTooSmall { needed, have }
            }
            other => Self::Decompress(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnpackError>;
