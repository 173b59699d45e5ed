//! BoPa member header.
//!
//! ```text
//! 0x00  10 bytes  not interpreted
//! 0x0A  u32 BE    unpacked size
//! 0x0E  u32 BE    packed size
//! 0x12  ...       packed stream
//! ```

use crate::error::{Result, UnpackError};
use log::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BopaHeader {
    pub prefix: [u8; 10],
    pub unpacked_size: u32,
    pub packed_size: u32,
}

pub struct BopaHeaderParser;

impl BopaHeaderParser {
    pub const HEADER_SIZE: usize = 18;

    pub fn parse(buffer: &[u8]) -> Result<BopaHeader> {
        if buffer.len() < Self::HEADER_SIZE {
            return Err(UnpackError::BufferTooSmall {
                needed: Self::HEADER_SIZE,
                have: buffer.len(),
            });
        }

        let mut prefix = [0u8; 10];
        prefix.copy_from_slice(&buffer[..10]);
        let unpacked_size = u32::from_be_bytes([buffer[10], buffer[11], buffer[12], buffer[13]]);
        let packed_size = u32::from_be_bytes([buffer[14], buffer[15], buffer[16], buffer[17]]);

        Ok(BopaHeader {
            prefix,
            unpacked_size,
            packed_size,
        })
    }

    /// Parse the header and return it with the packed stream it describes.
    pub fn split(buffer: &[u8]) -> Result<(BopaHeader, &[u8])> {
        let header = Self::parse(buffer)?;
        let end = Self::HEADER_SIZE + header.packed_size as usize;
        if buffer.len() < end {
            return Err(UnpackError::BufferTooSmall {
                needed: end,
                have: buffer.len(),
            });
        }
        if buffer.len() > end {
            warn!(
                "bopa: ignoring {} bytes after the packed stream",
                buffer.len() - end
            );
        }
        Ok((header, &buffer[Self::HEADER_SIZE..end]))
    }
}
