//! PP20 member framing.
//!
//! A stand-alone PowerPacker file starts with the `PP20` magic; members
//! embedded in game archives usually start directly at the efficiency
//! table. Both end in a 4 byte footer: the unpacked size as a 24 bit
//! big-endian value and the number of filler bits to skip before the first
//! token.

use crate::decompress::pp20::{EFFICIENCY_SIZE, FOOTER_SIZE};
use crate::error::{Result, UnpackError};

/// PowerPacker 2.0 magic.
pub const PP20_SIGNATURE: [u8; 4] = *b"PP20";

/// Encrypted PowerPacker magic (not supported).
pub const PX20_SIGNATURE: [u8; 4] = *b"PX20";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pp20Header {
    pub has_magic: bool,
    /// Offset width in bits for each match length category
    pub efficiency: [u8; 4],
    pub unpacked_size: u32,
    pub skip_bits: u8,
}

pub struct Pp20HeaderParser;

impl Pp20HeaderParser {
    /// Smallest decodable payload: efficiency table plus footer.
    pub const MIN_PAYLOAD: usize = EFFICIENCY_SIZE + FOOTER_SIZE;

    pub fn parse(buffer: &[u8]) -> Result<Pp20Header> {
        Self::split(buffer).map(|(header, _)| header)
    }

    /// Parse the framing and return the decoder input (table through footer).
    pub fn split(buffer: &[u8]) -> Result<(Pp20Header, &[u8])> {
        if buffer.starts_with(&PX20_SIGNATURE) {
            return Err(UnpackError::InvalidSignature);
        }

        let has_magic = buffer.starts_with(&PP20_SIGNATURE);
        let payload = if has_magic {
            &buffer[PP20_SIGNATURE.len()..]
        } else {
            buffer
        };

        if payload.len() < Self::MIN_PAYLOAD {
            return Err(UnpackError::BufferTooSmall {
                needed: buffer.len() - payload.len() + Self::MIN_PAYLOAD,
                have: buffer.len(),
            });
        }

        let efficiency = [payload[0], payload[1], payload[2], payload[3]];
        let footer = &payload[payload.len() - FOOTER_SIZE..];
        let unpacked_size = u32::from_be_bytes([0, footer[0], footer[1], footer[2]]);
        let skip_bits = footer[3];

        Ok((
            Pp20Header {
                has_magic,
                efficiency,
                unpacked_size,
                skip_bits,
            },
            payload,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_magic() {
        let buffer = [
            b'P', b'P', b'2', b'0', // magic
            9, 10, 11, 12, // efficiency
            0xAA, 0xBB, // bitstream
            0x01, 0x02, 0x03, // unpacked size
            5,    // skip bits
        ];
        let (header, payload) = Pp20HeaderParser::split(&buffer).unwrap();

        assert!(header.has_magic);
        assert_eq!(header.efficiency, [9, 10, 11, 12]);
        assert_eq!(header.unpacked_size, 0x010203);
        assert_eq!(header.skip_bits, 5);
        assert_eq!(payload, &buffer[4..]);
    }

    #[test]
    fn test_parse_embedded_member() {
        let buffer = [9, 9, 9, 9, 0, 0, 0x40, 0];
        let header = Pp20HeaderParser::parse(&buffer).unwrap();

        assert!(!header.has_magic);
        assert_eq!(header.unpacked_size, 0x40);
    }

    #[test]
    fn test_encrypted_rejected() {
        let buffer = *b"PX20\x09\x09\x09\x09\x00\x00\x10\x00";
        assert!(matches!(
            Pp20HeaderParser::parse(&buffer),
            Err(UnpackError::InvalidSignature)
        ));
    }

    #[test]
    fn test_buffer_too_small() {
        let buffer = *b"PP20\x09\x09";
        assert!(matches!(
            Pp20HeaderParser::parse(&buffer),
            Err(UnpackError::BufferTooSmall { needed: 12, have: 6 })
        ));
    }
}
