//! Whole-member helpers: parse the framing, then decode.
//!
//! The caller still chooses the method; nothing here sniffs the data to
//! guess between PP20 and BoPa.

use crate::decompress::{BopaDecoder, DecodeOptions, Pp20Decoder};
use crate::error::Result;
use crate::parsing::{BopaHeaderParser, Pp20HeaderParser};
use log::{debug, warn};

/// Unpack a PP20 member (with or without the `PP20` magic) using the size
/// stored in its footer.
pub fn unpack_pp20_file(data: &[u8], options: DecodeOptions) -> Result<Vec<u8>> {
    let (header, payload) = Pp20HeaderParser::split(data)?;
    debug!(
        "pp20 member: {} -> {} bytes, efficiency {:?}",
        payload.len(),
        header.unpacked_size,
        header.efficiency
    );
    if header.unpacked_size == 0 {
        warn!("pp20 member declares an empty output");
    }
    let output = Pp20Decoder::with_options(options)
        .decompress(payload, header.unpacked_size as usize)?;
    Ok(output)
}

/// Unpack a PP20 member whose unpacked size comes from outside the member.
///
/// Members embedded in image containers carry a footer, but the container's
/// own dimensions are what the game trusts.
pub fn unpack_pp20_sized(
    data: &[u8],
    unpacked_size: usize,
    options: DecodeOptions,
) -> Result<Vec<u8>> {
    let (header, payload) = Pp20HeaderParser::split(data)?;
    if header.unpacked_size as usize != unpacked_size {
        warn!(
            "pp20 footer says {} bytes, caller expects {}",
            header.unpacked_size, unpacked_size
        );
    }
    let output = Pp20Decoder::with_options(options).decompress(payload, unpacked_size)?;
    Ok(output)
}

/// Unpack a BoPa member framed by its 18 byte header.
pub fn unpack_bopa_file(data: &[u8], options: DecodeOptions) -> Result<Vec<u8>> {
    let (header, packed) = BopaHeaderParser::split(data)?;
    debug!(
        "bopa member: {} -> {} bytes",
        header.packed_size, header.unpacked_size
    );
    let output = BopaDecoder::with_options(options)
        .decompress(packed, header.unpacked_size as usize)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompress::DecompressError;
    use crate::error::UnpackError;

    fn bopa_member(unpacked: u32, packed: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; 10];
        data.extend_from_slice(&unpacked.to_be_bytes());
        data.extend_from_slice(&(packed.len() as u32).to_be_bytes());
        data.extend_from_slice(packed);
        data
    }

    #[test]
    fn test_unpack_bopa_file() {
        let data = bopa_member(9, &[0xC0, b'A', b'B', 0x04, 0x02]);
        let out = unpack_bopa_file(&data, DecodeOptions::default()).unwrap();
        assert_eq!(&out, b"ABABABABA");
    }

    #[test]
    fn test_unpack_bopa_file_strict_truncated() {
        let data = bopa_member(4, &[0x80, b'Z']);

        let out = unpack_bopa_file(&data, DecodeOptions::default()).unwrap();
        assert_eq!(&out, b"Z\0\0\0");

        let err = unpack_bopa_file(&data, DecodeOptions::new().strict(true)).unwrap_err();
        assert!(matches!(
            err,
            UnpackError::Decompress(DecompressError::TruncatedInput { filled: 1 })
        ));
    }

    #[test]
    fn test_unpack_pp20_file() {
        // Single literal 'A': flag 0, then 0x41.
        let data = [
            b'P', b'P', b'2', b'0', 4, 4, 4, 4, 0b0000_0001, 0b0000_0100, 0, 0, 1, 0,
        ];
        let out = unpack_pp20_file(&data, DecodeOptions::default()).unwrap();
        assert_eq!(out, [0x41]);
    }

    #[test]
    fn test_unpack_pp20_sized_overrides_footer() {
        let data = [4, 4, 4, 4, 0b0000_0001, 0b0000_0100, 0, 0, 9, 0];
        let out = unpack_pp20_sized(&data, 1, DecodeOptions::default()).unwrap();
        assert_eq!(out, [0x41]);
    }

    #[test]
    fn test_unpack_pp20_too_short() {
        let err = unpack_pp20_file(b"PP20", DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, UnpackError::BufferTooSmall { .. }));
    }
}
