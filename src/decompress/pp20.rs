//! PowerPacker 2.0 decompression.
//!
//! A PP20 member is laid out as
//!
//! ```text
//! +------------------+----------------------+---------------------+------+
//! | efficiency table | packed bitstream ... | unpacked size (BE24)| skip |
//! |     4 bytes      |                      |       3 bytes       |  1   |
//! +------------------+----------------------+---------------------+------+
//! ```
//!
//! The bitstream is read backwards starting just before the footer (see
//! [`BitReader`]), and the output is produced backwards too, from its last
//! byte to its first. The efficiency table holds the offset width in bits
//! for each of the four match length categories.

use super::{
    bit_reader::BitReader, Corruption, DecodeOptions, DecompressError, Result, Status,
};
use log::{debug, trace};

/// Size of the trailing footer (unpacked size + skip count).
pub const FOOTER_SIZE: usize = 4;

/// Number of entries in the offset width table.
pub const EFFICIENCY_SIZE: usize = 4;

/// Offset width for long matches whose selector bit is clear.
const SHORT_OFFSET_BITS: u32 = 7;

/// PP20 decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pp20Decoder {
    options: DecodeOptions,
}

impl Pp20Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decompress into a new buffer of exactly `unpacked_size` bytes.
    pub fn decompress(&self, input: &[u8], unpacked_size: usize) -> Result<Vec<u8>> {
        let mut output = vec![0u8; unpacked_size];
        let _ = self.decode_into(input, &mut output)?;
        Ok(output)
    }

    /// Fill `output` from the PP20 stream in `input`.
    ///
    /// `input` must include the efficiency table and the footer; the
    /// `"PP20"` file magic, if any, must already be stripped.
    pub fn decode_into(&self, input: &[u8], output: &mut [u8]) -> Result<Status> {
        if output.is_empty() {
            return Ok(Status::Complete);
        }
        let skip = match input.last() {
            Some(&b) => b,
            None => {
                return Err(DecompressError::BufferTooSmall {
                    needed: 1,
                    have: 0,
                })
            }
        };

        let mut reader = BitReader::new(input, input.len().saturating_sub(FOOTER_SIZE));
        reader.skip_bits(skip as u32);

        debug!(
            "pp20: {} packed bytes -> {} bytes, skipping {} bits",
            input.len(),
            output.len(),
            skip
        );

        let mut bytes_left = output.len();
        while bytes_left > 0 {
            if !reader.read_bit() {
                let run = reader.read_run_length(1, 2, 3, limit(bytes_left)) as usize;
                let run = run.min(bytes_left);
                trace!("pp20: {} literals ending at {}", run, bytes_left);
                for _ in 0..run {
                    bytes_left -= 1;
                    output[bytes_left] = reader.read_bits(8) as u8;
                }
                if bytes_left == 0 {
                    break;
                }
                // A literal run is always followed by a match, without a flag bit.
            }
            self.copy_match(&mut reader, input, output, &mut bytes_left)?;
        }

        Ok(Status::Complete)
    }

    /// Decode one match token and copy it backwards into `output`.
    fn copy_match(
        &self,
        reader: &mut BitReader<'_>,
        input: &[u8],
        output: &mut [u8],
        bytes_left: &mut usize,
    ) -> Result<()> {
        let mut length = reader.read_bits(2) + 1;
        let offset_bits = match input.get(length as usize - 1) {
            Some(&bits) => bits as u32,
            None => {
                return Err(Corruption::OffsetSelector {
                    selector: length,
                    input_len: input.len(),
                }
                .into())
            }
        };

        let offset = if length == EFFICIENCY_SIZE as u32 {
            let width = if reader.read_bit() {
                offset_bits
            } else {
                SHORT_OFFSET_BITS
            };
            let offset = reader.read_bits(width);
            length = reader.read_run_length(length, 3, 7, limit(*bytes_left));
            offset
        } else {
            reader.read_bits(offset_bits)
        };

        let length = (length as usize).min(*bytes_left);
        trace!(
            "pp20: match of {} from +{} ending at {}",
            length + 1,
            offset,
            bytes_left
        );

        // One byte more than the decoded length.
        for _ in 0..=length {
            let source = bytes_left
                .checked_add(offset as usize)
                .and_then(|pos| output.get(pos).copied());
            let byte = match source {
                Some(b) => b,
                None if self.options.strict => {
                    return Err(Corruption::BackReference {
                        offset,
                        position: *bytes_left - 1,
                    }
                    .into())
                }
                None => 0,
            };
            *bytes_left -= 1;
            output[*bytes_left] = byte;
            if *bytes_left == 0 {
                break;
            }
        }
        Ok(())
    }
}

/// Length limit for the run extension loops.
#[inline]
fn limit(bytes_left: usize) -> u32 {
    u32::try_from(bytes_left).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_output() {
        let decoder = Pp20Decoder::new();
        assert_eq!(decoder.decode_into(&[], &mut []), Ok(Status::Complete));
    }

    #[test]
    fn test_empty_input() {
        let decoder = Pp20Decoder::new();
        let mut out = [0u8; 4];
        assert_eq!(
            decoder.decode_into(&[], &mut out),
            Err(DecompressError::BufferTooSmall {
                needed: 1,
                have: 0
            })
        );
    }

    #[test]
    fn test_single_literal() {
        // Read order: flag 0, then 0x41 MSB first. The first eight of those
        // nine bits fill data[5] from its low bit up, the last one data[4].
        let input = [4, 4, 4, 4, 0b0000_0001, 0b0000_0100, 0, 0, 1, 0];
        let mut out = [0u8; 1];

        assert_eq!(
            Pp20Decoder::new().decode_into(&input, &mut out),
            Ok(Status::Complete)
        );
        assert_eq!(out, [0x41]);
    }

    #[test]
    fn test_selector_outside_short_input() {
        // 255 priming bits, then a match flag and category 4 on a 1 byte input.
        let input = [0xFF];
        let mut out = [0u8; 2];

        assert_eq!(
            Pp20Decoder::new().decode_into(&input, &mut out),
            Err(DecompressError::CorruptStream(Corruption::OffsetSelector {
                selector: 4,
                input_len: 1
            }))
        );
    }
}
