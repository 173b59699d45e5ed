//! `0x7F` escape run-length decoding used by image members.
//!
//! `0x7F count value` expands to `count` copies of `value`; every other
//! byte is copied as is. A literal `0x7F` has to be written as a run of one.

use super::{DecodeOptions, DecompressError, Result, Status};
use log::debug;

/// Byte introducing a run.
pub const RUN_MARKER: u8 = 0x7F;

/// RLE decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct RleDecoder {
    options: DecodeOptions,
}

impl RleDecoder {
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

    /// Fill `output` from the run-length stream in `input`.
    ///
    /// Expanding past the end of `output` is an error; stopping short of it
    /// leaves the rest zeroed and reports [`Status::TruncatedInput`].
    pub fn decode_into(&self, input: &[u8], output: &mut [u8]) -> Result<Status> {
        if output.is_empty() {
            return Ok(Status::Complete);
        }

        let capacity = output.len();
        let mut out_pos = 0usize;
        let mut pos = 0usize;

        while pos < input.len() {
            let byte = input[pos];
            pos += 1;

            if byte == RUN_MARKER {
                let (count, value) = match (input.get(pos), input.get(pos + 1)) {
                    (Some(&c), Some(&v)) => (c as usize, v),
                    _ => {
                        pos = input.len();
                        break;
                    }
                };
                pos += 2;
                let end = out_pos + count;
                if end > capacity {
                    return Err(DecompressError::OutputOverflow { capacity });
                }
                output[out_pos..end].fill(value);
                out_pos = end;
            } else {
                if out_pos >= capacity {
                    return Err(DecompressError::OutputOverflow { capacity });
                }
                output[out_pos] = byte;
                out_pos += 1;
            }
        }

        debug!(
            "rle: {} packed bytes -> {} of {} bytes",
            pos, out_pos, capacity
        );

        output[out_pos..].fill(0);
        let status = if out_pos < capacity {
            Status::TruncatedInput { filled: out_pos }
        } else {
            Status::Complete
        };
        self.options.finish(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_and_literals() {
        let input = [1, RUN_MARKER, 3, 9, 2];
        let mut out = [0u8; 5];

        assert_eq!(
            RleDecoder::new().decode_into(&input, &mut out),
            Ok(Status::Complete)
        );
        assert_eq!(out, [1, 9, 9, 9, 2]);
    }

    #[test]
    fn test_escaped_marker() {
        let input = [RUN_MARKER, 1, RUN_MARKER];
        let out = RleDecoder::new().decompress(&input, 1).unwrap();
        assert_eq!(out, [RUN_MARKER]);
    }

    #[test]
    fn test_zero_length_run() {
        let input = [RUN_MARKER, 0, 5, 6];
        let out = RleDecoder::new().decompress(&input, 1).unwrap();
        assert_eq!(out, [6]);
    }

    #[test]
    fn test_overflow() {
        let input = [RUN_MARKER, 10, 0];
        let mut out = [0u8; 4];

        assert_eq!(
            RleDecoder::new().decode_into(&input, &mut out),
            Err(DecompressError::OutputOverflow { capacity: 4 })
        );
    }

    #[test]
    fn test_cut_escape_is_truncation() {
        let input = [7, RUN_MARKER, 4];
        let mut out = [0xEEu8; 3];

        assert_eq!(
            RleDecoder::new().decode_into(&input, &mut out),
            Ok(Status::TruncatedInput { filled: 1 })
        );
        assert_eq!(out, [7, 0, 0]);
    }

    #[test]
    fn test_strict_rejects_short_stream() {
        let decoder = RleDecoder::with_options(DecodeOptions::new().strict(true));
        let mut out = [0u8; 3];

        assert_eq!(
            decoder.decode_into(&[1, 2], &mut out),
            Err(DecompressError::TruncatedInput { filled: 2 })
        );
    }
}
