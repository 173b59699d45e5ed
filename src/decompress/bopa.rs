//! BoPa flag-byte LZ decompression.
//!
//! The stream is a sequence of groups. Each group starts with a control
//! byte whose bits, MSB first, describe up to eight units:
//!
//! - bit set: one literal byte follows
//! - bit clear: a two byte descriptor follows, `[offset_hi:4 | count:4]`
//!   then `offset_lo:8`, meaning "copy `count + 3` bytes from `offset`
//!   bytes back"
//!
//! A control byte of `0xFF` is a fast path for eight literals.
//!
//! Running out of input is the normal way for a stream to end: the encoder
//! pads the last control byte with clear bits, and a clear bit with no
//! descriptor left stops the decoder.

use super::{Corruption, DecodeOptions, Result, Status};
use log::{debug, trace};

/// Shortest match length.
pub const MIN_MATCH: usize = 3;

/// Control byte announcing eight verbatim bytes.
const ALL_LITERALS: u8 = 0xFF;

/// BoPa decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct BopaDecoder {
    options: DecodeOptions,
}

/// Why the main loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    /// Every input unit was accounted for.
    Consumed,
    /// The read cursor ran past the end of the input.
    EndOfInput,
}

impl BopaDecoder {
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

    /// Fill `output` from the BoPa stream in `input`.
    ///
    /// The stream may produce more or fewer bytes than `output` holds. Extra
    /// bytes are dropped; missing bytes stay zero and are reported as
    /// [`Status::TruncatedInput`].
    pub fn decode_into(&self, input: &[u8], output: &mut [u8]) -> Result<Status> {
        if output.is_empty() {
            return Ok(Status::Complete);
        }

        let mut window = Vec::with_capacity(output.len());
        let stop = Self::expand(input, &mut window)?;

        let produced = window.len();
        let filled = produced.min(output.len());
        output[..filled].copy_from_slice(&window[..filled]);
        output[filled..].fill(0);

        debug!(
            "bopa: {} packed bytes -> {} bytes ({} expected), {:?}",
            input.len(),
            produced,
            output.len(),
            stop
        );

        let status = if filled < output.len() {
            Status::TruncatedInput { filled }
        } else {
            Status::Complete
        };
        self.options.finish(status)
    }

    /// Run the group loop, appending everything produced to `window`.
    fn expand(input: &[u8], window: &mut Vec<u8>) -> Result<Stop> {
        let mut pos = 0usize;
        // Logical units: literals count one, descriptors two, control bytes nothing.
        let mut consumed = 0usize;

        while consumed < input.len() {
            let control = match input.get(pos) {
                Some(&c) => c,
                None => return Ok(Stop::EndOfInput),
            };
            pos += 1;

            if control == ALL_LITERALS {
                let end = (pos + 8).min(input.len());
                window.extend_from_slice(&input[pos..end]);
                if end - pos < 8 {
                    return Ok(Stop::EndOfInput);
                }
                pos = end;
                consumed += 8;
                continue;
            }

            for bit in (0..8).rev() {
                if control & (1 << bit) != 0 {
                    match input.get(pos) {
                        Some(&b) => window.push(b),
                        None => return Ok(Stop::EndOfInput),
                    }
                    pos += 1;
                    consumed += 1;
                    continue;
                }

                let (subcode, low) = match (input.get(pos), input.get(pos + 1)) {
                    (Some(&s), Some(&l)) => (s, l),
                    _ => return Ok(Stop::EndOfInput),
                };
                pos += 2;
                consumed += 2;

                let count = (subcode & 0x0F) as usize + MIN_MATCH;
                let offset = low as usize | (((subcode >> 4) as usize) << 8);
                Self::copy_match(window, offset, count)?;
            }
        }

        Ok(Stop::Consumed)
    }

    /// Append `count` bytes copied from `offset` bytes before the end of `window`.
    fn copy_match(window: &mut Vec<u8>, offset: usize, count: usize) -> Result<()> {
        let position = window.len();
        if offset == 0 {
            return Err(Corruption::ZeroOffset { position }.into());
        }
        if offset > position {
            return Err(Corruption::BackReference {
                offset: offset as u32,
                position,
            }
            .into());
        }

        let from = position - offset;
        trace!("bopa: copy {} from -{} at {}", count, offset, position);
        if count > offset {
            // The source window is shorter than the run: repeat it.
            for i in 0..count {
                let b = window[from + i % offset];
                window.push(b);
            }
        } else {
            window.extend_from_within(from..from + count);
        }
        Ok(())
    }
}
