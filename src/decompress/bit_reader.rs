//! Backward bit reader for PP20 streams.
//!
//! Bytes are consumed from the end of the buffer toward the start, and each
//! byte is consumed from its least significant bit upward. Bits are
//! accumulated MSB first into the returned value.

/// Bit reader over a byte slice, walking backwards.
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Index of the byte currently loaded into `buffer`.
    cursor: usize,
    /// Unconsumed bits of the current byte, next bit in bit 0
    buffer: u32,
    /// Bits available in buffer (0..=8)
    bits_in_buffer: u32,
}

impl<'a> BitReader<'a> {
    /// Create a reader whose first refill loads `data[end - 1]`.
    ///
    /// `end` is clamped to the slice length.
    pub fn new(data: &'a [u8], end: usize) -> Self {
        Self {
            data,
            cursor: end.min(data.len()),
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Load the next byte going backwards.
    ///
    /// The cursor never moves below zero: once it sits on the first byte,
    /// every refill reloads that byte again. PP20 streams depend on this.
    #[inline]
    fn refill(&mut self) {
        if self.cursor != 0 {
            self.cursor -= 1;
        }
        self.buffer = self.data.get(self.cursor).copied().unwrap_or(0) as u32;
        self.bits_in_buffer = 8;
    }

    #[inline]
    fn next_bit(&mut self) -> u32 {
        if self.bits_in_buffer == 0 {
            self.refill();
        }
        let bit = self.buffer & 1;
        self.buffer >>= 1;
        self.bits_in_buffer -= 1;
        bit
    }

    /// Read n bits, MSB first.
    ///
    /// Widths come straight from the stream, so n is not limited to 32;
    /// only the last 32 bits read are kept.
    #[inline]
    pub fn read_bits(&mut self, n: u32) -> u32 {
        let mut value = 0u32;
        for _ in 0..n {
            value = (value << 1) | self.next_bit();
        }
        value
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> bool {
        self.next_bit() != 0
    }

    /// Discard n bits.
    pub fn skip_bits(&mut self, n: u32) {
        for _ in 0..n {
            self.next_bit();
        }
    }

    /// Extend a run length with escape-coded increments.
    ///
    /// Starting from `initial`, reads `width`-bit increments and adds them
    /// while the increment equals `escape`. Nothing more is read once the
    /// length reaches `limit`.
    #[inline]
    pub fn read_run_length(&mut self, initial: u32, width: u32, escape: u32, limit: u32) -> u32 {
        let mut length = initial;
        while length < limit {
            let code = self.read_bits(width);
            length = length.saturating_add(code);
            if code != escape {
                break;
            }
        }
        length
    }

    /// Index of the byte currently loaded.
    pub fn byte_position(&self) -> usize {
        self.cursor
    }

    /// Check whether the reader has reached the first byte with nothing left in it.
    pub fn at_start(&self) -> bool {
        self.cursor == 0 && self.bits_in_buffer == 0
    }
}
