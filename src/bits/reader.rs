use crate::error::{Error, Result};

/// Bit-level reader over an in-memory token stream
///
/// Reads bits MSB-first within each byte. Running out of input is an
/// error, never an implicit run of zero bits.
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Next byte of `data` to load into the buffer
    pos: usize,
    /// Pending bits, left-aligned (next bit is bit 63)
    buffer: u64,
    /// Number of valid bits in buffer (0-64)
    bits_available: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, buffer: 0, bits_available: 0 }
    }

    /// Top up the buffer with as many whole bytes as fit
    #[inline]
    fn fill_buffer(&mut self) {
        while self.bits_available <= 56 {
            let Some(&byte) = self.data.get(self.pos) else {
                break;
            };
            self.buffer |= (byte as u64) << (56 - self.bits_available);
            self.bits_available += 8;
            self.pos += 1;
        }
    }

    /// Peek at `n` bits (0-32) without consuming them
    #[inline]
    pub fn peek_bits(&mut self, n: u8) -> Result<u32> {
        debug_assert!(n <= 32, "Cannot peek more than 32 bits at once");

        if n == 0 {
            return Ok(0);
        }

        if self.bits_available < n {
            self.fill_buffer();
            if self.bits_available < n {
                return Err(Error::UnexpectedEof);
            }
        }

        Ok((self.buffer >> (64 - n as u32)) as u32)
    }

    /// Consume `n` bits that were previously peeked
    #[inline]
    pub fn consume_bits(&mut self, n: u8) {
        debug_assert!(n <= self.bits_available, "Cannot consume more bits than available");
        self.buffer = self.buffer.checked_shl(n as u32).unwrap_or(0);
        self.bits_available -= n;
    }

    /// Read `n` bits (0-32), most significant first
    pub fn read_bits(&mut self, n: u8) -> Result<u32> {
        let value = self.peek_bits(n)?;
        self.consume_bits(n);
        Ok(value)
    }

    /// Read a single bit
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Bits not yet consumed, buffered or not
    pub fn bits_remaining(&self) -> usize {
        self.bits_available as usize + (self.data.len() - self.pos) * 8
    }

    /// Bytes touched so far, counting a partly consumed byte
    pub fn bytes_consumed(&self) -> usize {
        (self.data.len() * 8 - self.bits_remaining()).div_ceil(8)
    }
}
