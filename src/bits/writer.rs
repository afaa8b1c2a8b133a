use crate::error::{Error, Result};

/// Bit-level writer into a caller-owned buffer
///
/// Writes bits MSB-first. The buffer length is a hard capacity: a write
/// that would not fit fails before any bit of it is stored.
pub struct BitWriter<'a> {
    /// Destination buffer (its length is the capacity)
    output: &'a mut [u8],
    /// Next whole byte to write
    byte_pos: usize,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
}

impl<'a> BitWriter<'a> {
    pub fn new(output: &'a mut [u8]) -> Self {
        Self::new_at(output, 0)
    }

    /// Start writing at byte `start`, leaving earlier bytes untouched
    pub fn new_at(output: &'a mut [u8], start: usize) -> Self {
        let byte_pos = start.min(output.len());
        Self { output, byte_pos, current_byte: 0, bits_in_byte: 0 }
    }

    /// Fail with a capacity error unless `n` more bits fit
    pub fn ensure_bits(&self, n: usize) -> Result<()> {
        let needed = (self.bits_written() + n).div_ceil(8);
        if needed > self.output.len() {
            return Err(Error::Capacity { needed, capacity: self.output.len() });
        }
        Ok(())
    }

    /// Write the low `n` bits (0-32) of `value`, most significant first
    pub fn write_bits(&mut self, value: u32, n: u8) -> Result<()> {
        debug_assert!(n <= 32);

        if n == 0 {
            return Ok(());
        }

        self.ensure_bits(n as usize)?;

        let mut remaining = n;
        while remaining > 0 {
            let space = 8 - self.bits_in_byte;
            let to_write = remaining.min(space);

            let shift = remaining - to_write;
            let mask = (1u32 << to_write) - 1;
            let chunk = ((value >> shift) & mask) as u8;
            self.current_byte |= chunk << (space - to_write);

            self.bits_in_byte += to_write;
            remaining -= to_write;

            if self.bits_in_byte == 8 {
                self.flush_byte();
            }
        }

        Ok(())
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad to byte boundary with zero bits
    pub fn align_to_byte(&mut self) {
        if self.bits_in_byte > 0 {
            self.flush_byte();
        }
    }

    fn flush_byte(&mut self) {
        // ensure_bits has already reserved this byte
        self.output[self.byte_pos] = self.current_byte;
        self.byte_pos += 1;
        self.current_byte = 0;
        self.bits_in_byte = 0;
    }

    /// Finish and return the number of bytes used, including the padded
    /// final byte and any bytes before the start position
    pub fn finish(mut self) -> usize {
        self.align_to_byte();
        self.byte_pos
    }

    /// Total bits written so far, counted from the start of the buffer
    pub fn bits_written(&self) -> usize {
        self.byte_pos * 8 + self.bits_in_byte as usize
    }

    /// Get current output length in bytes (including partial byte)
    pub fn len(&self) -> usize {
        self.byte_pos + if self.bits_in_byte > 0 { 1 } else { 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.output.len()
    }
}
