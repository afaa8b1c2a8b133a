use crate::bits::BitWriter;
use crate::error::{Error, Result};
use crate::format::{
    COPY_TOKEN_BITS, LENGTH_BITS, LITERAL_TOKEN_BITS, MAX_MATCH, MAX_OFFSET, MIN_MATCH, OFFSET_BITS,
    TAG_COPY, TAG_LITERAL,
};
use crate::lz77::Token;

/// Packs tokens into the output bitstream.
///
/// Every token is checked against the buffer capacity as a whole before any
/// of its bits are written, so a capacity error never leaves half a token.
pub struct TokenEncoder<'a> {
    bits: BitWriter<'a>,
    literals: u64,
    copies: u64,
}

impl<'a> TokenEncoder<'a> {
    /// Encode into `target` starting at byte `start`
    pub fn new(target: &'a mut [u8], start: usize) -> Self {
        Self { bits: BitWriter::new_at(target, start), literals: 0, copies: 0 }
    }

    /// Tag `0` + 8-bit byte
    pub fn write_literal(&mut self, byte: u8) -> Result<()> {
        self.bits.ensure_bits(LITERAL_TOKEN_BITS)?;
        self.bits.write_bits(TAG_LITERAL, 1)?;
        self.bits.write_bits(byte as u32, 8)?;
        self.literals += 1;
        Ok(())
    }

    /// Tag `1` + 15-bit `offset - 1` + 8-bit `length - MIN_MATCH`
    pub fn write_copy(&mut self, offset: usize, length: usize) -> Result<()> {
        if !(1..=MAX_OFFSET).contains(&offset) || !(MIN_MATCH..=MAX_MATCH).contains(&length) {
            return Err(Error::InvalidToken { offset, length });
        }

        self.bits.ensure_bits(COPY_TOKEN_BITS)?;
        self.bits.write_bits(TAG_COPY, 1)?;
        self.bits.write_bits((offset - 1) as u32, OFFSET_BITS)?;
        self.bits.write_bits((length - MIN_MATCH) as u32, LENGTH_BITS)?;
        self.copies += 1;
        Ok(())
    }

    pub fn write_token(&mut self, token: &Token) -> Result<()> {
        match *token {
            Token::Literal(byte) => self.write_literal(byte),
            Token::Copy { offset, length } => self.write_copy(offset as usize, length as usize),
        }
    }

    pub fn literals(&self) -> u64 {
        self.literals
    }

    pub fn copies(&self) -> u64 {
        self.copies
    }

    pub fn bits_written(&self) -> usize {
        self.bits.bits_written()
    }

    /// Pad the final byte and return the total bytes used in the target
    pub fn finish(self) -> usize {
        self.bits.finish()
    }
}
