use crate::bits::BitReader;
use crate::error::{Error, Result};
use crate::format::{LENGTH_BITS, MIN_MATCH, OFFSET_BITS, TAG_LITERAL};
use crate::lz77::Token;

/// Parses tokens back out of a packed bitstream.
pub struct TokenDecoder<'a> {
    bits: BitReader<'a>,
}

impl<'a> TokenDecoder<'a> {
    /// Decode the token stream in `payload` (the bytes after the header)
    pub fn new(payload: &'a [u8]) -> Self {
        Self { bits: BitReader::new(payload) }
    }

    /// Read the next token.
    ///
    /// Returns `Ok(None)` when no bits are left at all. A token cut short
    /// by the end of input is `Error::UnexpectedEof`.
    pub fn read_token(&mut self) -> Result<Option<Token>> {
        if self.bits.bits_remaining() == 0 {
            return Ok(None);
        }

        let tag = self.bits.read_bits(1)?;
        if tag == TAG_LITERAL {
            let byte = self.bits.read_bits(8)? as u8;
            return Ok(Some(Token::Literal(byte)));
        }

        let offset = self.bits.read_bits(OFFSET_BITS)? as u16 + 1;
        let length = self.bits.read_bits(LENGTH_BITS)? as u16 + MIN_MATCH as u16;
        Ok(Some(Token::Copy { offset, length }))
    }

    pub fn bits_remaining(&self) -> usize {
        self.bits.bits_remaining()
    }

    /// Whole unread bytes; anything less than a byte is final-byte padding
    pub fn trailing_bytes(&self) -> usize {
        self.bits.bits_remaining() / 8
    }

    /// Check the stream ends cleanly after the final token: no whole bytes
    /// left over, and the padding of the last byte is all zero.
    pub fn finish(mut self) -> Result<()> {
        let trailing = self.trailing_bytes();
        if trailing > 0 {
            return Err(Error::TrailingData { bytes: trailing });
        }

        let bits = self.bits.bits_remaining();
        let value = self.bits.read_bits(bits as u8)?;
        if value != 0 {
            return Err(Error::InvalidPadding { bits, value });
        }
        Ok(())
    }
}

impl Iterator for TokenDecoder<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_token().transpose()
    }
}
