use crate::error::{Error, Result};
use crate::format::{MAX_MATCH, MAX_OFFSET};

/// Lookback view over the input during encoding.
///
/// `source[..pos]` is the window of already-processed bytes, `source[pos..]`
/// is the lookahead. Borrowed for one encode call and never stored.
#[derive(Clone, Copy, Debug)]
pub struct Window<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> Window<'a> {
    pub fn new(source: &'a [u8], pos: usize) -> Self {
        debug_assert!(pos <= source.len());
        Self { source, pos: pos.min(source.len()) }
    }

    /// The whole input being encoded
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes already processed
    pub fn history(&self) -> &'a [u8] {
        &self.source[..self.pos]
    }

    /// Bytes still to encode
    pub fn lookahead(&self) -> &'a [u8] {
        &self.source[self.pos..]
    }

    /// Largest offset a back-reference may use at this position
    pub fn max_offset(&self) -> usize {
        self.pos.min(MAX_OFFSET)
    }

    /// Longest match that could be emitted at this position
    pub fn max_length(&self) -> usize {
        (self.source.len() - self.pos).min(MAX_MATCH)
    }

    /// Length of the match starting `offset` bytes back.
    ///
    /// Compares against `source` itself, so a match may run past the cursor
    /// when `offset` is shorter than the match (an overlapping run).
    pub fn match_length(&self, offset: usize) -> usize {
        if offset == 0 || offset > self.max_offset() {
            return 0;
        }
        let limit = self.max_length();
        let candidate = &self.source[self.pos - offset..];
        let ahead = &self.source[self.pos..self.pos + limit];
        ahead.iter().zip(candidate).take_while(|(a, b)| a == b).count()
    }
}

/// Decode target that only ever grows forward.
///
/// Writes are bounded by `limit`, the declared decoded length, which the
/// caller has already checked against the buffer.
pub struct OutputWindow<'a> {
    buffer: &'a mut [u8],
    /// Next write position
    position: usize,
    /// Number of bytes this stream may produce
    limit: usize,
}

impl<'a> OutputWindow<'a> {
    pub fn new(buffer: &'a mut [u8], limit: usize) -> Self {
        let limit = limit.min(buffer.len());
        Self { buffer, position: 0, limit }
    }

    /// Add a single byte
    #[inline]
    pub fn push_byte(&mut self, byte: u8) -> Result<()> {
        if self.position >= self.limit {
            return Err(Error::LengthOverrun { expected: self.limit, attempted: self.position + 1 });
        }
        self.buffer[self.position] = byte;
        self.position += 1;
        Ok(())
    }

    /// Copy `length` bytes from `offset` bytes back.
    ///
    /// Copies one byte at a time so that `length > offset` repeats the
    /// pattern. Validates the whole copy before writing any of it.
    pub fn copy_back(&mut self, offset: usize, length: usize) -> Result<()> {
        if offset == 0 || offset > self.position {
            return Err(Error::InvalidBackReference { offset, available: self.position });
        }
        let end = self.position + length;
        if end > self.limit {
            return Err(Error::LengthOverrun { expected: self.limit, attempted: end });
        }

        let start = self.position - offset;
        for i in 0..length {
            self.buffer[self.position + i] = self.buffer[start + i];
        }
        self.position = end;
        Ok(())
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes still expected before the stream is complete
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    pub fn is_full(&self) -> bool {
        self.position == self.limit
    }
}
