use crate::format::{COPY_TOKEN_BITS, LITERAL_TOKEN_BITS, MAX_MATCH, MAX_OFFSET, MIN_MATCH};

/// Represents a single token in the LZ77 stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A literal byte
    Literal(u8),
    /// A back-reference: copy `length` bytes from `offset` bytes back.
    /// `length` may exceed `offset`, which repeats the last `offset` bytes.
    Copy { offset: u16, length: u16 },
}

impl Token {
    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Copy { length, .. } => *length as usize,
        }
    }

    /// Number of bits this token occupies in the stream
    pub fn encoded_bits(&self) -> usize {
        match self {
            Token::Literal(_) => LITERAL_TOKEN_BITS,
            Token::Copy { .. } => COPY_TOKEN_BITS,
        }
    }
}

/// A back-reference found by a match finder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Distance back from the cursor (1 = previous byte)
    pub offset: usize,
    /// Number of matching bytes
    pub length: usize,
}

impl Match {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Whether this match can be emitted as a copy token
    pub fn is_encodable(&self) -> bool {
        (1..=MAX_OFFSET).contains(&self.offset) && (MIN_MATCH..=MAX_MATCH).contains(&self.length)
    }

    /// Convert to a copy token, if the offset and length fit the format
    pub fn to_token(&self) -> Option<Token> {
        if !self.is_encodable() {
            return None;
        }
        Some(Token::Copy { offset: self.offset as u16, length: self.length as u16 })
    }
}
