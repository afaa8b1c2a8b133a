use super::constants::{COPY_TOKEN_BITS, HEADER_SIZE, LITERAL_TOKEN_BITS, MAX_MATCH};
use crate::error::{Error, Result};

/// Fixed-size prefix of every encoded stream.
///
/// Holds only the decoded length, so callers can size an output buffer
/// without scanning the token stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamHeader {
    pub decoded_len: u32,
}

impl StreamHeader {
    pub fn new(decoded_len: u32) -> Self {
        Self { decoded_len }
    }

    /// Build a header for `source_len` input bytes
    pub fn for_source_len(source_len: usize) -> Result<Self> {
        let decoded_len =
            u32::try_from(source_len).map_err(|_| Error::InputTooLarge { len: source_len })?;
        Ok(Self { decoded_len })
    }

    /// Parse the header from the first [`HEADER_SIZE`] bytes of `source`.
    /// Nothing past the header is read.
    pub fn parse(source: &[u8]) -> Result<Self> {
        let bytes: [u8; HEADER_SIZE] = source
            .get(..HEADER_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(Error::TruncatedHeader { len: source.len() })?;
        Ok(Self { decoded_len: u32::from_le_bytes(bytes) })
    }

    /// Write the header into the start of `target`, returning bytes written
    pub fn write(&self, target: &mut [u8]) -> Result<usize> {
        let capacity = target.len();
        let dst = target
            .get_mut(..HEADER_SIZE)
            .ok_or(Error::Capacity { needed: HEADER_SIZE, capacity })?;
        dst.copy_from_slice(&self.decoded_len.to_le_bytes());
        Ok(HEADER_SIZE)
    }

    pub fn decoded_len(&self) -> usize {
        self.decoded_len as usize
    }
}

/// Worst-case encoded size for `source_len` input bytes.
///
/// Every byte emitted as a 9-bit literal, rounded up, plus the header.
pub fn max_encoded_size(source_len: usize) -> usize {
    HEADER_SIZE.saturating_add(source_len).saturating_add(source_len.div_ceil(8))
}

/// Decoded length declared by an encoded stream's header
pub fn max_decoded_size(source: &[u8]) -> Result<usize> {
    StreamHeader::parse(source).map(|h| h.decoded_len())
}

/// Largest output a token payload of `payload_len` bytes could describe:
/// as many maximum-length copies as fit, then literals in the leftover bits.
pub fn max_plausible_decoded_size(payload_len: usize) -> usize {
    let bits = payload_len.saturating_mul(8);
    let copies = bits / COPY_TOKEN_BITS;
    let literals = (bits % COPY_TOKEN_BITS) / LITERAL_TOKEN_BITS;
    copies.saturating_mul(MAX_MATCH).saturating_add(literals)
}
