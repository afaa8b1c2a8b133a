use crate::error::{Error, Result};
use crate::format::{max_plausible_decoded_size, StreamHeader, HEADER_SIZE};
use crate::lz77::{OutputWindow, Token};
use crate::tokens::TokenDecoder;
use crate::CodecStats;

/// LZ77 decompressor
///
/// Treats its input as untrusted: every malformed, truncated or
/// inconsistent stream is reported as a corrupt-stream error and nothing
/// is written past the declared length.
#[derive(Default)]
pub struct Decompressor {
    stats: CodecStats,
}

impl Decompressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for the most recent successful call
    pub fn stats(&self) -> &CodecStats {
        &self.stats
    }

    /// Decode `source` into `target`, returning the decoded length.
    ///
    /// The capacity check happens before any byte is written.
    pub fn decode_into(&mut self, source: &[u8], target: &mut [u8]) -> Result<usize> {
        let result = self.decode_tokens(source, target);
        if let Err(e) = &result {
            if e.is_corrupt_stream() {
                tracing::warn!(encoded = source.len(), error = %e, "corrupt stream");
            }
        }
        result
    }

    /// Decode into a buffer sized from the header.
    ///
    /// Headers claiming more output than the payload could describe are
    /// rejected before allocating.
    pub fn decode(&mut self, source: &[u8]) -> Result<Vec<u8>> {
        let expected = StreamHeader::parse(source)?.decoded_len();
        let max = max_plausible_decoded_size(source.len() - HEADER_SIZE);
        if expected > max {
            tracing::warn!(claimed = expected, max, "implausible decoded length");
            return Err(Error::ImplausibleLength { claimed: expected, max });
        }

        let mut output = vec![0u8; expected];
        self.decode_into(source, &mut output)?;
        Ok(output)
    }

    fn decode_tokens(&mut self, source: &[u8], target: &mut [u8]) -> Result<usize> {
        let expected = StreamHeader::parse(source)?.decoded_len();
        if target.len() < expected {
            return Err(Error::Capacity { needed: expected, capacity: target.len() });
        }

        let mut decoder = TokenDecoder::new(&source[HEADER_SIZE..]);
        let mut output = OutputWindow::new(target, expected);
        let mut stats = CodecStats {
            decoded_bytes: expected as u64,
            encoded_bytes: source.len() as u64,
            ..Default::default()
        };

        while !output.is_full() {
            match decoder.read_token()? {
                Some(Token::Literal(byte)) => {
                    output.push_byte(byte)?;
                    stats.literals += 1;
                }
                Some(Token::Copy { offset, length }) => {
                    output.copy_back(offset as usize, length as usize)?;
                    stats.copies += 1;
                    stats.copied_bytes += length as u64;
                }
                None => {
                    return Err(Error::LengthUnderrun { expected, produced: output.position() });
                }
            }
        }

        decoder.finish()?;

        tracing::debug!(
            encoded = source.len(),
            decoded = expected,
            literals = stats.literals,
            copies = stats.copies,
            "decoded stream"
        );
        self.stats = stats;
        Ok(expected)
    }
}
