use crate::error::{Error, Result};
use crate::format::{max_encoded_size, StreamHeader, HEADER_SIZE};
use crate::lz77::{MatchFinder, Window};
use crate::tokens::TokenEncoder;
use crate::{CodecStats, EncodeConfig};

use super::decompress::Decompressor;

/// Greedy LZ77 compressor
///
/// At each position emits the best back-reference if there is one,
/// otherwise a literal. Output depends only on the input bytes.
pub struct Compressor {
    config: EncodeConfig,
    matcher: Box<dyn MatchFinder + Send>,
    stats: CodecStats,
}

impl Compressor {
    pub fn new(config: EncodeConfig) -> Self {
        let matcher = config.strategy.matcher();
        Self { config, matcher, stats: CodecStats::default() }
    }

    pub fn config(&self) -> &EncodeConfig {
        &self.config
    }

    /// Statistics for the most recent successful call
    pub fn stats(&self) -> &CodecStats {
        &self.stats
    }

    /// Encode `source` into `target`, returning the number of bytes written.
    ///
    /// Fails with a capacity error as soon as a token would not fit; a target
    /// of [`max_encoded_size`] bytes always suffices.
    pub fn encode_into(&mut self, source: &[u8], target: &mut [u8]) -> Result<usize> {
        StreamHeader::for_source_len(source.len())?.write(target)?;

        self.matcher.reset();
        let mut encoder = TokenEncoder::new(target, HEADER_SIZE);
        let mut copied_bytes = 0u64;
        let mut pos = 0;

        while pos < source.len() {
            let window = Window::new(source, pos);
            match self.matcher.find_match(&window) {
                Some(m) => {
                    encoder.write_copy(m.offset, m.length)?;
                    pos += m.length;
                    copied_bytes += m.length as u64;
                }
                None => {
                    encoder.write_literal(source[pos])?;
                    pos += 1;
                }
            }
        }

        let literals = encoder.literals();
        let copies = encoder.copies();
        let written = encoder.finish();

        if self.config.verify {
            verify_round_trip(source, &target[..written])?;
        }

        self.stats = CodecStats {
            decoded_bytes: source.len() as u64,
            encoded_bytes: written as u64,
            literals,
            copies,
            copied_bytes,
        };
        tracing::debug!(
            decoded = source.len(),
            encoded = written,
            literals,
            copies,
            "encoded stream"
        );

        Ok(written)
    }

    /// Encode into a freshly allocated buffer of exactly the encoded size
    pub fn encode(&mut self, source: &[u8]) -> Result<Vec<u8>> {
        StreamHeader::for_source_len(source.len())?;
        let mut output = vec![0u8; max_encoded_size(source.len())];
        let written = self.encode_into(source, &mut output)?;
        output.truncate(written);
        Ok(output)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(EncodeConfig::default())
    }
}

/// Decode `encoded` and compare against the original input
fn verify_round_trip(source: &[u8], encoded: &[u8]) -> Result<()> {
    let decoded = Decompressor::new().decode(encoded)?;
    if decoded != source {
        let at = decoded.iter().zip(source).position(|(a, b)| a != b).unwrap_or(decoded.len());
        return Err(Error::Internal(format!("round-trip verification failed at byte {}", at)));
    }
    Ok(())
}
