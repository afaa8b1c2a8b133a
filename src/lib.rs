//! Bounded-capacity LZ77 compression for game resource and save blobs.
//!
//! An encoded stream is a 4-byte little-endian decoded length followed by a
//! packed token stream (see [`format`]). Encoding and decoding never write
//! past the caller's buffer: undersized buffers are capacity errors, and
//! malformed input is a corrupt-stream error.
//!
//! ```
//! let data = b"AAAAAAAAAA";
//! let encoded = lzpak::encode(data).unwrap();
//! assert!(encoded.len() <= lzpak::max_encoded_size(data.len()));
//! assert_eq!(lzpak::max_decoded_size(&encoded).unwrap(), data.len());
//! assert_eq!(lzpak::decode(&encoded).unwrap(), data);
//! ```

pub mod bits;
pub mod codec;
pub mod error;
pub mod format;
pub mod lz77;
pub mod tokens;

pub use codec::{decode_batch, encode_batch, Compressor, Decompressor};
pub use error::{DecodeError, EncodeError, Error, ErrorKind, Result};
pub use format::{max_decoded_size, max_encoded_size};
pub use lz77::{find_match, Match, MatchFinder, Token};

use lz77::{BruteForceMatcher, HashChainMatcher};

/// Match search strategy.
///
/// Both strategies produce byte-identical output; they differ only in speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Scan every offset in the window
    BruteForce,
    /// Hash-chain index over three-byte prefixes
    #[default]
    HashChain,
}

impl MatchStrategy {
    /// Parse a strategy name as used on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "brute-force" | "brute" => Some(Self::BruteForce),
            "hash-chain" | "chain" => Some(Self::HashChain),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BruteForce => "brute-force",
            Self::HashChain => "hash-chain",
        }
    }

    /// Build a fresh match finder for this strategy
    pub fn matcher(&self) -> Box<dyn MatchFinder + Send> {
        match self {
            Self::BruteForce => Box::new(BruteForceMatcher),
            Self::HashChain => Box::new(HashChainMatcher::new()),
        }
    }
}

/// Configuration for encoding
#[derive(Clone, Debug, Default)]
pub struct EncodeConfig {
    /// How back-references are searched for
    pub strategy: MatchStrategy,
    /// Decode the output after encoding and fail if it does not match
    pub verify: bool,
}

/// Statistics from one encode or decode call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodecStats {
    pub decoded_bytes: u64,
    pub encoded_bytes: u64,
    pub literals: u64,
    pub copies: u64,
    /// Bytes produced by copy tokens
    pub copied_bytes: u64,
}

impl CodecStats {
    /// Encoded size as a fraction of decoded size (0 for empty input)
    pub fn ratio(&self) -> f64 {
        if self.decoded_bytes == 0 {
            return 0.0;
        }
        self.encoded_bytes as f64 / self.decoded_bytes as f64
    }
}

/// Encode `source` with the default configuration
pub fn encode(source: &[u8]) -> Result<Vec<u8>> {
    Compressor::default().encode(source)
}

/// Decode a stream produced by [`encode`]
pub fn decode(source: &[u8]) -> Result<Vec<u8>> {
    Decompressor::new().decode(source)
}

/// Encode into a caller-owned buffer, returning the bytes written
pub fn encode_into(source: &[u8], target: &mut [u8]) -> Result<usize> {
    Compressor::default().encode_into(source, target)
}

/// Decode into a caller-owned buffer, returning the decoded length
pub fn decode_into(source: &[u8], target: &mut [u8]) -> Result<usize> {
    Decompressor::new().decode_into(source, target)
}
