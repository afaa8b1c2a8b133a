//! Back-reference search.
//!
//! Every finder returns the same answer for the same window: the longest
//! match of at least [`MIN_MATCH`] bytes, ties going to the smallest offset.
//! That keeps encoder output byte-identical whichever finder is used.

use super::tokens::Match;
use super::window::Window;
use crate::format::{MAX_OFFSET, MIN_MATCH};

/// Trait for locating back-references in the lookback window.
pub trait MatchFinder {
    /// Find the best match at `window.pos()`, or `None` if nothing reaches
    /// `MIN_MATCH`. Positions are visited in increasing order within one input.
    fn find_match(&mut self, window: &Window<'_>) -> Option<Match>;

    /// Reset state before a new input. Required when the same buffer is
    /// refilled with different bytes between calls.
    fn reset(&mut self);
}

/// Scans every offset in the window, nearest first.
///
/// O(window x match length) per position. Uses `memrchr` to jump between
/// offsets whose first byte already matches.
#[derive(Default)]
pub struct BruteForceMatcher;

impl MatchFinder for BruteForceMatcher {
    fn find_match(&mut self, window: &Window<'_>) -> Option<Match> {
        let max_length = window.max_length();
        if max_length < MIN_MATCH {
            return None;
        }

        let pos = window.pos();
        let first = window.lookahead()[0];
        let search = &window.history()[pos - window.max_offset()..];
        let base = pos - search.len();

        let mut best: Option<Match> = None;
        let mut best_length = MIN_MATCH - 1;

        // Reverse scan: nearest candidate (smallest offset) first
        for idx in memchr::memrchr_iter(first, search) {
            let offset = pos - (base + idx);
            let length = window.match_length(offset);
            if length > best_length {
                best_length = length;
                best = Some(Match::new(offset, length));
                if length == max_length {
                    break;
                }
            }
        }

        best
    }

    fn reset(&mut self) {}
}

/// Number of hash buckets (15-bit hash of the next three bytes)
const HASH_BITS: u32 = 15;
const HASH_SIZE: usize = 1 << HASH_BITS;

/// Chain links are indexed by position modulo the window size
const CHAIN_MASK: usize = MAX_OFFSET - 1;

/// Empty bucket / end of chain
const NIL: usize = usize::MAX;

/// Hash-chain index over the previous `MAX_OFFSET` positions.
///
/// Chains are walked newest first with no length cap, so the result is
/// exactly the brute-force result while skipping positions that cannot
/// share the next three bytes.
pub struct HashChainMatcher {
    /// Hash table: maps hash -> most recent position
    head: Vec<usize>,
    /// Chain links: prev[pos & CHAIN_MASK] -> previous position with same hash
    prev: Vec<usize>,
    /// Positions below this have been added to the chains
    inserted: usize,
    /// Address and length of the source the chains were built from
    source_key: Option<(usize, usize)>,
}

impl HashChainMatcher {
    pub fn new() -> Self {
        Self {
            head: vec![NIL; HASH_SIZE],
            prev: vec![NIL; MAX_OFFSET],
            inserted: 0,
            source_key: None,
        }
    }

    #[inline]
    fn hash(bytes: &[u8]) -> usize {
        let v = (bytes[0] as u32) << 16 | (bytes[1] as u32) << 8 | bytes[2] as u32;
        (v.wrapping_mul(2_654_435_761) >> (32 - HASH_BITS)) as usize
    }

    /// Add every position before `pos` that has three bytes to hash
    fn insert_up_to(&mut self, source: &[u8], pos: usize) {
        while self.inserted < pos {
            let p = self.inserted;
            if p + MIN_MATCH <= source.len() {
                let h = Self::hash(&source[p..p + MIN_MATCH]);
                self.prev[p & CHAIN_MASK] = self.head[h];
                self.head[h] = p;
            }
            self.inserted += 1;
        }
    }
}

impl Default for HashChainMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchFinder for HashChainMatcher {
    fn find_match(&mut self, window: &Window<'_>) -> Option<Match> {
        let pos = window.pos();
        let source = window.source();
        let key = (source.as_ptr() as usize, source.len());
        if pos < self.inserted || self.source_key != Some(key) {
            // A different input, or positions went backwards, without reset()
            self.reset();
            self.source_key = Some(key);
        }

        self.insert_up_to(source, pos);

        let max_length = window.max_length();
        if max_length < MIN_MATCH {
            return None;
        }

        let mut best: Option<Match> = None;
        let mut best_length = MIN_MATCH - 1;

        let mut candidate = self.head[Self::hash(&source[pos..pos + MIN_MATCH])];
        while candidate != NIL {
            let offset = pos - candidate;
            if offset > MAX_OFFSET {
                break;
            }

            let length = window.match_length(offset);
            if length > best_length {
                best_length = length;
                best = Some(Match::new(offset, length));
                if length == max_length {
                    break;
                }
            }

            candidate = self.prev[candidate & CHAIN_MASK];
        }

        best
    }

    fn reset(&mut self) {
        self.head.fill(NIL);
        self.prev.fill(NIL);
        self.inserted = 0;
        self.source_key = None;
    }
}

/// Longest match at `pos` in `source`, ties to the smallest offset.
///
/// Stateless form of the search; the compressor keeps a [`MatchFinder`]
/// across positions instead.
pub fn find_match(source: &[u8], pos: usize) -> Option<Match> {
    if pos >= source.len() {
        return None;
    }
    BruteForceMatcher.find_match(&Window::new(source, pos))
}
