/// Size of the little-endian decoded-length header
pub const HEADER_SIZE: usize = 4;

/// Width of the stored offset field (`offset - 1`)
pub const OFFSET_BITS: u8 = 15;

/// Width of the stored length field (`length - MIN_MATCH`)
pub const LENGTH_BITS: u8 = 8;

/// Furthest back-reference distance (32KB window)
pub const MAX_OFFSET: usize = 1 << OFFSET_BITS;

/// Shortest match ever emitted as a copy
pub const MIN_MATCH: usize = 3;

/// Longest match a single copy can carry (3 + 255)
pub const MAX_MATCH: usize = MIN_MATCH + (1 << LENGTH_BITS) - 1;

/// Tag bit value for a literal token
pub const TAG_LITERAL: u32 = 0;

/// Tag bit value for a copy token
pub const TAG_COPY: u32 = 1;

/// Encoded size of a literal: tag + raw byte
pub const LITERAL_TOKEN_BITS: usize = 1 + 8;

/// Encoded size of a copy: tag + offset + length
pub const COPY_TOKEN_BITS: usize = 1 + OFFSET_BITS as usize + LENGTH_BITS as usize;
