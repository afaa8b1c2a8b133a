use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Capacity errors
    #[error("Output buffer too small: need {needed} bytes, capacity is {capacity}")]
    Capacity { needed: usize, capacity: usize },

    #[error("Input of {len} bytes exceeds the 32-bit length header")]
    InputTooLarge { len: usize },

    // Stream corruption
    #[error("Truncated header: {len} bytes, expected at least 4")]
    TruncatedHeader { len: usize },

    #[error("Unexpected end of token stream")]
    UnexpectedEof,

    #[error("Back-reference offset {offset} exceeds decoded output {available}")]
    InvalidBackReference { offset: usize, available: usize },

    #[error("Stream overruns declared length {expected}: token needs {attempted} bytes")]
    LengthOverrun { expected: usize, attempted: usize },

    #[error("Stream ended after {produced} of {expected} bytes")]
    LengthUnderrun { expected: usize, produced: usize },

    #[error("{bytes} unread bytes after final token")]
    TrailingData { bytes: usize },

    #[error("Nonzero padding after final token: {bits} bits, value {value:#x}")]
    InvalidPadding { bits: usize, value: u32 },

    #[error("Header claims {claimed} bytes but payload can describe at most {max}")]
    ImplausibleLength { claimed: usize, max: usize },

    // Encoder misuse
    #[error("Copy token out of range: offset={offset}, length={length}")]
    InvalidToken { offset: usize, length: usize },

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an [`Error`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// An output buffer was too small; retry with a larger one
    Capacity,
    /// The encoded input is malformed or truncated
    CorruptStream,
    /// Reading or writing a file failed
    Io,
    /// Encoder misuse or a failed self-check
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Capacity { .. } | Error::InputTooLarge { .. } => ErrorKind::Capacity,
            Error::TruncatedHeader { .. }
            | Error::UnexpectedEof
            | Error::InvalidBackReference { .. }
            | Error::LengthOverrun { .. }
            | Error::LengthUnderrun { .. }
            | Error::TrailingData { .. }
            | Error::InvalidPadding { .. }
            | Error::ImplausibleLength { .. } => ErrorKind::CorruptStream,
            Error::InvalidToken { .. } | Error::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_capacity(&self) -> bool {
        self.kind() == ErrorKind::Capacity
    }

    pub fn is_corrupt_stream(&self) -> bool {
        self.kind() == ErrorKind::CorruptStream
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the encoding side
pub type EncodeError = Error;

/// Errors returned by the decoding side
pub type DecodeError = Error;
