//! Error types for decoding compressed pages.

use thiserror::Error;

/// Why a stream was rejected as corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptReason {
    /// The declared length is larger than the buffer that was handed over.
    #[error("declared length {declared} exceeds the {available} bytes supplied")]
    LengthOutOfBounds { declared: usize, available: usize },

    /// The cursor reached the end of input before a terminator code.
    #[error("stream ended before the terminator")]
    Truncated,

    /// The reserved all-ones code.
    #[error("reserved code")]
    ReservedCode,

    /// A repeat code points further back than the output produced so far.
    #[error("repeat distance {distance} exceeds the {available} bytes decoded")]
    RepeatOutOfRange { distance: usize, available: usize },

    /// Non-zero padding or whole bytes after the terminator.
    #[error("trailing data after the terminator")]
    TrailingData,

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// The error type for all decode operations in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Nothing to decode: the declared length was zero.
    #[error("empty input")]
    EmptyInput,

    /// The stream is malformed or truncated. No partial output is produced.
    #[error("corrupt stream at bit {bit_offset}: {reason}")]
    CorruptStream {
        bit_offset: usize,
        reason: CorruptReason,
    },

    /// Decoding would produce more than the configured output limit.
    #[error("decoded text exceeds the {limit} byte limit")]
    OutputTooLarge { limit: usize },
}

impl DecodeError {
    pub(crate) fn corrupt(bit_offset: usize, reason: CorruptReason) -> Self {
        DecodeError::CorruptStream { bit_offset, reason }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, DecodeError::CorruptStream { .. })
    }
}

/// A convenience `Result` alias using [`DecodeError`].
pub type Result<T> = std::result::Result<T, DecodeError>;
