//! Error types for tilepak-common.

use std::fmt;

use thiserror::Error;

/// Broad classification shared by every tilepak error type.
///
/// Each crate keeps its own descriptive error enum; `kind()` on those enums
/// maps a concrete failure onto one of these classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input ended before a read completed.
    OutOfBounds,
    /// Structural violation of the container format.
    Format,
    /// Recognized input that this pipeline does not handle.
    UnsupportedVariant,
    /// Corrupt or truncated compressed payload.
    Decompression,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OutOfBounds => "out of bounds",
            Self::Format => "format error",
            Self::UnsupportedVariant => "unsupported variant",
            Self::Decompression => "decompression error",
        })
    }
}

/// Common error type for tilepak operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A read or skip went past the end of the buffer.
    #[error("read out of bounds at offset {offset}: needed {needed} bytes but only {available} available")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
