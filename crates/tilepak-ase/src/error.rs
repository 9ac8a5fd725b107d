//! Error types for container decoding.

use thiserror::Error;
use tilepak_common::ErrorKind;

/// Errors that can occur while decoding an Aseprite container.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error (truncated input).
    #[error("{0}")]
    Common(#[from] tilepak_common::Error),

    /// Invalid magic number in a header block.
    #[error("invalid {block} magic: expected {expected:#06x}, got {actual:#06x}")]
    InvalidMagic {
        block: &'static str,
        expected: u16,
        actual: u16,
    },

    /// Only 8-bit indexed sources are accepted.
    #[error("unsupported color depth: expected 8 bits per pixel, got {0}")]
    UnsupportedColorDepth(u16),

    /// Legacy and modern chunk counts disagree.
    #[error("chunk count mismatch: legacy field {legacy:#06x}, modern field {modern}")]
    ChunkCountMismatch { legacy: u16, modern: u32 },

    /// Chunk size smaller than its own framing.
    #[error("chunk size {0} is smaller than the 6-byte chunk header")]
    ChunkTooSmall(u32),

    /// A second palette chunk was encountered.
    #[error("duplicate palette chunk")]
    DuplicatePalette,

    /// A tileset id was seen twice.
    #[error("duplicate tileset id {0}")]
    DuplicateTileset(u32),

    /// Two cels target the same layer.
    #[error("duplicate cel for layer index {0}")]
    DuplicateCel(u16),

    /// Legacy palette packet with a non-zero skip count.
    #[error("legacy palette packet skips {0} entries, expected 0")]
    PaletteSkip(u8),

    /// Indexed palette range is inverted.
    #[error("invalid palette range: first index {first} > last index {last}")]
    InvalidPaletteRange { first: u32, last: u32 },

    /// Tileset flags set neither the external nor the embedded bit.
    #[error("tileset flags {0:#010x} select neither external nor embedded tiles")]
    InvalidTilesetFlags(u32),

    /// Cel type selector outside 0..=3.
    #[error("invalid cel type {0}")]
    InvalidCelType(u16),

    /// Decompressed tilemap is not a whole number of 32-bit records.
    #[error("tilemap data length {0} is not a multiple of 4")]
    MisalignedTilemap(usize),

    /// Decompression error.
    #[error("decompression error in {context}: {message}")]
    Decompression {
        context: &'static str,
        message: String,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Common(e) => e.kind(),
            Self::Decompression { .. } => ErrorKind::Decompression,
            _ => ErrorKind::Format,
        }
    }
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;
