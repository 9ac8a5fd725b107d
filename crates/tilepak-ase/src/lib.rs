//! Aseprite container decoder.
//!
//! Decodes the parts of an `.ase`/`.aseprite` file that a tile renderer
//! needs: the palette, tilesets, layers and cels of the first frame. Only
//! 8-bit indexed files are accepted.
//!
//! # File Format
//!
//! - 128-byte file header (magic `0xA5E0`)
//! - Per frame: 16-byte frame header (magic `0xF1FA`) followed by chunks
//! - Each chunk: u32 size, u16 type, `size - 6` payload bytes
//!
//! All integers are little-endian. Embedded pixel and tilemap data are zlib
//! streams.
//!
//! # Example
//!
//! ```no_run
//! use tilepak_ase::AseDocument;
//!
//! let data = std::fs::read("level.aseprite")?;
//! let doc = AseDocument::parse(&data)?;
//!
//! for (index, layer) in doc.layers.iter().enumerate() {
//!     println!("layer {}: {} tileset={:?}", index, layer.name_lossy(), layer.tileset_index);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chunk;
pub mod chunks;
mod decompress;
mod document;
mod error;
mod frame;
mod header;

#[cfg(test)]
mod testutil;

pub use chunk::{Chunk, ChunkKind, CHUNK_HEADER_SIZE};
pub use decompress::{inflate, inflate_into};
pub use document::{AseDocument, ChunkDispatcher, UnhandledChunk};
pub use error::{Error, Result};
pub use frame::{reconcile_chunk_count, FrameHeader, RawFrameHeader, LEGACY_CHUNK_COUNT_OVERFLOW};
pub use header::{Header, RawHeader};

// Re-export commonly used types at crate root
pub use chunks::{
    Cel, CelContent, CelType, IndexedPalette, Layer, LayerKind, LegacyPalette, Palette,
    PaletteEntry, PalettePacket, Rgb, Tilemap, Tileset, TilesetSource,
};
pub use tilepak_common::ErrorKind;
