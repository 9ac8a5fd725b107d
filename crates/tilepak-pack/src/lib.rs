//! Repacking of decoded Aseprite documents into tile renderer blobs.
//!
//! Three blob kinds are produced:
//!
//! - a palette of big-endian BGR555 colors
//! - per tileset, the tile pixels split into 8x8 cell blocks
//! - per tilemap cel, a paged table of big-endian u32 tile entries
//!
//! # Example
//!
//! ```no_run
//! use tilepak_ase::AseDocument;
//! use tilepak_pack::convert;
//!
//! let data = std::fs::read("level.aseprite")?;
//! let doc = AseDocument::parse(&data)?;
//!
//! for blob in convert(&doc)? {
//!     std::fs::write(blob.name.to_string(), &blob.data)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod error;
mod name_table;
mod palette;
mod patterns;

pub use convert::{convert, Blob, BlobName};
pub use error::{Error, Result};
pub use name_table::{
    name_table_entry, pack_name_table, CellGrid, ENTRY_X_FLIP, ENTRY_Y_FLIP, MAX_PAGES,
};
pub use palette::{pack_bgr555, pack_palette, unpack_bgr555};
pub use patterns::{pack_tile_patterns, CELL_SIZE};
