//! Tilepak - Aseprite tilemap conversion for 8x8-cell tile renderers.
//!
//! This crate provides a unified interface to the tilepak crates.
//!
//! # Crates
//!
//! - [`tilepak_common`] - Common utilities (binary reading, identifiers, error taxonomy)
//! - [`tilepak_ase`] - Aseprite container decoding
//! - [`tilepak_pack`] - Palette, tile pattern and name table repacking
//!
//! # Example
//!
//! ```no_run
//! use tilepak::prelude::*;
//!
//! let data = std::fs::read("level.aseprite")?;
//! let doc = AseDocument::parse(&data)?;
//!
//! for blob in convert(&doc)? {
//!     println!("{}: {} bytes", blob.name, blob.data.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use tilepak_ase as ase;
pub use tilepak_common as common;
pub use tilepak_pack as pack;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tilepak_ase::{
        AseDocument, Cel, CelContent, Layer, LayerKind, Palette, Tilemap, Tileset, TilesetSource,
    };
    pub use tilepak_common::{BinaryReader, ErrorKind, Uuid};
    pub use tilepak_pack::{convert, Blob, BlobName, CellGrid};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
