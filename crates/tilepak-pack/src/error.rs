//! Error types for repacking.

use thiserror::Error;
use tilepak_ase::{CelType, LayerKind};
use tilepak_common::ErrorKind;

/// Errors that can occur while converting a decoded document into blobs.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while serializing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document has no palette chunk.
    #[error("document has no palette")]
    MissingPalette,

    /// Indexed palettes must start at color 0 to be emitted as a full table.
    #[error("palette starts at index {0}, expected 0")]
    PaletteNotZeroBased(u32),

    /// External tilesets carry no pixels to repack.
    #[error("tileset {0} references an external file")]
    ExternalTileset(u32),

    /// Only 8x8 and 16x16 tiles map onto the renderer's cells.
    #[error("tileset {tileset_id} has unsupported tile size {width}x{height}")]
    UnsupportedTileSize {
        tileset_id: u32,
        width: u16,
        height: u16,
    },

    /// Fewer pixels than the tile count and size require.
    #[error("tileset {tileset_id} holds {actual} pixel bytes, expected {expected}")]
    TilesetTooShort {
        tileset_id: u32,
        expected: usize,
        actual: usize,
    },

    /// A cel refers to a layer index that was never declared.
    #[error("cel refers to missing layer {0}")]
    MissingLayer(u16),

    /// Only tilemap layers can be converted to tile-index tables.
    #[error("layer {layer_index} is a {kind:?} layer, expected a tilemap layer")]
    NotTilemapLayer { layer_index: u16, kind: LayerKind },

    /// A tilemap layer refers to a tileset that was never declared.
    #[error("layer {layer_index} refers to missing tileset {tileset_id}")]
    MissingTileset { layer_index: u16, tileset_id: u32 },

    /// The cel on a tilemap layer does not hold a tilemap.
    #[error("cel on layer {layer_index} is {cel_type:?}, expected a compressed tilemap")]
    NotTilemapCel { layer_index: u16, cel_type: CelType },

    /// Fewer tile records than width x height.
    #[error("tilemap holds {actual} tiles, expected {expected}")]
    TilemapTooShort { expected: usize, actual: usize },

    /// Page granularity must be non-zero on both axes.
    #[error("invalid cell grid {x_cells}x{y_cells}")]
    InvalidCellGrid { x_cells: usize, y_cells: usize },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingPalette
            | Self::TilesetTooShort { .. }
            | Self::MissingLayer(_)
            | Self::MissingTileset { .. }
            | Self::TilemapTooShort { .. }
            | Self::Io(_) => ErrorKind::Format,
            Self::PaletteNotZeroBased(_)
            | Self::ExternalTileset(_)
            | Self::UnsupportedTileSize { .. }
            | Self::NotTilemapLayer { .. }
            | Self::NotTilemapCel { .. }
            | Self::InvalidCellGrid { .. } => ErrorKind::UnsupportedVariant,
        }
    }
}

/// Result type for repacking operations.
pub type Result<T> = std::result::Result<T, Error>;
