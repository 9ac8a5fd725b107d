//! Whole-document conversion into named blobs.

use std::fmt;

use tilepak_ase::{AseDocument, LayerKind};
use tracing::debug;

use crate::name_table::{pack_name_table, CellGrid};
use crate::palette::pack_palette;
use crate::patterns::pack_tile_patterns;
use crate::{Error, Result};

/// Identifies a blob produced by [`convert`].
///
/// `Display` yields the conventional file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlobName {
    Palette,
    TilePatterns { tileset_id: u32 },
    NameTable { layer_index: u16 },
}

impl fmt::Display for BlobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Palette => f.write_str("palette.bin"),
            Self::TilePatterns { tileset_id } => {
                write!(f, "character_pattern__tileset_{}.bin", tileset_id)
            }
            Self::NameTable { layer_index } => {
                write!(f, "pattern_name_table__layer_{}.bin", layer_index)
            }
        }
    }
}

/// A named output buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub name: BlobName,
    pub data: Vec<u8>,
}

impl Blob {
    fn new(name: BlobName, data: Vec<u8>) -> Self {
        Self { name, data }
    }
}

/// Convert a decoded document into renderer blobs.
///
/// Emits the palette, then one pattern blob per tileset by ascending id,
/// then one name table per cel by ascending layer index. Nothing is
/// returned unless every blob converts.
pub fn convert(document: &AseDocument) -> Result<Vec<Blob>> {
    let palette = document.palette.as_ref().ok_or(Error::MissingPalette)?;

    let mut blobs = Vec::with_capacity(1 + document.tilesets.len() + document.cels.len());
    blobs.push(Blob::new(BlobName::Palette, pack_palette(palette)?));
    debug!(colors = palette.color_count(), "Packed palette");

    for (&tileset_id, tileset) in &document.tilesets {
        let data = pack_tile_patterns(tileset)?;
        debug!(tileset_id, tiles = tileset.tile_count, "Packed tile patterns");
        blobs.push(Blob::new(BlobName::TilePatterns { tileset_id }, data));
    }

    for (&layer_index, cel) in &document.cels {
        let layer = document
            .layer(layer_index)
            .ok_or(Error::MissingLayer(layer_index))?;

        let tileset_id = match (layer.kind, layer.tileset_index) {
            (LayerKind::Tilemap, Some(id)) => id,
            (kind, _) => return Err(Error::NotTilemapLayer { layer_index, kind }),
        };

        let tileset = document
            .tileset(tileset_id)
            .ok_or(Error::MissingTileset {
                layer_index,
                tileset_id,
            })?;

        let tilemap = cel.tilemap().ok_or(Error::NotTilemapCel {
            layer_index,
            cel_type: cel.content.cel_type(),
        })?;

        let grid = CellGrid::for_tileset(tileset)?;
        let data = pack_name_table(tilemap, grid)?;
        debug!(
            layer_index,
            tileset_id,
            width = tilemap.width,
            height = tilemap.height,
            "Packed name table"
        );
        blobs.push(Blob::new(BlobName::NameTable { layer_index }, data));
    }

    Ok(blobs)
}
