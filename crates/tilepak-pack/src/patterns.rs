//! Tile pixel repacking into 8x8 cell blocks.

use tilepak_ase::{Tileset, TilesetSource};

use crate::{Error, Result};

/// Edge length of one renderer cell in pixels.
pub const CELL_SIZE: usize = 8;

/// Repack every tile of an embedded tileset into 8x8 cell blocks.
///
/// An 8x8 tile is one block. A 16x16 tile becomes four blocks in row-major
/// order (top-left, top-right, bottom-left, bottom-right). Tiles are
/// emitted in id order.
pub fn pack_tile_patterns(tileset: &Tileset) -> Result<Vec<u8>> {
    let pixels = match &tileset.source {
        TilesetSource::Embedded { pixels, .. } => pixels,
        TilesetSource::External { .. } => return Err(Error::ExternalTileset(tileset.id)),
    };

    let width = tileset.tile_width as usize;
    let height = tileset.tile_height as usize;
    if !matches!((width, height), (8, 8) | (16, 16)) {
        return Err(Error::UnsupportedTileSize {
            tileset_id: tileset.id,
            width: tileset.tile_width,
            height: tileset.tile_height,
        });
    }

    let tile_size = width * height;
    let expected = tile_size * tileset.tile_count as usize;
    if pixels.len() < expected {
        return Err(Error::TilesetTooShort {
            tileset_id: tileset.id,
            expected,
            actual: pixels.len(),
        });
    }

    let mut out = Vec::with_capacity(expected);
    for tile in pixels[..expected].chunks_exact(tile_size) {
        split_tile(tile, width, height, &mut out);
    }
    Ok(out)
}

/// Append the 8x8 cells of one tile, row-major by cell.
fn split_tile(tile: &[u8], width: usize, height: usize, out: &mut Vec<u8>) {
    for cell_y in 0..height / CELL_SIZE {
        for cell_x in 0..width / CELL_SIZE {
            for y in 0..CELL_SIZE {
                let start = (cell_y * CELL_SIZE + y) * width + cell_x * CELL_SIZE;
                out.extend_from_slice(&tile[start..start + CELL_SIZE]);
            }
        }
    }
}
