//! Paged tile-index tables built from tilemap cels.

use byteorder::{BigEndian, WriteBytesExt};
use tilepak_ase::{Tilemap, Tileset};

use crate::patterns::CELL_SIZE;
use crate::{Error, Result};

/// Pages per axis the renderer can scroll across.
pub const MAX_PAGES: usize = 2;

/// Entry bit set when the tile is flipped vertically.
pub const ENTRY_Y_FLIP: u32 = 1 << 31;
/// Entry bit set when the tile is flipped horizontally.
pub const ENTRY_X_FLIP: u32 = 1 << 30;

/// Renderer page width in 8x8 cells.
const PAGE_CELLS: usize = 64;

/// Number of tilemap cells per page on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    pub x_cells: usize,
    pub y_cells: usize,
}

impl CellGrid {
    pub fn new(x_cells: usize, y_cells: usize) -> Result<Self> {
        if x_cells == 0 || y_cells == 0 {
            return Err(Error::InvalidCellGrid { x_cells, y_cells });
        }
        Ok(Self { x_cells, y_cells })
    }

    /// Granularity for a tileset: a 64x64-cell page shrinks by the number of
    /// 8x8 cells each tile covers.
    pub fn for_tileset(tileset: &Tileset) -> Result<Self> {
        match (tileset.tile_width as usize, tileset.tile_height as usize) {
            (width @ (8 | 16), height @ (8 | 16)) => {
                Self::new(PAGE_CELLS / (width / CELL_SIZE), PAGE_CELLS / (height / CELL_SIZE))
            }
            _ => Err(Error::UnsupportedTileSize {
                tileset_id: tileset.id,
                width: tileset.tile_width,
                height: tileset.tile_height,
            }),
        }
    }

    /// Pages needed to cover a `width` x `height` tilemap, capped at
    /// [`MAX_PAGES`] per axis.
    pub fn page_counts(&self, width: usize, height: usize) -> (usize, usize) {
        (
            width.div_ceil(self.x_cells).min(MAX_PAGES),
            height.div_ceil(self.y_cells).min(MAX_PAGES),
        )
    }
}

/// Compose the table entry for one tile record.
///
/// The diagonal flip is not representable and is dropped.
#[inline]
pub fn name_table_entry(tilemap: &Tilemap, record: u32) -> u32 {
    let mut entry = record & tilemap.tile_id_mask;
    if record & tilemap.x_flip_mask != 0 {
        entry |= ENTRY_X_FLIP;
    }
    if record & tilemap.y_flip_mask != 0 {
        entry |= ENTRY_Y_FLIP;
    }
    entry
}

/// Build the paged tile-index table for a tilemap.
///
/// Pages are emitted row-major, cells row-major within each page, one
/// big-endian u32 per cell. Cells outside the tilemap are zero.
pub fn pack_name_table(tilemap: &Tilemap, grid: CellGrid) -> Result<Vec<u8>> {
    let width = tilemap.width as usize;
    let height = tilemap.height as usize;
    let expected = width * height;
    if tilemap.tiles.len() < expected {
        return Err(Error::TilemapTooShort {
            expected,
            actual: tilemap.tiles.len(),
        });
    }

    let (h_pages, v_pages) = grid.page_counts(width, height);
    let mut out = Vec::with_capacity(h_pages * v_pages * grid.x_cells * grid.y_cells * 4);

    for v_page in 0..v_pages {
        for h_page in 0..h_pages {
            for y in 0..grid.y_cells {
                for x in 0..grid.x_cells {
                    let tx = h_page * grid.x_cells + x;
                    let ty = v_page * grid.y_cells + y;
                    let entry = if tx < width && ty < height {
                        name_table_entry(tilemap, tilemap.tiles[ty * width + tx])
                    } else {
                        0
                    };
                    out.write_u32::<BigEndian>(entry)?;
                }
            }
        }
    }

    Ok(out)
}
