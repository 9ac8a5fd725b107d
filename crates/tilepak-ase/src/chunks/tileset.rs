//! Tileset chunk (`0x2023`).

use tilepak_common::BinaryReader;

use crate::decompress::inflate;
use crate::{Error, Result};

/// Where a tileset's pixels live.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "source", rename_all = "snake_case"))]
pub enum TilesetSource {
    /// Tiles are stored in another file.
    External {
        file_id: u32,
        tileset_id: u32,
    },
    /// Tiles are stored in this chunk, already decompressed.
    ///
    /// Pixels are one byte per index, tiles stacked vertically in id order.
    Embedded {
        compressed_len: u32,
        #[cfg_attr(feature = "serde", serde(skip))]
        pixels: Vec<u8>,
    },
}

/// A decoded tileset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tileset {
    pub id: u32,
    pub flags: u32,
    pub tile_count: u32,
    pub tile_width: u16,
    pub tile_height: u16,
    pub base_index: i16,
    #[cfg_attr(feature = "serde", serde(serialize_with = "super::serialize_lossy"))]
    pub name: Vec<u8>,
    pub source: TilesetSource,
}

impl Tileset {
    /// Flag: tiles are linked from an external file.
    pub const FLAG_EXTERNAL: u32 = 1 << 0;
    /// Flag: tiles are embedded in this chunk.
    pub const FLAG_EMBEDDED: u32 = 1 << 1;

    /// Decode a tileset payload.
    ///
    /// When both source flags are set the external reference takes
    /// precedence and the embedded data is not read.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let id = reader.read_u32()?;
        let flags = reader.read_u32()?;
        let tile_count = reader.read_u32()?;
        let tile_width = reader.read_u16()?;
        let tile_height = reader.read_u16()?;
        let base_index = reader.read_i16()?;
        reader.skip(14)?;
        let name = reader.read_pascal_string()?.to_vec();

        let source = if flags & Self::FLAG_EXTERNAL != 0 {
            TilesetSource::External {
                file_id: reader.read_u32()?,
                tileset_id: reader.read_u32()?,
            }
        } else if flags & Self::FLAG_EMBEDDED != 0 {
            let compressed_len = reader.read_u32()?;
            let compressed = reader.read_bytes(compressed_len as usize)?;
            TilesetSource::Embedded {
                compressed_len,
                pixels: inflate(compressed, "tileset")?,
            }
        } else {
            return Err(Error::InvalidTilesetFlags(flags));
        };

        Ok(Self {
            id,
            flags,
            tile_count,
            tile_width,
            tile_height,
            base_index,
            name,
            source,
        })
    }

    /// Decompressed pixels, if the tiles are embedded.
    pub fn pixels(&self) -> Option<&[u8]> {
        match &self.source {
            TilesetSource::Embedded { pixels, .. } => Some(pixels),
            TilesetSource::External { .. } => None,
        }
    }

    /// Name as text, replacing invalid UTF-8.
    pub fn name_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn test_embedded_tileset() {
        let pixels: Vec<u8> = (0..2 * 8 * 8).map(|i| i as u8).collect();
        let payload = testutil::embedded_tileset_payload(7, 2, 8, 8, &pixels);
        let tileset = Tileset::parse(&payload).unwrap();

        assert_eq!(tileset.id, 7);
        assert_eq!(tileset.tile_count, 2);
        assert_eq!((tileset.tile_width, tileset.tile_height), (8, 8));
        assert_eq!(tileset.base_index, 1);
        assert_eq!(tileset.name_lossy(), "tiles");
        assert_eq!(tileset.pixels(), Some(&pixels[..]));
    }

    #[test]
    fn test_external_tileset() {
        let payload = testutil::external_tileset_payload(3, 11, 4);
        let tileset = Tileset::parse(&payload).unwrap();

        assert_eq!(
            tileset.source,
            TilesetSource::External {
                file_id: 11,
                tileset_id: 4
            }
        );
        assert!(tileset.pixels().is_none());
    }

    #[test]
    fn test_blank_embedded_tileset() {
        let pixels = [0u8; 4 * 8 * 8];
        let payload = testutil::embedded_tileset_payload(0, 4, 8, 8, &pixels);
        let tileset = Tileset::parse(&payload).unwrap();
        assert_eq!(tileset.pixels(), Some(&pixels[..]));
    }

    #[test]
    fn test_external_flag_wins_over_embedded() {
        let mut payload = testutil::external_tileset_payload(5, 11, 4);
        let both = Tileset::FLAG_EXTERNAL | Tileset::FLAG_EMBEDDED;
        payload[4..8].copy_from_slice(&both.to_le_bytes());
        // Trailing bytes that would be a bogus compressed block if read.
        payload.extend_from_slice(&[0xFF; 12]);

        let tileset = Tileset::parse(&payload).unwrap();
        assert_eq!(tileset.flags, 0b11);
        assert_eq!(
            tileset.source,
            TilesetSource::External {
                file_id: 11,
                tileset_id: 4
            }
        );
        assert!(tileset.pixels().is_none());
    }

    #[test]
    fn test_tileset_without_source_flags() {
        let mut payload = testutil::external_tileset_payload(3, 11, 4);
        payload[4..8].copy_from_slice(&4u32.to_le_bytes());
        let err = Tileset::parse(&payload).unwrap_err();
        assert!(matches!(err, Error::InvalidTilesetFlags(4)));
    }

    #[test]
    fn test_corrupt_embedded_tileset() {
        let pixels: Vec<u8> = (0..64).map(|i| (i * 37 % 251) as u8).collect();
        let mut payload = testutil::embedded_tileset_payload(1, 1, 8, 8, &pixels);
        // Keep the 2-byte zlib header, clobber the deflate body and checksum.
        let body_start = payload.len() - testutil::zlib(&pixels).len() + 2;
        for byte in &mut payload[body_start..] {
            *byte = 0xFF;
        }
        let err = Tileset::parse(&payload).unwrap_err();
        assert!(matches!(err, Error::Decompression { .. }));
    }
}
