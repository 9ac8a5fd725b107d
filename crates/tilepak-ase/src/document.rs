//! Single-pass document decoding.
//!
//! [`AseDocument::parse`] reads the file header and the first frame, then
//! routes every chunk of that frame to its typed decoder. The run-scoped
//! collections (palette slot, tileset map, layer list, cel map) are owned by
//! a [`ChunkDispatcher`] for the duration of the pass and handed over as an
//! immutable document at the end.

use std::collections::BTreeMap;

use tilepak_common::BinaryReader;
use tracing::{debug, warn};

use crate::chunk::{Chunk, ChunkKind};
use crate::chunks::{Cel, IndexedPalette, Layer, LegacyPalette, Palette, Tileset};
use crate::frame::FrameHeader;
use crate::header::Header;
use crate::{Error, Result};

/// A chunk the dispatcher skipped because its type is not handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnhandledChunk {
    pub chunk_type: u16,
    /// Declared size including framing.
    pub size: u32,
}

/// Accumulates decoded entities while the chunks of a frame are dispatched.
#[derive(Debug, Default)]
pub struct ChunkDispatcher {
    has_layer_uuid: bool,
    palette: Option<Palette>,
    tilesets: BTreeMap<u32, Tileset>,
    layers: Vec<Layer>,
    cels: BTreeMap<u16, Cel>,
    unhandled: Vec<UnhandledChunk>,
}

impl ChunkDispatcher {
    /// Create a dispatcher for a file with the given header.
    pub fn new(header: &Header) -> Self {
        Self {
            has_layer_uuid: header.layers_have_uuid(),
            ..Self::default()
        }
    }

    /// Decode one chunk and fold it into the collections.
    pub fn dispatch(&mut self, chunk: &Chunk<'_>) -> Result<()> {
        match chunk.kind {
            ChunkKind::LegacyPalette => {
                let palette = LegacyPalette::parse(chunk.data)?;
                debug!(packets = palette.packets.len(), "legacy palette");
                self.set_palette(Palette::Legacy(palette))?;
            }
            ChunkKind::Palette => {
                let palette = IndexedPalette::parse(chunk.data)?;
                debug!(
                    first = palette.first_index,
                    last = palette.last_index,
                    "indexed palette"
                );
                self.set_palette(Palette::Indexed(palette))?;
            }
            ChunkKind::Tileset => {
                let tileset = Tileset::parse(chunk.data)?;
                debug!(
                    id = tileset.id,
                    tiles = tileset.tile_count,
                    width = tileset.tile_width,
                    height = tileset.tile_height,
                    "tileset"
                );
                if self.tilesets.contains_key(&tileset.id) {
                    return Err(Error::DuplicateTileset(tileset.id));
                }
                self.tilesets.insert(tileset.id, tileset);
            }
            ChunkKind::Layer => {
                let layer = Layer::parse(chunk.data, self.has_layer_uuid)?;
                debug!(
                    index = self.layers.len(),
                    name = %layer.name_lossy(),
                    kind = ?layer.kind,
                    "layer"
                );
                self.layers.push(layer);
            }
            ChunkKind::Cel => {
                let cel = Cel::parse(chunk.data)?;
                debug!(layer = cel.layer_index, cel_type = ?cel.content.cel_type(), "cel");
                if self.cels.contains_key(&cel.layer_index) {
                    return Err(Error::DuplicateCel(cel.layer_index));
                }
                self.cels.insert(cel.layer_index, cel);
            }
            ChunkKind::UserData => {}
            ChunkKind::Unknown(code) => {
                warn!(
                    chunk_type = format_args!("{:#06x}", code),
                    size = chunk.size,
                    "unhandled chunk"
                );
                self.unhandled.push(UnhandledChunk {
                    chunk_type: code,
                    size: chunk.size,
                });
            }
        }

        Ok(())
    }

    fn set_palette(&mut self, palette: Palette) -> Result<()> {
        if self.palette.is_some() {
            return Err(Error::DuplicatePalette);
        }
        self.palette = Some(palette);
        Ok(())
    }

    /// Finish the pass and produce the document.
    pub fn finish(self, header: Header) -> AseDocument {
        AseDocument {
            header,
            palette: self.palette,
            tilesets: self.tilesets,
            layers: self.layers,
            cels: self.cels,
            unhandled_chunks: self.unhandled,
        }
    }
}

/// Everything decoded from one container file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AseDocument {
    pub header: Header,
    pub palette: Option<Palette>,
    /// Tilesets by tileset id.
    pub tilesets: BTreeMap<u32, Tileset>,
    /// Layers in order of appearance; the position is the layer index.
    pub layers: Vec<Layer>,
    /// Cels by layer index.
    pub cels: BTreeMap<u16, Cel>,
    pub unhandled_chunks: Vec<UnhandledChunk>,
}

impl AseDocument {
    /// Decode a complete container file.
    ///
    /// Only the first frame is decoded. Any structural violation aborts the
    /// whole decode; unknown chunk types are skipped and recorded in
    /// [`unhandled_chunks`](Self::unhandled_chunks).
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let header = Header::read(&mut reader)?;
        if header.frames > 1 {
            debug!(frames = header.frames, "decoding first frame only");
        }

        let frame = FrameHeader::read(&mut reader)?;
        debug!(
            chunks = frame.chunk_count,
            duration = frame.duration,
            "frame header"
        );

        let mut dispatcher = ChunkDispatcher::new(&header);
        for _ in 0..frame.chunk_count {
            let chunk = Chunk::read(&mut reader)?;
            dispatcher.dispatch(&chunk)?;
        }

        Ok(dispatcher.finish(header))
    }

    /// Layer at `index`, if any.
    pub fn layer(&self, index: u16) -> Option<&Layer> {
        self.layers.get(index as usize)
    }

    /// Tileset with the given id, if any.
    pub fn tileset(&self, id: u32) -> Option<&Tileset> {
        self.tilesets.get(&id)
    }

    /// Cel on the layer at `index`, if any.
    pub fn cel(&self, layer_index: u16) -> Option<&Cel> {
        self.cels.get(&layer_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::{CelContent, LayerKind, TilesetSource};
    use crate::testutil::{self, TilemapMasks};
    use tilepak_common::{ErrorKind, Uuid};

    fn tile_scene() -> Vec<Vec<u8>> {
        let pixels: Vec<u8> = (0..4 * 8 * 8).map(|i| (i % 251) as u8).collect();
        vec![
            testutil::chunk(
                ChunkKind::LEGACY_PALETTE,
                &testutil::legacy_palette_payload(&[(0, 0, 0), (255, 255, 255)]),
            ),
            testutil::chunk(
                ChunkKind::TILESET,
                &testutil::embedded_tileset_payload(0, 4, 8, 8, &pixels),
            ),
            testutil::chunk(
                ChunkKind::LAYER,
                &testutil::layer_payload(LayerKind::TILEMAP, b"bg", Some(0), None),
            ),
            testutil::chunk(
                ChunkKind::CEL,
                &testutil::tilemap_cel_payload(0, 2, 1, TilemapMasks::DEFAULT, &[1, 2]),
            ),
            testutil::chunk(ChunkKind::USER_DATA, &[0, 0, 0, 0]),
        ]
    }

    #[test]
    fn test_foreign_file_reports_bad_magic() {
        let mut data = b"GIF89a".to_vec();
        data.resize(512, 0);
        let err = AseDocument::parse(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMagic {
                expected: Header::MAGIC,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn test_parse_tile_scene() {
        let file = testutil::file(0, &tile_scene());
        let doc = AseDocument::parse(&file).unwrap();

        assert!(matches!(doc.palette, Some(Palette::Legacy(_))));
        assert_eq!(doc.tilesets.len(), 1);
        assert!(matches!(
            doc.tileset(0).unwrap().source,
            TilesetSource::Embedded { .. }
        ));
        assert_eq!(doc.layers.len(), 1);
        assert_eq!(doc.layer(0).unwrap().tileset_index, Some(0));
        let cel = doc.cel(0).unwrap();
        assert!(matches!(cel.content, CelContent::CompressedTilemap(_)));
        assert!(doc.unhandled_chunks.is_empty());
    }

    #[test]
    fn test_layers_read_uuid_when_flagged() {
        let uuid = Uuid::from_bytes([7; 16]);
        let chunks = vec![testutil::chunk(
            ChunkKind::LAYER,
            &testutil::layer_payload(LayerKind::TILEMAP, b"bg", Some(0), Some(uuid)),
        )];
        let file = testutil::file(Header::FLAG_LAYER_UUID, &chunks);

        let doc = AseDocument::parse(&file).unwrap();
        assert_eq!(doc.layers[0].uuid, Some(uuid));
    }

    #[test]
    fn test_unknown_chunk_is_skipped() {
        let mut chunks = tile_scene();
        chunks.insert(1, testutil::chunk(0x2007, &[1, 2, 3, 4, 5]));
        let file = testutil::file(0, &chunks);

        let doc = AseDocument::parse(&file).unwrap();
        assert_eq!(
            doc.unhandled_chunks,
            vec![UnhandledChunk {
                chunk_type: 0x2007,
                size: 11
            }]
        );
        // Chunks after the unknown one are still decoded.
        assert_eq!(doc.layers.len(), 1);
    }

    #[test]
    fn test_duplicate_palette() {
        let mut chunks = tile_scene();
        chunks.push(testutil::chunk(
            ChunkKind::PALETTE,
            &testutil::indexed_palette_payload(0, &[(1, 2, 3, 255, None)]),
        ));
        let err = AseDocument::parse(&testutil::file(0, &chunks)).unwrap_err();
        assert!(matches!(err, Error::DuplicatePalette));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_duplicate_tileset_id() {
        let mut chunks = tile_scene();
        chunks.push(testutil::chunk(
            ChunkKind::TILESET,
            &testutil::external_tileset_payload(0, 1, 1),
        ));
        let err = AseDocument::parse(&testutil::file(0, &chunks)).unwrap_err();
        assert!(matches!(err, Error::DuplicateTileset(0)));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_duplicate_cel_layer_index() {
        let mut chunks = tile_scene();
        chunks.push(testutil::chunk(
            ChunkKind::CEL,
            &testutil::tilemap_cel_payload(0, 1, 1, TilemapMasks::DEFAULT, &[0]),
        ));
        let err = AseDocument::parse(&testutil::file(0, &chunks)).unwrap_err();
        assert!(matches!(err, Error::DuplicateCel(0)));
    }

    #[test]
    fn test_chunk_count_bounds_the_pass() {
        let chunks = tile_scene();
        let mut file = testutil::file(0, &chunks[..2]);
        // Bytes after the declared chunks are never visited.
        file.extend_from_slice(&[0xFF; 32]);

        let doc = AseDocument::parse(&file).unwrap();
        assert_eq!(doc.tilesets.len(), 1);
        assert!(doc.layers.is_empty());
    }

    #[test]
    fn test_truncated_chunk_stream() {
        let file = testutil::file(0, &tile_scene());
        let err = AseDocument::parse(&file[..file.len() - 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_zero_frame_count_still_reads_first_frame() {
        let mut file = testutil::header_bytes(0, 8, 0);
        file.extend_from_slice(&testutil::frame_header_bytes(0, 0, 16));
        let doc = AseDocument::parse(&file).unwrap();
        assert_eq!(doc.header.frames, 0);
        assert!(doc.layers.is_empty());

        let header_only = testutil::header_bytes(0, 8, 0);
        let err = AseDocument::parse(&header_only).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_frame_chunk_count_mismatch() {
        let mut file = testutil::header_bytes(1, 8, 0);
        file.extend_from_slice(&testutil::frame_header_bytes(0xFFFF, 0, 16));
        let err = AseDocument::parse(&file).unwrap_err();
        assert!(matches!(err, Error::ChunkCountMismatch { .. }));
    }
}
