//! Builders for synthetic container files used by the unit tests.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tilepak_common::Uuid;
use zerocopy::{FromZeros, IntoBytes};

use crate::chunk::CHUNK_HEADER_SIZE;
use crate::chunks::Tileset;
use crate::frame::{FrameHeader, RawFrameHeader};
use crate::header::{Header, RawHeader};

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn header_bytes(frames: u16, color_depth: u16, flags: u32) -> Vec<u8> {
    let mut raw = RawHeader::new_zeroed();
    raw.magic = Header::MAGIC;
    raw.frames = frames;
    raw.width = 320;
    raw.height = 240;
    raw.color_depth = color_depth;
    raw.flags = flags;
    raw.speed = 100;
    raw.pixel_width = 1;
    raw.pixel_height = 1;
    raw.grid_x = -4;
    raw.grid_width = 16;
    raw.grid_height = 16;
    raw.as_bytes().to_vec()
}

pub fn frame_header_bytes(legacy: u16, modern: u32, frame_size: u32) -> Vec<u8> {
    let mut raw = RawFrameHeader::new_zeroed();
    raw.frame_size = frame_size;
    raw.magic = FrameHeader::MAGIC;
    raw.legacy_chunk_count = legacy;
    raw.duration = 100;
    raw.chunk_count = modern;
    raw.as_bytes().to_vec()
}

pub fn chunk(code: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 6);
    out.write_u32::<LittleEndian>(payload.len() as u32 + CHUNK_HEADER_SIZE)
        .unwrap();
    out.write_u16::<LittleEndian>(code).unwrap();
    out.extend_from_slice(payload);
    out
}

/// A single-frame file holding `chunks`.
pub fn file(flags: u32, chunks: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = chunks.concat();
    let count = chunks.len() as u32;

    let mut out = header_bytes(1, 8, flags);
    out.extend_from_slice(&frame_header_bytes(
        count as u16,
        count,
        (RawFrameHeader::SIZE + body.len()) as u32,
    ));
    out.extend_from_slice(&body);

    let size = out.len() as u32;
    out[..4].copy_from_slice(&size.to_le_bytes());
    out
}

fn pascal(out: &mut Vec<u8>, text: &[u8]) {
    out.write_u16::<LittleEndian>(text.len() as u16).unwrap();
    out.extend_from_slice(text);
}

/// One packet, no skipped entries.
pub fn legacy_palette_payload(colors: &[(u8, u8, u8)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u16::<LittleEndian>(1).unwrap();
    out.push(0);
    out.push(colors.len() as u8);
    for &(r, g, b) in colors {
        out.extend_from_slice(&[r, g, b]);
    }
    out
}

pub type EntryFields<'a> = (u8, u8, u8, u8, Option<&'a [u8]>);

pub fn indexed_palette_payload(first: u32, entries: &[EntryFields<'_>]) -> Vec<u8> {
    let last = first + entries.len() as u32 - 1;
    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(last + 1).unwrap();
    out.write_u32::<LittleEndian>(first).unwrap();
    out.write_u32::<LittleEndian>(last).unwrap();
    out.extend_from_slice(&[0; 8]);
    for &(r, g, b, a, name) in entries {
        out.write_u16::<LittleEndian>(u16::from(name.is_some())).unwrap();
        out.extend_from_slice(&[r, g, b, a]);
        if let Some(name) = name {
            pascal(&mut out, name);
        }
    }
    out
}

fn tileset_prefix(id: u32, flags: u32, count: u32, width: u16, height: u16) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(id).unwrap();
    out.write_u32::<LittleEndian>(flags).unwrap();
    out.write_u32::<LittleEndian>(count).unwrap();
    out.write_u16::<LittleEndian>(width).unwrap();
    out.write_u16::<LittleEndian>(height).unwrap();
    out.write_i16::<LittleEndian>(1).unwrap();
    out.extend_from_slice(&[0; 14]);
    pascal(&mut out, b"tiles");
    out
}

pub fn embedded_tileset_payload(id: u32, count: u32, width: u16, height: u16, pixels: &[u8]) -> Vec<u8> {
    let compressed = zlib(pixels);
    let mut out = tileset_prefix(id, Tileset::FLAG_EMBEDDED, count, width, height);
    out.write_u32::<LittleEndian>(compressed.len() as u32).unwrap();
    out.extend_from_slice(&compressed);
    out
}

pub fn external_tileset_payload(id: u32, file_id: u32, tileset_id: u32) -> Vec<u8> {
    let mut out = tileset_prefix(id, Tileset::FLAG_EXTERNAL, 0, 8, 8);
    out.write_u32::<LittleEndian>(file_id).unwrap();
    out.write_u32::<LittleEndian>(tileset_id).unwrap();
    out
}

pub fn layer_payload(kind: u16, name: &[u8], tileset_index: Option<u32>, uuid: Option<Uuid>) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u16::<LittleEndian>(3).unwrap();
    out.write_u16::<LittleEndian>(kind).unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(320).unwrap();
    out.write_u16::<LittleEndian>(240).unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();
    out.push(255);
    out.extend_from_slice(&[0; 3]);
    pascal(&mut out, name);
    if let Some(index) = tileset_index {
        out.write_u32::<LittleEndian>(index).unwrap();
    }
    if let Some(uuid) = uuid {
        out.extend_from_slice(uuid.as_bytes());
    }
    out
}

/// Cel fields with position (-3, 5) and z-index -1, followed by `body`.
pub fn cel_payload(layer_index: u16, cel_type: u16, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u16::<LittleEndian>(layer_index).unwrap();
    out.write_i16::<LittleEndian>(-3).unwrap();
    out.write_i16::<LittleEndian>(5).unwrap();
    out.push(255);
    out.write_u16::<LittleEndian>(cel_type).unwrap();
    out.write_i16::<LittleEndian>(-1).unwrap();
    out.extend_from_slice(&[0; 5]);
    out.extend_from_slice(body);
    out
}

#[derive(Debug, Clone, Copy)]
pub struct TilemapMasks {
    pub tile_id: u32,
    pub x_flip: u32,
    pub y_flip: u32,
    pub diagonal: u32,
}

impl TilemapMasks {
    pub const DEFAULT: Self = Self {
        tile_id: 0x1FFF_FFFF,
        x_flip: 0x2000_0000,
        y_flip: 0x4000_0000,
        diagonal: 0x8000_0000,
    };
}

pub fn tilemap_cel_payload(
    layer_index: u16,
    width: u16,
    height: u16,
    masks: TilemapMasks,
    tiles: &[u32],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.write_u16::<LittleEndian>(width).unwrap();
    body.write_u16::<LittleEndian>(height).unwrap();
    body.write_u16::<LittleEndian>(32).unwrap();
    body.write_u32::<LittleEndian>(masks.tile_id).unwrap();
    body.write_u32::<LittleEndian>(masks.x_flip).unwrap();
    body.write_u32::<LittleEndian>(masks.y_flip).unwrap();
    body.write_u32::<LittleEndian>(masks.diagonal).unwrap();
    body.extend_from_slice(&[0; 10]);

    let mut raw = Vec::with_capacity(tiles.len() * 4);
    for &tile in tiles {
        raw.write_u32::<LittleEndian>(tile).unwrap();
    }
    body.extend_from_slice(&zlib(&raw));

    cel_payload(layer_index, 3, &body)
}
