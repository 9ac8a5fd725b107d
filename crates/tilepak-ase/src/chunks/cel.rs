//! Cel chunk (`0x2005`).

use tilepak_common::BinaryReader;

use crate::decompress::inflate;
use crate::{Error, Result};

/// Cel payload selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CelType {
    Raw = 0,
    Linked = 1,
    CompressedImage = 2,
    CompressedTilemap = 3,
}

impl TryFrom<u16> for CelType {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Self::Raw),
            1 => Ok(Self::Linked),
            2 => Ok(Self::CompressedImage),
            3 => Ok(Self::CompressedTilemap),
            other => Err(Error::InvalidCelType(other)),
        }
    }
}

/// A grid of 32-bit tile records decoded from a compressed tilemap cel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tilemap {
    /// Width in tiles.
    pub width: u16,
    /// Height in tiles.
    pub height: u16,
    pub bits_per_tile: u16,
    pub tile_id_mask: u32,
    pub x_flip_mask: u32,
    pub y_flip_mask: u32,
    pub diagonal_flip_mask: u32,
    /// Row-major tile records.
    pub tiles: Vec<u32>,
}

impl Tilemap {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let width = reader.read_u16()?;
        let height = reader.read_u16()?;
        let bits_per_tile = reader.read_u16()?;
        let tile_id_mask = reader.read_u32()?;
        let x_flip_mask = reader.read_u32()?;
        let y_flip_mask = reader.read_u32()?;
        let diagonal_flip_mask = reader.read_u32()?;
        reader.skip(10)?;

        let raw = inflate(reader.read_rest(), "tilemap cel")?;
        if raw.len() % 4 != 0 {
            return Err(Error::MisalignedTilemap(raw.len()));
        }

        let tiles = raw
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        Ok(Self {
            width,
            height,
            bits_per_tile,
            tile_id_mask,
            x_flip_mask,
            y_flip_mask,
            diagonal_flip_mask,
            tiles,
        })
    }

    /// The record at tile coordinate `(x, y)`, if inside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.tiles.get(y * self.width as usize + x).copied()
    }
}

/// The four cel payload shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum CelContent {
    /// Uncompressed index pixels.
    Raw {
        width: u16,
        height: u16,
        #[cfg_attr(feature = "serde", serde(skip))]
        pixels: Vec<u8>,
    },
    /// Reuses the cel of another frame.
    Linked { frame_position: u16 },
    /// Index pixels, decompressed.
    CompressedImage {
        width: u16,
        height: u16,
        #[cfg_attr(feature = "serde", serde(skip))]
        pixels: Vec<u8>,
    },
    CompressedTilemap(Tilemap),
}

impl CelContent {
    pub fn cel_type(&self) -> CelType {
        match self {
            Self::Raw { .. } => CelType::Raw,
            Self::Linked { .. } => CelType::Linked,
            Self::CompressedImage { .. } => CelType::CompressedImage,
            Self::CompressedTilemap(_) => CelType::CompressedTilemap,
        }
    }
}

/// A decoded cel, keyed by its layer index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cel {
    pub layer_index: u16,
    pub x: i16,
    pub y: i16,
    pub opacity: u8,
    pub z_index: i16,
    pub content: CelContent,
}

impl Cel {
    /// Decode a cel payload.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let layer_index = reader.read_u16()?;
        let x = reader.read_i16()?;
        let y = reader.read_i16()?;
        let opacity = reader.read_u8()?;
        let cel_type = CelType::try_from(reader.read_u16()?)?;
        let z_index = reader.read_i16()?;
        reader.skip(5)?;

        let content = match cel_type {
            CelType::Raw => CelContent::Raw {
                width: reader.read_u16()?,
                height: reader.read_u16()?,
                pixels: reader.read_rest().to_vec(),
            },
            CelType::Linked => CelContent::Linked {
                frame_position: reader.read_u16()?,
            },
            CelType::CompressedImage => {
                let width = reader.read_u16()?;
                let height = reader.read_u16()?;
                CelContent::CompressedImage {
                    width,
                    height,
                    pixels: inflate(reader.read_rest(), "image cel")?,
                }
            }
            CelType::CompressedTilemap => CelContent::CompressedTilemap(Tilemap::read(&mut reader)?),
        };

        Ok(Self {
            layer_index,
            x,
            y,
            opacity,
            z_index,
            content,
        })
    }

    /// The tilemap payload, if this is a tilemap cel.
    pub fn tilemap(&self) -> Option<&Tilemap> {
        match &self.content {
            CelContent::CompressedTilemap(tilemap) => Some(tilemap),
            _ => None,
        }
    }
}
