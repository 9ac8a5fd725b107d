//! Chunk framing and type codes.

use std::fmt;

use tilepak_common::BinaryReader;

use crate::{Error, Result};

/// Size of the chunk framing (u32 size + u16 type).
pub const CHUNK_HEADER_SIZE: u32 = 6;

/// Chunk type codes routed by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    /// `0x0004`: packed RGB palette packets.
    LegacyPalette,
    /// `0x2004`
    Layer,
    /// `0x2005`
    Cel,
    /// `0x2019`: indexed palette with RGBA entries.
    Palette,
    /// `0x2020`: attached user data, ignored.
    UserData,
    /// `0x2023`
    Tileset,
    /// Anything this decoder does not understand.
    Unknown(u16),
}

impl ChunkKind {
    pub const LEGACY_PALETTE: u16 = 0x0004;
    pub const LAYER: u16 = 0x2004;
    pub const CEL: u16 = 0x2005;
    pub const PALETTE: u16 = 0x2019;
    pub const USER_DATA: u16 = 0x2020;
    pub const TILESET: u16 = 0x2023;

    /// Map a wire type code to a kind.
    pub fn from_code(code: u16) -> Self {
        match code {
            Self::LEGACY_PALETTE => Self::LegacyPalette,
            Self::LAYER => Self::Layer,
            Self::CEL => Self::Cel,
            Self::PALETTE => Self::Palette,
            Self::USER_DATA => Self::UserData,
            Self::TILESET => Self::Tileset,
            other => Self::Unknown(other),
        }
    }

    /// The wire type code.
    pub fn code(self) -> u16 {
        match self {
            Self::LegacyPalette => Self::LEGACY_PALETTE,
            Self::Layer => Self::LAYER,
            Self::Cel => Self::CEL,
            Self::Palette => Self::PALETTE,
            Self::UserData => Self::USER_DATA,
            Self::Tileset => Self::TILESET,
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LegacyPalette => write!(f, "legacy palette"),
            Self::Layer => write!(f, "layer"),
            Self::Cel => write!(f, "cel"),
            Self::Palette => write!(f, "palette"),
            Self::UserData => write!(f, "user data"),
            Self::Tileset => write!(f, "tileset"),
            Self::Unknown(code) => write!(f, "unknown ({:#06x})", code),
        }
    }
}

/// A framed chunk borrowing its payload from the input buffer.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    /// Declared size including the 6-byte framing.
    pub size: u32,
    pub kind: ChunkKind,
    /// The `size - 6` payload bytes.
    pub data: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Read one chunk and advance past its payload.
    pub fn read(reader: &mut BinaryReader<'a>) -> Result<Self> {
        let size = reader.read_u32()?;
        let code = reader.read_u16()?;

        if size < CHUNK_HEADER_SIZE {
            return Err(Error::ChunkTooSmall(size));
        }

        let data = reader.read_bytes((size - CHUNK_HEADER_SIZE) as usize)?;

        Ok(Self {
            size,
            kind: ChunkKind::from_code(code),
            data,
        })
    }
}
