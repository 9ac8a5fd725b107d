//! File header.

use tilepak_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

/// Wire layout of the 128-byte file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct RawHeader {
    /// Total file size in bytes.
    pub file_size: u32,
    /// Magic number (0xA5E0).
    pub magic: u16,
    /// Number of frames.
    pub frames: u16,
    /// Canvas width in pixels.
    pub width: u16,
    /// Canvas height in pixels.
    pub height: u16,
    /// Bits per pixel (8 = indexed).
    pub color_depth: u16,
    /// Header flags.
    pub flags: u32,
    /// Deprecated animation speed.
    pub speed: u16,
    pub reserved0: [u8; 8],
    /// Palette index treated as transparent.
    pub transparent_index: u8,
    pub reserved1: [u8; 3],
    /// Number of palette colors (0 means 256).
    pub color_count: u16,
    /// Pixel aspect ratio numerator.
    pub pixel_width: u8,
    /// Pixel aspect ratio denominator.
    pub pixel_height: u8,
    pub grid_x: i16,
    pub grid_y: i16,
    pub grid_width: u16,
    pub grid_height: u16,
    pub reserved2: [u8; 84],
}

impl RawHeader {
    /// Size of the header on disk.
    pub const SIZE: usize = 128;
}

/// Decoded file header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    pub file_size: u32,
    pub magic: u16,
    pub frames: u16,
    pub width: u16,
    pub height: u16,
    pub color_depth: u16,
    pub flags: u32,
    pub speed: u16,
    pub transparent_index: u8,
    pub color_count: u16,
    pub pixel_width: u8,
    pub pixel_height: u8,
    pub grid_x: i16,
    pub grid_y: i16,
    pub grid_width: u16,
    pub grid_height: u16,
}

impl Header {
    /// Magic number at offset 4.
    pub const MAGIC: u16 = 0xA5E0;

    /// The only color depth this pipeline accepts.
    pub const INDEXED_COLOR_DEPTH: u16 = 8;

    /// Header flag: layer chunks carry a 16-byte UUID.
    pub const FLAG_LAYER_UUID: u32 = 1 << 3;

    /// Read and validate the header.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let raw: RawHeader = reader.read_struct()?;
        Self::from_raw(&raw)
    }

    /// Validate a raw header.
    pub fn from_raw(raw: &RawHeader) -> Result<Self> {
        let magic = raw.magic;
        if magic != Self::MAGIC {
            return Err(Error::InvalidMagic {
                block: "file header",
                expected: Self::MAGIC,
                actual: magic,
            });
        }

        let color_depth = raw.color_depth;
        if color_depth != Self::INDEXED_COLOR_DEPTH {
            return Err(Error::UnsupportedColorDepth(color_depth));
        }

        Ok(Self {
            file_size: raw.file_size,
            magic,
            frames: raw.frames,
            width: raw.width,
            height: raw.height,
            color_depth,
            flags: raw.flags,
            speed: raw.speed,
            transparent_index: raw.transparent_index,
            color_count: raw.color_count,
            pixel_width: raw.pixel_width,
            pixel_height: raw.pixel_height,
            grid_x: raw.grid_x,
            grid_y: raw.grid_y,
            grid_width: raw.grid_width,
            grid_height: raw.grid_height,
        })
    }

    /// Whether layer chunks end with a UUID.
    #[inline]
    pub fn layers_have_uuid(&self) -> bool {
        self.flags & Self::FLAG_LAYER_UUID != 0
    }
}
