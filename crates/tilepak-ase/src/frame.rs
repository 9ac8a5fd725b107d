//! Frame header and chunk-count reconciliation.

use tilepak_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

/// Wire layout of the 16-byte frame header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct RawFrameHeader {
    /// Bytes in this frame, header included.
    pub frame_size: u32,
    /// Magic number (0xF1FA).
    pub magic: u16,
    /// Chunk count from older writers; 0xFFFF when it overflowed.
    pub legacy_chunk_count: u16,
    /// Frame duration in milliseconds.
    pub duration: u16,
    pub reserved: [u8; 2],
    /// Chunk count from newer writers; 0 means "use the legacy field".
    pub chunk_count: u32,
}

impl RawFrameHeader {
    /// Size of the frame header on disk.
    pub const SIZE: usize = 16;
}

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameHeader {
    pub frame_size: u32,
    pub magic: u16,
    /// Reconciled chunk count.
    pub chunk_count: u32,
    pub duration: u16,
}

impl FrameHeader {
    /// Magic number at offset 4 of every frame.
    pub const MAGIC: u16 = 0xF1FA;

    /// Read and validate a frame header.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let raw: RawFrameHeader = reader.read_struct()?;

        let magic = raw.magic;
        if magic != Self::MAGIC {
            return Err(Error::InvalidMagic {
                block: "frame header",
                expected: Self::MAGIC,
                actual: magic,
            });
        }

        Ok(Self {
            frame_size: raw.frame_size,
            magic,
            chunk_count: reconcile_chunk_count(raw.legacy_chunk_count, raw.chunk_count)?,
            duration: raw.duration,
        })
    }
}

/// Legacy chunk count value meaning "see the modern field".
pub const LEGACY_CHUNK_COUNT_OVERFLOW: u16 = 0xFFFF;

/// Resolve the chunk count from the legacy u16 and modern u32 fields.
///
/// The modern field wins when non-zero. The pair must be consistent: equal,
/// or legacy overflowed with a non-zero modern count, or legacy in range
/// with a zero modern count.
pub fn reconcile_chunk_count(legacy: u16, modern: u32) -> Result<u32> {
    let consistent = u32::from(legacy) == modern
        || (legacy == LEGACY_CHUNK_COUNT_OVERFLOW && modern != 0)
        || (legacy < LEGACY_CHUNK_COUNT_OVERFLOW && modern == 0);

    if !consistent {
        return Err(Error::ChunkCountMismatch { legacy, modern });
    }

    Ok(if modern != 0 { modern } else { u32::from(legacy) })
}
