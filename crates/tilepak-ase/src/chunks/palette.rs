//! Palette chunks in their two historical encodings.

use tilepak_common::BinaryReader;

use crate::{Error, Result};

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// One packet of the legacy palette chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PalettePacket {
    pub colors: Vec<Rgb>,
}

/// Legacy palette chunk (`0x0004`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LegacyPalette {
    pub packets: Vec<PalettePacket>,
}

impl LegacyPalette {
    /// Decode a legacy palette payload.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let packet_count = reader.read_u16()?;
        let mut packets = Vec::with_capacity(packet_count as usize);

        for _ in 0..packet_count {
            let skip = reader.read_u8()?;
            if skip != 0 {
                return Err(Error::PaletteSkip(skip));
            }

            let color_count = reader.read_u8()?;
            let mut colors = Vec::with_capacity(color_count as usize);
            for _ in 0..color_count {
                let [red, green, blue] = reader.read_array::<3>()?;
                colors.push(Rgb { red, green, blue });
            }

            packets.push(PalettePacket { colors });
        }

        Ok(Self { packets })
    }
}

/// One entry of the indexed palette chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PaletteEntry {
    pub flags: u16,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    #[cfg_attr(feature = "serde", serde(serialize_with = "super::serialize_lossy_opt"))]
    pub name: Option<Vec<u8>>,
}

impl PaletteEntry {
    /// Entry flag: a name string follows the color.
    pub const FLAG_HAS_NAME: u16 = 1 << 0;

    fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let flags = reader.read_u16()?;
        let [red, green, blue, alpha] = reader.read_array::<4>()?;
        let name = if flags & Self::FLAG_HAS_NAME != 0 {
            Some(reader.read_pascal_string()?.to_vec())
        } else {
            None
        };

        Ok(Self {
            flags,
            red,
            green,
            blue,
            alpha,
            name,
        })
    }

    /// The color without alpha.
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.red, self.green, self.blue)
    }
}

/// Indexed palette chunk (`0x2019`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexedPalette {
    pub new_size: u32,
    pub first_index: u32,
    /// Inclusive.
    pub last_index: u32,
    pub entries: Vec<PaletteEntry>,
}

impl IndexedPalette {
    /// Decode an indexed palette payload.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let new_size = reader.read_u32()?;
        let first_index = reader.read_u32()?;
        let last_index = reader.read_u32()?;
        reader.skip(8)?;

        if last_index < first_index {
            return Err(Error::InvalidPaletteRange {
                first: first_index,
                last: last_index,
            });
        }

        let count = u64::from(last_index - first_index) + 1;
        let mut entries = Vec::new();
        for _ in 0..count {
            entries.push(PaletteEntry::read(&mut reader)?);
        }

        Ok(Self {
            new_size,
            first_index,
            last_index,
            entries,
        })
    }
}

/// The single palette of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "encoding", rename_all = "snake_case"))]
pub enum Palette {
    Legacy(LegacyPalette),
    Indexed(IndexedPalette),
}

impl Palette {
    /// Number of colors carried by the chunk.
    pub fn color_count(&self) -> usize {
        match self {
            Self::Legacy(legacy) => legacy.packets.iter().map(|p| p.colors.len()).sum(),
            Self::Indexed(indexed) => indexed.entries.len(),
        }
    }
}
