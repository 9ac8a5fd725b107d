//! Palette repacking to 15-bit BGR colors.

use byteorder::{BigEndian, WriteBytesExt};
use tilepak_ase::{Palette, Rgb};

use crate::{Error, Result};

/// Pack an 8-bit RGB triple into 15 bits: red in bits 0-4, green in 5-9,
/// blue in 10-14. The low 3 bits of each channel are dropped.
#[inline]
pub const fn pack_bgr555(color: Rgb) -> u16 {
    ((color.red as u16) >> 3) | (((color.green as u16) >> 3) << 5) | (((color.blue as u16) >> 3) << 10)
}

/// Expand a packed color back to 8-bit channels with zeroed low bits.
#[inline]
pub const fn unpack_bgr555(packed: u16) -> Rgb {
    Rgb {
        red: ((packed & 0x1F) << 3) as u8,
        green: (((packed >> 5) & 0x1F) << 3) as u8,
        blue: (((packed >> 10) & 0x1F) << 3) as u8,
    }
}

/// Serialize a palette as big-endian packed colors.
///
/// Legacy palettes contribute the colors of their first packet only.
/// Indexed palettes must start at index 0.
pub fn pack_palette(palette: &Palette) -> Result<Vec<u8>> {
    match palette {
        Palette::Legacy(legacy) => {
            let colors = legacy
                .packets
                .first()
                .map(|packet| packet.colors.as_slice())
                .unwrap_or_default();
            write_colors(colors.iter().copied())
        }
        Palette::Indexed(indexed) => {
            if indexed.first_index != 0 {
                return Err(Error::PaletteNotZeroBased(indexed.first_index));
            }
            write_colors(indexed.entries.iter().map(|entry| entry.rgb()))
        }
    }
}

fn write_colors(colors: impl ExactSizeIterator<Item = Rgb>) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(colors.len() * 2);
    for color in colors {
        out.write_u16::<BigEndian>(pack_bgr555(color))?;
    }
    Ok(out)
}
