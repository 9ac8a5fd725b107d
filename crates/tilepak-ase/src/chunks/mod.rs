//! Typed chunk decoders.
//!
//! Each decoder takes the payload slice of one chunk (framing already
//! stripped) and returns the decoded entity. Payload shapes selected by an
//! integer tag are modelled as enums:
//!
//! - [`Palette`]: legacy packets or indexed entries
//! - [`TilesetSource`]: external reference or embedded pixels
//! - [`CelContent`]: raw, linked, compressed image or compressed tilemap

mod cel;
mod layer;
mod palette;
mod tileset;

pub use cel::{Cel, CelContent, CelType, Tilemap};
pub use layer::{Layer, LayerKind};
pub use palette::{IndexedPalette, LegacyPalette, Palette, PaletteEntry, PalettePacket, Rgb};
pub use tileset::{Tileset, TilesetSource};

/// Serialize raw name bytes as a lossy UTF-8 string.
#[cfg(feature = "serde")]
pub(crate) fn serialize_lossy<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

#[cfg(feature = "serde")]
pub(crate) fn serialize_lossy_opt<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match bytes {
        Some(bytes) => serializer.serialize_some(&*String::from_utf8_lossy(bytes)),
        None => serializer.serialize_none(),
    }
}
