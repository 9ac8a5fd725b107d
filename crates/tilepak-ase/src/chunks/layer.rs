//! Layer chunk (`0x2004`).

use tilepak_common::{BinaryReader, Uuid};

use crate::Result;

/// Layer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayerKind {
    Image,
    Group,
    Tilemap,
    Other(u16),
}

impl LayerKind {
    pub const IMAGE: u16 = 0;
    pub const GROUP: u16 = 1;
    pub const TILEMAP: u16 = 2;

    pub fn from_code(code: u16) -> Self {
        match code {
            Self::IMAGE => Self::Image,
            Self::GROUP => Self::Group,
            Self::TILEMAP => Self::Tilemap,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Self::Image => Self::IMAGE,
            Self::Group => Self::GROUP,
            Self::Tilemap => Self::TILEMAP,
            Self::Other(code) => code,
        }
    }
}

/// A decoded layer. Its index is its position in the layer list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Layer {
    pub flags: u16,
    pub kind: LayerKind,
    /// Nesting depth below group layers.
    pub child_level: u16,
    pub default_width: u16,
    pub default_height: u16,
    pub blend_mode: u16,
    pub opacity: u8,
    #[cfg_attr(feature = "serde", serde(serialize_with = "super::serialize_lossy"))]
    pub name: Vec<u8>,
    /// Present only for tilemap layers.
    pub tileset_index: Option<u32>,
    /// Present only when the file header sets the layer UUID flag.
    pub uuid: Option<Uuid>,
}

impl Layer {
    /// Decode a layer payload.
    pub fn parse(data: &[u8], has_uuid: bool) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let flags = reader.read_u16()?;
        let kind = LayerKind::from_code(reader.read_u16()?);
        let child_level = reader.read_u16()?;
        let default_width = reader.read_u16()?;
        let default_height = reader.read_u16()?;
        let blend_mode = reader.read_u16()?;
        let opacity = reader.read_u8()?;
        reader.skip(3)?;
        let name = reader.read_pascal_string()?.to_vec();

        let tileset_index = match kind {
            LayerKind::Tilemap => Some(reader.read_u32()?),
            _ => None,
        };
        let uuid = if has_uuid {
            Some(reader.read_uuid()?)
        } else {
            None
        };

        Ok(Self {
            flags,
            kind,
            child_level,
            default_width,
            default_height,
            blend_mode,
            opacity,
            name,
            tileset_index,
            uuid,
        })
    }

    #[inline]
    pub fn is_tilemap(&self) -> bool {
        self.kind == LayerKind::Tilemap
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
    fn test_tilemap_layer() {
        let payload = testutil::layer_payload(LayerKind::TILEMAP, b"bg", Some(3), None);
        let layer = Layer::parse(&payload, false).unwrap();

        assert!(layer.is_tilemap());
        assert_eq!(layer.name_lossy(), "bg");
        assert_eq!(layer.tileset_index, Some(3));
        assert_eq!(layer.opacity, 255);
        assert_eq!(layer.uuid, None);
    }

    #[test]
    fn test_image_layer_has_no_tileset_index() {
        let payload = testutil::layer_payload(LayerKind::IMAGE, b"sprite", None, None);
        let layer = Layer::parse(&payload, false).unwrap();

        assert_eq!(layer.kind, LayerKind::Image);
        assert_eq!(layer.tileset_index, None);
    }

    #[test]
    fn test_layer_uuid_follows_flag() {
        let uuid = Uuid::from_bytes([0xAB; 16]);
        let payload = testutil::layer_payload(LayerKind::TILEMAP, b"fg", Some(0), Some(uuid));

        let layer = Layer::parse(&payload, true).unwrap();
        assert_eq!(layer.uuid, Some(uuid));
        assert_eq!(layer.tileset_index, Some(0));

        // Without the header flag the trailing bytes are left unread.
        let layer = Layer::parse(&payload, false).unwrap();
        assert_eq!(layer.uuid, None);
    }

    #[test]
    fn test_layer_missing_uuid() {
        let payload = testutil::layer_payload(LayerKind::IMAGE, b"x", None, None);
        assert!(Layer::parse(&payload, true).is_err());
    }

    #[test]
    fn test_unknown_layer_kind() {
        assert_eq!(LayerKind::from_code(9), LayerKind::Other(9));
        assert_eq!(LayerKind::Other(9).code(), 9);
    }
}
