//! Tile set ("CZone") decoding: attribute table + split tile atlas
//!
//! A tileset file lays out `[attribute table][solid tile pixels][masked
//! tile pixels]`. The attribute table covers all 1160 tiles; masked-tile
//! entries carry 8 extra bytes that are consumed but not retained. The
//! two pixel regions are decoded separately and stacked into a single
//! composite atlas, solid tiles on top.

use crate::bytes::ByteReader;
use crate::consts::czone;
use crate::ega::{decode_tiled_image, DecodeMode};
use crate::error::{Error, Result};
use crate::palette::Palette16;
use crate::pixels::Image;

/// Per-tile 16-bit flag words, indexed by tile id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileAttributes {
    flags: Vec<u16>,
}

impl TileAttributes {
    /// Flag word for one tile
    ///
    /// # Errors
    /// `Error::OutOfBounds` if `tile` is not a valid tile id.
    pub fn flags(&self, tile: usize) -> Result<u16> {
        self.flags
            .get(tile)
            .copied()
            .ok_or(Error::OutOfBounds {
                index: tile,
                limit: self.flags.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_solid_top(&self, tile: usize) -> Result<bool> {
        Ok(self.flags(tile)? & 0x0001 != 0)
    }

    pub fn is_solid_bottom(&self, tile: usize) -> Result<bool> {
        Ok(self.flags(tile)? & 0x0002 != 0)
    }

    pub fn is_solid_left(&self, tile: usize) -> Result<bool> {
        Ok(self.flags(tile)? & 0x0004 != 0)
    }

    pub fn is_solid_right(&self, tile: usize) -> Result<bool> {
        Ok(self.flags(tile)? & 0x0008 != 0)
    }

    pub fn is_animated(&self, tile: usize) -> Result<bool> {
        Ok(self.flags(tile)? & 0x0010 != 0)
    }

    pub fn is_foreground(&self, tile: usize) -> Result<bool> {
        Ok(self.flags(tile)? & 0x0080 != 0)
    }

    pub fn is_climbable(&self, tile: usize) -> Result<bool> {
        Ok(self.flags(tile)? & 0x0400 != 0)
    }
}

/// A decoded tileset: composite atlas image plus per-tile attributes
#[derive(Debug, Clone)]
pub struct TileSet {
    pub image: Image,
    pub attributes: TileAttributes,
}

/// Decode the attribute table at the start of a tileset file
///
/// Solid-tile entries are 2 bytes; masked-tile entries are 2 bytes of
/// flags plus 8 bytes consumed from the stream but not retained.
pub fn load_tile_attributes(data: &[u8]) -> Result<TileAttributes> {
    let mut reader = ByteReader::new(data);
    let mut flags = Vec::with_capacity(czone::NUM_TILES_TOTAL);

    for tile in 0..czone::NUM_TILES_TOTAL {
        flags.push(reader.read_u16()?);
        if tile >= czone::NUM_SOLID_TILES {
            reader.skip(czone::MASKED_ATTRIBUTE_EXTRA_BYTES)?;
        }
    }

    Ok(TileAttributes { flags })
}

/// Assemble a full tileset from raw archive bytes
///
/// When `replacement_image` is given (a user-supplied atlas PNG), pixel
/// decoding is skipped entirely - but the attribute table still comes
/// from the archive bytes, since attributes are never replaceable.
pub fn load_tile_set(
    data: &[u8],
    palette: &Palette16,
    replacement_image: Option<Image>,
) -> Result<TileSet> {
    let attributes = load_tile_attributes(data)?;

    if let Some(image) = replacement_image {
        return Ok(TileSet { image, attributes });
    }

    let pixel_data = &data[czone::ATTRIBUTE_BYTES_TOTAL..];
    let expected = czone::NUM_TILES_TOTAL * crate::consts::TILE_BYTES;
    if pixel_data.len() != expected {
        return Err(Error::format(format!(
            "Tileset pixel region is {} bytes, expected {}",
            pixel_data.len(),
            expected
        )));
    }

    let (solid_data, masked_data) = pixel_data.split_at(czone::SOLID_TILES_BYTES);
    let solid = decode_tiled_image(
        solid_data,
        czone::ATLAS_WIDTH_TILES,
        palette,
        DecodeMode::Unmasked,
    )?;
    let masked = decode_tiled_image(
        masked_data,
        czone::ATLAS_WIDTH_TILES,
        palette,
        DecodeMode::Masked,
    )?;

    let mut image = Image::new(solid.width(), solid.height() + masked.height());
    image.insert_image(0, 0, &solid);
    image.insert_image(0, solid.height(), &masked);

    Ok(TileSet { image, attributes })
}
