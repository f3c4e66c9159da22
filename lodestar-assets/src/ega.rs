//! Planar (EGA) bitmap decoding
//!
//! Pixel data is stored as four sequential bit-planes, each holding one
//! bit per pixel in row-major order, packed 8 pixels per byte with the
//! leftmost pixel in the most significant bit. Bit *k* from plane *k*
//! combines into a 4-bit palette index per pixel.

use crate::consts::{EGA_PLANES, PIXELS_PER_PLANE_BYTE, TILE_BYTES, TILE_SIZE_PX};
use crate::error::{Error, Result};
use crate::palette::Palette16;
use crate::pixels::{Image, Rgba8};

/// How palette index 0 maps to alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Index 0 is an ordinary opaque color
    Unmasked,
    /// Index 0 decodes to zero alpha (transparent tiles and sprites)
    Masked,
}

/// Decode one plane-interleaved bitmap into an RGBA image
///
/// # Errors
/// `Error::Format` if `data` is not exactly `4 * width * height / 8` bytes.
pub fn decode_planar(
    data: &[u8],
    width_px: usize,
    height_px: usize,
    palette: &Palette16,
    mode: DecodeMode,
) -> Result<Image> {
    let pixel_count = width_px * height_px;
    if pixel_count % PIXELS_PER_PLANE_BYTE != 0 {
        return Err(Error::format(format!(
            "Planar bitmap of {}x{} px does not fill whole plane bytes",
            width_px, height_px
        )));
    }
    let plane_bytes = pixel_count / PIXELS_PER_PLANE_BYTE;
    let expected = plane_bytes * EGA_PLANES;
    if data.len() != expected {
        return Err(Error::format(format!(
            "Planar bitmap of {}x{} px needs {} bytes, got {}",
            width_px,
            height_px,
            expected,
            data.len()
        )));
    }

    let mut pixels = Vec::with_capacity(pixel_count);
    for pixel in 0..pixel_count {
        let byte = pixel / PIXELS_PER_PLANE_BYTE;
        let bit = 7 - (pixel % PIXELS_PER_PLANE_BYTE);

        let mut index = 0usize;
        for plane in 0..EGA_PLANES {
            let plane_bit = (data[plane * plane_bytes + byte] >> bit) & 1;
            index |= (plane_bit as usize) << plane;
        }

        pixels.push(apply_mode(palette[index], index, mode));
    }

    Ok(Image::from_pixels(width_px, height_px, pixels))
}

/// Decode consecutive fixed-size 8x8 tiles into one image
///
/// Tiles are placed left to right, wrapping to a new row after
/// `grid_width_in_tiles` tiles; the last row may be partially filled and
/// stays transparent past the final tile.
///
/// # Errors
/// `Error::Format` if the byte length is not a multiple of the 32-byte
/// tile size, or the grid width is zero.
pub fn decode_tiled_image(
    data: &[u8],
    grid_width_in_tiles: usize,
    palette: &Palette16,
    mode: DecodeMode,
) -> Result<Image> {
    if grid_width_in_tiles == 0 {
        return Err(Error::format("Tiled image grid width must be non-zero"));
    }
    if data.len() % TILE_BYTES != 0 {
        return Err(Error::format(format!(
            "Tiled image data length {} is not a multiple of the {}-byte tile size",
            data.len(),
            TILE_BYTES
        )));
    }

    let tile_count = data.len() / TILE_BYTES;
    let rows = tile_count.div_ceil(grid_width_in_tiles);
    let mut image = Image::new(
        grid_width_in_tiles * TILE_SIZE_PX,
        rows * TILE_SIZE_PX,
    );

    for (tile, tile_data) in data.chunks_exact(TILE_BYTES).enumerate() {
        let tile_image = decode_planar(tile_data, TILE_SIZE_PX, TILE_SIZE_PX, palette, mode)?;
        let x = (tile % grid_width_in_tiles) * TILE_SIZE_PX;
        let y = (tile / grid_width_in_tiles) * TILE_SIZE_PX;
        image.insert_image(x, y, &tile_image);
    }

    Ok(image)
}

fn apply_mode(color: Rgba8, index: usize, mode: DecodeMode) -> Rgba8 {
    match mode {
        DecodeMode::Unmasked => color,
        DecodeMode::Masked if index == 0 => Rgba8::TRANSPARENT,
        DecodeMode::Masked => color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::INGAME_PALETTE;

    /// One 8x8 tile whose first row has the leftmost pixel set in the
    /// given planes and every other pixel at index 0
    fn tile_with_first_pixel(index: u8) -> Vec<u8> {
        let mut data = vec![0u8; TILE_BYTES];
        for plane in 0..EGA_PLANES {
            if (index >> plane) & 1 == 1 {
                data[plane * 8] = 0b1000_0000;
            }
        }
        data
    }

    #[test]
    fn test_decode_planar_combines_plane_bits() {
        let data = tile_with_first_pixel(0b1010);
        let image = decode_planar(&data, 8, 8, &INGAME_PALETTE, DecodeMode::Unmasked).unwrap();

        assert_eq!(image.pixels().len(), 64);
        assert_eq!(image.pixels()[0], INGAME_PALETTE[0b1010]);
        assert_eq!(image.pixels()[1], INGAME_PALETTE[0]);
    }

    #[test]
    fn test_decode_planar_masked_zero_index() {
        let data = tile_with_first_pixel(5);
        let image = decode_planar(&data, 8, 8, &INGAME_PALETTE, DecodeMode::Masked).unwrap();

        assert_eq!(image.pixels()[0], INGAME_PALETTE[5]);
        assert_eq!(image.pixels()[1], Rgba8::TRANSPARENT);
        // Unmasked keeps index 0 opaque
        let opaque =
            decode_planar(&data, 8, 8, &INGAME_PALETTE, DecodeMode::Unmasked).unwrap();
        assert_eq!(opaque.pixels()[1], INGAME_PALETTE[0]);
    }

    #[test]
    fn test_decode_planar_wrong_length() {
        assert!(decode_planar(&[0u8; 31], 8, 8, &INGAME_PALETTE, DecodeMode::Unmasked).is_err());
        assert!(decode_planar(&[0u8; 33], 8, 8, &INGAME_PALETTE, DecodeMode::Unmasked).is_err());
    }

    #[test]
    fn test_decode_planar_rejects_unaligned_dimensions() {
        // 3x3 px would need fractional plane bytes; must fail, not panic
        let result = decode_planar(&[0u8; 4], 3, 3, &INGAME_PALETTE, DecodeMode::Unmasked);
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_tiled_image_geometry() {
        // 5 tiles at grid width 2 -> 3 rows, 16x24 px
        let data = vec![0u8; 5 * TILE_BYTES];
        let image =
            decode_tiled_image(&data, 2, &INGAME_PALETTE, DecodeMode::Unmasked).unwrap();
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), 24);
    }

    #[test]
    fn test_tiled_image_placement() {
        // Third tile lands at grid position (0, 1)
        let mut data = vec![0u8; 3 * TILE_BYTES];
        data[2 * TILE_BYTES..2 * TILE_BYTES + TILE_BYTES]
            .copy_from_slice(&tile_with_first_pixel(7));

        let image =
            decode_tiled_image(&data, 2, &INGAME_PALETTE, DecodeMode::Unmasked).unwrap();
        let pixel = image.pixels()[8 * image.width()];
        assert_eq!(pixel, INGAME_PALETTE[7]);
    }

    #[test]
    fn test_tiled_image_rejects_partial_tile() {
        let data = vec![0u8; TILE_BYTES + 1];
        assert!(decode_tiled_image(&data, 2, &INGAME_PALETTE, DecodeMode::Unmasked).is_err());
    }
}
