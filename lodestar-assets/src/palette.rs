//! 6-bit VGA palette decoding
//!
//! All palettes in the data files store 6 bits per channel (0..=63).
//! Channels are scaled to 8 bits with exact rounding; the formula is part
//! of the external contract and must not drift, or decoded pixels stop
//! matching the reference output.

use crate::error::{Error, Result};
use crate::pixels::Rgba8;

/// Fixed-length 16-color palette
pub type Palette16 = [Rgba8; 16];

/// Fixed-length 256-color palette
pub type Palette256 = Box<[Rgba8; 256]>;

/// Scale one 6-bit channel value to 8 bits: `round(value * 255 / 63)`
pub const fn expand_6bit(value: u8) -> u8 {
    ((value as u16 * 255 + 31) / 63) as u8
}

const fn color_6bit(r: u8, g: u8, b: u8) -> Rgba8 {
    Rgba8::opaque(expand_6bit(r), expand_6bit(g), expand_6bit(b))
}

/// The fixed 16-color palette used by in-game graphics (tile sets, tiled
/// fullscreen images without an embedded palette).
pub const INGAME_PALETTE: Palette16 = [
    color_6bit(0, 0, 0),
    color_6bit(0, 0, 42),
    color_6bit(0, 42, 0),
    color_6bit(0, 42, 42),
    color_6bit(42, 0, 0),
    color_6bit(42, 0, 42),
    color_6bit(42, 21, 0),
    color_6bit(42, 42, 42),
    color_6bit(21, 21, 21),
    color_6bit(21, 21, 63),
    color_6bit(21, 63, 21),
    color_6bit(21, 63, 63),
    color_6bit(63, 21, 21),
    color_6bit(63, 21, 63),
    color_6bit(63, 63, 21),
    color_6bit(63, 63, 63),
];

fn decode_triplet(triplet: &[u8]) -> Rgba8 {
    Rgba8::opaque(
        expand_6bit(triplet[0]),
        expand_6bit(triplet[1]),
        expand_6bit(triplet[2]),
    )
}

/// Decode a 16-color palette from exactly 48 leading bytes
///
/// # Errors
/// `Error::Format` if fewer than 48 bytes remain.
pub fn load_palette16(data: &[u8]) -> Result<Palette16> {
    if data.len() < 16 * 3 {
        return Err(Error::format(format!(
            "16-color palette needs 48 bytes, got {}",
            data.len()
        )));
    }

    let mut palette = [Rgba8::TRANSPARENT; 16];
    for (color, triplet) in palette.iter_mut().zip(data.chunks_exact(3)) {
        *color = decode_triplet(triplet);
    }
    Ok(palette)
}

/// Decode a 256-color palette from exactly 768 leading bytes
///
/// # Errors
/// `Error::Format` if fewer than 768 bytes remain.
pub fn load_palette256(data: &[u8]) -> Result<Palette256> {
    if data.len() < 256 * 3 {
        return Err(Error::format(format!(
            "256-color palette needs 768 bytes, got {}",
            data.len()
        )));
    }

    let mut palette = Box::new([Rgba8::TRANSPARENT; 256]);
    for (color, triplet) in palette.iter_mut().zip(data.chunks_exact(3)) {
        *color = decode_triplet(triplet);
    }
    Ok(palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_6bit_endpoints() {
        assert_eq!(expand_6bit(0), 0);
        assert_eq!(expand_6bit(63), 255);
    }

    #[test]
    fn test_expand_6bit_rounds() {
        // Exact reference formula over the whole input range
        for value in 0u8..=63 {
            let exact = f64::from(value) * 255.0 / 63.0;
            assert_eq!(expand_6bit(value), exact.round() as u8);
        }
    }

    #[test]
    fn test_expand_6bit_monotonic() {
        for value in 1u8..=63 {
            assert!(expand_6bit(value) > expand_6bit(value - 1));
        }
    }

    #[test]
    fn test_load_palette16() {
        let mut data = vec![0u8; 48];
        data[3] = 63; // color 1 = pure red

        let palette = load_palette16(&data).unwrap();
        assert_eq!(palette[0], Rgba8::opaque(0, 0, 0));
        assert_eq!(palette[1], Rgba8::opaque(255, 0, 0));
    }

    #[test]
    fn test_load_palette16_ignores_trailing_bytes() {
        let data = vec![21u8; 60];
        let palette = load_palette16(&data).unwrap();
        assert_eq!(palette[15], Rgba8::opaque(85, 85, 85));
    }

    #[test]
    fn test_load_palette_truncated() {
        assert!(load_palette16(&[0u8; 47]).is_err());
        assert!(load_palette256(&[0u8; 767]).is_err());
    }

    #[test]
    fn test_load_palette256() {
        let mut data = vec![0u8; 768];
        data[765] = 63;
        data[766] = 63;
        data[767] = 63;

        let palette = load_palette256(&data).unwrap();
        assert_eq!(palette[255], Rgba8::opaque(255, 255, 255));
        assert_eq!(palette.len(), 256);
    }
}
