//! RGBA pixel buffer handed to the renderer

/// One RGBA color value, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Row-major RGBA image of `width * height` pixels.
///
/// Decoded assets are fresh `Image` values; nothing in this crate caches
/// or shares pixel storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Rgba8>,
}

impl Image {
    /// Create a fully transparent image
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; width * height],
        }
    }

    /// Wrap an existing pixel buffer; `pixels.len()` must be `width * height`
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Blit `source` into this image with its top-left corner at (x, y).
    ///
    /// The caller guarantees the source fits; this is an internal assembly
    /// step, not a clipped drawing routine.
    pub fn insert_image(&mut self, x: usize, y: usize, source: &Image) {
        debug_assert!(x + source.width <= self.width);
        debug_assert!(y + source.height <= self.height);

        for row in 0..source.height {
            let src_start = row * source.width;
            let dst_start = (y + row) * self.width + x;
            self.pixels[dst_start..dst_start + source.width]
                .copy_from_slice(&source.pixels[src_start..src_start + source.width]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_transparent() {
        let image = Image::new(4, 2);
        assert_eq!(image.pixels().len(), 8);
        assert!(image.pixels().iter().all(|&p| p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_insert_image() {
        let mut target = Image::new(4, 4);
        let red = Rgba8::opaque(255, 0, 0);
        let source = Image::from_pixels(2, 2, vec![red; 4]);

        target.insert_image(1, 2, &source);

        assert_eq!(target.pixels()[2 * 4 + 1], red);
        assert_eq!(target.pixels()[3 * 4 + 2], red);
        assert_eq!(target.pixels()[0], Rgba8::TRANSPARENT);
    }
}
