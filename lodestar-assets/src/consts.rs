//! Fixed format knowledge for the original game's data files.
//!
//! Every offset, size and filename the decoders rely on lives here as
//! plain data, so the byte-level contracts are auditable in one place.

/// Width of the EGA viewport in pixels
pub const VIEWPORT_WIDTH_PX: usize = 320;

/// Height of the EGA viewport in pixels
pub const VIEWPORT_HEIGHT_PX: usize = 200;

/// Width of the viewport measured in 8x8 tiles
pub const VIEWPORT_WIDTH_TILES: usize = VIEWPORT_WIDTH_PX / TILE_SIZE_PX;

/// Edge length of one tile in pixels
pub const TILE_SIZE_PX: usize = 8;

/// Number of bit-planes in EGA pixel data (16-color images)
pub const EGA_PLANES: usize = 4;

/// Pixels packed into one plane byte
pub const PIXELS_PER_PLANE_BYTE: usize = 8;

/// Size of one planar 8x8 tile in bytes
pub const TILE_BYTES: usize = TILE_SIZE_PX * TILE_SIZE_PX * EGA_PLANES / PIXELS_PER_PLANE_BYTE;

/// Size of the planar pixel data of one fullscreen image in bytes
pub const FULLSCREEN_BITMAP_BYTES: usize =
    VIEWPORT_WIDTH_PX * VIEWPORT_HEIGHT_PX * EGA_PLANES / PIXELS_PER_PLANE_BYTE;

/// Name of the monolithic archive file holding nearly all assets
pub const ARCHIVE_FILENAME: &str = "NUKEM2.CMP";

/// Size of one archive directory entry: 12-byte name + offset + size
pub const ARCHIVE_ENTRY_BYTES: usize = 20;

/// Length of the name field inside an archive directory entry
pub const ARCHIVE_NAME_BYTES: usize = 12;

/// The anti-piracy screen, stored in its own non-planar layout
pub const ANTI_PIRACY_FILENAME: &str = "LCR.MNI";

/// Directory (below the game path) scanned for replacement assets
pub const ASSET_REPLACEMENTS_DIR: &str = "asset_replacements";

/// Tileset ("CZone") layout: split solid/masked tile regions preceded by
/// one attribute table covering both.
pub mod czone {
    use super::TILE_BYTES;

    /// Tiles without transparency, stored first
    pub const NUM_SOLID_TILES: usize = 1000;

    /// Tiles with transparency, stored after the solid ones
    pub const NUM_MASKED_TILES: usize = 160;

    /// Every tile in one tileset file
    pub const NUM_TILES_TOTAL: usize = NUM_SOLID_TILES + NUM_MASKED_TILES;

    /// Width of the assembled atlas in tiles
    pub const ATLAS_WIDTH_TILES: usize = 40;

    /// Extra bytes trailing each masked tile's attribute word
    pub const MASKED_ATTRIBUTE_EXTRA_BYTES: usize = 8;

    /// Total size of the attribute table in bytes
    pub const ATTRIBUTE_BYTES_TOTAL: usize =
        NUM_SOLID_TILES * 2 + NUM_MASKED_TILES * (2 + MASKED_ATTRIBUTE_EXTRA_BYTES);

    /// Size of the solid-tile pixel region in bytes
    pub const SOLID_TILES_BYTES: usize = NUM_SOLID_TILES * TILE_BYTES;
}

/// AdLib sound package file names inside the archive
pub mod audio {
    /// Dictionary of offsets into the sound data file
    pub const AUDIO_DICT_FILE: &str = "AUDIOHED.MNI";

    /// Concatenated AdLib sound entries
    pub const AUDIO_DATA_FILE: &str = "AUDIOT.MNI";

    /// Size of the instrument settings block in an AdLib sound header
    pub const INSTRUMENT_BYTES: usize = 16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_sizes() {
        assert_eq!(TILE_BYTES, 32);
        assert_eq!(FULLSCREEN_BITMAP_BYTES, 32000);
        assert_eq!(VIEWPORT_WIDTH_TILES, 40);
        assert_eq!(czone::ATTRIBUTE_BYTES_TOTAL, 3600);
        assert_eq!(czone::SOLID_TILES_BYTES, 32000);
    }
}
