//! The `ResourceLoader` facade
//!
//! Composes override resolution, archive lookup and the format decoders
//! into one public surface. Byte resolution for any logical name follows
//! a fixed priority:
//!
//! 1. an unpacked file at the exact archive-relative path under the game
//!    directory (used verbatim, no decoding of the override itself)
//! 2. the archive entry
//!
//! Pattern-based PNG replacements (tilesets, backdrops) apply only when
//! no unpacked file shadows the asset. The loader is read-only after
//! construction and holds no cache; every load returns a fresh value.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::audio::{AudioBuffer, AudioPackage, SoundId, Synthesizer};
use crate::consts::{
    audio::{AUDIO_DATA_FILE, AUDIO_DICT_FILE},
    ANTI_PIRACY_FILENAME, ARCHIVE_FILENAME, ASSET_REPLACEMENTS_DIR, FULLSCREEN_BITMAP_BYTES,
    VIEWPORT_HEIGHT_PX, VIEWPORT_WIDTH_PX, VIEWPORT_WIDTH_TILES,
};
use crate::ega::{decode_planar, decode_tiled_image, DecodeMode};
use crate::error::{Error, Result};
use crate::movie::{load_movie, Movie};
use crate::package::PackageIndex;
use crate::palette::{load_palette16, load_palette256, Palette16, INGAME_PALETTE};
use crate::pixels::Image;
use crate::replacements::{resolve_replacement, ReplacementSpec};
use crate::script::{load_scripts, ScriptBundle};
use crate::tileset::{load_tile_set, TileSet};

/// Facade over the archive, the override directory and all decoders
pub struct ResourceLoader {
    game_path: PathBuf,
    replacements_dir: PathBuf,
    package: PackageIndex,
    audio_package: AudioPackage,
    synthesizer: Box<dyn Synthesizer + Send + Sync>,
}

impl ResourceLoader {
    /// Open the archive under `game_path` and parse the AdLib package.
    ///
    /// The replacements directory defaults to
    /// `<game_path>/asset_replacements`.
    pub fn new(
        game_path: impl Into<PathBuf>,
        synthesizer: Box<dyn Synthesizer + Send + Sync>,
    ) -> Result<Self> {
        let game_path = game_path.into();
        let replacements_dir = game_path.join(ASSET_REPLACEMENTS_DIR);
        Self::with_replacements_dir(game_path, replacements_dir, synthesizer)
    }

    /// Like [`ResourceLoader::new`] with an explicit override directory
    pub fn with_replacements_dir(
        game_path: impl Into<PathBuf>,
        replacements_dir: impl Into<PathBuf>,
        synthesizer: Box<dyn Synthesizer + Send + Sync>,
    ) -> Result<Self> {
        let game_path = game_path.into();
        let package = PackageIndex::from_file(&game_path.join(ARCHIVE_FILENAME))?;

        let dict = read_via(&game_path, &package, AUDIO_DICT_FILE)?;
        let data = read_via(&game_path, &package, AUDIO_DATA_FILE)?;
        let audio_package = AudioPackage::from_files(&dict, &data)?;

        tracing::info!(
            entries = package.entry_count(),
            adlib_sounds = audio_package.len(),
            "Opened asset package"
        );

        Ok(Self {
            game_path,
            replacements_dir: replacements_dir.into(),
            package,
            audio_package,
            synthesizer,
        })
    }

    /// Raw bytes for a logical name: unpacked override first, then archive
    ///
    /// # Errors
    /// `Error::NotFound` if neither source has the asset.
    pub fn file(&self, name: &str) -> Result<Cow<'_, [u8]>> {
        let unpacked = self.game_path.join(name);
        if unpacked.exists() {
            tracing::debug!(name, "Using unpacked file override");
            let bytes = std::fs::read(&unpacked).map_err(|source| Error::Io {
                path: unpacked,
                source,
            })?;
            return Ok(Cow::Owned(bytes));
        }
        self.package.file(name).map(Cow::Borrowed)
    }

    /// `file()` decoded as text, for script bundles
    pub fn file_as_text(&self, name: &str) -> Result<String> {
        let bytes = self.file(name)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Whether `file()` would succeed for this name
    pub fn has_file(&self, name: &str) -> bool {
        self.game_path.join(name).exists() || self.package.has_file(name)
    }

    /// Tiled fullscreen image with the fixed in-game palette
    pub fn load_tiled_fullscreen_image(&self, name: &str) -> Result<Image> {
        self.load_tiled_fullscreen_image_with_palette(name, &INGAME_PALETTE)
    }

    /// Tiled fullscreen image with an explicit palette
    pub fn load_tiled_fullscreen_image_with_palette(
        &self,
        name: &str,
        palette: &Palette16,
    ) -> Result<Image> {
        let data = self.file(name)?;
        decode_tiled_image(&data, VIEWPORT_WIDTH_TILES, palette, DecodeMode::Unmasked)
    }

    /// Fullscreen image stored as one planar bitmap with its 16-color
    /// palette appended after the pixel data
    pub fn load_standalone_fullscreen_image(&self, name: &str) -> Result<Image> {
        let data = self.file(name)?;
        if data.len() < FULLSCREEN_BITMAP_BYTES {
            return Err(Error::format(format!(
                "Fullscreen image {} is only {} bytes",
                name,
                data.len()
            )));
        }
        let palette = load_palette16(&data[FULLSCREEN_BITMAP_BYTES..])?;
        decode_planar(
            &data[..FULLSCREEN_BITMAP_BYTES],
            VIEWPORT_WIDTH_PX,
            VIEWPORT_HEIGHT_PX,
            &palette,
            DecodeMode::Unmasked,
        )
    }

    /// The palette appended to a standalone fullscreen image
    pub fn load_palette_from_fullscreen_image(&self, name: &str) -> Result<Palette16> {
        let data = self.file(name)?;
        if data.len() < FULLSCREEN_BITMAP_BYTES {
            return Err(Error::format(format!(
                "Fullscreen image {} is only {} bytes",
                name,
                data.len()
            )));
        }
        load_palette16(&data[FULLSCREEN_BITMAP_BYTES..])
    }

    /// The anti-piracy screen, which uses its own layout: a leading
    /// 768-byte 256-color palette followed by one palette-index byte per
    /// pixel in linear order. Never unify this with the tiled path.
    pub fn load_anti_piracy_image(&self) -> Result<Image> {
        let data = self.file(ANTI_PIRACY_FILENAME)?;
        let pixel_count = VIEWPORT_WIDTH_PX * VIEWPORT_HEIGHT_PX;
        if data.len() != 256 * 3 + pixel_count {
            return Err(Error::format(format!(
                "Anti-piracy screen has {} bytes, expected {}",
                data.len(),
                256 * 3 + pixel_count
            )));
        }

        let palette = load_palette256(&data)?;
        let pixels = data[256 * 3..]
            .iter()
            .map(|&index| palette[index as usize])
            .collect();
        Ok(Image::from_pixels(
            VIEWPORT_WIDTH_PX,
            VIEWPORT_HEIGHT_PX,
            pixels,
        ))
    }

    /// Backdrop image, honoring `backdrop<n>.png` replacements
    pub fn load_backdrop(&self, name: &str) -> Result<Image> {
        if let Some(image) = self.pattern_replacement(name) {
            return Ok(image);
        }
        self.load_tiled_fullscreen_image(name)
    }

    /// Tileset with attributes, honoring `tileset<n>.png` replacements
    /// for the pixels only - attributes always decode from `file()` bytes
    pub fn load_tileset(&self, name: &str) -> Result<TileSet> {
        let replacement = self.pattern_replacement(name);
        let data = self.file(name)?;
        load_tile_set(&data, &INGAME_PALETTE, replacement)
    }

    /// Movie container; movies ship as standalone files next to the
    /// archive rather than inside it
    pub fn load_movie(&self, name: &str) -> Result<Movie> {
        let path = self.game_path.join(name);
        if !path.exists() {
            return Err(Error::NotFound(name.to_string()));
        }
        let data = std::fs::read(&path).map_err(|source| Error::Io { path, source })?;
        load_movie(&data)
    }

    /// Music as a parsed AdLib command stream
    pub fn load_music(&self, name: &str) -> Result<lode_imf::Song> {
        Ok(lode_imf::parse_imf(&self.file(name)?)?)
    }

    /// Sound effect for an id, following the fixed resolution order:
    /// intro-file table, then `SB_<n>.MNI` probe, then AdLib synthesis
    pub fn load_sound(&self, id: SoundId) -> Result<AudioBuffer> {
        if let Some(intro_file) = id.intro_sound_filename() {
            return self.load_sound_by_name(intro_file);
        }

        let digitized = id.digitized_sound_filename();
        if self.has_file(&digitized) {
            return self.load_sound_by_name(&digitized);
        }

        self.audio_package
            .load_adlib_sound(id, self.synthesizer.as_ref())
    }

    /// VOC-decode a named sound file
    pub fn load_sound_by_name(&self, name: &str) -> Result<AudioBuffer> {
        let audio = lode_voc::decode_voc(&self.file(name)?)?;
        Ok(audio.into())
    }

    /// Parse a script bundle file
    pub fn load_script_bundle(&self, name: &str) -> Result<ScriptBundle> {
        load_scripts(&self.file_as_text(name)?)
    }

    /// Pattern-based PNG replacement for a logical name, unless an
    /// unpacked file shadows the asset entirely
    fn pattern_replacement(&self, name: &str) -> Option<Image> {
        if self.game_path.join(name).exists() {
            return None;
        }
        let spec = ReplacementSpec::for_asset_name(name)?;
        resolve_replacement(&self.replacements_dir, &spec)
    }

    /// Replacement image for an actor animation frame, used by the
    /// sprite loader; same convention and directory as the other specs
    pub fn actor_frame_replacement(&self, actor_id: u32, frame: u32) -> Option<Image> {
        resolve_replacement(
            &self.replacements_dir,
            &ReplacementSpec::ActorFrame { actor_id, frame },
        )
    }

    /// Directory scanned for pattern-based replacement files
    /// (`tileset<N>.png` and friends), exposed for sibling loaders
    pub fn replacements_dir(&self) -> &Path {
        &self.replacements_dir
    }
}

/// Resolve a file during construction, before `self` exists
fn read_via<'a>(game_path: &Path, package: &'a PackageIndex, name: &str) -> Result<Cow<'a, [u8]>> {
    let unpacked = game_path.join(name);
    if unpacked.exists() {
        let bytes = std::fs::read(&unpacked).map_err(|source| Error::Io {
            path: unpacked,
            source,
        })?;
        return Ok(Cow::Owned(bytes));
    }
    package.file(name).map(Cow::Borrowed)
}

// Integration-style tests live in tests/loader.rs; they need tempdirs
// with a synthetic archive and override files.
