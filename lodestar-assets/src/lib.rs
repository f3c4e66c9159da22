//! Lodestar-Assets: asset decoding and replacement pipeline
//!
//! This crate turns the original game's proprietary packed data files
//! into renderer- and audio-ready in-memory resources:
//!
//! - **Archive container**: one monolithic package file with an internal
//!   name directory ([`package`])
//! - **Palettes**: 6-bit-per-channel VGA palettes in 16- and 256-color
//!   variants ([`palette`])
//! - **Planar bitmaps**: EGA plane-interleaved pixel data, tiled or
//!   fullscreen ([`ega`])
//! - **Tile sets**: split solid/masked atlases with per-tile attribute
//!   words ([`tileset`])
//! - **Audio**: digitized VOC effects (`lode-voc`), AdLib music streams
//!   (`lode-imf`) and the synthesized sound package ([`audio`])
//! - **Movies and scripts**: leaf containers for cutscenes and menu
//!   text ([`movie`], [`script`])
//!
//! [`ResourceLoader`] is the facade over all of it, including the user
//! replacement mechanism: files in an override directory transparently
//! substitute individual assets by name or by derived filename
//! ([`replacements`]).
//!
//! # Design notes
//!
//! - Every load returns a fresh value; the crate holds no cache.
//! - All lookups are synchronous reads over immutable bytes, so sharing
//!   one loader across threads is safe as long as the data files are not
//!   mutated externally.
//! - Decode failures surface immediately as typed [`Error`] values; the
//!   only silent fallback is a malformed pattern-based replacement file,
//!   which is treated as absent by design.

pub mod audio;
pub mod bytes;
pub mod consts;
pub mod ega;
pub mod error;
pub mod loader;
pub mod movie;
pub mod package;
pub mod palette;
pub mod pixels;
pub mod replacements;
pub mod script;
pub mod tileset;

pub use audio::{AdlibSound, AudioBuffer, AudioPackage, InstrumentSettings, SoundId, Synthesizer};
pub use ega::{decode_planar, decode_tiled_image, DecodeMode};
pub use error::{Error, Result};
pub use loader::ResourceLoader;
pub use movie::{load_movie, Movie, MovieFrame};
pub use package::PackageIndex;
pub use palette::{
    expand_6bit, load_palette16, load_palette256, Palette16, Palette256, INGAME_PALETTE,
};
pub use pixels::{Image, Rgba8};
pub use replacements::ReplacementSpec;
pub use script::{load_scripts, Script, ScriptBundle, Statement};
pub use tileset::{load_tile_attributes, load_tile_set, TileAttributes, TileSet};

// Re-export the codec crates' entry points for convenience
pub use lode_imf::{parse_imf, ImfEvent, Song};
pub use lode_voc::{decode_voc, VocAudio};
