//! Lode-VOC: Creative Voice (VOC) audio decoder for Lodestar
//!
//! This crate decodes the Creative Voice File format used by the original
//! game's digitized sound effects. It is a **pure decoder** - it turns raw
//! `.MNI`/`.VOC` bytes into PCM samples and leaves mixing, resampling and
//! playback to the caller.
//!
//! # Supported subset
//!
//! | Chunk type | Meaning            | Handling                       |
//! |------------|--------------------|--------------------------------|
//! | 0x00       | Terminator         | Stops decoding                 |
//! | 0x01       | Sound data         | 8-bit unsigned PCM, decoded    |
//! | 0x02       | Sound continuation | Appended to previous chunk     |
//! | 0x03..0x08 | Silence/marker/... | Skipped by declared length     |
//! | other      | Unknown            | `VocError::UnknownChunkType`   |
//!
//! Only codec 0 (8-bit unsigned PCM) is accepted; samples are widened to
//! signed 16-bit mono on output.
//!
//! # File layout
//!
//! ```text
//! Header (26 bytes):
//!   0x00: "Creative Voice File\x1A" (20 bytes)
//!   0x14: header size (u16 LE, offset of first chunk)
//!   0x16: format version (u16 LE)
//!   0x18: version checksum (u16 LE)
//!
//! Chunk (repeats):
//!   0x00: type (u8); type 0 has no length and ends the file
//!   0x01: payload length (u24 LE)
//!   0x04: payload
//! ```
//!
//! # Usage
//!
//! ```
//! use lode_voc::decode_voc;
//!
//! let mut voc = b"Creative Voice File\x1A".to_vec();
//! voc.extend_from_slice(&[26, 0, 0x0A, 0x01, 0x29, 0x11]);
//! voc.extend_from_slice(&[0x01, 4, 0, 0]); // sound data, 4 bytes
//! voc.extend_from_slice(&[0xA5, 0x00, 0x80, 0xFF]); // divisor, codec, samples
//! voc.push(0x00); // terminator
//!
//! let audio = decode_voc(&voc).unwrap();
//! assert_eq!(audio.sample_rate, 1_000_000 / (256 - 0xA5));
//! assert_eq!(audio.samples.len(), 2);
//! ```

mod decode;
mod error;

pub use decode::{decode_voc, VocAudio};
pub use error::VocError;

/// File magic at the start of every VOC file
pub const VOC_MAGIC: &[u8; 20] = b"Creative Voice File\x1A";

/// Size of the fixed file header (magic + header size + version + checksum)
pub const VOC_HEADER_SIZE: usize = 26;

/// Codec id for 8-bit unsigned PCM, the only codec the original assets use
pub const VOC_CODEC_PCM8: u8 = 0;
