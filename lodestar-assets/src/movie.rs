//! Movie container decoding
//!
//! Movies are stored as a plain frame sequence: every frame carries its
//! own 16-color palette (48 bytes) followed by one planar fullscreen
//! bitmap (32000 bytes). Playback timing is the presenter's concern.

use crate::consts::{FULLSCREEN_BITMAP_BYTES, VIEWPORT_HEIGHT_PX, VIEWPORT_WIDTH_PX};
use crate::ega::{decode_planar, DecodeMode};
use crate::error::{Error, Result};
use crate::palette::{load_palette16, Palette16};
use crate::pixels::Image;

/// Size of one serialized movie frame
const FRAME_BYTES: usize = 16 * 3 + FULLSCREEN_BITMAP_BYTES;

/// One decoded movie frame
#[derive(Debug, Clone)]
pub struct MovieFrame {
    pub palette: Palette16,
    pub image: Image,
}

/// A fully decoded movie
#[derive(Debug, Clone)]
pub struct Movie {
    pub frames: Vec<MovieFrame>,
}

/// Decode a movie container
///
/// # Errors
/// `Error::Format` if the file is empty or its length is not a whole
/// number of frames.
pub fn load_movie(data: &[u8]) -> Result<Movie> {
    if data.is_empty() || data.len() % FRAME_BYTES != 0 {
        return Err(Error::format(format!(
            "Movie length {} is not a whole number of {}-byte frames",
            data.len(),
            FRAME_BYTES
        )));
    }

    let frames = data
        .chunks_exact(FRAME_BYTES)
        .map(|frame| {
            let palette = load_palette16(frame)?;
            let image = decode_planar(
                &frame[16 * 3..],
                VIEWPORT_WIDTH_PX,
                VIEWPORT_HEIGHT_PX,
                &palette,
                DecodeMode::Unmasked,
            )?;
            Ok(MovieFrame { palette, image })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Movie { frames })
}
