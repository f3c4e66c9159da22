//! Lode-IMF: AdLib command stream (IMF) music parser for Lodestar
//!
//! The original game's music files are type-0 IMF streams: a headerless
//! sequence of OPL2 register writes, each paired with a delay measured in
//! ticks of the song's fixed playback rate. This crate parses the stream
//! into an event list; driving an OPL2 emulator with it is the audio
//! subsystem's job.
//!
//! # Stream layout
//!
//! ```text
//! Event (4 bytes, repeats to end of file):
//!   0x00: OPL2 register index (u8)
//!   0x01: value written to the register (u8)
//!   0x02: delay in ticks after the write (u16 LE)
//! ```
//!
//! # Usage
//!
//! ```
//! use lode_imf::parse_imf;
//!
//! let song = parse_imf(&[0xB0, 0x31, 0x08, 0x00]).unwrap();
//! assert_eq!(song.events.len(), 1);
//! assert_eq!(song.events[0].delay, 8);
//! ```

use core::fmt;

/// Size of one IMF event in bytes
pub const IMF_EVENT_SIZE: usize = 4;

/// Playback rate of the original game's songs in ticks per second
pub const IMF_TICK_RATE: u32 = 280;

/// One OPL2 register write plus the delay that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImfEvent {
    /// OPL2 register index
    pub register: u8,
    /// Value written to the register
    pub value: u8,
    /// Ticks to wait after the write before the next event
    pub delay: u16,
}

/// A parsed song: the full event sequence of one IMF stream
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Song {
    /// Register writes in playback order
    pub events: Vec<ImfEvent>,
}

impl Song {
    /// Total length of the song in ticks at [`IMF_TICK_RATE`]
    pub fn duration_ticks(&self) -> u64 {
        self.events.iter().map(|event| u64::from(event.delay)).sum()
    }
}

/// IMF parsing error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImfError {
    /// Stream length is not a multiple of the 4-byte event size
    MisalignedStream(usize),
}

impl fmt::Display for ImfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImfError::MisalignedStream(len) => {
                write!(f, "IMF stream length {} is not a multiple of 4", len)
            }
        }
    }
}

impl std::error::Error for ImfError {}

/// Parse a type-0 IMF stream into a [`Song`]
///
/// # Errors
/// Returns `ImfError::MisalignedStream` if the byte length is not a
/// multiple of [`IMF_EVENT_SIZE`]. An empty stream is a valid empty song.
pub fn parse_imf(data: &[u8]) -> Result<Song, ImfError> {
    if data.len() % IMF_EVENT_SIZE != 0 {
        return Err(ImfError::MisalignedStream(data.len()));
    }

    let events = data
        .chunks_exact(IMF_EVENT_SIZE)
        .map(|event| ImfEvent {
            register: event[0],
            value: event[1],
            delay: u16::from_le_bytes([event[2], event[3]]),
        })
        .collect();

    Ok(Song { events })
}
