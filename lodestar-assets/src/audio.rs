//! Audio types, the AdLib sound-effect package, and sound-id data tables
//!
//! Sound effects reach the audio subsystem as [`AudioBuffer`] values no
//! matter where they came from: a digitized VOC file or an AdLib entry
//! synthesized by the FM-synthesis collaborator. The resolution order for
//! a [`SoundId`] (intro table, then `SB_<n>.MNI` probe, then synthesis)
//! lives in the loader; the data tables backing it live here.

use crate::bytes::ByteReader;
use crate::consts::audio::INSTRUMENT_BYTES;
use crate::error::{Error, Result};

/// Normalized PCM audio handed to the audio subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl From<lode_voc::VocAudio> for AudioBuffer {
    fn from(audio: lode_voc::VocAudio) -> Self {
        AudioBuffer {
            sample_rate: audio.sample_rate,
            channels: 1,
            samples: audio.samples,
        }
    }
}

/// Every sound effect the game can trigger, in package order.
///
/// The discriminant is the sound's ordinal in the AdLib package and the
/// seed for the digitized-file probe (`SB_<ordinal + 1>.MNI`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SoundId {
    PlayerJumping = 0,
    PlayerLanding,
    PlayerAttachClimbable,
    PlayerNormalShot,
    PlayerDeath,
    BigExplosion,
    Explosion,
    GlassBreaking,
    ItemPickup,
    WeaponPickup,
    EnemyHit,
    HealthPickup,
    DoorOpen,
    LavaBubble,
    Teleport,
    ForceFieldZap,
    FlameThrowerShot,
    LaserShot,
    RocketShot,
    Swoosh,
    FallingRock,
    EnemyLaserShot,
    AlternateExplosion,
    WaterSplash,
    IntroGunShot,
    IntroGunShotLow,
    IntroEmptyShellsFalling,
    IntroTargetMovingCloser,
    IntroTargetStopsMoving,
    IntroNarration1,
    IntroNarration2,
    BigDoorOpen,
    MenuToggle,
    MenuSelect,
}

impl SoundId {
    /// Ordinal used for package indexing and filename derivation
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Explicit VOC filename for the handful of intro sounds.
    ///
    /// This table is a fixed external contract; the intro sounds ship as
    /// named files instead of `SB_<n>` entries.
    pub fn intro_sound_filename(self) -> Option<&'static str> {
        match self {
            SoundId::IntroGunShot => Some("INTRO3.MNI"),
            SoundId::IntroGunShotLow => Some("INTRO4.MNI"),
            SoundId::IntroEmptyShellsFalling => Some("INTRO5.MNI"),
            SoundId::IntroTargetMovingCloser => Some("INTRO6.MNI"),
            SoundId::IntroTargetStopsMoving => Some("INTRO7.MNI"),
            SoundId::IntroNarration1 => Some("INTRO8.MNI"),
            SoundId::IntroNarration2 => Some("INTRO9.MNI"),
            _ => None,
        }
    }

    /// Name of the digitized version of this sound, if one ships
    pub fn digitized_sound_filename(self) -> String {
        format!("SB_{}.MNI", self.ordinal() + 1)
    }
}

/// OPL2 operator/channel settings for one AdLib sound entry.
///
/// Consumed verbatim by the FM-synthesis collaborator; this crate only
/// carries the bytes into a typed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstrumentSettings {
    pub modulator_char: u8,
    pub carrier_char: u8,
    pub modulator_scale: u8,
    pub carrier_scale: u8,
    pub modulator_attack: u8,
    pub carrier_attack: u8,
    pub modulator_sustain: u8,
    pub carrier_sustain: u8,
    pub modulator_wave: u8,
    pub carrier_wave: u8,
    pub connection: u8,
    pub voice: u8,
    pub mode: u8,
    // 3 padding bytes consumed but not retained
}

/// One entry of the AdLib sound package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdlibSound {
    pub priority: u16,
    pub instrument: InstrumentSettings,
    pub octave: u8,
    /// Note data driving the synthesis routine
    pub data: Vec<u8>,
}

/// FM-synthesis collaborator turning instrument parameters into PCM.
///
/// Implementations must be deterministic: the same entry always yields
/// the same buffer.
pub trait Synthesizer {
    fn synthesize(&self, sound: &AdlibSound) -> AudioBuffer;
}

/// The synthesized sound package: AdLib entries indexed by sound ordinal
pub struct AudioPackage {
    sounds: Vec<AdlibSound>,
}

impl AudioPackage {
    /// Parse the offset dictionary and sound data files
    ///
    /// The dictionary is a run of `u32le` offsets into the data file, one
    /// per sound plus a trailing end sentinel.
    ///
    /// # Errors
    /// `Error::Format` on a misaligned dictionary or an entry pointing or
    /// reaching outside the data file.
    pub fn from_files(dict: &[u8], data: &[u8]) -> Result<Self> {
        if dict.len() % 4 != 0 {
            return Err(Error::format(format!(
                "AdLib dictionary length {} is not a multiple of 4",
                dict.len()
            )));
        }

        let offsets: Vec<usize> = dict
            .chunks_exact(4)
            .map(|raw| u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize)
            .collect();

        let mut sounds = Vec::new();
        for &offset in &offsets {
            if offset == data.len() {
                // End sentinel
                break;
            }
            if offset > data.len() {
                return Err(Error::format(format!(
                    "AdLib sound offset {} outside data file of {} bytes",
                    offset,
                    data.len()
                )));
            }
            sounds.push(parse_adlib_sound(&data[offset..])?);
        }

        Ok(Self { sounds })
    }

    /// Number of entries in the package
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    /// The package entry for a sound id
    ///
    /// # Errors
    /// `Error::OutOfBounds` if the package has no entry at that ordinal.
    pub fn sound(&self, id: SoundId) -> Result<&AdlibSound> {
        self.sounds.get(id.ordinal()).ok_or(Error::OutOfBounds {
            index: id.ordinal(),
            limit: self.sounds.len(),
        })
    }

    /// Synthesize the entry for `id` through the given collaborator
    pub fn load_adlib_sound(&self, id: SoundId, synth: &dyn Synthesizer) -> Result<AudioBuffer> {
        Ok(synth.synthesize(self.sound(id)?))
    }
}

/// Entry layout: data length, priority, instrument block, octave, data
fn parse_adlib_sound(entry: &[u8]) -> Result<AdlibSound> {
    let mut reader = ByteReader::new(entry);
    let data_len = reader.read_u32()? as usize;
    let priority = reader.read_u16()?;

    let block = reader.read_bytes(INSTRUMENT_BYTES)?;
    let instrument = InstrumentSettings {
        modulator_char: block[0],
        carrier_char: block[1],
        modulator_scale: block[2],
        carrier_scale: block[3],
        modulator_attack: block[4],
        carrier_attack: block[5],
        modulator_sustain: block[6],
        carrier_sustain: block[7],
        modulator_wave: block[8],
        carrier_wave: block[9],
        connection: block[10],
        voice: block[11],
        mode: block[12],
    };

    let octave = reader.read_u8()?;
    let data = reader.read_bytes(data_len)?.to_vec();

    Ok(AdlibSound {
        priority,
        instrument,
        octave,
        data,
    })
}
