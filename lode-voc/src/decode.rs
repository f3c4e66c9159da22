//! VOC chunk walking and PCM extraction

use crate::error::VocError;
use crate::{VOC_CODEC_PCM8, VOC_HEADER_SIZE, VOC_MAGIC};

/// Decoded VOC audio: mono PCM at the rate stored in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocAudio {
    /// Sample rate in Hz, derived from the frequency divisor byte
    pub sample_rate: u32,
    /// Mono samples, widened from 8-bit unsigned to signed 16-bit
    pub samples: Vec<i16>,
}

/// Decode a VOC file into mono 16-bit PCM
///
/// Walks the chunk list, concatenating all sound data. The sample rate of
/// the first sound data chunk wins; the original assets never mix rates
/// within one file.
///
/// # Errors
/// Returns `VocError` if the leading tag is wrong, a chunk claims more
/// bytes than remain, a chunk type is unknown, or no sound data is present.
pub fn decode_voc(data: &[u8]) -> Result<VocAudio, VocError> {
    if data.len() < VOC_HEADER_SIZE {
        return Err(VocError::TooSmall);
    }
    if &data[..VOC_MAGIC.len()] != VOC_MAGIC {
        return Err(VocError::InvalidMagic);
    }

    let header_size = u16::from_le_bytes([data[20], data[21]]);
    if (header_size as usize) < VOC_HEADER_SIZE || header_size as usize > data.len() {
        return Err(VocError::InvalidHeaderSize(header_size));
    }

    let mut pos = header_size as usize;
    let mut sample_rate: Option<u32> = None;
    let mut samples: Vec<i16> = Vec::new();

    while pos < data.len() {
        let chunk_type = data[pos];
        pos += 1;

        // Terminator has no length field
        if chunk_type == 0x00 {
            break;
        }

        if pos + 3 > data.len() {
            return Err(VocError::TruncatedChunk {
                declared: 3,
                remaining: data.len() - pos,
            });
        }
        let length =
            u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], 0]) as usize;
        pos += 3;

        if length > data.len() - pos {
            return Err(VocError::TruncatedChunk {
                declared: length,
                remaining: data.len() - pos,
            });
        }
        let payload = &data[pos..pos + length];
        pos += length;

        match chunk_type {
            // Sound data: frequency divisor + codec + samples
            0x01 => {
                if payload.len() < 2 {
                    return Err(VocError::TruncatedChunk {
                        declared: 2,
                        remaining: payload.len(),
                    });
                }
                let divisor = payload[0];
                let codec = payload[1];
                if codec != VOC_CODEC_PCM8 {
                    return Err(VocError::UnsupportedCodec(codec));
                }
                sample_rate.get_or_insert(1_000_000 / (256 - u32::from(divisor)));
                append_pcm8(&mut samples, &payload[2..]);
            }
            // Sound continuation: raw samples at the established rate
            0x02 => {
                append_pcm8(&mut samples, payload);
            }
            // Silence, markers, text, repeat blocks, extra info: irrelevant
            // for one-shot sound effects, skipped by declared length
            0x03..=0x08 => {}
            other => return Err(VocError::UnknownChunkType(other)),
        }
    }

    match sample_rate {
        Some(sample_rate) => Ok(VocAudio {
            sample_rate,
            samples,
        }),
        None => Err(VocError::NoSoundData),
    }
}

/// Widen 8-bit unsigned samples to centered signed 16-bit
fn append_pcm8(out: &mut Vec<i16>, raw: &[u8]) {
    out.reserve(raw.len());
    out.extend(
        raw.iter()
            .map(|&sample| (i16::from(sample) - 128) << 8),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voc_file(chunks: &[u8]) -> Vec<u8> {
        let mut data = VOC_MAGIC.to_vec();
        data.extend_from_slice(&(VOC_HEADER_SIZE as u16).to_le_bytes());
        data.extend_from_slice(&0x010A_u16.to_le_bytes());
        data.extend_from_slice(&0x1129_u16.to_le_bytes());
        data.extend_from_slice(chunks);
        data
    }

    fn sound_chunk(divisor: u8, samples: &[u8]) -> Vec<u8> {
        let length = (samples.len() + 2) as u32;
        let mut chunk = vec![0x01];
        chunk.extend_from_slice(&length.to_le_bytes()[..3]);
        chunk.push(divisor);
        chunk.push(VOC_CODEC_PCM8);
        chunk.extend_from_slice(samples);
        chunk
    }

    #[test]
    fn test_decode_single_sound_chunk() {
        let mut chunks = sound_chunk(0xA5, &[0x00, 0x80, 0xFF]);
        chunks.push(0x00);

        let audio = decode_voc(&voc_file(&chunks)).unwrap();
        assert_eq!(audio.sample_rate, 1_000_000 / (256 - 0xA5));
        assert_eq!(audio.samples, vec![-128 << 8, 0, 127 << 8]);
    }

    #[test]
    fn test_decode_continuation_appends() {
        let mut chunks = sound_chunk(0x9C, &[0x80, 0x80]);
        chunks.extend_from_slice(&[0x02, 2, 0, 0, 0x90, 0x70]);
        chunks.push(0x00);

        let audio = decode_voc(&voc_file(&chunks)).unwrap();
        assert_eq!(audio.samples.len(), 4);
        assert_eq!(audio.samples[2], (0x90 - 128) << 8);
    }

    #[test]
    fn test_skips_marker_and_text_chunks() {
        let mut chunks = vec![0x05, 3, 0, 0, b'h', b'i', 0];
        chunks.extend_from_slice(&sound_chunk(0xA5, &[0x80]));
        chunks.push(0x00);

        let audio = decode_voc(&voc_file(&chunks)).unwrap();
        assert_eq!(audio.samples.len(), 1);
    }

    #[test]
    fn test_invalid_magic() {
        let mut data = voc_file(&[0x00]);
        data[0] = b'X';
        assert_eq!(decode_voc(&data), Err(VocError::InvalidMagic));
    }

    #[test]
    fn test_too_small() {
        assert_eq!(decode_voc(b"Creative"), Err(VocError::TooSmall));
    }

    #[test]
    fn test_truncated_chunk_fails() {
        // Declares 100 payload bytes, provides 2
        let data = voc_file(&[0x01, 100, 0, 0, 0xA5, 0x00]);
        assert_eq!(
            decode_voc(&data),
            Err(VocError::TruncatedChunk {
                declared: 100,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_unknown_chunk_type() {
        let data = voc_file(&[0x2A, 1, 0, 0, 0xFF, 0x00]);
        assert_eq!(decode_voc(&data), Err(VocError::UnknownChunkType(0x2A)));
    }

    #[test]
    fn test_unsupported_codec() {
        let data = voc_file(&[0x01, 3, 0, 0, 0xA5, 0x04, 0x80, 0x00]);
        assert_eq!(decode_voc(&data), Err(VocError::UnsupportedCodec(0x04)));
    }

    #[test]
    fn test_no_sound_data() {
        let data = voc_file(&[0x00]);
        assert_eq!(decode_voc(&data), Err(VocError::NoSoundData));
    }

    #[test]
    fn test_missing_terminator_is_tolerated() {
        let chunks = sound_chunk(0xA5, &[0x42]);
        let audio = decode_voc(&voc_file(&chunks)).unwrap();
        assert_eq!(audio.samples.len(), 1);
    }
}
