//! VOC decoding error types

use core::fmt;

/// VOC decoding error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocError {
    /// File too small to contain the fixed header
    TooSmall,
    /// Leading tag is not "Creative Voice File\x1A"
    InvalidMagic,
    /// Header size field points outside the file
    InvalidHeaderSize(u16),
    /// A chunk declares more payload bytes than remain in the file
    TruncatedChunk { declared: usize, remaining: usize },
    /// Chunk type outside the known set
    UnknownChunkType(u8),
    /// Sound data uses a codec other than 8-bit unsigned PCM
    UnsupportedCodec(u8),
    /// No sound data chunk before the terminator
    NoSoundData,
}

impl fmt::Display for VocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocError::TooSmall => write!(f, "File too small to contain VOC header"),
            VocError::InvalidMagic => write!(f, "Invalid VOC magic string"),
            VocError::InvalidHeaderSize(size) => {
                write!(f, "VOC header size {} points outside the file", size)
            }
            VocError::TruncatedChunk {
                declared,
                remaining,
            } => write!(
                f,
                "VOC chunk declares {} bytes but only {} remain",
                declared, remaining
            ),
            VocError::UnknownChunkType(tag) => write!(f, "Unknown VOC chunk type 0x{:02X}", tag),
            VocError::UnsupportedCodec(codec) => {
                write!(f, "Unsupported VOC codec {}", codec)
            }
            VocError::NoSoundData => write!(f, "VOC file contains no sound data"),
        }
    }
}

impl std::error::Error for VocError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            VocError::TooSmall.to_string(),
            "File too small to contain VOC header"
        );
        assert_eq!(
            VocError::TruncatedChunk {
                declared: 100,
                remaining: 3
            }
            .to_string(),
            "VOC chunk declares 100 bytes but only 3 remain"
        );
        assert_eq!(
            VocError::UnknownChunkType(0x2A).to_string(),
            "Unknown VOC chunk type 0x2A"
        );
    }
}
