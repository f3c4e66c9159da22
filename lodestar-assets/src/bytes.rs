//! Bounds-checked little-endian reader over a byte slice
//!
//! All archive formats are little-endian DOS-era layouts. The reader
//! never panics; running past the end yields `Error::Format` so decoders
//! can propagate truncation with `?`.

use crate::error::{Error, Result};

/// Cursor over an immutable byte slice with little-endian accessors
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read `count` bytes as a subslice of the input
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Error::format(format!(
                "Unexpected end of data: need {} bytes, {} remain",
                count,
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    /// Advance without retaining the skipped bytes
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let mut reader = ByteReader::new(&[0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0x12345678);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_past_end_fails() {
        let mut reader = ByteReader::new(&[0x00]);
        assert!(reader.read_u16().is_err());
    }

    #[test]
    fn test_skip() {
        let mut reader = ByteReader::new(&[1, 2, 3, 4]);
        reader.skip(3).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 4);
        assert!(reader.skip(1).is_err());
    }
}
