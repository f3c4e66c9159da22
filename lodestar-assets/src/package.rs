//! Archive container ("CMP" package) directory parsing
//!
//! Nearly all assets ship inside one monolithic archive. Its directory is
//! a run of 20-byte entries at the start of the file: a 12-byte
//! zero-padded ASCII name, a `u32le` data offset and a `u32le` size. The
//! directory region ends where the first entry's data begins; zero-name
//! entries are padding and carry no file.
//!
//! The layout must stay byte-compatible with the shipped archive, so the
//! constants live in [`crate::consts`] and nothing here is configurable.

use std::collections::HashMap;
use std::path::Path;

use crate::bytes::ByteReader;
use crate::consts::{ARCHIVE_ENTRY_BYTES, ARCHIVE_NAME_BYTES};
use crate::error::{Error, Result};

/// Name -> byte range lookup over the raw archive bytes
pub struct PackageIndex {
    data: Vec<u8>,
    entries: HashMap<String, (usize, usize)>,
}

impl PackageIndex {
    /// Parse the archive directory and validate every entry's range
    ///
    /// # Errors
    /// `Error::Format` if the directory header is inconsistent: too short,
    /// misaligned, an entry range outside the archive, or duplicate names.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() < ARCHIVE_ENTRY_BYTES {
            return Err(Error::format("Archive too small for a directory entry"));
        }

        // The first entry's data offset delimits the directory region
        let first_offset = u32::from_le_bytes([
            data[ARCHIVE_NAME_BYTES],
            data[ARCHIVE_NAME_BYTES + 1],
            data[ARCHIVE_NAME_BYTES + 2],
            data[ARCHIVE_NAME_BYTES + 3],
        ]) as usize;
        if first_offset < ARCHIVE_ENTRY_BYTES
            || first_offset > data.len()
            || first_offset % ARCHIVE_ENTRY_BYTES != 0
        {
            return Err(Error::format(format!(
                "Inconsistent archive directory: first data offset {}",
                first_offset
            )));
        }

        let mut reader = ByteReader::new(&data[..first_offset]);
        let mut entries = HashMap::with_capacity(first_offset / ARCHIVE_ENTRY_BYTES);
        while reader.remaining() > 0 {
            let name_bytes = reader.read_bytes(ARCHIVE_NAME_BYTES)?;
            let offset = reader.read_u32()? as usize;
            let size = reader.read_u32()? as usize;

            let name = entry_name(name_bytes);
            if name.is_empty() {
                continue;
            }

            if offset < first_offset || offset + size > data.len() {
                return Err(Error::format(format!(
                    "Archive entry {} out of bounds: offset {}, size {}",
                    name, offset, size
                )));
            }
            if entries.insert(name.clone(), (offset, size)).is_some() {
                return Err(Error::format(format!("Duplicate archive entry {}", name)));
            }
        }

        Ok(Self { data, entries })
    }

    /// Read and parse an archive file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data)
    }

    /// Bytes of the named entry, matched case-insensitively
    ///
    /// # Errors
    /// `Error::NotFound` if no entry has that name.
    pub fn file(&self, name: &str) -> Result<&[u8]> {
        self.entries
            .get(&name.to_ascii_uppercase())
            .map(|&(offset, size)| &self.data[offset..offset + size])
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_uppercase())
    }

    /// Number of named entries in the directory
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Trim zero padding from a directory name and normalize the case
fn entry_name(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end])
        .trim()
        .to_ascii_uppercase()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a minimal archive from (name, contents) pairs
    pub(crate) fn build_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
        let dir_size = files.len() * ARCHIVE_ENTRY_BYTES;
        let mut directory = Vec::with_capacity(dir_size);
        let mut data = Vec::new();

        for (name, contents) in files {
            let mut name_field = [0u8; ARCHIVE_NAME_BYTES];
            name_field[..name.len()].copy_from_slice(name.as_bytes());
            directory.extend_from_slice(&name_field);
            directory.extend_from_slice(&((dir_size + data.len()) as u32).to_le_bytes());
            directory.extend_from_slice(&(contents.len() as u32).to_le_bytes());
            data.extend_from_slice(contents);
        }

        directory.extend_from_slice(&data);
        directory
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let archive = build_archive(&[("CZONE1.MNI", b"tiles"), ("DROP2.MNI", b"drop")]);
        let package = PackageIndex::from_bytes(archive).unwrap();

        assert_eq!(package.file("czone1.mni").unwrap(), b"tiles");
        assert_eq!(package.file("CZONE1.MNI").unwrap(), b"tiles");
        assert!(package.has_file("Drop2.Mni"));
        assert_eq!(package.entry_count(), 2);
    }

    #[test]
    fn test_missing_entry_is_not_found() {
        let archive = build_archive(&[("A.MNI", b"a")]);
        let package = PackageIndex::from_bytes(archive).unwrap();

        assert!(!package.has_file("B.MNI"));
        assert!(matches!(package.file("B.MNI"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_out_of_bounds_entry_fails() {
        let mut archive = build_archive(&[("A.MNI", b"abc")]);
        // Inflate the entry size past the end of the archive
        let size_field = ARCHIVE_NAME_BYTES + 4;
        archive[size_field..size_field + 4].copy_from_slice(&1000u32.to_le_bytes());

        assert!(matches!(
            PackageIndex::from_bytes(archive),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_truncated_archive_fails() {
        assert!(PackageIndex::from_bytes(vec![0u8; 10]).is_err());
    }

    #[test]
    fn test_misaligned_directory_fails() {
        let mut archive = build_archive(&[("A.MNI", b"abc")]);
        // First offset not a multiple of the entry size
        archive[ARCHIVE_NAME_BYTES..ARCHIVE_NAME_BYTES + 4]
            .copy_from_slice(&21u32.to_le_bytes());
        assert!(PackageIndex::from_bytes(archive).is_err());
    }

    #[test]
    fn test_duplicate_names_fail() {
        let archive = build_archive(&[("A.MNI", b"x"), ("a.mni", b"y")]);
        assert!(matches!(
            PackageIndex::from_bytes(archive),
            Err(Error::Format(_))
        ));
    }
}
