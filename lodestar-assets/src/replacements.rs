//! Replacement asset resolution
//!
//! Users can override individual assets by dropping PNG files into a
//! replacements directory next to the game data. The filenames derive
//! from the original asset names by fixed convention - a stable contract
//! that existing override files on disk depend on:
//!
//! - `CZONE<c>.MNI`  -> `tileset<c>.png`
//! - `DROP<nnn>.MNI` -> `backdrop<nnn>.png`
//! - actor sprites   -> `actor<id>_frame<frame>.png`
//!
//! Matching uses explicit prefix/suffix parsing rather than a pattern
//! engine. A present-but-malformed replacement file is treated as absent;
//! the override mechanism is best-effort by design.

use std::path::Path;

use crate::pixels::{Image, Rgba8};

/// The closed set of asset categories that support pattern-based
/// replacement, each carrying what its filename derivation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementSpec {
    /// Tileset `CZONE<c>.MNI`; keeps the single alphanumeric marker
    Tileset(char),
    /// Backdrop `DROP<nnn>.MNI`; keeps the digit string verbatim
    Backdrop(String),
    /// Actor animation frame, addressed by id and frame index
    ActorFrame { actor_id: u32, frame: u32 },
}

impl ReplacementSpec {
    /// Derive the replacement spec for a logical asset name, if the name
    /// belongs to a replaceable category
    pub fn for_asset_name(name: &str) -> Option<ReplacementSpec> {
        if let Some(marker) = strip_circumfix(name, "CZONE", ".MNI") {
            let mut chars = marker.chars();
            let c = chars.next()?;
            if chars.next().is_none() && c.is_ascii_alphanumeric() {
                return Some(ReplacementSpec::Tileset(c));
            }
        }
        if let Some(digits) = strip_circumfix(name, "DROP", ".MNI") {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return Some(ReplacementSpec::Backdrop(digits.to_string()));
            }
        }
        None
    }

    /// The override filename this spec maps to
    pub fn file_name(&self) -> String {
        match self {
            ReplacementSpec::Tileset(c) => format!("tileset{}.png", c),
            ReplacementSpec::Backdrop(digits) => format!("backdrop{}.png", digits),
            ReplacementSpec::ActorFrame { actor_id, frame } => {
                format!("actor{}_frame{}.png", actor_id, frame)
            }
        }
    }
}

/// Case-insensitive `prefix` + middle + `suffix` split
fn strip_circumfix<'a>(name: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    if !name.is_ascii() || name.len() < prefix.len() + suffix.len() {
        return None;
    }
    let (head, rest) = name.split_at(prefix.len());
    let (middle, tail) = rest.split_at(rest.len() - suffix.len());
    (head.eq_ignore_ascii_case(prefix) && tail.eq_ignore_ascii_case(suffix)).then_some(middle)
}

/// Load the replacement image for `spec` from the override directory.
///
/// Returns `None` when the file is absent or fails to decode as PNG; the
/// caller falls through to the archive asset either way.
pub fn resolve_replacement(override_dir: &Path, spec: &ReplacementSpec) -> Option<Image> {
    load_png_if_present(&override_dir.join(spec.file_name()))
}

/// Best-effort PNG load: missing and malformed files both yield `None`
pub fn load_png_if_present(path: &Path) -> Option<Image> {
    if !path.exists() {
        return None;
    }
    match image::open(path) {
        Ok(decoded) => {
            tracing::debug!(path = %path.display(), "Using replacement image");
            Some(from_rgba8(decoded.to_rgba8()))
        }
        Err(err) => {
            tracing::debug!(
                path = %path.display(),
                error = %err,
                "Ignoring malformed replacement image"
            );
            None
        }
    }
}

fn from_rgba8(buffer: image::RgbaImage) -> Image {
    let (width, height) = buffer.dimensions();
    let pixels = buffer
        .pixels()
        .map(|p| Rgba8::new(p[0], p[1], p[2], p[3]))
        .collect();
    Image::from_pixels(width as usize, height as usize, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_tileset_name_matching() {
        assert_eq!(
            ReplacementSpec::for_asset_name("CZONE1.MNI"),
            Some(ReplacementSpec::Tileset('1'))
        );
        assert_eq!(
            ReplacementSpec::for_asset_name("czoneA.mni"),
            Some(ReplacementSpec::Tileset('A'))
        );
        // Marker must be exactly one alphanumeric character
        assert_eq!(ReplacementSpec::for_asset_name("CZONE12.MNI"), None);
        assert_eq!(ReplacementSpec::for_asset_name("CZONE.MNI"), None);
        assert_eq!(ReplacementSpec::for_asset_name("CZONE_.MNI"), None);
    }

    #[test]
    fn test_backdrop_name_matching() {
        assert_eq!(
            ReplacementSpec::for_asset_name("DROP25.MNI"),
            Some(ReplacementSpec::Backdrop("25".to_string()))
        );
        assert_eq!(ReplacementSpec::for_asset_name("DROPX.MNI"), None);
        assert_eq!(ReplacementSpec::for_asset_name("DROP.MNI"), None);
        assert_eq!(ReplacementSpec::for_asset_name("BACKDROP1.MNI"), None);
    }

    #[test]
    fn test_derived_file_names() {
        assert_eq!(
            ReplacementSpec::Tileset('3').file_name(),
            "tileset3.png"
        );
        assert_eq!(
            ReplacementSpec::Backdrop("07".to_string()).file_name(),
            "backdrop07.png"
        );
        assert_eq!(
            ReplacementSpec::ActorFrame {
                actor_id: 159,
                frame: 4
            }
            .file_name(),
            "actor159_frame4.png"
        );
    }

    #[test]
    fn test_missing_replacement_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_replacement(dir.path(), &ReplacementSpec::Tileset('1')).is_none());
    }

    #[test]
    fn test_malformed_replacement_falls_through_silently() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tileset1.png"), b"not a png at all").unwrap();

        assert!(resolve_replacement(dir.path(), &ReplacementSpec::Tileset('1')).is_none());
    }

    #[test]
    fn test_valid_replacement_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backdrop3.png");
        let mut png = image::RgbaImage::new(4, 2);
        png.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
        png.save(&path).unwrap();

        let loaded =
            resolve_replacement(dir.path(), &ReplacementSpec::Backdrop("3".to_string()))
                .unwrap();
        assert_eq!(loaded.width(), 4);
        assert_eq!(loaded.height(), 2);
        assert_eq!(loaded.pixels()[0], Rgba8::new(10, 20, 30, 255));
    }
}
