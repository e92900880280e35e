//! Image manifest generation and selection-list parsing.
//!
//! The gallery front end boots from a flat JSON index of the photo
//! directory, and hands back a selection for the album build either as that
//! same flat array or as a search-service response. Both sides of that
//! exchange live here:
//!
//! - [`scan_images`] / [`write_manifest`]: list one directory (no
//!   recursion), keep files with an image extension, write `images.json` as
//!   a flat array of bare filenames.
//! - [`read_selection`]: parse a selection file in either wire shape —
//!   `["a.jpg", "b.jpg"]` or `{"filenames": ["a.jpg", …]}` (ranked
//!   most-relevant first).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions (case-insensitive) treated as photos.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

pub const MANIFEST_FILENAME: &str = "images.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Whether a path has one of the recognized image extensions.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// List the image filenames in `dir`, sorted, non-recursive.
///
/// Returns bare filenames (no path components) — the manifest consumer
/// prepends its own base URL or directory.
pub fn scan_images(dir: &Path) -> Result<Vec<String>, ManifestError> {
    if !dir.is_dir() {
        return Err(ManifestError::NotADirectory(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_image(&path) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Scan `dir` and write the manifest to `out`. Returns the listed names.
pub fn write_manifest(dir: &Path, out: &Path) -> Result<Vec<String>, ManifestError> {
    let names = scan_images(dir)?;
    let json = serde_json::to_string_pretty(&names)?;
    std::fs::write(out, json)?;
    Ok(names)
}

/// A selection list in either wire shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SelectionList {
    /// The manifest format: a flat array of filenames.
    Names(Vec<String>),
    /// The search-service response: ranked filenames, most relevant first.
    Ranked { filenames: Vec<String> },
}

impl SelectionList {
    fn into_names(self) -> Vec<String> {
        match self {
            SelectionList::Names(names) => names,
            SelectionList::Ranked { filenames } => filenames,
        }
    }
}

/// Read an ordered selection from a JSON file (either wire shape).
pub fn read_selection(path: &Path) -> Result<Vec<String>, ManifestError> {
    let content = std::fs::read_to_string(path)?;
    let list: SelectionList = serde_json::from_str(&content)?;
    Ok(list.into_names())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // =========================================================================
    // is_image tests
    // =========================================================================

    #[test]
    fn recognizes_image_extensions() {
        for name in ["a.jpg", "b.JPEG", "c.png", "d.GIF", "e.webp"] {
            assert!(is_image(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn rejects_other_files() {
        for name in ["notes.txt", "raw.cr2", "archive.zip", "noext", ".jpg.bak"] {
            assert!(!is_image(Path::new(name)), "{name}");
        }
    }

    // =========================================================================
    // scan_images tests
    // =========================================================================

    #[test]
    fn scan_lists_sorted_bare_filenames() {
        let dir = TempDir::new().unwrap();
        for name in ["zebra.jpg", "alpha.png", "mid.webp"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::write(dir.path().join("readme.md"), b"x").unwrap();

        let names = scan_images(dir.path()).unwrap();
        assert_eq!(names, vec!["alpha.png", "mid.webp", "zebra.jpg"]);
    }

    #[test]
    fn scan_skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();
        fs::write(dir.path().join("real.jpg"), b"x").unwrap();

        assert_eq!(scan_images(dir.path()).unwrap(), vec!["real.jpg"]);
    }

    #[test]
    fn scan_missing_directory_is_an_error() {
        let result = scan_images(Path::new("/no/such/dir"));
        assert!(matches!(result, Err(ManifestError::NotADirectory(_))));
    }

    #[test]
    fn empty_directory_gives_empty_manifest() {
        let dir = TempDir::new().unwrap();
        assert!(scan_images(dir.path()).unwrap().is_empty());
    }

    // =========================================================================
    // write_manifest tests
    // =========================================================================

    #[test]
    fn manifest_round_trips_as_flat_array() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.jpg"), b"x").unwrap();
        fs::write(dir.path().join("two.png"), b"x").unwrap();

        let out = dir.path().join(MANIFEST_FILENAME);
        let written = write_manifest(dir.path(), &out).unwrap();

        let parsed: Vec<String> =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed, written);
        assert_eq!(parsed, vec!["one.jpg", "two.png"]);
    }

    // =========================================================================
    // read_selection tests
    // =========================================================================

    #[test]
    fn selection_parses_flat_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sel.json");
        fs::write(&path, r#"["b.jpg", "a.jpg"]"#).unwrap();

        // Order is the caller's ranking, not alphabetical
        assert_eq!(read_selection(&path).unwrap(), vec!["b.jpg", "a.jpg"]);
    }

    #[test]
    fn selection_parses_search_response() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("response.json");
        fs::write(&path, r#"{"filenames": ["best.jpg", "second.jpg"]}"#).unwrap();

        assert_eq!(
            read_selection(&path).unwrap(),
            vec!["best.jpg", "second.jpg"]
        );
    }

    #[test]
    fn selection_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"nope": 1}"#).unwrap();

        assert!(matches!(read_selection(&path), Err(ManifestError::Json(_))));
    }
}
