//! Thumbnail pre-generation for the gallery grid.
//!
//! An offline batch step, run once per photo directory: every image in the
//! source directory is resized to a fixed width (aspect preserved, Lanczos3)
//! and written under the same filename in the destination directory. EXIF
//! orientation is applied first, so phone photos land upright.
//!
//! Unlike an album build, this batch is per-file fault tolerant: one photo
//! that fails to decode is reported and skipped, the rest still get their
//! thumbnails. The grid can live with a missing cell; a print run cannot.

use crate::manifest::{self, ManifestError};
use exif::{In, Tag};
use image::DynamicImage;
use image::imageops::FilterType;
use rayon::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Default thumbnail width in pixels.
pub const THUMBNAIL_WIDTH: u32 = 400;

#[derive(Error, Debug)]
pub enum ThumbsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct ThumbsReport {
    /// Filenames successfully written.
    pub written: Vec<String>,
    /// `(filename, reason)` for photos that were skipped.
    pub failures: Vec<(String, String)>,
}

/// Generate a `width`-pixel-wide thumbnail for every image in `src`,
/// written under the same filename in `dest`.
pub fn generate_thumbnails(src: &Path, dest: &Path, width: u32) -> Result<ThumbsReport, ThumbsError> {
    let names = manifest::scan_images(src)?;
    std::fs::create_dir_all(dest)?;

    let results: Vec<(String, Result<(), String>)> = names
        .par_iter()
        .map(|name| {
            let result = write_thumbnail(&src.join(name), &dest.join(name), width);
            (name.clone(), result.map_err(|e| e.to_string()))
        })
        .collect();

    let mut report = ThumbsReport::default();
    for (name, result) in results {
        match result {
            Ok(()) => report.written.push(name),
            Err(reason) => report.failures.push((name, reason)),
        }
    }
    Ok(report)
}

fn write_thumbnail(src: &Path, dest: &Path, width: u32) -> Result<(), image::ImageError> {
    let bytes = std::fs::read(src)?;
    let img = image::load_from_memory(&bytes)?;

    let upright = match read_orientation(&bytes) {
        Some(o) => apply_orientation(img, o),
        None => img,
    };

    // Bounded only by width: height follows from the aspect ratio
    upright
        .resize(width, u32::MAX, FilterType::Lanczos3)
        .save(dest)
}

/// EXIF orientation tag value (1–8), if present.
fn read_orientation(bytes: &[u8]) -> Option<u32> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    exif.get_field(Tag::Orientation, In::PRIMARY)?
        .value
        .get_uint(0)
}

/// Apply an EXIF orientation (TIFF semantics: values 2–8 are mirrored and/or
/// rotated). Unknown values pass through unchanged.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::test_raster;
    use tempfile::TempDir;

    // =========================================================================
    // apply_orientation tests
    // =========================================================================

    #[test]
    fn orientation_1_is_identity() {
        let img = test_raster(30, 20);
        let out = apply_orientation(img, 1);
        assert_eq!((out.width(), out.height()), (30, 20));
    }

    #[test]
    fn orientation_6_rotates_quarter_turn() {
        let out = apply_orientation(test_raster(30, 20), 6);
        assert_eq!((out.width(), out.height()), (20, 30));
    }

    #[test]
    fn orientation_3_keeps_dimensions() {
        let out = apply_orientation(test_raster(30, 20), 3);
        assert_eq!((out.width(), out.height()), (30, 20));
    }

    #[test]
    fn unknown_orientation_passes_through() {
        let out = apply_orientation(test_raster(30, 20), 42);
        assert_eq!((out.width(), out.height()), (30, 20));
    }

    // =========================================================================
    // generate_thumbnails tests
    // =========================================================================

    #[test]
    fn thumbnails_are_width_bound() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        test_raster(800, 600).save(src.path().join("wide.png")).unwrap();
        test_raster(600, 800).save(src.path().join("tall.png")).unwrap();

        let report = generate_thumbnails(src.path(), dest.path(), 100).unwrap();
        assert_eq!(report.written.len(), 2);
        assert!(report.failures.is_empty());

        let wide = image::open(dest.path().join("wide.png")).unwrap();
        assert_eq!(wide.width(), 100);
        assert_eq!(wide.height(), 75);

        let tall = image::open(dest.path().join("tall.png")).unwrap();
        assert_eq!(tall.width(), 100);
        assert_eq!(tall.height(), 133);
    }

    #[test]
    fn one_bad_file_does_not_sink_the_batch() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        test_raster(64, 64).save(src.path().join("good.png")).unwrap();
        std::fs::write(src.path().join("bad.jpg"), b"not an image").unwrap();

        let report = generate_thumbnails(src.path(), dest.path(), 32).unwrap();
        assert_eq!(report.written, vec!["good.png"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "bad.jpg");
        assert!(dest.path().join("good.png").exists());
        assert!(!dest.path().join("bad.jpg").exists());
    }

    #[test]
    fn missing_source_directory_is_an_error() {
        let dest = TempDir::new().unwrap();
        let result = generate_thumbnails(Path::new("/no/such/dir"), dest.path(), 100);
        assert!(matches!(result, Err(ThumbsError::Manifest(_))));
    }
}
