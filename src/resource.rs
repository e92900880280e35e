//! Photo loading and capture metadata extraction.
//!
//! A [`PhotoResource`] is one selected photo, fully resolved: decoded raster,
//! intrinsic pixel dimensions, and whatever capture metadata the file
//! carried. The two concerns have very different failure policies:
//!
//! - **Decode** is load-bearing. A photo that cannot be decoded fails the
//!   load, and the assembler aborts the whole build — a partial album would
//!   silently shift page numbers and content, which is worse than a clear
//!   failure.
//! - **Metadata** is best-effort. Missing or malformed EXIF degrades to
//!   `None` and never fails anything; the caption page falls back to an
//!   "unknown" label for the date and suppresses the location.
//!
//! The [`ResourceLoader`] trait keeps the rest of the crate storage-agnostic:
//! the production [`FsLoader`] reads the filesystem, tests use the recording
//! mock in [`tests`].
//!
//! [`load_all`] fans the loads out across the rayon pool and joins them in
//! the caller's selection order; the first failure short-circuits the batch.

use chrono::NaiveDateTime;
use exif::{In, Tag, Value};
use image::DynamicImage;
use rayon::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },
}

impl LoadError {
    /// The photo the load failed on.
    pub fn path(&self) -> &str {
        match self {
            LoadError::Read { path, .. } | LoadError::Decode { path, .. } => path,
        }
    }
}

/// Optional capture metadata embedded in a photo file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CaptureMetadata {
    /// When the photo was taken (EXIF `DateTimeOriginal`, falling back to
    /// `DateTime`).
    pub captured_at: Option<NaiveDateTime>,
    /// Decimal-degree (latitude, longitude), sign-resolved from the EXIF
    /// hemisphere refs.
    pub location: Option<(f64, f64)>,
}

/// One selected photo, resolved and decoded.
///
/// Dimensions are set from the decoded raster, so they are always consistent
/// with it. The raster is owned exclusively for the lifetime of one build and
/// dropped with the resource.
pub struct PhotoResource {
    /// The identifier the photo was selected by (path or URL).
    pub source: String,
    /// Intrinsic raster width in pixels.
    pub width: u32,
    /// Intrinsic raster height in pixels.
    pub height: u32,
    /// Decoded pixel data.
    pub raster: DynamicImage,
    pub metadata: CaptureMetadata,
}

impl PhotoResource {
    pub fn new(source: impl Into<String>, raster: DynamicImage, metadata: CaptureMetadata) -> Self {
        let source = source.into();
        Self {
            width: raster.width(),
            height: raster.height(),
            source,
            raster,
            metadata,
        }
    }

    /// The trailing path segment of the source, for captions and logs.
    pub fn display_name(&self) -> &str {
        self.source
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.source)
    }

    /// Capture date as caption text, e.g. "January 5, 2024".
    pub fn formatted_capture_date(&self) -> Option<String> {
        self.metadata
            .captured_at
            .map(|dt| dt.format("%B %-d, %Y").to_string())
    }

    /// Location as fixed-precision decimal degrees, e.g.
    /// "37.7749° N, 122.4194° W".
    pub fn formatted_location(&self) -> Option<String> {
        self.metadata.location.map(|(lat, lon)| {
            let ns = if lat < 0.0 { 'S' } else { 'N' };
            let ew = if lon < 0.0 { 'W' } else { 'E' };
            format!("{:.4}° {}, {:.4}° {}", lat.abs(), ns, lon.abs(), ew)
        })
    }
}

impl std::fmt::Debug for PhotoResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoResource")
            .field("source", &self.source)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Resolves a selection entry into a decoded [`PhotoResource`].
pub trait ResourceLoader: Sync {
    fn load(&self, source: &str) -> Result<PhotoResource, LoadError>;
}

/// Production loader: reads photo files from the local filesystem.
#[derive(Debug, Default)]
pub struct FsLoader;

impl FsLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceLoader for FsLoader {
    fn load(&self, source: &str) -> Result<PhotoResource, LoadError> {
        let bytes = std::fs::read(Path::new(source)).map_err(|e| LoadError::Read {
            path: source.to_string(),
            source: e,
        })?;

        let raster = image::load_from_memory(&bytes).map_err(|e| LoadError::Decode {
            path: source.to_string(),
            source: e,
        })?;

        // Metadata extraction from the same bytes is best-effort only.
        let metadata = extract_metadata(&bytes);

        Ok(PhotoResource::new(source, raster, metadata))
    }
}

/// Load every selection entry in parallel, joined in selection order.
///
/// Rayon's indexed collect re-assembles results in input order regardless of
/// completion order, and collecting into `Result` short-circuits on the first
/// failed load — together that is the fan-out/fan-in the assembler needs.
pub fn load_all<L: ResourceLoader>(
    loader: &L,
    sources: &[String],
) -> Result<Vec<PhotoResource>, LoadError> {
    sources
        .par_iter()
        .map(|source| loader.load(source))
        .collect()
}

/// Best-effort EXIF extraction. Any parse problem yields empty metadata.
pub fn extract_metadata(bytes: &[u8]) -> CaptureMetadata {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
        return CaptureMetadata::default();
    };

    CaptureMetadata {
        captured_at: capture_timestamp(&exif),
        location: gps_location(&exif),
    }
}

fn capture_timestamp(exif: &exif::Exif) -> Option<NaiveDateTime> {
    [Tag::DateTimeOriginal, Tag::DateTime]
        .iter()
        .find_map(|&tag| {
            let field = exif.get_field(tag, In::PRIMARY)?;
            let raw = ascii_value(&field.value)?;
            NaiveDateTime::parse_from_str(raw.trim(), "%Y:%m:%d %H:%M:%S").ok()
        })
}

fn gps_location(exif: &exif::Exif) -> Option<(f64, f64)> {
    let lat = gps_coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S')?;
    let lon = gps_coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W')?;
    Some((lat, lon))
}

/// Convert an EXIF degrees/minutes/seconds triple into signed decimal
/// degrees. The hemisphere ref flips the sign.
fn gps_coordinate(exif: &exif::Exif, tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let dms = match &field.value {
        Value::Rational(r) if r.len() >= 3 => r,
        _ => return None,
    };

    let degrees = dms[0].to_f64() + dms[1].to_f64() / 60.0 + dms[2].to_f64() / 3600.0;
    if !degrees.is_finite() {
        return None;
    }

    let negative = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|f| match &f.value {
            Value::Ascii(lines) => lines.first().and_then(|l| l.first()).copied(),
            _ => None,
        })
        .is_some_and(|r| r == negative_ref);

    Some(if negative { -degrees } else { degrees })
}

fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(lines) => lines
            .first()
            .map(|line| String::from_utf8_lossy(line).into_owned()),
        _ => None,
    }
}
