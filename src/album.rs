//! End-to-end album assembly.
//!
//! One build is one pass through a fixed pipeline:
//!
//! ```text
//! selection ─ truncate(16) ─→ load (parallel fan-out, joint join)
//!           ─→ page sequence [Cover, ContactSheet, Photo 01…, Closing]
//!           ─→ compose page-by-page (strictly sequential)
//!           ─→ Album artifact (save / to_bytes)
//! ```
//!
//! The build is all-or-nothing. Any decode failure or collapsed layout
//! aborts it before an artifact exists, so nothing is ever written for a
//! failed build — a partial album with silently shifted page numbers would
//! be worse than a clear error. Metadata problems, by contrast, never fail a
//! build (see [`crate::resource`]).
//!
//! Every build owns its document, its palette and its photo resources; there
//! is no shared mutable state between builds, so callers may run builds
//! concurrently (the CLI simply runs one at a time).

use crate::compose::{Canvas, ComposeError, FontSet, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PageSpec};
use crate::resource::{self, LoadError, PhotoResource, ResourceLoader};
use crate::style::StylePalette;
use printpdf::{Mm, PdfDocument, PdfDocumentReference};
use std::io::BufWriter;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Hard cap on photos per album. Bounds both memory (decoded rasters are
/// held for the whole build) and page count.
pub const MAX_PHOTOS: usize = 16;

/// Pages that every album has besides the per-photo pages.
pub const FIXED_PAGES: usize = 3;

pub const ALBUM_TITLE: &str = "Beautiful Moments";
pub const DEFAULT_FILENAME: &str = "beautiful_moments_album.pdf";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error("pdf backend: {0}")]
    Pdf(#[from] printpdf::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress events for a build, in emission order. Consumed by the CLI's
/// printer thread; a dropped receiver is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// Loading begins for `photos` selected images (post-truncation).
    Loading { photos: usize },
    /// All photos decoded.
    Loaded,
    /// A page was committed. `index` is 1-based.
    PageComposed {
        index: usize,
        total: usize,
        label: String,
    },
    /// The artifact is complete.
    Finalized { pages: usize },
}

/// The finalized document, immutable and ready for export.
pub struct Album {
    doc: PdfDocumentReference,
    pages: usize,
}

impl Album {
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Serialize the document to PDF bytes.
    pub fn to_bytes(self) -> Result<Vec<u8>, BuildError> {
        let mut bytes = Vec::new();
        self.doc.save(&mut BufWriter::new(&mut bytes))?;
        Ok(bytes)
    }

    /// Write the document to `path`.
    ///
    /// Serializes to memory first, so a serialization failure leaves no
    /// truncated file behind.
    pub fn save(self, path: &Path) -> Result<(), BuildError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl std::fmt::Debug for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Album")
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}

/// Build an album from an ordered selection of photo sources.
///
/// The selection is truncated to the first [`MAX_PHOTOS`] entries; the
/// resulting album has `3 + min(N, 16)` pages. The first failed load aborts
/// the whole build.
pub fn build<L: ResourceLoader>(
    loader: &L,
    selection: &[String],
    palette: &StylePalette,
    progress: Option<Sender<BuildEvent>>,
) -> Result<Album, BuildError> {
    let emit = |event: BuildEvent| {
        if let Some(tx) = &progress {
            tx.send(event).ok();
        }
    };

    let selection = &selection[..selection.len().min(MAX_PHOTOS)];
    emit(BuildEvent::Loading {
        photos: selection.len(),
    });
    let photos = resource::load_all(loader, selection)?;
    emit(BuildEvent::Loaded);

    let specs = page_sequence(&photos);
    let total = specs.len();

    let (doc, first_page, first_layer) = PdfDocument::new(
        ALBUM_TITLE,
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Page 1",
    );
    let fonts = FontSet::load(&doc)?;

    for (i, spec) in specs.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(
                Mm(PAGE_WIDTH_MM as f32),
                Mm(PAGE_HEIGHT_MM as f32),
                format!("Page {}", i + 1),
            );
            doc.get_page(page).get_layer(layer)
        };

        let mut canvas = Canvas::new(layer, &fonts, palette);
        canvas.compose(spec)?;
        emit(BuildEvent::PageComposed {
            index: i + 1,
            total,
            label: spec.label(),
        });
    }

    emit(BuildEvent::Finalized { pages: total });
    Ok(Album { doc, pages: total })
}

/// Build and export in one step. On failure no file is written.
pub fn build_to_file<L: ResourceLoader>(
    loader: &L,
    selection: &[String],
    palette: &StylePalette,
    out: &Path,
    progress: Option<Sender<BuildEvent>>,
) -> Result<usize, BuildError> {
    let album = build(loader, selection, palette, progress)?;
    let pages = album.page_count();
    album.save(out)?;
    Ok(pages)
}

/// The ordered page sequence for a loaded photo set. Constructed once per
/// build, never mutated afterwards.
fn page_sequence(photos: &[PhotoResource]) -> Vec<PageSpec<'_>> {
    let contact = &photos[..photos.len().min(crate::compose::CONTACT_CAPACITY)];

    let mut specs = Vec::with_capacity(FIXED_PAGES + photos.len());
    specs.push(PageSpec::Cover);
    specs.push(PageSpec::ContactSheet { photos: contact });
    specs.extend(photos.iter().enumerate().map(|(i, photo)| PageSpec::SinglePhoto {
        photo,
        ordinal: i + 1,
    }));
    specs.push(PageSpec::Closing);
    specs
}
