//! # Album Press
//!
//! A print-layout engine for photo albums. An ordered selection of photos
//! goes in, a decorated landscape-A4 PDF comes out: a cover, a contact
//! sheet, one generously framed page per photo, and a closing page.
//!
//! # Architecture: Load → Sequence → Compose
//!
//! Every build is one pass through a fixed pipeline:
//!
//! ```text
//! 1. Load      selection  →  PhotoResource[]   (parallel decode + metadata)
//! 2. Sequence  photos     →  PageSpec[]        (cover, contact, photos, closing)
//! 3. Compose   specs      →  Album (PDF)       (page-by-page, sequential)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Atomicity**: all photos are decoded before a single page is drawn, so
//!   a bad file aborts the build before an artifact exists.
//! - **Testability**: layout math ([`layout`]) and page sequencing are pure
//!   functions; composition is driven through a loader trait, so the whole
//!   pipeline runs in tests without touching the filesystem.
//! - **Predictability**: the page plan is fixed up front — `3 + min(N, 16)`
//!   pages, always in the same order.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`album`] | Pipeline driver — selection to finalized [`album::Album`], progress events |
//! | [`compose`] | Page composition — draws each page variant onto a PDF layer |
//! | [`layout`] | Pure geometry: rectangles, aspect-fit, grid partitioning |
//! | [`style`] | The album's palette and type scale |
//! | [`resource`] | Photo loading: decode, EXIF capture date and GPS position |
//! | [`manifest`] | `images.json` directory index and selection-list parsing |
//! | [`thumbs`] | Offline thumbnail pre-generation for the gallery grid |
//!
//! # Design Decisions
//!
//! ## Built-In Fonts, Vector Decoration
//!
//! Pages are drawn with [printpdf](https://docs.rs/printpdf) using the base-14
//! fonts (Times for headings, Helvetica for captions) and vector polygons for
//! every ornament. No font files, no raster decoration assets — the binary is
//! fully self-contained, and the output stays small and crisp at any zoom.
//!
//! ## All-or-Nothing Builds
//!
//! A photo that fails to decode aborts the whole build; nothing is written
//! for a failed build. Missing metadata is the opposite: a photo without a
//! capture date or GPS position composes fine, its caption just says less.
//! The split is deliberate — a missing page would silently corrupt the
//! album's numbering, a missing caption line is cosmetically harmless.
//!
//! ## Parallel Decode, Sequential Compose
//!
//! Photos decode on the rayon pool (decode dominates build time), collected
//! back in selection order. Composition is strictly sequential: PDF pages
//! are ordered state, and with decode off the critical path there is nothing
//! left worth parallelizing.
//!
//! ## Page Space vs PDF Space
//!
//! All layout math lives in page space — millimeters, origin top-left,
//! y growing downward, the way people read a page. The flip to PDF's
//! bottom-left origin happens exactly once, inside [`compose`]'s drawing
//! primitives. Keeping a single flip point is what keeps the geometry
//! testable.

pub mod album;
pub mod compose;
pub mod layout;
pub mod manifest;
pub mod resource;
pub mod style;
pub mod thumbs;
