//! Page composition: turning a [`PageSpec`] into committed PDF page content.
//!
//! Four page variants make up an album:
//!
//! | Variant | Content |
//! |---|---|
//! | `Cover` | filled background, double border, corner ornaments, title block |
//! | `ContactSheet` | 2x2 framed grid of the first four photos (or a placeholder) |
//! | `SinglePhoto` | framed photo with drop shadow, caption block, page ordinal |
//! | `Closing` | thank-you block ringed by eight ornaments |
//!
//! A [`Canvas`] is the exclusive handle to one page's layer. Every compose
//! call takes it by `&mut`, so sequential composition is enforced by the
//! borrow checker rather than by convention.
//!
//! Layout math happens in page space (millimeters, origin top-left, y down,
//! see [`crate::layout`]); the flip to PDF coordinates (y up from the bottom
//! edge) happens once, inside the low-level drawing helpers.

use crate::layout::{self, LayoutError, Rect};
use crate::resource::PhotoResource;
use crate::style::{Color, FontFamily, StylePalette};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, ImageTransform, ImageXObject, IndirectFontRef, Mm,
    PdfDocumentReference, PdfLayerReference, Point, Polygon, Px, Rgb,
};
use thiserror::Error;

/// ISO A4 landscape, fixed for every build.
pub const PAGE_WIDTH_MM: f64 = 297.0;
pub const PAGE_HEIGHT_MM: f64 = 210.0;

/// Gap between contact-sheet cells.
const CONTACT_GAP_MM: f64 = 8.0;
/// A full contact sheet is always a 2x2 grid.
const CONTACT_ROWS: u32 = 2;
const CONTACT_COLS: u32 = 2;
/// Photos on a full contact sheet.
pub const CONTACT_CAPACITY: usize = 4;

const PT_TO_MM: f64 = 0.352_777_78;
/// Average glyph advance for the builtin faces, as a fraction of the point
/// size. printpdf ships no metrics for base-14 fonts, so centered text uses
/// this approximation.
const AVG_ADVANCE: f64 = 0.5;

/// Circle approximation segments for ornaments and rounded corners.
const ARC_SEGMENTS: u32 = 16;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("{0} collapsed to a non-positive size")]
    EmptyRegion(&'static str),
}

/// One album page, fully determined at construction. The assembler builds
/// the ordered sequence once per build and never mutates it afterwards; the
/// compose dispatch matches exhaustively over the variants.
#[derive(Debug)]
pub enum PageSpec<'a> {
    Cover,
    /// Up to [`CONTACT_CAPACITY`] photos. Fewer than four renders a textual
    /// placeholder page instead of a partial grid.
    ContactSheet { photos: &'a [PhotoResource] },
    SinglePhoto {
        photo: &'a PhotoResource,
        /// 1-based position in the album, printed zero-padded to two digits.
        ordinal: usize,
    },
    Closing,
}

impl PageSpec<'_> {
    /// Short human-readable label for progress reporting.
    pub fn label(&self) -> String {
        match self {
            PageSpec::Cover => "cover".to_string(),
            PageSpec::ContactSheet { .. } => "contact sheet".to_string(),
            PageSpec::SinglePhoto { photo, ordinal } => {
                format!("photo {:02} ({})", ordinal, photo.display_name())
            }
            PageSpec::Closing => "closing".to_string(),
        }
    }
}

/// The builtin faces one document needs. Loaded once per build.
pub struct FontSet {
    serif: IndirectFontRef,
    serif_italic: IndirectFontRef,
    sans: IndirectFontRef,
}

impl FontSet {
    pub fn load(doc: &PdfDocumentReference) -> Result<Self, printpdf::Error> {
        Ok(Self {
            serif: doc.add_builtin_font(BuiltinFont::TimesRoman)?,
            serif_italic: doc.add_builtin_font(BuiltinFont::TimesItalic)?,
            sans: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        })
    }

    fn for_family(&self, family: FontFamily) -> &IndirectFontRef {
        match family {
            FontFamily::Serif => &self.serif,
            FontFamily::Sans => &self.sans,
        }
    }
}

/// Exclusive handle to one page under composition.
pub struct Canvas<'a> {
    layer: PdfLayerReference,
    fonts: &'a FontSet,
    palette: &'a StylePalette,
}

impl<'a> Canvas<'a> {
    pub fn new(layer: PdfLayerReference, fonts: &'a FontSet, palette: &'a StylePalette) -> Self {
        Self {
            layer,
            fonts,
            palette,
        }
    }

    /// Commit one page's content.
    pub fn compose(&mut self, spec: &PageSpec<'_>) -> Result<(), ComposeError> {
        match spec {
            PageSpec::Cover => self.compose_cover(),
            PageSpec::ContactSheet { photos } => self.compose_contact_sheet(photos),
            PageSpec::SinglePhoto { photo, ordinal } => self.compose_single_photo(photo, *ordinal),
            PageSpec::Closing => self.compose_closing(),
        }
    }

    // =========================================================================
    // Page variants
    // =========================================================================

    fn compose_cover(&mut self) -> Result<(), ComposeError> {
        let p = self.palette;
        self.fill_page(p.primary_background);

        // Double decorative border inset from the page edge
        let page = Rect::new(0.0, 0.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
        self.stroke_rect(page.inset(8.0), p.border, 1.2);
        self.stroke_rect(page.inset(10.5), p.border, 0.5);

        // Corner ornaments, inside the borders
        for (cx, cy) in [
            (19.0, 19.0),
            (PAGE_WIDTH_MM - 19.0, 19.0),
            (19.0, PAGE_HEIGHT_MM - 19.0),
            (PAGE_WIDTH_MM - 19.0, PAGE_HEIGHT_MM - 19.0),
        ] {
            self.draw_ornament(cx, cy, 1.0);
        }

        self.text_centered(
            crate::album::ALBUM_TITLE,
            p.title_size,
            92.0,
            p.heading_font,
            p.text,
        );
        self.text_centered_with_font(
            "a collection of treasured photographs",
            p.subtitle_size,
            108.0,
            &self.fonts.serif_italic,
            p.text_muted,
        );
        let today = chrono::Local::now().format("%B %-d, %Y").to_string();
        self.text_centered(&today, p.body_size, 126.0, p.body_font, p.text_muted);
        Ok(())
    }

    fn compose_contact_sheet(&mut self, photos: &[PhotoResource]) -> Result<(), ComposeError> {
        let p = self.palette;
        self.fill_page(p.secondary_background);

        if photos.len() < CONTACT_CAPACITY {
            // A partial grid reads as a mistake; a placeholder page does not.
            let page = Rect::new(0.0, 0.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
            self.stroke_rect(page.inset(10.0), p.border, 0.5);
            self.text_centered(
                "Moments at a Glance",
                p.subtitle_size + 6.0,
                96.0,
                p.heading_font,
                p.text,
            );
            self.text_centered(
                "A gallery preview appears here once the album holds four photographs.",
                p.body_size,
                112.0,
                p.body_font,
                p.text_muted,
            );
            return Ok(());
        }

        self.text_centered(
            "Moments at a Glance",
            p.subtitle_size + 6.0,
            24.0,
            p.heading_font,
            p.text,
        );

        let region = Rect::new(48.5, 38.0, 200.0, 150.0);
        let cells = layout::partition_grid(
            region.x,
            region.y,
            region.width,
            region.height,
            CONTACT_ROWS,
            CONTACT_COLS,
            CONTACT_GAP_MM,
        )?;

        for (photo, cell) in photos.iter().take(CONTACT_CAPACITY).zip(cells) {
            self.fill_rounded_rect(cell, 3.0, p.frame, Some((p.border, 0.6)));

            // Frame minus a small margin so the full photo stays visible
            let window = cell.inset(4.0);
            let placed = layout::fit_within(window.width, window.height, photo.width, photo.height)
                .shifted(window.x, window.y);
            if placed.is_empty() {
                return Err(ComposeError::EmptyRegion("contact-sheet cell"));
            }
            self.embed_photo(photo, placed);
        }
        Ok(())
    }

    fn compose_single_photo(
        &mut self,
        photo: &PhotoResource,
        ordinal: usize,
    ) -> Result<(), ComposeError> {
        let p = self.palette;
        self.fill_page(p.secondary_background);

        // Page ordinal, top-left
        self.text_at(&format!("{ordinal:02}"), 11.0, 12.0, 16.0, p.body_font, p.text_muted);

        // Max photo region inset from the page edges, leaving a caption band
        let region = Rect::new(24.0, 18.0, PAGE_WIDTH_MM - 48.0, PAGE_HEIGHT_MM - 56.0);
        let placed = layout::fit_within(region.width, region.height, photo.width, photo.height)
            .shifted(region.x, region.y);
        if placed.is_empty() {
            return Err(ComposeError::EmptyRegion("photo region"));
        }

        let frame = placed.expanded(3.0);
        self.fill_rect(frame.shifted(1.8, 1.8), p.shadow);
        self.fill_rounded_rect(frame, 1.5, p.frame, Some((p.border, 0.6)));
        self.embed_photo(photo, placed);

        // Caption block below the photo region. The date always renders,
        // falling back to a label; an unknown location is suppressed.
        let caption_top = region.y + region.height + 9.0;
        let date = photo
            .formatted_capture_date()
            .unwrap_or_else(|| "Date unknown".to_string());
        self.text_centered(&date, p.body_size, caption_top, p.heading_font, p.text);
        if let Some(location) = photo.formatted_location() {
            self.text_centered(
                &location,
                p.caption_size,
                caption_top + 7.0,
                p.body_font,
                p.text_muted,
            );
        }
        Ok(())
    }

    fn compose_closing(&mut self) -> Result<(), ComposeError> {
        let p = self.palette;
        self.fill_page(p.primary_background);

        self.text_centered("Thank You", p.title_size - 6.0, 100.0, p.heading_font, p.text);
        self.text_centered_with_font(
            "for sharing these beautiful moments",
            p.subtitle_size,
            116.0,
            &self.fonts.serif_italic,
            p.text_muted,
        );

        // Eight ornaments ringed around the page center
        let (cx, cy) = (PAGE_WIDTH_MM / 2.0, PAGE_HEIGHT_MM / 2.0);
        let ring_radius = 66.0;
        for i in 0..8 {
            let angle = f64::from(i) * 45.0_f64.to_radians();
            self.draw_ornament(
                cx + ring_radius * angle.cos(),
                cy + ring_radius * angle.sin(),
                0.8,
            );
        }
        Ok(())
    }

    // =========================================================================
    // Drawing primitives (page space in, PDF space out)
    // =========================================================================

    fn fill_page(&self, color: Color) {
        self.fill_rect(Rect::new(0.0, 0.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM), color);
    }

    fn fill_rect(&self, rect: Rect, color: Color) {
        self.paint(vec![rect_ring(rect)], Some(color), None, 0.0);
    }

    fn stroke_rect(&self, rect: Rect, color: Color, thickness_pt: f64) {
        self.paint(vec![rect_ring(rect)], None, Some(color), thickness_pt);
    }

    fn fill_rounded_rect(
        &self,
        rect: Rect,
        radius: f64,
        fill: Color,
        stroke: Option<(Color, f64)>,
    ) {
        let ring = rounded_rect_ring(rect, radius);
        match stroke {
            Some((color, thickness)) => self.paint(vec![ring], Some(fill), Some(color), thickness),
            None => self.paint(vec![ring], Some(fill), None, 0.0),
        }
    }

    fn fill_circle(&self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.paint(vec![circle_ring(cx, cy, radius)], Some(color), None, 0.0);
    }

    /// The album's flower motif: five petals at 72-degree increments around
    /// a core circle and a center dot.
    fn draw_ornament(&self, cx: f64, cy: f64, scale: f64) {
        let p = self.palette;
        let orbit = 3.2 * scale;
        let petal = 2.1 * scale;

        for i in 0..5 {
            let angle = -90.0_f64.to_radians() + f64::from(i) * 72.0_f64.to_radians();
            self.fill_circle(
                cx + orbit * angle.cos(),
                cy + orbit * angle.sin(),
                petal,
                p.accent,
            );
        }
        self.fill_circle(cx, cy, 1.9 * scale, p.primary_background);
        self.fill_circle(cx, cy, 0.8 * scale, p.text);
    }

    fn paint(
        &self,
        rings: Vec<Vec<(Point, bool)>>,
        fill: Option<Color>,
        stroke: Option<Color>,
        thickness_pt: f64,
    ) {
        if let Some(color) = fill {
            self.layer.set_fill_color(pdf_color(color));
        }
        if let Some(color) = stroke {
            self.layer.set_outline_color(pdf_color(color));
            self.layer.set_outline_thickness(thickness_pt as f32);
        }
        let mode = match (fill.is_some(), stroke.is_some()) {
            (true, true) => PaintMode::FillStroke,
            (true, false) => PaintMode::Fill,
            (false, true) => PaintMode::Stroke,
            (false, false) => return,
        };
        self.layer.add_polygon(Polygon {
            rings,
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }

    /// Embed a decoded photo scaled into `rect` (page space, mm).
    fn embed_photo(&self, photo: &PhotoResource, rect: Rect) {
        let rgb = photo.raster.to_rgb8();
        let (px_w, px_h) = rgb.dimensions();

        let image = printpdf::Image::from(ImageXObject {
            width: Px(px_w as usize),
            height: Px(px_h as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // Native placement size is px / dpi inches; solve the scale that
        // lands the image exactly in rect.
        let dpi = 300.0_f64;
        let scale_x = rect.width * dpi / (25.4 * f64::from(px_w));
        let scale_y = rect.height * dpi / (25.4 * f64::from(px_h));

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(rect.x as f32)),
                translate_y: Some(Mm((PAGE_HEIGHT_MM - rect.y - rect.height) as f32)),
                scale_x: Some(scale_x as f32),
                scale_y: Some(scale_y as f32),
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        );
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Draw text with its baseline at `baseline_y` (page space, from the top
    /// edge), left-aligned at `x`.
    fn text_at(
        &self,
        text: &str,
        size_pt: f64,
        x: f64,
        baseline_y: f64,
        family: FontFamily,
        color: Color,
    ) {
        self.text_at_with_font(text, size_pt, x, baseline_y, self.fonts.for_family(family), color);
    }

    fn text_at_with_font(
        &self,
        text: &str,
        size_pt: f64,
        x: f64,
        baseline_y: f64,
        font: &IndirectFontRef,
        color: Color,
    ) {
        self.layer.set_fill_color(pdf_color(color));
        self.layer.use_text(
            text,
            size_pt as f32,
            Mm(x as f32),
            Mm((PAGE_HEIGHT_MM - baseline_y) as f32),
            font,
        );
    }

    fn text_centered(
        &self,
        text: &str,
        size_pt: f64,
        baseline_y: f64,
        family: FontFamily,
        color: Color,
    ) {
        self.text_centered_with_font(text, size_pt, baseline_y, self.fonts.for_family(family), color);
    }

    fn text_centered_with_font(
        &self,
        text: &str,
        size_pt: f64,
        baseline_y: f64,
        font: &IndirectFontRef,
        color: Color,
    ) {
        let x = (PAGE_WIDTH_MM - text_width_mm(text, size_pt)) / 2.0;
        self.text_at_with_font(text, size_pt, x.max(0.0), baseline_y, font, color);
    }
}

/// Approximate rendered width of a line of builtin-font text.
fn text_width_mm(text: &str, size_pt: f64) -> f64 {
    text.chars().count() as f64 * size_pt * AVG_ADVANCE * PT_TO_MM
}

fn pdf_color(color: Color) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb::new(color.r as f32, color.g as f32, color.b as f32, None))
}

fn pdf_point(x: f64, y_pdf: f64) -> (Point, bool) {
    (Point::new(Mm(x as f32), Mm(y_pdf as f32)), false)
}

/// Rectangle ring in PDF coordinates, counter-clockwise from bottom-left.
fn rect_ring(rect: Rect) -> Vec<(Point, bool)> {
    let bottom = PAGE_HEIGHT_MM - rect.y - rect.height;
    vec![
        pdf_point(rect.x, bottom),
        pdf_point(rect.x + rect.width, bottom),
        pdf_point(rect.x + rect.width, bottom + rect.height),
        pdf_point(rect.x, bottom + rect.height),
    ]
}

/// Rounded rectangle ring: straight edges joined by quarter-circle arcs
/// approximated with line segments.
fn rounded_rect_ring(rect: Rect, radius: f64) -> Vec<(Point, bool)> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    if r <= 0.0 {
        return rect_ring(rect);
    }

    let (x, w, h) = (rect.x, rect.width, rect.height);
    let y = PAGE_HEIGHT_MM - rect.y - rect.height; // PDF bottom edge
    let mut points = Vec::new();

    // bottom edge → right edge → top edge → left edge
    points.push(pdf_point(x + r, y));
    points.push(pdf_point(x + w - r, y));
    arc(&mut points, r, x + w - r, y + r, -90.0);
    points.push(pdf_point(x + w, y + h - r));
    arc(&mut points, r, x + w - r, y + h - r, 0.0);
    points.push(pdf_point(x + r, y + h));
    arc(&mut points, r, x + r, y + h - r, 90.0);
    points.push(pdf_point(x, y + r));
    arc(&mut points, r, x + r, y + r, 180.0);
    points
}

/// Quarter-circle arc appended as line segments, counter-clockwise from
/// `start_deg`.
fn arc(points: &mut Vec<(Point, bool)>, r: f64, cx: f64, cy: f64, start_deg: f64) {
    for i in 0..=ARC_SEGMENTS {
        let t = f64::from(i) / f64::from(ARC_SEGMENTS);
        let angle = (start_deg + t * 90.0).to_radians();
        points.push(pdf_point(cx + r * angle.cos(), cy + r * angle.sin()));
    }
}

/// Closed circle ring (page-space center) approximated as a polygon.
fn circle_ring(cx: f64, cy: f64, radius: f64) -> Vec<(Point, bool)> {
    let cy_pdf = PAGE_HEIGHT_MM - cy;
    let segments = 2 * ARC_SEGMENTS;
    (0..=segments)
        .map(|i| {
            let angle = std::f64::consts::TAU * f64::from(i) / f64::from(segments);
            pdf_point(cx + radius * angle.cos(), cy_pdf + radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::{MockLoader, test_raster, test_timestamp};
    use crate::resource::{CaptureMetadata, ResourceLoader};
    use printpdf::PdfDocument;

    fn with_canvas<F>(f: F)
    where
        F: FnOnce(&mut Canvas<'_>) -> Result<(), ComposeError>,
    {
        let (doc, page, layer) = PdfDocument::new(
            "test",
            Mm(PAGE_WIDTH_MM as f32),
            Mm(PAGE_HEIGHT_MM as f32),
            "Page 1",
        );
        let fonts = FontSet::load(&doc).unwrap();
        let palette = StylePalette::default();
        let mut canvas = Canvas::new(doc.get_page(page).get_layer(layer), &fonts, &palette);
        f(&mut canvas).unwrap();
    }

    fn photo(width: u32, height: u32) -> PhotoResource {
        PhotoResource::new(
            format!("photo-{width}x{height}.jpg"),
            test_raster(width.max(1), height.max(1)),
            CaptureMetadata {
                captured_at: Some(test_timestamp()),
                location: Some((48.8584, 2.2945)),
            },
        )
    }

    fn photos(n: usize) -> Vec<PhotoResource> {
        let loader = MockLoader::with_photo_count(n);
        loader
            .sources()
            .iter()
            .map(|s| loader.load(s).unwrap())
            .collect()
    }

    // =========================================================================
    // Variant composition
    // =========================================================================

    #[test]
    fn cover_composes() {
        with_canvas(|c| c.compose(&PageSpec::Cover));
    }

    #[test]
    fn closing_composes() {
        with_canvas(|c| c.compose(&PageSpec::Closing));
    }

    #[test]
    fn contact_sheet_with_four_photos_composes() {
        let photos = photos(4);
        with_canvas(|c| c.compose(&PageSpec::ContactSheet { photos: &photos }));
    }

    #[test]
    fn contact_sheet_with_fewer_photos_is_placeholder_not_error() {
        for n in 0..CONTACT_CAPACITY {
            let photos = photos(n);
            with_canvas(|c| c.compose(&PageSpec::ContactSheet { photos: &photos }));
        }
    }

    #[test]
    fn single_photo_composes_landscape_and_portrait() {
        for (w, h) in [(800, 600), (600, 800), (500, 500)] {
            let p = photo(w, h);
            with_canvas(|c| {
                c.compose(&PageSpec::SinglePhoto {
                    photo: &p,
                    ordinal: 1,
                })
            });
        }
    }

    #[test]
    fn single_photo_without_metadata_composes() {
        let p = PhotoResource::new("bare.jpg", test_raster(320, 240), CaptureMetadata::default());
        with_canvas(|c| {
            c.compose(&PageSpec::SinglePhoto {
                photo: &p,
                ordinal: 7,
            })
        });
    }

    #[test]
    fn labels_describe_the_page() {
        let p = photo(10, 10);
        assert_eq!(PageSpec::Cover.label(), "cover");
        assert_eq!(
            PageSpec::SinglePhoto {
                photo: &p,
                ordinal: 3
            }
            .label(),
            "photo 03 (photo-10x10.jpg)"
        );
    }

    // =========================================================================
    // Geometry helpers
    // =========================================================================

    #[test]
    fn rect_ring_flips_to_pdf_coordinates() {
        // A rect at the top of the page lands near y = PAGE_HEIGHT in PDF space
        let ring = rect_ring(Rect::new(10.0, 0.0, 20.0, 5.0));
        let (top_right, _) = ring[2];
        let (expected, _) = pdf_point(30.0, PAGE_HEIGHT_MM);
        assert!((top_right.y.0 - expected.y.0).abs() < 1e-3);
        assert!((top_right.x.0 - expected.x.0).abs() < 1e-3);
    }

    #[test]
    fn zero_dimension_photo_is_a_layout_failure() {
        let (doc, page, layer) = PdfDocument::new(
            "test",
            Mm(PAGE_WIDTH_MM as f32),
            Mm(PAGE_HEIGHT_MM as f32),
            "Page 1",
        );
        let fonts = FontSet::load(&doc).unwrap();
        let palette = StylePalette::default();
        let mut canvas = Canvas::new(doc.get_page(page).get_layer(layer), &fonts, &palette);

        let mut p = photo(10, 10);
        p.width = 0;
        let result = canvas.compose(&PageSpec::SinglePhoto {
            photo: &p,
            ordinal: 1,
        });
        assert!(matches!(result, Err(ComposeError::EmptyRegion(_))));
    }

    #[test]
    fn rounded_ring_with_zero_radius_is_plain_rect() {
        let rect = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(rounded_rect_ring(rect, 0.0).len(), 4);
    }

    #[test]
    fn rounded_ring_has_arc_points() {
        let rect = Rect::new(5.0, 5.0, 40.0, 20.0);
        let ring = rounded_rect_ring(rect, 3.0);
        assert!(ring.len() > 4 * (ARC_SEGMENTS as usize));
    }

    #[test]
    fn rounded_ring_edges_meet_their_arcs() {
        let rect = Rect::new(10.0, 20.0, 60.0, 30.0);
        let ring = rounded_rect_ring(rect, 4.0);

        // The bottom edge ends where the first corner arc begins
        let (edge_end, _) = ring[1];
        let (arc_start, _) = ring[2];
        assert!((edge_end.x.0 - arc_start.x.0).abs() < 1e-4);
        assert!((edge_end.y.0 - arc_start.y.0).abs() < 1e-4);

        // Every point stays within the rect's PDF-space bounds
        let (lo, _) = pdf_point(rect.x, PAGE_HEIGHT_MM - rect.y - rect.height);
        let (hi, _) = pdf_point(rect.x + rect.width, PAGE_HEIGHT_MM - rect.y);
        for (p, _) in &ring {
            assert!(p.x.0 >= lo.x.0 - 1e-4 && p.x.0 <= hi.x.0 + 1e-4);
            assert!(p.y.0 >= lo.y.0 - 1e-4 && p.y.0 <= hi.y.0 + 1e-4);
        }
    }

    #[test]
    fn circle_ring_is_closed() {
        let ring = circle_ring(50.0, 50.0, 5.0);
        let (first, _) = ring[0];
        let (last, _) = ring[ring.len() - 1];
        assert!((first.x.0 - last.x.0).abs() < 1e-4);
        assert!((first.y.0 - last.y.0).abs() < 1e-4);
    }

    #[test]
    fn text_width_scales_with_length_and_size() {
        let short = text_width_mm("ab", 12.0);
        let long = text_width_mm("abcd", 12.0);
        let big = text_width_mm("ab", 24.0);
        assert!((long - 2.0 * short).abs() < 1e-9);
        assert!((big - 2.0 * short).abs() < 1e-9);
    }
}
