//! Pure layout geometry for page composition.
//!
//! All functions here are pure and testable without a PDF document or any
//! image data. Coordinates live in "page space": document units (millimeters
//! for an A4 album), origin at the top-left of the region, y growing
//! downward. The composer converts to PDF coordinates at the drawing
//! boundary.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error("grid needs at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },
    #[error("region too small: {rows}x{cols} cells with gap {gap} collapse to {cell_width:.2}x{cell_height:.2}")]
    CollapsedCells {
        rows: u32,
        cols: u32,
        gap: f64,
        cell_width: f64,
        cell_height: f64,
    },
}

/// An axis-aligned rectangle in page space (document units).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle with no drawable area. Degenerate rects are never drawn.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrink the rectangle by `amount` on every side.
    ///
    /// Over-shrinking collapses to an empty rect centered on the original,
    /// rather than producing negative dimensions.
    pub fn inset(&self, amount: f64) -> Rect {
        let width = self.width - 2.0 * amount;
        let height = self.height - 2.0 * amount;
        if width <= 0.0 || height <= 0.0 {
            return Rect::new(self.x + self.width / 2.0, self.y + self.height / 2.0, 0.0, 0.0);
        }
        Rect::new(self.x + amount, self.y + amount, width, height)
    }

    /// The same rectangle translated by (dx, dy).
    pub fn shifted(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// The same rectangle grown by `amount` on every side.
    pub fn expanded(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Scale an image to the largest centered rectangle that fits a box without
/// cropping or distortion.
///
/// `scale = min(box_width / intrinsic_width, box_height / intrinsic_height)`,
/// then the scaled rectangle is centered within `[0, box_width] x
/// [0, box_height]`. The result preserves the intrinsic aspect ratio exactly
/// and is fully contained in the box. A zero intrinsic dimension yields an
/// empty rect instead of dividing by zero; callers treat that as a layout
/// failure when they need a drawable area.
///
/// The returned rect is relative to the box origin; use [`Rect::shifted`] to
/// place it on the page.
pub fn fit_within(
    box_width: f64,
    box_height: f64,
    intrinsic_width: u32,
    intrinsic_height: u32,
) -> Rect {
    if intrinsic_width == 0 || intrinsic_height == 0 {
        return Rect::EMPTY;
    }

    let iw = intrinsic_width as f64;
    let ih = intrinsic_height as f64;
    let scale = (box_width / iw).min(box_height / ih);

    let width = iw * scale;
    let height = ih * scale;
    Rect::new((box_width - width) / 2.0, (box_height - height) / 2.0, width, height)
}

/// Partition a region into `rows x cols` equal cells separated by `gap` on
/// both axes, in row-major order (left-to-right, top-to-bottom).
///
/// `cell_width = (width - gap * (cols - 1)) / cols`, analogously for height.
/// Fails if the grid is empty or the computed cell size is non-positive.
#[allow(clippy::too_many_arguments)]
pub fn partition_grid(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rows: u32,
    cols: u32,
    gap: f64,
) -> Result<Vec<Rect>, LayoutError> {
    if rows == 0 || cols == 0 {
        return Err(LayoutError::EmptyGrid { rows, cols });
    }

    let cell_width = (width - gap * (cols - 1) as f64) / cols as f64;
    let cell_height = (height - gap * (rows - 1) as f64) / rows as f64;
    if cell_width <= 0.0 || cell_height <= 0.0 {
        return Err(LayoutError::CollapsedCells {
            rows,
            cols,
            gap,
            cell_width,
            cell_height,
        });
    }

    let mut cells = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            cells.push(Rect::new(
                x + col as f64 * (cell_width + gap),
                y + row as f64 * (cell_height + gap),
                cell_width,
                cell_height,
            ));
        }
    }
    Ok(cells)
}
