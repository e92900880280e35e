//! The album's visual identity: colors and typography.
//!
//! A [`StylePalette`] is an immutable value threaded explicitly into every
//! compose call. There is deliberately no global or process-wide style state:
//! two concurrent builds each own their palette, so they cannot interfere.

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Which builtin face a text block uses. The composer maps these to the
/// standard PDF base-14 fonts, so no font files ship with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    /// Times — headings, captions.
    Serif,
    /// Helvetica — ordinals, small labels.
    Sans,
}

/// Immutable per-build style configuration.
///
/// Shared read-only by all compose calls within one build; constructed once
/// and never mutated mid-build.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePalette {
    /// Page fill for the cover and closing pages.
    pub primary_background: Color,
    /// Page fill for interior pages.
    pub secondary_background: Color,
    /// Ornaments and decorative borders.
    pub accent: Color,
    /// Headings and captions.
    pub text: Color,
    /// Dates, coordinates, ordinals.
    pub text_muted: Color,
    /// Photo frame outlines.
    pub border: Color,
    /// Photo frame fill and contact-sheet cells.
    pub frame: Color,
    /// Drop shadow behind single-photo frames.
    pub shadow: Color,

    pub heading_font: FontFamily,
    pub body_font: FontFamily,
    /// Point sizes.
    pub title_size: f64,
    pub subtitle_size: f64,
    pub body_size: f64,
    pub caption_size: f64,
}

impl Default for StylePalette {
    /// The stock "beautiful moments" scheme: warm cream pages, antique gold
    /// accents, soft brown text.
    fn default() -> Self {
        Self {
            primary_background: Color::new(0.976, 0.953, 0.906),
            secondary_background: Color::new(0.992, 0.984, 0.961),
            accent: Color::new(0.804, 0.667, 0.380),
            text: Color::new(0.278, 0.231, 0.196),
            text_muted: Color::new(0.553, 0.502, 0.447),
            border: Color::new(0.804, 0.667, 0.380),
            frame: Color::new(1.0, 1.0, 1.0),
            shadow: Color::new(0.847, 0.812, 0.753),
            heading_font: FontFamily::Serif,
            body_font: FontFamily::Sans,
            title_size: 34.0,
            subtitle_size: 14.0,
            body_size: 12.0,
            caption_size: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_components_in_range() {
        let p = StylePalette::default();
        for c in [
            p.primary_background,
            p.secondary_background,
            p.accent,
            p.text,
            p.text_muted,
            p.border,
            p.frame,
            p.shadow,
        ] {
            for v in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn palette_is_a_plain_value() {
        // Cloning yields an independent, equal palette — no shared state.
        let a = StylePalette::default();
        let b = a.clone();
        assert_eq!(a, b);
    }
}
