//! Text collaborator interface
//!
//! The canvas lays glyph quads out itself; a [`GlyphAtlas`] supplies metrics
//! and the texture the quads sample.

use crate::image::ImageId;

/// Horizontal text alignment relative to the anchor x
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

/// Vertical text anchor relative to the anchor y
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

/// Placement and texture coordinates of one glyph
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphInfo {
    /// `[u0, v0, u1, v1]` in the atlas texture
    pub uv: [f32; 4],
    /// Offset from the pen position to the quad's top-left corner
    pub x_offset: f32,
    pub y_offset: f32,
    pub advance: f32,
    pub width: f32,
    pub height: f32,
}

/// Result of measuring a string
///
/// Bounding-box descents are positive distances below the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
    pub actual_bounding_box_left: f32,
    pub actual_bounding_box_right: f32,
    pub actual_bounding_box_ascent: f32,
    pub actual_bounding_box_descent: f32,
    pub font_bounding_box_ascent: f32,
    pub font_bounding_box_descent: f32,
}

/// Glyph metrics and atlas texture provider
pub trait GlyphAtlas {
    /// Whether the atlas has glyphs and an uploaded texture
    fn is_valid(&self) -> bool;

    fn texture(&self) -> Option<ImageId>;

    /// Width and height of `text`, honoring newlines and kerning
    fn measure_text(&self, text: &str) -> (f32, f32);

    /// Glyph for `ch`, falling back to the space glyph when unknown
    fn glyph(&self, ch: char) -> Option<GlyphInfo>;

    /// Extra advance between `prev` and `ch` (usually negative)
    fn kerning(&self, prev: char, ch: char) -> f32;

    fn line_height(&self) -> f32;

    /// Distance from the baseline to the top of the line (positive)
    fn ascent(&self) -> f32;

    /// Signed offset from the baseline to the bottom of the line (negative)
    fn descent(&self) -> f32;
}
