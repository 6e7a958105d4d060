//! Glyph rasterization using swash
//!
//! Renders glyph outlines into 8-bit coverage bitmaps for the atlas.

use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;

use crate::{Result, TextError};

/// Rasterized glyph coverage with placement metrics
#[derive(Debug, Clone, Default)]
pub struct RasterizedGlyph {
    /// Row-major 8-bit coverage, `width * height` bytes
    pub bitmap: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the left edge
    pub bearing_x: i32,
    /// Offset from the baseline up to the top edge
    pub bearing_y: i32,
    /// Horizontal advance in pixels
    pub advance: f32,
}

/// Glyph rasterizer for one font face
pub struct GlyphRasterizer<'a> {
    font: swash::FontRef<'a>,
    scale_context: ScaleContext,
}

impl<'a> GlyphRasterizer<'a> {
    pub fn new(data: &'a [u8], face_index: usize) -> Result<Self> {
        let font =
            swash::FontRef::from_index(data, face_index).ok_or(TextError::InvalidFontData)?;
        Ok(Self {
            font,
            scale_context: ScaleContext::new(),
        })
    }

    /// Rasterize a glyph at the given pixel size
    ///
    /// Glyphs without an outline (space) come back empty with their advance.
    pub fn rasterize(&mut self, glyph_id: u16, font_size: f32) -> RasterizedGlyph {
        let mut scaler = self
            .scale_context
            .builder(self.font)
            .size(font_size)
            .build();

        let units_per_em = self.font.metrics(&[]).units_per_em.max(1) as f32;
        let scale = font_size / units_per_em;
        let advance = self.font.glyph_metrics(&[]).advance_width(glyph_id) * scale;

        // Coverage only: color sources would return RGBA content.
        let mut render = Render::new(&[Source::Outline, Source::Bitmap(StrikeWith::BestFit)]);
        render.format(Format::Alpha);

        let image = render
            .render(&mut scaler, glyph_id)
            .filter(|img| img.data.len() == (img.placement.width * img.placement.height) as usize);

        match image {
            Some(img) => RasterizedGlyph {
                bitmap: img.data,
                width: img.placement.width,
                height: img.placement.height,
                bearing_x: img.placement.left,
                bearing_y: img.placement.top,
                advance,
            },
            None => RasterizedGlyph {
                advance,
                ..Default::default()
            },
        }
    }
}
