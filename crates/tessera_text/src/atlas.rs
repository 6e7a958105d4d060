//! Fixed-charset glyph atlas
//!
//! A [`FontAtlas`] rasterizes every character of its charset once, packs the
//! coverage bitmaps into a single square alpha texture and keeps the metrics
//! the canvas needs to lay text out against it.

use rustc_hash::FxHashMap;
use tessera_paint::{GlyphAtlas, GlyphInfo, ImageId};

use crate::packer::ShelfPacker;
use crate::rasterizer::GlyphRasterizer;
use crate::{Result, TextError};

/// Atlas build parameters
#[derive(Clone, Debug)]
pub struct AtlasConfig {
    /// Pixel size glyphs are rasterized at
    pub font_size: f32,
    /// Width and height of the square atlas bitmap
    pub atlas_size: u32,
    /// Empty pixels between packed glyphs
    pub padding: u32,
    /// Characters to rasterize
    pub charset: Vec<char>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            font_size: 32.0,
            atlas_size: 512,
            padding: 1,
            charset: (' '..='~').collect(),
        }
    }
}

/// Vertical font metrics at the atlas size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct LineMetrics {
    ascent: f32,
    descent: f32,
    line_height: f32,
}

/// A font rasterized into one alpha bitmap
#[derive(Debug)]
pub struct FontAtlas {
    font_size: f32,
    atlas_size: u32,
    bitmap: Vec<u8>,
    glyphs: FxHashMap<char, GlyphInfo>,
    kerning: FxHashMap<(char, char), f32>,
    metrics: LineMetrics,
    texture: Option<ImageId>,
}

impl FontAtlas {
    /// Parse a TTF/OTF font and rasterize `config.charset` into an atlas
    pub fn from_bytes(data: &[u8], config: &AtlasConfig) -> Result<Self> {
        let face = ttf_parser::Face::parse(data, 0).map_err(|_| TextError::InvalidFontData)?;
        let mut rasterizer = GlyphRasterizer::new(data, 0)?;

        let scale = config.font_size / face.units_per_em().max(1) as f32;
        let metrics = LineMetrics {
            ascent: face.ascender() as f32 * scale,
            descent: face.descender() as f32 * scale,
            line_height: (face.ascender() as f32 - face.descender() as f32
                + face.line_gap() as f32)
                * scale,
        };

        let size = config.atlas_size;
        let inv_size = 1.0 / size as f32;
        let mut bitmap = vec![0u8; size as usize * size as usize];
        let mut packer = ShelfPacker::new(size, config.padding);
        let mut glyphs = FxHashMap::default();
        let mut glyph_ids = Vec::with_capacity(config.charset.len());

        for &ch in &config.charset {
            let Some(glyph_id) = face.glyph_index(ch) else {
                tracing::debug!("font has no glyph for {:?}", ch);
                continue;
            };
            let raster = rasterizer.rasterize(glyph_id.0, config.font_size);

            let (x, y) = packer
                .allocate(raster.width, raster.height)
                .ok_or(TextError::AtlasFull { size })?;
            blit(&mut bitmap, size, x, y, &raster.bitmap, raster.width, raster.height);

            glyphs.insert(
                ch,
                GlyphInfo {
                    uv: [
                        x as f32 * inv_size,
                        y as f32 * inv_size,
                        (x + raster.width) as f32 * inv_size,
                        (y + raster.height) as f32 * inv_size,
                    ],
                    x_offset: raster.bearing_x as f32,
                    y_offset: -(raster.bearing_y as f32),
                    advance: raster.advance,
                    width: raster.width as f32,
                    height: raster.height as f32,
                },
            );
            glyph_ids.push((ch, glyph_id));
        }

        if glyphs.is_empty() {
            return Err(TextError::NoGlyphs);
        }

        let kerning = kerning_pairs(&face, &glyph_ids, scale);

        tracing::info!(
            "font atlas: {} glyphs at {}px in {}x{}, {} kerning pairs",
            glyphs.len(),
            config.font_size,
            size,
            size,
            kerning.len()
        );

        Ok(Self {
            font_size: config.font_size,
            atlas_size: size,
            bitmap,
            glyphs,
            kerning,
            metrics,
            texture: None,
        })
    }

    /// Single-channel coverage, `atlas_size * atlas_size` bytes
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    pub fn atlas_size(&self) -> u32 {
        self.atlas_size
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Attach the backend texture the bitmap was uploaded to
    pub fn set_texture(&mut self, texture: ImageId) {
        self.texture = Some(texture);
    }
}

impl GlyphAtlas for FontAtlas {
    fn is_valid(&self) -> bool {
        !self.glyphs.is_empty() && self.texture.is_some()
    }

    fn texture(&self) -> Option<ImageId> {
        self.texture
    }

    fn measure_text(&self, text: &str) -> (f32, f32) {
        let mut max_width: f32 = 0.0;
        let mut width = 0.0;
        let mut lines = 1;
        let mut prev: Option<char> = None;

        for ch in text.chars() {
            if ch == '\n' {
                max_width = max_width.max(width);
                width = 0.0;
                lines += 1;
                prev = None;
                continue;
            }
            if let Some(glyph) = self.glyph(ch) {
                if let Some(p) = prev {
                    width += self.kerning(p, ch);
                }
                width += glyph.advance;
            }
            prev = Some(ch);
        }

        (max_width.max(width), lines as f32 * self.metrics.line_height)
    }

    fn glyph(&self, ch: char) -> Option<GlyphInfo> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&' '))
            .copied()
    }

    fn kerning(&self, prev: char, ch: char) -> f32 {
        self.kerning.get(&(prev, ch)).copied().unwrap_or(0.0)
    }

    fn line_height(&self) -> f32 {
        self.metrics.line_height
    }

    fn ascent(&self) -> f32 {
        self.metrics.ascent
    }

    fn descent(&self) -> f32 {
        self.metrics.descent
    }
}

/// Copy a `width x height` coverage bitmap into the atlas at `(x, y)`
fn blit(atlas: &mut [u8], atlas_size: u32, x: u32, y: u32, src: &[u8], width: u32, height: u32) {
    let (w, stride) = (width as usize, atlas_size as usize);
    for row in 0..height as usize {
        let dst = (y as usize + row) * stride + x as usize;
        let src_row = &src[row * w..(row + 1) * w];
        atlas[dst..dst + w].copy_from_slice(src_row);
    }
}

/// Horizontal pair kerning from the `kern` table, in pixels
fn kerning_pairs(
    face: &ttf_parser::Face<'_>,
    glyph_ids: &[(char, ttf_parser::GlyphId)],
    scale: f32,
) -> FxHashMap<(char, char), f32> {
    let mut pairs = FxHashMap::default();
    let Some(kern) = face.tables().kern else {
        return pairs;
    };

    for subtable in kern.subtables {
        if !subtable.horizontal || subtable.variable {
            continue;
        }
        for &(left, left_id) in glyph_ids {
            for &(right, right_id) in glyph_ids {
                if let Some(value) = subtable.glyphs_kerning(left_id, right_id) {
                    if value != 0 {
                        *pairs.entry((left, right)).or_insert(0.0) += value as f32 * scale;
                    }
                }
            }
        }
    }
    pairs
}
