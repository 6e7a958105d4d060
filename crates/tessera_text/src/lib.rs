//! Glyph atlases for Tessera canvas text
//!
//! This crate provides:
//! - Font parsing and metrics (TTF/OTF via ttf-parser)
//! - Glyph rasterization (swash)
//! - Shelf packing of a fixed charset into one alpha bitmap
//! - A [`FontAtlas`] implementing `tessera_paint::GlyphAtlas`

pub mod atlas;
pub mod packer;
pub mod rasterizer;

pub use atlas::{AtlasConfig, FontAtlas};
pub use packer::ShelfPacker;
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};

use thiserror::Error;

/// Text setup errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Invalid font data")]
    InvalidFontData,

    #[error("Font has no glyphs for the requested charset")]
    NoGlyphs,

    #[error("Atlas of {size}x{size} is too small for the charset")]
    AtlasFull { size: u32 },
}

pub type Result<T> = std::result::Result<T, TextError>;
