//! Atlas tests against an installed font; skipped when none is found

use std::sync::Arc;

use tessera_paint::{Canvas, Color, DrawCommand, GlyphAtlas, ImageId};
use tessera_text::{AtlasConfig, FontAtlas, TextError};

const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn system_font() -> Option<Vec<u8>> {
    CANDIDATES.iter().find_map(|path| std::fs::read(path).ok())
}

#[test]
fn test_builds_ascii_atlas() {
    let Some(data) = system_font() else {
        return;
    };
    let atlas = FontAtlas::from_bytes(&data, &AtlasConfig::default()).unwrap();

    assert_eq!(atlas.bitmap().len(), 512 * 512);
    assert!(atlas.glyph_count() >= 90);
    assert!(atlas.bitmap().iter().any(|&a| a > 0));
    assert!(atlas.ascent() > 0.0);
    assert!(atlas.descent() < 0.0);
    assert!(atlas.line_height() >= atlas.ascent() - atlas.descent());

    let a = atlas.glyph('A').unwrap();
    assert!(a.advance > 0.0);
    assert!(a.y_offset < 0.0);
    assert!(a.uv[2] > a.uv[0] && a.uv[3] > a.uv[1]);

    let space = atlas.glyph(' ').unwrap();
    assert_eq!(space.width, 0.0);
    assert_eq!(atlas.glyph('\u{4e2d}'), Some(space));
}

#[test]
fn test_measure_grows_with_text() {
    let Some(data) = system_font() else {
        return;
    };
    let atlas = FontAtlas::from_bytes(&data, &AtlasConfig::default()).unwrap();
    let (short, h1) = atlas.measure_text("Hi");
    let (long, h2) = atlas.measure_text("Hi there");
    assert!(long > short);
    assert_eq!(h1, h2);
    assert_eq!(atlas.measure_text("Hi\nHi").1, 2.0 * h1);
}

#[test]
fn test_tiny_atlas_is_full() {
    let Some(data) = system_font() else {
        return;
    };
    let config = AtlasConfig {
        atlas_size: 32,
        ..Default::default()
    };
    assert!(matches!(
        FontAtlas::from_bytes(&data, &config),
        Err(TextError::AtlasFull { size: 32 })
    ));
}

#[test]
fn test_canvas_draws_text_with_atlas() {
    let Some(data) = system_font() else {
        return;
    };
    let mut atlas = FontAtlas::from_bytes(&data, &AtlasConfig::default()).unwrap();
    atlas.set_texture(ImageId(11));

    let mut canvas = Canvas::new(200, 100);
    canvas.clear(Color::BLACK);
    canvas.set_font(Some(Arc::new(atlas)));
    canvas.set_fill_color(Color::WHITE);
    canvas.fill_text("Tessera", 10.0, 50.0);

    let frame = canvas.take_frame();
    let text: Vec<_> = frame
        .commands
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::TextBatch {
                atlas, geometry, ..
            } => Some((*atlas, geometry.triangle_count())),
            _ => None,
        })
        .collect();
    assert_eq!(text, vec![(ImageId(11), 14)]);
}
