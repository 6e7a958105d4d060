//! HTML5-Canvas-style drawing context
//!
//! [`Canvas`] owns the drawing state stack, the current path and a
//! [`BatchAccumulator`]. Drawing calls are resolved into device-space
//! triangles immediately; [`Canvas::take_frame`] hands the batched result to a
//! backend.
//!
//! ```ignore
//! let mut canvas = Canvas::new(800, 600);
//! canvas.clear(Color::WHITE);
//! canvas.set_fill_color(Color::RED);
//! canvas.fill_rect(10.0, 10.0, 100.0, 50.0);
//! let frame = canvas.take_frame();
//! ```

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::batch::{BatchAccumulator, Frame};
use crate::color::Color;
use crate::fill::{fill_polygon, triangulate};
use crate::gradient::Gradient;
use crate::image::ImageSource;
use crate::paint::Paint;
use crate::path::{Path, Point};
use crate::primitives::Rect;
use crate::state::CanvasState;
use crate::stroke::{stroke_polyline, LineCap, LineJoin};
use crate::tessellate::{path_to_polygon, ARC_MAX_SEGMENTS};
use crate::text::{GlyphAtlas, TextAlign, TextBaseline, TextMetrics};
use crate::transform::Transform2D;

/// Number of "font not valid" warnings emitted per process
const MAX_FONT_WARNINGS: u32 = 5;

static FONT_WARNINGS: AtomicU32 = AtomicU32::new(0);

/// Deepest clip nesting an 8-bit stencil buffer can represent
pub const MAX_CLIP_DEPTH: u32 = 255;

/// Default segment count for [`Canvas::fill_circle`]
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 32;

/// Ratio of the hanging baseline to the ascent
const HANGING_BASELINE_RATIO: f32 = 0.8;

/// 2D drawing context
pub struct Canvas {
    width: u32,
    height: u32,
    clear_color: Color,
    state: CanvasState,
    stack: Vec<CanvasState>,
    path: Path,
    batch: BatchAccumulator,
    font: Option<Arc<dyn GlyphAtlas>>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            clear_color: Color::TRANSPARENT,
            state: CanvasState::default(),
            stack: Vec::new(),
            path: Path::new(),
            batch: BatchAccumulator::new(),
            font: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the canvas size; takes effect at the next frame
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_font(&mut self, font: Option<Arc<dyn GlyphAtlas>>) {
        self.font = font;
    }

    pub fn font(&self) -> Option<&Arc<dyn GlyphAtlas>> {
        self.font.as_ref()
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    /// Path being built
    pub fn current_path(&self) -> &Path {
        &self.path
    }

    // ---------------------------------------------------------------------
    // Frame control
    // ---------------------------------------------------------------------

    /// Begin a new frame cleared to `color`, discarding unsubmitted drawing
    ///
    /// The stencil buffer starts empty every frame, so clip regions do not
    /// survive into it.
    pub fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.batch.begin(self.width, self.height, color);
        self.state.clip_depth = 0;
        for saved in &mut self.stack {
            saved.clip_depth = 0;
        }
    }

    fn ensure_frame(&mut self) {
        if !self.batch.in_frame() {
            self.clear(self.clear_color);
        }
    }

    /// Finish the current frame and return it
    pub fn take_frame(&mut self) -> Frame {
        self.ensure_frame();
        self.batch.finish()
    }

    // ---------------------------------------------------------------------
    // Style
    // ---------------------------------------------------------------------

    pub fn set_fill_color(&mut self, color: Color) {
        self.state.fill = Paint::Solid(color);
    }

    pub fn set_fill_gradient(&mut self, gradient: impl Into<Arc<Gradient>>) {
        self.state.fill = Paint::Gradient(gradient.into());
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = Paint::Solid(color);
    }

    pub fn set_stroke_gradient(&mut self, gradient: impl Into<Arc<Gradient>>) {
        self.state.stroke = Paint::Gradient(gradient.into());
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    pub fn set_miter_limit(&mut self, limit: f32) {
        self.state.miter_limit = limit;
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.state.global_alpha = alpha;
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    // ---------------------------------------------------------------------
    // State stack
    // ---------------------------------------------------------------------

    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    /// Pop the last saved state; no-op when nothing was saved
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
            self.batch.set_clip_depth(self.state.clip_depth);
        }
    }

    // ---------------------------------------------------------------------
    // Transforms
    // ---------------------------------------------------------------------

    pub fn translate(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform.then_translate(x, y);
    }

    pub fn rotate(&mut self, radians: f32) {
        self.state.transform = self.state.transform.then_rotate(radians);
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform.then_scale(x, y);
    }

    /// Post-multiply an arbitrary transform
    pub fn transform_by(&mut self, transform: &Transform2D) {
        self.state.transform = self.state.transform.multiply(transform);
    }

    pub fn set_transform(&mut self, transform: Transform2D) {
        self.state.transform = transform;
    }

    pub fn reset_transform(&mut self) {
        self.state.transform = Transform2D::IDENTITY;
    }

    pub fn transform(&self) -> Transform2D {
        self.state.transform
    }

    // ---------------------------------------------------------------------
    // Gradients
    // ---------------------------------------------------------------------

    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Gradient {
        Gradient::linear(x0, y0, x1, y1)
    }

    pub fn create_radial_gradient(
        &self,
        x0: f32,
        y0: f32,
        r0: f32,
        x1: f32,
        y1: f32,
        r1: f32,
    ) -> Gradient {
        Gradient::radial(x0, y0, r0, x1, y1, r1)
    }

    pub fn create_conic_gradient(&self, start_angle: f32, x: f32, y: f32) -> Gradient {
        Gradient::conic(start_angle, x, y)
    }

    // ---------------------------------------------------------------------
    // Path
    // ---------------------------------------------------------------------

    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    pub fn close_path(&mut self) {
        self.path.close();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, y);
    }

    pub fn arc(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    ) {
        self.path
            .arc(x, y, radius, start_angle, end_angle, counterclockwise);
    }

    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        self.path.arc_to(x1, y1, x2, y2, radius);
    }

    pub fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        self.path.quadratic_curve_to(cpx, cpy, x, y);
    }

    pub fn bezier_curve_to(&mut self, cp1x: f32, cp1y: f32, cp2x: f32, cp2y: f32, x: f32, y: f32) {
        self.path.bezier_curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.path.rect(x, y, width, height);
    }

    /// Fill the current path
    pub fn fill(&mut self) {
        self.ensure_frame();
        let polygon = path_to_polygon(&self.path, &self.state.transform);
        if polygon.len() < 3 {
            return;
        }
        let geometry = fill_polygon(&polygon, &self.state.fill_sampler());
        self.batch.push_mesh(&geometry);
    }

    /// Stroke the current path
    pub fn stroke(&mut self) {
        self.ensure_frame();
        let polygon = path_to_polygon(&self.path, &self.state.transform);
        if polygon.len() < 2 {
            return;
        }
        let sampler = self.state.stroke_sampler();
        let geometry = stroke_polyline(
            &polygon,
            self.path.is_closed(),
            &self.state.stroke_style(),
            &sampler,
        );
        self.batch.push_mesh(&geometry);
    }

    /// Restrict later drawing to the current path
    ///
    /// The new region is intersected with the active clip. Past
    /// [`MAX_CLIP_DEPTH`] nested clips the call is ignored.
    pub fn clip(&mut self) {
        self.ensure_frame();
        if self.state.clip_depth >= MAX_CLIP_DEPTH {
            tracing::warn!(
                "clip: nesting limit of {} reached, ignoring clip",
                MAX_CLIP_DEPTH
            );
            return;
        }
        let polygon = path_to_polygon(&self.path, &self.state.transform);
        if polygon.len() < 3 {
            return;
        }
        let triangulation = triangulate(&polygon);
        if triangulation.is_empty() {
            return;
        }

        self.state.clip_depth += 1;
        self.batch.set_clip_depth(self.state.clip_depth);
        self.batch
            .push_clip(&triangulation.vertices, &triangulation.indices);
    }

    pub fn reset_clip(&mut self) {
        self.state.clip_depth = 0;
        self.batch.set_clip_depth(0);
    }

    // ---------------------------------------------------------------------
    // Convenience shapes
    // ---------------------------------------------------------------------

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ensure_frame();
        let [p0, p1, p2, p3] =
            Rect::new(x, y, width, height).transformed_corners(&self.state.transform);
        let sampler = self.state.fill_sampler();
        match sampler.solid_color() {
            Some(color) => self.batch.push_quad(p0, p1, p2, p3, color),
            None => {
                let c0 = sampler.color_at(p0);
                let c1 = sampler.color_at(p1);
                let c2 = sampler.color_at(p2);
                let c3 = sampler.color_at(p3);
                self.batch
                    .push_triangle(p0, p1, p2, Color::average(&[c0, c1, c2]));
                self.batch
                    .push_triangle(p0, p2, p3, Color::average(&[c0, c2, c3]));
            }
        }
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.begin_path();
        self.rect(x, y, width, height);
        self.stroke();
    }

    /// Draws a fully transparent quad; with source-over blending this leaves
    /// the target unchanged.
    pub fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ensure_frame();
        let [p0, p1, p2, p3] =
            Rect::new(x, y, width, height).transformed_corners(&self.state.transform);
        self.batch.push_quad(p0, p1, p2, p3, Color::TRANSPARENT);
    }

    /// Triangle fan circle with `segments` slices, clamped to `3..=ARC_MAX_SEGMENTS`
    pub fn fill_circle(&mut self, x: f32, y: f32, radius: f32, segments: u32) {
        self.ensure_frame();
        let segments = segments.clamp(3, ARC_MAX_SEGMENTS as u32);
        let transform = self.state.transform;
        let center = transform.transform_point(Point::new(x, y));

        let sampler = self.state.fill_sampler();
        let solid = sampler.solid_color();
        let center_color = sampler.color_at(center);

        let rim = |i: u32| {
            let angle = TAU * i as f32 / segments as f32;
            transform.transform_point(Point::new(
                x + radius * angle.cos(),
                y + radius * angle.sin(),
            ))
        };

        for i in 0..segments {
            let p0 = rim(i);
            let p1 = rim(i + 1);
            let color = match solid {
                Some(color) => color,
                None => Color::average(&[center_color, sampler.color_at(p0), sampler.color_at(p1)]),
            };
            self.batch.push_triangle(center, p0, p1, color);
        }
    }

    pub fn stroke_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, TAU, false);
        self.close_path();
        self.stroke();
    }

    // ---------------------------------------------------------------------
    // Images
    // ---------------------------------------------------------------------

    /// Draw an image at its natural size
    pub fn draw_image(&mut self, image: &dyn ImageSource, dx: f32, dy: f32) {
        let (w, h) = (image.width() as f32, image.height() as f32);
        self.draw_image_sized(image, dx, dy, w, h);
    }

    pub fn draw_image_sized(&mut self, image: &dyn ImageSource, dx: f32, dy: f32, dw: f32, dh: f32) {
        let src = Rect::from_size(image.width() as f32, image.height() as f32);
        self.draw_image_rect(image, src, Rect::new(dx, dy, dw, dh));
    }

    /// Draw the `src` region of `image` (pixels) into `dst` (logical units)
    pub fn draw_image_rect(&mut self, image: &dyn ImageSource, src: Rect, dst: Rect) {
        self.ensure_frame();
        let Some(id) = image.image_id() else {
            tracing::warn!("draw_image: image has no texture, skipping");
            return;
        };
        let (src_w, src_h) = (image.width() as f32, image.height() as f32);
        if src_w <= 0.0 || src_h <= 0.0 {
            tracing::warn!("draw_image: image has zero size, skipping");
            return;
        }

        let uv = [
            src.x / src_w,
            src.y / src_h,
            src.right() / src_w,
            src.bottom() / src_h,
        ];
        let corners = dst.transformed_corners(&self.state.transform);
        self.batch
            .push_image(id, corners, uv, self.state.global_alpha);
    }

    // ---------------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------------

    /// Font usable for drawing, warning (rate-limited) when there is none
    fn usable_font(&self, text: &str) -> Option<Arc<dyn GlyphAtlas>> {
        match &self.font {
            Some(font) if font.is_valid() && font.texture().is_some() => Some(Arc::clone(font)),
            _ => {
                if FONT_WARNINGS.fetch_add(1, Ordering::Relaxed) < MAX_FONT_WARNINGS {
                    tracing::warn!("fill_text: font not valid for text {:?}", text);
                }
                None
            }
        }
    }

    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.fill_text_spaced(text, x, y, 0.0);
    }

    /// Draw text with extra space after every glyph
    pub fn fill_text_spaced(&mut self, text: &str, x: f32, y: f32, letter_spacing: f32) {
        self.ensure_frame();
        let Some(font) = self.usable_font(text) else {
            return;
        };
        let Some(atlas) = font.texture() else {
            return;
        };

        let width = spaced_text_width(font.as_ref(), text, letter_spacing);

        let draw_x = match self.state.text_align {
            TextAlign::Start | TextAlign::Left => x,
            TextAlign::End | TextAlign::Right => x - width,
            TextAlign::Center => x - width / 2.0,
        };
        let draw_y = y + baseline_offset(self.state.text_baseline, font.ascent(), font.descent());

        let anchor = self
            .state
            .transform
            .transform_point(Point::new(draw_x, draw_y));
        let color = self.state.fill_sampler().color_at(anchor);

        layout_glyphs(font.as_ref(), text, anchor, letter_spacing, |corners, uv| {
            self.batch.push_text_quad(atlas, corners, uv, color);
        });
    }

    /// Draw text centered on `(x, y)` in both directions
    pub fn fill_text_centered(&mut self, text: &str, x: f32, y: f32, letter_spacing: f32) {
        match &self.font {
            Some(font) if font.is_valid() => {}
            _ => return,
        }
        let (align, baseline) = (self.state.text_align, self.state.text_baseline);
        self.state.text_align = TextAlign::Center;
        self.state.text_baseline = TextBaseline::Middle;
        self.fill_text_spaced(text, x, y, letter_spacing);
        self.state.text_align = align;
        self.state.text_baseline = baseline;
    }

    /// Width and height of `text` with the current font, zero without one
    pub fn measure_text(&self, text: &str) -> (f32, f32) {
        match &self.font {
            Some(font) if font.is_valid() => font.measure_text(text),
            _ => (0.0, 0.0),
        }
    }

    pub fn measure_text_metrics(&self, text: &str) -> TextMetrics {
        let font = match &self.font {
            Some(font) if font.is_valid() => font,
            _ => return TextMetrics::default(),
        };
        let (width, height) = font.measure_text(text);
        let ascent = font.ascent();
        let descent = font.descent();
        TextMetrics {
            width,
            height,
            actual_bounding_box_left: 0.0,
            actual_bounding_box_right: width,
            actual_bounding_box_ascent: ascent,
            actual_bounding_box_descent: -descent,
            font_bounding_box_ascent: ascent,
            font_bounding_box_descent: -descent,
        }
    }
}

/// Vertical shift from the requested anchor to the alphabetic baseline
///
/// `descent` is signed (negative below the baseline).
pub fn baseline_offset(baseline: TextBaseline, ascent: f32, descent: f32) -> f32 {
    match baseline {
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Top => ascent,
        TextBaseline::Hanging => ascent * HANGING_BASELINE_RATIO,
        TextBaseline::Middle => (ascent + descent) / 2.0,
        TextBaseline::Ideographic | TextBaseline::Bottom => descent,
    }
}

/// Width of the widest line once `letter_spacing` is added between glyphs
fn spaced_text_width(font: &dyn GlyphAtlas, text: &str, letter_spacing: f32) -> f32 {
    text.split('\n')
        .map(|line| {
            let (width, _) = font.measure_text(line);
            let gaps = line.chars().count().saturating_sub(1);
            width + letter_spacing * gaps as f32
        })
        .fold(0.0, f32::max)
}

/// Lay out glyph quads starting at `origin` (device space, on the baseline)
///
/// Calls `emit` with the quad corners (top-left, top-right, bottom-right,
/// bottom-left) and `[u0, v0, u1, v1]` for every drawable glyph.
pub fn layout_glyphs(
    font: &dyn GlyphAtlas,
    text: &str,
    origin: Point,
    letter_spacing: f32,
    mut emit: impl FnMut([Point; 4], [f32; 4]),
) {
    let mut cursor_x = origin.x;
    let mut cursor_y = origin.y;
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        if ch == '\n' {
            cursor_x = origin.x;
            cursor_y += font.line_height();
            prev = None;
            continue;
        }
        let Some(glyph) = font.glyph(ch) else {
            continue;
        };
        if let Some(prev) = prev {
            cursor_x += font.kerning(prev, ch);
        }

        let x0 = cursor_x + glyph.x_offset;
        let y0 = cursor_y + glyph.y_offset;
        let x1 = x0 + glyph.width;
        let y1 = y0 + glyph.height;
        emit(
            [
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
            glyph.uv,
        );

        cursor_x += glyph.advance + letter_spacing;
        prev = Some(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::DrawCommand;

    #[test]
    fn test_lazy_frame_begin_uses_last_clear_color() {
        let mut canvas = Canvas::new(64, 32);
        canvas.clear(Color::BLUE);
        let _ = canvas.take_frame();

        canvas.fill_rect(0.0, 0.0, 4.0, 4.0);
        let frame = canvas.take_frame();
        assert_eq!(frame.clear_color, Color::BLUE);
        assert_eq!(frame.width, 64);
        assert_eq!(frame.height, 32);
        assert_eq!(frame.commands.len(), 1);
    }

    #[test]
    fn test_take_frame_without_drawing_is_empty() {
        let mut canvas = Canvas::new(8, 8);
        let frame = canvas.take_frame();
        assert!(frame.commands.is_empty());
    }

    #[test]
    fn test_transform_post_multiplies() {
        let mut canvas = Canvas::new(100, 100);
        canvas.translate(10.0, 0.0);
        canvas.scale(2.0, 2.0);
        let p = canvas.transform().transform_point(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(12.0, 2.0));
        canvas.reset_transform();
        assert!(canvas.transform().is_identity());
    }

    #[test]
    fn test_restore_on_empty_stack_is_noop() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_line_width(5.0);
        canvas.restore();
        assert_eq!(canvas.state().line_width, 5.0);
    }

    #[test]
    fn test_save_restore_style() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_fill_color(Color::RED);
        canvas.save();
        canvas.set_fill_color(Color::GREEN);
        canvas.translate(3.0, 3.0);
        canvas.restore();
        assert_eq!(canvas.state().fill, Paint::Solid(Color::RED));
        assert!(canvas.transform().is_identity());
    }

    #[test]
    fn test_clip_with_too_few_points_is_noop() {
        let mut canvas = Canvas::new(10, 10);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(5.0, 5.0);
        canvas.clip();
        assert_eq!(canvas.state().clip_depth, 0);
        assert!(canvas.take_frame().commands.is_empty());
    }

    #[test]
    fn test_reset_clip() {
        let mut canvas = Canvas::new(10, 10);
        canvas.begin_path();
        canvas.rect(0.0, 0.0, 5.0, 5.0);
        canvas.clip();
        assert_eq!(canvas.state().clip_depth, 1);
        canvas.reset_clip();
        assert_eq!(canvas.state().clip_depth, 0);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        let frame = canvas.take_frame();
        let last = frame.commands.last().unwrap();
        assert_eq!(last.clip_depth(), 0);
    }

    #[test]
    fn test_clip_depth_stops_at_stencil_limit() {
        let mut canvas = Canvas::new(10, 10);
        canvas.begin_path();
        canvas.rect(0.0, 0.0, 5.0, 5.0);
        for _ in 0..MAX_CLIP_DEPTH + 3 {
            canvas.clip();
        }
        assert_eq!(canvas.state().clip_depth, MAX_CLIP_DEPTH);

        let frame = canvas.take_frame();
        let clips: Vec<u32> = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::ClipWrite { .. }))
            .map(|c| c.clip_depth())
            .collect();
        assert_eq!(clips.len(), MAX_CLIP_DEPTH as usize);
        assert_eq!(clips.last(), Some(&MAX_CLIP_DEPTH));
    }

    #[test]
    fn test_clear_rect_is_transparent_quad() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear_rect(0.0, 0.0, 10.0, 10.0);
        let frame = canvas.take_frame();
        let geometry = frame.commands[0].geometry();
        assert_eq!(geometry.triangle_count(), 2);
        assert!(geometry.vertices.iter().all(|v| v.color == [0.0; 4]));
    }

    #[test]
    fn test_fill_circle_fan() {
        let mut canvas = Canvas::new(100, 100);
        canvas.set_fill_color(Color::GREEN);
        canvas.fill_circle(50.0, 50.0, 10.0, 12);
        let frame = canvas.take_frame();
        assert_eq!(frame.commands[0].geometry().triangle_count(), 12);
    }

    #[test]
    fn test_fill_circle_gradient_averages_logical_samples() {
        let mut canvas = Canvas::new(200, 100);
        let mut gradient = canvas.create_linear_gradient(0.0, 0.0, 100.0, 0.0);
        gradient.add_color_stop(0.0, Color::BLACK);
        gradient.add_color_stop(1.0, Color::WHITE);
        canvas.set_fill_gradient(gradient);
        canvas.translate(100.0, 0.0);
        canvas.fill_circle(50.0, 0.0, 10.0, 4);

        let frame = canvas.take_frame();
        let geometry = frame.commands[0].geometry();
        assert_eq!(geometry.triangle_count(), 4);
        let red = |tri: usize| geometry.vertices[tri * 3].color[0];
        // center 0.5; rim samples 0.6, 0.5, 0.4, 0.5 around the fan
        assert!((red(0) - 1.6 / 3.0).abs() < 1e-4);
        assert!((red(1) - 1.4 / 3.0).abs() < 1e-4);
        assert!((red(2) - 1.4 / 3.0).abs() < 1e-4);
        assert!((red(3) - 1.6 / 3.0).abs() < 1e-4);
        assert_eq!(geometry.vertices[0].position, [150.0, 0.0]);
    }

    #[test]
    fn test_stroke_rect_is_closed_outline() {
        let mut canvas = Canvas::new(100, 100);
        canvas.set_line_width(2.0);
        canvas.stroke_rect(10.0, 10.0, 20.0, 20.0);
        let frame = canvas.take_frame();
        // four sides, miter joins add nothing
        assert_eq!(frame.commands[0].geometry().triangle_count(), 8);
        assert!(canvas.current_path().is_closed());
    }

    #[test]
    fn test_fill_rect_gradient_splits_triangles() {
        let mut canvas = Canvas::new(100, 100);
        let mut gradient = canvas.create_linear_gradient(0.0, 0.0, 100.0, 0.0);
        gradient.add_color_stop(0.0, Color::BLACK);
        gradient.add_color_stop(1.0, Color::WHITE);
        canvas.set_fill_gradient(gradient);
        canvas.fill_rect(0.0, 0.0, 100.0, 100.0);

        let frame = canvas.take_frame();
        let DrawCommand::SolidBatch { geometry, .. } = &frame.commands[0] else {
            panic!("expected solid batch");
        };
        assert_eq!(geometry.vertices.len(), 6);
        // (0 + 1 + 1) / 3 and (0 + 1 + 0) / 3
        assert!((geometry.vertices[0].color[0] - 2.0 / 3.0).abs() < 1e-5);
        assert!((geometry.vertices[3].color[0] - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_baseline_offsets() {
        let (ascent, descent) = (10.0, -4.0);
        assert_eq!(baseline_offset(TextBaseline::Alphabetic, ascent, descent), 0.0);
        assert_eq!(baseline_offset(TextBaseline::Top, ascent, descent), 10.0);
        assert_eq!(baseline_offset(TextBaseline::Hanging, ascent, descent), 8.0);
        assert_eq!(baseline_offset(TextBaseline::Middle, ascent, descent), 3.0);
        assert_eq!(baseline_offset(TextBaseline::Bottom, ascent, descent), -4.0);
        assert_eq!(baseline_offset(TextBaseline::Ideographic, ascent, descent), -4.0);
    }
}
