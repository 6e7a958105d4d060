//! Canvas drawing state

use crate::paint::{Paint, PaintSampler};
use crate::stroke::{LineCap, LineJoin, StrokeStyle};
use crate::text::{TextAlign, TextBaseline};
use crate::transform::Transform2D;

/// Everything `save`/`restore` snapshots
///
/// `clip_depth` mirrors the batch accumulator's active depth; it is pushed
/// back to the accumulator on restore.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasState {
    pub transform: Transform2D,
    pub fill: Paint,
    pub stroke: Paint,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    pub global_alpha: f32,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub clip_depth: u32,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            fill: Paint::default(),
            stroke: Paint::default(),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            global_alpha: 1.0,
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
            clip_depth: 0,
        }
    }
}

impl CanvasState {
    pub fn fill_sampler(&self) -> PaintSampler<'_> {
        PaintSampler::new(&self.fill, self.global_alpha, &self.transform)
    }

    pub fn stroke_sampler(&self) -> PaintSampler<'_> {
        PaintSampler::new(&self.stroke, self.global_alpha, &self.transform)
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.line_width,
            cap: self.line_cap,
            join: self.line_join,
            miter_limit: self.miter_limit,
        }
    }
}
