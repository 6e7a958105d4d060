//! Polyline stroking
//!
//! Each segment becomes a quad of the line width; joins and caps are small
//! triangle fans added on top. Widths are in device pixels.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::batch::Geometry;
use crate::paint::PaintSampler;
use crate::path::Point;

/// Triangles in a round cap half-disc
pub const ROUND_CAP_SEGMENTS: usize = 8;
/// Triangles per side of a round join
pub const ROUND_JOIN_SEGMENTS: usize = 4;
/// Segments shorter than this are skipped
pub const MIN_SEGMENT_LENGTH: f32 = 0.001;

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    /// Currently drawn like `Butt`
    Square,
}

/// Line join style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    /// Drawn as the bare overlap of the two segment quads
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    /// Stored but unused; miter joins are not extended
    pub miter_limit: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 10.0,
        }
    }
}

impl StrokeStyle {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    start: Point,
    end: Point,
    dir: Point,
    perp: Point,
}

impl Segment {
    fn new(start: Point, end: Point) -> Option<Self> {
        let delta = end - start;
        let len = delta.length();
        if len < MIN_SEGMENT_LENGTH {
            return None;
        }
        let dir = delta * (1.0 / len);
        Some(Self {
            start,
            end,
            dir,
            perp: dir.perp(),
        })
    }
}

/// Rotate `v` by `angle` radians
fn rotate(v: Point, angle: f32) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

struct StrokeBuilder<'a, 'p> {
    geometry: Geometry,
    sampler: &'a PaintSampler<'p>,
    half_width: f32,
}

impl StrokeBuilder<'_, '_> {
    fn triangle(&mut self, a: Point, b: Point, c: Point) {
        let color = self.sampler.average(&[a, b, c]);
        self.geometry.push_triangle(a, b, c, color);
    }

    fn quad(&mut self, a: Point, b: Point, c: Point, d: Point) {
        let color = self.sampler.average(&[a, b, c, d]);
        self.geometry.push_quad(a, b, c, d, color);
    }

    fn segment(&mut self, seg: &Segment) {
        let offset = seg.perp * self.half_width;
        self.quad(
            seg.start - offset,
            seg.start + offset,
            seg.end + offset,
            seg.end - offset,
        );
    }

    /// Half-disc fan around `center` bulging towards `outward`
    fn cap(&mut self, center: Point, outward: Point) {
        for j in 0..ROUND_CAP_SEGMENTS {
            let a0 = -FRAC_PI_2 + PI * j as f32 / ROUND_CAP_SEGMENTS as f32;
            let a1 = -FRAC_PI_2 + PI * (j + 1) as f32 / ROUND_CAP_SEGMENTS as f32;
            let c0 = center + rotate(outward, a0) * self.half_width;
            let c1 = center + rotate(outward, a1) * self.half_width;
            self.triangle(center, c0, c1);
        }
    }

    fn join(&mut self, join: LineJoin, at: Point, incoming: &Segment, outgoing: &Segment) {
        let hw = self.half_width;
        match join {
            LineJoin::Round => {
                for j in 0..ROUND_JOIN_SEGMENTS {
                    let t0 = j as f32 / ROUND_JOIN_SEGMENTS as f32;
                    let t1 = (j + 1) as f32 / ROUND_JOIN_SEGMENTS as f32;
                    let j0 = incoming.perp.lerp(outgoing.perp, t0) * hw;
                    let j1 = incoming.perp.lerp(outgoing.perp, t1) * hw;
                    self.triangle(at, at + j0, at + j1);
                    self.triangle(at, at - j0, at - j1);
                }
            }
            LineJoin::Bevel => {
                let a = incoming.perp * hw;
                let b = outgoing.perp * hw;
                self.triangle(at, at + a, at + b);
                self.triangle(at, at - a, at - b);
            }
            LineJoin::Miter => {}
        }
    }
}

/// Stroke a device-space polyline
///
/// Closed polylines also stroke the segment from the last point back to the
/// first and join around the wrap. Caps apply to open polylines only.
pub fn stroke_polyline(
    points: &[Point],
    closed: bool,
    style: &StrokeStyle,
    sampler: &PaintSampler<'_>,
) -> Geometry {
    if points.len() < 2 {
        return Geometry::new();
    }

    let mut segments: Vec<Segment> = points
        .windows(2)
        .filter_map(|pair| Segment::new(pair[0], pair[1]))
        .collect();
    if closed {
        if let Some(closing) = Segment::new(points[points.len() - 1], points[0]) {
            segments.push(closing);
        }
    }
    if segments.is_empty() {
        return Geometry::new();
    }

    let mut builder = StrokeBuilder {
        geometry: Geometry::new(),
        sampler,
        half_width: style.width * 0.5,
    };

    for seg in &segments {
        builder.segment(seg);
    }

    for pair in segments.windows(2) {
        builder.join(style.join, pair[0].end, &pair[0], &pair[1]);
    }

    if closed {
        if let (Some(last), Some(first)) = (segments.last(), segments.first()) {
            if segments.len() > 1 {
                builder.join(style.join, last.end, last, first);
            }
        }
    } else if style.cap == LineCap::Round {
        if let (Some(first), Some(last)) = (segments.first(), segments.last()) {
            builder.cap(first.start, -first.dir);
            builder.cap(last.end, last.dir);
        }
    }

    builder.geometry
}
