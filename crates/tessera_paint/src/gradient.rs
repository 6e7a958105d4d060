//! Gradient fills
//!
//! Gradients are defined in logical (pre-transform) space and evaluated on the
//! CPU at vertex positions. There is no per-pixel gradient shader.

use std::f32::consts::{PI, TAU};

use smallvec::SmallVec;

use crate::color::Color;
use crate::path::Point;

/// Maximum number of color stops per gradient
pub const MAX_COLOR_STOPS: usize = 16;

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32, // 0.0 to 1.0
    pub color: Color,
}

/// Gradient geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientKind {
    Linear {
        p0: Point,
        p1: Point,
    },
    /// Two circles; `t` runs over the radius interval `r0..r1` measured from `p0`
    Radial {
        p0: Point,
        r0: f32,
        p1: Point,
        r1: f32,
    },
    Conic {
        center: Point,
        start_angle: f32,
    },
}

/// A gradient: geometry plus an offset-sorted list of color stops
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    kind: GradientKind,
    stops: SmallVec<[GradientStop; 4]>,
}

impl Gradient {
    pub fn new(kind: GradientKind) -> Self {
        Self {
            kind,
            stops: SmallVec::new(),
        }
    }

    pub fn linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(GradientKind::Linear {
            p0: Point::new(x0, y0),
            p1: Point::new(x1, y1),
        })
    }

    pub fn radial(x0: f32, y0: f32, r0: f32, x1: f32, y1: f32, r1: f32) -> Self {
        Self::new(GradientKind::Radial {
            p0: Point::new(x0, y0),
            r0,
            p1: Point::new(x1, y1),
            r1,
        })
    }

    pub fn conic(start_angle: f32, x: f32, y: f32) -> Self {
        Self::new(GradientKind::Conic {
            center: Point::new(x, y),
            start_angle,
        })
    }

    /// Create a simple linear gradient between two colors
    pub fn linear_simple(start: Point, end: Point, from: Color, to: Color) -> Self {
        let mut gradient = Self::linear(start.x, start.y, end.x, end.y);
        gradient.add_color_stop(0.0, from);
        gradient.add_color_stop(1.0, to);
        gradient
    }

    pub fn kind(&self) -> &GradientKind {
        &self.kind
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Insert a color stop
    ///
    /// `offset` is clamped to `[0, 1]`. Stops with equal offsets keep their
    /// insertion order. Stops past [`MAX_COLOR_STOPS`] are dropped.
    pub fn add_color_stop(&mut self, offset: f32, color: Color) {
        if self.stops.len() >= MAX_COLOR_STOPS {
            tracing::warn!(
                "gradient already has {} color stops, ignoring stop at {}",
                MAX_COLOR_STOPS,
                offset
            );
            return;
        }
        let offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, 1.0)
        };
        let index = self.stops.partition_point(|stop| stop.offset <= offset);
        self.stops.insert(index, GradientStop { offset, color });
    }

    /// Gradient parameter at `position` (logical space), clamped to `[0, 1]`
    pub fn parameter(&self, position: Point) -> f32 {
        let t = match self.kind {
            GradientKind::Linear { p0, p1 } => {
                let axis = p1 - p0;
                let len_sq = axis.dot(axis);
                if len_sq > 1e-4 {
                    (position - p0).dot(axis) / len_sq
                } else {
                    0.0
                }
            }
            GradientKind::Radial { p0, r0, r1, .. } => {
                let dist = position.distance(p0);
                let range = r1 - r0;
                if range.abs() > 1e-4 {
                    (dist - r0) / range
                } else if dist <= r0 {
                    0.0
                } else {
                    1.0
                }
            }
            GradientKind::Conic {
                center,
                start_angle,
            } => {
                let d = position - center;
                let angle = d.y.atan2(d.x) - start_angle;
                let t = (angle + PI) / TAU;
                t - t.floor()
            }
        };
        if t.is_nan() {
            0.0
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    /// Evaluate the gradient color at `position` (logical space)
    pub fn sample(&self, position: Point) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::BLACK,
        };
        if self.stops.len() == 1 {
            return first.color;
        }

        let t = self.parameter(position);
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.offset && t <= b.offset {
                let range = b.offset - a.offset;
                let local = if range > 1e-4 {
                    (t - a.offset) / range
                } else {
                    0.0
                };
                return a.color.lerp(b.color, local);
            }
        }

        last.color
    }
}
