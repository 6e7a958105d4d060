//! Fill/stroke paint and per-vertex color evaluation

use std::sync::Arc;

use crate::color::Color;
use crate::gradient::Gradient;
use crate::path::Point;
use crate::transform::Transform2D;

/// What a fill or stroke is colored with
///
/// Cloning copies the gradient handle, not the gradient.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(Arc<Gradient>),
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Color::BLACK)
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<Arc<Gradient>> for Paint {
    fn from(gradient: Arc<Gradient>) -> Self {
        Paint::Gradient(gradient)
    }
}

impl Paint {
    pub fn is_gradient(&self) -> bool {
        matches!(self, Paint::Gradient(_))
    }
}

/// Evaluates a [`Paint`] at device-space positions
///
/// Gradient positions are mapped back into logical space through the inverse
/// of the drawing transform. A singular transform leaves positions in device
/// space.
#[derive(Clone, Copy, Debug)]
pub struct PaintSampler<'a> {
    paint: &'a Paint,
    global_alpha: f32,
    inverse: Option<Transform2D>,
}

impl<'a> PaintSampler<'a> {
    pub fn new(paint: &'a Paint, global_alpha: f32, transform: &Transform2D) -> Self {
        let inverse = if paint.is_gradient() && !transform.is_identity() {
            transform.inverse()
        } else {
            None
        };
        Self {
            paint,
            global_alpha,
            inverse,
        }
    }

    /// The alpha-modulated color if the paint is solid
    pub fn solid_color(&self) -> Option<Color> {
        match self.paint {
            Paint::Solid(color) => Some(color.fade(self.global_alpha)),
            Paint::Gradient(_) => None,
        }
    }

    /// Alpha-modulated color at a device-space position
    pub fn color_at(&self, device: Point) -> Color {
        match self.paint {
            Paint::Solid(color) => color.fade(self.global_alpha),
            Paint::Gradient(gradient) => {
                let logical = match &self.inverse {
                    Some(inverse) => inverse.transform_point(device),
                    None => device,
                };
                gradient.sample(logical).fade(self.global_alpha)
            }
        }
    }

    /// Average of [`PaintSampler::color_at`] over a set of corners
    pub fn average(&self, corners: &[Point]) -> Color {
        if let Some(color) = self.solid_color() {
            return color;
        }
        let mut samples: smallvec::SmallVec<[Color; 4]> =
            corners.iter().map(|p| self.color_at(*p)).collect();
        if samples.is_empty() {
            samples.push(self.color_at(Point::ZERO));
        }
        Color::average(&samples)
    }
}
