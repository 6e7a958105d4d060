//! Geometric primitives

use crate::path::Point;
use crate::transform::Transform2D;

/// A rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Corners in top-left, top-right, bottom-right, bottom-left order
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Corners mapped through `transform`, same order as [`Rect::corners`]
    pub fn transformed_corners(&self, transform: &Transform2D) -> [Point; 4] {
        self.corners().map(|p| transform.transform_point(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_order() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            r.corners(),
            [
                Point::new(1.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(4.0, 6.0),
                Point::new(1.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_transformed_corners_keep_rotation() {
        let r = Rect::new(0.0, 0.0, 2.0, 1.0);
        let t = Transform2D::rotation(std::f32::consts::FRAC_PI_2);
        let c = r.transformed_corners(&t);
        assert!((c[1].x - 0.0).abs() < 1e-5 && (c[1].y - 2.0).abs() < 1e-5);
    }
}
