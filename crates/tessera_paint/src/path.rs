//! Path building and representation
//!
//! A [`Path`] records drawing commands in logical (pre-transform) canvas
//! coordinates. Nothing is flattened here; see [`crate::tessellate`].

use std::ops::{Add, Mul, Neg, Sub};

use smallvec::SmallVec;

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Point) -> f32 {
        (self - other).length()
    }

    /// Left-hand perpendicular `(-y, x)`
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Unit vector in the same direction, or `None` for (near) zero length
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        if len < 1e-6 {
            None
        } else {
            Some(Point::new(self.x / len, self.y / len))
        }
    }

    /// Component-wise linear interpolation
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x * (1.0 - t) + other.x * t,
            self.y * (1.0 - t) + other.y * t,
        )
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Path command
///
/// A closed set of operations dispatched exhaustively by the tessellator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    },
    /// Resolved as a straight segment to `p2`; the rounded corner is not built.
    ArcTo {
        p1: Point,
        p2: Point,
        radius: f32,
    },
    QuadraticCurveTo {
        control: Point,
        end: Point,
    },
    BezierCurveTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    ClosePath,
}

/// A 2D path composed of commands
///
/// Besides the command list the path tracks a pen position (`cursor`) and the
/// start of the current subpath. Both are logical-space bookkeeping only.
#[derive(Clone, Debug, Default)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
    cursor: Point,
    subpath_start: Point,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Current pen position
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn subpath_start(&self) -> Point {
        self.subpath_start
    }

    /// Whether any subpath was closed with [`Path::close`]
    pub fn is_closed(&self) -> bool {
        self.commands
            .iter()
            .any(|cmd| matches!(cmd, PathCommand::ClosePath))
    }

    /// Drop all commands and move the pen back to the origin
    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = Point::ZERO;
        self.subpath_start = Point::ZERO;
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        let point = Point::new(x, y);
        self.commands.push(PathCommand::MoveTo(point));
        self.cursor = point;
        self.subpath_start = point;
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        let point = Point::new(x, y);
        self.commands.push(PathCommand::LineTo(point));
        self.cursor = point;
    }

    pub fn arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    ) {
        let center = Point::new(cx, cy);
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            counterclockwise,
        });
        self.cursor = arc_point(center, radius, end_angle);
    }

    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        let p2 = Point::new(x2, y2);
        self.commands.push(PathCommand::ArcTo {
            p1: Point::new(x1, y1),
            p2,
            radius,
        });
        self.cursor = p2;
    }

    pub fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        let end = Point::new(x, y);
        self.commands.push(PathCommand::QuadraticCurveTo {
            control: Point::new(cpx, cpy),
            end,
        });
        self.cursor = end;
    }

    pub fn bezier_curve_to(
        &mut self,
        cp1x: f32,
        cp1y: f32,
        cp2x: f32,
        cp2y: f32,
        x: f32,
        y: f32,
    ) {
        let end = Point::new(x, y);
        self.commands.push(PathCommand::BezierCurveTo {
            control1: Point::new(cp1x, cp1y),
            control2: Point::new(cp2x, cp2y),
            end,
        });
        self.cursor = end;
    }

    /// Close the current subpath. Does nothing on an empty path.
    pub fn close(&mut self) {
        if self.commands.is_empty() {
            return;
        }
        self.commands.push(PathCommand::ClosePath);
        self.cursor = self.subpath_start;
    }

    /// Closed rectangle subpath
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close();
    }
}

/// Point on a circle of `radius` around `center` at `angle` radians
pub(crate) fn arc_point(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_tracks_commands() {
        let mut path = Path::new();
        path.move_to(5.0, 5.0);
        path.line_to(10.0, 5.0);
        assert_eq!(path.cursor(), Point::new(10.0, 5.0));

        path.quadratic_curve_to(12.0, 8.0, 15.0, 15.0);
        assert_eq!(path.cursor(), Point::new(15.0, 15.0));

        path.close();
        assert_eq!(path.cursor(), Point::new(5.0, 5.0));
        assert!(path.is_closed());
    }

    #[test]
    fn test_close_on_empty_path_is_noop() {
        let mut path = Path::new();
        path.close();
        assert!(path.is_empty());
        assert!(!path.is_closed());
    }

    #[test]
    fn test_arc_moves_cursor_to_end_angle() {
        let mut path = Path::new();
        path.arc(0.0, 0.0, 10.0, 0.0, std::f32::consts::FRAC_PI_2, false);
        let cursor = path.cursor();
        assert!(cursor.x.abs() < 1e-4);
        assert!((cursor.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_rect_is_four_points_and_close() {
        let mut path = Path::new();
        path.rect(1.0, 2.0, 3.0, 4.0);
        assert_eq!(path.len(), 5);
        assert_eq!(path.commands()[4], PathCommand::ClosePath);
        assert_eq!(path.commands()[2], PathCommand::LineTo(Point::new(4.0, 6.0)));
    }

    #[test]
    fn test_clear_resets_pen() {
        let mut path = Path::new();
        path.move_to(3.0, 4.0);
        path.clear();
        assert!(path.is_empty());
        assert_eq!(path.cursor(), Point::ZERO);
        assert_eq!(path.subpath_start(), Point::ZERO);
    }
}
