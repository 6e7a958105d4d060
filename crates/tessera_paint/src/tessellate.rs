//! Path flattening
//!
//! Converts a [`Path`] into an ordered polygon of device-space points. Curves
//! and arcs are sampled at fixed or length-derived resolutions and every
//! sample is pushed through the transform individually.

use std::f32::consts::TAU;

use crate::path::{arc_point, Path, PathCommand, Point};
use crate::transform::Transform2D;

/// Lower bound on arc segments regardless of radius
pub const ARC_MIN_SEGMENTS: usize = 8;
/// Upper bound on arc segments, reached only by very large radii
pub const ARC_MAX_SEGMENTS: usize = 1 << 16;
/// Approximate arc length (logical units) covered by one arc segment
pub const ARC_SEGMENT_LENGTH: f32 = 4.0;
/// Samples per quadratic Bézier
pub const QUADRATIC_SEGMENTS: usize = 16;
/// Samples per cubic Bézier
pub const CUBIC_SEGMENTS: usize = 20;

/// Arc start samples closer than this to the previous point are dropped
const COINCIDENT_EPSILON: f32 = 0.01;

/// Sweep from `start` to `end`, wrapped into the requested direction
///
/// Clockwise sweeps land in `[0, 2π]`, counter-clockwise in `[-2π, 0]`. An
/// input already spanning a full turn in the requested direction stays a full
/// turn.
pub fn arc_sweep(start_angle: f32, end_angle: f32, counterclockwise: bool) -> f32 {
    let sweep = end_angle - start_angle;
    if counterclockwise {
        if sweep <= -TAU {
            -TAU
        } else {
            -((-sweep).rem_euclid(TAU))
        }
    } else if sweep >= TAU {
        TAU
    } else {
        sweep.rem_euclid(TAU)
    }
}

/// Number of segments used for an arc of the given sweep and radius
///
/// Clamped to `[ARC_MIN_SEGMENTS, ARC_MAX_SEGMENTS]`; a non-finite arc length
/// gets the minimum.
pub fn arc_segments(sweep: f32, radius: f32) -> usize {
    let length = (sweep * radius).abs();
    if !length.is_finite() {
        return ARC_MIN_SEGMENTS;
    }
    ((length / ARC_SEGMENT_LENGTH) as usize).clamp(ARC_MIN_SEGMENTS, ARC_MAX_SEGMENTS)
}

fn quadratic_point(p0: Point, c: Point, p1: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    p0 * (mt * mt) + c * (2.0 * mt * t) + p1 * (t * t)
}

fn cubic_point(p0: Point, c0: Point, c1: Point, p1: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;
    p0 * (mt2 * mt) + c0 * (3.0 * mt2 * t) + c1 * (3.0 * mt * t2) + p1 * (t2 * t)
}

/// Flatten `path` into transformed points
///
/// Closing a subpath does not duplicate its first point; callers decide how
/// to treat closure (see [`Path::is_closed`]).
pub fn path_to_polygon(path: &Path, transform: &Transform2D) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::with_capacity(path.len() * 4);
    let mut cursor = Point::ZERO;
    let mut subpath_start = Point::ZERO;

    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => {
                cursor = p;
                subpath_start = p;
                points.push(transform.transform_point(p));
            }
            PathCommand::LineTo(p) => {
                cursor = p;
                points.push(transform.transform_point(p));
            }
            PathCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                counterclockwise,
            } => {
                let sweep = arc_sweep(start_angle, end_angle, counterclockwise);
                let segments = arc_segments(sweep, radius);

                for i in 0..=segments {
                    let t = i as f32 / segments as f32;
                    let angle = start_angle + sweep * t;
                    let p = transform.transform_point(arc_point(center, radius, angle));
                    if i == 0 {
                        if let Some(last) = points.last() {
                            if last.distance(p) <= COINCIDENT_EPSILON {
                                continue;
                            }
                        }
                    }
                    points.push(p);
                }
                cursor = arc_point(center, radius, end_angle);
            }
            PathCommand::ArcTo { p2, .. } => {
                cursor = p2;
                points.push(transform.transform_point(p2));
            }
            PathCommand::QuadraticCurveTo { control, end } => {
                for i in 1..=QUADRATIC_SEGMENTS {
                    let t = i as f32 / QUADRATIC_SEGMENTS as f32;
                    points.push(transform.transform_point(quadratic_point(cursor, control, end, t)));
                }
                cursor = end;
            }
            PathCommand::BezierCurveTo {
                control1,
                control2,
                end,
            } => {
                for i in 1..=CUBIC_SEGMENTS {
                    let t = i as f32 / CUBIC_SEGMENTS as f32;
                    points.push(
                        transform.transform_point(cubic_point(cursor, control1, control2, end, t)),
                    );
                }
                cursor = end;
            }
            PathCommand::ClosePath => {
                cursor = subpath_start;
            }
        }
    }

    points
}
