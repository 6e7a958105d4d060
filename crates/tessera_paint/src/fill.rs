//! Polygon fill
//!
//! Triangulates flattened device-space polygons with lyon's sweep-line fill
//! tessellator and colors the result from a [`PaintSampler`].

use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};
use lyon::math::point;
use lyon::path::PathEvent;

use crate::batch::{CanvasVertex, Geometry};
use crate::paint::PaintSampler;
use crate::path::Point;

/// Triangles over a polygon's (possibly deduplicated) vertices
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
    pub vertices: Vec<Point>,
    pub indices: Vec<u32>,
}

impl Triangulation {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }
}

/// Single closed ring of lyon path events
fn polygon_events(points: &[Point]) -> Vec<PathEvent> {
    let mut events = Vec::with_capacity(points.len() + 1);
    let first = point(points[0].x, points[0].y);
    events.push(PathEvent::Begin { at: first });
    for pair in points.windows(2) {
        events.push(PathEvent::Line {
            from: point(pair[0].x, pair[0].y),
            to: point(pair[1].x, pair[1].y),
        });
    }
    let last = points[points.len() - 1];
    events.push(PathEvent::End {
        last: point(last.x, last.y),
        first,
        close: true,
    });
    events
}

/// Triangulate a polygon treated as one closed ring (non-zero rule)
///
/// Returns an empty triangulation for fewer than 3 points, non-finite input
/// or a failed tessellation.
pub fn triangulate(points: &[Point]) -> Triangulation {
    if points.len() < 3 {
        return Triangulation::default();
    }
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        tracing::debug!("skipping fill of polygon with non-finite points");
        return Triangulation::default();
    }

    let events = polygon_events(points);
    let mut geometry: VertexBuffers<Point, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();

    let options = FillOptions::default()
        .with_tolerance(0.1)
        .with_fill_rule(FillRule::NonZero);

    let result = tessellator.tessellate(
        events.iter().cloned(),
        &options,
        &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex| {
            let p = vertex.position();
            Point::new(p.x, p.y)
        }),
    );

    if let Err(err) = result {
        tracing::warn!("Polygon fill tessellation failed: {:?}", err);
        return Triangulation::default();
    }

    Triangulation {
        vertices: geometry.vertices,
        indices: geometry.indices,
    }
}

/// Fill a device-space polygon
///
/// Solid paint reuses the triangulation's shared vertices. Gradient paint
/// emits three vertices per triangle, each carrying the average of the
/// gradient sampled at the triangle's corners.
pub fn fill_polygon(points: &[Point], sampler: &PaintSampler<'_>) -> Geometry {
    let triangulation = triangulate(points);
    fill_triangulation(&triangulation, sampler)
}

/// Color an existing triangulation
pub fn fill_triangulation(triangulation: &Triangulation, sampler: &PaintSampler<'_>) -> Geometry {
    if triangulation.is_empty() {
        return Geometry::new();
    }

    if let Some(color) = sampler.solid_color() {
        return Geometry {
            vertices: triangulation
                .vertices
                .iter()
                .map(|p| CanvasVertex::solid(*p, color))
                .collect(),
            indices: triangulation.indices.clone(),
        };
    }

    let mut geometry = Geometry::new();
    geometry.vertices.reserve(triangulation.indices.len());
    geometry.indices.reserve(triangulation.indices.len());
    for [a, b, c] in triangulation.triangles() {
        let color = sampler.average(&[a, b, c]);
        geometry.push_triangle(a, b, c, color);
    }
    geometry
}
