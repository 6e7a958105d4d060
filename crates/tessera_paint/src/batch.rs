//! Draw batching
//!
//! The [`BatchAccumulator`] collects device-space triangles between clip
//! changes and turns them into [`DrawCommand`]s. It owns the authoritative
//! clip depth: every command it emits is tagged with the depth that was
//! active when its geometry was recorded.

use crate::color::Color;
use crate::image::ImageId;
use crate::path::Point;

/// UV used by untextured geometry (samples the backend's 1×1 white texture)
pub const SOLID_UV: [f32; 2] = [0.5, 0.5];

/// A vertex in device pixels
///
/// `color` is straight RGBA with global alpha already applied.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CanvasVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl CanvasVertex {
    pub fn solid(position: Point, color: Color) -> Self {
        Self {
            position: position.to_array(),
            uv: SOLID_UV,
            color: color.to_array(),
        }
    }

    pub fn textured(position: Point, uv: [f32; 2], color: Color) -> Self {
        Self {
            position: position.to_array(),
            uv,
            color: color.to_array(),
        }
    }
}

/// Indexed triangle list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<CanvasVertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    fn base(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Append one untextured triangle
    pub fn push_triangle(&mut self, a: Point, b: Point, c: Point, color: Color) {
        let base = self.base();
        self.vertices.extend([
            CanvasVertex::solid(a, color),
            CanvasVertex::solid(b, color),
            CanvasVertex::solid(c, color),
        ]);
        self.indices.extend([base, base + 1, base + 2]);
    }

    /// Append an untextured quad `a b c d` as triangles `abc` and `acd`
    pub fn push_quad(&mut self, a: Point, b: Point, c: Point, d: Point, color: Color) {
        let base = self.base();
        self.vertices.extend([
            CanvasVertex::solid(a, color),
            CanvasVertex::solid(b, color),
            CanvasVertex::solid(c, color),
            CanvasVertex::solid(d, color),
        ]);
        self.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Append a textured quad with per-corner UVs
    pub fn push_textured_quad(&mut self, corners: [Point; 4], uvs: [[f32; 2]; 4], color: Color) {
        let base = self.base();
        for (corner, uv) in corners.into_iter().zip(uvs) {
            self.vertices.push(CanvasVertex::textured(corner, uv, color));
        }
        self.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Append another geometry, rebasing its indices
    pub fn append(&mut self, other: &Geometry) {
        let base = self.base();
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// A finalized unit of GPU work
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Untextured triangles drawn with the white texture
    SolidBatch { geometry: Geometry, clip_depth: u32 },
    /// Glyph quads sampling an alpha atlas
    TextBatch {
        atlas: ImageId,
        geometry: Geometry,
        clip_depth: u32,
    },
    ImageDraw {
        image: ImageId,
        geometry: Geometry,
        clip_depth: u32,
    },
    /// Stencil-only write; `clip_depth` is the stencil reference written
    ClipWrite { geometry: Geometry, clip_depth: u32 },
}

/// Submission category, in submission order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawCategory {
    Clip,
    Solid,
    Text,
    Image,
}

impl DrawCommand {
    pub fn geometry(&self) -> &Geometry {
        match self {
            DrawCommand::SolidBatch { geometry, .. }
            | DrawCommand::TextBatch { geometry, .. }
            | DrawCommand::ImageDraw { geometry, .. }
            | DrawCommand::ClipWrite { geometry, .. } => geometry,
        }
    }

    pub fn clip_depth(&self) -> u32 {
        match self {
            DrawCommand::SolidBatch { clip_depth, .. }
            | DrawCommand::TextBatch { clip_depth, .. }
            | DrawCommand::ImageDraw { clip_depth, .. }
            | DrawCommand::ClipWrite { clip_depth, .. } => *clip_depth,
        }
    }

    /// Texture the command samples, `None` for the white texture or no color
    pub fn texture(&self) -> Option<ImageId> {
        match self {
            DrawCommand::TextBatch { atlas, .. } => Some(*atlas),
            DrawCommand::ImageDraw { image, .. } => Some(*image),
            DrawCommand::SolidBatch { .. } | DrawCommand::ClipWrite { .. } => None,
        }
    }

    pub fn category(&self) -> DrawCategory {
        match self {
            DrawCommand::ClipWrite { .. } => DrawCategory::Clip,
            DrawCommand::SolidBatch { .. } => DrawCategory::Solid,
            DrawCommand::TextBatch { .. } => DrawCategory::Text,
            DrawCommand::ImageDraw { .. } => DrawCategory::Image,
        }
    }
}

/// One frame of recorded drawing, ready for a backend
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub clear_color: Color,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Commands in backend submission order
    ///
    /// Every stencil write comes before any stencil-tested draw, then solid
    /// batches, text batches and images, each group in recording order. Draws
    /// of different categories therefore do not interleave: an image recorded
    /// before a solid fill still ends up above it.
    pub fn submission_order(&self) -> Vec<&DrawCommand> {
        let mut ordered: Vec<&DrawCommand> = self.commands.iter().collect();
        ordered.sort_by_key(|cmd| cmd.category());
        ordered
    }

    pub fn total_vertices(&self) -> usize {
        self.commands
            .iter()
            .map(|cmd| cmd.geometry().vertices.len())
            .sum()
    }

    pub fn total_indices(&self) -> usize {
        self.commands
            .iter()
            .map(|cmd| cmd.geometry().indices.len())
            .sum()
    }
}

/// Per-frame accumulator of draw geometry
#[derive(Debug, Default)]
pub struct BatchAccumulator {
    width: u32,
    height: u32,
    clear_color: Color,
    solid: Geometry,
    text: Geometry,
    text_atlas: Option<ImageId>,
    commands: Vec<DrawCommand>,
    clip_depth: u32,
    in_frame: bool,
}

impl BatchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame, discarding anything recorded so far
    pub fn begin(&mut self, width: u32, height: u32, clear_color: Color) {
        self.width = width;
        self.height = height;
        self.clear_color = clear_color;
        self.solid.clear();
        self.text.clear();
        self.text_atlas = None;
        self.commands.clear();
        self.clip_depth = 0;
        self.in_frame = true;
    }

    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    pub fn clip_depth(&self) -> u32 {
        self.clip_depth
    }

    /// Change the active clip depth
    ///
    /// Pending geometry is flushed under the old depth first so no batch ever
    /// spans two depths.
    pub fn set_clip_depth(&mut self, depth: u32) {
        if depth == self.clip_depth {
            return;
        }
        self.flush();
        self.clip_depth = depth;
    }

    pub fn push_triangle(&mut self, a: Point, b: Point, c: Point, color: Color) {
        self.solid.push_triangle(a, b, c, color);
    }

    pub fn push_quad(&mut self, a: Point, b: Point, c: Point, d: Point, color: Color) {
        self.solid.push_quad(a, b, c, d, color);
    }

    pub fn push_mesh(&mut self, mesh: &Geometry) {
        if mesh.is_empty() {
            return;
        }
        self.solid.append(mesh);
    }

    /// Append a glyph quad sampling `atlas`
    pub fn push_text_quad(
        &mut self,
        atlas: ImageId,
        corners: [Point; 4],
        uv: [f32; 4],
        color: Color,
    ) {
        if self.text_atlas != Some(atlas) {
            self.flush_text();
            self.text_atlas = Some(atlas);
        }
        let [u0, v0, u1, v1] = uv;
        self.text
            .push_textured_quad(corners, [[u0, v0], [u1, v0], [u1, v1], [u0, v1]], color);
    }

    /// Record a textured image quad
    ///
    /// `corners` run top-left, top-right, bottom-right, bottom-left.
    pub fn push_image(&mut self, image: ImageId, corners: [Point; 4], uv: [f32; 4], alpha: f32) {
        let mut geometry = Geometry::new();
        let [u0, v0, u1, v1] = uv;
        geometry.push_textured_quad(
            corners,
            [[u0, v0], [u1, v0], [u1, v1], [u0, v1]],
            Color::WHITE.with_alpha(alpha),
        );
        self.commands.push(DrawCommand::ImageDraw {
            image,
            geometry,
            clip_depth: self.clip_depth,
        });
    }

    /// Record a stencil write at the current clip depth
    pub fn push_clip(&mut self, vertices: &[Point], indices: &[u32]) {
        if vertices.is_empty() || indices.len() < 3 {
            return;
        }
        self.flush_solid();
        let geometry = Geometry {
            vertices: vertices
                .iter()
                .map(|p| CanvasVertex::solid(*p, Color::WHITE))
                .collect(),
            indices: indices.to_vec(),
        };
        self.commands.push(DrawCommand::ClipWrite {
            geometry,
            clip_depth: self.clip_depth,
        });
    }

    fn flush_solid(&mut self) {
        if self.solid.is_empty() {
            self.solid.clear();
            return;
        }
        self.commands.push(DrawCommand::SolidBatch {
            geometry: std::mem::take(&mut self.solid),
            clip_depth: self.clip_depth,
        });
    }

    fn flush_text(&mut self) {
        match self.text_atlas {
            Some(atlas) if !self.text.is_empty() => {
                self.commands.push(DrawCommand::TextBatch {
                    atlas,
                    geometry: std::mem::take(&mut self.text),
                    clip_depth: self.clip_depth,
                });
            }
            _ => self.text.clear(),
        }
    }

    /// Flush pending solid and text geometry into commands
    pub fn flush(&mut self) {
        self.flush_solid();
        self.flush_text();
    }

    /// Flush and hand over the frame
    pub fn finish(&mut self) -> Frame {
        self.flush();
        self.in_frame = false;
        self.text_atlas = None;
        Frame {
            width: self.width,
            height: self.height,
            clear_color: self.clear_color,
            commands: std::mem::take(&mut self.commands),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(batch: &mut BatchAccumulator) {
        batch.push_triangle(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Color::RED,
        );
    }

    #[test]
    fn test_begin_resets() {
        let mut batch = BatchAccumulator::new();
        batch.begin(10, 10, Color::BLACK);
        batch.set_clip_depth(3);
        tri(&mut batch);
        batch.begin(20, 20, Color::WHITE);
        assert_eq!(batch.clip_depth(), 0);
        let frame = batch.finish();
        assert!(frame.commands.is_empty());
        assert_eq!(frame.width, 20);
        assert_eq!(frame.clear_color, Color::WHITE);
    }

    #[test]
    fn test_depth_change_flushes_under_old_depth() {
        let mut batch = BatchAccumulator::new();
        batch.begin(10, 10, Color::BLACK);
        tri(&mut batch);
        batch.set_clip_depth(1);
        tri(&mut batch);
        tri(&mut batch);
        let frame = batch.finish();

        assert_eq!(frame.commands.len(), 2);
        assert_eq!(frame.commands[0].clip_depth(), 0);
        assert_eq!(frame.commands[0].geometry().triangle_count(), 1);
        assert_eq!(frame.commands[1].clip_depth(), 1);
        assert_eq!(frame.commands[1].geometry().triangle_count(), 2);
    }

    #[test]
    fn test_same_depth_does_not_flush() {
        let mut batch = BatchAccumulator::new();
        batch.begin(10, 10, Color::BLACK);
        tri(&mut batch);
        batch.set_clip_depth(0);
        tri(&mut batch);
        let frame = batch.finish();
        assert_eq!(frame.commands.len(), 1);
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut a = Geometry::new();
        a.push_triangle(Point::ZERO, Point::ZERO, Point::ZERO, Color::RED);
        let b = a.clone();
        a.append(&b);
        assert_eq!(a.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_text_atlas_switch_flushes() {
        let corners = [Point::ZERO; 4];
        let mut batch = BatchAccumulator::new();
        batch.begin(10, 10, Color::BLACK);
        batch.push_text_quad(ImageId(1), corners, [0.0, 0.0, 1.0, 1.0], Color::WHITE);
        batch.push_text_quad(ImageId(1), corners, [0.0, 0.0, 1.0, 1.0], Color::WHITE);
        batch.push_text_quad(ImageId(2), corners, [0.0, 0.0, 1.0, 1.0], Color::WHITE);
        let frame = batch.finish();

        assert_eq!(frame.commands.len(), 2);
        assert_eq!(frame.commands[0].texture(), Some(ImageId(1)));
        assert_eq!(frame.commands[0].geometry().triangle_count(), 4);
        assert_eq!(frame.commands[1].texture(), Some(ImageId(2)));
    }

    #[test]
    fn test_image_quad_layout() {
        let mut batch = BatchAccumulator::new();
        batch.begin(10, 10, Color::BLACK);
        batch.push_image(
            ImageId(7),
            [
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 2.0),
                Point::new(0.0, 2.0),
            ],
            [0.0, 0.0, 0.5, 1.0],
            0.25,
        );
        let frame = batch.finish();
        let geometry = frame.commands[0].geometry();
        assert_eq!(geometry.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(geometry.vertices[2].uv, [0.5, 1.0]);
        assert_eq!(geometry.vertices[0].color, [1.0, 1.0, 1.0, 0.25]);
    }

    #[test]
    fn test_submission_order_groups_by_category() {
        let mut batch = BatchAccumulator::new();
        batch.begin(10, 10, Color::BLACK);
        batch.push_image(ImageId(1), [Point::ZERO; 4], [0.0, 0.0, 1.0, 1.0], 1.0);
        tri(&mut batch);
        batch.set_clip_depth(1);
        batch.push_clip(&[Point::ZERO, Point::ZERO, Point::ZERO], &[0, 1, 2]);
        batch.push_text_quad(ImageId(2), [Point::ZERO; 4], [0.0, 0.0, 1.0, 1.0], Color::WHITE);
        tri(&mut batch);
        let frame = batch.finish();

        let order: Vec<DrawCategory> = frame
            .submission_order()
            .iter()
            .map(|cmd| cmd.category())
            .collect();
        assert_eq!(
            order,
            vec![
                DrawCategory::Clip,
                DrawCategory::Solid,
                DrawCategory::Solid,
                DrawCategory::Text,
                DrawCategory::Image,
            ]
        );
        let solids: Vec<u32> = frame
            .submission_order()
            .iter()
            .filter(|cmd| cmd.category() == DrawCategory::Solid)
            .map(|cmd| cmd.clip_depth())
            .collect();
        assert_eq!(solids, vec![0, 1]);
    }
}
