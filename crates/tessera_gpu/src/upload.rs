//! Frame geometry packing
//!
//! Every command's geometry is appended to one vertex array and one index
//! array; each draw keeps its own index range and base vertex so indices stay
//! local to their command.

use tessera_paint::{CanvasVertex, DrawCommand, Frame, ImageId};

/// How a packed draw is bound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawBinding {
    /// Stencil-only pass through the clip pipeline
    Clip,
    /// Draw pipeline with the 1x1 white texture
    White,
    /// Draw pipeline sampling a renderer image
    Image(ImageId),
}

/// One indexed draw inside the packed frame buffers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedDraw {
    pub binding: DrawBinding,
    pub clip_depth: u32,
    pub first_index: u32,
    pub index_count: u32,
    pub base_vertex: i32,
}

impl PackedDraw {
    /// Stencil reference for this draw
    ///
    /// A clip at depth `d` increments pixels that still hold its parent's
    /// depth `d - 1`; everything else draws where the stencil is at least
    /// its own depth.
    pub fn stencil_reference(&self) -> u32 {
        match self.binding {
            DrawBinding::Clip => self.clip_depth.saturating_sub(1),
            DrawBinding::White | DrawBinding::Image(_) => self.clip_depth,
        }
    }
}

/// Concatenated frame geometry plus the draws that replay it
#[derive(Debug, Default)]
pub struct PackedFrame {
    pub vertices: Vec<CanvasVertex>,
    pub indices: Vec<u32>,
    pub draws: Vec<PackedDraw>,
}

impl PackedFrame {
    /// Pack a frame in submission order, dropping empty commands
    pub fn pack(frame: &Frame) -> Self {
        let mut packed = PackedFrame {
            vertices: Vec::with_capacity(frame.total_vertices()),
            indices: Vec::with_capacity(frame.total_indices()),
            draws: Vec::new(),
        };

        for command in frame.submission_order() {
            let geometry = command.geometry();
            if geometry.indices.is_empty() || geometry.vertices.is_empty() {
                continue;
            }

            let binding = command_binding(command);

            packed.draws.push(PackedDraw {
                binding,
                clip_depth: command.clip_depth(),
                first_index: packed.indices.len() as u32,
                index_count: geometry.indices.len() as u32,
                base_vertex: packed.vertices.len() as i32,
            });
            packed.vertices.extend_from_slice(&geometry.vertices);
            packed.indices.extend_from_slice(&geometry.indices);
        }

        packed
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

/// Pipeline and texture a command draws with
pub fn command_binding(command: &DrawCommand) -> DrawBinding {
    match command {
        DrawCommand::ClipWrite { .. } => DrawBinding::Clip,
        DrawCommand::SolidBatch { .. } => DrawBinding::White,
        DrawCommand::TextBatch { atlas, .. } => DrawBinding::Image(*atlas),
        DrawCommand::ImageDraw { image, .. } => DrawBinding::Image(*image),
    }
}
