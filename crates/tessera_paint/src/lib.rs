//! Tessera Paint/Canvas API
//!
//! A 2D drawing API modeled on the HTML5 canvas. Drawing calls are turned
//! into already-transformed triangle batches on the CPU; a backend such as
//! `tessera_gpu` submits them once per frame.
//!
//! # Features
//!
//! - Path drawing (lines, quadratic/cubic curves, arcs)
//! - Fills and strokes with solid colors or linear/radial/conic gradients
//! - Stencil-depth clipping with save/restore
//! - Text through a pluggable [`GlyphAtlas`]
//! - Image quads through a pluggable [`ImageSource`]

pub mod batch;
pub mod canvas;
pub mod color;
pub mod fill;
pub mod gradient;
pub mod image;
pub mod paint;
pub mod path;
pub mod primitives;
pub mod state;
pub mod stroke;
pub mod tessellate;
pub mod text;
pub mod transform;

pub use batch::{BatchAccumulator, CanvasVertex, DrawCategory, DrawCommand, Frame, Geometry};
pub use canvas::Canvas;
pub use color::Color;
pub use gradient::{Gradient, GradientKind, GradientStop, MAX_COLOR_STOPS};
pub use image::{ImageId, ImageSource};
pub use paint::{Paint, PaintSampler};
pub use path::{Path, PathCommand, Point};
pub use primitives::Rect;
pub use state::CanvasState;
pub use stroke::{LineCap, LineJoin, StrokeStyle};
pub use text::{GlyphAtlas, GlyphInfo, TextAlign, TextBaseline, TextMetrics};
pub use transform::Transform2D;
