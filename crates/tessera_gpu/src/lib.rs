//! Tessera GPU Renderer
//!
//! wgpu backend for `tessera_paint` frames: one shader, a stencil-tested draw
//! pipeline and a stencil-writing clip pipeline, persistent geometry buffers
//! and renderer-owned image textures.

pub mod config;
pub mod error;
pub mod image;
pub mod renderer;
pub mod shaders;
pub mod upload;

pub use config::RendererConfig;
pub use error::{RendererError, Result};
pub use image::{GpuImage, ImageHandle};
pub use renderer::CanvasRenderer;
