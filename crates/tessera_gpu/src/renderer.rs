//! GPU renderer implementation
//!
//! Replays a [`Frame`] recorded by `tessera_paint::Canvas` in a single render
//! pass. Clip geometry runs through a color-masked pipeline that increments
//! the stencil only where the parent clip already holds, so nested clips
//! intersect. Everything else is drawn with stencil `LessEqual` against the
//! command's clip depth.

use std::collections::HashMap;
use std::sync::Arc;

use tessera_paint::{CanvasVertex, Frame, ImageId};

use crate::config::{
    apply_renderer_config_overrides, grown_capacity, log_renderer_config, RendererConfig,
};
use crate::error::{RendererError, Result};
use crate::image::{alpha_to_rgba, padded_bytes_per_row, unpad_to_rgba, GpuImage, ImageHandle};
use crate::shaders::CANVAS_SHADER;
use crate::upload::{DrawBinding, PackedFrame};

const STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Stencil8;
const VERTEX_SIZE: u64 = std::mem::size_of::<CanvasVertex>() as u64;
const INDEX_SIZE: u64 = std::mem::size_of::<u32>() as u64;

/// Uniforms shared by every draw: `[width, height, 0, 0]`
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct CanvasUniforms {
    resolution: [f32; 2],
    _padding: [f32; 2],
}

/// An uploaded image with its cached bind group
struct ImageEntry {
    image: GpuImage,
    bind_group: wgpu::BindGroup,
}

/// Size-dependent attachments, recreated when the frame size changes
struct FrameTargets {
    width: u32,
    height: u32,
    stencil_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
}

/// A growable GPU buffer holding `capacity` elements
struct GrowableBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    initial: usize,
    element_size: u64,
    usage: wgpu::BufferUsages,
    label: &'static str,
}

impl GrowableBuffer {
    fn new(
        device: &wgpu::Device,
        label: &'static str,
        usage: wgpu::BufferUsages,
        element_size: u64,
        capacity: usize,
    ) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64 * element_size,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity,
            initial: capacity,
            element_size,
            usage,
            label,
        }
    }

    fn ensure(&mut self, device: &wgpu::Device, needed: usize) {
        let capacity = grown_capacity(self.capacity, needed, self.initial);
        if capacity == self.capacity {
            return;
        }
        tracing::debug!(
            "growing {}: {} -> {} elements",
            self.label,
            self.capacity,
            capacity
        );
        *self = Self {
            initial: self.initial,
            ..Self::new(device, self.label, self.usage, self.element_size, capacity)
        };
    }
}

/// Canvas renderer backed by wgpu
pub struct CanvasRenderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: RendererConfig,
    format: wgpu::TextureFormat,
    draw_pipeline: wgpu::RenderPipeline,
    clip_pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    white: ImageEntry,
    images: HashMap<ImageId, ImageEntry>,
    next_image_id: u64,
    vertices: GrowableBuffer,
    indices: GrowableBuffer,
    targets: Option<FrameTargets>,
}

impl CanvasRenderer {
    /// Create a renderer on an existing device
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        config: RendererConfig,
    ) -> Self {
        let config = apply_renderer_config_overrides(config);
        log_renderer_config(&config);
        let format = config.texture_format();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Shader"),
            source: wgpu::ShaderSource::Wgsl(CANVAS_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Canvas Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Canvas Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let draw_pipeline = create_canvas_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            config.sample_count,
            PipelineKind::Draw,
        );
        let clip_pipeline = create_canvas_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            config.sample_count,
            PipelineKind::Clip,
        );

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Canvas Uniforms"),
            size: std::mem::size_of::<CanvasUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let white_image = GpuImage::from_rgba(
            &device,
            &queue,
            &[255, 255, 255, 255],
            1,
            1,
            Some("Canvas White Texture"),
        );
        let white = ImageEntry {
            bind_group: create_image_bind_group(
                &device,
                &bind_group_layout,
                &uniform_buffer,
                &sampler,
                &white_image,
            ),
            image: white_image,
        };

        let vertices = GrowableBuffer::new(
            &device,
            "Canvas Vertex Buffer",
            wgpu::BufferUsages::VERTEX,
            VERTEX_SIZE,
            config.initial_vertex_capacity,
        );
        let indices = GrowableBuffer::new(
            &device,
            "Canvas Index Buffer",
            wgpu::BufferUsages::INDEX,
            INDEX_SIZE,
            config.initial_index_capacity,
        );

        Self {
            device,
            queue,
            config,
            format,
            draw_pipeline,
            clip_pipeline,
            bind_group_layout,
            sampler,
            uniform_buffer,
            white,
            images: HashMap::new(),
            next_image_id: 1,
            vertices,
            indices,
            targets: None,
        }
    }

    /// Create a renderer on its own device, without a surface
    pub async fn headless(config: RendererConfig) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RendererError::AdapterNotFound)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Tessera GPU Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await?;

        Ok(Self::new(Arc::new(device), Arc::new(queue), config))
    }

    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    pub fn queue(&self) -> &Arc<wgpu::Queue> {
        &self.queue
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Color format render targets must use
    pub fn texture_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Upload tightly packed RGBA8 pixels as a new image
    pub fn create_image(&mut self, rgba: &[u8], width: u32, height: u32) -> Result<ImageHandle> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected || width == 0 || height == 0 {
            return Err(RendererError::ImageSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        let id = ImageId(self.next_image_id);
        self.next_image_id += 1;

        let image = GpuImage::from_rgba(
            &self.device,
            &self.queue,
            rgba,
            width,
            height,
            Some("Canvas Image"),
        );
        let bind_group = create_image_bind_group(
            &self.device,
            &self.bind_group_layout,
            &self.uniform_buffer,
            &self.sampler,
            &image,
        );
        self.images.insert(id, ImageEntry { image, bind_group });

        Ok(ImageHandle { id, width, height })
    }

    /// Upload a single-channel coverage bitmap (e.g. a glyph atlas)
    pub fn create_alpha_atlas(
        &mut self,
        alpha: &[u8],
        width: u32,
        height: u32,
    ) -> Result<ImageHandle> {
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(RendererError::ImageSizeMismatch {
                expected,
                actual: alpha.len(),
            });
        }
        self.create_image(&alpha_to_rgba(alpha), width, height)
    }

    /// Overwrite part of an existing image; out-of-bounds pixels are dropped
    pub fn update_image(&self, id: ImageId, x: u32, y: u32, width: u32, height: u32, rgba: &[u8]) {
        match self.images.get(&id) {
            Some(entry) => entry
                .image
                .write_rgba_sub_rect(&self.queue, x, y, width, height, rgba),
            None => tracing::debug!("update_image: unknown image {:?}", id),
        }
    }

    /// Release an image; returns whether it existed
    pub fn remove_image(&mut self, id: ImageId) -> bool {
        self.images.remove(&id).is_some()
    }

    pub fn has_image(&self, id: ImageId) -> bool {
        self.images.contains_key(&id)
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Create a texture usable as a `render` target and a readback source
    pub fn create_target_texture(&self, width: u32, height: u32) -> wgpu::Texture {
        self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        })
    }

    fn ensure_targets(&mut self, width: u32, height: u32) {
        if let Some(targets) = &self.targets {
            if targets.width == width && targets.height == height {
                return;
            }
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let sample_count = self.config.sample_count;

        let stencil = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Stencil"),
            size,
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: STENCIL_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let msaa_view = (sample_count > 1).then(|| {
            self.device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("Canvas MSAA Color"),
                    size,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format: self.format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        tracing::debug!("canvas targets resized to {}x{}", width, height);
        self.targets = Some(FrameTargets {
            width,
            height,
            stencil_view: stencil.create_view(&wgpu::TextureViewDescriptor::default()),
            msaa_view,
        });
    }

    /// Render a frame into `target`, which must be `frame.width x frame.height`
    pub fn render(&mut self, frame: &Frame, target: &wgpu::TextureView) {
        if frame.width == 0 || frame.height == 0 {
            return;
        }
        self.ensure_targets(frame.width, frame.height);

        let uniforms = CanvasUniforms {
            resolution: [frame.width as f32, frame.height as f32],
            _padding: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let packed = PackedFrame::pack(frame);
        if !packed.is_empty() {
            self.vertices.ensure(&self.device, packed.vertices.len());
            self.indices.ensure(&self.device, packed.indices.len());
            self.queue.write_buffer(
                &self.vertices.buffer,
                0,
                bytemuck::cast_slice(&packed.vertices),
            );
            self.queue.write_buffer(
                &self.indices.buffer,
                0,
                bytemuck::cast_slice(&packed.indices),
            );
        }

        let Some(targets) = &self.targets else {
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Encoder"),
            });

        {
            let (view, resolve_target) = match &targets.msaa_view {
                Some(msaa) => (msaa, Some(target)),
                None => (target, None),
            };
            let clear = frame.clear_color;

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &targets.stencil_view,
                    depth_ops: None,
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Discard,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !packed.is_empty() {
                pass.set_vertex_buffer(0, self.vertices.buffer.slice(..));
                pass.set_index_buffer(self.indices.buffer.slice(..), wgpu::IndexFormat::Uint32);
            }

            let mut clipping: Option<bool> = None;
            for draw in &packed.draws {
                let (is_clip, bind_group) = match draw.binding {
                    DrawBinding::Clip => (true, &self.white.bind_group),
                    DrawBinding::White => (false, &self.white.bind_group),
                    DrawBinding::Image(id) => match self.images.get(&id) {
                        Some(entry) => (false, &entry.bind_group),
                        None => {
                            tracing::debug!("skipping draw with unknown image {:?}", id);
                            continue;
                        }
                    },
                };

                if clipping != Some(is_clip) {
                    pass.set_pipeline(if is_clip {
                        &self.clip_pipeline
                    } else {
                        &self.draw_pipeline
                    });
                    clipping = Some(is_clip);
                }
                pass.set_bind_group(0, bind_group, &[]);
                pass.set_stencil_reference(draw.stencil_reference());
                pass.draw_indexed(
                    draw.first_index..draw.first_index + draw.index_count,
                    draw.base_vertex,
                    0..1,
                );
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Copy a target texture back to tightly packed RGBA8
    ///
    /// Blocks until the GPU has finished; intended for headless use and tests.
    pub fn read_texture_rgba(&self, texture: &wgpu::Texture) -> Result<Vec<u8>> {
        let width = texture.width();
        let height = texture.height();
        let format = texture.format();
        let bytes_per_row = padded_bytes_per_row(width);

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessera_readback"),
            size: bytes_per_row as u64 * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tessera_readback_encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).ok();
        });
        self.device.poll(wgpu::Maintain::Wait);
        rx.recv().unwrap_or(Err(wgpu::BufferAsyncError))?;

        let data = slice.get_mapped_range();
        let rgba = unpad_to_rgba(format, &data, width, height);
        drop(data);
        buffer.unmap();

        rgba.ok_or(RendererError::UnsupportedFormat(format))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PipelineKind {
    /// Color draw, stencil-tested against the clip depth
    Draw,
    /// Stencil write only
    Clip,
}

fn stencil_state(kind: PipelineKind) -> wgpu::DepthStencilState {
    let (compare, pass_op, write_mask) = match kind {
        PipelineKind::Draw => (wgpu::CompareFunction::LessEqual, wgpu::StencilOperation::Keep, 0),
        PipelineKind::Clip => (
            wgpu::CompareFunction::Equal,
            wgpu::StencilOperation::IncrementClamp,
            0xFF,
        ),
    };
    let face = wgpu::StencilFaceState {
        compare,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op,
    };
    wgpu::DepthStencilState {
        format: STENCIL_FORMAT,
        depth_write_enabled: false,
        depth_compare: wgpu::CompareFunction::Always,
        stencil: wgpu::StencilState {
            front: face,
            back: face,
            read_mask: 0xFF,
            write_mask,
        },
        bias: wgpu::DepthBiasState::default(),
    }
}

fn create_canvas_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    sample_count: u32,
    kind: PipelineKind,
) -> wgpu::RenderPipeline {
    let target = match kind {
        PipelineKind::Draw => wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
            write_mask: wgpu::ColorWrites::ALL,
        },
        PipelineKind::Clip => wgpu::ColorTargetState {
            format,
            blend: None,
            write_mask: wgpu::ColorWrites::empty(),
        },
    };

    let vertex_layout = wgpu::VertexBufferLayout {
        array_stride: VERTEX_SIZE as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position: vec2<f32>
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            },
            // uv: vec2<f32>
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 8,
                shader_location: 1,
            },
            // color: vec4<f32>
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 2,
            },
        ],
    };

    let label = match kind {
        PipelineKind::Draw => "Canvas Draw Pipeline",
        PipelineKind::Clip => "Canvas Clip Pipeline",
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(target)],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(stencil_state(kind)),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

fn create_image_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniforms: &wgpu::Buffer,
    sampler: &wgpu::Sampler,
    image: &GpuImage,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Canvas Image Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(image.view()),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        assert_eq!(VERTEX_SIZE, 32);
        assert_eq!(std::mem::size_of::<CanvasUniforms>(), 16);
    }

    #[test]
    fn test_stencil_states() {
        let draw = stencil_state(PipelineKind::Draw);
        assert_eq!(draw.stencil.front.compare, wgpu::CompareFunction::LessEqual);
        assert_eq!(draw.stencil.write_mask, 0);
        assert_eq!(draw.stencil.read_mask, 0xFF);

        let clip = stencil_state(PipelineKind::Clip);
        assert_eq!(clip.stencil.front.compare, wgpu::CompareFunction::Equal);
        assert_eq!(
            clip.stencil.front.pass_op,
            wgpu::StencilOperation::IncrementClamp
        );
        assert_eq!(clip.stencil.front.fail_op, wgpu::StencilOperation::Keep);
        assert_eq!(clip.stencil.write_mask, 0xFF);
    }
}
