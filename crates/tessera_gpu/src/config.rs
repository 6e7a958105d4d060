//! Renderer configuration and environment overrides

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
}

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
}

/// Configuration for creating a [`crate::CanvasRenderer`]
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// MSAA sample count (1 or 4)
    pub sample_count: u32,
    /// Target texture format (None = `Bgra8UnormSrgb`)
    pub texture_format: Option<wgpu::TextureFormat>,
    /// Vertices the persistent vertex buffer holds before its first growth
    pub initial_vertex_capacity: usize,
    /// Indices the persistent index buffer holds before its first growth
    pub initial_index_capacity: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            sample_count: 1,
            texture_format: None,
            initial_vertex_capacity: 4_096,
            initial_index_capacity: 8_192,
        }
    }
}

impl RendererConfig {
    pub fn texture_format(&self) -> wgpu::TextureFormat {
        self.texture_format
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb)
    }

    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        self.sample_count = normalize_sample_count(sample_count);
        self
    }
}

/// Only 1x and 4x multisampling are guaranteed by every wgpu backend
pub fn normalize_sample_count(count: u32) -> u32 {
    match count {
        4 => 4,
        _ => 1,
    }
}

pub(crate) fn apply_renderer_config_overrides(mut config: RendererConfig) -> RendererConfig {
    // Env:
    // - TESSERA_GPU_SAMPLE_COUNT=4
    // - TESSERA_GPU_INITIAL_VERTICES=65536
    // - TESSERA_GPU_INITIAL_INDICES=131072
    if let Some(v) = env_u32("TESSERA_GPU_SAMPLE_COUNT") {
        config.sample_count = v;
    }
    if let Some(v) = env_usize("TESSERA_GPU_INITIAL_VERTICES") {
        config.initial_vertex_capacity = v;
    }
    if let Some(v) = env_usize("TESSERA_GPU_INITIAL_INDICES") {
        config.initial_index_capacity = v;
    }

    config.sample_count = normalize_sample_count(config.sample_count);
    config.initial_vertex_capacity = config.initial_vertex_capacity.max(1);
    config.initial_index_capacity = config.initial_index_capacity.max(1);
    config
}

pub(crate) fn log_renderer_config(config: &RendererConfig) {
    tracing::info!(
        "gpu config: sample_count={}, format={:?}, initial_vertices={}, initial_indices={}",
        config.sample_count,
        config.texture_format(),
        config.initial_vertex_capacity,
        config.initial_index_capacity
    );
}

/// Capacity after growing a buffer that must hold `needed` elements
///
/// Never shrinks; grows to at least double the current size.
pub fn grown_capacity(current: usize, needed: usize, initial: usize) -> usize {
    if needed <= current {
        return current;
    }
    needed.max(initial).max(current.saturating_mul(2))
}
