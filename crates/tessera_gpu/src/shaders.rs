//! WGSL shaders

/// Canvas shader shared by the draw and clip pipelines
///
/// Vertices arrive in pixel space and the fragment is the vertex color
/// modulated by the texel. Solid batches sample a 1x1 white texture and text
/// samples an alpha atlas expanded to white RGBA, so only images contribute
/// texel color.
pub const CANVAS_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
    _padding: vec2<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var tex_sampler: sampler;
@group(0) @binding(2) var tex: texture_2d<f32>;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let clip_x = (in.position.x / uniforms.resolution.x) * 2.0 - 1.0;
    let clip_y = 1.0 - (in.position.y / uniforms.resolution.y) * 2.0;
    out.position = vec4<f32>(clip_x, clip_y, 0.0, 1.0);
    out.uv = in.uv;
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(tex, tex_sampler, in.uv);
    return in.color * texel;
}
"#;

/// CPU mirror of the vertex stage position mapping
pub fn pixel_to_ndc(x: f32, y: f32, width: f32, height: f32) -> [f32; 2] {
    [(x / width) * 2.0 - 1.0, 1.0 - (y / height) * 2.0]
}
