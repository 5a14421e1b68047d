/// WGSL shader for atlas-textured tile quads. Texture coordinates arrive in
/// atlas pixels and are normalized against the atlas dimensions here.
pub const TILE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct AtlasInfo {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(1) @binding(0)
var atlas_texture: texture_2d<f32>;
@group(1) @binding(1)
var atlas_sampler: sampler;
@group(1) @binding(2)
var<uniform> atlas_info: AtlasInfo;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) tex_coords: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_tile(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 0.0, 1.0);
    out.uv = vertex.tex_coords / atlas_info.size;
    return out;
}

@fragment
fn fs_tile(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(atlas_texture, atlas_sampler, in.uv);
}
"#;

/// WGSL shader for untextured (solid-color) tile quads.
pub const FLAT_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) tex_coords: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
};

@vertex
fn vs_flat(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 0.0, 1.0);
    return out;
}

@fragment
fn fs_flat(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(0.58, 0.58, 0.65, 1.0);
}
"#;
