/// WGSL shader for sprite quads. Each vertex is `[x, y, u, v]`; positions are
/// already in clip space.
pub const SPRITE_SHADER: &str = r#"
struct VertexInput {
    @location(0) vert: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coord: vec2<f32>,
};

@group(0) @binding(0)
var sprite_texture: texture_2d<f32>;
@group(0) @binding(1)
var sprite_sampler: sampler;

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(vertex.vert.xy, 0.0, 1.0);
    out.tex_coord = vertex.vert.zw;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(sprite_texture, sprite_sampler, in.tex_coord);
}
"#;
