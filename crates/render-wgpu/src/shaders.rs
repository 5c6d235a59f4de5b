/// WGSL for the instanced wall/ground planes. `fs_diffuse` and `fs_solid` are
/// the two selectable shader programs.
pub const PLANE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    light0: vec4<f32>,
    light1: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var ground_tex: texture_2d<f32>;
@group(1) @binding(1)
var ground_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) color: vec4<f32>,
    // x: textured flag, yz: uv repeat
    @location(8) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) uv: vec2<f32>,
    @location(4) textured: f32,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.color = instance.color;
    out.uv = vertex.uv * instance.params.yz;
    out.textured = instance.params.x;
    return out;
}

fn base_color(color: vec3<f32>, uv: vec2<f32>, textured: f32) -> vec3<f32> {
    // Sampled unconditionally to stay in uniform control flow.
    let texel = textureSample(ground_tex, ground_sampler, uv).rgb;
    return color * mix(vec3<f32>(1.0), texel, textured);
}

@fragment
fn fs_diffuse(in: VertexOutput) -> @location(0) vec4<f32> {
    // Planes are lit from whichever side faces the eye.
    var n = in.world_normal;
    if (dot(n, uniforms.eye.xyz - in.world_pos) < 0.0) {
        n = -n;
    }
    let l0 = normalize(uniforms.light0.xyz - in.world_pos);
    let l1 = normalize(uniforms.light1.xyz - in.world_pos);
    let diffuse = max(dot(n, l0), 0.0) + max(dot(n, l1), 0.0);
    let lighting = min(0.2 + diffuse * 0.8, 1.0);
    return vec4<f32>(base_color(in.color.rgb, in.uv, in.textured) * lighting, 1.0);
}

@fragment
fn fs_solid(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(base_color(in.color.rgb, in.uv, in.textured), 1.0);
}
"#;

/// WGSL for the axes overlay.
pub const LINE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    light0: vec4<f32>,
    light1: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
