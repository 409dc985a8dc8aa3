//! GPU shaders for contents
//!
//! These shaders render:
//! - Radial gradient fills over tessellated paths

/// Radial gradient fill shader
///
/// Vertices carry only their position. The vertex stage projects them with
/// `frame_info.mvp` and maps them into the gradient's local space with
/// `frame_info.matrix`; the fragment stage measures the distance to the
/// gradient center, applies the tile mode, and looks the color up in a
/// gradient strip stored in row 0 of `gradient_texture`.
pub const RADIAL_GRADIENT_FILL_SHADER: &str = r#"
// ============================================================================
// Radial Gradient Fill Shader
// ============================================================================

// Tile modes (must match TileMode discriminants)
const TILE_CLAMP: f32 = 0.0;
const TILE_REPEAT: f32 = 1.0;
const TILE_MIRROR: f32 = 2.0;
const TILE_DECAL: f32 = 3.0;

struct FrameInfo {
    // projection * entity transform
    mvp: mat4x4<f32>,
    // inverse of the gradient's local transform
    matrix: mat4x4<f32>,
}
// Total: 128 bytes

struct GradientInfo {
    center: vec2<f32>,
    radius: f32,
    tile_mode: f32,
    texture_sampler_y_coord_scale: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
}
// Total: 32 bytes

@group(0) @binding(0) var<uniform> frame_info: FrameInfo;
@group(0) @binding(1) var<uniform> gradient_info: GradientInfo;
@group(0) @binding(2) var gradient_texture: texture_2d<f32>;
@group(0) @binding(3) var gradient_sampler: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) gradient_position: vec2<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let position = vec4<f32>(in.position, 0.0, 1.0);
    out.position = frame_info.mvp * position;
    out.gradient_position = (frame_info.matrix * position).xy;
    return out;
}

// Map the gradient parameter into [0, 1] according to the tile mode.
// Decal is clamped here and masked out by the caller.
fn apply_tile_mode(t: f32, tile_mode: f32) -> f32 {
    let repeated = fract(t);
    let period = t - 2.0 * floor(t * 0.5);
    let mirrored = select(period, 2.0 - period, period > 1.0);
    let clamped = clamp(t, 0.0, 1.0);
    return select(
        select(clamped, mirrored, tile_mode == TILE_MIRROR),
        repeated,
        tile_mode == TILE_REPEAT,
    );
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = distance(in.gradient_position, gradient_info.center);
    // A degenerate radius puts every fragment at or past the last stop
    let t = select(1.0, dist / gradient_info.radius, gradient_info.radius > 0.0);

    let uv = vec2<f32>(
        apply_tile_mode(t, gradient_info.tile_mode),
        0.5 * gradient_info.texture_sampler_y_coord_scale,
    );
    let color = textureSample(gradient_texture, gradient_sampler, uv);
    let premultiplied = vec4<f32>(color.rgb * color.a, color.a);

    let outside = gradient_info.tile_mode == TILE_DECAL && (t < 0.0 || t > 1.0);
    return select(premultiplied, vec4<f32>(0.0), outside);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(source: &str) {
        let module = naga::front::wgsl::parse_str(source)
            .unwrap_or_else(|err| panic!("{}", err.emit_to_string(source)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .unwrap_or_else(|err| panic!("{:?}", err));
    }

    #[test]
    fn test_radial_gradient_fill_shader_is_valid() {
        validate(RADIAL_GRADIENT_FILL_SHADER);
    }

    #[test]
    fn test_entry_points() {
        let module = naga::front::wgsl::parse_str(RADIAL_GRADIENT_FILL_SHADER).unwrap();
        let names: Vec<&str> = module
            .entry_points
            .iter()
            .map(|ep| ep.name.as_str())
            .collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }
}
