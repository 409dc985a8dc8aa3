use radiant_core::{Color, Mat4, Path, Point, Rect};

use super::color_source::ColorSourceGeometry;
use super::{Contents, RenderOutcome};
use crate::command::{Command, ShaderStage};
use crate::content_context::ContentContext;
use crate::entity::{Entity, TileMode};
use crate::error::RenderError;
use crate::path::create_polyline;
use crate::pipeline::options_from_pass_and_entity;
use crate::radial_gradient_fill::{
    FrameInfo, GradientInfo, RadialGradientVertex, FRAME_INFO_BINDING, GRADIENT_INFO_BINDING,
    TEXTURE_BINDING,
};
use crate::render_pass::RenderPass;
use crate::sampler::SamplerDescriptor;
use crate::tessellator::TessellationResult;
use crate::vertex_buffer::VertexBufferBuilder;

const COMMAND_LABEL: &str = "RadialGradientFill";

/// Fills a path with colors radiating from a center point
///
/// Stop `i` places `colors[i]` at distance `stops[i] * radius` from the
/// center, measured in the space defined by the local matrix. Beyond the
/// last stop the gradient continues according to its [`TileMode`].
#[derive(Clone, Debug)]
pub struct RadialGradientContents {
    geometry: ColorSourceGeometry,
    center: Point,
    radius: f32,
    tile_mode: TileMode,
    colors: Vec<Color>,
    stops: Vec<f32>,
}

impl Default for RadialGradientContents {
    fn default() -> Self {
        Self {
            geometry: ColorSourceGeometry::new(),
            center: Point::ZERO,
            radius: 0.0,
            tile_mode: TileMode::Clamp,
            colors: Vec::new(),
            stops: Vec::new(),
        }
    }
}

impl RadialGradientContents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_center_and_radius(&mut self, center: Point, radius: f32) {
        self.center = center;
        self.radius = radius;
    }

    pub fn set_tile_mode(&mut self, tile_mode: TileMode) {
        self.tile_mode = tile_mode;
    }

    pub fn set_colors(&mut self, colors: Vec<Color>) {
        self.colors = colors;
    }

    pub fn set_stops(&mut self, stops: Vec<f32>) {
        self.stops = stops;
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn tile_mode(&self) -> TileMode {
        self.tile_mode
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn stops(&self) -> &[f32] {
        &self.stops
    }

    pub fn set_path(&mut self, path: Path) {
        self.geometry.set_path(path);
    }

    pub fn path(&self) -> &Path {
        self.geometry.path()
    }

    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.geometry.set_matrix(matrix);
    }

    pub fn matrix(&self) -> &Mat4 {
        self.geometry.matrix()
    }

    pub fn inverse_matrix(&self) -> Mat4 {
        self.geometry.inverse_matrix()
    }

    /// Render into `pass`, reporting why nothing was drawn
    pub fn render_outcome(
        &self,
        renderer: &ContentContext,
        entity: &Entity,
        pass: &mut dyn RenderPass,
    ) -> Result<RenderOutcome, RenderError> {
        // Fill mesh
        let polyline = create_polyline(self.path(), renderer.config().tessellation_tolerance);
        let mut vertices = VertexBufferBuilder::<RadialGradientVertex>::new();
        let result = renderer.tessellator().tessellate(
            self.path().fill_rule(),
            &polyline,
            &mut |point: Point| {
                vertices.append_vertex(RadialGradientVertex {
                    position: point.to_array(),
                })
            },
        );
        match result {
            TessellationResult::Success => {}
            TessellationResult::InputError => {
                tracing::debug!("Radial gradient fill covers no area, skipping");
                return Ok(RenderOutcome::Empty);
            }
            TessellationResult::TessellationError => {
                tracing::warn!("Radial gradient fill failed to tessellate");
                return Err(RenderError::TessellationFault);
            }
        }

        // Gradient lookup texture
        let Some(texture) = renderer
            .gradient_textures()
            .build_or_fetch(&self.colors, &self.stops)
        else {
            tracing::warn!(
                "No gradient texture for {} colors / {} stops",
                self.colors.len(),
                self.stops.len()
            );
            return Err(RenderError::GradientTextureUnavailable {
                stop_count: self.stops.len(),
            });
        };

        // Shading parameters
        let frame_info = FrameInfo {
            mvp: (Mat4::orthographic(pass.render_target_size()) * *entity.transform())
                .to_cols_array_2d(),
            matrix: self.inverse_matrix().to_cols_array_2d(),
        };
        let gradient_info = GradientInfo {
            center: self.center.to_array(),
            radius: self.radius,
            tile_mode: self.tile_mode.as_scalar(),
            texture_sampler_y_coord_scale: texture.y_coord_scale(),
            _pad: [0.0; 3],
        };

        // Draw submission
        let pipeline =
            renderer.radial_gradient_fill_pipeline(options_from_pass_and_entity(&*pass, entity));
        let sampler = renderer.sampler_library().get_sampler(SamplerDescriptor {
            min_filter: wgpu::FilterMode::Linear,
            mag_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let mut cmd = Command::new(COMMAND_LABEL, pipeline);
        let host = pass.transients_buffer();
        cmd.bind_vertices(vertices.create_vertex_buffer(host));
        cmd.primitive_topology = wgpu::PrimitiveTopology::TriangleList;
        cmd.stencil_reference = entity.stencil_depth();
        cmd.bind_uniform(
            ShaderStage::Fragment,
            GRADIENT_INFO_BINDING,
            host.emplace_uniform(&gradient_info),
        );
        cmd.bind_texture_sampler(TEXTURE_BINDING, texture, sampler);
        cmd.bind_uniform(
            ShaderStage::Vertex,
            FRAME_INFO_BINDING,
            host.emplace_uniform(&frame_info),
        );

        if !pass.add_command(cmd) {
            tracing::warn!("Render pass rejected `{}`", COMMAND_LABEL);
            return Err(RenderError::SubmissionRejected {
                label: COMMAND_LABEL,
            });
        }
        Ok(RenderOutcome::Drawn)
    }
}

impl Contents for RadialGradientContents {
    fn render(
        &self,
        renderer: &ContentContext,
        entity: &Entity,
        pass: &mut dyn RenderPass,
    ) -> bool {
        self.render_outcome(renderer, entity, pass).is_ok()
    }

    fn coverage(&self, entity: &Entity) -> Option<Rect> {
        self.geometry.coverage(entity)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use radiant_core::Size;

    use super::*;
    use crate::command::Command;
    use crate::config::RendererConfig;
    use crate::render_pass::{RecordingRenderPass, RenderTarget};
    use crate::testing::{AbsentGradientTextures, FixedResultTessellator, RejectingRenderPass};

    const TARGET_SIZE: Size = Size::new(800.0, 600.0);

    fn square_gradient() -> RadialGradientContents {
        let mut contents = RadialGradientContents::new();
        contents.set_path(Path::rect(Rect::new(0.0, 0.0, 20.0, 20.0)));
        contents.set_center_and_radius(Point::ZERO, 10.0);
        contents.set_colors(vec![Color::RED, Color::BLUE]);
        contents.set_stops(vec![0.0, 1.0]);
        contents.set_tile_mode(TileMode::Clamp);
        contents
    }

    fn pass() -> RecordingRenderPass {
        RecordingRenderPass::new(RenderTarget::new(TARGET_SIZE))
    }

    fn gradient_info(pass: &RecordingRenderPass, command: &Command) -> GradientInfo {
        let view = command.fragment_bindings.uniforms[&GRADIENT_INFO_BINDING];
        pass.transients().read(&view).unwrap()
    }

    fn frame_info(pass: &RecordingRenderPass, command: &Command) -> FrameInfo {
        let view = command.vertex_bindings.uniforms[&FRAME_INFO_BINDING];
        pass.transients().read(&view).unwrap()
    }

    #[test]
    fn test_square_scenario() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut entity = Entity::new();
        entity.set_stencil_depth(2);

        assert!(square_gradient().render(&context, &entity, &mut pass));
        assert_eq!(pass.commands().len(), 1);

        let command = &pass.commands()[0];
        assert_eq!(command.label, "RadialGradientFill");
        assert!(command.vertex_count() >= 6);
        assert_eq!(command.vertex_count() % 3, 0);
        assert_eq!(
            command.primitive_topology,
            wgpu::PrimitiveTopology::TriangleList
        );
        assert_eq!(command.stencil_reference, 2);

        let info = gradient_info(&pass, command);
        assert_eq!(info.center, [0.0, 0.0]);
        assert_eq!(info.radius, 10.0);
        assert_eq!(info.tile_mode, 0.0);
        assert_eq!(info.texture_sampler_y_coord_scale, 1.0);

        let bound = &command.fragment_bindings.sampled_textures[&TEXTURE_BINDING];
        assert_eq!(bound.texture.width(), 256);
        assert_eq!(bound.texture.texel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(bound.texture.texel(255, 0), Some([0, 0, 255, 255]));
        assert_eq!(
            bound.sampler.descriptor().min_filter,
            wgpu::FilterMode::Linear
        );
        assert_eq!(
            bound.sampler.descriptor().mag_filter,
            wgpu::FilterMode::Linear
        );
    }

    #[test]
    fn test_vertices_stay_inside_fill() {
        let context = ContentContext::default();
        let mut pass = pass();
        assert!(square_gradient().render(&context, &Entity::new(), &mut pass));

        let command = &pass.commands()[0];
        let view = command.vertex_buffer.unwrap().view;
        let bytes = pass.transients().bytes(&view).unwrap();
        assert_eq!(bytes.len(), command.vertex_count() as usize * 8);
        for chunk in bytes.chunks_exact(8) {
            let vertex: RadialGradientVertex = bytemuck::pod_read_unaligned(chunk);
            let [x, y] = vertex.position;
            assert!((0.0..=20.0).contains(&x) && (0.0..=20.0).contains(&y));
        }
    }

    #[test]
    fn test_empty_path_draws_nothing() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut contents = square_gradient();
        contents.set_path(Path::new());

        assert!(contents.render(&context, &Entity::new(), &mut pass));
        assert!(pass.commands().is_empty());
        assert_eq!(
            contents.render_outcome(&context, &Entity::new(), &mut pass),
            Ok(RenderOutcome::Empty)
        );
    }

    #[test]
    fn test_zero_area_path_draws_nothing() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut contents = square_gradient();
        contents.set_path(Path::rect(Rect::new(0.0, 0.0, 20.0, 0.0)));

        assert!(contents.render(&context, &Entity::new(), &mut pass));
        assert!(pass.commands().is_empty());
    }

    #[test]
    fn test_centered_square_scenario() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut contents = square_gradient();
        contents.set_path(Path::rect(Rect::new(-10.0, -10.0, 20.0, 20.0)));

        assert_eq!(
            contents.render_outcome(&context, &Entity::new(), &mut pass),
            Ok(RenderOutcome::Drawn)
        );
        assert_eq!(pass.commands().len(), 1);

        let command = &pass.commands()[0];
        assert!(command.vertex_count() >= 6);
        let info = gradient_info(&pass, command);
        assert_eq!(info.center, [0.0, 0.0]);
        assert_eq!(info.radius, 10.0);
        assert_eq!(info.tile_mode, 0.0);
        assert!(command
            .fragment_bindings
            .sampled_textures
            .contains_key(&TEXTURE_BINDING));
    }

    #[test]
    fn test_non_finite_path_draws_nothing() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut contents = square_gradient();
        contents.set_path(
            Path::new()
                .move_to(0.0, 0.0)
                .line_to(f32::NAN, 10.0)
                .line_to(10.0, 10.0)
                .close(),
        );

        assert_eq!(
            contents.render_outcome(&context, &Entity::new(), &mut pass),
            Ok(RenderOutcome::Empty)
        );
        assert!(contents.render(&context, &Entity::new(), &mut pass));
        assert!(pass.commands().is_empty());
    }

    #[test]
    fn test_out_of_range_path_draws_nothing() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut contents = square_gradient();
        contents.set_path(Path::rect(Rect::new(
            -f32::MAX,
            -f32::MAX,
            f32::MAX,
            f32::MAX,
        )));

        assert_eq!(
            contents.render_outcome(&context, &Entity::new(), &mut pass),
            Ok(RenderOutcome::Empty)
        );
        assert!(pass.commands().is_empty());
    }

    #[test]
    fn test_configured_tolerance_controls_flattening() {
        let mut contents = square_gradient();
        contents.set_path(Path::circle(Point::new(50.0, 50.0), 40.0));

        let vertex_count = |tolerance: f32| {
            let context = ContentContext::new(RendererConfig {
                tessellation_tolerance: tolerance,
                ..Default::default()
            });
            let mut pass = pass();
            assert!(contents.render(&context, &Entity::new(), &mut pass));
            pass.commands()[0].vertex_count()
        };

        assert!(vertex_count(5.0) < vertex_count(0.01));
    }

    #[test]
    fn test_tessellation_fault_fails() {
        let context = ContentContext::default().with_tessellator(Arc::new(
            FixedResultTessellator(TessellationResult::TessellationError),
        ));
        let mut pass = pass();
        let contents = square_gradient();

        assert!(!contents.render(&context, &Entity::new(), &mut pass));
        assert!(pass.commands().is_empty());
        assert_eq!(
            contents.render_outcome(&context, &Entity::new(), &mut pass),
            Err(RenderError::TessellationFault)
        );
    }

    #[test]
    fn test_missing_texture_fails() {
        let context =
            ContentContext::default().with_gradient_textures(Arc::new(AbsentGradientTextures));
        let mut pass = pass();
        let contents = square_gradient();

        assert!(!contents.render(&context, &Entity::new(), &mut pass));
        assert!(pass.commands().is_empty());
        assert_eq!(
            contents.render_outcome(&context, &Entity::new(), &mut pass),
            Err(RenderError::GradientTextureUnavailable { stop_count: 2 })
        );
    }

    #[test]
    fn test_mismatched_stops_fail() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut contents = square_gradient();
        contents.set_stops(vec![0.0, 0.5, 1.0]);

        assert!(!contents.render(&context, &Entity::new(), &mut pass));
        assert!(pass.commands().is_empty());
    }

    #[test]
    fn test_rejected_submission_fails() {
        let context = ContentContext::default();
        let mut pass = RejectingRenderPass::new(TARGET_SIZE);
        let contents = square_gradient();

        assert!(!contents.render(&context, &Entity::new(), &mut pass));
        assert_eq!(pass.attempts, 1);
        assert_eq!(
            contents.render_outcome(&context, &Entity::new(), &mut pass),
            Err(RenderError::SubmissionRejected {
                label: "RadialGradientFill"
            })
        );
    }

    #[test]
    fn test_frame_info_transforms() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut entity = Entity::new();
        let transform = Mat4::translation(10.0, 20.0, 0.0) * Mat4::scale(2.0, 2.0, 1.0);
        entity.set_transform(transform);

        let mut contents = square_gradient();
        let local = Mat4::translation(5.0, 5.0, 0.0) * Mat4::rotation_z(0.5);
        contents.set_matrix(local);

        assert!(contents.render(&context, &entity, &mut pass));
        let info = frame_info(&pass, &pass.commands()[0]);

        let expected_mvp = Mat4::orthographic(TARGET_SIZE) * transform;
        assert_eq!(info.mvp, expected_mvp.to_cols_array_2d());

        let inverse = Mat4 { cols: info.matrix };
        assert!((inverse * local).approx_eq(&Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_tile_mode_only_changes_tag() {
        let context = ContentContext::default();
        let mut contents = square_gradient();

        let mut infos = Vec::new();
        for tile_mode in [
            TileMode::Clamp,
            TileMode::Repeat,
            TileMode::Mirror,
            TileMode::Decal,
        ] {
            contents.set_tile_mode(tile_mode);
            let mut pass = pass();
            assert!(contents.render(&context, &Entity::new(), &mut pass));
            infos.push(gradient_info(&pass, &pass.commands()[0]));
        }

        for (i, info) in infos.iter().enumerate() {
            assert_eq!(info.tile_mode, i as f32);
            assert_eq!(
                GradientInfo {
                    tile_mode: 0.0,
                    ..*info
                },
                infos[0]
            );
        }
    }

    #[test]
    fn test_setters_replace() {
        let mut contents = square_gradient();
        contents.set_colors(vec![Color::GREEN, Color::YELLOW, Color::WHITE]);
        contents.set_stops(vec![0.0, 0.25, 1.0]);
        assert_eq!(
            contents.colors(),
            &[Color::GREEN, Color::YELLOW, Color::WHITE]
        );
        assert_eq!(contents.stops(), &[0.0, 0.25, 1.0]);

        contents.set_colors(vec![Color::BLACK]);
        contents.set_stops(vec![0.5]);
        assert_eq!(contents.colors(), &[Color::BLACK]);
        assert_eq!(contents.stops(), &[0.5]);

        contents.set_center_and_radius(Point::new(3.0, 4.0), 7.0);
        assert_eq!(contents.center(), Point::new(3.0, 4.0));
        assert_eq!(contents.radius(), 7.0);
    }

    #[test]
    fn test_degenerate_radius_still_draws() {
        let context = ContentContext::default();
        let mut contents = square_gradient();

        for radius in [0.0, -5.0] {
            contents.set_center_and_radius(Point::new(10.0, 10.0), radius);
            let mut pass = pass();
            assert!(contents.render(&context, &Entity::new(), &mut pass));
            assert_eq!(gradient_info(&pass, &pass.commands()[0]).radius, radius);
        }
    }

    #[test]
    fn test_singular_matrix_still_draws() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut contents = square_gradient();
        contents.set_matrix(Mat4::ZERO);

        assert!(contents.render(&context, &Entity::new(), &mut pass));
        assert_eq!(
            frame_info(&pass, &pass.commands()[0]).matrix,
            Mat4::ZERO.to_cols_array_2d()
        );
    }

    #[test]
    fn test_gradient_texture_is_reused() {
        let context = ContentContext::default();
        let mut pass = pass();
        let contents = square_gradient();

        assert!(contents.render(&context, &Entity::new(), &mut pass));
        assert!(contents.render(&context, &Entity::new(), &mut pass));

        let a = &pass.commands()[0].fragment_bindings.sampled_textures[&TEXTURE_BINDING];
        let b = &pass.commands()[1].fragment_bindings.sampled_textures[&TEXTURE_BINDING];
        assert!(Arc::ptr_eq(&a.texture, &b.texture));
        assert!(Arc::ptr_eq(&a.sampler, &b.sampler));
        assert_eq!(context.pipeline_count(), 1);
    }

    #[test]
    fn test_entity_renders_its_contents() {
        let context = ContentContext::default();
        let mut pass = pass();
        let mut entity = Entity::new();
        entity.set_transform(Mat4::translation(100.0, 100.0, 0.0));
        entity.set_contents(Arc::new(square_gradient()));

        assert!(entity.render(&context, &mut pass));
        assert_eq!(pass.commands().len(), 1);

        let coverage = entity
            .contents()
            .and_then(|contents| contents.coverage(&entity))
            .unwrap();
        assert_eq!(coverage, Rect::new(100.0, 100.0, 20.0, 20.0));
    }

    #[test]
    fn test_pipeline_follows_target() {
        let context = ContentContext::default();
        let target = RenderTarget::new(TARGET_SIZE)
            .with_color_format(wgpu::TextureFormat::Rgba8Unorm)
            .with_sample_count(4)
            .with_stencil_attachment(false);
        let mut pass = RecordingRenderPass::new(target);

        assert!(square_gradient().render(&context, &Entity::new(), &mut pass));
        let options = pass.commands()[0].pipeline.options();
        assert_eq!(options.color_format, wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(options.sample_count, 4);
        assert!(!options.has_stencil_attachment);
    }
}
