//! Radial Gradient Demo
//!
//! Fills a 20x20 square with a red-to-blue radial gradient, once per tile
//! mode, and logs the commands recorded into an offscreen render pass.
//!
//! Run with: cargo run -p radiant_gpu --example radial_gradient [config.toml]

use std::sync::Arc;

use anyhow::{Context, Result};
use radiant_core::{Color, Mat4, Path, Point, Rect, Size};
use radiant_gpu::{
    ContentContext, Contents, Entity, RadialGradientContents, RecordingRenderPass, RenderTarget,
    RendererConfig, TileMode,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RendererConfig::load(&path)
            .with_context(|| format!("loading renderer config from {path}"))?,
        None => RendererConfig::default(),
    };

    let target = RenderTarget::from_config(Size::new(800.0, 600.0), &config);
    let mut pass = RecordingRenderPass::with_config(target, &config);
    let context = ContentContext::new(config);

    for (i, tile_mode) in [
        TileMode::Clamp,
        TileMode::Repeat,
        TileMode::Mirror,
        TileMode::Decal,
    ]
    .into_iter()
    .enumerate()
    {
        let mut gradient = RadialGradientContents::new();
        gradient.set_path(Path::rect(Rect::new(0.0, 0.0, 20.0, 20.0)));
        gradient.set_center_and_radius(Point::ZERO, 10.0);
        gradient.set_colors(vec![Color::RED, Color::BLUE]);
        gradient.set_stops(vec![0.0, 1.0]);
        gradient.set_tile_mode(tile_mode);
        let gradient = Arc::new(gradient);

        let mut entity = Entity::new();
        entity.set_transform(Mat4::translation(40.0 + 40.0 * i as f32, 40.0, 0.0));
        entity.set_contents(gradient.clone());

        let outcome = gradient
            .render_outcome(&context, &entity, &mut pass)
            .with_context(|| format!("rendering {tile_mode:?} gradient"))?;
        tracing::info!(
            "{:?}: {:?}, coverage {:?}",
            tile_mode,
            outcome,
            gradient.coverage(&entity)
        );
    }

    pass.finish();

    for command in pass.commands() {
        tracing::info!(
            "`{}` via `{}`: {} vertices, stencil ref {}",
            command.label,
            command.pipeline.label(),
            command.vertex_count(),
            command.stencil_reference
        );
    }
    tracing::info!(
        "{} commands, {} transient bytes, {} pipeline variants",
        pass.commands().len(),
        pass.transients().len(),
        context.pipeline_count()
    );

    Ok(())
}
