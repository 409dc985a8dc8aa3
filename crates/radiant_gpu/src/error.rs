//! Error types for radiant_gpu

use thiserror::Error;

/// Reasons a contents render can fail
///
/// Degenerate geometry is not an error; it is reported as
/// [`RenderOutcome::Empty`](crate::contents::RenderOutcome::Empty).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The tessellator hit an internal fault while triangulating the fill
    #[error("tessellation of the fill region failed")]
    TessellationFault,

    /// No gradient lookup texture could be built for the color stops
    #[error("gradient texture unavailable for {stop_count} color stops")]
    GradientTextureUnavailable { stop_count: usize },

    /// The render pass declined the command
    #[error("render pass rejected command `{label}`")]
    SubmissionRejected { label: &'static str },
}

/// Errors that can occur while loading a [`RendererConfig`](crate::RendererConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the renderer cannot work with
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
