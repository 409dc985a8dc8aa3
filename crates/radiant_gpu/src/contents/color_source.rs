use radiant_core::{Mat4, Path, Rect};

use crate::entity::Entity;

/// Fill geometry shared by every color-source contents
///
/// Holds the path to fill and the local transform that places the paint
/// (gradient center, radius, ...) relative to that path.
#[derive(Clone, Debug, Default)]
pub struct ColorSourceGeometry {
    path: Path,
    matrix: Mat4,
}

impl ColorSourceGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_path(&mut self, path: Path) {
        self.path = path;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Inverse of the local transform
    ///
    /// A singular transform collapses the paint to a point, so every
    /// fragment maps to the origin of paint space.
    pub fn inverse_matrix(&self) -> Mat4 {
        self.matrix.inverse().unwrap_or_else(|| {
            tracing::warn!("Color source matrix is not invertible");
            Mat4::ZERO
        })
    }

    /// Path bounds in render-target space
    pub fn coverage(&self, entity: &Entity) -> Option<Rect> {
        if self.path.is_empty() {
            return None;
        }
        Some(self.path.bounds().transform_bounds(entity.transform()))
    }
}
