use crate::render::RenderError;

use super::{FieldUniform, PointBatch};

/// GPU resources for one point field.
///
/// The controller owns the backend and is its only caller, so uploads and
/// draws never interleave.
pub trait PointBackend {
    /// Whatever a draw records into, e.g. a frame's encoder and view.
    type Target<'t>;

    /// Replaces all per-point data with `batch`.
    fn upload(&mut self, batch: &PointBatch) -> Result<(), RenderError>;

    /// One draw call covering every uploaded point.
    fn draw(&mut self, target: &mut Self::Target<'_>, uniform: &FieldUniform);

    /// Frees GPU resources. Called at most once.
    fn release(&mut self);
}
