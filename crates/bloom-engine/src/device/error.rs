/// What the caller should do after `get_current_texture` failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; try again next frame.
    Reconfigured,
    SkipFrame,
    /// Out of memory. Stop rendering.
    Fatal,
}
