/// What the runtime does after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame can render.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Out of memory; stop the runtime.
    Fatal,
}
