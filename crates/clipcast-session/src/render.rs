//! Render-status mirror.
//!
//! Export/render jobs run in an external pipeline; the session only stores
//! and displays their reported status, it never computes it.

/// State of the external render job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering,
    Completed,
    Failed,
}

/// Pass-through status reported by the render pipeline collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderStatus {
    pub job_id: Option<String>,
    /// Progress in [0, 100].
    pub progress: f32,
    pub state: RenderState,
}
