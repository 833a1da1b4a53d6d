use crate::camera::CameraUniform;
use crate::highlight::{HighlightState, HighlightUniform};
use crate::scene::Scene;

/// Read-only view of everything the host renderer draws in one frame.
///
/// Handed out by [`ViewerSession::render`](super::ViewerSession::render).
/// Pointer events cannot run while a frame is borrowed, so the overlay seen
/// here is always consistent.
pub struct Frame<'a, O> {
    /// Camera uniform with the hovered entity id filled in.
    pub camera: CameraUniform,
    /// Models, helpers and lights.
    pub scene: &'a Scene,
    /// Current overlay contents.
    pub overlay: &'a O,
    /// Current highlight.
    pub highlight: HighlightState,
    /// Uniform for the overlay pass.
    pub highlight_uniform: HighlightUniform,
    /// Backbuffer pixel ratio after the configured cap.
    pub pixel_ratio: f32,
    /// Smoothed frames per second.
    pub fps: f32,
}
