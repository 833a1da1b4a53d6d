use crate::camera::CanvasRect;

/// Platform-agnostic input events.
///
/// These are published on a [`PointerHub`](super::PointerHub) or fed
/// directly to [`ViewerSession::handle_event`](crate::ViewerSession::handle_event).
///
/// # Example
///
/// ```ignore
/// hub.dispatch(&InputEvent::PointerMoved { x: 100.0, y: 200.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to an absolute screen position.
    PointerMoved {
        /// Horizontal position in device pixels.
        x: f32,
        /// Vertical position in device pixels.
        y: f32,
    },
    /// Pointer left the canvas.
    PointerLeft,
    /// The canvas moved or changed size.
    CanvasResized(CanvasRect),
}
