//! Camera state and the viewport-to-world ray caster.
//!
//! Navigation (orbit, pan, zoom) belongs to the host; this module only reads
//! the camera to turn cursor positions into picking rays.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Viewport normalization and ray projection.
pub mod ray;

pub use self::core::{Camera, CameraUniform};
pub use self::ray::{project, CanvasRect, ViewportPoint};
