use glam::Vec2;

use super::Camera;
use crate::geometry::Ray;

/// Cursor position in device pixels, in the same space as [`CanvasRect`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportPoint {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position (grows downward).
    pub y: f32,
}

impl ViewportPoint {
    /// Create a viewport point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the canvas in device pixels.
///
/// Re-read on every pointer event by the host since layout can move the
/// canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl CanvasRect {
    /// Rectangle anchored at the origin with the given size.
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: width,
            bottom: height,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> ViewportPoint {
        ViewportPoint::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// True for a detached or hidden canvas: zero (or negative, or
    /// non-finite) width or height.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0)
    }

    /// Map `point` into normalized device coordinates: x in `[-1, 1]` left to
    /// right, y in `[-1, 1]` bottom to top.
    ///
    /// Points outside the rectangle map outside that range. Returns `None`
    /// for a degenerate rectangle.
    #[must_use]
    pub fn normalize(&self, point: ViewportPoint) -> Option<Vec2> {
        if self.is_degenerate() {
            return None;
        }
        let x = (point.x - self.left) / self.width() * 2.0 - 1.0;
        let y = -((point.y - self.top) / self.height() * 2.0 - 1.0);
        Some(Vec2::new(x, y))
    }
}

/// Project a cursor position through `camera` into a world-space ray.
///
/// Pure function of its inputs. `None` means there is nothing to pick: the
/// canvas has no area or the camera matrices are singular.
#[must_use]
pub fn project(
    point: ViewportPoint,
    canvas: &CanvasRect,
    camera: &Camera,
) -> Option<Ray> {
    let ndc = canvas.normalize(point)?;
    camera.ray_through(ndc)
}
