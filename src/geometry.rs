//! Ray and bounding-box primitives shared by the ray caster and the
//! intersector.

use glam::Vec3;

/// Determinant threshold below which a ray is treated as parallel to a
/// triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point of the ray.
    pub origin: Vec3,
    /// Unit-length direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    ///
    /// Returns `None` if `direction` has zero length or is not finite.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        origin.is_finite().then_some(Self { origin, direction })
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Möller–Trumbore ray/triangle test. Both windings count as hits.
    ///
    /// Returns the ray parameter of the hit, which is the world-space
    /// distance because the direction is unit length.
    #[inline]
    #[must_use]
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// An inverted box that any `grow` call will replace.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Smallest box containing every point.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |mut bounds, p| {
            bounds.grow(p);
            bounds
        })
    }

    /// Expand to include `point`.
    #[inline]
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True if no point has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Box extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Slab test. Returns the entry parameter (clamped to 0 when the origin is
    /// inside) if the ray enters the box before `max_t`.
    #[inline]
    #[must_use]
    pub fn ray_entry(&self, ray: &Ray, max_t: f32) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let mut near = 0.0_f32;
        let mut far = max_t;
        for axis in 0..3 {
            let (origin, dir) = (ray.origin[axis], ray.direction[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if dir == 0.0 {
                // Parallel to the slab: inside it for every t, or never.
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let inv = dir.recip();
            let (t0, t1) = ((lo - origin) * inv, (hi - origin) * inv);
            near = near.max(t0.min(t1));
            far = far.min(t0.max(t1));
            if near > far {
                return None;
            }
        }
        Some(near)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_ray(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y).unwrap()
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(Ray::new(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)).is_none());
    }

    #[test]
    fn triangle_hit_distance() {
        let ray = down_ray(0.25, 0.25);
        let t = ray
            .intersect_triangle(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            )
            .unwrap();
        assert!((t - 10.0).abs() < 1e-5);
    }

    #[test]
    fn triangle_hit_ignores_winding() {
        let ray = down_ray(0.25, 0.25);
        let a = Vec3::ZERO;
        let b = Vec3::X;
        let c = Vec3::Z;
        assert!(ray.intersect_triangle(a, b, c).is_some());
        assert!(ray.intersect_triangle(a, c, b).is_some());
    }

    #[test]
    fn triangle_miss_and_behind() {
        let ray = down_ray(2.0, 2.0);
        assert!(ray.intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Z).is_none());

        let up = Ray::new(Vec3::new(0.25, 1.0, 0.25), Vec3::Y).unwrap();
        assert!(up.intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Z).is_none());
    }

    #[test]
    fn aabb_slab_entry() {
        let bounds = Aabb::from_points([Vec3::splat(-1.0), Vec3::splat(1.0)]);
        let ray = down_ray(0.0, 0.0);
        let t = bounds.ray_entry(&ray, f32::INFINITY).unwrap();
        assert!((t - 9.0).abs() < 1e-5);

        // Cut off before the box is reached.
        assert!(bounds.ray_entry(&ray, 5.0).is_none());
        // Parallel ray outside the slab.
        assert!(bounds.ray_entry(&down_ray(3.0, 0.0), f32::INFINITY).is_none());
    }

    #[test]
    fn aabb_parallel_ray_on_face_plane_enters() {
        let bounds = Aabb::from_points([Vec3::ZERO, Vec3::ONE]);
        for (x, z) in [(0.0, 0.5), (1.0, 0.5), (0.5, 0.0), (1.0, 1.0)] {
            let t = bounds.ray_entry(&down_ray(x, z), f32::INFINITY);
            assert_eq!(t, Some(9.0), "ray at ({x}, {z})");
        }
        assert!(bounds
            .ray_entry(&down_ray(1.0 + 1e-4, 0.5), f32::INFINITY)
            .is_none());
    }

    #[test]
    fn aabb_entry_from_inside_is_zero() {
        let bounds = Aabb::from_points([Vec3::splat(-1.0), Vec3::splat(1.0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        assert_eq!(bounds.ray_entry(&ray, f32::INFINITY), Some(0.0));
    }

    #[test]
    fn empty_aabb_never_hits() {
        assert!(Aabb::EMPTY.is_empty());
        assert!(Aabb::EMPTY
            .ray_entry(&down_ray(0.0, 0.0), f32::INFINITY)
            .is_none());
    }
}
