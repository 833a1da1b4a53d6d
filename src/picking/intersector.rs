use glam::Vec3;

use crate::geometry::Ray;
use crate::scene::{LoadedModel, ModelId};

/// Closest surface hit along a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Model that owns the hit triangle.
    pub model: ModelId,
    /// Triangle index within the model's mesh.
    pub face_index: u32,
    /// Distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Ray queries against a set of models.
pub trait SpatialIntersector {
    /// Nearest hit among `models`, or `None` if the ray hits nothing.
    ///
    /// Only the closest hit is computed (first-hit-only). When two models
    /// are hit at exactly the same distance, the one earlier in `models`
    /// wins.
    fn closest_hit(
        &self,
        ray: &Ray,
        models: &[&LoadedModel],
    ) -> Option<HitResult>;

    /// Every hit among `models`, sorted nearest first.
    fn all_hits(&self, ray: &Ray, models: &[&LoadedModel]) -> Vec<HitResult>;
}

/// Default intersector walking each model's bounds tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshIntersector;

impl SpatialIntersector for MeshIntersector {
    fn closest_hit(
        &self,
        ray: &Ray,
        models: &[&LoadedModel],
    ) -> Option<HitResult> {
        let mut best: Option<HitResult> = None;
        for model in models {
            // Later models must be strictly closer to win, so ties resolve to
            // candidate order.
            let limit = best.map_or(f32::INFINITY, |b| b.distance);
            let Some(hit) =
                model.bounds_tree().closest_hit(model.mesh(), ray, limit)
            else {
                continue;
            };
            best = Some(HitResult {
                model: model.id(),
                face_index: hit.face,
                distance: hit.distance,
                point: ray.at(hit.distance),
            });
        }
        best
    }

    fn all_hits(&self, ray: &Ray, models: &[&LoadedModel]) -> Vec<HitResult> {
        let mut hits: Vec<HitResult> = models
            .iter()
            .flat_map(|model| {
                model
                    .bounds_tree()
                    .all_hits(model.mesh(), ray)
                    .into_iter()
                    .map(|hit| HitResult {
                        model: model.id(),
                        face_index: hit.face,
                        distance: hit.distance,
                        point: ray.at(hit.distance),
                    })
            })
            .collect();
        // Stable sort keeps candidate order for equal distances.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
