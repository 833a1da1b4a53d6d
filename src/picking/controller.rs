use super::{
    EntityRef, EntityResolver, ExpressIdResolver, MeshIntersector,
    SpatialIntersector,
};
use crate::camera::{project, Camera, CanvasRect, ViewportPoint};
use crate::geometry::Ray;
use crate::scene::LoadedModel;

/// Runs ray → nearest hit → entity for one pointer position.
#[derive(Debug, Clone, Default)]
pub struct Picker<I = MeshIntersector, R = ExpressIdResolver> {
    intersector: I,
    resolver: R,
}

impl<I: SpatialIntersector, R: EntityResolver> Picker<I, R> {
    /// Create a picker from its two collaborators.
    #[must_use]
    pub fn new(intersector: I, resolver: R) -> Self {
        Self {
            intersector,
            resolver,
        }
    }

    /// The entity under `ray`, or `None`.
    ///
    /// Only the nearest hit is requested. A hit on geometry that does not
    /// resolve to an entity is treated exactly like empty space.
    pub fn pick(
        &self,
        ray: &Ray,
        candidates: &[&LoadedModel],
    ) -> Option<EntityRef> {
        let hit = self.intersector.closest_hit(ray, candidates)?;
        let model = candidates.iter().find(|m| m.id() == hit.model)?;
        match self.resolver.resolve(model, hit.face_index) {
            Ok(entity) => Some(entity),
            Err(e) => {
                log::debug!("pick hit at {:.3} ignored: {e}", hit.distance);
                None
            }
        }
    }

    /// Project `point` through `camera` and pick. A degenerate canvas yields
    /// `None` without touching the intersector.
    pub fn pick_at(
        &self,
        point: ViewportPoint,
        canvas: &CanvasRect,
        camera: &Camera,
        candidates: &[&LoadedModel],
    ) -> Option<EntityRef> {
        let Some(ray) = project(point, canvas, camera) else {
            log::debug!("no pick ray for {point:?} in {canvas:?}");
            return None;
        };
        self.pick(&ray, candidates)
    }

    /// The intersector collaborator.
    pub fn intersector(&self) -> &I {
        &self.intersector
    }

    /// The resolver collaborator.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}
