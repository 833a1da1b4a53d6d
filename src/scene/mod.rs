//! Authoritative scene: camera, lights, helper geometry and the loaded
//! models eligible for picking.
//!
//! Models are registered once and owned by the scene for its lifetime. Helper
//! geometry (grid, axes) lives beside them but is never a pick candidate.

mod helpers;
mod mesh;
mod model;

pub use helpers::{Light, SceneHelper};
pub use mesh::{Mesh, MeshBuilder};
pub use model::{LoadedModel, ModelId};
use rustc_hash::FxHashMap;

use crate::camera::Camera;
use crate::error::HoverError;
use crate::geometry::Aabb;
use crate::options::Options;

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The scene. Owns all loaded models in insertion order.
#[derive(Debug)]
pub struct Scene {
    camera: Camera,
    lights: Vec<Light>,
    helpers: Vec<SceneHelper>,
    /// Models in insertion order; this is also the pick candidate order.
    models: Vec<LoadedModel>,
    by_id: FxHashMap<ModelId, usize>,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            lights: Vec::new(),
            helpers: Vec::new(),
            models: Vec::new(),
            by_id: FxHashMap::default(),
        }
    }

    /// Build camera, lights and helpers from `options` for a viewport with
    /// the given aspect ratio.
    #[must_use]
    pub fn from_options(options: &Options, aspect: f32) -> Self {
        let mut scene =
            Self::new(Camera::from_options(&options.camera, aspect));
        scene.lights = Light::from_options(&options.lighting);
        scene.helpers = SceneHelper::from_options(&options.helpers);
        scene
    }

    /// Register a model. Fails if a model with the same id is present.
    pub fn add_model(
        &mut self,
        model: LoadedModel,
    ) -> Result<&LoadedModel, HoverError> {
        let id = model.id();
        if self.by_id.contains_key(&id) {
            return Err(HoverError::DuplicateModel(id));
        }
        if !model.has_entity_data() {
            log::warn!(
                "model {id} has no entity ids; hits on it never highlight"
            );
        }
        let index = self.models.len();
        let _ = self.by_id.insert(id, index);
        self.models.push(model);
        log::info!("loaded model {id} ({} models in scene)", self.models.len());
        Ok(&self.models[index])
    }

    /// Look up a model by id.
    #[must_use]
    pub fn model(&self, id: ModelId) -> Option<&LoadedModel> {
        self.by_id.get(&id).map(|&i| &self.models[i])
    }

    /// All models in insertion order.
    #[must_use]
    pub fn models(&self) -> &[LoadedModel] {
        &self.models
    }

    /// Models eligible for picking, in candidate order.
    #[must_use]
    pub fn pick_candidates(&self) -> Vec<&LoadedModel> {
        self.models.iter().collect()
    }

    /// Union of all model bounds.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.models
            .iter()
            .fold(Aabb::EMPTY, |acc, m| acc.union(&m.bounds()))
    }

    /// Active camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera, for the host's navigation controls.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Scene lights.
    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Helper geometry.
    #[must_use]
    pub fn helpers(&self) -> &[SceneHelper] {
        &self.helpers
    }
}
