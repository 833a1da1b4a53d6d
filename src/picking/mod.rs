//! Pointer picking: nearest-hit ray queries against loaded models and
//! resolution of the hit triangle back to a building entity.
//!
//! The [`SpatialIntersector`] and [`EntityResolver`] traits are the seams to
//! the geometry-import side; [`MeshIntersector`] and [`ExpressIdResolver`]
//! are the defaults. [`Picker`] ties them together and never fails: empty
//! space and unmapped geometry both come back as `None`.

pub mod bvh;
mod controller;
mod intersector;
mod resolver;

use std::fmt;

pub use controller::Picker;
pub use intersector::{HitResult, MeshIntersector, SpatialIntersector};
pub use resolver::{EntityResolver, ExpressIdResolver, ResolveError};
use serde::{Deserialize, Serialize};

use crate::scene::ModelId;

/// Stable identifier of a building element within its model.
pub type EntityId = u32;

/// Semantic identity of a building element: which model, which entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct EntityRef {
    /// Owning model.
    pub model: ModelId,
    /// Entity within the model.
    pub entity: EntityId,
}

impl EntityRef {
    /// Create an entity reference.
    #[must_use]
    pub const fn new(model: ModelId, entity: EntityId) -> Self {
        Self { model, entity }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.model, self.entity)
    }
}
