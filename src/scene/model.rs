use std::fmt;

use serde::{Deserialize, Serialize};

use super::Mesh;
use crate::geometry::Aabb;
use crate::picking::bvh::BoundsTree;

/// Identifier of one imported building model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct ModelId(pub u32);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A model registered with the scene: merged geometry, its id, and the
/// bounds tree used for picking.
///
/// Geometry is immutable after load. Highlighting never touches the model;
/// it lives entirely in the subset overlay.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    id: ModelId,
    mesh: Mesh,
    tree: BoundsTree,
}

impl LoadedModel {
    /// Wrap `mesh` and build its bounds tree with `leaf_size` triangles per
    /// leaf.
    #[must_use]
    pub fn new(id: ModelId, mesh: Mesh, leaf_size: usize) -> Self {
        let tree = BoundsTree::build(&mesh, leaf_size);
        log::debug!(
            "model {id}: {} triangles, {} bvh nodes",
            mesh.triangle_count(),
            tree.node_count()
        );
        Self { id, mesh, tree }
    }

    /// Model identifier.
    #[must_use]
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Merged geometry.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Bounds tree over the mesh triangles.
    #[must_use]
    pub fn bounds_tree(&self) -> &BoundsTree {
        &self.tree
    }

    /// World-space bounds of the geometry.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.tree.bounds()
    }

    /// Whether the importer attached entity ids. Models without them can be
    /// hit but never resolve to an entity.
    #[must_use]
    pub fn has_entity_data(&self) -> bool {
        self.mesh.entity_ids().is_some()
    }
}
