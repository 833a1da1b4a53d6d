use std::fmt;

use super::{EntityId, EntityRef};
use crate::scene::{LoadedModel, ModelId};

/// Why a hit triangle could not be mapped to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// The model carries no entity id attribute (helper or decoration
    /// geometry).
    MissingEntityData(ModelId),
    /// The face index is outside the model's triangle list.
    FaceOutOfRange {
        /// Model that was hit.
        model: ModelId,
        /// Offending triangle index.
        face: u32,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEntityData(model) => {
                write!(f, "model {model} has no entity ids")
            }
            Self::FaceOutOfRange { model, face } => {
                write!(f, "face {face} out of range for model {model}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Maps a hit triangle back to the building entity it belongs to.
pub trait EntityResolver {
    /// Resolve triangle `face` of `model`.
    fn resolve(
        &self,
        model: &LoadedModel,
        face: u32,
    ) -> Result<EntityRef, ResolveError>;
}

/// Reads the per-vertex entity id attribute at the triangle's first vertex.
///
/// Importers write the same id on every vertex of an entity, so any corner
/// of the triangle gives the same answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressIdResolver;

impl EntityResolver for ExpressIdResolver {
    fn resolve(
        &self,
        model: &LoadedModel,
        face: u32,
    ) -> Result<EntityRef, ResolveError> {
        let ids: &[EntityId] = model
            .mesh()
            .entity_ids()
            .ok_or(ResolveError::MissingEntityData(model.id()))?;
        let [first, _, _] =
            model.mesh().face(face).ok_or(ResolveError::FaceOutOfRange {
                model: model.id(),
                face,
            })?;
        // Mesh construction guarantees one id per vertex.
        ids.get(first as usize)
            .map(|&entity| EntityRef::new(model.id(), entity))
            .ok_or(ResolveError::FaceOutOfRange {
                model: model.id(),
                face,
            })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::picking::bvh::DEFAULT_LEAF_SIZE;
    use crate::scene::{Mesh, MeshBuilder};

    #[test]
    fn resolves_each_face_to_its_entity() {
        let mut builder = MeshBuilder::new();
        builder.push_box(Vec3::ZERO, Vec3::ONE, 11);
        builder.push_box(Vec3::splat(2.0), Vec3::splat(3.0), 22);
        let model = LoadedModel::new(
            ModelId(4),
            builder.build().unwrap(),
            DEFAULT_LEAF_SIZE,
        );

        assert_eq!(
            ExpressIdResolver.resolve(&model, 0),
            Ok(EntityRef::new(ModelId(4), 11))
        );
        assert_eq!(
            ExpressIdResolver.resolve(&model, 12),
            Ok(EntityRef::new(ModelId(4), 22))
        );
        assert_eq!(
            ExpressIdResolver.resolve(&model, 24),
            Err(ResolveError::FaceOutOfRange {
                model: ModelId(4),
                face: 24
            })
        );
    }

    #[test]
    fn geometry_without_ids_fails() {
        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Z], vec![0, 1, 2])
            .unwrap();
        let model = LoadedModel::new(ModelId(1), mesh, DEFAULT_LEAF_SIZE);
        let err = ExpressIdResolver.resolve(&model, 0).unwrap_err();
        assert_eq!(err, ResolveError::MissingEntityData(ModelId(1)));
        assert_eq!(err.to_string(), "model #1 has no entity ids");
    }
}
