use rustc_hash::FxHashMap;

use super::{HighlightAppearance, MaterialId};
use crate::picking::EntityId;
use crate::scene::{LoadedModel, ModelId};

/// Render-time overlay that redraws chosen entities of a model with an
/// override appearance.
///
/// Both operations must be atomic with respect to the render loop: a frame
/// sees either the old subset or the new one, never a mix or a gap.
pub trait SubsetOverlay {
    /// Called once when a model joins the scene, before any other call for
    /// it.
    fn register_model(&mut self, _model: &LoadedModel) {}

    /// Show exactly `entities` of `model` with `appearance`, discarding any
    /// previous subset for the same model and material.
    fn create_or_replace(
        &mut self,
        model: ModelId,
        entities: &[EntityId],
        appearance: &HighlightAppearance,
    );

    /// Remove the subset for `model` and `appearance`'s material.
    fn clear(&mut self, model: ModelId, appearance: &HighlightAppearance);
}

/// One overlay subset: the index list to draw from a model's vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Subset {
    /// Model whose vertex buffer the indices refer to.
    pub model: ModelId,
    /// Override material.
    pub material: MaterialId,
    /// Entities included.
    pub entities: Vec<EntityId>,
    /// Triangle vertex indices into the model's mesh.
    pub indices: Vec<u32>,
}

impl Subset {
    /// Number of triangles in the subset.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Default overlay: precomputed per-entity triangle lists and one live
/// subset per (model, material).
#[derive(Debug, Default)]
pub struct SubsetStore {
    /// Per model: entity id → triangle vertex indices.
    items: FxHashMap<ModelId, FxHashMap<EntityId, Vec<u32>>>,
    live: FxHashMap<(ModelId, MaterialId), Subset>,
    /// Cleared subsets whose buffers are reused by the next create.
    spare: Vec<Subset>,
}

impl SubsetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live subset for `model` and `material`, if any.
    #[must_use]
    pub fn subset(
        &self,
        model: ModelId,
        material: MaterialId,
    ) -> Option<&Subset> {
        self.live.get(&(model, material))
    }

    /// All live subsets, in no particular order.
    pub fn subsets(&self) -> impl Iterator<Item = &Subset> {
        self.live.values()
    }

    /// Number of live subsets.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Whether `model` has been registered.
    #[must_use]
    pub fn is_registered(&self, model: ModelId) -> bool {
        self.items.contains_key(&model)
    }

    fn recycled(&mut self, model: ModelId, material: MaterialId) -> Subset {
        self.spare.pop().map_or_else(
            || Subset {
                model,
                material,
                entities: Vec::new(),
                indices: Vec::new(),
            },
            |mut subset| {
                subset.model = model;
                subset.material = material;
                subset
            },
        )
    }
}

impl SubsetOverlay for SubsetStore {
    fn register_model(&mut self, model: &LoadedModel) {
        let mesh = model.mesh();
        let mut items: FxHashMap<EntityId, Vec<u32>> = FxHashMap::default();
        if let Some(ids) = mesh.entity_ids() {
            for face in mesh.indices().chunks_exact(3) {
                let entity = ids[face[0] as usize];
                items.entry(entity).or_default().extend_from_slice(face);
            }
        }
        log::debug!(
            "overlay: model {} has {} entities",
            model.id(),
            items.len()
        );
        let _ = self.items.insert(model.id(), items);
    }

    fn create_or_replace(
        &mut self,
        model: ModelId,
        entities: &[EntityId],
        appearance: &HighlightAppearance,
    ) {
        if !self.items.contains_key(&model) {
            log::warn!(
                "overlay: ignoring subset for unregistered model {model}"
            );
            return;
        }
        let key = (model, appearance.material);
        let mut subset = match self.live.remove(&key) {
            Some(subset) => subset,
            None => self.recycled(model, appearance.material),
        };
        subset.entities.clear();
        subset.entities.extend_from_slice(entities);
        subset.indices.clear();
        if let Some(items) = self.items.get(&model) {
            for tris in entities.iter().filter_map(|id| items.get(id)) {
                subset.indices.extend_from_slice(tris);
            }
        }
        let _ = self.live.insert(key, subset);
    }

    fn clear(&mut self, model: ModelId, appearance: &HighlightAppearance) {
        if let Some(subset) = self.live.remove(&(model, appearance.material)) {
            self.spare.push(subset);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::picking::bvh::DEFAULT_LEAF_SIZE;
    use crate::scene::MeshBuilder;

    fn two_entity_model() -> LoadedModel {
        let mut builder = MeshBuilder::new();
        builder.push_box(Vec3::ZERO, Vec3::ONE, 5);
        builder.push_quad([Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y], 9);
        LoadedModel::new(
            ModelId(1),
            builder.build().unwrap(),
            DEFAULT_LEAF_SIZE,
        )
    }

    #[test]
    fn subset_contains_only_requested_entity() {
        let model = two_entity_model();
        let appearance = HighlightAppearance::default();
        let mut store = SubsetStore::new();
        store.register_model(&model);

        store.create_or_replace(ModelId(1), &[9], &appearance);
        let subset = store.subset(ModelId(1), MaterialId::PRESELECT).unwrap();
        assert_eq!(subset.entities, vec![9]);
        assert_eq!(subset.indices, vec![24, 25, 26, 24, 26, 27]);

        store.create_or_replace(ModelId(1), &[5], &appearance);
        assert_eq!(store.live_count(), 1);
        let subset = store.subset(ModelId(1), MaterialId::PRESELECT).unwrap();
        assert_eq!(subset.triangle_count(), 12);
    }

    #[test]
    fn clear_removes_and_recycles() {
        let model = two_entity_model();
        let appearance = HighlightAppearance::default();
        let mut store = SubsetStore::new();
        store.register_model(&model);

        store.create_or_replace(ModelId(1), &[5], &appearance);
        store.clear(ModelId(1), &appearance);
        assert_eq!(store.live_count(), 0);
        assert!(store.subsets().next().is_none());

        // Clearing again is harmless.
        store.clear(ModelId(1), &appearance);

        store.create_or_replace(ModelId(1), &[9], &appearance);
        assert_eq!(
            store
                .subset(ModelId(1), MaterialId::PRESELECT)
                .map(Subset::triangle_count),
            Some(2)
        );
    }

    #[test]
    fn unknown_model_and_entity() {
        let model = two_entity_model();
        let appearance = HighlightAppearance::default();
        let mut store = SubsetStore::new();

        store.create_or_replace(ModelId(1), &[5], &appearance);
        assert_eq!(store.live_count(), 0);

        store.register_model(&model);
        assert!(store.is_registered(ModelId(1)));
        store.create_or_replace(ModelId(1), &[404], &appearance);
        let subset = store.subset(ModelId(1), MaterialId::PRESELECT).unwrap();
        assert!(subset.indices.is_empty());
    }

    #[test]
    fn materials_are_independent() {
        let model = two_entity_model();
        let hover = HighlightAppearance::default();
        let select = HighlightAppearance {
            material: MaterialId(1),
            ..HighlightAppearance::default()
        };
        let mut store = SubsetStore::new();
        store.register_model(&model);

        store.create_or_replace(ModelId(1), &[5], &hover);
        store.create_or_replace(ModelId(1), &[9], &select);
        assert_eq!(store.live_count(), 2);
        store.clear(ModelId(1), &hover);
        assert!(store.subset(ModelId(1), MaterialId(1)).is_some());
    }
}
