use glam::Vec3;

use crate::error::HoverError;
use crate::geometry::Aabb;
use crate::picking::EntityId;

// ---------------------------------------------------------------------------
// Mesh
// ---------------------------------------------------------------------------

/// Indexed triangle mesh for one imported model.
///
/// Many entities' geometry is merged into a single mesh. When the importer
/// provides it, `entity_ids` carries the owning entity of every vertex, which
/// is what the entity resolver and the subset overlay key on.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    entity_ids: Option<Vec<EntityId>>,
}

impl Mesh {
    /// Build a mesh without entity metadata.
    ///
    /// Fails if the index count is not a multiple of three or any index is
    /// out of range.
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Result<Self, HoverError> {
        if indices.len() % 3 != 0 {
            return Err(HoverError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) =
            indices.iter().find(|&&i| i as usize >= positions.len())
        {
            return Err(HoverError::InvalidMesh(format!(
                "index {bad} out of range for {} vertices",
                positions.len()
            )));
        }
        Ok(Self {
            positions,
            indices,
            entity_ids: None,
        })
    }

    /// Attach a per-vertex entity id attribute.
    pub fn with_entity_ids(
        mut self,
        entity_ids: Vec<EntityId>,
    ) -> Result<Self, HoverError> {
        if entity_ids.len() != self.positions.len() {
            return Err(HoverError::InvalidMesh(format!(
                "{} entity ids for {} vertices",
                entity_ids.len(),
                self.positions.len()
            )));
        }
        self.entity_ids = Some(entity_ids);
        Ok(self)
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Flat triangle index list.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Per-vertex entity ids, if the importer supplied them.
    #[must_use]
    pub fn entity_ids(&self) -> Option<&[EntityId]> {
        self.entity_ids.as_deref()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices of triangle `face`.
    #[inline]
    #[must_use]
    pub fn face(&self, face: u32) -> Option<[u32; 3]> {
        let start = face as usize * 3;
        let tri = self.indices.get(start..start + 3)?;
        Some([tri[0], tri[1], tri[2]])
    }

    /// Corner positions of triangle `face`.
    #[inline]
    #[must_use]
    pub fn triangle(&self, face: u32) -> Option<[Vec3; 3]> {
        let [a, b, c] = self.face(face)?;
        Some([
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ])
    }

    /// Bounds of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// MeshBuilder
// ---------------------------------------------------------------------------

/// Accumulates boxes and quads tagged with entity ids into one merged
/// [`Mesh`].
#[derive(Debug, Default)]
pub struct MeshBuilder {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    entity_ids: Vec<EntityId>,
}

impl MeshBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a quad with corners in order `a, b, c, d`.
    pub fn push_quad(&mut self, corners: [Vec3; 4], entity: EntityId) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&corners);
        self.entity_ids.extend_from_slice(&[entity; 4]);
        self.indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 3,
        ]);
    }

    /// Append an axis-aligned box spanning `min..max` as six quads.
    pub fn push_box(&mut self, min: Vec3, max: Vec3, entity: EntityId) {
        // Corner bits: 1 = max x, 2 = max y, 4 = max z.
        const FACES: [[u8; 4]; 6] = [
            [0, 4, 6, 2], // -X
            [1, 3, 7, 5], // +X
            [0, 1, 5, 4], // -Y
            [2, 6, 7, 3], // +Y
            [0, 2, 3, 1], // -Z
            [4, 5, 7, 6], // +Z
        ];
        let corner = |bits: u8| {
            Vec3::new(
                if bits & 1 == 0 { min.x } else { max.x },
                if bits & 2 == 0 { min.y } else { max.y },
                if bits & 4 == 0 { min.z } else { max.z },
            )
        };
        for quad in FACES {
            self.push_quad(quad.map(corner), entity);
        }
    }

    /// Finish into a validated mesh carrying entity ids.
    pub fn build(self) -> Result<Mesh, HoverError> {
        Mesh::new(self.positions, self.indices)?
            .with_entity_ids(self.entity_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_index_list() {
        let err = Mesh::new(vec![Vec3::ZERO; 3], vec![0, 1]).unwrap_err();
        assert!(matches!(err, HoverError::InvalidMesh(_)));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Mesh::new(vec![Vec3::ZERO; 3], vec![0, 1, 3]).unwrap_err();
        assert!(err.to_string().contains("index 3"));
    }

    #[test]
    fn rejects_mismatched_entity_ids() {
        let mesh = Mesh::new(vec![Vec3::ZERO; 3], vec![0, 1, 2]).unwrap();
        assert!(mesh.with_entity_ids(vec![7, 7]).is_err());
    }

    #[test]
    fn box_has_twelve_triangles_tagged_with_entity() {
        let mut builder = MeshBuilder::new();
        builder.push_box(Vec3::ZERO, Vec3::ONE, 42);
        let mesh = builder.build().unwrap();

        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.positions().len(), 24);
        assert!(mesh.entity_ids().unwrap().iter().all(|&id| id == 42));

        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::ONE);
    }

    #[test]
    fn face_lookup_out_of_range_is_none() {
        let mut builder = MeshBuilder::new();
        builder.push_quad([Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y], 1);
        let mesh = builder.build().unwrap();
        assert_eq!(mesh.face(1), Some([0, 2, 3]));
        assert!(mesh.face(2).is_none());
        assert!(mesh.triangle(2).is_none());
    }
}
