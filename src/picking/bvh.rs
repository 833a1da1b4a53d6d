//! Per-model bounding volume hierarchy over triangles.
//!
//! Built once when a model is registered and queried on every pointer move.
//! Leaves hold a contiguous run of the reordered triangle list; inner nodes
//! split at the median centroid along the longest axis.

use glam::Vec3;

use crate::geometry::{Aabb, Ray};
use crate::scene::Mesh;

/// Default maximum triangles per leaf.
pub const DEFAULT_LEAF_SIZE: usize = 10;

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf { start: u32, count: u32 },
    Inner { left: u32, right: u32 },
}

#[derive(Debug, Clone)]
struct Node {
    bounds: Aabb,
    kind: NodeKind,
}

/// A nearest-hit candidate inside one mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Triangle index in the source mesh.
    pub face: u32,
    /// Distance along the ray.
    pub distance: f32,
}

/// BVH over the triangles of one [`Mesh`].
#[derive(Debug, Clone)]
pub struct BoundsTree {
    nodes: Vec<Node>,
    /// Triangle indices, reordered so every leaf covers a contiguous range.
    faces: Vec<u32>,
}

impl BoundsTree {
    /// Build a tree with at most `leaf_size` triangles per leaf.
    #[must_use]
    pub fn build(mesh: &Mesh, leaf_size: usize) -> Self {
        let leaf_size = leaf_size.max(1);
        let count = mesh.triangle_count() as u32;
        let mut centroids = Vec::with_capacity(count as usize);
        let mut tri_bounds = Vec::with_capacity(count as usize);
        for face in 0..count {
            let [a, b, c] = mesh.triangle(face).unwrap_or([Vec3::ZERO; 3]);
            centroids.push((a + b + c) / 3.0);
            tri_bounds.push(Aabb::from_points([a, b, c]));
        }

        let mut tree = Self {
            nodes: Vec::new(),
            faces: (0..count).collect(),
        };
        if count > 0 {
            let _root = tree.build_node(
                0,
                tree.faces.len(),
                &centroids,
                &tri_bounds,
                leaf_size,
            );
        }
        tree
    }

    fn build_node(
        &mut self,
        start: usize,
        end: usize,
        centroids: &[Vec3],
        tri_bounds: &[Aabb],
        leaf_size: usize,
    ) -> u32 {
        let slice = &self.faces[start..end];
        let bounds = slice
            .iter()
            .fold(Aabb::EMPTY, |acc, &f| acc.union(&tri_bounds[f as usize]));

        let index = self.nodes.len() as u32;
        self.nodes.push(Node {
            bounds,
            kind: NodeKind::Leaf {
                start: start as u32,
                count: (end - start) as u32,
            },
        });
        if end - start <= leaf_size {
            return index;
        }

        let centroid_bounds = Aabb::from_points(
            slice.iter().map(|&f| centroids[f as usize]),
        );
        let axis = centroid_bounds.size().max_position();
        if centroid_bounds.size()[axis] <= 0.0 {
            // All centroids coincide; splitting cannot separate them.
            return index;
        }

        let mid = start + (end - start) / 2;
        let _ = self.faces[start..end].select_nth_unstable_by(
            mid - start,
            |&a, &b| {
                centroids[a as usize][axis]
                    .total_cmp(&centroids[b as usize][axis])
            },
        );

        let left =
            self.build_node(start, mid, centroids, tri_bounds, leaf_size);
        let right =
            self.build_node(mid, end, centroids, tri_bounds, leaf_size);
        self.nodes[index as usize].kind = NodeKind::Inner { left, right };
        index
    }

    /// Bounds of the whole mesh (empty for a mesh with no triangles).
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.nodes.first().map_or(Aabb::EMPTY, |n| n.bounds)
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Closest triangle hit strictly nearer than `max_distance`.
    ///
    /// Children are visited near-first and any subtree whose box starts
    /// beyond the best hit so far is skipped, so the full hit list is never
    /// built.
    #[must_use]
    pub fn closest_hit(
        &self,
        mesh: &Mesh,
        ray: &Ray,
        max_distance: f32,
    ) -> Option<TriangleHit> {
        let root = self.nodes.first()?;
        if root.bounds.ray_entry(ray, max_distance).is_none() {
            return None;
        }

        let mut best: Option<TriangleHit> = None;
        let mut limit = max_distance;
        let mut stack: Vec<u32> = Vec::with_capacity(32);
        stack.push(0);

        while let Some(node_index) = stack.pop() {
            let node = &self.nodes[node_index as usize];
            match node.kind {
                NodeKind::Leaf { start, count } => {
                    let run = &self.faces
                        [start as usize..(start + count) as usize];
                    for &face in run {
                        let Some([a, b, c]) = mesh.triangle(face) else {
                            continue;
                        };
                        if let Some(t) = ray.intersect_triangle(a, b, c) {
                            let closer = t < limit
                                || (t == limit
                                    && best.is_some_and(|h| face < h.face));
                            if closer {
                                limit = t;
                                best = Some(TriangleHit { face, distance: t });
                            }
                        }
                    }
                }
                NodeKind::Inner { left, right } => {
                    let l =
                        self.nodes[left as usize].bounds.ray_entry(ray, limit);
                    let r =
                        self.nodes[right as usize].bounds.ray_entry(ray, limit);
                    match (l, r) {
                        (Some(lt), Some(rt)) => {
                            // Push the farther child first so the nearer one
                            // is popped next.
                            if lt <= rt {
                                stack.push(right);
                                stack.push(left);
                            } else {
                                stack.push(left);
                                stack.push(right);
                            }
                        }
                        (Some(_), None) => stack.push(left),
                        (None, Some(_)) => stack.push(right),
                        (None, None) => {}
                    }
                }
            }
        }
        best
    }

    /// Every triangle hit along the ray, sorted by distance.
    #[must_use]
    pub fn all_hits(&self, mesh: &Mesh, ray: &Ray) -> Vec<TriangleHit> {
        let mut hits = Vec::new();
        if self.nodes.is_empty() {
            return hits;
        }
        let mut stack = vec![0u32];
        while let Some(node_index) = stack.pop() {
            let node = &self.nodes[node_index as usize];
            if node.bounds.ray_entry(ray, f32::INFINITY).is_none() {
                continue;
            }
            match node.kind {
                NodeKind::Leaf { start, count } => {
                    let run = &self.faces
                        [start as usize..(start + count) as usize];
                    hits.extend(run.iter().filter_map(|&face| {
                        let [a, b, c] = mesh.triangle(face)?;
                        ray.intersect_triangle(a, b, c)
                            .map(|distance| TriangleHit { face, distance })
                    }));
                }
                NodeKind::Inner { left, right } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        hits.sort_by(|a, b| {
            a.distance.total_cmp(&b.distance).then(a.face.cmp(&b.face))
        });
        hits
    }
}
