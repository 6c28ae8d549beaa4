//! Imported scene graph types

use glam::{Mat4, Quat, Vec3};

/// An owned part model: meshes, materials and the node hierarchy placing them.
///
/// Cloning produces a fully independent copy, so every slot that uses the
/// same asset gets its own graph to normalize.
#[derive(Debug, Clone, Default)]
pub struct ImportedScene {
    /// Source file stem, or the asset id for in-memory scenes
    pub name: String,
    pub meshes: Vec<ImportedMesh>,
    pub materials: Vec<ImportedMaterial>,
    pub nodes: Vec<ImportedNode>,
    /// Indices of top-level nodes
    pub root_nodes: Vec<usize>,
}

impl ImportedScene {
    /// Number of nodes that carry renderable geometry
    pub fn mesh_node_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| {
                n.mesh_primitive_indices
                    .iter()
                    .any(|&i| self.meshes.get(i).is_some_and(|m| !m.positions.is_empty()))
            })
            .count()
    }

    /// World matrix of every node reachable from the roots, indexed like `nodes`.
    /// Unreachable nodes stay `None`.
    pub fn world_matrices(&self) -> Vec<Option<Mat4>> {
        let mut out = vec![None; self.nodes.len()];
        let mut stack: Vec<(usize, Mat4)> = self
            .root_nodes
            .iter()
            .map(|&i| (i, Mat4::IDENTITY))
            .collect();

        while let Some((index, parent)) = stack.pop() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            if out[index].is_some() {
                continue;
            }
            let world = parent * node.local_matrix();
            out[index] = Some(world);
            for &child in &node.children {
                stack.push((child, world));
            }
        }

        out
    }

    /// Bounding box of all geometry after applying `root` on top of the node
    /// hierarchy
    pub fn bounds_with_root(&self, root: Mat4) -> Option<MeshBounds> {
        let worlds = self.world_matrices();
        let mut bounds: Option<MeshBounds> = None;

        for (node, world) in self.nodes.iter().zip(worlds) {
            let Some(world) = world else {
                continue;
            };
            let matrix = root * world;
            for &mesh_index in &node.mesh_primitive_indices {
                let Some(mesh) = self.meshes.get(mesh_index) else {
                    continue;
                };
                let transformed: Vec<[f32; 3]> = mesh
                    .positions
                    .iter()
                    .map(|p| matrix.transform_point3(Vec3::from_array(*p)).to_array())
                    .collect();
                if let Some(b) = MeshBounds::from_positions(&transformed) {
                    bounds = Some(match bounds {
                        Some(acc) => acc.union(&b),
                        None => b,
                    });
                }
            }
        }

        bounds
    }
}

/// Axis-aligned bounding box computed from vertex positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl MeshBounds {
    /// Compute bounds from a set of vertex positions
    pub fn from_positions(positions: &[[f32; 3]]) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }
        let mut min = positions[0];
        let mut max = positions[0];
        for p in positions.iter().skip(1) {
            for i in 0..3 {
                if p[i] < min[i] { min[i] = p[i]; }
                if p[i] > max[i] { max[i] = p[i]; }
            }
        }
        Some(Self { min, max })
    }

    /// Size along each axis
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Merge with another bounds to get the union
    pub fn union(&self, other: &MeshBounds) -> MeshBounds {
        MeshBounds {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }

    pub fn translated(&self, offset: Vec3) -> MeshBounds {
        MeshBounds {
            min: (Vec3::from_array(self.min) + offset).to_array(),
            max: (Vec3::from_array(self.max) + offset).to_array(),
        }
    }
}

impl std::fmt::Display for MeshBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.size();
        write!(
            f,
            "{:.2} x {:.2} x {:.2} (min [{:.2}, {:.2}, {:.2}], max [{:.2}, {:.2}, {:.2}])",
            s[0], s[1], s[2],
            self.min[0], self.min[1], self.min[2],
            self.max[0], self.max[1], self.max[2],
        )
    }
}

/// An imported mesh primitive with vertex data
#[derive(Debug, Clone, Default)]
pub struct ImportedMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub material_index: Option<usize>,
}

impl ImportedMesh {
    /// Compute the axis-aligned bounding box of this mesh's vertices
    pub fn bounds(&self) -> Option<MeshBounds> {
        MeshBounds::from_positions(&self.positions)
    }
}

/// A node from the glTF scene graph
#[derive(Debug, Clone)]
pub struct ImportedNode {
    pub name: String,
    pub translation: [f32; 3],
    pub rotation: [f32; 4], // quaternion [x, y, z, w]
    pub scale: [f32; 3],
    pub mesh_primitive_indices: Vec<usize>, // indices into ImportedScene.meshes
    pub children: Vec<usize>,               // indices into ImportedScene.nodes
}

impl ImportedNode {
    /// A node with identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translation: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
            mesh_primitive_indices: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::from_array(self.scale),
            Quat::from_array(self.rotation),
            Vec3::from_array(self.translation),
        )
    }
}

/// An imported PBR material, as authored in the asset
#[derive(Debug, Clone)]
pub struct ImportedMaterial {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub base_color_texture: Option<String>,
}
