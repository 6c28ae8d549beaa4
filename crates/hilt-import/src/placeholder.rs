//! Procedural wireframe stand-ins for parts without geometry

use hilt_catalog::PartCategory;

/// Radial segments of placeholder cylinders
pub const PLACEHOLDER_SEGMENTS: u32 = 32;

/// Line-list geometry: every pair of indices is one edge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl LineMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.indices.len() / 2
    }
}

/// A wireframe cylinder standing on the local origin, drawn instead of an
/// empty asset so the missing part stays visible
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderGeometry {
    pub radius: f32,
    pub height: f32,
    pub segments: u32,
    pub mesh: LineMesh,
}

impl PlaceholderGeometry {
    pub fn new(category: PartCategory, height: f32) -> Self {
        let radius = placeholder_radius(category);
        Self {
            radius,
            height,
            segments: PLACEHOLDER_SEGMENTS,
            mesh: create_wireframe_cylinder(radius, height, PLACEHOLDER_SEGMENTS),
        }
    }
}

/// Rings sit over the body tube, so their stand-in is wider
pub fn placeholder_radius(category: PartCategory) -> f32 {
    match category {
        PartCategory::Ring => 22.0,
        _ => 18.0,
    }
}

/// Create a wireframe cylinder spanning y in [0, height]
pub fn create_wireframe_cylinder(radius: f32, height: f32, segments: u32) -> LineMesh {
    let segments = segments.max(3);
    let mut positions = Vec::with_capacity(segments as usize * 2);

    // Bottom ring then top ring
    for y in [0.0, height] {
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            positions.push([radius * angle.cos(), y, radius * angle.sin()]);
        }
    }

    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let next = (i + 1) % segments;
        // Bottom ring edge
        indices.extend_from_slice(&[i, next]);
        // Top ring edge
        indices.extend_from_slice(&[segments + i, segments + next]);
        // Vertical edge
        indices.extend_from_slice(&[i, segments + i]);
    }

    LineMesh { positions, indices }
}
