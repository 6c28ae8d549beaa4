//! Part geometry normalization

use crate::placeholder::PlaceholderGeometry;
use crate::types::{ImportedScene, MeshBounds};
use glam::{Mat4, Quat, Vec3};
use hilt_catalog::PartSpec;

/// Rotation about X applied to assets flagged for pivot correction
pub const PIVOT_CORRECTION_DEG: f32 = 90.0;

/// A part model moved into the canonical local frame
#[derive(Debug, Clone)]
pub struct NormalizedModel {
    /// Part-owned copy of the asset's scene graph
    pub scene: ImportedScene,
    /// Applied above the scene's own roots
    pub root_transform: Mat4,
    /// Bounds in the local frame, after `root_transform`
    pub bounds: Option<MeshBounds>,
    pub mesh_node_count: usize,
    pub pivot_corrected: bool,
}

/// Geometry ready to be placed by the stacker
#[derive(Debug, Clone)]
pub enum NormalizedGeometry {
    Model(NormalizedModel),
    Placeholder(PlaceholderGeometry),
}

impl NormalizedGeometry {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, NormalizedGeometry::Placeholder(_))
    }

    /// Local-frame bounds of whatever will be drawn
    pub fn bounds(&self) -> Option<MeshBounds> {
        match self {
            NormalizedGeometry::Model(model) => model.bounds,
            NormalizedGeometry::Placeholder(p) => Some(MeshBounds {
                min: [-p.radius, 0.0, -p.radius],
                max: [p.radius, p.height, p.radius],
            }),
        }
    }
}

/// Normalize one part.
///
/// The shared `scene` is never modified: the part works on its own clone. A
/// scene without renderable meshes becomes a wireframe cylinder sized from the
/// part dimensions. Flagged assets are stood upright, centred on the vertical
/// axis, and dropped so their lowest point sits at the local origin.
pub fn resolve_part(scene: &ImportedScene, spec: &PartSpec) -> NormalizedGeometry {
    let owned = scene.clone();
    let mesh_node_count = owned.mesh_node_count();

    if mesh_node_count == 0 {
        log::warn!(
            "part {} has no meshes, drawing {} placeholder",
            spec.asset_id,
            spec.category
        );
        return NormalizedGeometry::Placeholder(PlaceholderGeometry::new(
            spec.category,
            spec.height,
        ));
    }

    if !spec.needs_pivot_correction {
        let bounds = owned.bounds_with_root(Mat4::IDENTITY);
        return NormalizedGeometry::Model(NormalizedModel {
            scene: owned,
            root_transform: Mat4::IDENTITY,
            bounds,
            mesh_node_count,
            pivot_corrected: false,
        });
    }

    let rotation = Mat4::from_quat(Quat::from_rotation_x(PIVOT_CORRECTION_DEG.to_radians()));
    let (root_transform, bounds) = match owned.bounds_with_root(rotation) {
        Some(rotated) => {
            let center = rotated.center();
            let offset = Vec3::new(-center[0], -rotated.min[1], -center[2]);
            (
                Mat4::from_translation(offset) * rotation,
                Some(rotated.translated(offset)),
            )
        }
        None => (rotation, None),
    };

    log::debug!(
        "part {} pivot corrected, bounds {:?}",
        spec.asset_id,
        bounds
    );

    NormalizedGeometry::Model(NormalizedModel {
        scene: owned,
        root_transform,
        bounds,
        mesh_node_count,
        pivot_corrected: true,
    })
}
