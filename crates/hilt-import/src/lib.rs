//! Hilt Import - Part assets
//!
//! This crate loads glTF/GLB part models into owned scene graphs, serves them
//! through the [`AssetSource`] seam, and normalizes each part's geometry into
//! the canonical local frame the stacker expects.

mod gltf_import;
mod normalize;
mod placeholder;
mod source;
mod types;

pub use gltf_import::{import_gltf, import_gltf_slice};
pub use normalize::{resolve_part, NormalizedGeometry, NormalizedModel, PIVOT_CORRECTION_DEG};
pub use placeholder::{placeholder_radius, LineMesh, PlaceholderGeometry, PLACEHOLDER_SEGMENTS};
pub use source::{AssetSource, AssetState, FileAssetSource, MemoryAssetSource};
pub use types::{ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene, MeshBounds};
