//! glTF/GLB file importer

use crate::types::{ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene};
use hilt_core::{HiltError, Result};
use std::collections::HashSet;
use std::path::Path;

/// Import a glTF or GLB file
pub fn import_gltf<P: AsRef<Path>>(path: P) -> Result<ImportedScene> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path).map_err(|e| {
        HiltError::ImportError(format!("Failed to import {}: {}", path.display(), e))
    })?;

    let name = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();

    Ok(build_scene(name, &document, &buffers))
}

/// Import a glTF or GLB document held in memory
pub fn import_gltf_slice(name: &str, bytes: &[u8]) -> Result<ImportedScene> {
    let (document, buffers, _images) = gltf::import_slice(bytes)
        .map_err(|e| HiltError::ImportError(format!("Failed to import {}: {}", name, e)))?;
    Ok(build_scene(name.to_string(), &document, &buffers))
}

fn build_scene(
    name: String,
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> ImportedScene {
    let mut meshes = Vec::new();
    // glTF mesh index -> indices of its primitives in `meshes`
    let mut primitives_by_mesh: Vec<Vec<usize>> = Vec::new();

    for mesh in document.meshes() {
        let mesh_name = mesh
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

        let mut primitive_indices = Vec::new();
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d[..]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .map(|iter| iter.collect())
                .unwrap_or_default();

            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_default();

            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect())
                .unwrap_or_default();

            let indices: Vec<u32> = reader
                .read_indices()
                .map(|iter| iter.into_u32().collect())
                .unwrap_or_default();

            primitive_indices.push(meshes.len());
            meshes.push(ImportedMesh {
                name: mesh_name.clone(),
                positions,
                normals,
                uvs,
                indices,
                material_index: primitive.material().index(),
            });
        }
        primitives_by_mesh.push(primitive_indices);
    }

    let mut materials = Vec::new();
    for material in document.materials() {
        let mat_name = material
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("material_{}", material.index().unwrap_or(0)));

        let pbr = material.pbr_metallic_roughness();
        let base_color_texture = pbr.base_color_texture().map(|info| {
            info.texture()
                .name()
                .map(String::from)
                .unwrap_or_else(|| format!("texture_{}", info.texture().index()))
        });

        materials.push(ImportedMaterial {
            name: mat_name,
            base_color: pbr.base_color_factor(),
            metallic: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
            base_color_texture,
        });
    }

    let mut nodes = Vec::new();
    for node in document.nodes() {
        let (translation, rotation, scale) = node.transform().decomposed();
        let mesh_primitive_indices = node
            .mesh()
            .and_then(|m| primitives_by_mesh.get(m.index()).cloned())
            .unwrap_or_default();

        nodes.push(ImportedNode {
            name: node
                .name()
                .map(String::from)
                .unwrap_or_else(|| format!("node_{}", node.index())),
            translation,
            rotation,
            scale,
            mesh_primitive_indices,
            children: node.children().map(|c| c.index()).collect(),
        });
    }

    let root_nodes = match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => scene.nodes().map(|n| n.index()).collect(),
        None => {
            let children: HashSet<usize> =
                nodes.iter().flat_map(|n| n.children.iter().copied()).collect();
            (0..nodes.len()).filter(|i| !children.contains(i)).collect()
        }
    };

    log::debug!(
        "import: {} has {} node(s), {} primitive(s), {} material(s)",
        name,
        nodes.len(),
        meshes.len(),
        materials.len()
    );

    ImportedScene {
        name,
        meshes,
        materials,
        nodes,
        root_nodes,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{EMPTY_GLTF, TRIANGLE_GLTF};
    use super::*;

    #[test]
    fn test_import_triangle() {
        let scene = import_gltf_slice("triangle", TRIANGLE_GLTF.as_bytes()).unwrap();
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.meshes[0].positions.len(), 3);
        assert_eq!(scene.nodes[0].mesh_primitive_indices, vec![0]);
        assert_eq!(scene.root_nodes, vec![0]);
        assert_eq!(scene.mesh_node_count(), 1);

        let bounds = scene.meshes[0].bounds().unwrap();
        assert_eq!(bounds.max, [2.0, 4.0, 1.0]);
    }

    #[test]
    fn test_import_empty() {
        let scene = import_gltf_slice("empty", EMPTY_GLTF.as_bytes()).unwrap();
        assert_eq!(scene.nodes.len(), 1);
        assert_eq!(scene.mesh_node_count(), 0);
    }

    #[test]
    fn test_import_garbage_is_error() {
        assert!(import_gltf_slice("garbage", b"not a gltf").is_err());
    }

    #[test]
    fn test_import_missing_file_is_error() {
        assert!(import_gltf("/definitely/not/here.glb").is_err());
    }
}
