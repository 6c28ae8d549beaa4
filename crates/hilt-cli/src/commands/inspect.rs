//! Inspect command

use super::{check_format, TableArgs};
use anyhow::{Context, Result};
use glam::Mat4;
use hilt_catalog::PartCategory;
use hilt_import::{import_gltf, resolve_part, NormalizedGeometry};
use serde::Serialize;
use std::path::PathBuf;

pub struct InspectArgs {
    pub path: PathBuf,
    pub category: String,
    pub asset: Option<String>,
    pub format: String,
    pub table: TableArgs,
}

#[derive(Serialize)]
struct InspectReport {
    asset: String,
    category: PartCategory,
    catalogued: bool,
    height: f32,
    offset: f32,
    rotation: [f32; 3],
    pivot_correction: bool,
    meshes: usize,
    mesh_nodes: usize,
    materials: usize,
    placeholder: bool,
    authored_bounds: Option<[[f32; 3]; 2]>,
    normalized_bounds: Option<[[f32; 3]; 2]>,
}

pub fn run(args: InspectArgs) -> Result<()> {
    check_format(&args.format)?;
    let category: PartCategory = args.category.parse()?;
    let table = args.table.load()?;

    let scene = import_gltf(&args.path)
        .with_context(|| format!("Failed to import {}", args.path.display()))?;
    let asset = args
        .asset
        .unwrap_or_else(|| args.path.to_string_lossy().replace('\\', "/"));
    let spec = table.lookup(&asset, category);
    let geometry = resolve_part(&scene, &spec);

    let report = InspectReport {
        asset,
        category,
        catalogued: spec.catalogued,
        height: spec.height,
        offset: spec.vertical_offset,
        rotation: spec.corrective_rotation,
        pivot_correction: spec.needs_pivot_correction,
        meshes: scene.meshes.len(),
        mesh_nodes: scene.mesh_node_count(),
        materials: scene.materials.len(),
        placeholder: geometry.is_placeholder(),
        authored_bounds: scene
            .bounds_with_root(Mat4::IDENTITY)
            .map(|b| [b.min, b.max]),
        normalized_bounds: geometry.bounds().map(|b| [b.min, b.max]),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Asset: {}", report.asset);
    println!(
        "  Category: {}{}",
        report.category,
        if report.catalogued { "" } else { " (uncatalogued, default height)" }
    );
    println!("  Height: {:.1} mm, offset {:.1} mm", report.height, report.offset);
    println!("  Rotation: {:?}", report.rotation);
    println!("  Meshes: {} ({} nodes)", report.meshes, report.mesh_nodes);
    println!("  Materials: {}", report.materials);
    match &geometry {
        NormalizedGeometry::Placeholder(p) => println!(
            "  Placeholder: wireframe cylinder r={} h={} ({} segments)",
            p.radius, p.height, p.segments
        ),
        NormalizedGeometry::Model(m) => {
            if m.pivot_corrected {
                println!("  Pivot corrected");
            }
            if let Some([min, max]) = report.authored_bounds {
                println!("  Authored bounds: {:?} .. {:?}", min, max);
            }
            if let Some(bounds) = m.bounds {
                println!("  Normalized bounds: {}", bounds);
            }
        }
    }
    Ok(())
}
