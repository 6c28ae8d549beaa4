//! Assemble command

use super::{check_format, config_path, read_config, TableArgs};
use anyhow::Result;
use hilt_assembly::{assemble, PartMaterial, PartStatus, RenderPart};
use hilt_catalog::Slot;
use hilt_import::FileAssetSource;
use hilt_material::RenderMaterial;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct PartReport {
    instrument: usize,
    slot: Slot,
    asset: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    position: [f32; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    material: Option<serde_json::Value>,
    placeholder: bool,
}

impl PartReport {
    fn from_part(part: &RenderPart) -> Result<Self> {
        let (error, material, placeholder) = match &part.status {
            PartStatus::Ready(resolved) => {
                let material = match &resolved.material {
                    PartMaterial::Render(m) => serde_json::to_value(m)?,
                    PartMaterial::Placeholder(m) => serde_json::to_value(m)?,
                };
                (None, Some(material), resolved.geometry.is_placeholder())
            }
            PartStatus::Pending => (None, None, false),
            PartStatus::Failed(message) => (Some(message.clone()), None, false),
        };
        Ok(Self {
            instrument: part.instrument,
            slot: part.slot,
            asset: part.asset_id.clone(),
            status: part.status.label(),
            error,
            position: part.transform.w_axis.truncate().to_array(),
            material,
            placeholder,
        })
    }
}

pub fn run(
    table_args: &TableArgs,
    config: Option<PathBuf>,
    assets_dir: &Path,
    format: &str,
) -> Result<()> {
    check_format(format)?;
    let table = table_args.load()?;
    let config = read_config(&config_path(config)?)?;

    let mut source = FileAssetSource::new(assets_dir);
    let assembly = assemble(&config, &table, &mut source);

    let reports = assembly
        .parts
        .iter()
        .map(PartReport::from_part)
        .collect::<Result<Vec<_>>>()?;

    if format == "json" {
        #[derive(Serialize)]
        struct Output<'a> {
            parts: &'a [PartReport],
            sizes: &'a [hilt_assembly::SizeReport],
        }
        let output = Output {
            parts: &reports,
            sizes: &assembly.sizes,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (part, report) in assembly.parts.iter().zip(&reports) {
        let detail = match &part.status {
            PartStatus::Ready(resolved) => describe(&resolved.material),
            PartStatus::Pending => "waiting for asset".to_string(),
            PartStatus::Failed(message) => message.clone(),
        };
        println!(
            "[{}] {:<11} {:<8} {}  {}",
            report.instrument,
            report.slot.to_string(),
            report.status,
            report.asset,
            detail
        );
    }

    for (index, size) in assembly.sizes.iter().enumerate() {
        if !size.valid {
            println!("Instrument {}: total {:.1} mm is out of range", index, size.total);
        }
    }

    let failed = assembly.failed().count();
    if failed > 0 {
        eprintln!("{} part(s) failed to load", failed);
    }
    Ok(())
}

fn describe(material: &PartMaterial) -> String {
    match material {
        PartMaterial::Render(RenderMaterial::Opaque(m)) => format!(
            "metal {:.2} rough {:.2} env {:.2}",
            m.metalness, m.roughness, m.env_map_intensity
        ),
        PartMaterial::Render(RenderMaterial::Blade(m)) => {
            format!("blade opacity {:.2} glow x{:.1}", m.opacity, m.emissive_boost)
        }
        PartMaterial::Placeholder(_) => "wireframe placeholder".to_string(),
    }
}
