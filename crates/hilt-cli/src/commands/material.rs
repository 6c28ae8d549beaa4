//! Material command

use super::check_format;
use anyhow::Result;
use hilt_core::{Finish, HexColor};
use hilt_material::{preset_for, resolve_material, RenderMaterial};

pub fn run(color: &str, finish: &str, blade: bool, format: &str) -> Result<()> {
    check_format(format)?;
    let color = HexColor::parse(color)?;
    let finish: Finish = finish.parse()?;
    let material = resolve_material(&color, finish, blade);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&material)?);
        return Ok(());
    }

    let name = preset_for(&color).map_or("custom", |p| p.name);
    println!("{} ({}), {}", color, name, finish);
    match material {
        RenderMaterial::Opaque(m) => {
            println!("  Metalness: {:.2}", m.metalness);
            println!("  Roughness: {:.2}", m.roughness);
            println!("  Env map intensity: {:.2}", m.env_map_intensity);
        }
        RenderMaterial::Blade(m) => {
            println!("  Blade (finish ignored)");
            println!("  Opacity: {:.2}", m.opacity);
            println!("  Emissive boost: {:.1}", m.emissive_boost);
            println!("  Double sided: {}", m.double_sided);
            println!("  Depth write: {}", m.depth_write);
        }
    }
    Ok(())
}
