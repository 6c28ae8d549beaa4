//! Layout command

use super::{check_format, config_path, read_config, TableArgs};
use anyhow::Result;
use hilt_assembly::{place_instruments, validate_size, LayoutEntry, SizeReport};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct InstrumentLayout {
    index: usize,
    translation: [f32; 3],
    total_height: f32,
    hilt_height: f32,
    size: SizeReport,
    slots: Vec<LayoutEntry>,
}

pub fn run(table_args: &TableArgs, config: Option<PathBuf>, format: &str) -> Result<()> {
    check_format(format)?;
    let table = table_args.load()?;
    let config = read_config(&config_path(config)?)?;

    let placements = place_instruments(&config, &table);
    let layouts: Vec<InstrumentLayout> = placements
        .iter()
        .zip(config.active_instruments())
        .map(|(p, inst)| InstrumentLayout {
            index: p.index,
            translation: p.translation.to_array(),
            total_height: p.layout.total_height(),
            hilt_height: p.layout.hilt_height(),
            size: validate_size(inst, config.weapon_type, &table),
            slots: p.layout.entries(),
        })
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&layouts)?);
        return Ok(());
    }

    println!("{} / {}", config.weapon_type, config.orientation);
    for layout in &layouts {
        println!();
        println!(
            "Instrument {} (offset {:?})",
            layout.index, layout.translation
        );
        for entry in &layout.slots {
            println!(
                "  {:<11} y={:>7.1}  h={:>6.1}  offset={:>6.1}  {}",
                entry.slot.to_string(),
                entry.y,
                entry.height,
                entry.offset,
                entry.asset
            );
        }
        println!("  Hilt height: {:.1} mm", layout.hilt_height);
        println!("  Total height: {:.1} mm", layout.total_height);
        let verdict = if layout.size.valid { "ok" } else { "OUT OF RANGE" };
        match layout.size.range {
            Some(range) => println!(
                "  Size: {:.1} mm in [{:.1}, {:.1}] {}",
                layout.size.total, range.min_total, range.max_total, verdict
            ),
            None => println!("  Size: {:.1} mm (no range)", layout.size.total),
        }
    }
    Ok(())
}
