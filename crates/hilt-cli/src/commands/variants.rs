//! Variants command

use super::TableArgs;
use anyhow::Result;
use hilt_catalog::PartCategory;

pub fn run(table_args: &TableArgs, category: Option<&str>) -> Result<()> {
    let table = table_args.load()?;
    let categories = match category {
        Some(name) => vec![name.parse::<PartCategory>()?],
        None => PartCategory::ALL.to_vec(),
    };

    for category in categories {
        let variants = table.variants(category);
        println!("{} ({}):", category, variants.len());
        for asset in variants {
            let spec = table.lookup(asset, category);
            println!(
                "  {:<42} h={:>6.1}  offset={:>6.1}",
                asset, spec.height, spec.vertical_offset
            );
        }
    }
    Ok(())
}
