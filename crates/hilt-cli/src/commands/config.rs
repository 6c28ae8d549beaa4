//! Configuration commands

use super::{config_path, read_config};
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use hilt_catalog::Slot;
use hilt_config::{config_to_string, save_config, AssemblyConfig, ColorTarget, Command};
use hilt_core::{Finish, HexColor, Orientation, WeaponType};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },

    /// Print the configuration file path
    Path,

    /// Set the color of a slot, or of every slot with "global"
    SetColor {
        /// Slot name or "global"
        target: String,

        /// Hex color, e.g. "#6b2624"
        color: String,

        /// Instrument index (1 is the second instrument when dual)
        #[arg(long, default_value = "0")]
        instrument: usize,
    },

    /// Set the finish of a slot, or of every slot with "global"
    SetFinish {
        /// Slot name or "global"
        target: String,

        /// Finish (metal or matte)
        finish: String,

        #[arg(long, default_value = "0")]
        instrument: usize,
    },

    /// Show or hide an optional slot (ring-bottom, ring-top, blade)
    Visibility {
        slot: String,

        /// "on" or "off"
        state: String,

        #[arg(long, default_value = "0")]
        instrument: usize,
    },

    /// Flip the visibility of an optional slot
    Toggle {
        slot: String,

        #[arg(long, default_value = "0")]
        instrument: usize,
    },

    /// Select the model variant of a slot
    SetModel {
        slot: String,

        /// Asset id, e.g. "models/blade_short_v1.glb"
        asset: String,

        #[arg(long, default_value = "0")]
        instrument: usize,
    },

    /// Set the orientation (vertical or horizontal)
    Orientation { value: String },

    /// Set the weapon type (single or dual)
    Weapon { value: String },

    /// Restore every setting to its default
    Reset,
}

pub fn run(cmd: ConfigCommands, explicit_path: Option<PathBuf>) -> Result<()> {
    let path = config_path(explicit_path)?;

    let command = match cmd {
        ConfigCommands::Show { format } => {
            let config = read_config(&path)?;
            return show(&config, &format);
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            return Ok(());
        }
        ConfigCommands::SetColor {
            target,
            color,
            instrument,
        } => Command::SetColor {
            instrument,
            target: parse_target(&target)?,
            color: HexColor::parse(&color)?,
        },
        ConfigCommands::SetFinish {
            target,
            finish,
            instrument,
        } => Command::SetFinish {
            instrument,
            target: parse_target(&target)?,
            finish: finish.parse::<Finish>()?,
        },
        ConfigCommands::Visibility {
            slot,
            state,
            instrument,
        } => Command::SetVisibility {
            instrument,
            slot: slot.parse::<Slot>()?,
            visible: parse_state(&state)?,
        },
        ConfigCommands::Toggle { slot, instrument } => Command::ToggleVisibility {
            instrument,
            slot: slot.parse::<Slot>()?,
        },
        ConfigCommands::SetModel {
            slot,
            asset,
            instrument,
        } => Command::SelectVariant {
            instrument,
            slot: slot.parse::<Slot>()?,
            asset_id: asset,
        },
        ConfigCommands::Orientation { value } => {
            Command::SetOrientation(value.parse::<Orientation>()?)
        }
        ConfigCommands::Weapon { value } => Command::SetWeaponType(value.parse::<WeaponType>()?),
        ConfigCommands::Reset => Command::Reset,
    };

    let mut config = read_config(&path)?;
    config.apply(command)?;
    save_config(&path, &config)
        .with_context(|| format!("Failed to save config {}", path.display()))?;
    println!("Saved {}", path.display());
    Ok(())
}

fn show(config: &AssemblyConfig, format: &str) -> Result<()> {
    let output = match format {
        "toml" => config_to_string(config)?,
        "json" => serde_json::to_string_pretty(config)?,
        _ => bail!("Unknown format: {}", format),
    };
    println!("{}", output);
    Ok(())
}

fn parse_target(s: &str) -> Result<ColorTarget> {
    if s.eq_ignore_ascii_case("global") {
        return Ok(ColorTarget::Global);
    }
    Ok(ColorTarget::Slot(s.parse::<Slot>()?))
}

fn parse_state(s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "show" => Ok(true),
        "off" | "false" | "hide" => Ok(false),
        _ => bail!("Expected on or off, got '{}'", s),
    }
}
