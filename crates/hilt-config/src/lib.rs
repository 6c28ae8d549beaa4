//! Hilt Config - Assembly configuration
//!
//! This crate holds the user's choices (colors, finishes, model variants,
//! visibility toggles, orientation, weapon type), the commands that mutate
//! them, and their TOML persistence. Loading always goes through
//! [`normalize_config`], which upgrades legacy records and falls back field by
//! field so a damaged file never blocks startup.

mod commands;
mod format;
mod normalize;
mod persist;

pub use commands::{ColorTarget, Command};
pub use format::{
    default_model, AssemblyConfig, ColorFinish, InstrumentConfig, SlotConfig, SlotSet,
    CONFIG_VERSION,
};
pub use normalize::{json_to_toml, normalize_config, Normalized};
pub use persist::{
    config_from_str, config_to_string, default_config_path, load_config, load_or_default,
    save_config,
};
