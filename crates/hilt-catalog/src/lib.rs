//! Hilt Catalog - Part dimension tables
//!
//! This crate maps asset identifiers to their authored dimensions (height,
//! vertical offset, corrective rotation) with per-category fallbacks, and
//! holds the allowed total size per weapon type.

mod table;
mod types;

pub use table::DimensionTable;
pub use types::{
    CategoryDefaults, PartCategory, PartEntry, PartSpec, SizeRange, SizeRangeEntry, Slot,
    TableFile,
};
