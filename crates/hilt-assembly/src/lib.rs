//! Hilt Assembly - Stacking and resolution pipeline
//!
//! Turns an [`InstrumentConfig`](hilt_config::InstrumentConfig) into stacked
//! slot positions, places whole instruments in the world, checks the total
//! size against the allowed range, and drives per-slot asset resolution into a
//! list of render parts.

mod assemble;
mod layout;
mod placement;
mod resolver;
mod size;

pub use assemble::{
    assemble, Assembler, Assembly, PartMaterial, PartStatus, RenderPart, ResolvedPart,
};
pub use layout::{compute_layout, Layout, LayoutEntry, PlacedSlot};
pub use placement::{
    lateral_offset, orientation_rotation, place_instruments, InstrumentPlacement, DUAL_SPACING,
};
pub use resolver::{PartResolver, ResolutionKey, Ticket};
pub use size::{validate_size, SizeReport};
