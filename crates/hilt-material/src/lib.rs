//! Hilt Material - Render material resolution
//!
//! Maps a part's color and finish to physically based render parameters.
//! Blades take a separate translucent, emissive path.

mod material;
mod presets;

pub use material::{
    placeholder_material, resolve_material, BladeMaterial, OpaqueMaterial, PlaceholderMaterial,
    RenderMaterial, BLADE_EMISSIVE_BOOST, BLADE_OPACITY,
};
pub use presets::{metal_profile, preset_for, ColorPreset, SurfaceProfile, COLOR_PRESETS};
