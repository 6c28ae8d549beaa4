//! Material resolution from color and finish

use crate::presets::{metal_profile, SurfaceProfile, MATTE};
use hilt_core::{Color, Finish, HexColor};
use serde::Serialize;

/// Blade opacity
pub const BLADE_OPACITY: f32 = 0.6;
/// Blade emissive output as a multiple of its color
pub const BLADE_EMISSIVE_BOOST: f32 = 3.0;

/// Appearance of an opaque hilt part
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OpaqueMaterial {
    pub base_color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub env_map_intensity: f32,
}

/// Appearance of a glowing blade.
///
/// `base_color` replaces whatever base texture the asset was authored with;
/// the renderer must not multiply it with the texture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BladeMaterial {
    pub base_color: Color,
    pub opacity: f32,
    pub emissive: Color,
    pub emissive_boost: f32,
    pub double_sided: bool,
    pub depth_write: bool,
    pub color_replaces_texture: bool,
}

/// Render parameters derived from a part's color and finish
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderMaterial {
    Opaque(OpaqueMaterial),
    Blade(BladeMaterial),
}

impl RenderMaterial {
    pub fn is_blade(&self) -> bool {
        matches!(self, RenderMaterial::Blade(_))
    }

    pub fn base_color(&self) -> Color {
        match self {
            RenderMaterial::Opaque(m) => m.base_color,
            RenderMaterial::Blade(m) => m.base_color,
        }
    }
}

/// Resolve the render material for a part.
///
/// Rules, first match wins:
/// 1. blades are translucent and emissive, finish is ignored;
/// 2. matte on anything but aluminium uses one uniform matte profile;
/// 3. metal (and aluminium in any finish) uses the per-color metal table.
pub fn resolve_material(color: &HexColor, finish: Finish, is_blade: bool) -> RenderMaterial {
    let base_color = color.to_color();

    if is_blade {
        return RenderMaterial::Blade(BladeMaterial {
            base_color,
            opacity: BLADE_OPACITY,
            emissive: base_color.scaled(BLADE_EMISSIVE_BOOST),
            emissive_boost: BLADE_EMISSIVE_BOOST,
            double_sided: true,
            depth_write: false,
            color_replaces_texture: true,
        });
    }

    let profile: SurfaceProfile = if finish == Finish::Matte && !color.is_aluminium() {
        MATTE
    } else {
        metal_profile(color)
    };

    RenderMaterial::Opaque(OpaqueMaterial {
        base_color,
        metalness: profile.metalness,
        roughness: profile.roughness,
        env_map_intensity: profile.env_map_intensity,
    })
}

/// Material of the wireframe stand-in drawn for an empty asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaceholderMaterial {
    pub color: Color,
    pub roughness: f32,
    pub wireframe: bool,
    pub emissive: Color,
    pub emissive_intensity: f32,
}

/// Wireframe material for placeholders; blade placeholders glow in their color
pub fn placeholder_material(color: &HexColor, is_blade: bool) -> PlaceholderMaterial {
    let color = color.to_color();
    PlaceholderMaterial {
        color,
        roughness: 0.3,
        wireframe: true,
        emissive: if is_blade { color } else { Color::BLACK },
        emissive_intensity: if is_blade { 1.0 } else { 0.0 },
    }
}
