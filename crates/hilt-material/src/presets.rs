//! Named color presets and per-color metal profiles

use hilt_core::HexColor;
use serde::Serialize;

/// A named color offered by the configurator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorPreset {
    pub name: &'static str,
    pub value: &'static str,
}

/// The official palette, in display order
pub const COLOR_PRESETS: [ColorPreset; 9] = [
    ColorPreset {
        name: "Blood Moon",
        value: "#6b2624",
    },
    ColorPreset {
        name: "Cobalt Nebula",
        value: "#2c3f83",
    },
    ColorPreset {
        name: "Dark Matter",
        value: "#272728",
    },
    ColorPreset {
        name: "Lunar Mist",
        value: "#b3b3b3",
    },
    ColorPreset {
        name: "Sideral Dust",
        value: "#555556",
    },
    ColorPreset {
        name: "Violet Plasma",
        value: "#5a2958",
    },
    ColorPreset {
        name: "Viridian Aurora",
        value: "#457954",
    },
    ColorPreset {
        name: "Yggdrasil Mantle",
        value: "#5e4731",
    },
    ColorPreset {
        name: "Aluminium",
        value: "#eceae7",
    },
];

/// Find the preset matching a color, if any
pub fn preset_for(color: &HexColor) -> Option<&'static ColorPreset> {
    COLOR_PRESETS.iter().find(|p| p.value == color.as_str())
}

/// Reflectivity parameters of an opaque surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceProfile {
    pub metalness: f32,
    pub roughness: f32,
    pub env_map_intensity: f32,
}

impl SurfaceProfile {
    const fn new(metalness: f32, roughness: f32, env_map_intensity: f32) -> Self {
        Self {
            metalness,
            roughness,
            env_map_intensity,
        }
    }
}

pub(crate) const MATTE: SurfaceProfile = SurfaceProfile::new(0.1, 0.7, 0.3);
const NEUTRAL: SurfaceProfile = SurfaceProfile::new(0.5, 0.5, 1.0);

/// Metal profile for a color. Unlisted colors get a neutral mid-range profile.
pub fn metal_profile(color: &HexColor) -> SurfaceProfile {
    match color.as_str() {
        // Aluminium
        "#eceae7" => SurfaceProfile::new(1.0, 0.15, 1.5),
        // Lunar Mist
        "#c5c5c5" | "#b3b3b3" => SurfaceProfile::new(0.9, 0.25, 1.2),
        // Blood Moon, Cobalt Nebula, Violet Plasma, Viridian Aurora
        "#6b2624" | "#2c3f83" | "#723470" | "#5a2958" | "#63a878" | "#457954" | "#aa0000" => {
            SurfaceProfile::new(0.8, 0.2, 1.0)
        }
        // Dark Matter
        "#272728" | "#444444" => SurfaceProfile::new(0.6, 0.4, 0.8),
        // Gold, copper, Yggdrasil Mantle
        "#d4af37" | "#b87333" | "#72583e" | "#5e4731" => SurfaceProfile::new(1.0, 0.2, 1.2),
        // Sideral Dust
        "#555556" => SurfaceProfile::new(0.4, 0.6, 0.5),
        _ => NEUTRAL,
    }
}
