//! Part, slot and table file definitions

use hilt_core::{HiltError, Result, WeaponType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of parts a hilt is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartCategory {
    Pommel,
    Ring,
    Body,
    Emitter,
    Blade,
}

impl PartCategory {
    pub const ALL: [PartCategory; 5] = [
        PartCategory::Pommel,
        PartCategory::Ring,
        PartCategory::Body,
        PartCategory::Emitter,
        PartCategory::Blade,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartCategory::Pommel => "pommel",
            PartCategory::Ring => "ring",
            PartCategory::Body => "body",
            PartCategory::Emitter => "emitter",
            PartCategory::Blade => "blade",
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartCategory {
    type Err = HiltError;

    fn from_str(s: &str) -> Result<Self> {
        PartCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.to_ascii_lowercase())
            .ok_or_else(|| HiltError::UnknownCategory(s.to_string()))
    }
}

/// One of the six fixed positions in the assembly, base to tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Pommel,
    RingBottom,
    Body,
    RingTop,
    Emitter,
    Blade,
}

impl Slot {
    /// Stacking order, pommel at the base and blade at the tip
    pub const ORDER: [Slot; 6] = [
        Slot::Pommel,
        Slot::RingBottom,
        Slot::Body,
        Slot::RingTop,
        Slot::Emitter,
        Slot::Blade,
    ];

    pub fn category(&self) -> PartCategory {
        match self {
            Slot::Pommel => PartCategory::Pommel,
            Slot::RingBottom | Slot::RingTop => PartCategory::Ring,
            Slot::Body => PartCategory::Body,
            Slot::Emitter => PartCategory::Emitter,
            Slot::Blade => PartCategory::Blade,
        }
    }

    /// Optional slots can be removed from the stack entirely
    pub fn is_optional(&self) -> bool {
        matches!(self, Slot::RingBottom | Slot::RingTop | Slot::Blade)
    }

    pub fn is_blade(&self) -> bool {
        matches!(self, Slot::Blade)
    }

    /// Key used in persisted records
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Pommel => "pommel",
            Slot::RingBottom => "ringBottom",
            Slot::Body => "body",
            Slot::RingTop => "ringTop",
            Slot::Emitter => "emitter",
            Slot::Blade => "blade",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Slot {
    type Err = HiltError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.replace(['-', '_'], "").to_ascii_lowercase();
        Slot::ORDER
            .iter()
            .copied()
            .find(|slot| slot.key().to_ascii_lowercase() == wanted)
            .ok_or_else(|| HiltError::UnknownSlot(s.to_string()))
    }
}

/// Resolved dimensions for one asset variant
#[derive(Debug, Clone, PartialEq)]
pub struct PartSpec {
    pub asset_id: String,
    pub category: PartCategory,
    /// Nominal height along the stacking axis, in millimetres
    pub height: f32,
    /// Added to the stack cursor when placing this part
    pub vertical_offset: f32,
    /// Euler angles in degrees, XYZ order
    pub corrective_rotation: [f32; 3],
    /// The asset was authored lying down with an arbitrary pivot and must be
    /// re-oriented and re-centred before stacking
    pub needs_pivot_correction: bool,
    /// False when this spec came from the category fallback
    pub catalogued: bool,
}

/// Authored table entry, as stored in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartEntry {
    pub asset: String,
    pub category: PartCategory,
    pub height: f32,
    #[serde(default)]
    pub offset: f32,
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub pivot_correction: bool,
}

impl PartEntry {
    pub fn new(asset: impl Into<String>, category: PartCategory, height: f32) -> Self {
        Self {
            asset: asset.into(),
            category,
            height,
            offset: 0.0,
            rotation: [0.0; 3],
            pivot_correction: false,
        }
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_pivot_correction(mut self) -> Self {
        self.pivot_correction = true;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(HiltError::InvalidDimension {
                asset: self.asset.clone(),
                message: format!("height must be >= 0, got {}", self.height),
            });
        }
        if !self.offset.is_finite() {
            return Err(HiltError::InvalidDimension {
                asset: self.asset.clone(),
                message: "offset must be finite".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn to_spec(&self) -> PartSpec {
        PartSpec {
            asset_id: self.asset.clone(),
            category: self.category,
            height: self.height,
            vertical_offset: self.offset,
            corrective_rotation: self.rotation,
            needs_pivot_correction: self.pivot_correction,
            catalogued: true,
        }
    }
}

/// Fallback height per category for uncatalogued assets. Categories left out
/// of a `[defaults]` table keep their stock height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDefaults {
    pub pommel: f32,
    pub ring: f32,
    pub body: f32,
    pub emitter: f32,
    pub blade: f32,
}

impl CategoryDefaults {
    pub fn height(&self, category: PartCategory) -> f32 {
        match category {
            PartCategory::Pommel => self.pommel,
            PartCategory::Ring => self.ring,
            PartCategory::Body => self.body,
            PartCategory::Emitter => self.emitter,
            PartCategory::Blade => self.blade,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for category in PartCategory::ALL {
            let height = self.height(category);
            if !height.is_finite() || height < 0.0 {
                return Err(HiltError::InvalidDimension {
                    asset: format!("defaults.{}", category),
                    message: format!("height must be >= 0, got {}", height),
                });
            }
        }
        Ok(())
    }
}

impl Default for CategoryDefaults {
    fn default() -> Self {
        Self {
            pommel: 34.0,
            ring: 10.0,
            body: 180.0,
            emitter: 64.0,
            blade: 900.0,
        }
    }
}

/// Allowed total assembled height, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min_total: f32,
    pub max_total: f32,
}

impl SizeRange {
    pub fn contains(&self, total: f32) -> bool {
        total >= self.min_total && total <= self.max_total
    }
}

/// Size range entry as stored in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeRangeEntry {
    pub weapon: WeaponType,
    pub min_total: f32,
    pub max_total: f32,
}

/// TOML dimension table file format
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TableFile {
    #[serde(default)]
    pub defaults: Option<CategoryDefaults>,
    #[serde(default)]
    pub part: Vec<PartEntry>,
    #[serde(default)]
    pub size_range: Vec<SizeRangeEntry>,
}

/// TOML sidecar file format for a single part (`*.part.toml`)
#[derive(Debug, Deserialize)]
pub struct PartFile {
    pub part: PartEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_file_serde() {
        let toml_str = r#"
[part]
asset = "models/Polaris_Evo_Emitter_Fixed.glb"
category = "emitter"
height = 64
offset = -20
pivot_correction = true
"#;

        let file: PartFile = toml::from_str(toml_str).unwrap();
        assert_eq!(file.part.category, PartCategory::Emitter);
        assert_eq!(file.part.height, 64.0);
        assert_eq!(file.part.offset, -20.0);
        assert_eq!(file.part.rotation, [0.0; 3]);
        assert!(file.part.pivot_correction);
    }

    #[test]
    fn test_negative_height_rejected() {
        let entry = PartEntry::new("bad.glb", PartCategory::Body, -1.0);
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_slot_order_and_categories() {
        assert_eq!(Slot::ORDER[0], Slot::Pommel);
        assert_eq!(Slot::ORDER[5], Slot::Blade);
        assert_eq!(Slot::RingTop.category(), PartCategory::Ring);
        assert!(Slot::RingBottom.is_optional());
        assert!(!Slot::Body.is_optional());
    }

    #[test]
    fn test_slot_from_str() {
        assert_eq!("ringTop".parse::<Slot>().unwrap(), Slot::RingTop);
        assert_eq!("ring-bottom".parse::<Slot>().unwrap(), Slot::RingBottom);
        assert_eq!("ring_top".parse::<Slot>().unwrap(), Slot::RingTop);
        assert!("hilt".parse::<Slot>().is_err());
    }

    #[test]
    fn test_size_range_contains_bounds() {
        let range = SizeRange {
            min_total: 200.0,
            max_total: 300.0,
        };
        assert!(range.contains(200.0));
        assert!(range.contains(300.0));
        assert!(!range.contains(300.5));
    }
}
