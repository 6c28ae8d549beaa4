//! Rigid placement of whole instruments

use crate::layout::{compute_layout, Layout, PlacedSlot};
use glam::{Mat4, Quat, Vec3};
use hilt_catalog::{DimensionTable, Slot};
use hilt_config::AssemblyConfig;
use hilt_core::Orientation;
use std::f32::consts::FRAC_PI_2;

/// Lateral distance of each instrument from the centre when dual-wielded, mm
pub const DUAL_SPACING: f32 = 60.0;

/// One instrument's stack and its world transform
#[derive(Debug, Clone)]
pub struct InstrumentPlacement {
    pub index: usize,
    pub layout: Layout,
    pub rotation: Quat,
    pub translation: Vec3,
}

impl InstrumentPlacement {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// World transform of a placed part's origin
    pub fn part_transform(&self, placed: &PlacedSlot) -> Mat4 {
        self.transform() * placed.local_transform()
    }

    /// World position of a slot's stacked position
    pub fn world_position(&self, slot: Slot) -> Option<Vec3> {
        let local = self.layout.position(slot)?;
        Some(self.rotation * local + self.translation)
    }
}

/// Global rotation for an orientation: horizontal lays the stack along +X
pub fn orientation_rotation(orientation: Orientation) -> Quat {
    match orientation {
        Orientation::Vertical => Quat::IDENTITY,
        Orientation::Horizontal => Quat::from_rotation_z(-FRAC_PI_2),
    }
}

/// Sideways shift keeping two instruments apart.
///
/// Vertical stacks are separated along X (first instrument on -X), horizontal
/// stacks along Y (first instrument on +Y). A single instrument stays centred.
pub fn lateral_offset(orientation: Orientation, index: usize, count: usize) -> Vec3 {
    if count < 2 {
        return Vec3::ZERO;
    }
    let sign = if index == 0 { -1.0 } else { 1.0 };
    match orientation {
        Orientation::Vertical => Vec3::X * sign * DUAL_SPACING,
        Orientation::Horizontal => Vec3::Y * -sign * DUAL_SPACING,
    }
}

/// Lay out every active instrument and place it in the world
pub fn place_instruments(
    config: &AssemblyConfig,
    table: &DimensionTable,
) -> Vec<InstrumentPlacement> {
    let instruments = config.active_instruments();
    let count = instruments.len();
    let rotation = orientation_rotation(config.orientation);

    instruments
        .iter()
        .enumerate()
        .map(|(index, instrument)| InstrumentPlacement {
            index,
            layout: compute_layout(instrument, table),
            rotation,
            translation: lateral_offset(config.orientation, index, count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilt_config::Command;
    use hilt_core::WeaponType;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-3, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_single_vertical_is_identity() {
        let placements = place_instruments(&AssemblyConfig::default(), &DimensionTable::builtin());
        assert_eq!(placements.len(), 1);
        let p = &placements[0];
        assert_eq!(p.transform(), Mat4::IDENTITY);
        assert_eq!(p.world_position(Slot::Body), p.layout.position(Slot::Body));
    }

    #[test]
    fn test_horizontal_lays_stack_along_x() {
        let mut config = AssemblyConfig::default();
        config.orientation = Orientation::Horizontal;
        let placements = place_instruments(&config, &DimensionTable::builtin());
        let p = &placements[0];
        let local = p.layout.position(Slot::Body).unwrap();
        assert_vec_close(p.world_position(Slot::Body).unwrap(), Vec3::new(local.y, 0.0, 0.0));
    }

    #[test]
    fn test_dual_offsets() {
        let mut config = AssemblyConfig::default();
        config.apply(Command::SetWeaponType(WeaponType::Dual)).unwrap();
        let table = DimensionTable::builtin();

        let vertical = place_instruments(&config, &table);
        assert_eq!(vertical.len(), 2);
        assert_eq!(vertical[0].translation, Vec3::new(-60.0, 0.0, 0.0));
        assert_eq!(vertical[1].translation, Vec3::new(60.0, 0.0, 0.0));

        config.apply(Command::SetOrientation(Orientation::Horizontal)).unwrap();
        let horizontal = place_instruments(&config, &table);
        assert_eq!(horizontal[0].translation, Vec3::new(0.0, 60.0, 0.0));
        assert_eq!(horizontal[1].translation, Vec3::new(0.0, -60.0, 0.0));

        // Same stack, only the rigid transform differs
        assert_eq!(
            horizontal[0].layout.total_height(),
            vertical[0].layout.total_height()
        );
    }

    #[test]
    fn test_part_transform_composes_instrument_and_anchor() {
        let mut config = AssemblyConfig::default();
        config.apply(Command::SetWeaponType(WeaponType::Dual)).unwrap();
        let placements = place_instruments(&config, &DimensionTable::builtin());
        let p = &placements[1];
        let body = p.layout.get(Slot::Body).unwrap();
        let origin = p.part_transform(body).transform_point3(Vec3::ZERO);
        assert_vec_close(origin, Vec3::new(60.0, body.position.y, 0.0));
    }
}
