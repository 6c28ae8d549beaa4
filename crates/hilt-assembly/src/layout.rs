//! Vertical stacking of slots

use glam::{Mat4, Quat, Vec3};
use hilt_catalog::{DimensionTable, PartSpec, Slot};
use hilt_config::InstrumentConfig;
use hilt_core::euler_deg_to_quat;
use serde::Serialize;

/// A slot that takes part in the stack
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSlot {
    pub slot: Slot,
    pub spec: PartSpec,
    /// Stacked position: `x` and `z` are always 0
    pub position: Vec3,
}

impl PlacedSlot {
    /// Corrective rotation about the part origin
    pub fn rotation(&self) -> Quat {
        euler_deg_to_quat(self.spec.corrective_rotation)
    }

    /// Where the part origin goes so that the rotated part still occupies
    /// `[y, y + height]`.
    ///
    /// A pommel flipped 180° about X hangs below its origin, so its anchor is
    /// lifted by its height.
    pub fn anchor(&self) -> Vec3 {
        let top = self.rotation() * Vec3::new(0.0, self.spec.height, 0.0);
        let lowest = top.y.min(0.0);
        self.position - Vec3::Y * lowest
    }

    /// Part transform inside the instrument frame
    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.anchor())
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.spec.height
    }
}

/// Stacked positions for one instrument, base to tip
#[derive(Debug, Clone, Default)]
pub struct Layout {
    placed: Vec<PlacedSlot>,
    total_height: f32,
    hilt_height: f32,
}

impl Layout {
    /// Placed slots in stacking order
    pub fn placed(&self) -> &[PlacedSlot] {
        &self.placed
    }

    pub fn get(&self, slot: Slot) -> Option<&PlacedSlot> {
        self.placed.iter().find(|p| p.slot == slot)
    }

    /// Stacked position of a slot; `None` when the slot is switched off
    pub fn position(&self, slot: Slot) -> Option<Vec3> {
        self.get(slot).map(|p| p.position)
    }

    /// Final cursor, blade included when shown
    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    /// Cursor before the blade
    pub fn hilt_height(&self) -> f32 {
        self.hilt_height
    }
}

/// Per-slot position entry in machine-readable output
#[derive(Debug, Clone, Serialize)]
pub struct LayoutEntry {
    pub slot: Slot,
    pub asset: String,
    pub y: f32,
    pub height: f32,
    pub offset: f32,
    pub anchor: [f32; 3],
}

impl Layout {
    pub fn entries(&self) -> Vec<LayoutEntry> {
        self.placed
            .iter()
            .map(|p| LayoutEntry {
                slot: p.slot,
                asset: p.spec.asset_id.clone(),
                y: p.position.y,
                height: p.spec.height,
                offset: p.spec.vertical_offset,
                anchor: p.anchor().to_array(),
            })
            .collect()
    }
}

/// Stack the enabled slots of an instrument.
///
/// The cursor starts at 0. Each enabled slot is placed at `cursor + offset`
/// and then advances the cursor by its height; a disabled optional slot leaves
/// the cursor where it is.
pub fn compute_layout(instrument: &InstrumentConfig, table: &DimensionTable) -> Layout {
    let mut layout = Layout::default();
    let mut cursor = 0.0_f32;

    for slot in Slot::ORDER {
        if !instrument.is_enabled(slot) {
            continue;
        }
        if slot.is_blade() {
            layout.hilt_height = cursor;
        }

        let spec = table.lookup(&instrument.slot(slot).model, slot.category());
        let position = Vec3::new(0.0, cursor + spec.vertical_offset, 0.0);
        cursor += spec.height;
        layout.placed.push(PlacedSlot {
            slot,
            spec,
            position,
        });
    }

    if !instrument.is_enabled(Slot::Blade) {
        layout.hilt_height = cursor;
    }
    layout.total_height = cursor;
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilt_catalog::{PartCategory, PartEntry};

    fn stock_sized() -> InstrumentConfig {
        let mut inst = InstrumentConfig::default();
        inst.slots.pommel.model = "test/pommel.glb".to_string();
        inst.slots.ring_bottom.model = "test/ring.glb".to_string();
        inst.slots.body.model = "test/body.glb".to_string();
        inst.slots.ring_top.model = "test/ring.glb".to_string();
        inst.slots.emitter.model = "test/emitter.glb".to_string();
        inst.slots.blade.model = "test/blade.glb".to_string();
        inst
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{} != {}", a, b);
    }

    #[test]
    fn test_rings_off_scenario() {
        // Uncatalogued ids fall back to 34 / 10 / 180 / 64
        let mut inst = stock_sized();
        inst.show_ring_bottom = false;
        inst.show_ring_top = false;

        let layout = compute_layout(&inst, &DimensionTable::new());
        assert_eq!(layout.position(Slot::Pommel), Some(Vec3::ZERO));
        assert_eq!(layout.position(Slot::RingBottom), None);
        assert_eq!(layout.position(Slot::Body).unwrap().y, 34.0);
        assert_eq!(layout.position(Slot::RingTop), None);
        assert_eq!(layout.position(Slot::Emitter).unwrap().y, 214.0);
        assert_eq!(layout.hilt_height(), 278.0);
        assert_eq!(layout.total_height(), 278.0);
    }

    #[test]
    fn test_emitter_offset_applied_to_position_only() {
        let mut table = DimensionTable::new();
        table
            .register(
                PartEntry::new("test/emitter.glb", PartCategory::Emitter, 64.0).with_offset(-20.0),
            )
            .unwrap();
        let mut inst = stock_sized();
        inst.show_ring_top = false;

        let layout = compute_layout(&inst, &table);
        // pommel 34 + ring 10 + body 180 = 224
        assert_eq!(layout.position(Slot::Emitter).unwrap().y, 224.0 - 20.0);
        assert_eq!(layout.hilt_height(), 288.0);
    }

    #[test]
    fn test_all_enabled_no_gaps() {
        let mut inst = InstrumentConfig::default();
        inst.show_blade = true;
        let layout = compute_layout(&inst, &DimensionTable::builtin());
        let placed = layout.placed();
        assert_eq!(placed.len(), 6);

        for pair in placed.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let gap = b.position.y - a.position.y - b.spec.vertical_offset + a.spec.vertical_offset;
            assert_close(gap, a.spec.height);
        }
        assert_close(layout.hilt_height(), 34.0 + 10.0 + 150.0 + 10.0 + 64.0);
        assert_close(layout.total_height(), layout.hilt_height() + 900.0);
    }

    #[test]
    fn test_zero_offsets_strictly_increasing() {
        let mut inst = stock_sized();
        inst.show_blade = true;
        let layout = compute_layout(&inst, &DimensionTable::new());
        let ys: Vec<f32> = layout.placed().iter().map(|p| p.position.y).collect();
        assert_eq!(ys, vec![0.0, 34.0, 44.0, 224.0, 234.0, 298.0]);
        assert_eq!(layout.total_height(), 1198.0);
    }

    #[test]
    fn test_disabled_slot_equals_zero_height() {
        let table = DimensionTable::builtin();
        let mut without = InstrumentConfig::default();
        without.show_ring_bottom = false;
        let mut zero_height = InstrumentConfig::default();
        zero_height.slots.ring_bottom.model = "test/flat_ring.glb".to_string();

        let mut table_zero = table.clone();
        table_zero
            .register(PartEntry::new("test/flat_ring.glb", PartCategory::Ring, 0.0))
            .unwrap();

        let a = compute_layout(&without, &table);
        let b = compute_layout(&zero_height, &table_zero);
        for slot in [Slot::Body, Slot::RingTop, Slot::Emitter] {
            assert_eq!(a.position(slot), b.position(slot));
        }
        assert_eq!(a.total_height(), b.total_height());
    }

    #[test]
    fn test_flipped_pommel_anchor() {
        let layout = compute_layout(&InstrumentConfig::default(), &DimensionTable::builtin());
        let pommel = layout.get(Slot::Pommel).unwrap();
        let anchor = pommel.anchor();
        assert_close(anchor.y, 34.0);

        // The flipped span still covers [0, 34]
        let tip = pommel.local_transform().transform_point3(Vec3::new(0.0, 34.0, 0.0));
        assert_close(tip.y, 0.0);

        let body = layout.get(Slot::Body).unwrap();
        assert_eq!(body.anchor(), body.position);
    }

    #[test]
    fn test_entries_follow_order() {
        let layout = compute_layout(&InstrumentConfig::default(), &DimensionTable::builtin());
        let slots: Vec<Slot> = layout.entries().iter().map(|e| e.slot).collect();
        assert_eq!(
            slots,
            vec![Slot::Pommel, Slot::RingBottom, Slot::Body, Slot::RingTop, Slot::Emitter]
        );
    }
}
