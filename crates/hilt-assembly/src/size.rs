//! Total size validation

use hilt_catalog::{DimensionTable, SizeRange, Slot};
use hilt_config::InstrumentConfig;
use hilt_core::WeaponType;
use serde::Serialize;

/// Outcome of a size check; advisory only
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeReport {
    /// Sum of the heights of every enabled slot
    pub total: f32,
    pub range: Option<SizeRange>,
    pub valid: bool,
}

/// Check an instrument's total height against the weapon type's range.
///
/// The blade counts when it is shown. Without an authored range every total
/// is valid.
pub fn validate_size(
    instrument: &InstrumentConfig,
    weapon_type: WeaponType,
    table: &DimensionTable,
) -> SizeReport {
    let total: f32 = Slot::ORDER
        .into_iter()
        .filter(|slot| instrument.is_enabled(*slot))
        .map(|slot| table.lookup(&instrument.slot(slot).model, slot.category()).height)
        .sum();

    let range = table.size_range(weapon_type);
    let valid = range.map_or(true, |r| r.contains(total));
    if !valid {
        log::debug!("total {} mm outside {:?} for {}", total, range, weapon_type);
    }

    SizeReport {
        total,
        range,
        valid,
    }
}
