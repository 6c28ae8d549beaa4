//! Configuration record definitions

use hilt_catalog::Slot;
use hilt_core::{Finish, HexColor, Orientation, WeaponType};
use serde::{Deserialize, Serialize};

/// Current persisted format version
pub const CONFIG_VERSION: u32 = 2;

/// A color together with its finish.
///
/// Aluminium is always metal: constructors and every command keep that pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorFinish {
    pub color: HexColor,
    pub finish: Finish,
}

impl ColorFinish {
    pub fn new(color: HexColor, finish: Finish) -> Self {
        let finish = if color.is_aluminium() {
            Finish::Metal
        } else {
            finish
        };
        Self { color, finish }
    }

    /// The finish that actually renders
    pub fn effective_finish(&self) -> Finish {
        if self.color.is_aluminium() {
            Finish::Metal
        } else {
            self.finish
        }
    }
}

/// Choices bound to one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Asset id of the selected variant
    pub model: String,
    pub color: HexColor,
    /// Ignored for the blade
    pub finish: Finish,
}

impl SlotConfig {
    pub fn color_finish(&self) -> ColorFinish {
        ColorFinish::new(self.color.clone(), self.finish)
    }
}

/// One `SlotConfig` per slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSet {
    pub pommel: SlotConfig,
    pub ring_bottom: SlotConfig,
    pub body: SlotConfig,
    pub ring_top: SlotConfig,
    pub emitter: SlotConfig,
    pub blade: SlotConfig,
}

impl SlotSet {
    pub fn get(&self, slot: Slot) -> &SlotConfig {
        match slot {
            Slot::Pommel => &self.pommel,
            Slot::RingBottom => &self.ring_bottom,
            Slot::Body => &self.body,
            Slot::RingTop => &self.ring_top,
            Slot::Emitter => &self.emitter,
            Slot::Blade => &self.blade,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut SlotConfig {
        match slot {
            Slot::Pommel => &mut self.pommel,
            Slot::RingBottom => &mut self.ring_bottom,
            Slot::Body => &mut self.body,
            Slot::RingTop => &mut self.ring_top,
            Slot::Emitter => &mut self.emitter,
            Slot::Blade => &mut self.blade,
        }
    }

    /// Slots with their settings, base to tip
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &SlotConfig)> {
        Slot::ORDER.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

impl Default for SlotSet {
    fn default() -> Self {
        let slot = |slot: Slot| SlotConfig {
            model: default_model(slot).to_string(),
            color: default_color(slot),
            finish: Finish::Metal,
        };
        Self {
            pommel: slot(Slot::Pommel),
            ring_bottom: slot(Slot::RingBottom),
            body: slot(Slot::Body),
            ring_top: slot(Slot::RingTop),
            emitter: slot(Slot::Emitter),
            blade: slot(Slot::Blade),
        }
    }
}

/// Everything the user picked for one instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentConfig {
    pub show_ring_bottom: bool,
    pub show_ring_top: bool,
    pub show_blade: bool,
    /// Last color/finish applied to every slot at once
    pub global: ColorFinish,
    pub slots: SlotSet,
}

impl InstrumentConfig {
    /// Whether a slot takes part in the stack
    pub fn is_enabled(&self, slot: Slot) -> bool {
        match slot {
            Slot::RingBottom => self.show_ring_bottom,
            Slot::RingTop => self.show_ring_top,
            Slot::Blade => self.show_blade,
            Slot::Pommel | Slot::Body | Slot::Emitter => true,
        }
    }

    pub fn slot(&self, slot: Slot) -> &SlotConfig {
        self.slots.get(slot)
    }

    /// Mandatory slots are ignored; callers validate first
    pub(crate) fn set_enabled(&mut self, slot: Slot, visible: bool) {
        match slot {
            Slot::RingBottom => self.show_ring_bottom = visible,
            Slot::RingTop => self.show_ring_top = visible,
            Slot::Blade => self.show_blade = visible,
            Slot::Pommel | Slot::Body | Slot::Emitter => {}
        }
    }
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            show_ring_bottom: true,
            show_ring_top: true,
            show_blade: false,
            global: ColorFinish::new(lunar_mist(), Finish::Metal),
            slots: SlotSet::default(),
        }
    }
}

/// The full persisted configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyConfig {
    pub version: u32,
    pub weapon_type: WeaponType,
    pub orientation: Orientation,
    /// One entry per instrument; two when dual-wielded
    pub instruments: Vec<InstrumentConfig>,
}

impl AssemblyConfig {
    pub fn instrument(&self, index: usize) -> Option<&InstrumentConfig> {
        self.instruments.get(index)
    }

    /// Instruments that are rendered for the current weapon type
    pub fn active_instruments(&self) -> &[InstrumentConfig] {
        let count = self.weapon_type.instrument_count().min(self.instruments.len());
        &self.instruments[..count]
    }
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            weapon_type: WeaponType::Single,
            orientation: Orientation::Vertical,
            instruments: vec![InstrumentConfig::default()],
        }
    }
}

/// Stock asset for a slot
pub fn default_model(slot: Slot) -> &'static str {
    match slot {
        Slot::Pommel => "models/Polaris_Evo_Pommel_Fixed.glb",
        Slot::RingBottom | Slot::RingTop => "models/ring_v1.glb",
        Slot::Body => "models/Polaris_Evo_Mini_Body_Fixed.glb",
        Slot::Emitter => "models/Polaris_Evo_Emitter_Fixed.glb",
        Slot::Blade => "models/blade_long_v1.glb",
    }
}

pub(crate) fn default_color(slot: Slot) -> HexColor {
    let hex = match slot {
        Slot::Pommel | Slot::Body | Slot::Emitter => return lunar_mist(),
        Slot::RingBottom | Slot::RingTop => "#6b2624",
        Slot::Blade => "#aa0000",
    };
    HexColor::parse(hex).unwrap_or_else(|_| lunar_mist())
}

pub(crate) fn lunar_mist() -> HexColor {
    HexColor::parse("#c5c5c5").unwrap_or_else(|_| HexColor::aluminium())
}
