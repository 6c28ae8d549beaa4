//! Mutation commands issued by the UI

use crate::format::{AssemblyConfig, ColorFinish, InstrumentConfig};
use hilt_catalog::Slot;
use hilt_core::{Finish, HexColor, HiltError, Orientation, Result, WeaponType};

/// What a color or finish change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    /// Every slot of the instrument at once
    Global,
    Slot(Slot),
}

/// A discrete change to the configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetColor {
        instrument: usize,
        target: ColorTarget,
        color: HexColor,
    },
    SetFinish {
        instrument: usize,
        target: ColorTarget,
        finish: Finish,
    },
    SetVisibility {
        instrument: usize,
        slot: Slot,
        visible: bool,
    },
    ToggleVisibility {
        instrument: usize,
        slot: Slot,
    },
    SelectVariant {
        instrument: usize,
        slot: Slot,
        asset_id: String,
    },
    SetOrientation(Orientation),
    SetWeaponType(WeaponType),
    Reset,
}

impl AssemblyConfig {
    /// Apply a command. On error the configuration is left unchanged.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::SetColor {
                instrument,
                target,
                color,
            } => {
                let inst = self.instrument_mut(instrument)?;
                set_color(inst, target, color);
            }
            Command::SetFinish {
                instrument,
                target,
                finish,
            } => {
                if target == ColorTarget::Slot(Slot::Blade) {
                    return Err(HiltError::BladeFinish);
                }
                let inst = self.instrument_mut(instrument)?;
                set_finish(inst, target, finish);
            }
            Command::SetVisibility {
                instrument,
                slot,
                visible,
            } => {
                ensure_optional(slot)?;
                self.instrument_mut(instrument)?.set_enabled(slot, visible);
            }
            Command::ToggleVisibility { instrument, slot } => {
                ensure_optional(slot)?;
                let inst = self.instrument_mut(instrument)?;
                let visible = !inst.is_enabled(slot);
                inst.set_enabled(slot, visible);
            }
            Command::SelectVariant {
                instrument,
                slot,
                asset_id,
            } => {
                let asset_id = asset_id.trim();
                if asset_id.is_empty() {
                    return Err(HiltError::ConfigError(format!(
                        "empty model id for slot {}",
                        slot
                    )));
                }
                let asset_id = asset_id.to_string();
                self.instrument_mut(instrument)?.slots.get_mut(slot).model = asset_id;
            }
            Command::SetOrientation(orientation) => self.orientation = orientation,
            Command::SetWeaponType(weapon_type) => self.set_weapon_type(weapon_type),
            Command::Reset => *self = AssemblyConfig::default(),
        }
        Ok(())
    }

    fn instrument_mut(&mut self, index: usize) -> Result<&mut InstrumentConfig> {
        let count = self.active_instruments().len();
        if index >= count {
            return Err(HiltError::InstrumentOutOfRange { index, count });
        }
        Ok(&mut self.instruments[index])
    }

    fn set_weapon_type(&mut self, weapon_type: WeaponType) {
        if weapon_type == self.weapon_type {
            return;
        }
        self.instruments.truncate(1);
        if self.instruments.is_empty() {
            self.instruments.push(InstrumentConfig::default());
        }
        // The second instrument always starts from stock settings, never
        // from a copy of the first.
        while self.instruments.len() < weapon_type.instrument_count() {
            self.instruments.push(InstrumentConfig::default());
        }
        self.weapon_type = weapon_type;
        log::debug!("weapon type set to {}", weapon_type);
    }
}

fn ensure_optional(slot: Slot) -> Result<()> {
    if slot.is_optional() {
        Ok(())
    } else {
        Err(HiltError::MandatorySlot(slot.to_string()))
    }
}

fn set_color(inst: &mut InstrumentConfig, target: ColorTarget, color: HexColor) {
    let aluminium = color.is_aluminium();
    match target {
        ColorTarget::Global => {
            for slot in Slot::ORDER {
                let cfg = inst.slots.get_mut(slot);
                cfg.color = color.clone();
                if aluminium && !slot.is_blade() {
                    cfg.finish = Finish::Metal;
                }
            }
            inst.global = ColorFinish::new(color, inst.global.finish);
        }
        ColorTarget::Slot(slot) => {
            let cfg = inst.slots.get_mut(slot);
            cfg.color = color;
            if aluminium && !slot.is_blade() {
                cfg.finish = Finish::Metal;
            }
        }
    }
}

fn set_finish(inst: &mut InstrumentConfig, target: ColorTarget, finish: Finish) {
    let pinned = |color: &HexColor| {
        if color.is_aluminium() {
            Finish::Metal
        } else {
            finish
        }
    };
    match target {
        ColorTarget::Global => {
            for slot in Slot::ORDER.into_iter().filter(|s| !s.is_blade()) {
                let cfg = inst.slots.get_mut(slot);
                cfg.finish = pinned(&cfg.color);
            }
            inst.global.finish = pinned(&inst.global.color);
        }
        ColorTarget::Slot(slot) => {
            let cfg = inst.slots.get_mut(slot);
            cfg.finish = pinned(&cfg.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    #[test]
    fn test_global_color_propagates_to_every_slot() {
        let mut config = AssemblyConfig::default();
        config
            .apply(Command::SetColor {
                instrument: 0,
                target: ColorTarget::Global,
                color: hex("#2c3f83"),
            })
            .unwrap();
        let inst = &config.instruments[0];
        for (_, slot) in inst.slots.iter() {
            assert_eq!(slot.color.as_str(), "#2c3f83");
        }
        assert_eq!(inst.global.color.as_str(), "#2c3f83");
    }

    #[test]
    fn test_global_aluminium_forces_metal_except_blade() {
        let mut config = AssemblyConfig::default();
        config
            .apply(Command::SetFinish {
                instrument: 0,
                target: ColorTarget::Global,
                finish: Finish::Matte,
            })
            .unwrap();
        config.instruments[0].slots.blade.finish = Finish::Matte;

        config
            .apply(Command::SetColor {
                instrument: 0,
                target: ColorTarget::Global,
                color: HexColor::aluminium(),
            })
            .unwrap();

        let inst = &config.instruments[0];
        for (slot, cfg) in inst.slots.iter() {
            assert!(cfg.color.is_aluminium());
            if slot.is_blade() {
                assert_eq!(cfg.finish, Finish::Matte, "blade finish must be untouched");
            } else {
                assert_eq!(cfg.finish, Finish::Metal, "{} should be metal", slot);
            }
        }
        assert_eq!(inst.global.finish, Finish::Metal);
    }

    #[test]
    fn test_matte_has_no_effect_on_aluminium_slot() {
        let mut config = AssemblyConfig::default();
        config
            .apply(Command::SetColor {
                instrument: 0,
                target: ColorTarget::Slot(Slot::Body),
                color: hex("#ECEAE7"),
            })
            .unwrap();
        config
            .apply(Command::SetFinish {
                instrument: 0,
                target: ColorTarget::Slot(Slot::Body),
                finish: Finish::Matte,
            })
            .unwrap();
        assert_eq!(config.instruments[0].slots.body.finish, Finish::Metal);
    }

    #[test]
    fn test_global_finish_skips_blade_and_aluminium() {
        let mut config = AssemblyConfig::default();
        config.instruments[0].slots.emitter.color = HexColor::aluminium();
        config
            .apply(Command::SetFinish {
                instrument: 0,
                target: ColorTarget::Global,
                finish: Finish::Matte,
            })
            .unwrap();
        let inst = &config.instruments[0];
        assert_eq!(inst.slots.body.finish, Finish::Matte);
        assert_eq!(inst.slots.emitter.finish, Finish::Metal);
        assert_eq!(inst.slots.blade.finish, Finish::Metal);
        assert_eq!(inst.global.finish, Finish::Matte);
    }

    #[test]
    fn test_blade_finish_rejected() {
        let mut config = AssemblyConfig::default();
        let before = config.clone();
        let result = config.apply(Command::SetFinish {
            instrument: 0,
            target: ColorTarget::Slot(Slot::Blade),
            finish: Finish::Matte,
        });
        assert!(matches!(result, Err(HiltError::BladeFinish)));
        assert_eq!(config, before);
    }

    #[test]
    fn test_mandatory_slot_cannot_be_hidden() {
        let mut config = AssemblyConfig::default();
        let before = config.clone();
        let result = config.apply(Command::SetVisibility {
            instrument: 0,
            slot: Slot::Body,
            visible: false,
        });
        assert!(matches!(result, Err(HiltError::MandatorySlot(_))));
        assert_eq!(config, before);
    }

    #[test]
    fn test_toggle_visibility() {
        let mut config = AssemblyConfig::default();
        config
            .apply(Command::ToggleVisibility {
                instrument: 0,
                slot: Slot::RingTop,
            })
            .unwrap();
        assert!(!config.instruments[0].show_ring_top);
        config
            .apply(Command::ToggleVisibility {
                instrument: 0,
                slot: Slot::RingTop,
            })
            .unwrap();
        assert!(config.instruments[0].show_ring_top);
    }

    #[test]
    fn test_select_variant() {
        let mut config = AssemblyConfig::default();
        config
            .apply(Command::SelectVariant {
                instrument: 0,
                slot: Slot::Blade,
                asset_id: "models/blade_short_v1.glb".to_string(),
            })
            .unwrap();
        assert_eq!(config.instruments[0].slots.blade.model, "models/blade_short_v1.glb");

        let result = config.apply(Command::SelectVariant {
            instrument: 0,
            slot: Slot::Blade,
            asset_id: "  ".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_switch_to_dual_initializes_pristine_second_instrument() {
        let mut config = AssemblyConfig::default();
        config
            .apply(Command::SetColor {
                instrument: 0,
                target: ColorTarget::Global,
                color: hex("#5a2958"),
            })
            .unwrap();
        config
            .apply(Command::SetVisibility {
                instrument: 0,
                slot: Slot::Blade,
                visible: true,
            })
            .unwrap();

        config.apply(Command::SetWeaponType(WeaponType::Dual)).unwrap();
        assert_eq!(config.instruments.len(), 2);
        assert_eq!(config.instruments[1], InstrumentConfig::default());
        assert_eq!(config.instruments[0].slots.body.color.as_str(), "#5a2958");
    }

    #[test]
    fn test_switch_back_to_single_drops_second_instrument() {
        let mut config = AssemblyConfig::default();
        config.apply(Command::SetWeaponType(WeaponType::Dual)).unwrap();
        config
            .apply(Command::SetColor {
                instrument: 1,
                target: ColorTarget::Slot(Slot::Body),
                color: hex("#457954"),
            })
            .unwrap();
        config.apply(Command::SetWeaponType(WeaponType::Single)).unwrap();
        assert_eq!(config.instruments.len(), 1);

        config.apply(Command::SetWeaponType(WeaponType::Dual)).unwrap();
        assert_eq!(config.instruments[1], InstrumentConfig::default());
    }

    #[test]
    fn test_second_instrument_out_of_range_when_single() {
        let mut config = AssemblyConfig::default();
        let result = config.apply(Command::SetOrientation(Orientation::Horizontal));
        assert!(result.is_ok());
        let result = config.apply(Command::SetColor {
            instrument: 1,
            target: ColorTarget::Global,
            color: hex("#272728"),
        });
        assert!(matches!(
            result,
            Err(HiltError::InstrumentOutOfRange { index: 1, count: 1 })
        ));
    }

    #[test]
    fn test_reset() {
        let mut config = AssemblyConfig::default();
        config.apply(Command::SetWeaponType(WeaponType::Dual)).unwrap();
        config.apply(Command::SetOrientation(Orientation::Horizontal)).unwrap();
        config.apply(Command::Reset).unwrap();
        assert_eq!(config, AssemblyConfig::default());
    }
}
