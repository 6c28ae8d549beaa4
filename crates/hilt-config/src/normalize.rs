//! Loosely typed configuration input, upgraded to the current format

use crate::format::{
    default_color, default_model, lunar_mist, AssemblyConfig, ColorFinish, InstrumentConfig,
    CONFIG_VERSION,
};
use hilt_catalog::Slot;
use hilt_core::{Finish, HexColor, Orientation, WeaponType};
use std::fmt::Display;
use std::str::FromStr;
use toml::{Table, Value};

/// Result of normalizing a record
#[derive(Debug, Clone)]
pub struct Normalized {
    pub config: AssemblyConfig,
    /// Paths of fields that were present but unusable and got their default
    pub fallbacks: Vec<String>,
}

impl Normalized {
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty()
    }
}

/// Turn any record into a valid configuration.
///
/// Records without `version` and `instruments` are treated as the legacy
/// single-instrument shape (flat `colors`, `finishes`, `showRingTop`, ...).
/// Each field falls back on its own; absent fields take their default
/// silently, malformed ones are logged and listed in `fallbacks`.
pub fn normalize_config(value: &Value) -> Normalized {
    let mut fields = FieldReader::default();
    let config = match value.as_table() {
        None => {
            fields.fallback("<root>", format!("is a {}", value.type_str()));
            AssemblyConfig::default()
        }
        Some(table) if is_legacy(table) => upgrade_legacy(table, &mut fields),
        Some(table) => read_current(table, &mut fields),
    };
    Normalized {
        config,
        fallbacks: fields.fallbacks,
    }
}

/// Convert a JSON value to TOML, dropping nulls (TOML has none)
pub fn json_to_toml(value: &serde_json::Value) -> Option<Value> {
    use serde_json::Value as Json;
    match value {
        Json::Null => None,
        Json::Bool(b) => Some(Value::Boolean(*b)),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Integer(i)),
            None => n.as_f64().map(Value::Float),
        },
        Json::String(s) => Some(Value::String(s.clone())),
        Json::Array(items) => Some(Value::Array(items.iter().filter_map(json_to_toml).collect())),
        Json::Object(map) => {
            let mut table = Table::new();
            for (key, item) in map {
                if let Some(converted) = json_to_toml(item) {
                    table.insert(key.clone(), converted);
                }
            }
            Some(Value::Table(table))
        }
    }
}

fn is_legacy(table: &Table) -> bool {
    match table.get("version").and_then(Value::as_integer) {
        Some(version) => version < 2,
        None => !table.contains_key("instruments"),
    }
}

#[derive(Default)]
struct FieldReader {
    fallbacks: Vec<String>,
}

impl FieldReader {
    fn fallback(&mut self, path: &str, reason: impl Display) {
        log::warn!("config field `{}` {}, using default", path, reason);
        self.fallbacks.push(path.to_string());
    }

    fn parsed<T: FromStr>(&mut self, value: Option<&Value>, path: &str, default: T) -> T {
        match value {
            None => default,
            Some(Value::String(s)) => match s.trim().parse() {
                Ok(parsed) => parsed,
                Err(_) => {
                    self.fallback(path, format!("has invalid value {:?}", s));
                    default
                }
            },
            Some(other) => {
                self.fallback(path, format!("is a {}", other.type_str()));
                default
            }
        }
    }

    /// Older records sometimes stored a color as a one-element list
    fn color(&mut self, value: Option<&Value>, path: &str, default: HexColor) -> HexColor {
        let value = match value {
            Some(Value::Array(items)) => items.first(),
            other => other,
        };
        self.parsed(value, path, default)
    }

    fn flag(&mut self, value: Option<&Value>, path: &str, default: bool) -> bool {
        match value {
            None => default,
            Some(Value::Boolean(b)) => *b,
            Some(other) => {
                self.fallback(path, format!("is a {}", other.type_str()));
                default
            }
        }
    }

    fn model(&mut self, value: Option<&Value>, path: &str, default: &str) -> String {
        match value {
            None => default.to_string(),
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(other) => {
                self.fallback(path, format!("is not a model id ({})", other));
                default.to_string()
            }
        }
    }

    fn table<'a>(&mut self, value: Option<&'a Value>, path: &str) -> Option<&'a Table> {
        match value {
            None => None,
            Some(Value::Table(table)) => Some(table),
            Some(other) => {
                self.fallback(path, format!("is a {}", other.type_str()));
                None
            }
        }
    }
}

fn read_current(table: &Table, fields: &mut FieldReader) -> AssemblyConfig {
    match table.get("version") {
        Some(Value::Integer(v)) if *v > CONFIG_VERSION as i64 => {
            log::warn!(
                "config version {} is newer than {}, reading what is known",
                v,
                CONFIG_VERSION
            );
        }
        Some(Value::Integer(_)) | None => {}
        Some(other) => fields.fallback("version", format!("is a {}", other.type_str())),
    }

    let weapon_type = fields.parsed(table.get("weaponType"), "weaponType", WeaponType::Single);
    let orientation = fields.parsed(
        table.get("orientation"),
        "orientation",
        Orientation::Vertical,
    );

    let count = weapon_type.instrument_count();
    let mut instruments = Vec::with_capacity(count);
    match table.get("instruments") {
        None => {}
        Some(Value::Array(items)) => {
            if items.len() > count {
                log::debug!("dropping {} surplus instrument(s)", items.len() - count);
            }
            for (i, item) in items.iter().take(count).enumerate() {
                let path = format!("instruments[{}]", i);
                let inst = match fields.table(Some(item), &path) {
                    Some(t) => read_instrument(t, &path, fields),
                    None => InstrumentConfig::default(),
                };
                instruments.push(inst);
            }
        }
        Some(other) => fields.fallback("instruments", format!("is a {}", other.type_str())),
    }
    instruments.resize_with(count, InstrumentConfig::default);

    AssemblyConfig {
        version: CONFIG_VERSION,
        weapon_type,
        orientation,
        instruments,
    }
}

fn read_instrument(table: &Table, path: &str, fields: &mut FieldReader) -> InstrumentConfig {
    let mut inst = InstrumentConfig::default();

    let global_path = format!("{}.global", path);
    if let Some(global) = fields.table(table.get("global"), &global_path) {
        let color = fields.color(
            global.get("color"),
            &format!("{}.color", global_path),
            lunar_mist(),
        );
        let finish = fields.parsed(
            global.get("finish"),
            &format!("{}.finish", global_path),
            Finish::Metal,
        );
        inst.global = ColorFinish::new(color, finish);
    }

    let slots_path = format!("{}.slots", path);
    let slots = fields.table(table.get("slots"), &slots_path);
    for slot in Slot::ORDER {
        let slot_path = format!("{}.{}", slots_path, slot.key());
        let Some(entry) = fields.table(slots.and_then(|s| s.get(slot.key())), &slot_path) else {
            continue;
        };
        let cfg = inst.slots.get_mut(slot);
        cfg.model = fields.model(
            entry.get("model"),
            &format!("{}.model", slot_path),
            default_model(slot),
        );
        cfg.color = fields.color(
            entry.get("color"),
            &format!("{}.color", slot_path),
            default_color(slot),
        );
        cfg.finish = fields.parsed(
            entry.get("finish"),
            &format!("{}.finish", slot_path),
            Finish::Metal,
        );
    }

    read_visibility(&mut inst, table, path, fields);
    pin_aluminium(&mut inst);
    inst
}

fn upgrade_legacy(table: &Table, fields: &mut FieldReader) -> AssemblyConfig {
    log::info!("upgrading legacy configuration record to version {}", CONFIG_VERSION);

    let weapon_type = fields.parsed(table.get("weaponType"), "weaponType", WeaponType::Single);
    let orientation = fields.parsed(
        table.get("orientation"),
        "orientation",
        Orientation::Vertical,
    );
    let colors = fields.table(table.get("colors"), "colors");
    let finishes = fields.table(table.get("finishes"), "finishes");
    let models = fields.table(table.get("models"), "models");

    let mut inst = InstrumentConfig::default();
    let global_color = fields.color(
        colors.and_then(|c| c.get("global")),
        "colors.global",
        lunar_mist(),
    );
    let global_finish = fields.parsed(
        finishes.and_then(|f| f.get("global")),
        "finishes.global",
        Finish::Metal,
    );
    // Slots without their own color were drawn in the record's global color
    let has_global = colors.is_some_and(|c| c.contains_key("global"));
    inst.global = ColorFinish::new(global_color.clone(), global_finish);

    for slot in Slot::ORDER {
        let key = slot.key();
        let model_key = format!("{}Model", key);
        let model = models
            .and_then(|m| m.get(key))
            .or_else(|| table.get(&model_key));

        let cfg = inst.slots.get_mut(slot);
        cfg.color = fields.color(
            colors.and_then(|c| c.get(key)),
            &format!("colors.{}", key),
            if has_global {
                global_color.clone()
            } else {
                default_color(slot)
            },
        );
        cfg.finish = fields.parsed(
            finishes.and_then(|f| f.get(key)),
            &format!("finishes.{}", key),
            Finish::Metal,
        );
        cfg.model = fields.model(model, &format!("models.{}", key), default_model(slot));
    }

    read_visibility(&mut inst, table, "", fields);
    pin_aluminium(&mut inst);

    let mut instruments = vec![inst];
    instruments.resize_with(weapon_type.instrument_count(), InstrumentConfig::default);

    AssemblyConfig {
        version: CONFIG_VERSION,
        weapon_type,
        orientation,
        instruments,
    }
}

fn read_visibility(
    inst: &mut InstrumentConfig,
    table: &Table,
    path: &str,
    fields: &mut FieldReader,
) {
    let field = |name: &str| {
        if path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", path, name)
        }
    };
    inst.show_ring_bottom =
        fields.flag(table.get("showRingBottom"), &field("showRingBottom"), true);
    inst.show_ring_top = fields.flag(table.get("showRingTop"), &field("showRingTop"), true);
    inst.show_blade = fields.flag(table.get("showBlade"), &field("showBlade"), false);
}

fn pin_aluminium(inst: &mut InstrumentConfig) {
    for slot in Slot::ORDER.into_iter().filter(|s| !s.is_blade()) {
        let cfg = inst.slots.get_mut(slot);
        cfg.finish = cfg.color_finish().finish;
    }
    inst.global = ColorFinish::new(inst.global.color.clone(), inst.global.finish);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Value {
        Value::Table(s.parse::<Table>().unwrap())
    }

    fn from_json(s: &str) -> Value {
        let json: serde_json::Value = serde_json::from_str(s).unwrap();
        json_to_toml(&json).unwrap()
    }

    #[test]
    fn test_legacy_record_upgrades() {
        let value = from_json(
            r##"{
                "showRingTop": false,
                "showRingBottom": true,
                "orientation": "horizontal",
                "colors": {
                    "global": "#2c3f83",
                    "emitter": ["#2C3F83"],
                    "ringTop": "#6b2624",
                    "body": "#eceae7",
                    "ringBottom": "#6b2624",
                    "pommel": "#272728"
                },
                "finishes": {
                    "global": "matte",
                    "emitter": "matte",
                    "body": "matte",
                    "pommel": null
                }
            }"##,
        );
        let normalized = normalize_config(&value);
        assert!(normalized.is_clean(), "{:?}", normalized.fallbacks);

        let config = normalized.config;
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.weapon_type, WeaponType::Single);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.instruments.len(), 1);

        let inst = &config.instruments[0];
        assert!(!inst.show_ring_top);
        assert!(inst.show_ring_bottom);
        assert!(!inst.show_blade);
        assert_eq!(inst.global.color.as_str(), "#2c3f83");
        assert_eq!(inst.global.finish, Finish::Matte);
        assert_eq!(inst.slots.emitter.color.as_str(), "#2c3f83");
        assert_eq!(inst.slots.emitter.finish, Finish::Matte);
        // Aluminium is pinned to metal even though the record says matte
        assert_eq!(inst.slots.body.finish, Finish::Metal);
        assert_eq!(inst.slots.pommel.finish, Finish::Metal);
        assert_eq!(inst.slots.blade.color.as_str(), "#2c3f83");
        assert_eq!(inst.slots.body.model, default_model(Slot::Body));
    }

    #[test]
    fn test_legacy_slots_without_color_use_global() {
        let value = from_json(r##"{ "colors": { "global": "#d4af37", "body": "#272728" } }"##);
        let normalized = normalize_config(&value);
        assert!(normalized.is_clean(), "{:?}", normalized.fallbacks);

        let inst = &normalized.config.instruments[0];
        assert_eq!(inst.slots.body.color.as_str(), "#272728");
        assert_eq!(inst.slots.pommel.color.as_str(), "#d4af37");
        assert_eq!(inst.slots.ring_top.color.as_str(), "#d4af37");
        assert_eq!(inst.slots.blade.color.as_str(), "#d4af37");
    }

    #[test]
    fn test_legacy_without_global_keeps_slot_defaults() {
        let config = normalize_config(&from_json(r#"{ "showBlade": true }"#)).config;
        let inst = &config.instruments[0];
        assert_eq!(inst.slots.blade.color, default_color(Slot::Blade));
        assert_eq!(inst.slots.ring_bottom.color, default_color(Slot::RingBottom));
    }

    #[test]
    fn test_legacy_model_keys() {
        let value = from_json(
            r#"{ "bladeModel": "models/blade_short_v1.glb", "models": { "pommel": "models/pommel_v2.glb" } }"#,
        );
        let config = normalize_config(&value).config;
        let inst = &config.instruments[0];
        assert_eq!(inst.slots.blade.model, "models/blade_short_v1.glb");
        assert_eq!(inst.slots.pommel.model, "models/pommel_v2.glb");
        assert_eq!(inst.slots.emitter.model, default_model(Slot::Emitter));
    }

    #[test]
    fn test_malformed_fields_fall_back_independently() {
        let value = from_json(
            r##"{
                "showRingTop": "yes",
                "orientation": "diagonal",
                "colors": { "body": "blue", "emitter": "#123456" },
                "finishes": "metal"
            }"##,
        );
        let normalized = normalize_config(&value);
        let inst = &normalized.config.instruments[0];
        assert_eq!(normalized.config.orientation, Orientation::Vertical);
        assert!(inst.show_ring_top);
        assert_eq!(inst.slots.body.color.as_str(), "#c5c5c5");
        assert_eq!(inst.slots.emitter.color.as_str(), "#123456");

        let mut fallbacks = normalized.fallbacks.clone();
        fallbacks.sort();
        assert_eq!(
            fallbacks,
            vec!["colors.body", "finishes", "orientation", "showRingTop"]
        );
    }

    #[test]
    fn test_unreadable_root_yields_defaults() {
        let normalized = normalize_config(&Value::String("garbage".to_string()));
        assert_eq!(normalized.config, AssemblyConfig::default());
        assert_eq!(normalized.fallbacks, vec!["<root>"]);
    }

    #[test]
    fn test_current_record_with_missing_fields() {
        let value = parse(
            r##"
version = 2
weaponType = "dual"

[[instruments]]
showBlade = true

[instruments.slots.body]
model = "models/body_v2.glb"
color = "#63A878"
finish = "matte"
"##,
        );
        let normalized = normalize_config(&value);
        assert!(normalized.is_clean(), "{:?}", normalized.fallbacks);

        let config = normalized.config;
        assert_eq!(config.weapon_type, WeaponType::Dual);
        assert_eq!(config.instruments.len(), 2);
        assert_eq!(config.instruments[1], InstrumentConfig::default());

        let inst = &config.instruments[0];
        assert!(inst.show_blade);
        assert!(inst.show_ring_top);
        assert_eq!(inst.slots.body.model, "models/body_v2.glb");
        assert_eq!(inst.slots.body.color.as_str(), "#63a878");
        assert_eq!(inst.slots.body.finish, Finish::Matte);
        assert_eq!(inst.slots.pommel, InstrumentConfig::default().slots.pommel);
    }

    #[test]
    fn test_surplus_instruments_dropped_for_single() {
        let value = parse(
            r#"
version = 2
weaponType = "single"

[[instruments]]
showRingTop = false

[[instruments]]
showRingTop = true
"#,
        );
        let config = normalize_config(&value).config;
        assert_eq!(config.instruments.len(), 1);
        assert!(!config.instruments[0].show_ring_top);
    }

    #[test]
    fn test_bad_instrument_entry_defaults() {
        let value = parse(
            r#"
version = 2
weaponType = "dual"
instruments = [ 3, { showBlade = true } ]
"#,
        );
        let normalized = normalize_config(&value);
        assert_eq!(normalized.fallbacks, vec!["instruments[0]"]);
        assert_eq!(normalized.config.instruments[0], InstrumentConfig::default());
        assert!(normalized.config.instruments[1].show_blade);
    }

    #[test]
    fn test_json_nulls_dropped() {
        let value = from_json(r#"{ "a": null, "b": [1, null, 2.5], "c": "x" }"#);
        let table = value.as_table().unwrap();
        assert!(!table.contains_key("a"));
        assert_eq!(
            table["b"],
            Value::Array(vec![Value::Integer(1), Value::Float(2.5)])
        );
        assert_eq!(table["c"].as_str(), Some("x"));
    }
}
