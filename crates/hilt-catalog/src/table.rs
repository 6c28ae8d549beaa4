//! Dimension table lookups with category fallbacks

use crate::types::{
    CategoryDefaults, PartCategory, PartEntry, PartFile, PartSpec, SizeRange, TableFile,
};
use hilt_core::{HiltError, Result, WeaponType};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Mapping from asset identifier to authored dimensions
#[derive(Debug, Clone, Default)]
pub struct DimensionTable {
    entries: BTreeMap<String, PartEntry>,
    defaults: CategoryDefaults,
    size_ranges: HashMap<WeaponType, SizeRange>,
}

impl DimensionTable {
    /// Create an empty table with the stock category defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// The table for the stock asset set
    pub fn builtin() -> Self {
        let mut table = Self::new();
        let entries = [
            PartEntry::new("models/pommel_v2.glb", PartCategory::Pommel, 34.0)
                .with_rotation([180.0, 0.0, 0.0]),
            PartEntry::new("models/Polaris_Evo_Pommel_Fixed.glb", PartCategory::Pommel, 34.0)
                .with_rotation([180.0, 0.0, 0.0])
                .with_pivot_correction(),
            PartEntry::new("models/ring_v1.glb", PartCategory::Ring, 10.0),
            PartEntry::new("models/body_v2.glb", PartCategory::Body, 180.0),
            PartEntry::new("models/Polaris_Evo_Mini_Body_Fixed.glb", PartCategory::Body, 150.0)
                .with_pivot_correction(),
            PartEntry::new("models/Polaris_Evo_Emitter_Fixed.glb", PartCategory::Emitter, 64.0)
                .with_offset(-20.0)
                .with_pivot_correction(),
            PartEntry::new("models/emitter_v2.glb", PartCategory::Emitter, 64.0),
            PartEntry::new("models/blade_long_v1.glb", PartCategory::Blade, 900.0)
                .with_offset(-20.0),
            PartEntry::new("models/blade_short_v1.glb", PartCategory::Blade, 500.0)
                .with_offset(-20.0),
        ];
        for entry in entries {
            table.entries.insert(entry.asset.clone(), entry);
        }

        let stock_range = SizeRange {
            min_total: 200.0,
            max_total: 1300.0,
        };
        table.size_ranges.insert(WeaponType::Single, stock_range);
        table.size_ranges.insert(WeaponType::Dual, stock_range);
        table
    }

    /// Parse a table from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut table = Self::new();
        table.merge_toml_str(content)?;
        Ok(table)
    }

    /// Load a table file from disk
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Merge a TOML table over this one. Entries with the same asset id replace
    /// existing ones; defaults and size ranges replace when present.
    pub fn merge_toml_str(&mut self, content: &str) -> Result<()> {
        let file: TableFile = toml::from_str(content)?;
        if let Some(defaults) = file.defaults {
            defaults.validate()?;
            self.defaults = defaults;
        }
        for entry in file.part {
            self.register(entry)?;
        }
        for range in file.size_range {
            if range.min_total > range.max_total {
                return Err(HiltError::CatalogError(format!(
                    "size range for {} has min {} above max {}",
                    range.weapon, range.min_total, range.max_total
                )));
            }
            self.size_ranges.insert(
                range.weapon,
                SizeRange {
                    min_total: range.min_total,
                    max_total: range.max_total,
                },
            );
        }
        Ok(())
    }

    /// Merge every `*.part.toml` sidecar found in a directory tree
    pub fn merge_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let mut count = 0;
        Self::scan_directory(self, path.as_ref(), &mut count)?;
        Ok(count)
    }

    fn scan_directory(table: &mut DimensionTable, dir: &Path, count: &mut usize) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                Self::scan_directory(table, &path, count)?;
            } else if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with(".part.toml"))
                .unwrap_or(false)
            {
                let content = fs::read_to_string(&path)?;
                let file: PartFile = toml::from_str(&content).map_err(|e| {
                    HiltError::CatalogError(format!("Failed to parse {}: {}", path.display(), e))
                })?;
                table.register(file.part)?;
                *count += 1;
            }
        }

        Ok(())
    }

    /// Register or replace an entry
    pub fn register(&mut self, entry: PartEntry) -> Result<()> {
        entry.validate()?;
        log::debug!("catalog: registered {} ({})", entry.asset, entry.category);
        self.entries.insert(entry.asset.clone(), entry);
        Ok(())
    }

    /// Look up the dimensions of an asset.
    ///
    /// Unknown assets get the category default height, no offset, no rotation.
    /// This never fails, so a freshly added model always stacks somewhere
    /// sensible even before it is catalogued.
    pub fn lookup(&self, asset_id: &str, category: PartCategory) -> PartSpec {
        if let Some(entry) = self.entries.get(asset_id) {
            return entry.to_spec();
        }

        log::debug!(
            "catalog: {} not catalogued, using {} default height",
            asset_id,
            category
        );
        PartSpec {
            asset_id: asset_id.to_string(),
            category,
            height: self.defaults.height(category),
            vertical_offset: 0.0,
            corrective_rotation: [0.0; 3],
            needs_pivot_correction: false,
            catalogued: false,
        }
    }

    /// Whether an asset has an authored entry
    pub fn contains(&self, asset_id: &str) -> bool {
        self.entries.contains_key(asset_id)
    }

    /// Catalogued variants for a category, sorted by asset id
    pub fn variants(&self, category: PartCategory) -> Vec<&str> {
        self.entries
            .values()
            .filter(|e| e.category == category)
            .map(|e| e.asset.as_str())
            .collect()
    }

    pub fn defaults(&self) -> &CategoryDefaults {
        &self.defaults
    }

    /// Allowed total size for a weapon type, if one is authored
    pub fn size_range(&self, weapon: WeaponType) -> Option<SizeRange> {
        self.size_ranges.get(&weapon).copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = &PartEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hilt_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_lookup_known() {
        let table = DimensionTable::builtin();
        let spec = table.lookup("models/Polaris_Evo_Emitter_Fixed.glb", PartCategory::Emitter);
        assert_eq!(spec.height, 64.0);
        assert_eq!(spec.vertical_offset, -20.0);
        assert!(spec.needs_pivot_correction);
        assert!(spec.catalogued);
    }

    #[test]
    fn test_lookup_unknown_falls_back_to_category() {
        let table = DimensionTable::builtin();
        let spec = table.lookup("models/brand_new_body.glb", PartCategory::Body);
        assert_eq!(spec.height, 180.0);
        assert_eq!(spec.vertical_offset, 0.0);
        assert_eq!(spec.corrective_rotation, [0.0; 3]);
        assert!(!spec.needs_pivot_correction);
        assert!(!spec.catalogued);

        let ring = table.lookup("", PartCategory::Ring);
        assert_eq!(ring.height, 10.0);
    }

    #[test]
    fn test_pommels_are_flipped() {
        let table = DimensionTable::builtin();
        for id in table.variants(PartCategory::Pommel) {
            let spec = table.lookup(id, PartCategory::Pommel);
            assert_eq!(spec.corrective_rotation, [180.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_variants_by_category() {
        let table = DimensionTable::builtin();
        let blades = table.variants(PartCategory::Blade);
        assert_eq!(blades, vec!["models/blade_long_v1.glb", "models/blade_short_v1.glb"]);
        assert_eq!(table.variants(PartCategory::Ring).len(), 1);
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
[defaults]
pommel = 30
ring = 8
body = 200
emitter = 60
blade = 800

[[part]]
asset = "models/custom_body.glb"
category = "body"
height = 175
offset = 2.5

[[size_range]]
weapon = "single"
min_total = 250
max_total = 320
"#;
        let table = DimensionTable::from_toml_str(content).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("models/custom_body.glb", PartCategory::Body).height, 175.0);
        assert_eq!(table.lookup("unknown.glb", PartCategory::Ring).height, 8.0);
        let range = table.size_range(WeaponType::Single).unwrap();
        assert_eq!(range.max_total, 320.0);
        assert!(table.size_range(WeaponType::Dual).is_none());
    }

    #[test]
    fn test_merge_overrides_builtin_entry() {
        let mut table = DimensionTable::builtin();
        table
            .merge_toml_str(
                r#"
[[part]]
asset = "models/ring_v1.glb"
category = "ring"
height = 12
"#,
            )
            .unwrap();
        assert_eq!(table.lookup("models/ring_v1.glb", PartCategory::Ring).height, 12.0);
        assert!(table.contains("models/body_v2.glb"));
    }

    #[test]
    fn test_rejects_negative_height() {
        let result = DimensionTable::from_toml_str(
            r#"
[[part]]
asset = "bad.glb"
category = "body"
height = -5
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_default_height() {
        let mut table = DimensionTable::new();
        let result = table.merge_toml_str(
            r#"
[defaults]
pommel = -34
ring = 10
body = 180
emitter = 64
blade = 900
"#,
        );
        assert!(matches!(result, Err(HiltError::InvalidDimension { .. })));
        let spec = table.lookup("unknown.glb", PartCategory::Pommel);
        assert_eq!(spec.height, 34.0);
    }

    #[test]
    fn test_partial_defaults_keep_stock_heights() {
        let table = DimensionTable::from_toml_str(
            r#"
[defaults]
body = 150
"#,
        )
        .unwrap();
        assert_eq!(table.lookup("unknown.glb", PartCategory::Body).height, 150.0);
        assert_eq!(table.lookup("unknown.glb", PartCategory::Pommel).height, 34.0);
        assert_eq!(table.lookup("unknown.glb", PartCategory::Blade).height, 900.0);
    }

    #[test]
    fn test_rejects_inverted_size_range() {
        let result = DimensionTable::from_toml_str(
            r#"
[[size_range]]
weapon = "dual"
min_total = 400
max_total = 300
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_directory_sidecars() {
        let dir = temp_dir();
        fs::create_dir_all(dir.join("rings")).unwrap();
        fs::write(
            dir.join("rings").join("ring_v2.part.toml"),
            r#"
[part]
asset = "models/ring_v2.glb"
category = "ring"
height = 14
"#,
        )
        .unwrap();
        fs::write(dir.join("notes.toml"), "ignored = true").unwrap();

        let mut table = DimensionTable::builtin();
        let count = table.merge_directory(&dir).unwrap();
        assert_eq!(count, 1);
        assert_eq!(table.lookup("models/ring_v2.glb", PartCategory::Ring).height, 14.0);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_merge_missing_directory_is_noop() {
        let mut table = DimensionTable::new();
        let count = table.merge_directory("/definitely/not/here").unwrap();
        assert_eq!(count, 0);
    }
}
