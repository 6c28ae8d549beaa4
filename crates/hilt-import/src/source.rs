//! Asset loading seam

use crate::gltf_import::import_gltf;
use crate::types::ImportedScene;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loading state of one asset
#[derive(Debug, Clone)]
pub enum AssetState {
    /// Loaded; the shared original must be cloned before modification
    Ready(Arc<ImportedScene>),
    /// Not available yet; ask again on a later pass
    Pending,
    /// The loader gave up on this asset
    Failed(String),
}

impl AssetState {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetState::Ready(_))
    }
}

/// Something that can turn an asset id into a scene graph
pub trait AssetSource {
    fn load(&mut self, asset_id: &str) -> AssetState;
}

/// Loads assets from files below a root directory, caching each original
pub struct FileAssetSource {
    root: PathBuf,
    cache: HashMap<String, AssetState>,
}

impl FileAssetSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cache: HashMap::new(),
        }
    }

    /// Path an asset id resolves to
    pub fn path_for(&self, asset_id: &str) -> PathBuf {
        self.root.join(asset_id)
    }

    /// Forget cached results so the next load re-reads from disk
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}

impl AssetSource for FileAssetSource {
    fn load(&mut self, asset_id: &str) -> AssetState {
        if let Some(state) = self.cache.get(asset_id) {
            return state.clone();
        }

        let path = self.path_for(asset_id);
        let state = match import_gltf(&path) {
            Ok(scene) => AssetState::Ready(Arc::new(scene)),
            Err(e) => {
                log::warn!("asset {} failed to load: {}", asset_id, e);
                AssetState::Failed(e.to_string())
            }
        };
        self.cache.insert(asset_id.to_string(), state.clone());
        state
    }
}

/// Serves pre-built scenes. Unknown ids are reported as pending.
#[derive(Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, AssetState>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset_id: impl Into<String>, scene: ImportedScene) {
        self.assets
            .insert(asset_id.into(), AssetState::Ready(Arc::new(scene)));
    }

    pub fn insert_failed(&mut self, asset_id: impl Into<String>, message: impl Into<String>) {
        self.assets
            .insert(asset_id.into(), AssetState::Failed(message.into()));
    }
}

impl AssetSource for MemoryAssetSource {
    fn load(&mut self, asset_id: &str) -> AssetState {
        self.assets
            .get(asset_id)
            .cloned()
            .unwrap_or(AssetState::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gltf_import::fixtures::TRIANGLE_GLTF;
    use std::fs;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hilt_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_memory_source_pending_for_unknown() {
        let mut source = MemoryAssetSource::new();
        source.insert("a.glb", ImportedScene::default());
        assert!(source.load("a.glb").is_ready());
        assert!(matches!(source.load("b.glb"), AssetState::Pending));
    }

    #[test]
    fn test_memory_source_shares_original() {
        let mut source = MemoryAssetSource::new();
        source.insert("a.glb", ImportedScene::default());
        let (AssetState::Ready(first), AssetState::Ready(second)) =
            (source.load("a.glb"), source.load("a.glb"))
        else {
            panic!("expected ready");
        };
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_file_source_loads_and_caches() {
        let dir = temp_dir();
        fs::create_dir_all(dir.join("models")).unwrap();
        fs::write(dir.join("models").join("body.gltf"), TRIANGLE_GLTF).unwrap();

        let mut source = FileAssetSource::new(&dir);
        let AssetState::Ready(first) = source.load("models/body.gltf") else {
            panic!("expected ready");
        };
        assert_eq!(first.name, "body");
        let AssetState::Ready(second) = source.load("models/body.gltf") else {
            panic!("expected ready");
        };
        assert!(Arc::ptr_eq(&first, &second));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_source_missing_is_failed() {
        let dir = temp_dir();
        let mut source = FileAssetSource::new(&dir);
        assert!(matches!(source.load("models/nope.glb"), AssetState::Failed(_)));
        fs::remove_dir_all(&dir).ok();
    }
}
