//! Item pictures available to rounds, grouped in named sets.
//!
//! On disk, a set is a folder under the sets directory and every image file in
//! it is an item named after its file stem:
//!
//! ```text
//! assets/sets/
//!   Set1/apple.png
//!   Set1/banana.png
//!   Set2/...
//!   sets.json      (optional)
//! ```
//!
//! The optional `sets.json` manifest selects and orders the sets to use:
//!
//! ```json
//! { "sets": ["Set1", "Set2", "Set5"] }
//! ```
//!
//! [`discover_sets`] only lists files. Loading the textures and measuring them
//! is the host's job (see [`crate::game::setup`]), which then fills an
//! [`ItemCatalog`] with [`ItemImage`]s.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use serde::Deserialize;

/// File extensions recognised as item pictures.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tga", "gif", "qoi"];

/// One picture the player can be asked to find.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemImage {
    pub name: String,
    /// Key in [`TextureStore`](crate::resources::texturestore::TextureStore).
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemSet {
    pub name: String,
    pub items: Vec<ItemImage>,
}

/// All loaded item sets, in load order.
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemCatalog {
    sets: Vec<ItemSet>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a set, replacing any set with the same name.
    pub fn insert_set(&mut self, name: impl Into<String>, items: Vec<ItemImage>) {
        let name = name.into();
        match self.sets.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.items = items,
            None => self.sets.push(ItemSet { name, items }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ItemSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    pub fn sets(&self) -> &[ItemSet] {
        &self.sets
    }

    /// Sets holding at least `min_items` items.
    pub fn eligible_sets(&self, min_items: usize) -> Vec<&ItemSet> {
        self.sets
            .iter()
            .filter(|s| s.items.len() >= min_items)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetsManifest {
    pub sets: Vec<String>,
}

impl SetsManifest {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid sets manifest: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read manifest {}: {}", path.display(), e))?;
        Self::from_json(&json)
    }
}

/// An item file found on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFile {
    pub name: String,
    pub path: PathBuf,
}

/// A set folder found on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SetFolder {
    pub name: String,
    pub items: Vec<ItemFile>,
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_items(folder: &Path) -> Result<Vec<ItemFile>, String> {
    let entries = std::fs::read_dir(folder)
        .map_err(|e| format!("Failed to read set folder {}: {}", folder.display(), e))?;
    let mut items: Vec<ItemFile> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_image(path))
        .filter_map(|path| {
            let name = path.file_stem()?.to_str()?.to_string();
            Some(ItemFile { name, path })
        })
        .collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(items)
}

/// List the set folders under `sets_dir`.
///
/// With a manifest, exactly the named sets are returned in manifest order and
/// a missing folder is an error. Without one, every sub-folder is a set,
/// sorted by name.
pub fn discover_sets(
    sets_dir: &Path,
    manifest: Option<&SetsManifest>,
) -> Result<Vec<SetFolder>, String> {
    if !sets_dir.is_dir() {
        return Err(format!("Sets directory not found: {}", sets_dir.display()));
    }

    let names: Vec<String> = match manifest {
        Some(manifest) => manifest.sets.clone(),
        None => {
            let entries = std::fs::read_dir(sets_dir).map_err(|e| {
                format!("Failed to read sets directory {}: {}", sets_dir.display(), e)
            })?;
            let mut names: Vec<String> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_dir())
                .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
                .collect();
            names.sort();
            names
        }
    };

    let mut folders = Vec::with_capacity(names.len());
    for name in names {
        let folder = sets_dir.join(&name);
        if !folder.is_dir() {
            return Err(format!("Set folder not found: {}", folder.display()));
        }
        let items = list_items(&folder)?;
        if items.is_empty() {
            warn!("Set '{}' has no images, skipping", name);
            continue;
        }
        info!("Found set '{}' with {} items", name, items.len());
        folders.push(SetFolder { name, items });
    }
    Ok(folders)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> ItemImage {
        ItemImage {
            name: name.to_string(),
            tex_key: format!("test/{}", name),
            width: 64.0,
            height: 64.0,
        }
    }

    /// Fresh scratch directory under the system temp dir.
    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "astarlearner-{}-{}-{}",
            tag,
            std::process::id(),
            fastrand::u64(..)
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(path: &Path) {
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_insert_and_replace_set() {
        let mut catalog = ItemCatalog::new();
        catalog.insert_set("Set1", vec![item("a")]);
        catalog.insert_set("Set2", vec![item("b")]);
        catalog.insert_set("Set1", vec![item("c"), item("d")]);
        assert_eq!(catalog.sets().len(), 2);
        assert_eq!(catalog.sets()[0].name, "Set1");
        assert_eq!(catalog.get("Set1").unwrap().items.len(), 2);
        assert!(catalog.get("Set3").is_none());
    }

    #[test]
    fn test_eligible_sets_filters_small_sets() {
        let mut catalog = ItemCatalog::new();
        catalog.insert_set("small", vec![item("a"), item("b")]);
        catalog.insert_set(
            "big",
            vec![item("a"), item("b"), item("c"), item("d")],
        );
        let eligible = catalog.eligible_sets(4);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].name, "big");
    }

    #[test]
    fn test_manifest_from_json() {
        let manifest = SetsManifest::from_json(r#"{ "sets": ["Set1", "Set6"] }"#).unwrap();
        assert_eq!(manifest.sets, vec!["Set1".to_string(), "Set6".to_string()]);
        assert!(SetsManifest::from_json("{ \"sets\": 3 }").is_err());
    }

    #[test]
    fn test_discover_sets_scans_folders() {
        let root = scratch_dir("scan");
        std::fs::create_dir_all(root.join("Set2")).unwrap();
        std::fs::create_dir_all(root.join("Set1")).unwrap();
        std::fs::create_dir_all(root.join("Empty")).unwrap();
        touch(&root.join("Set1").join("pear.png"));
        touch(&root.join("Set1").join("apple.PNG"));
        touch(&root.join("Set1").join("notes.txt"));
        touch(&root.join("Set2").join("cat.jpg"));

        let sets = discover_sets(&root, None).unwrap();
        let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Set1", "Set2"]);
        let items: Vec<&str> = sets[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(items, vec!["apple", "pear"]);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_discover_sets_follows_manifest_order() {
        let root = scratch_dir("manifest");
        for set in ["A", "B", "C"] {
            std::fs::create_dir_all(root.join(set)).unwrap();
            touch(&root.join(set).join("x.png"));
        }
        let manifest = SetsManifest {
            sets: vec!["C".to_string(), "A".to_string()],
        };
        let sets = discover_sets(&root, Some(&manifest)).unwrap();
        let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A"]);

        let missing = SetsManifest {
            sets: vec!["Nope".to_string()],
        };
        assert!(discover_sets(&root, Some(&missing)).is_err());

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_sets_dir_is_an_error() {
        let err = discover_sets(Path::new("/definitely/not/here"), None).unwrap_err();
        assert!(err.contains("not found"));
    }
}
