use super::presets;
use crate::core::models::material::Material;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// One `[[material]]` table of a library file.
///
/// A table either names a preset (optionally under a different material name) or spells
/// out the full parameter set.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LibraryEntry {
    Preset(PresetEntry),
    Custom(Material),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetEntry {
    preset: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LibraryFile {
    #[serde(default)]
    material: Vec<LibraryEntry>,
}

/// A named collection of materials, in the order they were declared.
///
/// Library files are TOML:
///
/// ```toml
/// [[material]]
/// preset = "germanium"
///
/// [[material]]
/// name = "Strained-Si"
/// d_data = { la_data = [-2.22e-7, 9.26e3, 0.0], max_freq_la = 7.6e13,
///            ta_data = [-2.28e-7, 5.24e3, 0.0], max_freq_ta = 3.0e13 }
/// r_data = { b_l = 1.3e-24, b_tn = 9.0e-13, b_tu = 1.9e-18, b_i = 0.0, w = 2.42e13 }
/// ```
#[derive(Debug, Default, Clone)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
    index: HashMap<String, usize>,
}

/// Represents errors that can occur while loading a material library.
#[derive(Debug, Error)]
pub enum MaterialLoadError {
    /// The library file could not be read from disk.
    #[error("File I/O error for '{path}': {source}")]
    Io {
        /// The path to the file that could not be read.
        path: String,
        source: std::io::Error,
    },
    /// The file is not valid TOML or a table does not describe a material.
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        /// The path to the file that could not be parsed.
        path: String,
        source: toml::de::Error,
    },
    /// A `preset` key names no known preset.
    #[error("Unknown material preset '{0}'")]
    UnknownPreset(String),
    /// Two tables produce materials with the same name.
    #[error("Material '{0}' is defined more than once")]
    Duplicate(String),
}

const INLINE_SOURCE: &str = "<inline>";

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding every built-in preset.
    pub fn with_presets() -> Self {
        let mut library = Self::new();
        for preset in presets::all() {
            library.push(preset.to_material());
        }
        library
    }

    pub fn load(path: &Path) -> Result<Self, MaterialLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| MaterialLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, MaterialLoadError> {
        Self::parse(content, INLINE_SOURCE)
    }

    fn parse(content: &str, origin: &str) -> Result<Self, MaterialLoadError> {
        let file: LibraryFile = toml::from_str(content).map_err(|e| MaterialLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;

        let mut library = Self::new();
        for entry in file.material {
            let material = match entry {
                LibraryEntry::Preset(PresetEntry { preset, name }) => {
                    let mut material = presets::preset(&preset)
                        .ok_or_else(|| MaterialLoadError::UnknownPreset(preset.clone()))?;
                    if let Some(name) = name {
                        material.name = name;
                    }
                    material
                }
                LibraryEntry::Custom(material) => material,
            };
            library.insert(material)?;
        }
        Ok(library)
    }

    /// Adds a material, rejecting names already present.
    pub fn insert(&mut self, material: Material) -> Result<(), MaterialLoadError> {
        if self.index.contains_key(&material.name) {
            return Err(MaterialLoadError::Duplicate(material.name));
        }
        self.push(material);
        Ok(())
    }

    fn push(&mut self, material: Material) {
        self.index.insert(material.name.clone(), self.materials.len());
        self.materials.push(material);
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.index.get(name).map(|&i| &self.materials[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn into_materials(self) -> Vec<Material> {
        self.materials
    }
}
