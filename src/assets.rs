//! Asset manifest and bundle loading
//!
//! The manifest groups image aliases into named bundles. The background
//! ships with a single bundle, `background`, holding every layer texture.
//! A manifest can also be read from JSON with the same shape:
//!
//! ```json
//! { "bundles": [ { "name": "background", "assets": [ { "alias": "sky", "src": "sky.png" } ] } ] }
//! ```

use sdl2::image::LoadTexture;
use sdl2::render::{Texture, TextureCreator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the bundle holding every background texture
pub const BACKGROUND_BUNDLE: &str = "background";

/// Built-in (alias, file) pairs of the background bundle
const BACKGROUND_ASSETS: [(&str, &str); 7] = [
    ("sky", "sky.png"),
    ("clouds_background", "clouds_bg.png"),
    ("glacial_mountains", "glacial_mountains.png"),
    ("clouds_fore_3", "clouds_mg_3.png"),
    ("clouds_fore_2", "clouds_mg_2.png"),
    ("clouds_fore_1", "clouds_mg_1.png"),
    ("cloud_lonely", "cloud_lonely.png"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub alias: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleManifest {
    pub name: String,
    pub assets: Vec<AssetEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub bundles: Vec<BundleManifest>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        AssetManifest {
            bundles: vec![BundleManifest {
                name: BACKGROUND_BUNDLE.to_string(),
                assets: BACKGROUND_ASSETS
                    .iter()
                    .map(|(alias, src)| AssetEntry {
                        alias: alias.to_string(),
                        src: src.to_string(),
                    })
                    .collect(),
            }],
        }
    }
}

impl AssetManifest {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let content = std::fs::read_to_string(path)?;
        let manifest: AssetManifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn bundle(&self, name: &str) -> Result<&BundleManifest, AssetError> {
        self.bundles
            .iter()
            .find(|bundle| bundle.name == name)
            .ok_or_else(|| AssetError::UnknownBundle(name.to_string()))
    }

    /// Resolve every asset of a bundle to a path under `asset_dir`
    ///
    /// Fails on unknown bundles and on aliases declared twice.
    pub fn resolve(&self, name: &str, asset_dir: &Path) -> Result<Vec<(String, PathBuf)>, AssetError> {
        let bundle = self.bundle(name)?;
        let mut resolved: Vec<(String, PathBuf)> = Vec::with_capacity(bundle.assets.len());

        for entry in &bundle.assets {
            if resolved.iter().any(|(alias, _)| alias == &entry.alias) {
                return Err(AssetError::DuplicateAlias(entry.alias.clone()));
            }
            resolved.push((entry.alias.clone(), asset_dir.join(&entry.src)));
        }

        Ok(resolved)
    }
}

/// Lookup of texture dimensions by alias
///
/// Scene construction only needs sizes, so tests can hand it a plain map
/// instead of real textures.
pub trait TextureSource {
    fn texture_size(&self, alias: &str) -> Option<(u32, u32)>;

    fn require_size(&self, alias: &str) -> Result<(u32, u32), AssetError> {
        self.texture_size(alias)
            .ok_or_else(|| AssetError::MissingAlias(alias.to_string()))
    }
}

impl TextureSource for HashMap<String, (u32, u32)> {
    fn texture_size(&self, alias: &str) -> Option<(u32, u32)> {
        self.get(alias).copied()
    }
}

/// All textures of one bundle, keyed by alias
pub struct TextureBundle<'a> {
    pub name: String,
    textures: HashMap<String, Texture<'a>>,
}

impl<'a> TextureBundle<'a> {
    /// Load every texture of `name`
    ///
    /// The first texture that fails to load aborts the whole bundle.
    pub fn load<T>(
        texture_creator: &'a TextureCreator<T>,
        manifest: &AssetManifest,
        name: &str,
        asset_dir: &Path,
    ) -> Result<Self, AssetError> {
        let mut textures = HashMap::new();

        for (alias, path) in manifest.resolve(name, asset_dir)? {
            let texture = texture_creator
                .load_texture(&path)
                .map_err(|reason| AssetError::TextureLoad {
                    alias: alias.clone(),
                    path: path.clone(),
                    reason,
                })?;
            textures.insert(alias, texture);
        }

        Ok(TextureBundle {
            name: name.to_string(),
            textures,
        })
    }

    pub fn get(&self, alias: &str) -> Option<&Texture<'a>> {
        self.textures.get(alias)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }
}

impl TextureSource for TextureBundle<'_> {
    fn texture_size(&self, alias: &str) -> Option<(u32, u32)> {
        self.textures.get(alias).map(|texture| {
            let query = texture.query();
            (query.width, query.height)
        })
    }
}

/// Errors that can occur while declaring or loading assets
#[derive(Debug)]
pub enum AssetError {
    ManifestIo(std::io::Error),
    ManifestParse(serde_json::Error),
    UnknownBundle(String),
    DuplicateAlias(String),
    MissingAlias(String),
    EmptyTexture(String),
    TextureLoad {
        alias: String,
        path: PathBuf,
        reason: String,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssetError::ManifestIo(e) => write!(f, "Failed to read asset manifest: {}", e),
            AssetError::ManifestParse(e) => write!(f, "Invalid asset manifest: {}", e),
            AssetError::UnknownBundle(name) => write!(f, "Unknown asset bundle: {}", name),
            AssetError::DuplicateAlias(alias) => write!(f, "Asset alias declared twice: {}", alias),
            AssetError::MissingAlias(alias) => write!(f, "No texture loaded for alias: {}", alias),
            AssetError::EmptyTexture(alias) => write!(f, "Texture has zero size: {}", alias),
            AssetError::TextureLoad { alias, path, reason } => {
                write!(f, "Failed to load '{}' from {}: {}", alias, path.display(), reason)
            }
        }
    }
}

impl std::error::Error for AssetError {}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::ManifestIo(err)
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        AssetError::ManifestParse(err)
    }
}

impl From<AssetError> for String {
    fn from(error: AssetError) -> Self {
        error.to_string()
    }
}
