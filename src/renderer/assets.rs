//! Asset lookup for the render adapter
//!
//! The simulation only knows asset tags. Whatever draws the game resolves
//! them through an `AssetResolver`; `AssetManifest` is the JSON-backed one.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Manifest shipped with the game
const BUILTIN_MANIFEST: &str = include_str!("../../assets/manifest.json");

/// Errors resolving or loading assets
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image not found: {0}")]
    MissingImage(String),
    #[error("font not found: {0}")]
    MissingFont(String),
    #[error("image has zero size: {0}")]
    EmptyImage(String),
    #[error("failed to read asset manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid asset manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An image the backend can load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub path: String,
    /// Natural size in pixels (used for tiling)
    pub width: u32,
    pub height: u32,
}

/// A font the backend can load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontAsset {
    pub path: String,
}

/// Name-to-asset lookup injected into the render adapter
pub trait AssetResolver {
    fn image(&self, name: &str) -> Option<&ImageAsset>;
    fn font(&self, name: &str) -> Option<&FontAsset>;

    fn require_image(&self, name: &str) -> Result<&ImageAsset, AssetError> {
        self.image(name)
            .ok_or_else(|| AssetError::MissingImage(name.to_string()))
    }

    fn require_font(&self, name: &str) -> Result<&FontAsset, AssetError> {
        self.font(name)
            .ok_or_else(|| AssetError::MissingFont(name.to_string()))
    }
}

/// Asset names mapped to files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub images: BTreeMap<String, ImageAsset>,
    #[serde(default)]
    pub fonts: BTreeMap<String, FontAsset>,
}

impl AssetManifest {
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The manifest embedded in the binary
    pub fn builtin() -> Result<Self, AssetError> {
        Self::from_json(BUILTIN_MANIFEST)
    }

    pub fn load_from(path: &Path) -> Result<Self, AssetError> {
        let json = std::fs::read_to_string(path)?;
        let manifest = Self::from_json(&json)?;
        log::info!(
            "Loaded {} images and {} fonts from {}",
            manifest.images.len(),
            manifest.fonts.len(),
            path.display()
        );
        Ok(manifest)
    }
}

impl AssetResolver for AssetManifest {
    fn image(&self, name: &str) -> Option<&ImageAsset> {
        self.images.get(name)
    }

    fn font(&self, name: &str) -> Option<&FontAsset> {
        self.fonts.get(name)
    }
}
