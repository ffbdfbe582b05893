//! Catalog configuration files
//!
//! A catalog config is a JSON document naming the base layer and listing
//! every layer the session can use. It is read once at startup; the
//! registry built from it never changes afterwards.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MapstackError, Result};

/// Default rendering style for a layer.
///
/// Colors are RGBA bytes. Only advisory: the render engine owns the actual
/// styling pipeline, the catalog just carries the defaults along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Fill color, RGBA
    #[serde(default)]
    pub fill: Option<[u8; 4]>,
    /// Stroke color, RGBA
    #[serde(default)]
    pub stroke: Option<[u8; 4]>,
    /// Stroke width in pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
}

fn default_stroke_width() -> f32 {
    1.5
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: default_stroke_width(),
        }
    }
}

/// One layer entry in a catalog config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Unique layer name
    pub name: String,
    /// Minimum zoom below which the layer should not render
    #[serde(default)]
    pub min_zoom: Option<f64>,
    /// Default style
    #[serde(default)]
    pub style: LayerStyle,
    /// Attribution text shown by the map chrome
    #[serde(default)]
    pub attribution: Option<String>,
    /// Canned feature-info text; when present the demo CLI registers a
    /// static info source for this layer
    #[serde(default)]
    pub info: Option<String>,
}

impl LayerConfig {
    /// Create a bare layer entry with just a name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            min_zoom: None,
            style: LayerStyle::default(),
            attribution: None,
            info: None,
        }
    }
}

/// A full catalog description: the base layer plus every other layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Name of the permanent base layer; must appear in `layers`
    pub base: String,
    /// All layers in UI presentation order
    pub layers: Vec<LayerConfig>,
}

impl CatalogConfig {
    /// Load a catalog config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: CatalogConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a catalog config from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: CatalogConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the base layer is present in the layer list.
    pub fn validate(&self) -> Result<()> {
        if self.layers.iter().any(|l| l.name == self.base) {
            Ok(())
        } else {
            Err(MapstackError::NotFound {
                name: self.base.clone(),
            })
        }
    }

    /// Look up a layer entry by name.
    pub fn layer(&self, name: &str) -> Option<&LayerConfig> {
        self.layers.iter().find(|l| l.name == name)
    }
}
