//! Layer registry
//!
//! Holds the immutable catalog of layers known to the session. Entries are
//! created once at startup and never destroyed; the registry hands out
//! render handles but the render engine owns what they point at.

use std::collections::HashMap;

use crate::catalog::config::{CatalogConfig, LayerStyle};
use crate::error::{MapstackError, Result};

/// Opaque reference to a renderable layer owned by the render engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(u64);

impl RenderHandle {
    /// Raw handle id, for render-engine bookkeeping.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A single catalog entry.
#[derive(Debug, Clone)]
pub struct LayerEntry {
    /// Unique layer name
    pub name: String,
    /// Handle to the renderable owned by the render engine
    pub handle: RenderHandle,
    /// Default style
    pub style: LayerStyle,
    /// Minimum zoom below which the layer should not render
    pub min_zoom: Option<f64>,
    /// Attribution text
    pub attribution: Option<String>,
}

/// Registry of all layers available to the map view.
///
/// Iteration order of [`LayerRegistry::names`] is the registration order,
/// fixed at startup.
pub struct LayerRegistry {
    entries: HashMap<String, LayerEntry>,
    order: Vec<String>,
    next_handle: u64,
}

impl LayerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            next_handle: 0,
        }
    }

    /// Build a registry from a catalog config, registering layers in
    /// config order.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        config.validate()?;
        let mut registry = Self::new();
        for layer in &config.layers {
            registry.register(
                &layer.name,
                layer.style.clone(),
                layer.min_zoom,
                layer.attribution.clone(),
            );
        }
        Ok(registry)
    }

    /// Register a layer and allocate its render handle.
    ///
    /// Registering an existing name replaces the entry but keeps its
    /// original position in the iteration order.
    pub fn register(
        &mut self,
        name: &str,
        style: LayerStyle,
        min_zoom: Option<f64>,
        attribution: Option<String>,
    ) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;

        let entry = LayerEntry {
            name: name.to_string(),
            handle,
            style,
            min_zoom,
            attribution,
        };
        if self.entries.insert(name.to_string(), entry).is_none() {
            self.order.push(name.to_string());
        }
        handle
    }

    /// Get a layer entry by name
    pub fn get(&self, name: &str) -> Result<&LayerEntry> {
        self.entries.get(name).ok_or_else(|| MapstackError::NotFound {
            name: name.to_string(),
        })
    }

    /// Check if a layer is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All layer names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Number of registered layers
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
