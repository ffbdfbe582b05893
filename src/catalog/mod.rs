//! Layer Catalog Module
//!
//! The immutable catalog of layers a map view can compose:
//! - Registry: name -> render handle, default style, minimum zoom
//! - Config: JSON catalog descriptions loaded at startup

mod config;
mod registry;

pub use config::{CatalogConfig, LayerConfig, LayerStyle};
pub use registry::{LayerEntry, LayerRegistry, RenderHandle};
