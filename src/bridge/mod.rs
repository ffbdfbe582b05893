//! Reorder Bridge Module
//!
//! Translates UI drag-and-drop outcomes and toggle clicks into controller
//! operations, and owns the per-layer opacity-control affordances.

mod panel;
mod reorder;

pub use panel::{ControlPanel, NullControlPanel, UiControlHandle};
pub use reorder::{DragEvent, DragList, ReorderBridge};
