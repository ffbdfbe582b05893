//! Drag-and-drop to controller translation
//!
//! The drag layer reports which list an item left, which list it landed
//! in, and its old/new 0-based positions. The bridge reads indices
//! strictly from the event: when the event fires the in-memory lists have
//! not been mutated yet, the bridge is what drives the mutation.

use std::collections::HashMap;

use log::debug;

use crate::bridge::panel::{ControlPanel, UiControlHandle};
use crate::error::{MapstackError, Result};
use crate::stack::{render_index_of, StackController};

/// Which UI list a dragged item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragList {
    /// The active-layers list (top-to-bottom display order)
    Active,
    /// The inactive layer pool
    Pool,
}

/// A completed drag gesture as reported by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEvent {
    /// List the item was picked up from
    pub source: DragList,
    /// List the item was dropped into
    pub target: DragList,
    /// 0-based position within the source list before the drag
    pub old_index: usize,
    /// 0-based position within the target list after the drop
    pub new_index: usize,
}

/// Maps drag outcomes and toggle clicks onto controller operations.
pub struct ReorderBridge {
    panel: Box<dyn ControlPanel>,
    controls: HashMap<String, UiControlHandle>,
}

impl ReorderBridge {
    /// Create a bridge over a control panel collaborator.
    pub fn new(panel: Box<dyn ControlPanel>) -> Self {
        Self {
            panel,
            controls: HashMap::new(),
        }
    }

    /// Apply a completed drag gesture.
    ///
    /// The four outcomes:
    /// - active -> active: reorder within the active stack
    /// - pool -> pool: reorder the pool
    /// - pool -> active: activate; the drop position is advisory only,
    ///   the layer always lands on top
    /// - active -> pool: deactivate, identified by the pre-drag position
    pub fn handle_drag(&mut self, controller: &mut StackController, event: DragEvent) -> Result<()> {
        debug!("drag {:?} -> {:?} ({} -> {})", event.source, event.target, event.old_index, event.new_index);
        match (event.source, event.target) {
            (DragList::Active, DragList::Active) => {
                // 0-based UI rows to 1-based display positions.
                controller.move_active(event.old_index + 1, event.new_index + 1)
            }
            (DragList::Pool, DragList::Pool) => {
                controller.move_pool(event.old_index, event.new_index)
            }
            (DragList::Pool, DragList::Active) => {
                let snapshot = controller.snapshot();
                let name = snapshot.inactive.get(event.old_index).ok_or_else(|| {
                    MapstackError::OutOfRange {
                        index: event.old_index,
                        min: 0,
                        max: snapshot.inactive.len().saturating_sub(1),
                    }
                })?;
                let name = name.clone();
                self.activate(controller, &name)
            }
            (DragList::Active, DragList::Pool) => {
                let snapshot = controller.snapshot();
                let render_index = render_index_of(event.old_index + 1, snapshot.active.len())
                    .ok_or_else(|| MapstackError::OutOfRange {
                        index: event.old_index + 1,
                        min: 1,
                        max: snapshot.active.len().saturating_sub(1),
                    })?;
                let name = snapshot.active[render_index].clone();
                self.deactivate(controller, &name)
            }
        }
    }

    /// Toggle a layer between active and inactive, as the layer buttons do.
    pub fn toggle(&mut self, controller: &mut StackController, name: &str) -> Result<()> {
        if controller.is_active(name) {
            self.deactivate(controller, name)
        } else {
            self.activate(controller, name)
        }
    }

    /// Activate a layer and create its opacity affordance.
    pub fn activate(&mut self, controller: &mut StackController, name: &str) -> Result<()> {
        controller.activate(name)?;
        let handle = self.panel.create_opacity_control(name);
        self.controls.insert(name.to_string(), handle);
        Ok(())
    }

    /// Deactivate a layer and destroy its opacity affordance.
    pub fn deactivate(&mut self, controller: &mut StackController, name: &str) -> Result<()> {
        controller.deactivate(name)?;
        if let Some(handle) = self.controls.remove(name) {
            self.panel.destroy_opacity_control(handle);
        }
        Ok(())
    }

    /// Forward an opacity-slider change to the controller.
    pub fn set_opacity(&self, controller: &mut StackController, name: &str, value: f32) -> Result<()> {
        controller.set_opacity(name, value)
    }

    /// Check whether a layer currently has an opacity affordance.
    pub fn has_control(&self, name: &str) -> bool {
        self.controls.contains_key(name)
    }
}
