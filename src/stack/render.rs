//! Render engine contract
//!
//! The controller drives the render engine exclusively through this trait.
//! `MemoryRenderStack` is a plain in-memory implementation used by tests
//! and the demo CLI; a real deployment adapts its tile/vector renderer to
//! the same surface.

use std::collections::HashMap;

use crate::catalog::RenderHandle;

/// Ordered, bottom-to-top layer stack owned by the render engine.
pub trait RenderStack {
    /// Insert a handle at a render index, shifting later entries up.
    fn insert_at(&mut self, index: usize, handle: RenderHandle);

    /// Remove the handle at a render index, shifting later entries down.
    fn remove_at(&mut self, index: usize) -> Option<RenderHandle>;

    /// Replace the handle at a render index in place.
    fn set_at(&mut self, index: usize, handle: RenderHandle);

    /// Current bottom-to-top handle order.
    fn ordered_handles(&self) -> Vec<RenderHandle>;

    /// Set a renderable's opacity, in [0, 1].
    fn set_opacity(&mut self, handle: RenderHandle, value: f32);
}

/// In-memory render stack for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryRenderStack {
    stack: Vec<RenderHandle>,
    opacities: HashMap<RenderHandle, f32>,
}

impl MemoryRenderStack {
    /// Create an empty render stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stacked handles
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Last opacity applied to a handle, if any
    pub fn opacity_of(&self, handle: RenderHandle) -> Option<f32> {
        self.opacities.get(&handle).copied()
    }
}

impl RenderStack for MemoryRenderStack {
    fn insert_at(&mut self, index: usize, handle: RenderHandle) {
        let index = index.min(self.stack.len());
        self.stack.insert(index, handle);
    }

    fn remove_at(&mut self, index: usize) -> Option<RenderHandle> {
        if index < self.stack.len() {
            Some(self.stack.remove(index))
        } else {
            None
        }
    }

    fn set_at(&mut self, index: usize, handle: RenderHandle) {
        if index < self.stack.len() {
            self.stack[index] = handle;
        } else {
            self.stack.push(handle);
        }
    }

    fn ordered_handles(&self) -> Vec<RenderHandle> {
        self.stack.clone()
    }

    fn set_opacity(&mut self, handle: RenderHandle, value: f32) {
        self.opacities.insert(handle, value);
    }
}
