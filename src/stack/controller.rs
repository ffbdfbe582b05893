//! Layer stack controller
//!
//! Owns the only mutable layer-stack state in the system: the ordered
//! active list (bottom-to-top, base layer at render index 0), the inactive
//! pool, and per-layer opacity. Every mutation goes through a controller
//! operation; collaborators only ever see read-only snapshots.
//!
//! Invariants:
//! - the active list and the render engine's stack hold the same layers
//!   in the same order at all times
//! - active and pool are disjoint; their union is the catalog minus the
//!   current base layer
//! - the base layer is always present at render index 0

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::catalog::{LayerRegistry, RenderHandle};
use crate::error::{MapstackError, Result};
use crate::stack::index::render_index_of;
use crate::stack::render::RenderStack;

/// Read-only copy of the controller's lists, used to render button lists
/// and as the consistent view for the bridge and the query aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackSnapshot {
    /// Active layers, bottom-to-top; index 0 is the base layer
    pub active: Vec<String>,
    /// Inactive layers in pool order
    pub inactive: Vec<String>,
}

impl StackSnapshot {
    /// Name of the base layer
    pub fn base(&self) -> &str {
        &self.active[0]
    }

    /// Active layers in top-to-bottom order, the order the UI lists them
    /// and the order point queries are answered in.
    pub fn top_to_bottom(&self) -> impl Iterator<Item = &str> {
        self.active.iter().rev().map(|s| s.as_str())
    }
}

/// Controller for active/inactive layer membership, stacking order and
/// opacity.
pub struct StackController {
    registry: Arc<LayerRegistry>,
    render: Box<dyn RenderStack>,
    /// Bottom-to-top; `active[0]` is the base layer
    active: Vec<String>,
    /// Pool order is UI-cosmetic only
    inactive: Vec<String>,
    opacities: HashMap<String, f32>,
}

impl StackController {
    /// Create a controller over a catalog, inserting the base layer at
    /// render index 0 and pooling every other layer in catalog order.
    pub fn new(
        registry: Arc<LayerRegistry>,
        base: &str,
        mut render: Box<dyn RenderStack>,
    ) -> Result<Self> {
        let base_handle = registry.get(base)?.handle;
        render.insert_at(0, base_handle);
        render.set_opacity(base_handle, 1.0);

        let inactive: Vec<String> = registry
            .names()
            .into_iter()
            .filter(|name| *name != base)
            .map(|name| name.to_string())
            .collect();
        let opacities = registry
            .names()
            .into_iter()
            .map(|name| (name.to_string(), 1.0))
            .collect();

        Ok(Self {
            registry,
            render,
            active: vec![base.to_string()],
            inactive,
            opacities,
        })
    }

    /// Move a layer from the pool to the top of the active stack.
    ///
    /// A newly activated layer is always raised above all other active
    /// layers; callers cannot choose the insertion point. Its opacity is
    /// reset to fully opaque.
    pub fn activate(&mut self, name: &str) -> Result<()> {
        let handle = self.registry.get(name)?.handle;
        if self.active.iter().any(|n| n == name) {
            return Err(MapstackError::AlreadyActive {
                name: name.to_string(),
            });
        }
        let pool_index = self
            .inactive
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| MapstackError::NotFound {
                name: name.to_string(),
            })?;

        self.inactive.remove(pool_index);
        self.render.insert_at(self.active.len(), handle);
        self.render.set_opacity(handle, 1.0);
        self.opacities.insert(name.to_string(), 1.0);
        self.active.push(name.to_string());

        debug!("activated layer '{}' at render index {}", name, self.active.len() - 1);
        Ok(())
    }

    /// Remove a layer from the active stack and append it to the pool.
    pub fn deactivate(&mut self, name: &str) -> Result<()> {
        if name == self.active[0] {
            return Err(MapstackError::ImmutableBase {
                name: name.to_string(),
            });
        }
        let render_index = self
            .active
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| MapstackError::NotActive {
                name: name.to_string(),
            })?;

        self.render.remove_at(render_index);
        self.active.remove(render_index);
        self.inactive.push(name.to_string());

        debug!("deactivated layer '{}' from render index {}", name, render_index);
        Ok(())
    }

    /// Exchange the active layers at two display positions.
    ///
    /// Both positions are translated through the display-to-render mapping
    /// before the render stack is touched. The render stack mutation
    /// removes the two affected entries top-down and reinserts them
    /// bottom-up: a single removal shifts every index above it, so the
    /// higher entry must come out first and go back in last. All
    /// validation happens before the first mutation, so a failed call
    /// commits nothing.
    pub fn move_active(&mut self, old_display: usize, new_display: usize) -> Result<()> {
        let n = self.active.len();
        let out_of_range = |index| MapstackError::OutOfRange {
            index,
            min: 1,
            max: n.saturating_sub(1),
        };
        let old_render = render_index_of(old_display, n).ok_or_else(|| out_of_range(old_display))?;
        let new_render = render_index_of(new_display, n).ok_or_else(|| out_of_range(new_display))?;
        if old_render == new_render {
            return Ok(());
        }

        let (lo, hi) = if old_render < new_render {
            (old_render, new_render)
        } else {
            (new_render, old_render)
        };
        let lo_handle = self.registry.get(&self.active[lo])?.handle;
        let hi_handle = self.registry.get(&self.active[hi])?.handle;

        self.active.swap(lo, hi);
        self.render.remove_at(hi);
        self.render.remove_at(lo);
        self.render.insert_at(lo, hi_handle);
        self.render.insert_at(hi, lo_handle);

        debug!("moved active layers between render indices {lo} and {hi}");
        Ok(())
    }

    /// Move a pool entry to a new position. Pool order has no rendering
    /// effect; it only drives the button list.
    pub fn move_pool(&mut self, old_index: usize, new_index: usize) -> Result<()> {
        let len = self.inactive.len();
        let out_of_range = |index| MapstackError::OutOfRange {
            index,
            min: 0,
            max: len.saturating_sub(1),
        };
        if old_index >= len {
            return Err(out_of_range(old_index));
        }
        if new_index >= len {
            return Err(out_of_range(new_index));
        }
        if old_index == new_index {
            return Ok(());
        }

        let name = self.inactive.remove(old_index);
        self.inactive.insert(new_index, name);
        Ok(())
    }

    /// Set an active layer's opacity, clamped to [0, 1].
    pub fn set_opacity(&mut self, name: &str, value: f32) -> Result<()> {
        if !self.is_active(name) {
            return Err(MapstackError::NotActive {
                name: name.to_string(),
            });
        }
        let handle = self.registry.get(name)?.handle;
        let value = value.clamp(0.0, 1.0);
        self.render.set_opacity(handle, value);
        self.opacities.insert(name.to_string(), value);
        Ok(())
    }

    /// Replace the base layer in place at render index 0.
    ///
    /// The outgoing base is appended to the pool; a replacement coming
    /// from the pool leaves it. Replacing the base with itself is a no-op.
    pub fn replace_base(&mut self, name: &str) -> Result<()> {
        let handle = self.registry.get(name)?.handle;
        if name == self.active[0] {
            return Ok(());
        }
        if self.active[1..].iter().any(|n| n == name) {
            return Err(MapstackError::AlreadyActive {
                name: name.to_string(),
            });
        }

        if let Some(pool_index) = self.inactive.iter().position(|n| n == name) {
            self.inactive.remove(pool_index);
        }
        let old_base = std::mem::replace(&mut self.active[0], name.to_string());
        self.inactive.push(old_base);
        self.render.set_at(0, handle);
        self.render.set_opacity(handle, 1.0);
        self.opacities.insert(name.to_string(), 1.0);

        debug!("replaced base layer with '{}'", name);
        Ok(())
    }

    /// Activate several layers in order, skipping ones already active.
    pub fn activate_group<'a, I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            if self.is_active(name) {
                continue;
            }
            self.activate(name)?;
        }
        Ok(())
    }

    /// Deactivate every non-base layer, bottom-up.
    pub fn clear_active(&mut self) -> Result<()> {
        while self.active.len() > 1 {
            let name = self.active[1].clone();
            self.deactivate(&name)?;
        }
        Ok(())
    }

    /// Take a read-only snapshot of both lists.
    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot {
            active: self.active.clone(),
            inactive: self.inactive.clone(),
        }
    }

    /// Check whether a layer is currently active
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|n| n == name)
    }

    /// Name of the current base layer
    pub fn base_name(&self) -> &str {
        &self.active[0]
    }

    /// Number of active layers, base included
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Last opacity applied to a layer
    pub fn opacity_of(&self, name: &str) -> Option<f32> {
        self.opacities.get(name).copied()
    }

    /// The catalog this controller was built over
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Current bottom-to-top render order as reported by the render engine
    pub fn render_handles(&self) -> Vec<RenderHandle> {
        self.render.ordered_handles()
    }
}
