//! Layer Stack Module
//!
//! Keeps the UI-visible active/inactive layer lists and the render
//! engine's ordered layer stack consistent:
//! - `render_index_of`: the display-order to render-order translation
//! - `StackController`: membership, reordering and opacity operations
//! - `RenderStack`: the render engine contract, with an in-memory
//!   implementation for tests and the demo CLI

mod controller;
mod index;
mod render;

pub use controller::{StackController, StackSnapshot};
pub use index::render_index_of;
pub use render::{MemoryRenderStack, RenderStack};
