//! Mapstack - Layer Stack Controller for Composable Map Views
//!
//! A map view is composed from a fixed catalog of named layers. Each
//! layer is either active (rendered, stacked bottom-to-top) or pooled
//! (inactive, awaiting activation). Mapstack keeps three things
//! consistent while the user toggles, reorders and fades layers:
//!
//! 1. The UI-visible ordered lists of active and inactive layers
//! 2. The render engine's ordered layer stack
//! 3. Point-query feature info, aggregated in stacking order
//!
//! # Architecture
//!
//! - `catalog`: immutable layer registry, built from a JSON config
//! - `stack`: the controller owning all membership/order/opacity state
//! - `bridge`: drag-and-drop events translated into controller calls
//! - `query`: sequential, fail-soft async feature-info aggregation
//!
//! Rendering, gesture detection and popup chrome are external
//! collaborators behind the `RenderStack`, `ControlPanel`,
//! `FeatureInfoSource` and `PopupSink` traits.

pub mod bridge;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod query;
pub mod stack;

pub use error::{MapstackError, Result};
